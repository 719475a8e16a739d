//! Command implementations.

pub mod classify;
pub mod config;
pub mod run;

pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::run::execute_run;

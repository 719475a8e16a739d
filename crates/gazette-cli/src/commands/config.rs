//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("# {}", path.display());
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Init { preset, force } => {
            if path.exists() && !force {
                println!(
                    "{}",
                    formatter.warning(&format!(
                        "{} already exists; use --force to overwrite",
                        path.display()
                    ))
                );
                return Ok(());
            }

            let fresh = Config {
                pipeline: preset.map(Into::into).unwrap_or_default(),
                ..Config::default()
            };
            fresh.save(path)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote {}", path.display()))
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PresetArg;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    fn formatter() -> Formatter {
        Formatter::new(OutputFormat::Table, false)
    }

    #[test]
    fn test_init_writes_preset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let args = ConfigArgs {
            action: ConfigAction::Init {
                preset: Some(PresetArg::Lenient),
                force: false,
            },
        };

        execute_config(args, &Config::default(), &path, &formatter()).unwrap();

        let written = Config::load(&path).unwrap();
        assert_eq!(written.pipeline.limits.max_inclusions, 20);
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\ncolor = false\n").unwrap();
        let args = ConfigArgs {
            action: ConfigAction::Init {
                preset: None,
                force: false,
            },
        };

        execute_config(args, &Config::default(), &path, &formatter()).unwrap();

        let kept = Config::load(&path).unwrap();
        assert!(!kept.settings.color);
    }
}

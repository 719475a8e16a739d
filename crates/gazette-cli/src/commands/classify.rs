//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use gazette_pipeline::CategoryClassifier;

/// Execute the classify command.
pub fn execute_classify(args: ClassifyArgs, formatter: &Formatter) -> Result<()> {
    if args.title.trim().is_empty() && args.text.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Title and text cannot both be empty".to_string(),
        ));
    }

    let classifier = CategoryClassifier::new();
    let category = classifier.classify(args.label.as_deref(), &args.title, &args.text);
    let scores = classifier.scores(&args.title, &args.text);

    println!("{}", formatter.format_classification(category, &scores)?);
    Ok(())
}

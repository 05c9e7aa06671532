//! Detect command implementation
//!
//! Prints resolved entities as JSON without rewriting the text.

use super::{build_engine, parse_language, read_inputs};
use crate::anonymization::Language;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Input files (reads standard input when omitted)
    pub files: Vec<PathBuf>,

    /// Force the document language instead of classifying it (en, fr)
    #[arg(long, value_parser = parse_language)]
    pub language: Option<Language>,
}

impl DetectArgs {
    /// Execute the detect command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let engine = match build_engine(config_path) {
            Ok(engine) => engine,
            Err(code) => return Ok(code),
        };

        let inputs = read_inputs(&self.files).await?;
        let mut documents = Vec::with_capacity(inputs.len());
        let mut failed = false;

        for (source, text) in &inputs {
            let language = engine.resolve_language(text, self.language);
            match engine.detect(text, Some(language)) {
                Ok(entities) => {
                    tracing::info!(source = %source, entities = entities.len(), "Detection complete");
                    documents.push(serde_json::json!({
                        "source": source,
                        "language": language,
                        "entities": entities,
                    }));
                }
                Err(e) => {
                    crate::log_error_with_context!(&e, "Detection failed");
                    eprintln!("❌ {source}: {e}");
                    failed = true;
                }
            }
        }

        println!("{}", serde_json::to_string_pretty(&documents)?);

        if failed {
            return Ok(3); // Detection failure exit code
        }
        Ok(0)
    }
}

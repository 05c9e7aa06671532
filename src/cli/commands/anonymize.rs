//! Anonymize command implementation
//!
//! This module implements the `anonymize` command. Documents are analyzed
//! concurrently on the blocking thread pool against one shared engine.

use super::{build_engine, parse_language, read_inputs};
use crate::anonymization::{AnonymizationResult, BatchReport, Language};
use crate::log_document_result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Input files (reads standard input when omitted)
    pub files: Vec<PathBuf>,

    /// Force the document language instead of classifying it (en, fr)
    #[arg(long, value_parser = parse_language)]
    pub language: Option<Language>,

    /// Print full JSON results instead of anonymized text
    #[arg(long)]
    pub json: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let engine = match build_engine(config_path) {
            Ok(engine) => Arc::new(engine),
            Err(code) => return Ok(code),
        };

        let inputs = read_inputs(&self.files).await?;
        tracing::info!(documents = inputs.len(), "Anonymizing documents");

        let mut handles = Vec::with_capacity(inputs.len());
        for (source, text) in inputs {
            let engine = Arc::clone(&engine);
            let language = self.language;
            handles.push(tokio::task::spawn_blocking(move || {
                let result = engine.analyze(&text, language);
                (source, result)
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await?);
        }

        let mut report = BatchReport::new();
        for (source, result) in &results {
            log_document_result!(source, result);
            report.add_result(source, result);
        }

        self.print_results(&results)?;

        if results.len() > 1 {
            eprint!("{}", report.format_console());
        }

        if report.has_failures() {
            for (source, result) in results.iter().filter(|(_, r)| !r.success) {
                eprintln!(
                    "❌ {source}: {}",
                    result.error.as_deref().unwrap_or("analysis failed")
                );
            }
            return Ok(3); // Anonymization failure exit code
        }

        Ok(0)
    }

    fn print_results(&self, results: &[(String, AnonymizationResult)]) -> anyhow::Result<()> {
        if self.json {
            let output = match results {
                [(_, result)] => serde_json::to_string_pretty(result)?,
                _ => {
                    let documents: Vec<serde_json::Value> = results
                        .iter()
                        .map(|(source, result)| {
                            serde_json::json!({ "source": source, "result": result })
                        })
                        .collect();
                    serde_json::to_string_pretty(&documents)?
                }
            };
            println!("{output}");
            return Ok(());
        }

        let multiple = results.len() > 1;
        for (source, result) in results.iter().filter(|(_, r)| r.success) {
            if multiple {
                println!("==> {source} <==");
            }
            println!("{}", result.anonymized_text);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_anonymize_args_parse() {
        let cli = Cli::parse_from(["oli", "anonymize", "a.txt", "b.txt", "--language", "fr"]);
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.language, Some(Language::French));
                assert!(!args.json);
            }
            _ => panic!("expected anonymize command"),
        }
    }

    #[test]
    fn test_anonymize_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["oli", "anonymize", "--language", "de"]).is_err());
    }
}

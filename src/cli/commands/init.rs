//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing OLI configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: oli validate-config");
                println!("  3. Anonymize a document: oli anonymize notes.txt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# OLI Configuration File
# Bilingual (French/English) PII detection and anonymization

[application]
log_level = "info"

[analyzer]
languages = ["en", "fr"]
score_threshold = 0.7

[analyzer.audit]
enabled = false
log_path = "./audit/anonymization.log"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# OLI Configuration File
# Bilingual (French/English) PII detection and anonymization
#
# Values of the form ${VAR_NAME} are replaced with environment variables.
# Any setting can also be overridden with OLI_<SECTION>_<KEY>, for example
# OLI_ANALYZER_SCORE_THRESHOLD=0.8 or OLI_LOGGING_LOCAL_ENABLED=true.

[application]
# Log level: trace | debug | info | warn | error
log_level = "info"

[analyzer]
# Languages the classifier may return. A document classified as a language
# outside this list is processed as the first entry.
languages = ["en", "fr"]

# Candidates scoring below this value are discarded
score_threshold = 0.7

# Use the NER provider when one is available (English only)
ner_enabled = true

# Backtracking bound applied to every recognizer regex
max_backtrack_steps = 1000000

# Custom recognizer catalog (uses the built-in catalog when unset)
# recognizer_library = "./patterns/recognizers.toml"

# Replacement tokens, merged over the built-in <TYPE> tokens
[analyzer.custom_operators]
# CA_SIN = "<NAS>"
# PERSON = "<NOM>"

[analyzer.context]
# Characters inspected before each match for context keywords
window_chars = 40
# Score increase when a keyword is found (capped at 1.0)
boost = 0.4

[analyzer.audit]
# Audit trail of detections. Matched values are stored as SHA-256 hashes.
enabled = false
log_path = "./audit/anonymization.log"
# log_path = "${OLI_AUDIT_DIR}/anonymization.log"
json_format = true

[logging]
# JSON log files in addition to console output on stderr
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

//! Entities command implementation

use super::build_engine;
use crate::anonymization::anonymizer::ReplacementTokens;
use clap::Args;

/// Arguments for the entities command
#[derive(Args, Debug)]
pub struct EntitiesArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl EntitiesArgs {
    /// Execute the entities command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let engine = match build_engine(config_path) {
            Ok(engine) => engine,
            Err(code) => return Ok(code),
        };

        let tokens = ReplacementTokens::new(&engine.config().custom_operators);
        let entity_types = engine.supported_entity_types();

        if self.json {
            let entries: Vec<serde_json::Value> = entity_types
                .iter()
                .map(|entity_type| {
                    serde_json::json!({
                        "entity_type": entity_type,
                        "token": tokens.token_for(entity_type),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(0);
        }

        println!("Detector: {}", engine.detector_name());
        println!();
        for entity_type in &entity_types {
            println!("  {entity_type:<16} {}", tokens.token_for(entity_type));
        }

        Ok(0)
    }
}

use crate::commands::print_json;
use anyhow::Result;
use clap::Args;
use vetbase_config::AppConfig;
use vetbase_core::normalize::Normalizer;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Raw phone field, exactly as stored
    pub raw: String,
}

pub fn run(config: &AppConfig, json: bool, args: NormalizeArgs) -> Result<()> {
    let normalizer = Normalizer::new(config.normalize.clone());
    let result = normalizer.normalize(&args.raw);

    if json {
        return print_json(&result);
    }

    if result.is_empty() {
        println!("no digits found");
        return Ok(());
    }
    for number in &result.valid {
        println!("valid: {number}");
    }
    for digits in &result.invalid {
        println!("invalid: {digits}");
    }
    Ok(())
}

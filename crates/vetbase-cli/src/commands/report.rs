use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::parse_date;
use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use vetbase_core::normalize::{normalize_batch, Normalizer};

const VALID_FILENAME: &str = "correct_phones.txt";
const INVALID_FILENAME: &str = "incorrect_phones.txt";

#[derive(Debug, Args)]
pub struct PhoneReportArgs {
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: String,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: String,
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct ReportSummary {
    owners: usize,
    valid: usize,
    invalid: usize,
    valid_file: String,
    invalid_file: String,
}

/// Phone export for a vaccination campaign: every distinct owner vaccinated
/// in the range contributes to one globally deduplicated valid/invalid pair
/// of line-per-entry text files, sorted ascending for stable diffs.
pub fn phone_report(ctx: &Context<'_>, args: PhoneReportArgs) -> Result<()> {
    let from = parse_date(&args.from)?;
    let to = parse_date(&args.to)?;
    if to < from {
        return Err(invalid_input("--to precedes --from"));
    }

    let owners = ctx.store.vaccinations().owners_vaccinated_between(from, to)?;
    let normalizer = Normalizer::new(ctx.config.normalize.clone());
    let fields: Vec<&str> = owners.iter().map(|owner| owner.phone.as_str()).collect();
    let report = normalize_batch(&normalizer, &fields);

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output directory {}", args.out_dir.display()))?;
    let valid_path = args.out_dir.join(VALID_FILENAME);
    let invalid_path = args.out_dir.join(INVALID_FILENAME);
    write_lines(&valid_path, report.valid())?;
    write_lines(&invalid_path, report.invalid())?;

    if ctx.json {
        let summary = ReportSummary {
            owners: owners.len(),
            valid: report.valid_count(),
            invalid: report.invalid_count(),
            valid_file: valid_path.display().to_string(),
            invalid_file: invalid_path.display().to_string(),
        };
        return print_json(&summary);
    }

    println!(
        "{} owners vaccinated between {from} and {to}",
        owners.len()
    );
    println!(
        "{} valid numbers -> {}",
        report.valid_count(),
        valid_path.display()
    );
    println!(
        "{} entries for review -> {}",
        report.invalid_count(),
        invalid_path.display()
    );
    Ok(())
}

fn write_lines<'a>(path: &std::path::Path, lines: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

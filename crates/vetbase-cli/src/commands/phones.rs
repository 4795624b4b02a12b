use crate::commands::{print_json, Context};
use crate::util::now_utc;
use anyhow::Result;
use clap::{ArgAction, Args};
use serde::Serialize;
use tracing::info;
use vetbase_core::normalize::Normalizer;

#[derive(Debug, Args)]
pub struct FixPhonesArgs {
    /// Compute and print corrections without persisting them
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct FixEntry {
    owner_id: String,
    name: String,
    original: String,
    normalized: String,
    invalid: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FixReport {
    examined: usize,
    changed: usize,
    dry_run: bool,
    entries: Vec<FixEntry>,
}

/// Bulk correction pass: rewrite every owner's phone field to its ", "-joined
/// canonical form. Fields with no recognizable number are left untouched;
/// their fragments are reported for manual follow-up instead.
pub fn fix_phones(ctx: &Context<'_>, args: FixPhonesArgs) -> Result<()> {
    let normalizer = Normalizer::new(ctx.config.normalize.clone());
    let owners = ctx.store.owners().list()?;

    let mut report = FixReport {
        examined: 0,
        changed: 0,
        dry_run: args.dry_run,
        entries: Vec::new(),
    };

    for owner in owners {
        if owner.phone.trim().is_empty() {
            continue;
        }
        report.examined += 1;

        let result = normalizer.normalize(&owner.phone);
        if result.valid.is_empty() {
            continue;
        }
        let normalized = result.joined_valid();
        if normalized == owner.phone {
            continue;
        }

        info!(
            owner = %owner.id,
            original = %owner.phone,
            normalized = %normalized,
            invalid = ?result.invalid,
            "phone corrected"
        );

        if !args.dry_run {
            ctx.store
                .owners()
                .update_phone(now_utc(), owner.id, &normalized)?;
        }
        report.changed += 1;
        report.entries.push(FixEntry {
            owner_id: owner.id.to_string(),
            name: owner.name,
            original: owner.phone,
            normalized,
            invalid: result.invalid,
        });
    }

    if ctx.json {
        return print_json(&report);
    }

    for entry in &report.entries {
        println!("owner {} ({})", entry.owner_id, entry.name);
        println!("  original:   {}", entry.original);
        println!("  normalized: {}", entry.normalized);
        if !entry.invalid.is_empty() {
            println!("  needs review: {}", entry.invalid.join(", "));
        }
    }
    if args.dry_run {
        println!(
            "Dry run: {} of {} phone fields would change.",
            report.changed, report.examined
        );
    } else {
        println!(
            "Updated {} of {} phone fields.",
            report.changed, report.examined
        );
    }
    Ok(())
}

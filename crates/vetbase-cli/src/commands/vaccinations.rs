use crate::commands::{print_json, Context};
use crate::util::{now_utc, parse_date, parse_owner_id};
use anyhow::Result;
use clap::Args;
use vetbase_store::repo::VaccinationNew;

#[derive(Debug, Args)]
pub struct RecordVaccinationArgs {
    pub owner_id: String,
    #[arg(long)]
    pub vaccine: String,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub on: String,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub next_due: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListVaccinationsArgs {
    pub owner_id: String,
}

pub fn record_vaccination(ctx: &Context<'_>, args: RecordVaccinationArgs) -> Result<()> {
    let owner_id = parse_owner_id(&args.owner_id)?;
    let administered_on = parse_date(&args.on)?;
    let next_due_on = match args.next_due.as_deref() {
        Some(raw) => Some(parse_date(raw)?),
        None => None,
    };

    let vaccination = ctx.store.vaccinations().create(
        now_utc(),
        VaccinationNew {
            owner_id,
            vaccine_name: args.vaccine,
            administered_on,
            next_due_on,
        },
    )?;

    if ctx.json {
        return print_json(&vaccination);
    }
    println!(
        "Recorded {} on {} for owner {}",
        vaccination.vaccine_name, vaccination.administered_on, vaccination.owner_id
    );
    Ok(())
}

pub fn list_vaccinations(ctx: &Context<'_>, args: ListVaccinationsArgs) -> Result<()> {
    let owner_id = parse_owner_id(&args.owner_id)?;
    let vaccinations = ctx.store.vaccinations().list_for_owner(owner_id)?;

    if ctx.json {
        return print_json(&vaccinations);
    }
    for vaccination in vaccinations {
        match vaccination.next_due_on {
            Some(due) => println!(
                "{}  {}  next due {}",
                vaccination.administered_on, vaccination.vaccine_name, due
            ),
            None => println!(
                "{}  {}",
                vaccination.administered_on, vaccination.vaccine_name
            ),
        }
    }
    Ok(())
}

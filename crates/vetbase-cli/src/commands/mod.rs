use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};
use vetbase_config::AppConfig;
use vetbase_store::Store;

pub mod backup;
pub mod completions;
pub mod normalize;
pub mod owners;
pub mod phones;
pub mod report;
pub mod vaccinations;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

use crate::error::invalid_input;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use std::str::FromStr;
use vetbase_core::domain::OwnerId;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn parse_owner_id(raw: &str) -> Result<OwnerId> {
    OwnerId::from_str(raw.trim()).map_err(|_| invalid_input(format!("invalid owner id: {raw}")))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| invalid_input("invalid date format: expected YYYY-MM-DD"))
}

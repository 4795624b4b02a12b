use crate::error::{Result, StoreError};
use crate::repo::owners::owner_from_row;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection};
use std::str::FromStr;
use vetbase_core::domain::{Owner, OwnerId, Vaccination, VaccinationId};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct VaccinationNew {
    pub owner_id: OwnerId,
    pub vaccine_name: String,
    pub administered_on: NaiveDate,
    pub next_due_on: Option<NaiveDate>,
}

pub struct VaccinationsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> VaccinationsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: VaccinationNew) -> Result<Vaccination> {
        let vaccination = Vaccination {
            id: VaccinationId::new(),
            owner_id: input.owner_id,
            vaccine_name: input.vaccine_name,
            administered_on: input.administered_on,
            next_due_on: input.next_due_on,
            created_at: now_utc,
        };
        vaccination.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO vaccinations (id, owner_id, vaccine_name, administered_on, next_due_on, created_at)
             SELECT ?1, id, ?3, ?4, ?5, ?6 FROM owners WHERE id = ?2;",
            params![
                vaccination.id.to_string(),
                vaccination.owner_id.to_string(),
                vaccination.vaccine_name,
                vaccination.administered_on.format(DATE_FORMAT).to_string(),
                vaccination
                    .next_due_on
                    .map(|date| date.format(DATE_FORMAT).to_string()),
                vaccination.created_at,
            ],
        )?;
        if inserted == 0 {
            return Err(StoreError::NotFound(format!(
                "owner {}",
                vaccination.owner_id
            )));
        }
        Ok(vaccination)
    }

    pub fn list_for_owner(&self, owner_id: OwnerId) -> Result<Vec<Vaccination>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, vaccine_name, administered_on, next_due_on, created_at
             FROM vaccinations WHERE owner_id = ?1
             ORDER BY administered_on, id;",
        )?;
        let rows = stmt.query_map(params![owner_id.to_string()], vaccination_from_row)?;
        let vaccinations = rows.collect::<rusqlite::Result<Vec<Vaccination>>>()?;
        Ok(vaccinations)
    }

    /// Distinct owners with at least one vaccination administered inside the
    /// inclusive date range. Drives the phone report.
    pub fn owners_vaccinated_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Owner>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT o.id, o.name, o.address, o.phone, o.created_at, o.updated_at
             FROM owners o
             JOIN vaccinations v ON v.owner_id = o.id
             WHERE v.administered_on >= ?1 AND v.administered_on <= ?2
             ORDER BY o.name COLLATE NOCASE, o.id;",
        )?;
        let rows = stmt.query_map(
            params![
                from.format(DATE_FORMAT).to_string(),
                to.format(DATE_FORMAT).to_string(),
            ],
            owner_from_row,
        )?;
        let owners = rows.collect::<rusqlite::Result<Vec<Owner>>>()?;
        Ok(owners)
    }
}

fn vaccination_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Vaccination> {
    let id_str: String = row.get(0)?;
    let id = VaccinationId::from_str(&id_str)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err)))?;
    let owner_str: String = row.get(1)?;
    let owner_id = OwnerId::from_str(&owner_str)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(err)))?;
    let administered: String = row.get(3)?;
    let administered_on = parse_date(3, &administered)?;
    let next_due: Option<String> = row.get(4)?;
    let next_due_on = match next_due {
        Some(raw) => Some(parse_date(4, &raw)?),
        None => None,
    };
    Ok(Vaccination {
        id,
        owner_id,
        vaccine_name: row.get(2)?,
        administered_on,
        next_due_on,
        created_at: row.get(5)?,
    })
}

fn parse_date(index: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err)))
}

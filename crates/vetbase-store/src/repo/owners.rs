use crate::error::{Result, StoreError};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;
use vetbase_core::domain::{Owner, OwnerId};

#[derive(Debug, Clone)]
pub struct OwnerNew {
    pub name: String,
    pub address: Option<String>,
    pub phone: String,
}

pub struct OwnersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> OwnersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: OwnerNew) -> Result<Owner> {
        let owner = Owner {
            id: OwnerId::new(),
            name: input.name,
            address: input.address,
            phone: input.phone,
            created_at: now_utc,
            updated_at: now_utc,
        };
        owner.validate()?;

        self.conn.execute(
            "INSERT INTO owners (id, name, address, phone, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                owner.id.to_string(),
                owner.name,
                owner.address,
                owner.phone,
                owner.created_at,
                owner.updated_at,
            ],
        )?;
        Ok(owner)
    }

    pub fn get(&self, id: OwnerId) -> Result<Option<Owner>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, address, phone, created_at, updated_at
             FROM owners WHERE id = ?1;",
        )?;
        let owner = stmt
            .query_row(params![id.to_string()], owner_from_row)
            .optional()?;
        Ok(owner)
    }

    pub fn list(&self) -> Result<Vec<Owner>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, address, phone, created_at, updated_at
             FROM owners ORDER BY name COLLATE NOCASE, id;",
        )?;
        let rows = stmt.query_map([], owner_from_row)?;
        let owners = rows.collect::<rusqlite::Result<Vec<Owner>>>()?;
        Ok(owners)
    }

    pub fn update_phone(&self, now_utc: i64, id: OwnerId, phone: &str) -> Result<Owner> {
        let changed = self.conn.execute(
            "UPDATE owners SET phone = ?1, updated_at = ?2 WHERE id = ?3;",
            params![phone, now_utc, id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("owner {id}")));
        }
        self.get(id)?
            .ok_or_else(|| StoreError::NotFound(format!("owner {id}")))
    }

    pub fn delete(&self, id: OwnerId) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM owners WHERE id = ?1;", params![id.to_string()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("owner {id}")));
        }
        Ok(())
    }
}

pub(crate) fn owner_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Owner> {
    let id_str: String = row.get(0)?;
    let id = OwnerId::from_str(&id_str)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err)))?;
    Ok(Owner {
        id,
        name: row.get(1)?,
        address: row.get(2)?,
        phone: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

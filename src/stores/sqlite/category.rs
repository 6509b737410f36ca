//! Implements a SQLite backed category store.
//!
//! Each category is a row and its subcategories are kept as a JSON array so
//! that the store has the same update semantics as a document database.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, types::Type};

use crate::{
    Error,
    category::Category,
    stores::{CategoryStore, UpdateOutcome},
};

// Code 2067 occurs when a UNIQUE constraint failed.
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

/// Creates, retrieves, updates and deletes categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a category store with a SQLite database, creating the category
    /// table if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_category_table(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }

    fn find_where(&self, column: &str, value: &str) -> Result<Option<Category>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT category, category_id, sub_category, created_at
                FROM category WHERE {column} = ?1
                ORDER BY id ASC LIMIT 1;"
            ))?
            .query_row([value], map_row)
            .optional()
            .map_err(|error| error.into())
    }

    /// Read the subcategories of `name`, pass them to `update` and write the
    /// result back.
    ///
    /// `update` returns `None` if the category does not match the update,
    /// otherwise the new list of subcategories. The read and write happen
    /// while holding the connection lock.
    fn update_sub_categories<F>(&self, name: &str, update: F) -> Result<UpdateOutcome, Error>
    where
        F: FnOnce(&Option<Vec<String>>) -> Option<Option<Vec<String>>>,
    {
        let connection = self.lock()?;

        let stored: Option<Option<String>> = connection
            .query_row(
                "SELECT sub_category FROM category WHERE category = ?1;",
                [name],
                |row| row.get(0),
            )
            .optional()?;

        let current = match stored {
            Some(raw) => decode_sub_categories(raw.as_deref(), 0)?,
            None => return Ok(UpdateOutcome::default()),
        };

        let updated = match update(&current) {
            Some(updated) => updated,
            None => return Ok(UpdateOutcome::default()),
        };

        if updated == current {
            return Ok(UpdateOutcome {
                matched_count: 1,
                modified_count: 0,
            });
        }

        connection.execute(
            "UPDATE category SET sub_category = ?1 WHERE category = ?2;",
            (encode_sub_categories(&updated)?, name),
        )?;

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: 1,
        })
    }
}

impl CategoryStore for SQLiteCategoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, Error> {
        self.find_where("category", name)
    }

    async fn find_by_id(&self, category_id: &str) -> Result<Option<Category>, Error> {
        self.find_where("category_id", category_id)
    }

    async fn list_all(&self) -> Result<Vec<Category>, Error> {
        self.lock()?
            .prepare(
                "SELECT category, category_id, sub_category, created_at
                FROM category ORDER BY id ASC;",
            )?
            .query_map([], map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    async fn insert(&self, category: &Category) -> Result<(), Error> {
        let connection = self.lock()?;

        connection
            .execute(
                "INSERT INTO category (category, category_id, sub_category, created_at)
                VALUES (?1, ?2, ?3, ?4);",
                (
                    &category.category,
                    &category.category_id,
                    encode_sub_categories(&category.sub_category)?,
                    category.created_at,
                ),
            )
            .map_err(|error| match error {
                error if is_unique_violation(&error) => {
                    Error::DuplicateCategory(category.category.clone())
                }
                error => error.into(),
            })?;

        Ok(())
    }

    async fn set_sub_categories(
        &self,
        name: &str,
        sub_categories: &[String],
    ) -> Result<UpdateOutcome, Error> {
        self.update_sub_categories(name, |_| Some(Some(sub_categories.to_vec())))
    }

    async fn rename(&self, name: &str, new_name: &str) -> Result<UpdateOutcome, Error> {
        let connection = self.lock()?;

        let rows_affected = connection
            .execute(
                "UPDATE category SET category = ?1 WHERE category = ?2;",
                (new_name, name),
            )
            .map_err(|error| match error {
                error if is_unique_violation(&error) => {
                    Error::DuplicateCategory(new_name.to_owned())
                }
                error => error.into(),
            })?;

        let matched_count = rows_affected as u64;
        let modified_count = if name == new_name { 0 } else { matched_count };

        Ok(UpdateOutcome {
            matched_count,
            modified_count,
        })
    }

    async fn push_sub_category(
        &self,
        name: &str,
        sub_category: &str,
    ) -> Result<UpdateOutcome, Error> {
        self.update_sub_categories(name, |current| {
            let mut updated = current.clone().unwrap_or_default();
            updated.push(sub_category.to_owned());

            Some(Some(updated))
        })
    }

    async fn pull_sub_category(
        &self,
        name: &str,
        sub_category: &str,
    ) -> Result<UpdateOutcome, Error> {
        self.update_sub_categories(name, |current| {
            Some(current.as_ref().map(|entries| {
                entries
                    .iter()
                    .filter(|entry| *entry != sub_category)
                    .cloned()
                    .collect()
            }))
        })
    }

    async fn replace_sub_category(
        &self,
        name: &str,
        old: &str,
        new: &str,
    ) -> Result<UpdateOutcome, Error> {
        self.update_sub_categories(name, |current| {
            let mut updated = current.clone()?;
            let position = updated.iter().position(|entry| entry == old)?;
            updated[position] = new.to_owned();

            Some(Some(updated))
        })
    }

    async fn delete(&self, name: &str) -> Result<u64, Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM category WHERE category = ?1;", [name])?;

        Ok(rows_affected as u64)
    }
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            category TEXT NOT NULL UNIQUE,
            category_id TEXT,
            sub_category TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_category_id ON category(category_id);",
    )?;

    Ok(())
}

fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(sql_error, _)
            if sql_error.extended_code == SQLITE_CONSTRAINT_UNIQUE
    )
}

fn encode_sub_categories(sub_categories: &Option<Vec<String>>) -> Result<Option<String>, Error> {
    sub_categories
        .as_ref()
        .map(|entries| {
            serde_json::to_string(entries).map_err(|error| {
                tracing::error!("could not encode subcategories {entries:?}: {error}");
                Error::DatabaseError(error.to_string())
            })
        })
        .transpose()
}

fn decode_sub_categories(
    raw: Option<&str>,
    column: usize,
) -> Result<Option<Vec<String>>, rusqlite::Error> {
    raw.map(|text| {
        serde_json::from_str(text).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
        })
    })
    .transpose()
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let category = row.get(0)?;
    let category_id = row.get(1)?;
    let raw_sub_category: Option<String> = row.get(2)?;
    let sub_category = decode_sub_categories(raw_sub_category.as_deref(), 2)?;
    let created_at = row.get(3)?;

    Ok(Category {
        category,
        category_id,
        sub_category,
        created_at,
    })
}

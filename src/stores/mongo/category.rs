//! Implements a MongoDB backed category store.

use mongodb::{
    Client, Collection, IndexModel,
    bson::{DateTime, Document, doc},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, UpdateModifications},
    results::UpdateResult,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    category::Category,
    config::StoreConfig,
    stores::{CategoryStore, UpdateOutcome},
};

// The server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// A category as it is stored in MongoDB.
///
/// `created_at` is kept as a BSON datetime so that it can be queried and
/// sorted by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CategoryDocument {
    category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category_id: Option<String>,
    // Left out rather than stored as null so that `$push` can create the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_category: Option<Vec<String>>,
    created_at: DateTime,
}

impl From<&Category> for CategoryDocument {
    fn from(category: &Category) -> Self {
        let millis = category.created_at.unix_timestamp_nanos() / 1_000_000;

        Self {
            category: category.category.clone(),
            category_id: category.category_id.clone(),
            sub_category: category.sub_category.clone(),
            created_at: DateTime::from_millis(millis as i64),
        }
    }
}

impl TryFrom<CategoryDocument> for Category {
    type Error = Error;

    fn try_from(document: CategoryDocument) -> Result<Self, Self::Error> {
        let nanos = i128::from(document.created_at.timestamp_millis()) * 1_000_000;
        let created_at = OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|error| {
            tracing::error!(
                "category \"{}\" has an out of range created_at: {error}",
                document.category
            );
            Error::DatabaseError(error.to_string())
        })?;

        Ok(Category {
            category: document.category,
            category_id: document.category_id,
            sub_category: document.sub_category,
            created_at,
        })
    }
}

/// Creates, retrieves, updates and deletes categories in a MongoDB collection.
#[derive(Clone)]
pub struct MongoCategoryStore {
    collection: Collection<CategoryDocument>,
}

impl MongoCategoryStore {
    /// Connect to the MongoDB deployment described by `config`.
    ///
    /// The server is pinged before returning so that an unreachable store is
    /// reported at startup, and a unique index on the category name is
    /// created if it does not exist.
    ///
    /// # Errors
    /// Returns [Error::StoreUnreachable] if the server cannot be reached, or
    /// [Error::DatabaseError] if the index cannot be created.
    pub async fn connect(config: &StoreConfig) -> Result<Self, Error> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|error| Error::StoreUnreachable(error.to_string()))?;

        let database = client.database(&config.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|error| Error::StoreUnreachable(error.to_string()))?;

        let collection = database.collection::<CategoryDocument>(&config.collection);
        let unique_name = IndexModel::builder()
            .keys(doc! { "category": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(unique_name).await?;

        Ok(Self { collection })
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Category>, Error> {
        self.collection
            .find_one(filter)
            .projection(doc! { "_id": 0 })
            .await?
            .map(Category::try_from)
            .transpose()
    }

    async fn update_one(
        &self,
        filter: Document,
        update: impl Into<UpdateModifications>,
    ) -> Result<UpdateOutcome, Error> {
        let result = self.collection.update_one(filter, update).await?;

        Ok(result.into())
    }
}

impl From<UpdateResult> for UpdateOutcome {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        }
    }
}

impl CategoryStore for MongoCategoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, Error> {
        self.find_one(doc! { "category": name }).await
    }

    async fn find_by_id(&self, category_id: &str) -> Result<Option<Category>, Error> {
        self.find_one(doc! { "category_id": category_id }).await
    }

    async fn list_all(&self) -> Result<Vec<Category>, Error> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .await?;

        let mut categories = Vec::new();
        while cursor.advance().await? {
            categories.push(Category::try_from(cursor.deserialize_current()?)?);
        }

        Ok(categories)
    }

    async fn insert(&self, category: &Category) -> Result<(), Error> {
        match self
            .collection
            .insert_one(CategoryDocument::from(category))
            .await
        {
            Ok(_) => Ok(()),
            Err(error) if is_duplicate_key(&error) => {
                Err(Error::DuplicateCategory(category.category.clone()))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn set_sub_categories(
        &self,
        name: &str,
        sub_categories: &[String],
    ) -> Result<UpdateOutcome, Error> {
        self.update_one(
            doc! { "category": name },
            doc! { "$set": { "sub_category": sub_categories.to_vec() } },
        )
        .await
    }

    async fn rename(&self, name: &str, new_name: &str) -> Result<UpdateOutcome, Error> {
        match self
            .collection
            .update_one(
                doc! { "category": name },
                doc! { "$set": { "category": new_name } },
            )
            .await
        {
            Ok(result) => Ok(result.into()),
            Err(error) if is_duplicate_key(&error) => {
                Err(Error::DuplicateCategory(new_name.to_owned()))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn push_sub_category(
        &self,
        name: &str,
        sub_category: &str,
    ) -> Result<UpdateOutcome, Error> {
        self.update_one(doc! { "category": name }, push_pipeline(sub_category))
            .await
    }

    async fn pull_sub_category(
        &self,
        name: &str,
        sub_category: &str,
    ) -> Result<UpdateOutcome, Error> {
        let outcome = self
            .update_one(
                pull_filter(name),
                doc! { "$pull": { "sub_category": sub_category } },
            )
            .await?;

        if outcome.matched_count > 0 || self.find_by_name(name).await?.is_none() {
            return Ok(outcome);
        }

        // The category exists without a list, so there was nothing to pull.
        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: 0,
        })
    }

    async fn replace_sub_category(
        &self,
        name: &str,
        old: &str,
        new: &str,
    ) -> Result<UpdateOutcome, Error> {
        self.update_one(
            doc! { "category": name, "sub_category": old },
            doc! { "$set": { "sub_category.$": new } },
        )
        .await
    }

    async fn delete(&self, name: &str) -> Result<u64, Error> {
        let result = self.collection.delete_one(doc! { "category": name }).await?;

        Ok(result.deleted_count)
    }
}

/// An update pipeline that appends `sub_category`, creating the list when the
/// field is absent or null.
///
/// `$push` rejects documents holding `sub_category: null`.
fn push_pipeline(sub_category: &str) -> Vec<Document> {
    vec![doc! {
        "$set": {
            "sub_category": {
                "$concatArrays": [
                    { "$ifNull": ["$sub_category", []] },
                    [{ "$literal": sub_category }],
                ]
            }
        }
    }]
}

/// Match the category `name` only if it holds a list, since `$pull` fails on
/// a null field.
fn pull_filter(name: &str) -> Document {
    doc! { "category": name, "sub_category": { "$type": "array" } }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

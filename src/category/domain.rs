//! The category document and the request bodies used to create and edit it.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A top-level category with an ordered list of subcategory names, e.g.,
/// 'Home & Accessories' with the subcategories 'Bedding' and 'Lighting'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The normalized display name, unique across all categories.
    ///
    /// This is the key used to look up a category in the API routes.
    pub category: String,

    /// A generated identifier of the form `home_&_accessories123`.
    ///
    /// Documents created before IDs were introduced do not have one.
    #[serde(default)]
    pub category_id: Option<String>,

    /// The normalized subcategory names in insertion order.
    ///
    /// Duplicates are allowed. `None` if no subcategories were given when the
    /// category was created.
    #[serde(default)]
    pub sub_category: Option<Vec<String>>,

    /// When the category was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The body of a request to create a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCategoryData {
    /// The name of the new category. Required.
    pub category: Option<String>,
    /// The initial subcategories.
    pub sub_category: Option<Vec<String>>,
}

/// The body of a request to replace a category's subcategories and
/// optionally rename it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryData {
    /// The new name of the category.
    pub category: Option<String>,
    /// The new subcategories. Required.
    pub sub_category: Option<Vec<String>>,
}

/// Create a `category_id` from a normalized category name.
///
/// The ID is the lower-cased name with spaces replaced by underscores,
/// followed by a random three digit number. IDs are not checked for
/// uniqueness.
pub fn generate_category_id(name: &str) -> String {
    let suffix: u16 = rand::random_range(100..1000);

    format!("{}{suffix}", name.to_lowercase().replace(' ', "_"))
}

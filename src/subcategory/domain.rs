//! The request bodies used to edit the subcategories of a category.

use serde::{Deserialize, Serialize};

/// A body holding a single subcategory name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubCategoryData {
    /// The subcategory to add, or the new value of an existing subcategory.
    pub sub_category: Option<String>,
}

/// A body holding a list of subcategory names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubCategoryListData {
    /// The subcategories to remove.
    pub sub_category: Option<Vec<String>>,
}

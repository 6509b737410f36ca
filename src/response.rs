//! The JSON bodies returned by the API.
//!
//! Every body carries a human readable `message` and a `status` flag that is
//! `true` on success and `false` on failure.

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A body with only a message and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// A human readable description of the outcome.
    pub message: String,
    /// Whether the request succeeded.
    pub status: bool,
}

impl MessageResponse {
    /// A successful response with `message`.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: true,
        }
    }

    /// A failed response with `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: false,
        }
    }
}

/// The body returned after creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// A human readable description of the outcome.
    pub message: String,
    /// Whether the request succeeded.
    pub status: bool,
    /// The generated `category_id` of the new category.
    pub created_id: String,
}

/// The body returned when listing categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    /// A human readable description of the outcome.
    pub message: String,
    /// Whether the request succeeded.
    pub status: bool,
    /// The number of categories in `data`.
    pub count: usize,
    /// Every stored category in insertion order.
    pub data: Vec<Category>,
}

/// The body returned for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataResponse {
    /// A human readable description of the outcome.
    pub message: String,
    /// Whether the request succeeded.
    pub status: bool,
    /// The requested category.
    pub data: Category,
}

/// The body returned by a batch subcategory removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// A human readable description of the outcome.
    pub message: String,
    /// Whether the request succeeded.
    pub status: bool,
    /// The entries that were removed.
    pub success: Vec<String>,
    /// The entries that were not present in the category.
    pub failure: Vec<String>,
}

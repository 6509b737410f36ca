//! Defines the category store trait.

use std::future::Future;

use crate::{Error, category::Category};

/// The result of an update against a single category document.
///
/// `matched_count` is zero when no document matched the filter, i.e., the
/// category (or the subcategory entry the update targets) does not exist.
/// `modified_count` is zero when a document matched but the update did not
/// change it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The number of documents that matched the update's filter.
    pub matched_count: u64,
    /// The number of documents that were changed.
    pub modified_count: u64,
}

/// Creates, retrieves, updates and deletes category documents.
///
/// Categories are keyed by their normalized name. Callers are responsible for
/// normalizing names and subcategory values before calling the store.
pub trait CategoryStore: Clone + Send + Sync + 'static {
    /// Get the category named `name`, if any.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Category>, Error>> + Send;

    /// Get the category with the generated ID `category_id`, if any.
    fn find_by_id(
        &self,
        category_id: &str,
    ) -> impl Future<Output = Result<Option<Category>, Error>> + Send;

    /// Get all categories in insertion order.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Category>, Error>> + Send;

    /// Add a new category.
    ///
    /// # Errors
    /// Returns [Error::DuplicateCategory] if a category with the same name
    /// already exists.
    fn insert(&self, category: &Category) -> impl Future<Output = Result<(), Error>> + Send;

    /// Replace the subcategories of the category named `name`.
    fn set_sub_categories(
        &self,
        name: &str,
        sub_categories: &[String],
    ) -> impl Future<Output = Result<UpdateOutcome, Error>> + Send;

    /// Change the name of the category named `name` to `new_name`.
    ///
    /// # Errors
    /// Returns [Error::DuplicateCategory] if `new_name` is already taken.
    fn rename(
        &self,
        name: &str,
        new_name: &str,
    ) -> impl Future<Output = Result<UpdateOutcome, Error>> + Send;

    /// Append `sub_category` to the subcategories of the category named `name`.
    ///
    /// A category with no list, or a null one, gets a new list holding only
    /// `sub_category`.
    fn push_sub_category(
        &self,
        name: &str,
        sub_category: &str,
    ) -> impl Future<Output = Result<UpdateOutcome, Error>> + Send;

    /// Remove every entry equal to `sub_category` from the subcategories of
    /// the category named `name`.
    ///
    /// A category with no list, or a null one, is matched but not modified.
    fn pull_sub_category(
        &self,
        name: &str,
        sub_category: &str,
    ) -> impl Future<Output = Result<UpdateOutcome, Error>> + Send;

    /// Replace the first entry equal to `old` with `new` in the category named
    /// `name`.
    ///
    /// Only categories that contain `old` match.
    fn replace_sub_category(
        &self,
        name: &str,
        old: &str,
        new: &str,
    ) -> impl Future<Output = Result<UpdateOutcome, Error>> + Send;

    /// Delete the category named `name` and return the number of deleted
    /// categories.
    fn delete(&self, name: &str) -> impl Future<Output = Result<u64, Error>> + Send;
}

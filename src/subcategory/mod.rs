//! Endpoints for editing the subcategories nested inside a category.
//!
//! A subcategory is a plain string in the category's `sub_category` list, not
//! a document of its own.

mod add;
mod domain;
mod edit;
mod remove;

pub use add::add_sub_category_endpoint;
pub use domain::{SubCategoryData, SubCategoryListData};
pub use edit::{delete_sub_category_endpoint, update_sub_category_endpoint};
pub use remove::remove_sub_categories_endpoint;

//! Category documents and the endpoints for creating, listing, getting,
//! updating and deleting them.

mod create;
mod delete;
mod domain;
mod edit;
mod get;

pub use create::create_category_endpoint;
pub use delete::delete_category_endpoint;
pub use domain::{Category, NewCategoryData, UpdateCategoryData, generate_category_id};
pub use edit::update_category_endpoint;
pub use get::{get_category_by_id_endpoint, get_category_endpoint, list_categories_endpoint};

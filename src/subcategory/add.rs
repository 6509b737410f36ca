//! Endpoint for appending a subcategory to a category.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    normalize::normalize,
    payload::{Payload, require_text},
    response::MessageResponse,
    stores::CategoryStore,
    subcategory::SubCategoryData,
};

/// A route handler for appending one subcategory to the category `name`.
///
/// `sub_category` must be a single string. Duplicates are not rejected.
/// Responds with 404 if the category does not exist.
pub async fn add_sub_category_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
    Payload(data): Payload<SubCategoryData>,
) -> Result<Json<MessageResponse>, Error>
where
    S: CategoryStore,
{
    let sub_category = normalize(&require_text("sub_category", data.sub_category.as_deref())?);
    if sub_category.is_empty() {
        return Err(Error::MissingPayload("sub_category".to_owned()));
    }

    let name = normalize(&name);

    let outcome = state
        .category_store
        .push_sub_category(&name, &sub_category)
        .await?;

    if outcome.matched_count == 0 {
        return Err(Error::CategoryNotFound(name));
    }

    tracing::info!("Added subcategory \"{sub_category}\" to \"{name}\"");

    Ok(Json(MessageResponse::success(format!(
        "Subcategory \"{sub_category}\" added to \"{name}\""
    ))))
}

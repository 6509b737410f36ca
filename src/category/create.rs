//! Category creation endpoint.

use axum::{Json, extract::State, http::StatusCode};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    category::{Category, NewCategoryData, generate_category_id},
    normalize::normalize,
    payload::{Payload, require_text},
    response::CreatedResponse,
    stores::CategoryStore,
};

/// A route handler for creating a new category.
///
/// The name is normalized before it is checked for duplicates and stored.
/// Responds with 400 if the name is missing, 409 if a category with the same
/// normalized name exists, and 201 with the generated `category_id` on success.
pub async fn create_category_endpoint<S>(
    State(state): State<AppState<S>>,
    Payload(new_category): Payload<NewCategoryData>,
) -> Result<(StatusCode, Json<CreatedResponse>), Error>
where
    S: CategoryStore,
{
    let raw_name = require_text("category", new_category.category.as_deref())?;
    let name = normalize(&raw_name);
    if name.is_empty() {
        return Err(Error::MissingPayload("category".to_owned()));
    }

    let store = &state.category_store;

    if store.find_by_name(&name).await?.is_some() {
        return Err(Error::DuplicateCategory(name));
    }

    let category = Category {
        category_id: Some(generate_category_id(&name)),
        sub_category: new_category
            .sub_category
            .map(|entries| entries.iter().map(|entry| normalize(entry)).collect()),
        created_at: OffsetDateTime::now_utc(),
        category: name,
    };

    // A concurrent create that passed the check above is rejected by the
    // store's unique constraint.
    store.insert(&category).await?;

    let created_id = category.category_id.unwrap_or_default();
    tracing::info!("Created category \"{}\" ({created_id})", category.category);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: format!("Category \"{}\" created", category.category),
            status: true,
            created_id,
        }),
    ))
}

//! Category deletion endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error, normalize::normalize, response::MessageResponse, stores::CategoryStore,
};

/// A route handler for deleting a category by name.
///
/// Responds with 404 if no category has the normalized name.
pub async fn delete_category_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, Error>
where
    S: CategoryStore,
{
    let name = normalize(&name);

    if state.category_store.delete(&name).await? == 0 {
        return Err(Error::CategoryNotFound(name));
    }

    tracing::info!("Deleted category \"{name}\"");

    Ok(Json(MessageResponse::success(format!(
        "Category \"{name}\" deleted"
    ))))
}

//! Category update endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    category::UpdateCategoryData,
    normalize::normalize,
    payload::Payload,
    response::MessageResponse,
    stores::CategoryStore,
};

/// A route handler for replacing a category's subcategories and optionally
/// renaming it.
///
/// The subcategories are replaced first and a missing category is reported
/// with 404. The rename is applied afterwards as a separate update, and if it
/// fails because the category vanished in between or the new name is already
/// taken, the failure is only logged and the response is still 200.
pub async fn update_category_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
    Payload(update): Payload<UpdateCategoryData>,
) -> Result<Json<MessageResponse>, Error>
where
    S: CategoryStore,
{
    let sub_categories: Vec<String> = update
        .sub_category
        .ok_or_else(|| Error::MissingPayload("sub_category".to_owned()))?
        .iter()
        .map(|entry| normalize(entry))
        .collect();

    let name = normalize(&name);
    let store = &state.category_store;

    let outcome = store.set_sub_categories(&name, &sub_categories).await?;
    if outcome.matched_count == 0 {
        return Err(Error::CategoryNotFound(name));
    }

    let new_name = update
        .category
        .as_deref()
        .map(normalize)
        .filter(|new_name| !new_name.is_empty() && *new_name != name);

    let Some(new_name) = new_name else {
        tracing::info!("Updated subcategories of \"{name}\"");
        return Ok(Json(MessageResponse::success(format!(
            "Category \"{name}\" updated"
        ))));
    };

    match store.rename(&name, &new_name).await {
        Ok(outcome) if outcome.matched_count == 0 => {
            tracing::warn!("Could not rename \"{name}\" to \"{new_name}\": category not found");
        }
        Ok(_) => {
            tracing::info!("Renamed category \"{name}\" to \"{new_name}\"");
        }
        Err(Error::DuplicateCategory(taken)) => {
            tracing::warn!("Could not rename \"{name}\" to \"{taken}\": name already taken");
        }
        Err(error) => return Err(error),
    }

    Ok(Json(MessageResponse::success(format!(
        "Category \"{name}\" updated"
    ))))
}

//! Endpoint for removing a batch of subcategories from a category.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    normalize::normalize,
    payload::Payload,
    response::BatchResponse,
    stores::CategoryStore,
    subcategory::SubCategoryListData,
};

/// A route handler for removing each subcategory in the request from the
/// category `name`.
///
/// The category is checked once up front and a missing category is reported
/// with 404. Each entry is then removed with its own update and every entry
/// is processed, so one missing entry does not stop the rest. Entries that
/// were removed are not restored if others fail.
///
/// Responds with 200 if every entry was removed, otherwise 207 with the
/// removed entries in `success` and the missing ones in `failure`.
pub async fn remove_sub_categories_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
    Payload(data): Payload<SubCategoryListData>,
) -> Result<Json<BatchResponse>, Error>
where
    S: CategoryStore,
{
    let entries = data
        .sub_category
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| Error::MissingPayload("sub_category".to_owned()))?;

    let name = normalize(&name);
    let store = &state.category_store;

    if store.find_by_name(&name).await?.is_none() {
        return Err(Error::CategoryNotFound(name));
    }

    let mut success = Vec::new();
    let mut failure = Vec::new();

    for entry in entries {
        let sub_category = normalize(&entry);
        let outcome = store.pull_sub_category(&name, &sub_category).await?;

        if outcome.modified_count > 0 {
            success.push(sub_category);
        } else {
            tracing::warn!("Subcategory \"{sub_category}\" is not in \"{name}\"");
            failure.push(sub_category);
        }
    }

    if !failure.is_empty() {
        return Err(Error::PartialFailure { success, failure });
    }

    tracing::info!("Removed subcategories {success:?} from \"{name}\"");

    Ok(Json(BatchResponse {
        message: format!("Subcategories removed from \"{name}\""),
        status: true,
        success,
        failure,
    }))
}

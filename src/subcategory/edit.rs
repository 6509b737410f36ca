//! Endpoints for changing or removing a single subcategory.

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

/// A route handler for replacing the subcategory `sub_name` of the category
/// `name` with the `sub_category` in the request body.
///
/// Only the first matching entry is replaced.
pub async fn update_sub_category_endpoint<S>(
    State(state): State<AppState<S>>,
    Path((name, sub_name)): Path<(String, String)>,
    Payload(data): Payload<SubCategoryData>,
) -> Result<Json<MessageResponse>, Error>
where
    S: CategoryStore,
{
    let new_sub_category =
        normalize(&require_text("sub_category", data.sub_category.as_deref())?);
    if new_sub_category.is_empty() {
        return Err(Error::MissingPayload("sub_category".to_owned()));
    }

    let name = normalize(&name);
    let sub_name = normalize(&sub_name);
    let store = &state.category_store;

    let outcome = store
        .replace_sub_category(&name, &sub_name, &new_sub_category)
        .await?;

    if outcome.matched_count == 0 {
        return Err(not_found(store, name, sub_name).await?);
    }

    tracing::info!("Replaced subcategory \"{sub_name}\" of \"{name}\" with \"{new_sub_category}\"");

    Ok(Json(MessageResponse::success(format!(
        "Subcategory \"{sub_name}\" of \"{name}\" updated"
    ))))
}

/// A route handler for removing every entry equal to `sub_name` from the
/// category `name`.
pub async fn delete_sub_category_endpoint<S>(
    State(state): State<AppState<S>>,
    Path((name, sub_name)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, Error>
where
    S: CategoryStore,
{
    let name = normalize(&name);
    let sub_name = normalize(&sub_name);

    let outcome = state
        .category_store
        .pull_sub_category(&name, &sub_name)
        .await?;

    if outcome.matched_count == 0 {
        return Err(Error::CategoryNotFound(name));
    }

    if outcome.modified_count == 0 {
        return Err(Error::SubcategoryNotFound {
            category: name,
            sub_category: sub_name,
        });
    }

    tracing::info!("Removed subcategory \"{sub_name}\" from \"{name}\"");

    Ok(Json(MessageResponse::success(format!(
        "Subcategory \"{sub_name}\" removed from \"{name}\""
    ))))
}

/// Work out whether the category or only the entry is missing.
async fn not_found<S>(store: &S, name: String, sub_name: String) -> Result<Error, Error>
where
    S: CategoryStore,
{
    if store.find_by_name(&name).await?.is_none() {
        return Ok(Error::CategoryNotFound(name));
    }

    Ok(Error::SubcategoryNotFound {
        category: name,
        sub_category: sub_name,
    })
}


#[cfg(test)]
mod delete_sub_category_endpoint_tests {
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        stores::CategoryStore,
        test_utils::{assert_error_body, get_test_server},
    };

    #[tokio::test]
    async fn removes_every_equal_entry() {
        let (server, store) = get_test_server();
        server
            .post(endpoints::CATEGORIES)
            .json(&json!({"category": "fashion", "sub_category": ["shoes", "bags", "shoes"]}))
            .await;

        server
            .delete(&format_endpoint(endpoints::SUB_CATEGORY, &["fashion", "shoes"]))
            .await
            .assert_status_ok();

        let stored = store.find_by_name("Fashion").await.unwrap().unwrap();
        assert_eq!(stored.sub_category, Some(vec!["Bags".to_owned()]));
    }

    #[tokio::test]
    async fn delete_missing_entry_is_not_found() {
        let (server, _) = get_test_server();
        server
            .post(endpoints::CATEGORIES)
            .json(&json!({"category": "fashion", "sub_category": ["shoes"]}))
            .await;

        let response = server
            .delete(&format_endpoint(endpoints::SUB_CATEGORY, &["fashion", "hats"]))
            .await;

        response.assert_status_not_found();
        assert_error_body(&response);
    }

    #[tokio::test]
    async fn delete_in_missing_category_is_not_found() {
        let (server, _) = get_test_server();

        let response = server
            .delete(&format_endpoint(endpoints::SUB_CATEGORY, &["fashion", "hats"]))
            .await;

        response.assert_status_not_found();
        assert_error_body(&response);
    }
}

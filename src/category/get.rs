//! Endpoints for listing categories and getting a single category.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    normalize::normalize,
    response::{DataResponse, ListResponse},
    stores::CategoryStore,
};

/// A route handler for listing every category in insertion order.
pub async fn list_categories_endpoint<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<ListResponse>, Error>
where
    S: CategoryStore,
{
    let categories = state.category_store.list_all().await?;

    Ok(Json(ListResponse {
        message: "Categories retrieved".to_owned(),
        status: true,
        count: categories.len(),
        data: categories,
    }))
}

/// A route handler for getting a category by name.
///
/// `name` is normalized, so `home_&_accessories` finds 'Home & Accessories'.
/// Responds with 404 if no category has that name.
pub async fn get_category_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<DataResponse>, Error>
where
    S: CategoryStore,
{
    let name = normalize(&name);

    let category = state
        .category_store
        .find_by_name(&name)
        .await?
        .ok_or(Error::CategoryNotFound(name))?;

    Ok(Json(DataResponse {
        message: "Category retrieved".to_owned(),
        status: true,
        data: category,
    }))
}

/// A route handler for getting a category by its generated `category_id`.
///
/// The ID is matched exactly. Responds with 404 if no category has that ID.
pub async fn get_category_by_id_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(category_id): Path<String>,
) -> Result<Json<DataResponse>, Error>
where
    S: CategoryStore,
{
    let category = state
        .category_store
        .find_by_id(&category_id)
        .await?
        .ok_or(Error::CategoryNotFound(category_id))?;

    Ok(Json(DataResponse {
        message: "Category retrieved".to_owned(),
        status: true,
        data: category,
    }))
}


#[cfg(test)]
mod get_category_endpoint_tests {
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        response::{CreatedResponse, DataResponse},
        test_utils::{assert_error_body, get_test_server},
    };

    #[tokio::test]
    async fn created_category_can_be_fetched_by_path_key() {
        let (server, _) = get_test_server();
        server
            .post(endpoints::CATEGORIES)
            .json(&json!({"category": "home & accessories"}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let response = server
            .get(&format_endpoint(endpoints::CATEGORY, &["home_&_accessories"]))
            .await;

        response.assert_status_ok();
        let body = response.json::<DataResponse>();
        assert!(body.status);
        assert_eq!(body.data.category, "Home & Accessories");
    }

    #[tokio::test]
    async fn get_missing_category_is_not_found() {
        let (server, _) = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::CATEGORY, &["fashion"]))
            .await;

        response.assert_status_not_found();
        assert_error_body(&response);
    }

    #[tokio::test]
    async fn created_category_can_be_fetched_by_id() {
        let (server, _) = get_test_server();
        let created = server
            .post(endpoints::CATEGORIES)
            .json(&json!({"category": "fashion", "sub_category": ["shoes"]}))
            .await
            .json::<CreatedResponse>();

        let response = server
            .get(&format_endpoint(endpoints::CATEGORY_BY_ID, &[&created.created_id]))
            .await;

        response.assert_status_ok();
        let body = response.json::<DataResponse>();
        assert_eq!(body.data.category, "Fashion");
        assert_eq!(body.data.category_id, Some(created.created_id));
        assert_eq!(body.data.sub_category, Some(vec!["Shoes".to_owned()]));
    }

    #[tokio::test]
    async fn get_missing_id_is_not_found() {
        let (server, _) = get_test_server();

        server
            .get(&format_endpoint(endpoints::CATEGORY_BY_ID, &["fashion123"]))
            .await
            .assert_status_not_found();
    }
}

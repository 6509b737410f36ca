//! Application router configuration.

use axum::{
    Json, Router,
    http::{Method, StatusCode, Uri},
    middleware,
    routing::{get, post, put},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_category_by_id_endpoint,
        get_category_endpoint, list_categories_endpoint, update_category_endpoint,
    },
    endpoints,
    logging::logging_middleware,
    response::MessageResponse,
    stores::CategoryStore,
    subcategory::{
        add_sub_category_endpoint, delete_sub_category_endpoint, remove_sub_categories_endpoint,
        update_sub_category_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: CategoryStore,
{
    Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint::<S>).post(create_category_endpoint::<S>),
        )
        .route(
            endpoints::CATEGORY_BY_ID,
            get(get_category_by_id_endpoint::<S>),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint::<S>)
                .put(update_category_endpoint::<S>)
                .delete(delete_category_endpoint::<S>),
        )
        .route(
            endpoints::SUB_CATEGORIES,
            post(add_sub_category_endpoint::<S>)
                .delete(remove_sub_categories_endpoint::<S>),
        )
        .route(
            endpoints::SUB_CATEGORY,
            put(update_sub_category_endpoint::<S>)
                .delete(delete_sub_category_endpoint::<S>),
        )
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_index() -> Json<Value> {
    Json(json!({ "message": "CRUD APIs for tencowry categories" }))
}

async fn get_404_not_found(uri: Uri) -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::failure(format!("No route for {}", uri.path()))),
    )
}

async fn get_405_method_not_allowed(
    method: Method,
    uri: Uri,
) -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MessageResponse::failure(format!(
            "{method} is not allowed for {}",
            uri.path()
        ))),
    )
}

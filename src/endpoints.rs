//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/categories/{name}', use [format_endpoint].

/// The root route which describes the API.
pub const ROOT: &str = "/";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/categories";
/// The route to get, update and delete a single category by name.
pub const CATEGORY: &str = "/categories/{name}";
/// The route to get a single category by its generated ID.
pub const CATEGORY_BY_ID: &str = "/category-ids/{category_id}";
/// The route to add one subcategory or remove a batch of subcategories.
pub const SUB_CATEGORIES: &str = "/categories/{name}/sub";
/// The route to replace or remove a single subcategory.
pub const SUB_CATEGORY: &str = "/categories/{name}/sub/{sub_name}";

/// Replace the parameters in `endpoint_path` with `values`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/categories/{name}', '{name}' is the parameter.
///
/// Parameters without a matching value, and values without a matching
/// parameter, are left as is.
pub fn format_endpoint(endpoint_path: &str, values: &[&str]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut values = values.iter();
    let mut rest = endpoint_path;

    while let Some(param_start) = rest.find('{') {
        let Some(param_length) = rest[param_start..].find('}') else {
            break;
        };
        let Some(value) = values.next() else {
            break;
        };

        formatted.push_str(&rest[..param_start]);
        formatted.push_str(value);
        rest = &rest[param_start + param_length + 1..];
    }

    formatted.push_str(rest);
    formatted
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES);
        assert_endpoint_is_valid_uri(endpoints::CATEGORY);
        assert_endpoint_is_valid_uri(endpoints::CATEGORY_BY_ID);
        assert_endpoint_is_valid_uri(endpoints::SUB_CATEGORIES);
        assert_endpoint_is_valid_uri(endpoints::SUB_CATEGORY);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::CATEGORY, &["home_&_accessories"]);

        assert_eq!(formatted_path, "/categories/home_&_accessories");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn replaces_parameters_in_order() {
        let formatted_path = format_endpoint(endpoints::SUB_CATEGORY, &["fashion", "shoes"]);

        assert_eq!(formatted_path, "/categories/fashion/sub/shoes");
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", &["1"]);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn leaves_parameters_without_values() {
        let formatted_path = format_endpoint(endpoints::SUB_CATEGORY, &["fashion"]);

        assert_eq!(formatted_path, "/categories/fashion/sub/{sub_name}");
    }
}

//! The URIs the app serves.
//!
//! For endpoints that take a parameter, e.g., '/delete/{transaction_id}', use [format_endpoint].

/// The log-in page, also the target of the log-in form.
pub const ROOT: &str = "/";
/// The registration page, also the target of the registration form.
pub const REGISTER: &str = "/register";
/// The summary of the user's income and expenses.
pub const HOME: &str = "/home";
/// The page listing the user's transactions and the form for adding new ones.
pub const DASHBOARD: &str = "/dashboard";
/// The route for deleting one of the user's transactions.
pub const DELETE_TRANSACTION: &str = "/delete/{transaction_id}";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/logout";
/// The route for downloading the user's transactions as a PDF.
pub const EXPORT: &str = "/exportar";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with a right brace,
/// e.g. '{transaction_id}' in '/delete/{transaction_id}'.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    #[track_caller]
    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::REGISTER);
        assert_endpoint_is_valid_uri(endpoints::HOME);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::DELETE_TRANSACTION, 1));
        assert_endpoint_is_valid_uri(endpoints::LOG_OUT);
        assert_endpoint_is_valid_uri(endpoints::EXPORT);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
    }

    #[test]
    fn replaces_parameter() {
        assert_eq!(
            format_endpoint(endpoints::DELETE_TRANSACTION, 42),
            "/delete/42"
        );
        assert_eq!(format_endpoint("/hello/{world}/bye", 1), "/hello/1/bye");
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        assert_eq!(format_endpoint("/hello/world", 1), "/hello/world");
    }
}

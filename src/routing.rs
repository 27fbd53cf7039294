//! Application router configuration with protected and unprotected route definitions.

use axum::{Router, middleware, routing::get};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        auth_guard, auth_guard_with_notice, get_log_in_page, get_log_out, get_register_page,
        post_log_in, register_user,
    },
    endpoints,
    home::get_home_page,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    report::export_transactions,
    transaction::{create_transaction_endpoint, delete_transaction_endpoint, get_dashboard_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_log_in_page).post(post_log_in))
        .route(
            endpoints::REGISTER,
            get(get_register_page).post(register_user),
        )
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::HOME, get(get_home_page))
        .route(
            endpoints::DASHBOARD,
            get(get_dashboard_page).post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            get(delete_transaction_endpoint),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // Visitors following an export link without a session are told why they ended up on the log-in page.
    let export_routes = Router::new()
        .route(endpoints::EXPORT, get(export_transactions))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_guard_with_notice,
        ));

    protected_routes
        .merge(export_routes)
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

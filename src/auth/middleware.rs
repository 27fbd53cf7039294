//! Authentication middleware that checks the session cookie and handles redirects.

use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{
    AppState,
    auth::cookie::get_username_from_session,
    endpoints,
    flash::{Flash, set_flash},
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

pub(crate) const EXPORT_REQUIRES_LOG_IN_MSG: &str = "You must log in to export your transactions";

/// Checks for a valid session cookie.
///
/// The username is placed into the request and the request executed normally
/// if the cookie is valid, otherwise the response from `get_redirect` is returned.
#[inline]
async fn auth_guard_internal(
    state: AuthState,
    request: Request,
    next: Next,
    get_redirect: impl Fn(PrivateCookieJar) -> Response,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let jar = PrivateCookieJar::from_headers(&parts.headers, state.cookie_key);

    let Some(username) = get_username_from_session(&jar) else {
        tracing::debug!("No valid session for {}. Redirecting to log in page.", parts.uri);
        return get_redirect(jar);
    };

    parts.extensions.insert(username);
    let request = Request::from_parts(parts, body);

    next.run(request).await
}

/// Middleware function that checks for a valid session cookie.
/// The username is placed into the request and the request executed normally if the cookie is valid, otherwise a redirect to the log-in page is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(username): Extension<Username>` to receive the username.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, request, next, |_| {
        Redirect::to(endpoints::ROOT).into_response()
    })
    .await
}

/// Same as [auth_guard], but leaves a message on the log-in page explaining
/// that an export needs a logged in user.
pub async fn auth_guard_with_notice(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, request, next, |jar| {
        let jar = set_flash(jar, Flash::error(EXPORT_REQUIRES_LOG_IN_MSG));

        (jar, Redirect::to(endpoints::ROOT)).into_response()
    })
    .await
}

//! Defines functions for tracking the logged in user with an encrypted session cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, user::Username};

pub(crate) const COOKIE_SESSION: &str = "session";

/// The contents of the session cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    username: Username,
}

/// Add a session cookie to the cookie jar, indicating that `username` is logged in.
///
/// The cookie has no expiry so it lasts until the browser session ends.
///
/// # Errors
///
/// Returns an [Error::SessionError] if the session cannot be serialized.
pub(crate) fn set_session_cookie(
    jar: PrivateCookieJar,
    username: &Username,
) -> Result<PrivateCookieJar, Error> {
    let session = Session {
        username: username.clone(),
    };
    let value =
        serde_json::to_string(&session).map_err(|error| Error::SessionError(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((COOKIE_SESSION, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Set the session cookie to an invalid value and set its max age to zero,
/// which should delete the cookie on the client side.
pub(crate) fn invalidate_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION, "deleted"))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Get the logged in user from the session cookie.
///
/// Returns `None` if the cookie is missing, could not be decrypted or does
/// not hold a session.
pub(crate) fn get_username_from_session(jar: &PrivateCookieJar) -> Option<Username> {
    let cookie = jar.get(COOKIE_SESSION)?;

    serde_json::from_str::<Session>(cookie.value())
        .map(|session| session.username)
        .ok()
}

//! One-shot messages that survive a redirect.
//!
//! A handler that redirects can leave a [Flash] in an encrypted cookie. The
//! next page that renders takes the message out of the cookie jar, shows it
//! once and removes the cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

pub(crate) const COOKIE_FLASH: &str = "flash";

/// How a flash message should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashLevel {
    Success,
    Info,
    Error,
}

/// A message to show on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: &str) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.to_owned(),
        }
    }

    pub fn info(message: &str) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.to_owned(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.to_owned(),
        }
    }
}

/// Store `flash` in the cookie jar, replacing any message already there.
///
/// If the message cannot be serialized the jar is returned unchanged and the
/// error is logged, losing the message is preferable to failing the request.
pub fn set_flash(jar: PrivateCookieJar, flash: Flash) -> PrivateCookieJar {
    match serde_json::to_string(&flash) {
        Ok(value) => jar.add(
            Cookie::build((COOKIE_FLASH, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Strict)
                .secure(true),
        ),
        Err(error) => {
            tracing::error!("Could not serialize flash message {flash:?}: {error}");
            jar
        }
    }
}

/// Take the pending flash message out of the cookie jar.
///
/// The returned jar removes the flash cookie on the client, so the message
/// is only shown once. A cookie that does not decode is dropped.
pub fn take_flash(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(COOKIE_FLASH) else {
        return (jar, None);
    };

    let flash = serde_json::from_str(cookie.value())
        .inspect_err(|error| tracing::warn!("Discarding malformed flash cookie: {error}"))
        .ok();

    (jar.remove(Cookie::build(COOKIE_FLASH).path("/")), flash)
}

pub fn flash_view(flash: &Flash) -> Markup {
    let style = match flash.level {
        FlashLevel::Success => {
            "text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        }
        FlashLevel::Info => {
            "text-blue-800 bg-blue-50 border-blue-300 \
            dark:bg-gray-800 dark:text-blue-400 dark:border-blue-800"
        }
        FlashLevel::Error => {
            "text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        }
    };

    html!(
        div
            id="flash"
            role="alert"
            class={"w-full p-4 text-sm rounded-lg border " (style)}
        {
            (flash.message)
        }
    )
}

//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The cookie module handles the lower level session cookie logic.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, CredentialStore,
    auth::cookie::{invalidate_session_cookie, set_session_cookie},
    endpoints,
    flash::{flash_view, take_flash},
    html::{
        BUTTON_PRIMARY_STYLE, LINK_STYLE, base, log_in_register, password_input, username_input,
    },
    user::Username,
};

fn log_in_form(username: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::ROOT)
            class="space-y-4 md:space-y-6"
        {
            (username_input(username))
            (password_input(error_message))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                "Log in"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Don't have an account? "
                a href=(endpoints::REGISTER) tabindex="0" class=(LINK_STYLE)
                {
                  "Register here"
                }
            }
        }
    }
}

fn log_in_page(username: &str, error_message: Option<&str>, alert: Option<Markup>) -> Markup {
    let log_in_form = log_in_form(username, error_message);
    let content = log_in_register("Log in to your account", alert, &log_in_form);

    base("Log In", &[], &content)
}

/// Display the log-in page along with any message left by the previous request.
pub async fn get_log_in_page(jar: PrivateCookieJar) -> Response {
    let (jar, flash) = take_flash(jar);
    let alert = flash.as_ref().map(flash_view);

    (jar, log_in_page("", None, alert)).into_response()
}

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The registered usernames and passwords.
    pub credential_store: CredentialStore,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            credential_store: state.credential_store.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect username or password.";
const INTERNAL_ERROR_MSG: &str = "An internal error occurred. Please try again later.";

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the session cookie is set and the client is redirected to the dashboard page.
/// Otherwise, the log-in page is returned with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let is_authenticated = match state
        .credential_store
        .authenticate(&user_data.username, &user_data.password)
    {
        Ok(is_authenticated) => is_authenticated,
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            return log_in_page(&user_data.username, Some(INTERNAL_ERROR_MSG), None)
                .into_response();
        }
    };

    if !is_authenticated {
        tracing::info!("Failed log-in attempt for {:?}", user_data.username);
        return log_in_page(
            &user_data.username,
            Some(INVALID_CREDENTIALS_ERROR_MSG),
            None,
        )
        .into_response();
    }

    let username = Username::new(user_data.username);

    match set_session_cookie(jar.clone(), &username) {
        Ok(updated_jar) => (updated_jar, Redirect::to(endpoints::DASHBOARD)).into_response(),
        Err(error) => {
            tracing::error!("Error setting session cookie: {error}");
            (
                invalidate_session_cookie(jar),
                Redirect::to(endpoints::INTERNAL_ERROR_VIEW),
            )
                .into_response()
        }
    }
}

/// The raw data entered by the user in the log-in form.
///
/// The password is stored as a plain string, it is compared as-is against the credential file.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// Username entered during log-in.
    pub username: String,
    /// Password entered during log-in.
    pub password: String,
}


#[cfg(test)]
mod log_in_tests {
    use axum::{
        extract::State,
        http::{StatusCode, header::SET_COOKIE},
    };
    use axum_extra::extract::{Form, PrivateCookieJar};
    use tempfile::TempDir;

    use crate::{
        CredentialStore,
        auth::cookie::COOKIE_SESSION,
        endpoints,
        test_utils::{
            assert_form_error_message, get_header, must_get_form, parse_html_document, test_key,
        },
    };

    use super::{INVALID_CREDENTIALS_ERROR_MSG, LogInData, LoginState, post_log_in};

    fn get_state(temp_dir: &TempDir) -> LoginState {
        let credential_store = CredentialStore::new(temp_dir.path().join("users.txt"));
        credential_store.register("ana", "hunter2").unwrap();

        LoginState {
            cookie_key: test_key(),
            credential_store,
        }
    }

    async fn log_in(state: LoginState, username: &str, password: &str) -> axum::response::Response {
        let jar = PrivateCookieJar::new(state.cookie_key.clone());
        let form = LogInData {
            username: username.to_owned(),
            password: password.to_owned(),
        };

        post_log_in(State(state), jar, Form(form)).await
    }

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let temp_dir = TempDir::new().unwrap();

        let response = log_in(get_state(&temp_dir), "ana", "hunter2").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), endpoints::DASHBOARD);
        let set_cookie = get_header(&response, SET_COOKIE.as_str());
        assert!(
            set_cookie.starts_with(&format!("{COOKIE_SESSION}=")),
            "want session cookie, got {set_cookie}"
        );
    }

    #[tokio::test]
    async fn log_in_fails_with_wrong_password() {
        let temp_dir = TempDir::new().unwrap();

        let response = log_in(get_state(&temp_dir), "ana", "hunter3").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(SET_COOKIE).is_none());
        let document = parse_html_document(response).await;
        let form = must_get_form(&document);
        assert_form_error_message(&form, INVALID_CREDENTIALS_ERROR_MSG);
    }

    #[tokio::test]
    async fn log_in_fails_with_unknown_user() {
        let temp_dir = TempDir::new().unwrap();

        let response = log_in(get_state(&temp_dir), "bob", "hunter2").await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        let form = must_get_form(&document);
        assert_form_error_message(&form, INVALID_CREDENTIALS_ERROR_MSG);
    }

    #[tokio::test]
    async fn log_in_fails_without_credential_file() {
        let temp_dir = TempDir::new().unwrap();
        let state = LoginState {
            cookie_key: test_key(),
            credential_store: CredentialStore::new(temp_dir.path().join("missing.txt")),
        };

        let response = log_in(state, "ana", "hunter2").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }
}

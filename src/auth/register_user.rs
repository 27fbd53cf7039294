//! The registration page for creating a username and password.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, CredentialStore, Error, endpoints,
    flash::{Flash, set_flash},
    html::{
        BUTTON_PRIMARY_STYLE, LINK_STYLE, base, log_in_register, password_input, username_input,
    },
    internal_server_error::InternalServerError,
};

pub(crate) const REGISTRATION_SUCCESS_MSG: &str = "User registered successfully";

fn registration_form(username: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::REGISTER)
            class="space-y-4 md:space-y-6"
        {
            (username_input(username))
            (password_input(error_message))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                "Register"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "

                a href=(endpoints::ROOT) tabindex="0" class=(LINK_STYLE)
                {
                  "Log in here"
                }
            }
        }
    }
}

fn registration_page(username: &str, error_message: Option<&str>) -> Markup {
    let registration_form = registration_form(username, error_message);
    let content = log_in_register("Create an account", None, &registration_form);

    base("Register", &[], &content)
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    registration_page("", None).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The file new credentials are appended to.
    pub credential_store: CredentialStore,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            credential_store: state.credential_store.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

/// Store the submitted credentials and send the user to the log-in page.
///
/// Usernames are not checked for uniqueness.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    match state
        .credential_store
        .register(&user_data.username, &user_data.password)
    {
        Ok(()) => {
            tracing::info!("Registered user {:?}", user_data.username);
            let jar = set_flash(jar, Flash::success(REGISTRATION_SUCCESS_MSG));

            (jar, Redirect::to(endpoints::ROOT)).into_response()
        }
        Err(Error::InvalidCredentialField(field)) => {
            let message = if field == "username" {
                "Usernames cannot contain a colon or a line break."
            } else {
                "Passwords cannot contain a line break."
            };

            registration_page(&user_data.username, Some(message)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not register user: {error}");
            InternalServerError {
                description: "Registration Failed",
                fix: "Could not save your account. Try again later or check the server logs.",
            }
            .into_response()
        }
    }
}

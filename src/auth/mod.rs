//! Log in, registration, log out and the middleware that guards routes
//! needing a logged in user.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod register_user;

pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_with_notice};
pub use register_user::{get_register_page, register_user};

#[cfg(test)]
pub(crate) use cookie::set_session_cookie;
#[cfg(test)]
pub(crate) use middleware::{AuthState, EXPORT_REQUIRES_LOG_IN_MSG};

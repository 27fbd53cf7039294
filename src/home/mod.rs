//! Home page
//!
//! Summarises the logged-in user's finances: their balance, total income and a
//! breakdown of expenses by category.

mod charts;
mod handlers;

pub use handlers::get_home_page;

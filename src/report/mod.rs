//! PDF statements of a user's transactions.

mod export_endpoint;
mod layout;
mod render;

pub use export_endpoint::export_transactions;

//! Transactions recorded by users.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `NewTransaction` builder
//! - Database functions for storing, listing and deleting transactions
//! - The dashboard page and the endpoints behind its forms

mod core;
mod create_endpoint;
mod dashboard_page;
mod delete_endpoint;

pub use core::{Transaction, TransactionType, create_transaction_table, list_transactions_for_user};
pub use create_endpoint::create_transaction_endpoint;
pub use dashboard_page::{DashboardState, get_dashboard_page};
pub use delete_endpoint::delete_transaction_endpoint;

#[cfg(test)]
pub use core::{NewTransaction, create_transaction, delete_transaction, get_transaction};

//! Aggregates a user's transactions into the figures shown on the home page,
//! the dashboard and the PDF statement.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::transaction::{Transaction, TransactionType};

/// Totals computed over a set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Income minus expenses.
    pub balance: f64,
    /// The sum of all income.
    pub total_income: f64,
    /// The sum of expenses for each category, keyed by the exact category text.
    pub expense_by_category: BTreeMap<String, f64>,
}

/// Compute the balance, total income and expenses per category of `transactions`.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary::default();

    for transaction in transactions {
        summary.balance += transaction.signed_amount();

        match transaction.type_ {
            TransactionType::Income => summary.total_income += transaction.amount,
            TransactionType::Expense => {
                *summary
                    .expense_by_category
                    .entry(transaction.category.clone())
                    .or_insert(0.0) += transaction.amount;
            }
        }
    }

    summary
}

/// The running balance of `transactions`, income minus expenses.
pub fn balance(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(Transaction::signed_amount)
        .sum()
}

//! Defines the endpoint for creating a new transaction from the dashboard form.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::{Form, PrivateCookieJar};
use serde::Deserialize;
use time::Date;

use crate::{
    Error, endpoints,
    flash::{Flash, set_flash},
    transaction::{
        DashboardState, Transaction, TransactionType, core::create_transaction,
    },
    user::Username,
};

pub(crate) const TRANSACTION_SAVED_MSG: &str = "Transaction saved!";
pub(crate) const NEGATIVE_AMOUNT_MSG: &str =
    "Amounts cannot be negative, choose Expense to record money going out.";

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    /// The category to group the transaction under.
    #[serde(default)]
    pub category: String,
    /// Whether the money came in or went out.
    pub transaction_type: TransactionType,
    /// The date when the transaction ocurred.
    pub date: Date,
}

/// A route handler for creating a new transaction, redirects back to the dashboard.
///
/// The outcome is reported on the dashboard with a flash message.
pub async fn create_transaction_endpoint(
    Extension(username): Extension<Username>,
    State(state): State<DashboardState>,
    jar: PrivateCookieJar,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = Transaction::build(form.amount, form.transaction_type, form.date)
        .description(&form.description)
        .category(&form.category);

    let result = match state.db_connection.lock() {
        Ok(connection) => create_transaction(&username, transaction, &connection),
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let flash = match result {
        Ok(transaction) => {
            tracing::debug!("Created transaction {} for {username}", transaction.id);
            Flash::success(TRANSACTION_SAVED_MSG)
        }
        Err(Error::NegativeAmount(amount)) => {
            tracing::warn!("Rejected transaction with negative amount {amount}");
            Flash::error(NEGATIVE_AMOUNT_MSG)
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            return error.into_response();
        }
    };

    (set_flash(jar, flash), Redirect::to(endpoints::DASHBOARD)).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::State,
        http::{Response, StatusCode},
    };
    use axum_extra::extract::{Form, PrivateCookieJar};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        endpoints,
        flash::take_flash,
        test_utils::{get_header, response_cookies, test_key},
        transaction::{
            DashboardState, TransactionType, get_transaction, list_transactions_for_user,
        },
        user::Username,
    };

    use super::{
        NEGATIVE_AMOUNT_MSG, TRANSACTION_SAVED_MSG, TransactionForm, create_transaction_endpoint,
    };

    fn get_state() -> DashboardState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        DashboardState {
            cookie_key: test_key(),
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    async fn submit(state: &DashboardState, form: TransactionForm) -> Response<axum::body::Body> {
        create_transaction_endpoint(
            Extension(Username::new("ana")),
            State(state.clone()),
            PrivateCookieJar::new(state.cookie_key.clone()),
            Form(form),
        )
        .await
    }

    #[track_caller]
    fn assert_redirects_to_dashboard_with_message(
        response: &Response<axum::body::Body>,
        want_message: &str,
    ) {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(response, "location"), endpoints::DASHBOARD);

        let jar = PrivateCookieJar::from_headers(&response_cookies(response), test_key());
        let (_, flash) = take_flash(jar);
        assert_eq!(flash.map(|flash| flash.message).as_deref(), Some(want_message));
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_state();
        let form = TransactionForm {
            amount: 12.3,
            description: "Lunch".to_owned(),
            category: "food".to_owned(),
            transaction_type: TransactionType::Expense,
            date: date!(2024 - 01 - 02),
        };

        let response = submit(&state, form).await;

        assert_redirects_to_dashboard_with_message(&response, TRANSACTION_SAVED_MSG);
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.username, Username::new("ana"));
        assert_eq!(transaction.amount, 12.3);
        assert_eq!(transaction.description, "Lunch");
        assert_eq!(transaction.category, "food");
        assert_eq!(transaction.type_, TransactionType::Expense);
        assert_eq!(transaction.date, date!(2024 - 01 - 02));
    }

    #[tokio::test]
    async fn empty_description_and_category_are_stored_as_empty() {
        let state = get_state();
        let form = TransactionForm {
            amount: 100.0,
            description: String::new(),
            category: String::new(),
            transaction_type: TransactionType::Income,
            date: date!(2024 - 01 - 01),
        };

        let response = submit(&state, form).await;

        assert_redirects_to_dashboard_with_message(&response, TRANSACTION_SAVED_MSG);
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.description, "");
        assert_eq!(transaction.category, "");
    }

    #[tokio::test]
    async fn negative_amount_is_rejected_with_message() {
        let state = get_state();
        let form = TransactionForm {
            amount: -40.0,
            description: String::new(),
            category: "food".to_owned(),
            transaction_type: TransactionType::Expense,
            date: date!(2024 - 01 - 02),
        };

        let response = submit(&state, form).await;

        assert_redirects_to_dashboard_with_message(&response, NEGATIVE_AMOUNT_MSG);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            list_transactions_for_user(&Username::new("ana"), &connection),
            Ok(vec![])
        );
    }
}

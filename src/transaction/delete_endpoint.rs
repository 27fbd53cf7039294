use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    Error,
    database_id::TransactionId,
    endpoints,
    flash::{Flash, set_flash},
    transaction::{DashboardState, core::delete_transaction},
    user::Username,
};

pub(crate) const TRANSACTION_DELETED_MSG: &str = "Transaction deleted";

/// A route handler for deleting a transaction, redirects to the dashboard.
///
/// Only the owner's transactions can be deleted. Ids that do not exist or
/// belong to someone else are ignored.
pub async fn delete_transaction_endpoint(
    Extension(username): Extension<Username>,
    State(state): State<DashboardState>,
    Path(transaction_id): Path<TransactionId>,
    jar: PrivateCookieJar,
) -> Response {
    let result = match state.db_connection.lock() {
        Ok(connection) => delete_transaction(transaction_id, &username, &connection),
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match result {
        Ok(0) => {
            tracing::warn!(
                "{username} tried to delete transaction {transaction_id} which does not exist or is not owned by them"
            );
            Redirect::to(endpoints::DASHBOARD).into_response()
        }
        Ok(_) => (
            set_flash(jar, Flash::info(TRANSACTION_DELETED_MSG)),
            Redirect::to(endpoints::DASHBOARD),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}

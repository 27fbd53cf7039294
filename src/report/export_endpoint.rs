use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, report::render::render_statement, timezone::local_now,
    transaction::list_transactions_for_user, user::Username,
};

/// The file name suggested to the browser for the downloaded statement.
pub const EXPORT_FILE_NAME: &str = "transacciones.pdf";

/// The state needed to export a statement.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Download the user's transactions, newest first, as a PDF attachment.
pub async fn export_transactions(
    Extension(username): Extension<Username>,
    State(state): State<ExportState>,
) -> Result<Response, Error> {
    let generated_at = local_now(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        list_transactions_for_user(&username, &connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    let pdf = render_statement(&username, &transactions, generated_at)?;
    tracing::info!(
        "Exported {} transactions for {username} ({} bytes)",
        transactions.len(),
        pdf.len()
    );

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}

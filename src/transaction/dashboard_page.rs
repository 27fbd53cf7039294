//! The dashboard lists the user's transactions with a running balance and
//! holds the form for recording new ones.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    flash::{flash_view, take_flash},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, dollar_input_styles, format_currency,
    },
    navigation::NavBar,
    summary::balance,
    timezone::local_today,
    transaction::{Transaction, TransactionType, core::list_transactions_for_user},
    user::Username,
};

/// The state needed for displaying the dashboard page and handling its forms.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The key used to read and write flash message cookies.
    pub cookie_key: Key,
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl FromRef<DashboardState> for Key {
    fn from_ref(state: &DashboardState) -> Self {
        state.cookie_key.clone()
    }
}

/// Display the user's transactions, their balance and the form for adding a transaction.
///
/// The date in the form defaults to today in the server's timezone.
pub async fn get_dashboard_page(
    Extension(username): Extension<Username>,
    State(state): State<DashboardState>,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone).ok_or_else(|| {
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

    let (jar, flash) = take_flash(jar);
    let alert = flash.as_ref().map(flash_view);

    Ok((
        jar,
        dashboard_view(&username, &transactions, today, alert),
    )
        .into_response())
}

fn dashboard_view(
    username: &Username,
    transactions: &[Transaction],
    today: Date,
    alert: Option<Markup>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD).into_html();
    let balance = balance(transactions);

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            @if let Some(alert) = alert {
                div class="w-full max-w-md" { (alert) }
            }

            section class="text-center"
            {
                h1 class="text-xl font-bold" { "Transactions for " (username) }

                p class="text-lg"
                {
                    "Balance: "
                    span id="balance" class="font-semibold" { (format_currency(balance)) }
                }
            }

            (new_transaction_form(today))

            (transactions_table(transactions))
        }
    );

    base("Dashboard", &[dollar_input_styles()], &content)
}

fn new_transaction_form(today: Date) -> Markup {
    html!(
        form
            method="post"
            action=(endpoints::DASHBOARD)
            class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-lg font-semibold" { "New transaction" }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper"
                {
                    input
                        type="number"
                        name="amount"
                        id="amount"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    type="text"
                    name="description"
                    id="description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    type="text"
                    name="category"
                    id="category"
                    placeholder="e.g. food"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for type_ in [TransactionType::Income, TransactionType::Expense] {
                        @let id = format!("type-{}", type_.as_str().to_lowercase());

                        div class="flex-1"
                        {
                            input
                                type="radio"
                                name="transaction_type"
                                id=(id)
                                value=(type_.as_str())
                                checked[type_ == TransactionType::Expense]
                                required
                                class=(FORM_RADIO_INPUT_STYLE);

                            label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (type_) }
                        }
                    }
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    type="date"
                    name="date"
                    id="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
            {
                "Add transaction"
            }
        }
    )
}

fn transactions_table(transactions: &[Transaction]) -> Markup {
    html!(
        section class="w-full max-w-screen-lg overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.date) }
                            td class=(TABLE_CELL_STYLE) { (transaction.type_) }
                            td class=(TABLE_CELL_STYLE) { (transaction.category) }
                            td class=(TABLE_CELL_STYLE) { (transaction.description) }
                            td class={(TABLE_CELL_STYLE) " text-right"}
                            {
                                (format_currency(transaction.signed_amount()))
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                a
                                    href=(format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id))
                                    class=(BUTTON_DELETE_STYLE)
                                {
                                    "Delete"
                                }
                            }
                        }
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="6" class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "No transactions yet. Add one with the form above."
                            }
                        }
                    }
                }
            }
        }
    )
}

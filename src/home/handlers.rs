//! Home page handler and view rendering.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    home::charts::{
        HomeChart, charts_script, charts_view, escape_script, expenses_by_category_chart,
    },
    html::{
        HeadElement, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency, link,
    },
    navigation::NavBar,
    summary::{Summary, summarize},
    transaction::list_transactions_for_user,
    user::Username,
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the home page.
#[derive(Debug, Clone)]
pub struct HomeState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for HomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the user's balance, total income and expenses grouped by category.
///
/// The expenses by category are also embedded in the page as JSON for scripts
/// to consume.
pub async fn get_home_page(
    Extension(username): Extension<Username>,
    State(state): State<HomeState>,
) -> Result<Response, Error> {
    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        list_transactions_for_user(&username, &connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    let summary = summarize(&transactions);
    let expenses_json = serde_json::to_string(&summary.expense_by_category)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    Ok(home_view(&username, &summary, &expenses_json).into_response())
}

fn home_view(username: &Username, summary: &Summary, expenses_json: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::HOME).into_html();
    let charts = if summary.expense_by_category.is_empty() {
        vec![]
    } else {
        vec![HomeChart {
            id: "expenses-chart",
            options: expenses_by_category_chart(&summary.expense_by_category).to_string(),
        }]
    };

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold" { "Welcome, " (username) }

            (summary_cards(summary))

            @if charts.is_empty() {
                p class="text-gray-600 dark:text-gray-400"
                {
                    "No expenses recorded yet. Add some on the "
                    (link(endpoints::DASHBOARD, "dashboard"))
                    "."
                }
            } @else {
                (charts_view(&charts))
                (category_table(&summary.expense_by_category))
            }

            script type="application/json" id="expenses-by-category"
            {
                (PreEscaped(escape_script(expenses_json)))
            }
        }
    );

    let head_elements = if charts.is_empty() {
        vec![]
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
            charts_script(&charts),
        ]
    };

    base("Home", &head_elements, &content)
}

fn summary_cards(summary: &Summary) -> Markup {
    let card_style = "flex-1 p-6 bg-white rounded-lg shadow \
        dark:bg-gray-800 dark:border dark:border-gray-700";

    html!(
        section class="w-full max-w-screen-md flex flex-col sm:flex-row gap-4"
        {
            div class=(card_style)
            {
                h2 class="text-sm text-gray-500 dark:text-gray-400" { "Balance" }
                p id="balance" class="text-2xl font-semibold" { (format_currency(summary.balance)) }
            }

            div class=(card_style)
            {
                h2 class="text-sm text-gray-500 dark:text-gray-400" { "Total income" }
                p id="total-income" class="text-2xl font-semibold"
                {
                    (format_currency(summary.total_income))
                }
            }
        }
    )
}

fn category_table(expense_by_category: &BTreeMap<String, f64>) -> Markup {
    html!(
        section class="w-full max-w-screen-md overflow-x-auto rounded-lg shadow"
        {
            table id="category-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Spent" }
                    }
                }

                tbody
                {
                    @for (category, total) in expense_by_category {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (category) }
                            td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(*total)) }
                        }
                    }
                }
            }
        }
    )
}

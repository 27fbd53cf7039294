//! Positions the text of a transaction statement on US Letter pages.
//!
//! All coordinates are in points measured from the bottom-left corner of the
//! page. The statement is set in a fixed-width font so that right-aligned text
//! can be placed by counting characters.

use time::{OffsetDateTime, macros::format_description};

use crate::{html::format_currency, summary::balance, transaction::Transaction, user::Username};

/// Page width in points.
pub const PAGE_WIDTH: f32 = 612.0;
/// Page height in points.
pub const PAGE_HEIGHT: f32 = 792.0;
/// Font size of every line in the statement.
pub const FONT_SIZE: f32 = 10.0;
/// The advance width of a single Courier glyph at [FONT_SIZE], 600/1000 of an em.
const CHAR_WIDTH: f32 = 6.0;

const TOP: f32 = 750.0;
const BOTTOM_MARGIN: f32 = 50.0;
const LINE_HEIGHT: f32 = 20.0;
const HEADER_Y: f32 = 700.0;

const DATE_X: f32 = 50.0;
const TYPE_X: f32 = 120.0;
const CATEGORY_X: f32 = 190.0;
const DESCRIPTION_X: f32 = 300.0;
const AMOUNT_RIGHT_X: f32 = 570.0;

/// Descriptions are cut to this many characters so they do not run into the amount column.
pub const DESCRIPTION_MAX_CHARS: usize = 30;

const RULE: &str = "--------------------------------------------------------------------------------";

/// A line of text placed at a point on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    /// The text to draw.
    pub text: String,
    /// The left edge of the text.
    pub x: f32,
    /// The baseline of the text.
    pub y: f32,
}

/// The text items on one page of the statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPage {
    pub items: Vec<TextItem>,
}

impl ReportPage {
    fn push(&mut self, text: impl Into<String>, x: f32, y: f32) {
        self.items.push(TextItem {
            text: text.into(),
            x,
            y,
        });
    }

    fn push_right_aligned(&mut self, text: impl Into<String>, right_x: f32, y: f32) {
        let text = text.into();
        let x = right_x - text.chars().count() as f32 * CHAR_WIDTH;
        self.push(text, x, y);
    }

    fn push_column_headers(&mut self, y: f32) {
        self.push("Date", DATE_X, y);
        self.push("Type", TYPE_X, y);
        self.push("Category", CATEGORY_X, y);
        self.push("Description", DESCRIPTION_X, y);
        self.push_right_aligned("Amount", AMOUNT_RIGHT_X, y);
    }
}

/// Tracks the current page and the baseline of the next line.
struct Cursor {
    pages: Vec<ReportPage>,
    current: ReportPage,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: ReportPage::default(),
            y: TOP,
        }
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.y = TOP;
    }

    fn finish(mut self) -> Vec<ReportPage> {
        self.pages.push(self.current);
        self.pages
    }
}

/// Lay out the statement for `username` listing `transactions` in the given order.
///
/// The first page starts with a title block. Every page carries the column
/// headers, and the last page ends with the total balance.
pub fn layout_statement(
    username: &Username,
    transactions: &[Transaction],
    generated_at: OffsetDateTime,
) -> Vec<ReportPage> {
    let mut cursor = Cursor::new();

    cursor.current.push(
        format!("Transaction report - User: {username}"),
        DATE_X,
        TOP,
    );
    cursor.current.push(
        format!("Generated: {}", format_timestamp(generated_at)),
        DATE_X,
        TOP - 15.0,
    );
    cursor.current.push(RULE, DATE_X, TOP - 30.0);

    cursor.y = HEADER_Y;
    cursor.current.push_column_headers(cursor.y);
    cursor.y -= LINE_HEIGHT;

    for transaction in transactions {
        if cursor.y < BOTTOM_MARGIN {
            cursor.new_page();
            cursor.current.push_column_headers(cursor.y);
            cursor.y -= LINE_HEIGHT;
        }

        let y = cursor.y;
        let page = &mut cursor.current;
        page.push(transaction.date.to_string(), DATE_X, y);
        page.push(transaction.type_.as_str(), TYPE_X, y);
        page.push(transaction.category.as_str(), CATEGORY_X, y);
        page.push(
            truncate(&transaction.description, DESCRIPTION_MAX_CHARS),
            DESCRIPTION_X,
            y,
        );
        page.push_right_aligned(format_currency(transaction.amount), AMOUNT_RIGHT_X, y);

        cursor.y -= LINE_HEIGHT;
    }

    cursor.y -= 10.0;
    if cursor.y - LINE_HEIGHT < BOTTOM_MARGIN {
        cursor.new_page();
    }
    cursor.current.push(RULE, DATE_X, cursor.y);
    cursor.y -= LINE_HEIGHT;
    cursor.current.push(
        format!("Total balance: {}", format_currency(balance(transactions))),
        DATE_X,
        cursor.y,
    );

    cursor.finish()
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn format_timestamp(timestamp: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

    timestamp
        .format(&format)
        .unwrap_or_else(|_| timestamp.date().to_string())
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{
        transaction::{Transaction, TransactionType},
        user::Username,
    };

    use super::{ReportPage, layout_statement};

    fn transaction(id: i64, amount: f64, type_: TransactionType, description: &str) -> Transaction {
        Transaction {
            id,
            username: Username::new("ana"),
            amount,
            description: description.to_owned(),
            category: "food".to_owned(),
            type_,
            date: date!(2024 - 01 - 02),
        }
    }

    fn texts(page: &ReportPage) -> Vec<&str> {
        page.items.iter().map(|item| item.text.as_str()).collect()
    }

    fn find<'a>(page: &'a ReportPage, text: &str) -> &'a super::TextItem {
        page.items
            .iter()
            .find(|item| item.text == text)
            .unwrap_or_else(|| panic!("{text:?} not on page: {:?}", texts(page)))
    }

    #[test]
    fn first_page_has_title_block_and_headers() {
        let pages = layout_statement(
            &Username::new("ana"),
            &[],
            datetime!(2024-01-02 03:04:05 UTC),
        );

        assert_eq!(pages.len(), 1);
        let page = &pages[0];
        assert_eq!(find(page, "Transaction report - User: ana").y, 750.0);
        assert_eq!(find(page, "Generated: 2024-01-02 03:04:05").y, 735.0);
        assert_eq!(find(page, "Date").y, 700.0);
        assert_eq!(find(page, "Date").x, 50.0);
        assert_eq!(find(page, "Category").x, 190.0);
        assert_eq!(find(page, "Description").x, 300.0);
        assert_eq!(find(page, "Total balance: $0.00").y, 650.0);
    }

    #[test]
    fn rows_are_placed_below_headers() {
        let transactions = [
            transaction(2, 40.0, TransactionType::Expense, "Lunch"),
            transaction(1, 100.0, TransactionType::Income, "Pay"),
        ];

        let pages = layout_statement(
            &Username::new("ana"),
            &transactions,
            datetime!(2024-01-02 03:04:05 UTC),
        );

        let page = &pages[0];
        assert_eq!(find(page, "Lunch").y, 680.0);
        assert_eq!(find(page, "Pay").y, 660.0);
        assert_eq!(find(page, "Expense").x, 120.0);
        // Right aligned to x=570 in a fixed-width font.
        let amount = find(page, "$40.00");
        assert_eq!(amount.x + 6.0 * 6.0, 570.0);
        assert_eq!(find(page, "Total balance: $60.00").y, 610.0);
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let description = "a".repeat(45);
        let transactions = [transaction(1, 1.0, TransactionType::Expense, &description)];

        let pages = layout_statement(
            &Username::new("ana"),
            &transactions,
            datetime!(2024-01-02 03:04:05 UTC),
        );

        find(&pages[0], &"a".repeat(30));
    }

    #[test]
    fn many_rows_continue_on_new_pages_with_headers() {
        let transactions = (1..=60)
            .map(|id| transaction(id, 1.0, TransactionType::Income, &format!("row {id}")))
            .collect::<Vec<_>>();

        let pages = layout_statement(
            &Username::new("ana"),
            &transactions,
            datetime!(2024-01-02 03:04:05 UTC),
        );

        // Page 1 fits rows at y=680..=60 (32 rows), later pages at y=730..=50 (35 rows).
        assert_eq!(pages.len(), 2);
        assert_eq!(find(&pages[0], "row 32").y, 60.0);
        assert_eq!(find(&pages[1], "row 33").y, 730.0);
        assert_eq!(find(&pages[1], "Date").y, 750.0);
        assert_eq!(find(&pages[1], "Amount").y, 750.0);
        assert!(
            !texts(&pages[1])
                .iter()
                .any(|text| text.starts_with("Transaction report"))
        );
        assert_eq!(find(&pages[1], "Total balance: $60.00").y, 730.0 - 28.0 * 20.0 - 30.0);

        for page in &pages {
            assert!(page.items.iter().all(|item| item.y >= 50.0));
        }
    }

    #[test]
    fn trailer_moves_to_new_page_when_page_is_full() {
        let transactions = (1..=32)
            .map(|id| transaction(id, 1.0, TransactionType::Expense, &format!("row {id}")))
            .collect::<Vec<_>>();

        let pages = layout_statement(
            &Username::new("ana"),
            &transactions,
            datetime!(2024-01-02 03:04:05 UTC),
        );

        assert_eq!(pages.len(), 2);
        assert_eq!(find(&pages[1], "Total balance: -$32.00").y, 730.0);
    }
}

//! Draws a laid out statement into a PDF document.

use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};
use time::OffsetDateTime;

use crate::{
    Error,
    report::layout::{FONT_SIZE, PAGE_HEIGHT, PAGE_WIDTH, ReportPage, layout_statement},
    transaction::Transaction,
    user::Username,
};

const LAYER_NAME: &str = "Layer 1";

/// Render the statement for `username` as the bytes of a PDF file.
///
/// # Errors
/// Returns [Error::ReportError] if the PDF library fails to build the document.
pub fn render_statement(
    username: &Username,
    transactions: &[Transaction],
    generated_at: OffsetDateTime,
) -> Result<Vec<u8>, Error> {
    render_pages(
        &format!("Transaction report - {username}"),
        &layout_statement(username, transactions, generated_at),
    )
}

fn render_pages(title: &str, pages: &[ReportPage]) -> Result<Vec<u8>, Error> {
    let width = Mm::from(Pt(PAGE_WIDTH));
    let height = Mm::from(Pt(PAGE_HEIGHT));

    let (document, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
    let font = document
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|error| Error::ReportError(error.to_string()))?;

    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            document.add_page(width, height, LAYER_NAME)
        };
        let layer = document.get_page(page_index).get_layer(layer_index);

        for item in &page.items {
            layer.use_text(
                item.text.as_str(),
                FONT_SIZE,
                Mm::from(Pt(item.x)),
                Mm::from(Pt(item.y)),
                &font,
            );
        }
    }

    document
        .save_to_bytes()
        .map_err(|error| Error::ReportError(error.to_string()))
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{
        transaction::{Transaction, TransactionType},
        user::Username,
    };

    use super::render_statement;

    #[test]
    fn renders_pdf_bytes() {
        let transactions = [Transaction {
            id: 1,
            username: Username::new("ana"),
            amount: 100.0,
            description: "Pay".to_owned(),
            category: "work".to_owned(),
            type_: TransactionType::Income,
            date: date!(2024 - 01 - 01),
        }];

        let bytes = render_statement(
            &Username::new("ana"),
            &transactions,
            datetime!(2024-01-02 03:04:05 UTC),
        )
        .unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_empty_statement() {
        let bytes = render_statement(
            &Username::new("ana"),
            &[],
            datetime!(2024-01-02 03:04:05 UTC),
        )
        .unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_multiple_pages() {
        let transactions = (1..=80)
            .map(|id| Transaction {
                id,
                username: Username::new("ana"),
                amount: 1.5,
                description: format!("row {id}"),
                category: String::new(),
                type_: TransactionType::Expense,
                date: date!(2024 - 01 - 01),
            })
            .collect::<Vec<_>>();

        let bytes = render_statement(
            &Username::new("ana"),
            &transactions,
            datetime!(2024-01-02 03:04:05 UTC),
        )
        .unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }
}

//! Export tables and their PDF rendering.
//!
//! Callers say what they are exporting through [`ExportData`]; the
//! projection onto a uniform table never inspects the shape of the rows.

use chrono::NaiveDate;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use shared::Transaction;
use thiserror::Error;

use super::aggregates::{category_share, CategoryAggregate, MonthlyRow};
use super::format::{format_money, format_percent};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("Could not build PDF: {0}")]
    Pdf(String),
    #[error("Could not download file: {0}")]
    Download(String),
}

impl From<printpdf::Error> for ExportError {
    fn from(err: printpdf::Error) -> Self {
        ExportError::Pdf(err.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ExportData<'a> {
    Transactions(&'a [Transaction]),
    Monthly(&'a [MonthlyRow]),
    Categories(&'a [CategoryAggregate]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn project(title: &str, data: ExportData<'_>) -> Self {
        let (headers, rows) = match data {
            ExportData::Transactions(transactions) => (
                vec!["Date", "Description", "Category", "Amount", "Type"],
                transactions
                    .iter()
                    .map(|t| {
                        vec![
                            t.date_only().to_string(),
                            t.description.clone(),
                            t.category.clone(),
                            format_money(t.amount),
                            t.transaction_type.label().to_string(),
                        ]
                    })
                    .collect(),
            ),
            ExportData::Monthly(months) => (
                vec!["Month", "Income", "Expenses", "Savings", "Savings Rate"],
                months
                    .iter()
                    .map(|m| {
                        vec![
                            m.label.to_string(),
                            format_money(m.income),
                            format_money(m.expense),
                            format_money(m.savings()),
                            m.savings_rate().map(format_percent).unwrap_or_else(|| "-".to_string()),
                        ]
                    })
                    .collect(),
            ),
            ExportData::Categories(groups) => (
                vec!["Category", "Amount", "Percentage"],
                groups
                    .iter()
                    .map(|g| {
                        vec![
                            g.name.clone(),
                            format_money(g.value),
                            format_percent(category_share(g, groups)),
                        ]
                    })
                    .collect(),
            ),
        };

        Self {
            title: title.to_string(),
            headers,
            rows,
        }
    }
}

/// `"Monthly Summary"` on 2025-06-01 → `"monthly-summary-2025-06-01.pdf"`.
pub fn file_name(title: &str, date: NaiveDate) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "export" } else { slug };

    format!("{}-{}.pdf", slug, date.format("%Y-%m-%d"))
}

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 7.0;
const LAYER: &str = "Layer 1";
// Characters kept per cell before truncation, at 9pt on an A4 content width.
const CELL_BUDGET: usize = 110;

struct PageCursor {
    layer: PdfLayerReference,
    y: f32,
}

/// A4 portrait document: title, generation date, then the table with its
/// header repeated on every page.
pub fn render_pdf(table: &ExportTable, generated_on: NaiveDate) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(&table.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let columns = table.headers.len().max(1);
    let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns as f32;
    let cell_chars = CELL_BUDGET / columns;

    let mut cursor = PageCursor {
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT - MARGIN,
    };

    cursor.layer.use_text(table.title.as_str(), 16.0, Mm(MARGIN), Mm(cursor.y), &bold);
    cursor.y -= 8.0;
    cursor.layer.use_text(
        format!("Generated on {}", generated_on.format("%Y-%m-%d")),
        9.0,
        Mm(MARGIN),
        Mm(cursor.y),
        &regular,
    );
    cursor.y -= 10.0;

    let header: Vec<String> = table.headers.iter().map(|h| h.to_string()).collect();
    write_row(&cursor, &header, column_width, cell_chars, &bold);
    cursor.y -= ROW_HEIGHT;

    for row in &table.rows {
        if cursor.y < MARGIN {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
            cursor = PageCursor {
                layer: doc.get_page(page).get_layer(layer),
                y: PAGE_HEIGHT - MARGIN,
            };
            write_row(&cursor, &header, column_width, cell_chars, &bold);
            cursor.y -= ROW_HEIGHT;
        }
        write_row(&cursor, row, column_width, cell_chars, &regular);
        cursor.y -= ROW_HEIGHT;
    }

    Ok(doc.save_to_bytes()?)
}

fn write_row(cursor: &PageCursor, cells: &[String], column_width: f32, cell_chars: usize, font: &IndirectFontRef) {
    for (i, cell) in cells.iter().enumerate() {
        let x = MARGIN + column_width * i as f32;
        cursor.layer.use_text(truncate(cell, cell_chars), 9.0, Mm(x), Mm(cursor.y), font);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Hand the bytes to the browser as a file download.
pub fn download_pdf(bytes: &[u8], file_name: &str) -> Result<(), ExportError> {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let js_err = |e: wasm_bindgen::JsValue| ExportError::Download(format!("{:?}", e));

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExportError::Download("no document".to_string()))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| ExportError::Download("anchor element".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(js_err)?;
    log::info!("exported {}", file_name);
    Ok(())
}

/// Project, render and download in one step.
pub fn export_pdf(title: &str, data: ExportData<'_>, today: NaiveDate) -> Result<(), ExportError> {
    let table = ExportTable::project(title, data);
    let bytes = render_pdf(&table, today)?;
    download_pdf(&bytes, &file_name(title, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{MonthlyAggregate, TransactionType};

    use crate::services::aggregates::{aggregate_by_category, monthly_rows};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 1,
                date: "2025-06-03T10:00:00".to_string(),
                description: "Groceries".to_string(),
                category: "Food".to_string(),
                transaction_type: TransactionType::Expense,
                amount: 75.0,
            },
            Transaction {
                id: 2,
                date: "2025-06-01".to_string(),
                description: "Salary".to_string(),
                category: "Work".to_string(),
                transaction_type: TransactionType::Income,
                amount: 2500.0,
            },
        ]
    }

    #[test]
    fn transactions_project_to_five_columns() {
        let transactions = sample_transactions();
        let table = ExportTable::project("Recent Transactions", ExportData::Transactions(&transactions));
        assert_eq!(table.headers, vec!["Date", "Description", "Category", "Amount", "Type"]);
        assert_eq!(
            table.rows[0],
            vec!["2025-06-03", "Groceries", "Food", "$75.00", "Expense"]
        );
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn monthly_rows_carry_savings_and_rate() {
        let rows = monthly_rows(&[
            MonthlyAggregate { month: 3, income: 200.0, expense: 50.0 },
            MonthlyAggregate { month: 4, income: 0.0, expense: 10.0 },
        ]);
        let table = ExportTable::project("Monthly Summary", ExportData::Monthly(&rows));
        assert_eq!(table.headers, vec!["Month", "Income", "Expenses", "Savings", "Savings Rate"]);
        assert_eq!(table.rows[0], vec!["March", "$200.00", "$50.00", "$150.00", "75.0%"]);
        assert_eq!(table.rows[1][3], "-$10.00");
        assert_eq!(table.rows[1][4], "-");
    }

    #[test]
    fn categories_project_with_percentages() {
        let transactions = sample_transactions();
        let groups = aggregate_by_category(&transactions, TransactionType::Expense);
        let table = ExportTable::project("Expenses", ExportData::Categories(&groups));
        assert_eq!(table.headers, vec!["Category", "Amount", "Percentage"]);
        assert_eq!(table.rows, vec![vec!["Food", "$75.00", "100.0%"]]);
    }

    #[test]
    fn file_names_are_slugged_and_dated() {
        assert_eq!(
            file_name("Monthly Summary", date(2025, 6, 1)),
            "monthly-summary-2025-06-01.pdf"
        );
        assert_eq!(file_name("  Income / Expense!", date(2024, 12, 31)), "income-expense-2024-12-31.pdf");
        assert_eq!(file_name("***", date(2024, 1, 2)), "export-2024-01-02.pdf");
    }

    #[test]
    fn renders_a_pdf_document() {
        let transactions = sample_transactions();
        let table = ExportTable::project("Recent Transactions", ExportData::Transactions(&transactions));
        let bytes = render_pdf(&table, date(2025, 6, 10)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_tables_span_pages() {
        let one = sample_transactions();
        let many: Vec<Transaction> = one.iter().cycle().take(200).cloned().collect();
        let table = ExportTable::project("All", ExportData::Transactions(&many));
        let single = render_pdf(&ExportTable::project("All", ExportData::Transactions(&one)), date(2025, 1, 1)).unwrap();
        let multi = render_pdf(&table, date(2025, 1, 1)).unwrap();
        assert!(multi.len() > single.len());
    }

    #[test]
    fn truncates_long_cells() {
        assert_eq!(truncate("abcdef", 4), "a...");
        assert_eq!(truncate("abc", 4), "abc");
    }
}

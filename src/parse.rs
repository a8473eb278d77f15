use scraper::{ElementRef, Html, Selector};

use crate::{Error, Result, SCORE_TABLE_SELECTOR};

/// Attempts to parse a score page, extracting the rows of the first `table.e-table`.
/// The first row is the header and the last one a footer, both are skipped.
/// Returns `(subject, score)` pairs in table order. Only the score is trimmed.
pub fn parse_score_table(html: &str) -> Result<Vec<(String, String)>> {
    let doc = Html::parse_document(html);

    let table_selector = create_selector(SCORE_TABLE_SELECTOR)?;
    let row_selector = create_selector("tr")?;
    let cell_selector = create_selector("td")?;

    let table = doc
        .select(&table_selector)
        .next()
        .ok_or_else(|| Error::MissingTable(SCORE_TABLE_SELECTOR.into()))?;

    let rows = table.select(&row_selector).collect::<Vec<_>>();
    let data_rows = match rows.len() {
        0..=2 => &[][..],
        n => &rows[1..n - 1],
    };

    let mut scores = Vec::with_capacity(data_rows.len());
    for (i, row) in data_rows.iter().enumerate() {
        let cells = row.select(&cell_selector).collect::<Vec<_>>();
        if cells.len() < 2 {
            return Err(Error::MalformedRow {
                row: i + 1,
                cells: cells.len(),
            });
        }
        scores.push((cell_text(&cells[0]), cell_text(&cells[1]).trim().to_string()));
    }
    Ok(scores)
}

#[inline]
fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::InvalidSelector(sel_str.into()))
}

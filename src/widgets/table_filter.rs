//! Table Filter
//!
//! Hides table rows whose text does not contain the search query.

use crate::ports::FilterRow;

/// Case-insensitive substring match; an empty query matches everything
pub fn row_matches(row_text: &str, filtro: &str) -> bool {
    filtro.is_empty() || row_text.to_lowercase().contains(filtro)
}

/// Apply `query` to every row and return how many stay visible
pub fn apply_filter<R: FilterRow>(rows: &[R], query: &str) -> usize {
    let filtro = query.to_lowercase();
    let mut shown = 0;
    for row in rows {
        let visible = row_matches(&row.text(), &filtro);
        row.set_visible(visible);
        if visible {
            shown += 1;
        }
    }
    log::debug!(target: "table_filter", "{:?}: {}/{} rows shown", query, shown, rows.len());
    shown
}

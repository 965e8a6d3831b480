use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table, TableComponent};

use super::ReconciledEndpoint;

const HEADERS: [&str; 5] = ["#", "METHOD", "PATH", "RESULT", "SOURCE"];

/// Render rows as a box-drawn table, one separated row per endpoint.
///
/// Rows are numbered in the order given; `reconcile` already sorts by path.
pub fn render_table(endpoints: &[ReconciledEndpoint]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    // light lines throughout, header separated like any other row
    table
        .set_style(TableComponent::HeaderLines, '─')
        .set_style(TableComponent::LeftHeaderIntersection, '├')
        .set_style(TableComponent::MiddleHeaderIntersections, '┼')
        .set_style(TableComponent::RightHeaderIntersection, '┤')
        .set_style(TableComponent::VerticalLines, '│')
        .set_style(TableComponent::HorizontalLines, '─');
    table.set_header(HEADERS);

    for (i, endpoint) in endpoints.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            endpoint.method.clone(),
            endpoint.path.clone(),
            endpoint.result.to_string(),
            endpoint.source.clone(),
        ]);
    }

    if let Some(number) = table.column_mut(0) {
        number.set_cell_alignment(CellAlignment::Right);
    }

    format!("{}\n", table)
}

/// Render rows as a pretty-printed JSON array
pub fn render_json(endpoints: &[ReconciledEndpoint]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(endpoints)
}

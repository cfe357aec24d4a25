use super::format_currency;
use super::workbook::Workbook;
use std::fmt::Write;

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Burn plan table: one row per week, one hours column per person.
pub fn burn_plan_html(workbook: &Workbook) -> String {
    let sheet = &workbook.burn_plan;
    let mut html = String::from("<table><thead><tr><th>Week</th><th>Date Range</th>");
    for column in &sheet.person_columns {
        let _ = write!(html, "<th>{}</th>", escape_html(column));
    }
    html.push_str("</tr></thead><tbody>");
    for row in &sheet.rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td>",
            escape_html(&row.week_label),
            escape_html(&row.date_range)
        );
        for hours in &row.hours {
            let _ = write!(html, "<td>{hours}</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// Cost summary table: one row per role plus total, base and profit rows.
pub fn cost_summary_html(workbook: &Workbook) -> String {
    let mut html = String::from(
        "<table><thead><tr><th>Role</th><th>Bill Rate</th><th>Total Hours</th>\
         <th>Total Cost</th><th>Notes</th></tr></thead><tbody>",
    );
    for line in &workbook.cost_summary {
        let notes = line
            .notes
            .iter()
            .map(|note| escape_html(note))
            .collect::<Vec<_>>()
            .join("<br>");
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&line.role_title),
            format_currency(line.bill_rate),
            line.hours,
            format_currency(line.cost),
            notes
        );
    }
    html.push_str("</tbody><tfoot>");
    for (label, amount) in [
        ("Total Cost", workbook.totals.total_cost),
        ("Base Cost", workbook.totals.base_cost),
        ("Profit", workbook.totals.profit),
    ] {
        let _ = write!(
            html,
            "<tr><th colspan=\"3\">{label}</th><td colspan=\"2\">{}</td></tr>",
            format_currency(amount)
        );
    }
    html.push_str("</tfoot></table>");
    html
}

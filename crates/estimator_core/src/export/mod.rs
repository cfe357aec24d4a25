//! Export formatting over a project snapshot.
//!
//! # Responsibility
//! - Shape the snapshot into a two-sheet workbook model.
//! - Render that model as CSV text or HTML table fragments.
//!
//! # Invariants
//! - Export is read-only over the snapshot; it never mutates proposal state.
//! - Hours shown per week are effective hours (explicit or suggested).

mod csv_export;
mod html;
mod workbook;

pub use csv_export::{to_csv, ExportError};
pub use html::{burn_plan_html, cost_summary_html, escape_html};
pub use workbook::{build_workbook, BurnPlanRow, BurnPlanSheet, Workbook};

/// Formats an amount as `$1,234.56`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

use super::format_currency;
use super::workbook::Workbook;
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTES_SEPARATOR: &str = "; ";

/// CSV rendering failure.
#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Encoding(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "failed to write csv: {err}"),
            Self::Encoding(message) => write!(f, "csv output is not valid UTF-8: {message}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Encoding(_) => None,
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Renders both sheets as one CSV document, separated by a blank line.
pub fn to_csv(workbook: &Workbook) -> Result<String, ExportError> {
    let mut burn_plan = section_writer();
    burn_plan.write_record(["Burn Plan"])?;
    let mut header = vec!["Week".to_string(), "Date Range".to_string()];
    header.extend(workbook.burn_plan.person_columns.iter().cloned());
    burn_plan.write_record(&header)?;
    for row in &workbook.burn_plan.rows {
        let mut record = vec![row.week_label.clone(), row.date_range.clone()];
        record.extend(row.hours.iter().map(|hours| hours.to_string()));
        burn_plan.write_record(&record)?;
    }

    let mut cost_summary = section_writer();
    cost_summary.write_record(["Cost Summary"])?;
    cost_summary.write_record(["Role", "Bill Rate", "Total Hours", "Total Cost", "Notes"])?;
    for line in &workbook.cost_summary {
        cost_summary.write_record([
            line.role_title.clone(),
            format_currency(line.bill_rate),
            line.hours.to_string(),
            format_currency(line.cost),
            line.notes.join(NOTES_SEPARATOR),
        ])?;
    }

    Ok(format!("{}\n{}", finish(burn_plan)?, finish(cost_summary)?))
}

fn section_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Encoding(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Encoding(err.to_string()))
}

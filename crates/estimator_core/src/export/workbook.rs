use crate::cost::{role_breakdown, summarize, CostSummary, RoleCostLine};
use crate::model::project::ProjectSnapshot;
use crate::reconcile::person_week_hours;

/// One week row of the burn plan sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct BurnPlanRow {
    /// `Week N`, one-based.
    pub week_label: String,
    /// `YYYY-MM-DD - YYYY-MM-DD`.
    pub date_range: String,
    /// Effective hours per person, in `BurnPlanSheet::person_columns` order.
    pub hours: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BurnPlanSheet {
    /// `<role title> Hours`, one per person in roster order.
    pub person_columns: Vec<String>,
    pub rows: Vec<BurnPlanRow>,
}

/// Two-sheet export model plus headline figures.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub burn_plan: BurnPlanSheet,
    /// One line per role title.
    pub cost_summary: Vec<RoleCostLine>,
    pub totals: CostSummary,
}

pub fn build_workbook(snapshot: &ProjectSnapshot) -> Workbook {
    let personnel = &snapshot.personnel;
    let plan = &snapshot.burn_plan;

    let person_columns = personnel
        .iter()
        .map(|person| format!("{} Hours", person.role.title))
        .collect();
    let rows = plan
        .weeks
        .iter()
        .enumerate()
        .map(|(index, week)| BurnPlanRow {
            week_label: format!("Week {}", index + 1),
            date_range: format!("{} - {}", week.start_date, week.end_date),
            hours: personnel
                .iter()
                .map(|person| person_week_hours(plan, person, index))
                .collect(),
        })
        .collect();

    Workbook {
        burn_plan: BurnPlanSheet {
            person_columns,
            rows,
        },
        cost_summary: role_breakdown(personnel),
        totals: summarize(personnel),
    }
}

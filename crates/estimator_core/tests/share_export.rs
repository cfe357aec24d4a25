use chrono::NaiveDate;
use estimator_core::export::{build_workbook, escape_html, to_csv};
use estimator_core::service::share_service::DEFAULT_SUBJECT;
use estimator_core::{
    DeliveryError, EmailSender, ProposalEmail, ProposalSession, ShareError, ShareService, Task,
};
use std::cell::RefCell;

#[derive(Default)]
struct RecordingSender {
    sent: RefCell<Vec<ProposalEmail>>,
    tests: RefCell<Vec<String>>,
    fail_with: Option<String>,
}

impl EmailSender for RecordingSender {
    fn send_proposal(&self, email: &ProposalEmail) -> Result<(), DeliveryError> {
        if let Some(message) = &self.fail_with {
            return Err(DeliveryError::new(message.clone()));
        }
        self.sent.borrow_mut().push(email.clone());
        Ok(())
    }

    fn send_test(&self, recipient: &str) -> Result<(), DeliveryError> {
        self.tests.borrow_mut().push(recipient.to_string());
        Ok(())
    }
}

fn session() -> ProposalSession {
    let mut session = ProposalSession::with_defaults(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    let first = session.start().unwrap();
    session
        .attach_task(first, &Task::new("research", "Research", 10.0))
        .unwrap();
    let second = session.add_person().unwrap();
    session.change_role(second, "vp");
    session.set_notes(second, "Oversight, <final> review");
    session
}

#[test]
fn workbook_lists_weeks_and_role_columns() {
    let session = session();

    let workbook = build_workbook(&session.snapshot());

    let sheet = &workbook.burn_plan;
    assert_eq!(sheet.person_columns, vec!["Sr. Associate Hours", "VP Hours"]);
    assert_eq!(sheet.rows.len(), 4);
    assert_eq!(sheet.rows[0].week_label, "Week 1");
    assert_eq!(sheet.rows[0].date_range, "2024-01-01 - 2024-01-07");
    assert_eq!(sheet.rows[0].hours, vec![3.0, 3.0]);
    assert_eq!(sheet.rows[3].hours, vec![2.0, 2.0]);
    assert_eq!(workbook.cost_summary.len(), 2);
}

#[test]
fn csv_contains_both_sections_with_quoted_notes() {
    let session = session();

    let csv = to_csv(&build_workbook(&session.snapshot())).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Burn Plan");
    assert_eq!(lines[1], "Week,Date Range,Sr. Associate Hours,VP Hours");
    assert_eq!(lines[2], "Week 1,2024-01-01 - 2024-01-07,3,3");
    assert!(lines.contains(&"Cost Summary"));
    assert!(lines.contains(&"Role,Bill Rate,Total Hours,Total Cost,Notes"));
    assert!(lines.contains(&"Sr. Associate,$98.52,10,$985.20,"));
    assert!(lines.contains(&"VP,$202.14,10,\"$2,021.40\",\"Oversight, <final> review\""));
}

#[test]
fn proposal_email_escapes_notes_and_defaults_subject() {
    let service = ShareService::new(RecordingSender::default());
    let snapshot = session().snapshot();

    let email = service
        .send_proposal("  client@example.com ", "  ", "Thanks!", &snapshot)
        .unwrap();

    assert_eq!(email.recipient, "client@example.com");
    assert_eq!(email.subject, DEFAULT_SUBJECT);
    assert!(email.burn_plan_html.contains("<th>VP Hours</th>"));
    assert!(email
        .cost_summary_html
        .contains("Oversight, &lt;final&gt; review"));
    assert!(email.cost_summary_html.contains("Total Cost"));
    assert_eq!(service.sender().sent.borrow().len(), 1);
}

#[test]
fn blank_recipient_never_reaches_the_sender() {
    let service = ShareService::new(RecordingSender::default());
    let snapshot = session().snapshot();

    assert_eq!(
        service.send_proposal(" ", "Plan", "", &snapshot),
        Err(ShareError::MissingRecipient)
    );
    assert_eq!(
        service.send_test_email(""),
        Err(ShareError::MissingRecipient)
    );
    assert!(service.sender().sent.borrow().is_empty());
    assert!(service.sender().tests.borrow().is_empty());
}

#[test]
fn delivery_failures_are_reported() {
    let service = ShareService::new(RecordingSender {
        fail_with: Some("smtp unavailable".to_string()),
        ..RecordingSender::default()
    });

    let err = service
        .send_proposal("client@example.com", "Plan", "", &session().snapshot())
        .unwrap_err();

    assert_eq!(err, ShareError::Delivery(DeliveryError::new("smtp unavailable")));
    assert_eq!(err.to_string(), "email delivery failed: smtp unavailable");
}

#[test]
fn test_email_uses_trimmed_recipient() {
    let service = ShareService::new(RecordingSender::default());

    service.send_test_email(" me@example.com ").unwrap();

    assert_eq!(*service.sender().tests.borrow(), vec!["me@example.com".to_string()]);
}

#[test]
fn escape_html_covers_markup_characters() {
    assert_eq!(
        escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
    );
}

#[test]
fn snapshot_and_email_wire_shapes_use_snake_case_keys() {
    let mut session = session();
    let person = session.personnel()[0].id;
    session
        .set_allocation(0, person, &estimator_core::TaskId::new("research"), 4.0)
        .unwrap();

    let snapshot = serde_json::to_value(session.snapshot()).unwrap();
    let first = &snapshot["personnel"][0];
    assert_eq!(first["role"]["title"], "Sr. Associate");
    assert_eq!(first["bill_rate"], 98.52);
    assert_eq!(first["tasks"][0]["custom"], false);
    let plan = &snapshot["burn_plan"];
    assert_eq!(plan["start_date"], "2024-01-01");
    assert_eq!(plan["weeks"][0]["end_date"], "2024-01-07");
    assert_eq!(plan["weeks"][0]["allocations"][0]["task_id"], "research");
    assert_eq!(plan["weeks"][0]["allocations"][0]["hours"], 4.0);

    let service = ShareService::new(RecordingSender::default());
    let email = service
        .send_proposal("client@example.com", "Plan", "", &session.snapshot())
        .unwrap();
    let wire = serde_json::to_value(&email).unwrap();
    assert_eq!(wire["email"], "client@example.com");
    assert!(wire["burn_plan_html"].as_str().unwrap().starts_with("<table>"));
}

use chrono::NaiveDate;
use estimator_core::{
    AllocationStatus, Catalogs, EstimatorConfig, ProposalSession, Task, TaskId,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn session() -> ProposalSession {
    ProposalSession::with_defaults(day(2024, 1, 1))
}

#[test]
fn fresh_session_spans_configured_weeks() {
    let session = session();

    let plan = session.burn_plan();
    assert_eq!(plan.start_date, "2024-01-01");
    assert_eq!(plan.end_date, "2024-01-28");
    assert_eq!(plan.week_count(), 4);
    assert!(session.personnel().is_empty());
}

#[test]
fn start_adds_one_default_person_only_once() {
    let mut session = session();

    let id = session.start().unwrap();
    assert!(session.start().is_none());

    let person = session.roster().get(id).unwrap();
    assert_eq!(person.name, "Resource 1");
    assert_eq!(person.role.title, "Sr. Associate");
    assert_eq!(person.bill_rate, 98.52);
    assert!(person.tasks.is_empty());
}

#[test]
fn config_controls_default_role_prefix_and_length() {
    let config = EstimatorConfig::from_toml_str(
        r#"
default_role_id = "principal"
project_weeks = 2
person_name_prefix = "Consultant"
"#,
    )
    .unwrap();
    let mut session = ProposalSession::new(Catalogs::seeded(), &config, day(2024, 3, 4));

    let id = session.start().unwrap();
    let person = session.roster().get(id).unwrap();
    assert_eq!(person.name, "Consultant 1");
    assert_eq!(person.role.id, "principal");
    assert_eq!(session.burn_plan().week_count(), 2);
    assert_eq!(session.burn_plan().end_date, "2024-03-17");
}

#[test]
fn configured_shared_tasks_attach_once_and_skip_unknown_ids() {
    let config = EstimatorConfig::from_toml_str(
        r#"shared_task_ids = ["wireframes", "no-such-task", "wireframes", "ui-design"]"#,
    )
    .unwrap();
    let mut session = ProposalSession::new(Catalogs::seeded(), &config, day(2024, 1, 1));

    let shared: Vec<&str> = session
        .catalogs()
        .shared_tasks
        .list()
        .iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(shared, vec!["wireframes", "ui-design"]);

    let id = session.start().unwrap();
    let sources: Vec<&str> = session
        .roster()
        .get(id)
        .unwrap()
        .tasks
        .iter()
        .map(|task| task.id.source())
        .collect();
    assert_eq!(sources, vec!["wireframes", "ui-design"]);
    assert_eq!(session.roster().get(id).unwrap().total_hours(), 30.0);
}

#[test]
fn new_person_receives_minted_copies_of_roster_tasks() {
    let mut session = session();
    let first = session.start().unwrap();
    session.apply_recipe("app-design").unwrap();

    let second = session.add_person().unwrap();

    let first_tasks = &session.roster().get(first).unwrap().tasks;
    let second_tasks = &session.roster().get(second).unwrap().tasks;
    assert_eq!(second_tasks.len(), first_tasks.len());
    for (original, copy) in first_tasks.iter().zip(second_tasks) {
        assert_ne!(original.id, copy.id);
        assert_eq!(original.id.source(), copy.id.source());
        assert_eq!(original.hours, copy.hours);
    }
    assert_eq!(session.roster().get(second).unwrap().name, "Resource 2");
}

#[test]
fn shared_tasks_attach_to_new_people() {
    let mut session = session();
    session
        .catalogs_mut()
        .shared_tasks
        .insert(Task::new("project-management", "Project Management", 50.0))
        .unwrap();

    let id = session.start().unwrap();

    let tasks = &session.roster().get(id).unwrap().tasks;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id.source(), "project-management");
}

#[test]
fn applying_a_recipe_twice_attaches_nothing_new() {
    let mut session = session();
    session.start();
    session.add_person();

    assert_eq!(session.apply_recipe("app-design").unwrap(), 14);
    assert_eq!(session.apply_recipe("app-design").unwrap(), 0);
    assert_eq!(session.apply_recipe("no-such-recipe").unwrap(), 0);
    for person in session.personnel() {
        assert_eq!(person.tasks.len(), 7);
    }
}

#[test]
fn role_change_overwrites_custom_rate_and_ignores_unknown_roles() {
    let mut session = session();
    let id = session.start().unwrap();
    session.set_bill_rate(id, 150.0).unwrap();

    assert!(!session.change_role(id, "astronaut"));
    assert_eq!(session.roster().get(id).unwrap().bill_rate, 150.0);

    assert!(session.change_role(id, "vp"));
    let person = session.roster().get(id).unwrap();
    assert_eq!(person.role.title, "VP");
    assert_eq!(person.bill_rate, 202.14);
}

#[test]
fn negative_amounts_are_rejected() {
    let mut session = session();
    let id = session.start().unwrap();
    session.apply_recipe("app-design").unwrap();
    let task_id = session.personnel()[0].tasks[0].id.clone();

    assert!(session.set_bill_rate(id, -5.0).is_err());
    assert!(session.set_task_hours(id, &task_id, -1.0).is_err());
    assert!(session.set_allocation(0, id, &task_id, f64::NAN).is_err());
}

#[test]
fn removing_a_person_purges_their_allocations() {
    let mut session = session();
    let keep = session.start().unwrap();
    session.apply_recipe("app-design").unwrap();
    let gone = session.add_person().unwrap();
    let keep_task = session.roster().get(keep).unwrap().tasks[0].id.clone();
    let gone_task = session.roster().get(gone).unwrap().tasks[0].id.clone();
    session.set_allocation(0, keep, &keep_task, 5.0).unwrap();
    session.set_allocation(1, gone, &gone_task, 5.0).unwrap();

    assert!(session.remove_person(gone));
    assert!(!session.remove_person(gone));

    let plan = session.burn_plan();
    assert_eq!(plan.allocation_count(), 1);
    assert!(plan
        .weeks
        .iter()
        .flat_map(|week| &week.allocations)
        .all(|item| item.personnel_id == keep));
}

#[test]
fn removing_a_task_purges_matching_allocations() {
    let mut session = session();
    let id = session.start().unwrap();
    session.apply_recipe("app-design").unwrap();
    let tasks: Vec<TaskId> = session.personnel()[0]
        .tasks
        .iter()
        .map(|task| task.id.clone())
        .collect();
    session.set_allocation(0, id, &tasks[0], 3.0).unwrap();
    session.set_allocation(0, id, &tasks[1], 4.0).unwrap();
    session.set_allocation(2, id, &tasks[0], 6.0).unwrap();

    assert!(session.remove_task(id, &tasks[1]));
    assert_eq!(session.burn_plan().allocation_count(), 2);

    assert_eq!(session.remove_task_from_all(&tasks[0]), 1);
    assert_eq!(session.burn_plan().allocation_count(), 0);
    assert!(!session.roster().get(id).unwrap().has_task(&tasks[0]));
}

#[test]
fn removing_a_task_from_everyone_never_raises_cost() {
    let mut session = session();
    session.start();
    session.apply_recipe("strategy-map").unwrap();
    let second = session.add_person().unwrap();
    session.change_role(second, "principal");
    let shared = session
        .attach_task_to_all(&Task::custom("Workshop", 12.0))
        .unwrap();

    let before = session.cost_summary().total_cost;
    assert_eq!(session.remove_task_from_all(&shared), 2);
    let after = session.cost_summary().total_cost;
    assert!(after <= before);
    assert!(after < before);

    assert_eq!(session.remove_task_from_all(&shared), 0);
    assert_eq!(session.cost_summary().total_cost, after);
}

#[test]
fn allocations_require_a_held_task_and_an_existing_week() {
    let mut session = session();
    let id = session.start().unwrap();
    session.apply_recipe("app-design").unwrap();
    let task_id = session.personnel()[0].tasks[0].id.clone();

    assert!(!session
        .set_allocation(0, id, &TaskId::new("wireframes"), 4.0)
        .unwrap());
    assert!(!session.set_allocation(99, id, &task_id, 4.0).unwrap());
    assert!(session.set_allocation(0, id, &task_id, 4.0).unwrap());
    assert!(session.set_allocation(0, id, &task_id, 6.0).unwrap());

    let week = session.burn_plan().week(0).unwrap();
    assert_eq!(week.allocations.len(), 1);
    assert_eq!(week.allocations[0].hours, 6.0);
}

#[test]
fn date_change_carries_allocations_by_position() {
    let mut session = session();
    let id = session.start().unwrap();
    session.apply_recipe("app-design").unwrap();
    let task_id = session.personnel()[0].tasks[0].id.clone();
    session.set_allocation(0, id, &task_id, 5.0).unwrap();
    session.set_allocation(3, id, &task_id, 7.0).unwrap();

    let outcome = session.update_dates("2024-02-05", "2024-02-18");

    assert_eq!(outcome.week_count, 2);
    assert_eq!(outcome.carried_weeks, 2);
    assert_eq!(outcome.dropped_allocations, 1);
    let first = session.burn_plan().week(0).unwrap();
    assert_eq!(first.start_date, day(2024, 2, 5));
    assert_eq!(first.allocation(id, &task_id).unwrap().hours, 5.0);
    assert_eq!(session.burn_plan().allocation_count(), 1);

    let outcome = session.update_dates("2024-02-05", "2024-03-03");
    assert_eq!(outcome.week_count, 4);
    assert!(session.burn_plan().week(3).unwrap().allocations.is_empty());
}

#[test]
fn invalid_dates_leave_no_weeks_but_keep_raw_bounds() {
    let mut session = session();
    let id = session.start().unwrap();
    session.apply_recipe("app-design").unwrap();
    let task_id = session.personnel()[0].tasks[0].id.clone();
    session.set_allocation(0, id, &task_id, 5.0).unwrap();

    let outcome = session.update_dates("2024-13-01", "2024-02-01");

    assert_eq!(outcome.week_count, 0);
    assert_eq!(outcome.dropped_allocations, 1);
    assert_eq!(session.burn_plan().start_date, "2024-13-01");
    assert_eq!(
        session.allocation_summary().status,
        AllocationStatus::Unconfigured
    );
    assert_eq!(session.person_week_hours(id, 0), 0.0);
}

#[test]
fn effective_hours_prefer_explicit_records() {
    let mut session = session();
    let id = session.start().unwrap();
    session
        .attach_task(id, &Task::new("research", "Research", 10.0))
        .unwrap();
    session
        .attach_task(id, &Task::new("design", "Design", 6.0))
        .unwrap();
    let research = TaskId::new("research");
    let design = TaskId::new("design");

    // 16 hours over 4 weeks.
    assert_eq!(session.person_week_hours(id, 0), 4.0);
    assert_eq!(session.task_week_hours(id, &research, 0), 3.0);

    session.set_allocation(0, id, &research, 0.0).unwrap();
    assert_eq!(session.task_week_hours(id, &research, 0), 0.0);
    // Explicit research 0 plus design's share of the week 0 suggestion.
    assert_eq!(session.task_week_hours(id, &design, 0), 1.0);
    assert_eq!(session.person_week_hours(id, 0), 1.0);
    assert_eq!(session.person_week_hours(id, 1), 4.0);
    assert_eq!(session.task_week_hours(id, &design, 3), 1.0);
}

#[test]
fn weekly_total_fans_out_by_task_share() {
    let mut session = session();
    let id = session.start().unwrap();
    session
        .attach_task(id, &Task::new("research", "Research", 30.0))
        .unwrap();
    session
        .attach_task(id, &Task::new("design", "Design", 10.0))
        .unwrap();

    assert_eq!(session.set_weekly_total(1, id, 8.0).unwrap(), 2);

    assert_eq!(session.task_week_hours(id, &TaskId::new("research"), 1), 6.0);
    assert_eq!(session.task_week_hours(id, &TaskId::new("design"), 1), 2.0);
    assert_eq!(session.person_week_hours(id, 1), 8.0);
}

#[test]
fn suggestions_balance_the_allocation_summary() {
    let mut session = session();
    session.start();
    session.apply_recipe("app-design").unwrap();

    let summary = session.allocation_summary();
    assert_eq!(summary.estimated_hours, 127.0);
    assert_eq!(summary.status, AllocationStatus::Balanced);

    let id = session.personnel()[0].id;
    session.set_weekly_total(0, id, 0.0).unwrap();
    assert!(matches!(
        session.allocation_summary().status,
        AllocationStatus::UnderAllocated(_)
    ));
}

#[test]
fn removing_a_person_lowers_total_cost() {
    let mut session = session();
    session.start();
    session.apply_recipe("app-design").unwrap();
    let second = session.add_person().unwrap();
    session.change_role(second, "principal");

    let before = session.cost_summary();
    assert!(session.personnel_cost(second) > 0.0);
    session.remove_person(second);
    let after = session.cost_summary();

    assert!(after.total_cost < before.total_cost);
    assert!((after.total_cost - 127.0 * 98.52).abs() < 1e-6);
    assert_eq!(session.personnel_cost(second), 0.0);
}

#[test]
fn role_breakdown_groups_people_by_title() {
    let mut session = session();
    let first = session.start().unwrap();
    session.apply_recipe("app-design").unwrap();
    let second = session.add_person().unwrap();
    let third = session.add_person().unwrap();
    session.change_role(third, "vp");
    session.set_notes(first, "Lead");
    session.set_notes(second, "  ");

    let lines = session.role_breakdown();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].role_title, "Sr. Associate");
    assert_eq!(lines[0].hours, 254.0);
    assert_eq!(lines[0].notes, vec!["Lead".to_string()]);
    assert_eq!(lines[1].role_title, "VP");
}

#[test]
fn load_replaces_state_wholesale() {
    let mut source = session();
    let id = source.start().unwrap();
    source.apply_recipe("strategy-map").unwrap();
    let task_id = source.personnel()[0].tasks[0].id.clone();
    source.set_allocation(1, id, &task_id, 9.0).unwrap();
    let snapshot = source.snapshot();

    let mut target = ProposalSession::with_defaults(day(2030, 6, 1));
    target.start();
    target.add_person();
    target.load(snapshot.clone()).unwrap();

    assert_eq!(target.snapshot(), snapshot);
    assert_eq!(target.personnel().len(), 1);
}

#[test]
fn failed_load_keeps_current_state() {
    let mut session = session();
    session.start();
    let before = session.snapshot();

    let mut broken = before.clone();
    broken.personnel[0].bill_rate = f64::INFINITY;

    assert!(session.load(broken).is_err());
    assert_eq!(session.snapshot(), before);
}

#[test]
fn load_merges_duplicate_allocation_keys() {
    let mut session = session();
    let id = session.start().unwrap();
    session
        .attach_task(id, &Task::new("research", "Research", 10.0))
        .unwrap();
    let research = TaskId::new("research");
    session.set_allocation(0, id, &research, 2.0).unwrap();
    let mut snapshot = session.snapshot();
    let duplicate = snapshot.burn_plan.weeks[0].allocations[0].clone();
    snapshot.burn_plan.weeks[0].allocations.push(estimator_core::Allocation {
        hours: 5.0,
        ..duplicate
    });

    session.load(snapshot).unwrap();

    let week = session.burn_plan().week(0).unwrap();
    assert_eq!(week.allocations.len(), 1);
    assert_eq!(week.allocations[0].hours, 5.0);
}

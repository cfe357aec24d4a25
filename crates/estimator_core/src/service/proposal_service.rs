//! Proposal session: one in-memory proposal and its mutation entry points.
//!
//! # Responsibility
//! - Own the roster, burn plan and catalogs of the proposal being edited.
//! - Apply cascades that span roster and burn plan in one call.
//!
//! # Invariants
//! - Removing a person or task never leaves allocations referencing it.
//! - Explicit allocations are only written for tasks the person holds.
//! - `load` replaces state wholesale and only after the snapshot validated.

use crate::calendar::format_date;
use crate::catalog::Catalogs;
use crate::config::EstimatorConfig;
use crate::cost::{personnel_cost, role_breakdown, summarize, CostSummary, RoleCostLine};
use crate::model::burn_plan::BurnPlan;
use crate::model::personnel::{Personnel, PersonnelId};
use crate::model::project::ProjectSnapshot;
use crate::model::roster::Roster;
use crate::model::task::{Task, TaskId};
use crate::model::validation::ModelValidationError;
use crate::reconcile::{
    allocation_summary, fan_out_weekly_total, person_week_hours, purge_personnel,
    purge_personnel_task, purge_task, regenerate_weeks, set_allocation, task_week_hours,
    AllocationSummary, Regeneration,
};
use chrono::{Duration, NaiveDate};
use log::{debug, info, warn};

/// Editable proposal state.
#[derive(Debug, Clone)]
pub struct ProposalSession {
    catalogs: Catalogs,
    roster: Roster,
    burn_plan: BurnPlan,
    person_name_prefix: String,
}

impl ProposalSession {
    /// Creates an empty roster and a burn plan spanning the configured
    /// number of weeks starting `today`.
    pub fn new(mut catalogs: Catalogs, config: &EstimatorConfig, today: NaiveDate) -> Self {
        catalogs
            .roles
            .set_default_role_id(config.default_role_id.clone());
        share_library_tasks(&mut catalogs, &config.shared_task_ids);
        let span_days = config.project_length_days().max(1);
        let end = today
            .checked_add_signed(Duration::days(span_days - 1))
            .unwrap_or(today);

        let mut burn_plan = BurnPlan::default();
        regenerate_weeks(&mut burn_plan, &format_date(today), &format_date(end));

        Self {
            catalogs,
            roster: Roster::new(),
            burn_plan,
            person_name_prefix: config.person_name_prefix.clone(),
        }
    }

    /// Seeded catalogs with default configuration.
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self::new(Catalogs::seeded(), &EstimatorConfig::default(), today)
    }

    /// Ensures the roster holds at least one person.
    ///
    /// Returns the id of the person added, if one was needed.
    pub fn start(&mut self) -> Option<PersonnelId> {
        if self.roster.is_empty() {
            return self.add_person();
        }
        None
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn personnel(&self) -> &[Personnel] {
        self.roster.personnel()
    }

    pub fn burn_plan(&self) -> &BurnPlan {
        &self.burn_plan
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn catalogs_mut(&mut self) -> &mut Catalogs {
        &mut self.catalogs
    }

    pub fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            personnel: self.roster.personnel().to_vec(),
            burn_plan: self.burn_plan.clone(),
        }
    }

    /// Adds a person with the default role. `None` when no role exists.
    pub fn add_person(&mut self) -> Option<PersonnelId> {
        let role = self.catalogs.roles.default_role()?.clone();
        let id = self.roster.add_person(
            role,
            self.catalogs.shared_tasks.list(),
            &self.person_name_prefix,
        );
        debug!("event=person_add module=service status=ok personnel_id={id}");
        Some(id)
    }

    /// Removes a person and every allocation that references them.
    pub fn remove_person(&mut self, id: PersonnelId) -> bool {
        if self.roster.remove_person(id).is_none() {
            return false;
        }
        let purged = purge_personnel(&mut self.burn_plan, id);
        debug!(
            "event=person_remove module=service status=ok personnel_id={id} purged_allocations={purged}"
        );
        true
    }

    /// Assigns a catalog role, overwriting the bill rate. Unknown ids are a no-op.
    pub fn change_role(&mut self, id: PersonnelId, role_id: &str) -> bool {
        let Some(role) = self.catalogs.roles.get(role_id) else {
            return false;
        };
        self.roster.change_role(id, role)
    }

    pub fn set_bill_rate(
        &mut self,
        id: PersonnelId,
        bill_rate: f64,
    ) -> Result<bool, ModelValidationError> {
        self.roster.set_bill_rate(id, bill_rate)
    }

    pub fn set_notes(&mut self, id: PersonnelId, notes: impl Into<String>) -> bool {
        self.roster.set_notes(id, notes)
    }

    pub fn rename_person(&mut self, id: PersonnelId, name: impl Into<String>) -> bool {
        self.roster.rename(id, name)
    }

    pub fn attach_task(
        &mut self,
        id: PersonnelId,
        task: &Task,
    ) -> Result<bool, ModelValidationError> {
        self.roster.attach_task(id, task)
    }

    pub fn attach_task_to_all(&mut self, task: &Task) -> Result<TaskId, ModelValidationError> {
        self.roster.attach_task_to_all(task)
    }

    /// Attaches a library task by id; unknown ids report `false`.
    pub fn attach_library_task(
        &mut self,
        id: PersonnelId,
        task_id: &TaskId,
    ) -> Result<bool, ModelValidationError> {
        match self.catalogs.library.get(task_id) {
            Some(task) => self.roster.attach_task(id, task),
            None => Ok(false),
        }
    }

    pub fn attach_library_task_to_all(
        &mut self,
        task_id: &TaskId,
    ) -> Result<Option<TaskId>, ModelValidationError> {
        match self.catalogs.library.get(task_id) {
            Some(task) => self.roster.attach_task_to_all(task).map(Some),
            None => Ok(None),
        }
    }

    /// Applies a catalog recipe to every person; returns tasks attached.
    ///
    /// Re-applying the same recipe attaches nothing new.
    pub fn apply_recipe(&mut self, recipe_id: &str) -> Result<usize, ModelValidationError> {
        let Some(recipe) = self.catalogs.recipes.get(recipe_id) else {
            return Ok(0);
        };
        let attached = self.roster.apply_recipe(recipe)?;
        info!(
            "event=recipe_apply module=service status=ok recipe_id={recipe_id} attached={attached}"
        );
        Ok(attached)
    }

    pub fn set_task_hours(
        &mut self,
        id: PersonnelId,
        task_id: &TaskId,
        hours: f64,
    ) -> Result<bool, ModelValidationError> {
        self.roster.set_task_hours(id, task_id, hours)
    }

    /// Removes one task from one person and that pair's allocations.
    pub fn remove_task(&mut self, id: PersonnelId, task_id: &TaskId) -> bool {
        if !self.roster.remove_task(id, task_id) {
            return false;
        }
        purge_personnel_task(&mut self.burn_plan, id, task_id);
        true
    }

    /// Removes a task id from everyone and every allocation keyed by it.
    pub fn remove_task_from_all(&mut self, task_id: &TaskId) -> usize {
        let removed = self.roster.remove_task_from_all(task_id);
        let purged = purge_task(&mut self.burn_plan, task_id);
        debug!(
            "event=task_remove_all module=service status=ok task_id={task_id} removed={removed} purged_allocations={purged}"
        );
        removed
    }

    /// Sets new plan bounds and regenerates weeks with positional carry-over.
    pub fn update_dates(&mut self, start_date: &str, end_date: &str) -> Regeneration {
        regenerate_weeks(&mut self.burn_plan, start_date, end_date)
    }

    /// Writes explicit hours for a task the person holds.
    ///
    /// Unknown people, tasks the person does not hold, and out-of-range
    /// weeks report `false` without writing anything.
    pub fn set_allocation(
        &mut self,
        week_index: usize,
        id: PersonnelId,
        task_id: &TaskId,
        hours: f64,
    ) -> Result<bool, ModelValidationError> {
        let holds_task = self
            .roster
            .get(id)
            .is_some_and(|person| person.has_task(task_id));
        if !holds_task {
            return Ok(false);
        }
        set_allocation(&mut self.burn_plan, week_index, id, task_id, hours)
    }

    /// Fans a per-week total for one person across their tasks.
    pub fn set_weekly_total(
        &mut self,
        week_index: usize,
        id: PersonnelId,
        hours: f64,
    ) -> Result<usize, ModelValidationError> {
        let Some(person) = self.roster.get(id) else {
            return Ok(0);
        };
        fan_out_weekly_total(&mut self.burn_plan, person, week_index, hours)
    }

    pub fn person_week_hours(&self, id: PersonnelId, week_index: usize) -> f64 {
        self.roster
            .get(id)
            .map_or(0.0, |person| person_week_hours(&self.burn_plan, person, week_index))
    }

    pub fn task_week_hours(&self, id: PersonnelId, task_id: &TaskId, week_index: usize) -> f64 {
        self.roster.get(id).map_or(0.0, |person| {
            task_week_hours(&self.burn_plan, person, task_id, week_index)
        })
    }

    pub fn cost_summary(&self) -> CostSummary {
        summarize(self.roster.personnel())
    }

    pub fn personnel_cost(&self, id: PersonnelId) -> f64 {
        personnel_cost(self.roster.personnel(), id)
    }

    pub fn role_breakdown(&self) -> Vec<RoleCostLine> {
        role_breakdown(self.roster.personnel())
    }

    pub fn allocation_summary(&self) -> AllocationSummary {
        allocation_summary(&self.burn_plan, self.roster.personnel())
    }

    /// Replaces roster and burn plan with `snapshot`.
    ///
    /// Duplicate allocation keys are merged (last hours win). On error the
    /// current state is left untouched.
    pub fn load(&mut self, mut snapshot: ProjectSnapshot) -> Result<(), ModelValidationError> {
        snapshot.validate()?;
        let merged = snapshot.merge_duplicate_allocations();
        self.roster = Roster::from_personnel(snapshot.personnel);
        self.burn_plan = snapshot.burn_plan;
        info!(
            "event=project_load module=service status=ok personnel={} weeks={} merged_allocations={merged}",
            self.roster.len(),
            self.burn_plan.week_count()
        );
        Ok(())
    }
}

/// Copies the named library tasks into the shared set attached to new people.
fn share_library_tasks(catalogs: &mut Catalogs, task_ids: &[String]) {
    for raw_id in task_ids {
        let task_id = TaskId::new(raw_id.as_str());
        let Some(task) = catalogs.library.get(&task_id).cloned() else {
            warn!(
                "event=shared_task_add module=service status=skip reason=unknown task_id={task_id}"
            );
            continue;
        };
        if let Err(err) = catalogs.shared_tasks.insert(task) {
            warn!("event=shared_task_add module=service status=skip task_id={task_id} error={err}");
        }
    }
}

//! Estimator command-line entry point.
//!
//! # Responsibility
//! - Expose calendar, cost and export operations over snapshot JSON files.
//! - Save, list and load projects in the configured database.
//! - Keep output deterministic for scripting and quick local checks.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use estimator_core::db::{open_configured_db, Connection};
use estimator_core::export::{build_workbook, format_currency, to_csv};
use estimator_core::{
    calendar, init_logging_from_config, Catalogs, EstimatorConfig, ProjectId, ProjectService,
    ProjectSnapshot, ProposalSession, SqliteProjectRepository, UserId,
};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "estimator", version, about = "Proposal cost estimator")]
struct Cli {
    /// TOML configuration file; defaults apply when it does not exist.
    #[arg(long, global = true, default_value = "estimator.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Prints core linkage information.
    Probe,
    /// Lists the week buckets between two `YYYY-MM-DD` dates.
    Weeks { start: String, end: String },
    /// Writes a fresh one-person project snapshot as JSON.
    New {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Prints cost and allocation figures for a snapshot file.
    Summary { project: PathBuf },
    /// Renders a snapshot file as burn plan and cost summary CSV.
    ExportCsv { project: PathBuf },
    /// Lists the built-in recipes with their total hours.
    Recipes,
    /// Stores a snapshot file as a saved project in the configured database.
    Save {
        #[arg(long)]
        user: String,
        #[arg(long)]
        name: String,
        project: PathBuf,
    },
    /// Lists saved projects, most recently updated first.
    List {
        #[arg(long)]
        user: String,
    },
    /// Writes a saved project's snapshot as JSON.
    Load {
        #[arg(long)]
        user: String,
        id: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = EstimatorConfig::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    init_logging_from_config(&config).context("initializing logging")?;

    match cli.command {
        Command::Probe => {
            println!("estimator_core ping={}", estimator_core::ping());
            println!("estimator_core version={}", estimator_core::core_version());
        }
        Command::Weeks { start, end } => {
            for (index, week) in calendar::generate_weeks(&start, &end).iter().enumerate() {
                println!(
                    "Week {}\t{}\t{}\t{} days",
                    index + 1,
                    week.start_date,
                    week.end_date,
                    week.day_count()
                );
            }
        }
        Command::New { output } => {
            let mut session = ProposalSession::new(Catalogs::seeded(), &config, today());
            session.start();
            let json = serde_json::to_string_pretty(&session.snapshot())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!("event=cli_new module=cli status=ok path={}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Summary { project } => {
            let session = load_session(&project, &config)?;
            let totals = session.cost_summary();
            for line in session.role_breakdown() {
                println!(
                    "{}\t{}\t{} h\t{}",
                    line.role_title,
                    format_currency(line.bill_rate),
                    line.hours,
                    format_currency(line.cost)
                );
            }
            println!("Total Cost\t{}", format_currency(totals.total_cost));
            println!("Base Cost\t{}", format_currency(totals.base_cost));
            println!("Profit\t{}", format_currency(totals.profit));
            let allocation = session.allocation_summary();
            println!(
                "Allocated\t{} of {} h ({:?})",
                allocation.allocated_hours, allocation.estimated_hours, allocation.status
            );
        }
        Command::ExportCsv { project } => {
            let snapshot = read_snapshot(&project)?;
            print!("{}", to_csv(&build_workbook(&snapshot))?);
        }
        Command::Recipes => {
            for recipe in Catalogs::seeded().recipes.list() {
                println!(
                    "{}\t{}\t{} tasks\t{} h",
                    recipe.id,
                    recipe.name,
                    recipe.tasks.len(),
                    recipe.total_hours()
                );
            }
        }
        Command::Save {
            user,
            name,
            project,
        } => {
            let conn = open_configured_db(&config).context("opening project database")?;
            let service = signed_in_service(&conn, &user)?;
            let session = load_session(&project, &config)?;
            let saved = service.save_project(&name, &session)?;
            println!("{}", saved.id);
        }
        Command::List { user } => {
            let conn = open_configured_db(&config).context("opening project database")?;
            let service = signed_in_service(&conn, &user)?;
            for project in service.list_projects()? {
                println!(
                    "{}\t{}\t{} people\t{} weeks",
                    project.id,
                    project.name,
                    project.snapshot.personnel.len(),
                    project.snapshot.burn_plan.week_count()
                );
            }
        }
        Command::Load { user, id, output } => {
            let conn = open_configured_db(&config).context("opening project database")?;
            let service = signed_in_service(&conn, &user)?;
            let id = ProjectId::parse_str(id.trim())
                .with_context(|| format!("invalid project id `{id}`"))?;
            let mut session = ProposalSession::new(Catalogs::seeded(), &config, today());
            service.load_project(id, &mut session)?;
            let json = serde_json::to_string_pretty(&session.snapshot())?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

fn today() -> chrono::NaiveDate {
    Local::now().date_naive()
}

fn signed_in_service<'conn>(
    conn: &'conn Connection,
    user: &str,
) -> Result<ProjectService<SqliteProjectRepository<'conn>>> {
    let identity = UserId::parse(user).context("user must not be blank")?;
    let repo = SqliteProjectRepository::try_new(conn)?;
    Ok(ProjectService::with_identity(repo, identity))
}

fn read_snapshot(path: &Path) -> Result<ProjectSnapshot> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let snapshot: ProjectSnapshot =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(snapshot)
}

fn load_session(path: &Path, config: &EstimatorConfig) -> Result<ProposalSession> {
    let mut session = ProposalSession::new(Catalogs::seeded(), config, today());
    session
        .load(read_snapshot(path)?)
        .with_context(|| format!("validating {}", path.display()))?;
    Ok(session)
}

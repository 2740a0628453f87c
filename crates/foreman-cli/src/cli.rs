//! Command-line interface definitions using clap.
//!
//! The CLI follows a parameter wrapper pattern: each subcommand has its own
//! clap `Args` struct which converts into the framework-free parameter
//! types from `foreman_core::params` via `From`. Argument parsing, help
//! text, and flag handling stay here; validation and business rules stay in
//! the core.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use foreman_core::{
    params::{CreateJob, ExportYear, LoadYear, UpdateJob},
    ArchiveList, Board, BoardError, JobList, JobStatus, LoadOutcome, MonthGrid, OperationStatus,
    Session, StatsView, TemplateList,
};
use jiff::civil::Date;

use crate::renderer::TerminalRenderer;

/// Job tracking board for small field-service crews
///
/// Foreman keeps a single board of jobs with per-job checklists, notes,
/// file attachments, a scheduling calendar, and year-end archives. All
/// state lives in one JSON document; every command except `login` requires
/// an active session.
#[derive(Parser)]
#[command(version, about, name = "foreman")]
pub struct Cli {
    /// Path to the board document. Defaults to
    /// $XDG_DATA_HOME/foreman/board.json
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Path to the session marker file. Defaults to
    /// $XDG_STATE_HOME/foreman/session
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Log in with the board passphrase
    Login(LoginArgs),
    /// Log out and clear the session
    Logout,
    /// Manage jobs
    #[command(alias = "j")]
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Manage the checklist template
    #[command(alias = "t")]
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Show a month of scheduled jobs
    #[command(alias = "cal")]
    Calendar(CalendarArgs),
    /// Export and re-import year-end archives
    Archive {
        #[command(subcommand)]
        command: ArchiveCommands,
    },
    /// Show job counts by status
    Stats,
}

#[derive(Args)]
pub struct LoginArgs {
    /// The board passphrase
    pub passphrase: String,
}

// ============================================================================
// Job commands
// ============================================================================

/// Command-line representation of a job status
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum JobStatusArg {
    Pending,
    InProgress,
    Completed,
}

impl From<JobStatusArg> for JobStatus {
    fn from(val: JobStatusArg) -> Self {
        match val {
            JobStatusArg::Pending => JobStatus::Pending,
            JobStatusArg::InProgress => JobStatus::InProgress,
            JobStatusArg::Completed => JobStatus::Completed,
        }
    }
}

/// Create a new job
#[derive(Args)]
pub struct AddJobArgs {
    /// Customer or site name
    pub name: String,
    /// Job site address
    pub address: String,
    /// Contact person
    #[arg(long)]
    pub contact_name: Option<String>,
    /// Contact phone number
    #[arg(long)]
    pub contact_phone: Option<String>,
    /// Contact email
    #[arg(long)]
    pub contact_email: Option<String>,
    /// Scheduled date (YYYY-MM-DD)
    #[arg(short = 'd', long)]
    pub date: Option<Date>,
    /// Initial status
    #[arg(short, long, value_enum, default_value = "pending")]
    pub status: JobStatusArg,
}

impl From<AddJobArgs> for CreateJob {
    fn from(val: AddJobArgs) -> Self {
        CreateJob {
            name: val.name,
            address: val.address,
            contact_name: val.contact_name,
            contact_phone: val.contact_phone,
            contact_email: val.contact_email,
            scheduled_date: val.date,
            status: val.status.into(),
        }
    }
}

/// List jobs, optionally filtered by a search term
#[derive(Args)]
pub struct ListJobsArgs {
    /// Case-insensitive substring matched against name, address, and
    /// contact name
    pub search: Option<String>,
}

/// Show full details of one job
#[derive(Args)]
pub struct ShowJobArgs {
    /// Id of the job to show
    pub id: String,
}

/// Edit fields of an existing job
#[derive(Args)]
pub struct EditJobArgs {
    /// Id of the job to edit
    pub id: String,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New address
    #[arg(long)]
    pub address: Option<String>,
    /// New contact person
    #[arg(long)]
    pub contact_name: Option<String>,
    /// New contact phone number
    #[arg(long)]
    pub contact_phone: Option<String>,
    /// New contact email
    #[arg(long)]
    pub contact_email: Option<String>,
    /// New scheduled date (YYYY-MM-DD)
    #[arg(short = 'd', long)]
    pub date: Option<Date>,
    /// New status
    #[arg(short, long, value_enum)]
    pub status: Option<JobStatusArg>,
}

impl From<EditJobArgs> for UpdateJob {
    fn from(val: EditJobArgs) -> Self {
        UpdateJob {
            id: val.id,
            name: val.name,
            address: val.address,
            contact_name: val.contact_name,
            contact_phone: val.contact_phone,
            contact_email: val.contact_email,
            scheduled_date: val.date,
            status: val.status.map(Into::into),
        }
    }
}

/// Delete a job permanently
#[derive(Args)]
pub struct DeleteJobArgs {
    /// Id of the job to delete
    pub id: String,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// Toggle a job between completed and in-progress
#[derive(Args)]
pub struct CompleteJobArgs {
    /// Id of the job to toggle
    pub id: String,
}

/// Toggle one checklist item on a job
#[derive(Args)]
pub struct CheckItemArgs {
    /// Id of the job
    pub id: String,
    /// 0-based position of the checklist item
    pub index: usize,
}

/// Replace a job's notes
#[derive(Args)]
pub struct NotesArgs {
    /// Id of the job
    pub id: String,
    /// The new notes text
    pub text: String,
}

/// Attach files to a job
#[derive(Args)]
pub struct AttachArgs {
    /// Id of the job
    pub id: String,
    /// Paths of the files to attach
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum JobCommands {
    /// Create a new job
    #[command(alias = "a")]
    Add(AddJobArgs),
    /// List jobs, optionally filtered by a search term
    #[command(aliases = ["l", "ls"])]
    List(ListJobsArgs),
    /// Show full details of one job
    #[command(alias = "s")]
    Show(ShowJobArgs),
    /// Edit fields of an existing job
    #[command(alias = "e")]
    Edit(EditJobArgs),
    /// Delete a job permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteJobArgs),
    /// Toggle a job between completed and in-progress
    #[command(alias = "c")]
    Complete(CompleteJobArgs),
    /// Toggle one checklist item on a job
    Check(CheckItemArgs),
    /// Replace a job's notes
    Notes(NotesArgs),
    /// Attach files to a job
    Attach(AttachArgs),
}

// ============================================================================
// Template commands
// ============================================================================

/// Set the text of a template item
#[derive(Args)]
pub struct EditTemplateArgs {
    /// 0-based position of the item
    pub index: usize,
    /// The new text
    pub text: String,
}

/// Remove a template item
#[derive(Args)]
pub struct RemoveTemplateArgs {
    /// 0-based position of the item
    pub index: usize,
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Show the current template
    #[command(aliases = ["l", "ls"])]
    List,
    /// Append a placeholder item
    #[command(alias = "a")]
    Add,
    /// Set the text of an item
    #[command(alias = "e")]
    Edit(EditTemplateArgs),
    /// Remove an item
    #[command(alias = "rm")]
    Remove(RemoveTemplateArgs),
    /// Save the template, dropping blank items
    #[command(alias = "s")]
    Save,
}

// ============================================================================
// Calendar and archive commands
// ============================================================================

/// Show a month of scheduled jobs
#[derive(Args)]
pub struct CalendarArgs {
    /// Year to show (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i16>,
    /// Month to show, 1-12 (defaults to the current month)
    #[arg(short, long)]
    pub month: Option<i8>,
    /// Shift the shown month forward by N months
    #[arg(long, conflicts_with = "prev")]
    pub next: Option<u16>,
    /// Shift the shown month backward by N months
    #[arg(long)]
    pub prev: Option<u16>,
}

/// Archive a year's jobs and write the export artifact
#[derive(Args)]
pub struct ExportArgs {
    /// Year to export (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<String>,
    /// Directory to write the export file into (defaults to the current
    /// directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl From<&ExportArgs> for ExportYear {
    fn from(val: &ExportArgs) -> Self {
        ExportYear {
            year: val.year.clone(),
        }
    }
}

/// Re-import an archived year as new pending jobs
#[derive(Args)]
pub struct LoadArgs {
    /// The archived year to load
    pub year: String,
    /// Confirm the import
    #[arg(long)]
    pub confirm: bool,
}

impl From<LoadArgs> for LoadYear {
    fn from(val: LoadArgs) -> Self {
        LoadYear {
            year: val.year,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum ArchiveCommands {
    /// Archive a year's jobs and write the export artifact
    #[command(alias = "e")]
    Export(ExportArgs),
    /// Re-import an archived year as new pending jobs
    #[command(alias = "l")]
    Load(LoadArgs),
    /// Show archived years and their job counts
    #[command(alias = "ls")]
    List,
}

// ============================================================================
// Command handler
// ============================================================================

/// Executes parsed commands against the board and renders the results.
pub struct CommandHandler {
    board: Board,
    session: Session,
    renderer: TerminalRenderer,
}

impl CommandHandler {
    pub fn new(board: Board, session: Session, renderer: TerminalRenderer) -> Self {
        Self {
            board,
            session,
            renderer,
        }
    }

    pub fn login(&self, args: LoginArgs) -> Result<()> {
        self.session.login(&args.passphrase)?;
        self.renderer
            .render(&OperationStatus::success("Logged in.".to_string()).to_string())
    }

    pub fn logout(&self) -> Result<()> {
        self.session.logout()?;
        self.renderer
            .render(&OperationStatus::success("Logged out.".to_string()).to_string())
    }

    /// Everything except login runs through this gate.
    pub fn require_session(&self) -> Result<()> {
        self.session.require()?;
        Ok(())
    }

    pub async fn handle_job_command(&mut self, command: JobCommands) -> Result<()> {
        match command {
            JobCommands::Add(args) => {
                let job = self.board.create_job(&args.into())?;
                self.renderer.render(
                    &OperationStatus::success(format!("Created job {}", job.id)).to_string(),
                )?;
                self.renderer.render(&job.to_string())
            }
            JobCommands::List(args) => {
                let term = args.search.unwrap_or_default();
                let jobs = self.board.filter_jobs(&term);
                let title = if term.is_empty() {
                    "Jobs".to_string()
                } else {
                    format!("Jobs matching '{term}'")
                };
                self.renderer
                    .render(&JobList::with_title(&jobs, &title).to_string())
            }
            JobCommands::Show(args) => {
                let job = self
                    .board
                    .get_job(&args.id)
                    .ok_or(BoardError::JobNotFound { id: args.id })?;
                self.renderer.render(&job.to_string())
            }
            JobCommands::Edit(args) => {
                let job = self.board.update_job(&args.into())?;
                self.renderer.render(
                    &OperationStatus::success(format!("Updated job {}", job.id)).to_string(),
                )?;
                self.renderer.render(&job.to_string())
            }
            JobCommands::Delete(args) => {
                if !args.confirm {
                    return self.renderer.render(
                        &OperationStatus::failure(format!(
                            "This permanently deletes job {}. Re-run with --confirm.",
                            args.id
                        ))
                        .to_string(),
                    );
                }
                let message = if self.board.delete_job(&args.id)? {
                    format!("Deleted job {}", args.id)
                } else {
                    format!("No job {} on the board; nothing to delete", args.id)
                };
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
            JobCommands::Complete(args) => {
                let job = self.board.toggle_complete(&args.id)?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Job {} is now {}",
                        job.id,
                        job.status.label()
                    ))
                    .to_string(),
                )
            }
            JobCommands::Check(args) => {
                let outcome = self.board.toggle_checklist_item(&args.id, args.index)?;
                let state = if outcome.checked { "checked" } else { "unchecked" };
                self.renderer.render(
                    &OperationStatus::success(format!("Item {} {state}", args.index)).to_string(),
                )?;
                if outcome.advise_complete {
                    self.renderer.render(
                        "All checklist items are done. Consider `foreman job complete`.\n",
                    )?;
                }
                Ok(())
            }
            JobCommands::Notes(args) => {
                self.board.set_notes(&args.id, &args.text)?;
                self.renderer.render(
                    &OperationStatus::success(format!("Notes updated for job {}", args.id))
                        .to_string(),
                )
            }
            JobCommands::Attach(args) => {
                let outcome = self.board.attach_files(&args.id, args.paths).await?;
                for name in &outcome.added {
                    self.renderer.render(
                        &OperationStatus::success(format!("Attached {name}")).to_string(),
                    )?;
                }
                for (path, reason) in &outcome.failed {
                    self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Could not read {}: {reason}",
                            path.display()
                        ))
                        .to_string(),
                    )?;
                }
                Ok(())
            }
        }
    }

    pub fn handle_template_command(&mut self, command: TemplateCommands) -> Result<()> {
        match command {
            TemplateCommands::List => self
                .renderer
                .render(&TemplateList::new(self.board.template()).to_string()),
            TemplateCommands::Add => {
                let item = self.board.add_template_item()?;
                self.renderer.render(
                    &OperationStatus::success(format!("Added template item '{}'", item.text))
                        .to_string(),
                )
            }
            TemplateCommands::Edit(args) => {
                self.board.update_template_item(args.index, &args.text)?;
                self.renderer.render(
                    &OperationStatus::success(format!("Template item {} updated", args.index))
                        .to_string(),
                )
            }
            TemplateCommands::Remove(args) => {
                let removed = self.board.remove_template_item(args.index)?;
                self.renderer.render(
                    &OperationStatus::success(format!("Removed '{}'", removed.text)).to_string(),
                )
            }
            TemplateCommands::Save => {
                let dropped = self.board.save_template()?;
                let message = if dropped == 0 {
                    "Template saved.".to_string()
                } else {
                    format!("Template saved; {dropped} blank item(s) dropped.")
                };
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
        }
    }

    pub fn handle_calendar(&self, args: CalendarArgs) -> Result<()> {
        let today = jiff::Zoned::now().date();
        let year = args.year.unwrap_or_else(|| today.year());
        let month = args.month.unwrap_or_else(|| today.month());
        let offset =
            i32::from(args.next.unwrap_or(0)) - i32::from(args.prev.unwrap_or(0));
        let (year, month) = MonthGrid::shift(year, month, offset);
        let grid = MonthGrid::build(year, month, self.board.jobs())?;
        self.renderer.render(&grid.to_string())
    }

    pub fn handle_archive_command(&mut self, command: ArchiveCommands) -> Result<()> {
        match command {
            ArchiveCommands::Export(args) => {
                let outcome = self.board.export_year(&ExportYear::from(&args))?;
                let dir = args.output.unwrap_or_else(|| PathBuf::from("."));
                let path = dir.join(format!("foreman-jobs-{}.json", outcome.year));
                let body = serde_json::to_string_pretty(&outcome.jobs)?;
                std::fs::write(&path, body)?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Archived {} job(s) for {} and wrote {}",
                        outcome.jobs.len(),
                        outcome.year,
                        path.display()
                    ))
                    .to_string(),
                )
            }
            ArchiveCommands::Load(args) => {
                match self.board.load_archive_year(&args.into())? {
                    LoadOutcome::NeedsConfirmation { year, count } => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "This loads {count} job(s) from {year} as new pending jobs. \
                             Re-run with --confirm."
                        ))
                        .to_string(),
                    ),
                    LoadOutcome::Loaded { year, count } => self.renderer.render(
                        &OperationStatus::success(format!(
                            "Loaded {count} job(s) from {year} as new pending jobs"
                        ))
                        .to_string(),
                    ),
                }
            }
            ArchiveCommands::List => self
                .renderer
                .render(&ArchiveList::new(self.board.archive_years()).to_string()),
        }
    }

    pub fn handle_stats(&self) -> Result<()> {
        self.renderer
            .render(&StatsView(self.board.stats()).to_string())
    }
}

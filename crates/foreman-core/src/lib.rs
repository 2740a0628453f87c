//! Core library for the Foreman job tracking application.
//!
//! This crate provides the business logic for a single-tenant field-service
//! job board: the job and checklist data model, the single-document JSON
//! store, the board state container with its mutation operations, the
//! calendar grid, and the passphrase session gate.
//!
//! # Display Architecture
//!
//! Output formatting follows a Display-based architecture:
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for
//!   direct formatting
//! - **Display Wrappers** ([`display`]): Provide contextual formatting for
//!   lists, stats, and operation results
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! # Quick Start
//!
//! ```rust
//! use foreman_core::{Board, JsonStore, params::CreateJob};
//!
//! # fn example() -> foreman_core::Result<()> {
//! let store = JsonStore::new("board.json");
//! let mut board = Board::open(store)?;
//!
//! let params = CreateJob {
//!     name: "Fence repair".to_string(),
//!     address: "12 Elm St".to_string(),
//!     ..CreateJob::default()
//! };
//! let job = board.create_job(&params)?;
//! println!("Created job: {}", job);
//!
//! for summary in board.filter_jobs("") {
//!     println!("{}", summary.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod calendar;
pub mod display;
pub mod error;
pub mod ids;
pub mod models;
pub mod params;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use board::{
    AttachOutcome, Board, BoardStats, ExportOutcome, LoadOutcome, ToggleOutcome,
};
pub use calendar::MonthGrid;
pub use display::{ArchiveList, JobList, OperationStatus, StatsView, TemplateList};
pub use error::{BoardError, Result};
pub use models::{ChecklistItem, FileAttachment, Job, JobStatus, JobSummary};
pub use params::{CreateJob, ExportYear, LoadYear, UpdateJob};
pub use session::Session;
pub use store::{BoardData, JsonStore};

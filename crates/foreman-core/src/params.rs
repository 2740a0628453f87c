//! Parameter structures for board operations.
//!
//! Shared parameter types used by the CLI (and any future interface)
//! without framework-specific derives. The CLI defines clap wrapper structs
//! and converts into these via `From` implementations, keeping the core
//! free of argument-parsing concerns.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{BoardError, Result},
    models::JobStatus,
};

/// Parameters for creating a new job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateJob {
    /// Customer or site name (required, non-empty)
    pub name: String,
    /// Job site address (required, non-empty)
    pub address: String,
    /// Optional contact person
    pub contact_name: Option<String>,
    /// Optional contact phone number
    pub contact_phone: Option<String>,
    /// Optional contact email
    pub contact_email: Option<String>,
    /// Optional scheduled date
    pub scheduled_date: Option<Date>,
    /// Initial status; the caller chooses, nothing is forced
    #[serde(default)]
    pub status: JobStatus,
}

impl CreateJob {
    /// Validate the required fields. Whitespace-only values count as blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BoardError::invalid_input("name").with_reason("must not be empty"));
        }
        if self.address.trim().is_empty() {
            return Err(BoardError::invalid_input("address").with_reason("must not be empty"));
        }
        Ok(())
    }
}

/// Parameters for editing an existing job.
///
/// `None` fields are left untouched; the merge never touches the checklist,
/// files, or creation timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJob {
    /// Id of the job to edit
    pub id: String,
    /// New name, if changing
    pub name: Option<String>,
    /// New address, if changing
    pub address: Option<String>,
    /// New contact person, if changing
    pub contact_name: Option<String>,
    /// New contact phone, if changing
    pub contact_phone: Option<String>,
    /// New contact email, if changing
    pub contact_email: Option<String>,
    /// New scheduled date, if changing
    pub scheduled_date: Option<Date>,
    /// New status, if changing
    pub status: Option<JobStatus>,
}

impl UpdateJob {
    /// Validate that required fields, when supplied, remain non-empty.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(BoardError::invalid_input("name").with_reason("must not be empty"));
            }
        }
        if let Some(address) = &self.address {
            if address.trim().is_empty() {
                return Err(BoardError::invalid_input("address").with_reason("must not be empty"));
            }
        }
        Ok(())
    }
}

/// Parameters for exporting a year of jobs into the archive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportYear {
    /// Year to export; `None` means the current year
    pub year: Option<String>,
}

/// Parameters for loading an archived year back onto the board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadYear {
    /// Archive year to load
    pub year: String,
    /// Whether the caller has confirmed the destructive-count disclosure
    #[serde(default)]
    pub confirmed: bool,
}

//! Data models for jobs, checklists, and file attachments.
//!
//! This module contains the core domain records of the job board. They are
//! plain data: all behavior lives in the [`crate::board`] state container.
//! Each record derives `Serialize`/`Deserialize` because the whole board is
//! persisted as one JSON document, and the persisted key style is camelCase
//! to match the on-disk document format.
//!
//! # Display
//!
//! The models implement [`std::fmt::Display`] for direct markdown formatting
//! (a full job card with checklist and files), while list-oriented wrappers
//! live in [`crate::display`]. The same data renders differently depending on
//! context: a `Job` prints its full detail view, a [`JobSummary`] prints the
//! compact list row with checklist progress.

use std::{fmt, str::FromStr};

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use crate::ids::new_id;

/// Checklist item texts applied to newly created jobs when no custom
/// template has been saved yet.
pub const DEFAULT_TEMPLATE: [&str; 4] = [
    "Contact customer",
    "Load paint",
    "Do job",
    "Contact customer to confirm job",
];

/// Build the default checklist template with fresh item ids.
pub fn default_template() -> Vec<ChecklistItem> {
    DEFAULT_TEMPLATE
        .iter()
        .copied()
        .map(ChecklistItem::new)
        .collect()
}

/// Type-safe enumeration of job statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    /// Job is waiting to be started
    #[default]
    Pending,

    /// Job is actively being worked on
    InProgress,

    /// Job is done
    Completed,
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(JobStatus::Pending),
            "in-progress" | "inprogress" | "in_progress" => Ok(JobStatus::InProgress),
            "completed" => Ok(JobStatus::Completed),
            _ => Err(format!("Invalid job status: {s}")),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl JobStatus {
    /// Convert to the persisted string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in-progress",
            JobStatus::Completed => "completed",
        }
    }

    /// Human-readable label ("In Progress" rather than "in-progress").
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::InProgress => "In Progress",
            JobStatus::Completed => "Completed",
        }
    }

    /// Fixed precedence used as the secondary sort key in list views:
    /// in-progress jobs sort first, completed jobs last. This is a display
    /// policy only; storage order stays insertion order.
    pub fn precedence(&self) -> u8 {
        match self {
            JobStatus::InProgress => 0,
            JobStatus::Pending => 1,
            JobStatus::Completed => 2,
        }
    }
}

/// One entry of a job checklist (or of the global template).
///
/// Items are copied from the template into a job at creation time with fresh
/// ids; the copies are decoupled from the template thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    /// Unique identifier, distinct from the template item it was copied from
    pub id: String,

    /// Item text
    pub text: String,

    /// Whether the item has been ticked off
    #[serde(default)]
    pub checked: bool,
}

impl ChecklistItem {
    /// Create a new unchecked item with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            checked: false,
        }
    }

    /// Copy this item with a fresh id and `checked` reset to false.
    ///
    /// Used both when snapshotting the template into a new job and when
    /// re-importing archived jobs.
    pub fn fresh_copy(&self) -> Self {
        Self {
            id: new_id(),
            text: self.text.clone(),
            checked: false,
        }
    }
}

/// A file attached to a job, stored inline in the persisted document.
///
/// Content is base64-encoded and lives in the same JSON blob as everything
/// else, so the document can grow without bound. That is a known scaling
/// limit of the single-document design, not a bug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    /// Unique identifier for the attachment
    pub id: String,

    /// Original file name
    pub name: String,

    /// Media type guessed from the file extension
    #[serde(rename = "type")]
    pub media_type: String,

    /// Base64-encoded file content
    pub data: String,

    /// Timestamp when the file was attached (UTC)
    pub uploaded_at: Timestamp,
}

/// Guess a media type from a file name extension.
///
/// Matches the small table the board cares about: images render inline,
/// PDFs open in a viewer, everything else is an opaque document.
pub fn media_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit('.')
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// A unit of work: customer, address, schedule, checklist, notes, files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Opaque unique identifier, generated at creation, never reused
    pub id: String,

    /// Customer or site name (required, non-empty)
    pub name: String,

    /// Job site address (required, non-empty)
    pub address: String,

    /// Optional contact person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,

    /// Optional contact phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    /// Optional contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    /// Scheduled calendar date (date only, no time zone semantics)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<Date>,

    /// Current status
    #[serde(default)]
    pub status: JobStatus,

    /// Per-job checklist, snapshotted from the template at creation
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,

    /// Attached files, in completion order of their uploads
    #[serde(default)]
    pub files: Vec<FileAttachment>,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Creation timestamp (UTC). Optional only so documents written before
    /// the field existed still deserialize; export treats a missing value
    /// as belonging to the current year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Job {
    /// Count of checked vs total checklist items.
    pub fn checklist_progress(&self) -> ChecklistProgress {
        let total = self.checklist.len();
        let completed = self.checklist.iter().filter(|i| i.checked).count();
        ChecklistProgress { completed, total }
    }

    /// Whether every checklist item is checked (false for an empty list).
    pub fn checklist_complete(&self) -> bool {
        !self.checklist.is_empty() && self.checklist.iter().all(|i| i.checked)
    }

    /// Deep copy with the file payloads stripped, for archiving.
    pub fn without_files(&self) -> Self {
        Self {
            files: Vec::new(),
            ..self.clone()
        }
    }

    /// Re-import copy: new id, fresh unchecked checklist item ids, status
    /// forced back to pending. Used when loading an archived year.
    pub fn as_imported(&self) -> Self {
        Self {
            id: new_id(),
            checklist: self.checklist.iter().map(ChecklistItem::fresh_copy).collect(),
            status: JobStatus::Pending,
            ..self.clone()
        }
    }
}

/// Checklist completion counts for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistProgress {
    /// Number of checked items
    pub completed: usize,
    /// Total number of items
    pub total: usize,
}

impl ChecklistProgress {
    /// Completion percentage, rounded; 0 for an empty checklist.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Compact list-row information about a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    /// Job id
    pub id: String,
    /// Customer or site name
    pub name: String,
    /// Job site address
    pub address: String,
    /// Current status
    pub status: JobStatus,
    /// Scheduled date, if any
    pub scheduled_date: Option<Date>,
    /// Contact person, if any
    pub contact_name: Option<String>,
    /// Number of attached files
    pub file_count: usize,
    /// Checked checklist items
    pub completed_items: usize,
    /// Total checklist items
    pub total_items: usize,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        let progress = job.checklist_progress();
        Self {
            id: job.id.clone(),
            name: job.name.clone(),
            address: job.address.clone(),
            status: job.status,
            scheduled_date: job.scheduled_date,
            contact_name: job.contact_name.clone(),
            file_count: job.files.len(),
            completed_items: progress.completed,
            total_items: progress.total,
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} ({})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- Address: {}", self.address)?;
        writeln!(f, "- Status: {}", self.status.label())?;
        if let Some(date) = self.scheduled_date {
            writeln!(f, "- Scheduled: {date}")?;
        }
        if let Some(contact) = &self.contact_name {
            writeln!(f, "- Contact: {contact}")?;
        }
        if let Some(phone) = &self.contact_phone {
            writeln!(f, "- Phone: {phone}")?;
        }
        if let Some(email) = &self.contact_email {
            writeln!(f, "- Email: {email}")?;
        }
        if let Some(created) = &self.created_at {
            writeln!(f, "- Created: {created}")?;
        }

        if self.checklist.is_empty() {
            writeln!(f, "\nNo checklist items.")?;
        } else {
            writeln!(f, "\n## Checklist")?;
            writeln!(f)?;
            for (index, item) in self.checklist.iter().enumerate() {
                let mark = if item.checked { "x" } else { " " };
                writeln!(f, "{index}. [{mark}] {}", item.text)?;
            }
        }

        if !self.files.is_empty() {
            writeln!(f, "\n## Files")?;
            writeln!(f)?;
            for file in &self.files {
                writeln!(f, "- {} ({})", file.name, file.media_type)?;
            }
        }

        if !self.notes.is_empty() {
            writeln!(f, "\n## Notes")?;
            writeln!(f)?;
            writeln!(f, "{}", self.notes)?;
        }

        Ok(())
    }
}

impl fmt::Display for JobSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_items > 0 {
            format!(" ({}/{})", self.completed_items, self.total_items)
        } else {
            String::new()
        };

        writeln!(f, "## {} ({}){progress}", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Address**: {}", self.address)?;
        writeln!(f, "- **Status**: {}", self.status.label())?;
        if let Some(date) = self.scheduled_date {
            writeln!(f, "- **Scheduled**: {date}")?;
        }
        if let Some(contact) = &self.contact_name {
            writeln!(f, "- **Contact**: {contact}")?;
        }
        if self.file_count > 0 {
            let plural = if self.file_count > 1 { "s" } else { "" };
            writeln!(f, "- **Files**: {} file{plural}", self.file_count)?;
        }
        writeln!(f)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> Job {
        Job {
            id: new_id(),
            name: "Main St resurfacing".to_string(),
            address: "100 Main St".to_string(),
            contact_name: Some("Dana".to_string()),
            contact_phone: None,
            contact_email: None,
            scheduled_date: Some(Date::constant(2025, 3, 10)),
            status: JobStatus::Pending,
            checklist: default_template(),
            files: Vec::new(),
            notes: String::new(),
            created_at: Some(Timestamp::from_second(1_740_000_000).unwrap()),
        }
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [JobStatus::Pending, JobStatus::InProgress, JobStatus::Completed] {
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
        }
        assert!("paused".parse::<JobStatus>().is_err());
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn status_precedence_orders_in_progress_first() {
        assert!(JobStatus::InProgress.precedence() < JobStatus::Pending.precedence());
        assert!(JobStatus::Pending.precedence() < JobStatus::Completed.precedence());
    }

    #[test]
    fn default_template_has_fresh_ids() {
        let a = default_template();
        let b = default_template();
        assert_eq!(a.len(), 4);
        assert_ne!(a[0].id, b[0].id);
        assert!(a.iter().all(|item| !item.checked));
        let texts: Vec<&str> = a.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, DEFAULT_TEMPLATE);
    }

    #[test]
    fn fresh_copy_resets_checked_and_id() {
        let mut item = ChecklistItem::new("Load paint");
        item.checked = true;
        let copy = item.fresh_copy();
        assert_eq!(copy.text, item.text);
        assert_ne!(copy.id, item.id);
        assert!(!copy.checked);
    }

    #[test]
    fn media_type_table_matches_extensions() {
        assert_eq!(media_type_for("site.JPG"), "image/jpeg");
        assert_eq!(media_type_for("plan.pdf"), "application/pdf");
        assert_eq!(media_type_for("notes.txt"), "application/octet-stream");
        assert_eq!(media_type_for("no_extension"), "application/octet-stream");
    }

    #[test]
    fn checklist_progress_counts_and_percent() {
        let mut job = sample_job();
        assert_eq!(job.checklist_progress().percent(), 0);
        job.checklist[0].checked = true;
        job.checklist[1].checked = true;
        let progress = job.checklist_progress();
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.percent(), 50);
        assert!(!job.checklist_complete());
    }

    #[test]
    fn empty_checklist_is_never_complete() {
        let mut job = sample_job();
        job.checklist.clear();
        assert!(!job.checklist_complete());
        assert_eq!(job.checklist_progress().percent(), 0);
    }

    #[test]
    fn without_files_strips_payloads_only() {
        let mut job = sample_job();
        job.files.push(FileAttachment {
            id: new_id(),
            name: "site.png".to_string(),
            media_type: "image/png".to_string(),
            data: "aGVsbG8=".to_string(),
            uploaded_at: Timestamp::from_second(1_740_000_000).unwrap(),
        });
        let stripped = job.without_files();
        assert!(stripped.files.is_empty());
        assert_eq!(stripped.id, job.id);
        assert_eq!(stripped.checklist, job.checklist);
    }

    #[test]
    fn as_imported_resets_status_and_regenerates_ids() {
        let mut job = sample_job();
        job.status = JobStatus::Completed;
        for item in &mut job.checklist {
            item.checked = true;
        }
        let imported = job.as_imported();
        assert_ne!(imported.id, job.id);
        assert_eq!(imported.status, JobStatus::Pending);
        assert_eq!(imported.checklist.len(), job.checklist.len());
        for (new_item, old_item) in imported.checklist.iter().zip(&job.checklist) {
            assert_eq!(new_item.text, old_item.text);
            assert_ne!(new_item.id, old_item.id);
            assert!(!new_item.checked);
        }
    }

    #[test]
    fn job_serializes_with_camel_case_keys() {
        let job = sample_job();
        let json = serde_json::to_value(&job).unwrap();
        assert!(json.get("contactName").is_some());
        assert!(json.get("scheduledDate").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["scheduledDate"], "2025-03-10");
    }

    #[test]
    fn job_display_includes_checklist_and_metadata() {
        let job = sample_job();
        let output = format!("{job}");
        assert!(output.contains("# Main St resurfacing"));
        assert!(output.contains("- Address: 100 Main St"));
        assert!(output.contains("- Scheduled: 2025-03-10"));
        assert!(output.contains("## Checklist"));
        assert!(output.contains("0. [ ] Contact customer"));
    }

    #[test]
    fn summary_display_shows_progress() {
        let mut job = sample_job();
        job.checklist[0].checked = true;
        let summary = JobSummary::from(&job);
        let output = format!("{summary}");
        assert!(output.contains("(1/4)"));
        assert!(output.contains("- **Status**: Pending"));
    }
}

//! Display wrapper types for formatting different contexts.
//!
//! Presentation stays out of the domain models where the context matters:
//! the same jobs render differently in a list, in a stats strip, or in an
//! operation confirmation. Every wrapper produces markdown, which the CLI
//! feeds through its terminal renderer.
//!
//! - [`JobList`]: a collection of job summaries, with an optional title
//! - [`TemplateList`]: the checklist template as a numbered list
//! - [`ArchiveList`]: archived years and their job counts
//! - [`StatsView`]: job counts by status
//! - [`OperationStatus`]: success/failure confirmations

use std::fmt;

use crate::board::BoardStats;
use crate::models::{ChecklistItem, JobSummary};

/// Wrapper type for displaying a collection of job summaries.
///
/// # Examples
///
/// ```rust
/// use foreman_core::display::JobList;
/// use foreman_core::models::{Job, JobSummary};
///
/// let job = Job {
///     id: "a1b2".to_string(),
///     name: "Fence repair".to_string(),
///     address: "12 Elm St".to_string(),
///     ..Job::default()
/// };
/// let summaries = vec![JobSummary::from(&job)];
/// let list = JobList::with_title(&summaries, "All Jobs");
/// assert!(format!("{list}").contains("Fence repair"));
/// ```
pub struct JobList<'a> {
    jobs: &'a [JobSummary],
    title: Option<&'a str>,
}

impl<'a> JobList<'a> {
    /// Create a new JobList wrapper.
    pub fn new(jobs: &'a [JobSummary]) -> Self {
        Self { jobs, title: None }
    }

    /// Create a JobList with a title header.
    pub fn with_title(jobs: &'a [JobSummary], title: &'a str) -> Self {
        Self {
            jobs,
            title: Some(title),
        }
    }
}

impl fmt::Display for JobList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = self.title {
            writeln!(f, "# {title}")?;
            writeln!(f)?;
        }

        if self.jobs.is_empty() {
            writeln!(f, "No jobs found.")?;
            return Ok(());
        }

        for job in self.jobs {
            write!(f, "{job}")?;
        }

        Ok(())
    }
}

/// The checklist template as a numbered list.
pub struct TemplateList<'a> {
    items: &'a [ChecklistItem],
}

impl<'a> TemplateList<'a> {
    pub fn new(items: &'a [ChecklistItem]) -> Self {
        Self { items }
    }
}

impl fmt::Display for TemplateList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Checklist Template")?;
        writeln!(f)?;
        if self.items.is_empty() {
            writeln!(f, "The template is empty.")?;
            return Ok(());
        }
        for (index, item) in self.items.iter().enumerate() {
            writeln!(f, "{}. {}", index, item.text)?;
        }
        Ok(())
    }
}

/// Archived years with their job counts.
pub struct ArchiveList {
    years: Vec<(String, usize)>,
}

impl ArchiveList {
    pub fn new(years: Vec<(String, usize)>) -> Self {
        Self { years }
    }
}

impl fmt::Display for ArchiveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Archived Years")?;
        writeln!(f)?;
        if self.years.is_empty() {
            writeln!(f, "No archives yet.")?;
            return Ok(());
        }
        for (year, count) in &self.years {
            let noun = if *count == 1 { "job" } else { "jobs" };
            writeln!(f, "* **{year}**: {count} {noun}")?;
        }
        Ok(())
    }
}

/// Job counts by status.
pub struct StatsView(pub BoardStats);

impl fmt::Display for StatsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Board")?;
        writeln!(f)?;
        writeln!(f, "* **Total**: {}", self.0.total)?;
        writeln!(f, "* **Pending**: {}", self.0.pending)?;
        writeln!(f, "* **In Progress**: {}", self.0.in_progress)?;
        writeln!(f, "* **Completed**: {}", self.0.completed)?;
        Ok(())
    }
}

/// Success or failure confirmation for an operation.
///
/// # Examples
///
/// ```rust
/// use foreman_core::display::OperationStatus;
///
/// let ok = OperationStatus::success("Job deleted".to_string());
/// assert!(format!("{ok}").contains("Job deleted"));
/// ```
pub struct OperationStatus {
    message: String,
    success: bool,
}

impl OperationStatus {
    /// Create a success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            writeln!(f, "{}", self.message)
        } else {
            writeln!(f, "**Error:** {}", self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    #[test]
    fn empty_list_has_placeholder() {
        let list = JobList::new(&[]);
        assert!(list.to_string().contains("No jobs found."));
    }

    #[test]
    fn titled_list_renders_header_and_entries() {
        let job = Job {
            id: "j1".to_string(),
            name: "Gutter clean".to_string(),
            address: "4 Oak Ave".to_string(),
            ..Job::default()
        };
        let summaries = vec![JobSummary::from(&job)];
        let out = JobList::with_title(&summaries, "Results").to_string();
        assert!(out.starts_with("# Results"));
        assert!(out.contains("Gutter clean"));
    }

    #[test]
    fn template_list_is_indexed_from_zero() {
        let items = vec![ChecklistItem::new("first"), ChecklistItem::new("second")];
        let out = TemplateList::new(&items).to_string();
        assert!(out.contains("0. first"));
        assert!(out.contains("1. second"));
    }

    #[test]
    fn archive_list_pluralizes() {
        let out = ArchiveList::new(vec![("2024".to_string(), 1), ("2023".to_string(), 3)])
            .to_string();
        assert!(out.contains("**2024**: 1 job\n"));
        assert!(out.contains("**2023**: 3 jobs\n"));
    }

    #[test]
    fn stats_view_shows_all_counts() {
        let out = StatsView(BoardStats {
            total: 4,
            pending: 2,
            in_progress: 1,
            completed: 1,
        })
        .to_string();
        assert!(out.contains("**Total**: 4"));
        assert!(out.contains("**In Progress**: 1"));
    }

    #[test]
    fn failure_status_is_marked() {
        let out = OperationStatus::failure("no such job".to_string()).to_string();
        assert!(out.contains("**Error:**"));
    }
}

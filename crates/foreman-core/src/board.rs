//! The board: state container and mutation operations.
//!
//! A [`Board`] owns the full in-memory [`BoardData`] document plus the
//! [`JsonStore`] it came from. Every mutating operation follows the same
//! cycle: validate, mutate the container, persist the entire document.
//! Operations run to completion with no interleaving; the one asynchronous
//! path is file attachment, where each file's content is read off the main
//! path and appended (keyed by job id) when its read completes.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use jiff::{tz::TimeZone, Timestamp};
use log::info;
use tokio::task::JoinSet;

use crate::{
    error::{BoardError, Result},
    ids::new_id,
    models::{media_type_for, ChecklistItem, FileAttachment, Job, JobStatus, JobSummary},
    params::{CreateJob, ExportYear, LoadYear, UpdateJob},
    store::{BoardData, JsonStore},
};

/// Result of toggling a checklist item.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    /// The item's state after the toggle
    pub checked: bool,
    /// True when the toggle just brought the checklist to 100% while the
    /// job is not yet completed. Advisory only: the status is never
    /// auto-transitioned.
    pub advise_complete: bool,
}

/// Result of an attachment batch.
#[derive(Debug, Clone, Default)]
pub struct AttachOutcome {
    /// File names appended, in completion order
    pub added: Vec<String>,
    /// Paths that could not be read, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

/// Result of exporting a year into the archive.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// The year that was exported
    pub year: String,
    /// File-stripped snapshots of that year's jobs
    pub jobs: Vec<Job>,
}

/// Result of asking to load an archived year.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The caller has not confirmed yet; disclose the count first
    NeedsConfirmation { year: String, count: usize },
    /// Jobs were re-imported as brand-new pending jobs
    Loaded { year: String, count: usize },
}

/// Aggregate job counts for the dashboard strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

/// State container for the whole application.
pub struct Board {
    data: BoardData,
    store: JsonStore,
}

impl Board {
    /// Load the board from the given store. An absent document starts the
    /// board empty with the default checklist template.
    pub fn open(store: JsonStore) -> Result<Self> {
        let data = store.load()?;
        Ok(Self { data, store })
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&mut self.data)
    }

    /// All live jobs in insertion order.
    pub fn jobs(&self) -> &[Job] {
        &self.data.jobs
    }

    /// The current checklist template.
    pub fn template(&self) -> &[ChecklistItem] {
        &self.data.checklist_template
    }

    /// Look up a job by id.
    pub fn get_job(&self, id: &str) -> Option<&Job> {
        self.data.jobs.iter().find(|j| j.id == id)
    }

    fn get_job_mut(&mut self, id: &str) -> Result<&mut Job> {
        self.data
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| BoardError::JobNotFound { id: id.to_string() })
    }

    // ------------------------------------------------------------------
    // Job lifecycle
    // ------------------------------------------------------------------

    /// Create a new job. The checklist is a fresh snapshot of the current
    /// template: same texts, brand-new item ids, everything unchecked.
    /// Template edits after this point never reach the job.
    pub fn create_job(&mut self, params: &CreateJob) -> Result<Job> {
        params.validate()?;

        let job = Job {
            id: new_id(),
            name: params.name.trim().to_string(),
            address: params.address.trim().to_string(),
            contact_name: params.contact_name.clone(),
            contact_phone: params.contact_phone.clone(),
            contact_email: params.contact_email.clone(),
            scheduled_date: params.scheduled_date,
            status: params.status,
            checklist: self
                .data
                .checklist_template
                .iter()
                .map(ChecklistItem::fresh_copy)
                .collect(),
            files: Vec::new(),
            notes: String::new(),
            created_at: Some(Timestamp::now()),
        };

        self.data.jobs.push(job.clone());
        self.persist()?;
        info!("created job {} ({})", job.id, job.name);
        Ok(job)
    }

    /// Merge the supplied fields into an existing job. An unknown id is
    /// reported as not found. The checklist, files, and creation timestamp
    /// are never touched by an edit.
    pub fn update_job(&mut self, params: &UpdateJob) -> Result<Job> {
        params.validate()?;

        let job = self.get_job_mut(&params.id)?;
        if let Some(name) = &params.name {
            job.name = name.trim().to_string();
        }
        if let Some(address) = &params.address {
            job.address = address.trim().to_string();
        }
        if let Some(contact_name) = &params.contact_name {
            job.contact_name = Some(contact_name.clone());
        }
        if let Some(contact_phone) = &params.contact_phone {
            job.contact_phone = Some(contact_phone.clone());
        }
        if let Some(contact_email) = &params.contact_email {
            job.contact_email = Some(contact_email.clone());
        }
        if let Some(date) = params.scheduled_date {
            job.scheduled_date = Some(date);
        }
        if let Some(status) = params.status {
            job.status = status;
        }

        let updated = job.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Remove a job by id. Deleting an id that no longer exists is a
    /// no-op, not an error; the returned flag says whether anything was
    /// removed.
    pub fn delete_job(&mut self, id: &str) -> Result<bool> {
        let before = self.data.jobs.len();
        self.data.jobs.retain(|j| j.id != id);
        let removed = self.data.jobs.len() != before;
        if removed {
            self.persist()?;
            info!("deleted job {id}");
        }
        Ok(removed)
    }

    /// Set a job's status. Completing a job force-checks every checklist
    /// item; that side effect is one-way, so moving back to in-progress
    /// leaves the items checked.
    pub fn set_status(&mut self, id: &str, status: JobStatus) -> Result<Job> {
        let job = self.get_job_mut(id)?;
        job.status = status;
        if status == JobStatus::Completed {
            for item in &mut job.checklist {
                item.checked = true;
            }
        }
        let updated = job.clone();
        self.persist()?;
        Ok(updated)
    }

    /// The mark-complete / reopen toggle: a completed job reopens to
    /// in-progress, anything else completes (checking all items).
    pub fn toggle_complete(&mut self, id: &str) -> Result<Job> {
        let current = self
            .get_job(id)
            .ok_or_else(|| BoardError::JobNotFound { id: id.to_string() })?
            .status;
        let next = if current == JobStatus::Completed {
            JobStatus::InProgress
        } else {
            JobStatus::Completed
        };
        self.set_status(id, next)
    }

    /// Flip one checklist item by position. When the flip brings the
    /// checklist to 100% on a job that is not completed, the outcome
    /// carries an advisory flag; the status itself is left alone.
    pub fn toggle_checklist_item(&mut self, id: &str, index: usize) -> Result<ToggleOutcome> {
        let job = self.get_job_mut(id)?;
        let len = job.checklist.len();
        let item = job.checklist.get_mut(index).ok_or_else(|| {
            BoardError::invalid_input("index").with_reason(format!(
                "checklist has {len} items, index {index} is out of range"
            ))
        })?;
        item.checked = !item.checked;
        let checked = item.checked;
        let advise_complete = job.checklist_complete() && job.status != JobStatus::Completed;
        self.persist()?;
        Ok(ToggleOutcome {
            checked,
            advise_complete,
        })
    }

    /// Replace a job's notes.
    pub fn set_notes(&mut self, id: &str, notes: &str) -> Result<()> {
        let job = self.get_job_mut(id)?;
        job.notes = notes.to_string();
        self.persist()
    }

    /// Attach files to a job. Each path is read in its own task; contents
    /// are base64-encoded and appended in the order the reads complete,
    /// not the order the paths were given. The append is keyed by job id,
    /// so it lands even if the caller has moved on to another view. A
    /// failed read is collected and reported without aborting the rest of
    /// the batch.
    pub async fn attach_files(&mut self, id: &str, paths: Vec<PathBuf>) -> Result<AttachOutcome> {
        // Fail fast on an unknown job before spawning any reads.
        if self.get_job(id).is_none() {
            return Err(BoardError::JobNotFound { id: id.to_string() });
        }

        let mut reads = JoinSet::new();
        for path in paths {
            reads.spawn(async move {
                let bytes = tokio::fs::read(&path).await;
                (path, bytes)
            });
        }

        let mut outcome = AttachOutcome::default();
        while let Some(joined) = reads.join_next().await {
            let (path, bytes) = joined.map_err(|e| {
                BoardError::invalid_input("file").with_reason(format!("read task failed: {e}"))
            })?;
            match bytes {
                Ok(bytes) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    let attachment = FileAttachment {
                        id: new_id(),
                        media_type: media_type_for(&name).to_string(),
                        data: B64.encode(&bytes),
                        name: name.clone(),
                        uploaded_at: Timestamp::now(),
                    };
                    let job = self.get_job_mut(id)?;
                    job.files.push(attachment);
                    self.persist()?;
                    outcome.added.push(name);
                }
                Err(e) => outcome.failed.push((path, e.to_string())),
            }
        }
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Checklist template
    // ------------------------------------------------------------------

    /// Append a placeholder item to the template.
    pub fn add_template_item(&mut self) -> Result<ChecklistItem> {
        let item = ChecklistItem::new("New item");
        self.data.checklist_template.push(item.clone());
        self.persist()?;
        Ok(item)
    }

    /// Set the text of a template item by position.
    pub fn update_template_item(&mut self, index: usize, text: &str) -> Result<()> {
        let len = self.data.checklist_template.len();
        let item = self
            .data
            .checklist_template
            .get_mut(index)
            .ok_or_else(|| {
                BoardError::invalid_input("index").with_reason(format!(
                    "template has {len} items, index {index} is out of range"
                ))
            })?;
        item.text = text.to_string();
        self.persist()
    }

    /// Remove a template item by position.
    pub fn remove_template_item(&mut self, index: usize) -> Result<ChecklistItem> {
        if index >= self.data.checklist_template.len() {
            let len = self.data.checklist_template.len();
            return Err(BoardError::invalid_input("index").with_reason(format!(
                "template has {len} items, index {index} is out of range"
            )));
        }
        let removed = self.data.checklist_template.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Persist the template, dropping any item whose trimmed text is
    /// empty. Blank items are noise, not content; this is the only
    /// operation that discards data silently. Returns how many were
    /// dropped. Existing jobs are unaffected.
    pub fn save_template(&mut self) -> Result<usize> {
        let before = self.data.checklist_template.len();
        self.data
            .checklist_template
            .retain(|item| !item.text.trim().is_empty());
        let dropped = before - self.data.checklist_template.len();
        self.persist()?;
        Ok(dropped)
    }

    // ------------------------------------------------------------------
    // Search & stats
    // ------------------------------------------------------------------

    /// Jobs matching a case-insensitive substring of name, address, or
    /// contact name, in display order: scheduled date ascending when both
    /// sides have one, then status precedence (in-progress, pending,
    /// completed). The sort is stable, so unscheduled jobs keep their
    /// relative insertion position rather than being segregated. An empty
    /// term matches everything.
    pub fn filter_jobs(&self, term: &str) -> Vec<JobSummary> {
        let needle = term.to_lowercase();
        let mut matched: Vec<&Job> = self
            .data
            .jobs
            .iter()
            .filter(|job| {
                needle.is_empty()
                    || job.name.to_lowercase().contains(&needle)
                    || job.address.to_lowercase().contains(&needle)
                    || job
                        .contact_name
                        .as_ref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .collect();

        matched.sort_by(|a, b| {
            let by_date = match (a.scheduled_date, b.scheduled_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => std::cmp::Ordering::Equal,
            };
            by_date.then(a.status.precedence().cmp(&b.status.precedence()))
        });

        matched.into_iter().map(JobSummary::from).collect()
    }

    /// Job counts by status.
    pub fn stats(&self) -> BoardStats {
        let mut stats = BoardStats {
            total: self.data.jobs.len(),
            ..Default::default()
        };
        for job in &self.data.jobs {
            match job.status {
                JobStatus::Pending => stats.pending += 1,
                JobStatus::InProgress => stats.in_progress += 1,
                JobStatus::Completed => stats.completed += 1,
            }
        }
        stats
    }

    // ------------------------------------------------------------------
    // Archive & export
    // ------------------------------------------------------------------

    fn local_year(ts: &Timestamp) -> i16 {
        ts.to_zoned(TimeZone::system()).year()
    }

    /// The current year as an archive key.
    pub fn current_year() -> String {
        Self::local_year(&Timestamp::now()).to_string()
    }

    /// Snapshot every job created in the given year (missing creation
    /// timestamps count as the current year) into the archive, files
    /// stripped, overwriting any prior snapshot for that year. Returns the
    /// stripped jobs for the caller to write out as the export artifact.
    pub fn export_year(&mut self, params: &ExportYear) -> Result<ExportOutcome> {
        let current = Self::current_year();
        let year = params.year.clone().unwrap_or_else(|| current.clone());

        let snapshot: Vec<Job> = self
            .data
            .jobs
            .iter()
            .filter(|job| {
                let job_year = job
                    .created_at
                    .as_ref()
                    .map(|ts| Self::local_year(ts).to_string())
                    .unwrap_or_else(|| current.clone());
                job_year == year
            })
            .map(Job::without_files)
            .collect();

        if snapshot.is_empty() {
            return Err(BoardError::NothingToExport { year });
        }

        self.data.archives.insert(year.clone(), snapshot.clone());
        self.persist()?;
        info!("archived {} jobs for {year}", snapshot.len());
        Ok(ExportOutcome {
            year,
            jobs: snapshot,
        })
    }

    /// Re-import an archived year. The current year is refused outright.
    /// Without confirmation the outcome discloses how many jobs would be
    /// loaded and nothing is mutated. A confirmed load appends every
    /// archived job as a brand-new pending job with fresh ids and an
    /// unchecked checklist: an import-as-new, not a restore-in-place.
    pub fn load_archive_year(&mut self, params: &LoadYear) -> Result<LoadOutcome> {
        let year = params.year.clone();
        if year == Self::current_year() {
            return Err(BoardError::CurrentYearReload { year });
        }

        let count = match self.data.archives.get(&year) {
            Some(archived) if !archived.is_empty() => archived.len(),
            _ => return Err(BoardError::ArchiveNotFound { year }),
        };

        if !params.confirmed {
            return Ok(LoadOutcome::NeedsConfirmation { year, count });
        }

        let imported: Vec<Job> = self.data.archives[&year]
            .iter()
            .map(Job::as_imported)
            .collect();
        self.data.jobs.extend(imported);
        self.persist()?;
        info!("loaded {count} archived jobs from {year}");
        Ok(LoadOutcome::Loaded { year, count })
    }

    /// Archived years with their job counts, oldest first.
    pub fn archive_years(&self) -> Vec<(String, usize)> {
        self.data
            .archives
            .iter()
            .map(|(year, jobs)| (year.clone(), jobs.len()))
            .collect()
    }
}

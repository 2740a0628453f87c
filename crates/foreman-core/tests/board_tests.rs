//! Integration tests for the board state container.

mod common;

use common::{job_params, reopen, test_board};
use foreman_core::{
    params::{CreateJob, ExportYear, LoadYear, UpdateJob},
    BoardError, JobStatus, LoadOutcome,
};
use jiff::civil::date;

#[test]
fn new_job_snapshots_the_template() {
    let (mut board, _dir) = test_board();
    let job = board.create_job(&job_params("Fence", "12 Elm St")).unwrap();

    assert_eq!(job.checklist.len(), 4);
    assert!(job.checklist.iter().all(|i| !i.checked));

    // The snapshot has its own item ids, not the template's.
    let template_ids: Vec<&str> = board.template().iter().map(|i| i.id.as_str()).collect();
    assert!(job.checklist.iter().all(|i| !template_ids.contains(&i.id.as_str())));

    // Template edits after creation never reach the job.
    board.update_template_item(0, "changed").unwrap();
    let job = board.get_job(&job.id).unwrap();
    assert_ne!(job.checklist[0].text, "changed");
}

#[test]
fn blank_required_fields_are_rejected() {
    let (mut board, _dir) = test_board();
    assert!(board.create_job(&job_params("   ", "12 Elm St")).is_err());
    assert!(board.create_job(&job_params("Fence", "")).is_err());
    assert!(board.jobs().is_empty());
}

#[test]
fn update_merges_only_supplied_fields() {
    let (mut board, _dir) = test_board();
    let job = board
        .create_job(&CreateJob {
            contact_name: Some("Dana".to_string()),
            ..job_params("Fence", "12 Elm St")
        })
        .unwrap();

    let updated = board
        .update_job(&UpdateJob {
            id: job.id.clone(),
            address: Some("99 Oak Ave".to_string()),
            ..UpdateJob::default()
        })
        .unwrap();

    assert_eq!(updated.name, "Fence");
    assert_eq!(updated.address, "99 Oak Ave");
    assert_eq!(updated.contact_name.as_deref(), Some("Dana"));
    assert_eq!(updated.checklist, job.checklist);
    assert_eq!(updated.created_at, job.created_at);
}

#[test]
fn update_unknown_id_reports_not_found() {
    let (mut board, _dir) = test_board();
    let err = board
        .update_job(&UpdateJob {
            id: "missing".to_string(),
            ..UpdateJob::default()
        })
        .unwrap_err();
    assert!(matches!(err, BoardError::JobNotFound { .. }));
}

#[test]
fn delete_is_idempotent() {
    let (mut board, _dir) = test_board();
    let job = board.create_job(&job_params("Fence", "12 Elm St")).unwrap();
    assert!(board.delete_job(&job.id).unwrap());
    assert!(!board.delete_job(&job.id).unwrap());
    assert!(board.jobs().is_empty());
}

#[test]
fn completing_checks_every_item_and_reopening_leaves_them() {
    let (mut board, _dir) = test_board();
    let job = board.create_job(&job_params("Fence", "12 Elm St")).unwrap();

    let done = board.toggle_complete(&job.id).unwrap();
    assert_eq!(done.status, JobStatus::Completed);
    assert!(done.checklist.iter().all(|i| i.checked));

    // Reopen: status flips back, items stay checked.
    let reopened = board.toggle_complete(&job.id).unwrap();
    assert_eq!(reopened.status, JobStatus::InProgress);
    assert!(reopened.checklist.iter().all(|i| i.checked));
}

#[test]
fn checklist_toggle_advises_at_full_completion() {
    let (mut board, _dir) = test_board();
    let job = board.create_job(&job_params("Fence", "12 Elm St")).unwrap();
    let last = job.checklist.len() - 1;

    for index in 0..last {
        let outcome = board.toggle_checklist_item(&job.id, index).unwrap();
        assert!(outcome.checked);
        assert!(!outcome.advise_complete);
    }

    let outcome = board.toggle_checklist_item(&job.id, last).unwrap();
    assert!(outcome.advise_complete);

    // Advisory only: the status was not touched.
    assert_eq!(board.get_job(&job.id).unwrap().status, JobStatus::Pending);

    // Unchecking again clears the condition.
    let outcome = board.toggle_checklist_item(&job.id, last).unwrap();
    assert!(!outcome.checked);
    assert!(!outcome.advise_complete);
}

#[test]
fn checklist_toggle_rejects_bad_index() {
    let (mut board, _dir) = test_board();
    let job = board.create_job(&job_params("Fence", "12 Elm St")).unwrap();
    let err = board.toggle_checklist_item(&job.id, 99).unwrap_err();
    assert!(matches!(err, BoardError::InvalidInput { .. }));
}

#[test]
fn notes_are_replaced_wholesale() {
    let (mut board, dir) = test_board();
    let job = board.create_job(&job_params("Fence", "12 Elm St")).unwrap();
    board.set_notes(&job.id, "bring the tall ladder").unwrap();
    board.set_notes(&job.id, "customer rescheduled").unwrap();

    let board = reopen(&dir);
    assert_eq!(board.get_job(&job.id).unwrap().notes, "customer rescheduled");
}

#[test]
fn filter_matches_name_address_and_contact_case_insensitively() {
    let (mut board, _dir) = test_board();
    board.create_job(&job_params("Fence Repair", "12 Elm St")).unwrap();
    board.create_job(&job_params("Roof", "44 Fencewood Dr")).unwrap();
    board
        .create_job(&CreateJob {
            contact_name: Some("Mr. Fence".to_string()),
            ..job_params("Gutter", "7 Pine Rd")
        })
        .unwrap();
    board.create_job(&job_params("Deck", "3 Birch Ln")).unwrap();

    let hits = board.filter_jobs("FENCE");
    assert_eq!(hits.len(), 3);
    assert!(board.filter_jobs("").len() == 4);
}

#[test]
fn display_order_puts_dated_jobs_by_date_then_status() {
    let (mut board, _dir) = test_board();
    board
        .create_job(&CreateJob {
            scheduled_date: Some(date(2025, 6, 20)),
            ..job_params("Late", "1 A St")
        })
        .unwrap();
    board
        .create_job(&CreateJob {
            scheduled_date: Some(date(2025, 6, 1)),
            status: JobStatus::Completed,
            ..job_params("Early done", "2 B St")
        })
        .unwrap();
    board
        .create_job(&CreateJob {
            scheduled_date: Some(date(2025, 6, 1)),
            status: JobStatus::InProgress,
            ..job_params("Early active", "3 C St")
        })
        .unwrap();

    let ordered = board.filter_jobs("");
    assert_eq!(ordered[0].name, "Early active");
    assert_eq!(ordered[1].name, "Early done");
    assert_eq!(ordered[2].name, "Late");
}

#[test]
fn unscheduled_jobs_keep_their_relative_position() {
    let (mut board, _dir) = test_board();
    board
        .create_job(&CreateJob {
            status: JobStatus::Pending,
            ..job_params("First undated", "1 A St")
        })
        .unwrap();
    board
        .create_job(&CreateJob {
            status: JobStatus::Pending,
            ..job_params("Second undated", "2 B St")
        })
        .unwrap();

    let ordered = board.filter_jobs("");
    assert_eq!(ordered[0].name, "First undated");
    assert_eq!(ordered[1].name, "Second undated");
}

#[tokio::test]
async fn attachments_encode_content_and_survive_a_bad_path() {
    let (mut board, dir) = test_board();
    let job = board.create_job(&job_params("Fence", "12 Elm St")).unwrap();

    let photo = dir.path().join("site.png");
    std::fs::write(&photo, b"fake png bytes").unwrap();
    let missing = dir.path().join("nope.pdf");

    let outcome = board
        .attach_files(&job.id, vec![photo, missing.clone()])
        .await
        .unwrap();

    assert_eq!(outcome.added, vec!["site.png".to_string()]);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].0, missing);

    let job = board.get_job(&job.id).unwrap();
    assert_eq!(job.files.len(), 1);
    assert_eq!(job.files[0].media_type, "image/png");
    assert_eq!(job.files[0].data, "ZmFrZSBwbmcgYnl0ZXM=");
}

#[tokio::test]
async fn attaching_to_unknown_job_fails_fast() {
    let (mut board, _dir) = test_board();
    let err = board
        .attach_files("missing", vec!["whatever.pdf".into()])
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::JobNotFound { .. }));
}

#[test]
fn template_save_drops_blank_items() {
    let (mut board, dir) = test_board();
    board.add_template_item().unwrap();
    board.update_template_item(4, "   ").unwrap();
    board.add_template_item().unwrap();
    board.update_template_item(5, "Sweep up").unwrap();

    let dropped = board.save_template().unwrap();
    assert_eq!(dropped, 1);

    let board = reopen(&dir);
    let texts: Vec<&str> = board.template().iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts.len(), 5);
    assert_eq!(texts[4], "Sweep up");
}

#[test]
fn template_remove_reports_bad_index() {
    let (mut board, _dir) = test_board();
    assert!(board.remove_template_item(99).is_err());
    board.remove_template_item(0).unwrap();
    assert_eq!(board.template().len(), 3);
}

#[test]
fn export_defaults_to_current_year_and_strips_files() {
    let (mut board, dir) = test_board();
    board.create_job(&job_params("Fence", "12 Elm St")).unwrap();

    let outcome = board.export_year(&ExportYear::default()).unwrap();
    assert_eq!(outcome.year, foreman_core::Board::current_year());
    assert_eq!(outcome.jobs.len(), 1);
    assert!(outcome.jobs[0].files.is_empty());

    // The snapshot is persisted in the archives map.
    let board = reopen(&dir);
    assert_eq!(board.archive_years(), vec![(outcome.year, 1)]);
}

#[test]
fn export_of_an_empty_year_is_an_error() {
    let (mut board, _dir) = test_board();
    let err = board
        .export_year(&ExportYear {
            year: Some("1999".to_string()),
        })
        .unwrap_err();
    assert!(matches!(err, BoardError::NothingToExport { .. }));
}

#[test]
fn export_overwrites_the_previous_snapshot_for_that_year() {
    let (mut board, _dir) = test_board();
    board.create_job(&job_params("Fence", "12 Elm St")).unwrap();
    board.export_year(&ExportYear::default()).unwrap();
    board.create_job(&job_params("Roof", "44 Oak Ave")).unwrap();
    let outcome = board.export_year(&ExportYear::default()).unwrap();
    assert_eq!(outcome.jobs.len(), 2);
    assert_eq!(board.archive_years()[0].1, 2);
}

#[test]
fn current_year_cannot_be_reloaded() {
    let (mut board, _dir) = test_board();
    board.create_job(&job_params("Fence", "12 Elm St")).unwrap();
    board.export_year(&ExportYear::default()).unwrap();

    let err = board
        .load_archive_year(&LoadYear {
            year: foreman_core::Board::current_year(),
            confirmed: true,
        })
        .unwrap_err();
    assert!(matches!(err, BoardError::CurrentYearReload { .. }));
}

/// Seed a document with an archived past year, then exercise the
/// confirm-then-load flow against it.
#[test]
fn archive_load_requires_confirmation_and_imports_as_new() {
    use foreman_core::{Board, JsonStore};

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("board.json");
    std::fs::write(
        &path,
        r#"{
            "jobs": [],
            "archives": {
                "2020": [
                    {
                        "id": "old-1",
                        "name": "Barn paint",
                        "address": "5 Farm Rd",
                        "status": "completed",
                        "checklist": [
                            {"id": "c1", "text": "Load paint", "checked": true}
                        ]
                    }
                ]
            }
        }"#,
    )
    .unwrap();

    let mut board = Board::open(JsonStore::new(&path)).unwrap();

    // Unconfirmed: disclose the count, mutate nothing.
    let outcome = board
        .load_archive_year(&LoadYear {
            year: "2020".to_string(),
            confirmed: false,
        })
        .unwrap();
    assert!(matches!(
        outcome,
        LoadOutcome::NeedsConfirmation { count: 1, .. }
    ));
    assert!(board.jobs().is_empty());

    // Confirmed: re-imported as a fresh pending job.
    let outcome = board
        .load_archive_year(&LoadYear {
            year: "2020".to_string(),
            confirmed: true,
        })
        .unwrap();
    assert!(matches!(outcome, LoadOutcome::Loaded { count: 1, .. }));

    let imported = &board.jobs()[0];
    assert_ne!(imported.id, "old-1");
    assert_eq!(imported.name, "Barn paint");
    assert_eq!(imported.status, JobStatus::Pending);
    assert!(imported.checklist.iter().all(|i| !i.checked));
    assert_ne!(imported.checklist[0].id, "c1");

    // The archive snapshot itself is untouched.
    assert_eq!(board.archive_years(), vec![("2020".to_string(), 1)]);
}

#[test]
fn missing_archive_year_is_reported() {
    let (mut board, _dir) = test_board();
    let err = board
        .load_archive_year(&LoadYear {
            year: "2019".to_string(),
            confirmed: true,
        })
        .unwrap_err();
    assert!(matches!(err, BoardError::ArchiveNotFound { .. }));
}

#[test]
fn state_survives_a_reopen() {
    let (mut board, dir) = test_board();
    let job = board.create_job(&job_params("Fence", "12 Elm St")).unwrap();
    board.set_status(&job.id, JobStatus::InProgress).unwrap();

    let board = reopen(&dir);
    let loaded = board.get_job(&job.id).unwrap();
    assert_eq!(loaded.status, JobStatus::InProgress);
    assert_eq!(loaded.name, "Fence");
    assert_eq!(board.stats().in_progress, 1);
}

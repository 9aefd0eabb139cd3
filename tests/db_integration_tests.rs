//! Integration tests for the database layer.
//!
//! These tests verify the storage operations using an in-memory SQLite
//! database. Tests are organized by operation.

use chrono::NaiveDate;
use taskboard::db::Database;
use taskboard::types::TaskFilter;

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

mod add_tests {
    use super::*;

    #[test]
    fn add_task_sets_defaults() {
        let db = setup_db();

        let task = db.add_task("Buy Milk").expect("Failed to add task");

        assert!(task.id > 0);
        assert_eq!(task.title, "Buy Milk");
        assert!(task.start_dt > 0);
        assert!(task.end_dt.is_none());
        assert!(!task.done);
        assert!(!task.archived);
    }

    #[test]
    fn ids_are_monotonic() {
        let db = setup_db();

        let first = db.add_task("First").unwrap();
        let second = db.add_task("Second").unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn listing_is_newest_first() {
        let db = setup_db();

        db.add_task("Older").unwrap();
        db.add_task("Newer").unwrap();

        let tasks = db.list_tasks(TaskFilter::Active, None).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Newer");
        assert_eq!(tasks[1].title, "Older");
    }
}

mod toggle_tests {
    use super::*;

    #[test]
    fn toggle_marks_done_and_stamps_end_dt() {
        let db = setup_db();
        let task = db.add_task("Write Report").unwrap();

        assert!(db.toggle_task(task.id).unwrap());

        let task = db.get_task(task.id).unwrap().unwrap();
        assert!(task.done);
        let end_dt = task.end_dt.expect("end_dt should be set");
        assert!(end_dt >= task.start_dt);
    }

    #[test]
    fn toggle_back_clears_end_dt() {
        let db = setup_db();
        let task = db.add_task("Write Report").unwrap();

        db.toggle_task(task.id).unwrap();
        db.toggle_task(task.id).unwrap();

        let task = db.get_task(task.id).unwrap().unwrap();
        assert!(!task.done);
        assert!(task.end_dt.is_none());
    }

    #[test]
    fn toggle_missing_id_is_noop() {
        let db = setup_db();

        assert!(!db.toggle_task(999).unwrap());
        assert!(db.list_tasks(TaskFilter::Active, None).unwrap().is_empty());
    }

    #[test]
    fn set_done_missing_id_returns_false() {
        let db = setup_db();

        assert!(!db.set_done(42, true).unwrap());
    }
}

mod archive_tests {
    use super::*;

    #[test]
    fn archive_requires_done() {
        let db = setup_db();
        let task = db.add_task("Open Task").unwrap();

        assert!(!db.archive_task(task.id).unwrap());

        let task = db.get_task(task.id).unwrap().unwrap();
        assert!(!task.archived);
    }

    #[test]
    fn archive_done_task_hides_it_from_active_filters() {
        let db = setup_db();
        let task = db.add_task("Finished Task").unwrap();
        db.toggle_task(task.id).unwrap();

        assert!(db.archive_task(task.id).unwrap());

        assert!(db.list_tasks(TaskFilter::Active, None).unwrap().is_empty());
        assert!(db.list_tasks(TaskFilter::Open, None).unwrap().is_empty());
        assert!(db.list_tasks(TaskFilter::Done, None).unwrap().is_empty());

        let archived = db.list_tasks(TaskFilter::Archive, None).unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].id, task.id);
    }

    #[test]
    fn archive_missing_id_is_noop() {
        let db = setup_db();

        assert!(!db.archive_task(999).unwrap());
    }

    #[test]
    fn unarchive_restores_visibility_and_keeps_done() {
        let db = setup_db();
        let task = db.add_task("Finished Task").unwrap();
        db.toggle_task(task.id).unwrap();
        db.archive_task(task.id).unwrap();

        assert!(db.unarchive_task(task.id).unwrap());

        assert!(db.list_tasks(TaskFilter::Archive, None).unwrap().is_empty());

        let done = db.list_tasks(TaskFilter::Done, None).unwrap();
        assert_eq!(done.len(), 1);
        assert!(done[0].done);

        let active = db.list_tasks(TaskFilter::Active, None).unwrap();
        assert_eq!(active.len(), 1);
    }
}

mod filter_tests {
    use super::*;

    #[test]
    fn filters_partition_by_done_and_archived() {
        let db = setup_db();

        let open = db.add_task("Still Open").unwrap();
        let done = db.add_task("Now Done").unwrap();
        db.toggle_task(done.id).unwrap();
        let archived = db.add_task("Put Away").unwrap();
        db.toggle_task(archived.id).unwrap();
        db.archive_task(archived.id).unwrap();

        let active = db.list_tasks(TaskFilter::Active, None).unwrap();
        assert_eq!(active.len(), 2);

        let open_list = db.list_tasks(TaskFilter::Open, None).unwrap();
        assert_eq!(open_list.len(), 1);
        assert_eq!(open_list[0].id, open.id);

        let done_list = db.list_tasks(TaskFilter::Done, None).unwrap();
        assert_eq!(done_list.len(), 1);
        assert_eq!(done_list[0].id, done.id);

        let archive_list = db.list_tasks(TaskFilter::Archive, None).unwrap();
        assert_eq!(archive_list.len(), 1);
        assert_eq!(archive_list[0].id, archived.id);
    }

    #[test]
    fn date_range_is_inclusive_of_today() {
        let db = setup_db();
        let task = db.add_task("Dated Task").unwrap();

        let today = chrono::DateTime::from_timestamp_millis(task.start_dt)
            .unwrap()
            .date_naive();

        let hit = db
            .list_tasks(TaskFilter::Active, Some((today, today)))
            .unwrap();
        assert_eq!(hit.len(), 1);

        let past_start = today.pred_opt().unwrap().pred_opt().unwrap();
        let past_end = today.pred_opt().unwrap();
        let miss = db
            .list_tasks(TaskFilter::Active, Some((past_start, past_end)))
            .unwrap();
        assert!(miss.is_empty());
    }

    #[test]
    fn date_range_excludes_tasks_outside_it() {
        let db = setup_db();
        db.add_task("Only Task").unwrap();

        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2000, 12, 31).unwrap();

        let tasks = db.list_tasks(TaskFilter::Active, Some((start, end))).unwrap();
        assert!(tasks.is_empty());
    }
}

mod open_tests {
    use super::*;

    #[test]
    fn open_on_disk_runs_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");

        {
            let db = Database::open(&path).expect("Failed to open database");
            db.add_task("Persisted").unwrap();
        }

        // Reopening must not fail or lose data; migrations are idempotent.
        let db = Database::open(&path).expect("Failed to reopen database");
        let tasks = db.list_tasks(TaskFilter::Active, None).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Persisted");
    }
}

//! Task CRUD operations.

use super::{Database, now_ms};
use crate::types::{Task, TaskFilter};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        start_dt: row.get("start_dt")?,
        end_dt: row.get("end_dt")?,
        done: row.get::<_, i64>("done")? != 0,
        archived: row.get::<_, i64>("archived")? != 0,
    })
}

/// Internal helper to get a task using an existing connection.
fn get_task_internal(conn: &Connection, id: i64) -> Result<Option<Task>> {
    let mut stmt = conn.prepare("SELECT * FROM tasks WHERE id = ?1")?;

    let result = stmt.query_row(params![id], parse_task_row);

    match result {
        Ok(task) => Ok(Some(task)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn set_done_internal(conn: &Connection, id: i64, done: bool, end_dt: Option<i64>) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE tasks SET done = ?1, end_dt = ?2 WHERE id = ?3",
        params![done as i64, end_dt, id],
    )?;
    Ok(changed > 0)
}

impl Database {
    /// Insert a new task with the current timestamp as its start time.
    /// The title is stored as given; trimming and normalization happen in
    /// the creation path before this call.
    pub fn add_task(&self, title: &str) -> Result<Task> {
        self.with_conn(|conn| {
            let start_dt = now_ms();
            conn.execute(
                "INSERT INTO tasks (title, start_dt, done, archived) VALUES (?1, ?2, 0, 0)",
                params![title, start_dt],
            )?;
            let id = conn.last_insert_rowid();

            Ok(Task {
                id,
                title: title.to_string(),
                start_dt,
                end_dt: None,
                done: false,
                archived: false,
            })
        })
    }

    /// Fetch a single task by id.
    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| get_task_internal(conn, id))
    }

    /// List tasks matching the filter, newest id first.
    ///
    /// When a date range is given, the listing is further restricted to
    /// tasks whose start date (UTC) falls within it, inclusive on both
    /// ends.
    pub fn list_tasks(
        &self,
        filter: TaskFilter,
        date_range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut sql = String::from("SELECT * FROM tasks WHERE 1=1");

            match filter {
                TaskFilter::Active => sql.push_str(" AND archived = 0"),
                TaskFilter::Open => sql.push_str(" AND archived = 0 AND done = 0"),
                TaskFilter::Done => sql.push_str(" AND archived = 0 AND done = 1"),
                TaskFilter::Archive => sql.push_str(" AND archived = 1"),
            }

            let mut date_params: Vec<String> = Vec::new();
            if let Some((start, end)) = date_range {
                sql.push_str(" AND date(start_dt / 1000, 'unixepoch') BETWEEN ?1 AND ?2");
                date_params.push(start.format("%Y-%m-%d").to_string());
                date_params.push(end.format("%Y-%m-%d").to_string());
            }

            sql.push_str(" ORDER BY id DESC");

            let mut stmt = conn.prepare(&sql)?;
            let tasks = stmt
                .query_map(rusqlite::params_from_iter(date_params.iter()), parse_task_row)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(tasks)
        })
    }

    /// Set the done flag. Transitioning to done stamps `end_dt` with the
    /// current time; reverting clears it. Returns false when no row with
    /// that id exists.
    pub fn set_done(&self, id: i64, done: bool) -> Result<bool> {
        self.with_conn(|conn| {
            let end_dt = done.then(now_ms);
            set_done_internal(conn, id, done, end_dt)
        })
    }

    /// Flip a task's done state. Missing ids are a silent no-op returning
    /// false.
    pub fn toggle_task(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let Some(task) = get_task_internal(conn, id)? else {
                return Ok(false);
            };

            let end_dt = (!task.done).then(now_ms);
            set_done_internal(conn, id, !task.done, end_dt)
        })
    }

    /// Archive a task. Only done tasks can be archived; anything else
    /// (including a missing id) is a no-op returning false.
    pub fn archive_task(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE tasks SET archived = 1 WHERE id = ?1 AND done = 1",
                params![id],
            )?;
            Ok(changed > 0)
        })
    }

    /// Restore a task from the archive unconditionally. The done flag is
    /// left as-is.
    pub fn unarchive_task(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE tasks SET archived = 0 WHERE id = ?1",
                params![id],
            )?;
            Ok(changed > 0)
        })
    }
}

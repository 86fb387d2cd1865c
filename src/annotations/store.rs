//! SQLite-backed annotation store.

use super::models::{Art, Rating, Shout, SubjectType, UserActivity, UserFlag};
use super::repository::ShoutRepository;
use super::schema::ANNOTATION_VERSIONED_SCHEMAS;
use crate::sqlite_persistence::open_database;
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub struct SqliteAnnotationStore {
    conn: Arc<Mutex<Connection>>,
}

fn subject_type_at(row: &Row, idx: usize) -> rusqlite::Result<SubjectType> {
    let tag: String = row.get(idx)?;
    SubjectType::parse(&tag).ok_or_else(|| {
        rusqlite::Error::InvalidColumnType(idx, "subject_type".to_string(), Type::Text)
    })
}

fn timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let seconds: i64 = row.get(idx)?;
    Ok(DateTime::from_timestamp(seconds, 0).unwrap_or_else(Utc::now))
}

impl SqliteAnnotationStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = open_database(db_path, ANNOTATION_VERSIONED_SCHEMAS, "annotations")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // =========================================================================
    // Art
    // =========================================================================

    pub fn add_art(
        &self,
        subject_type: SubjectType,
        subject_id: i64,
        kind: &str,
        mime: &str,
        size_bytes: Option<i64>,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO art (subject_type, subject_id, kind, mime, size_bytes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![subject_type.as_str(), subject_id, kind, mime, size_bytes],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn art_for(&self, subject_type: SubjectType, subject_id: i64) -> Result<Vec<Art>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT id, subject_type, subject_id, kind, mime, size_bytes
             FROM art WHERE subject_type = ?1 AND subject_id = ?2 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![subject_type.as_str(), subject_id], |row| {
                Ok(Art {
                    id: row.get(0)?,
                    subject_type: subject_type_at(row, 1)?,
                    subject_id: row.get(2)?,
                    kind: row.get(3)?,
                    mime: row.get(4)?,
                    size_bytes: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn purge_art(&self, subject_type: SubjectType, subject_id: i64) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM art WHERE subject_type = ?1 AND subject_id = ?2",
            params![subject_type.as_str(), subject_id],
        )?;
        Ok(deleted)
    }

    // =========================================================================
    // Ratings
    // =========================================================================

    pub fn add_rating(
        &self,
        user_id: i64,
        subject_type: SubjectType,
        subject_id: i64,
        score: u8,
    ) -> Result<i64> {
        if score > 5 {
            bail!("Rating score {} is out of range (0-5)", score);
        }
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO rating (user_id, subject_type, subject_id, score)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, subject_type.as_str(), subject_id, score],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn ratings_for(&self, subject_type: SubjectType, subject_id: i64) -> Result<Vec<Rating>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT id, user_id, subject_type, subject_id, score, created
             FROM rating WHERE subject_type = ?1 AND subject_id = ?2 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![subject_type.as_str(), subject_id], |row| {
                Ok(Rating {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    subject_type: subject_type_at(row, 2)?,
                    subject_id: row.get(3)?,
                    score: row.get(4)?,
                    created: timestamp_at(row, 5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn purge_ratings(&self, subject_type: SubjectType, subject_id: i64) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM rating WHERE subject_type = ?1 AND subject_id = ?2",
            params![subject_type.as_str(), subject_id],
        )?;
        Ok(deleted)
    }

    // =========================================================================
    // User flags
    // =========================================================================

    pub fn add_flag(
        &self,
        user_id: i64,
        subject_type: SubjectType,
        subject_id: i64,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO user_flag (user_id, subject_type, subject_id)
             VALUES (?1, ?2, ?3)",
            params![user_id, subject_type.as_str(), subject_id],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn flags_for(&self, subject_type: SubjectType, subject_id: i64) -> Result<Vec<UserFlag>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT id, user_id, subject_type, subject_id, created
             FROM user_flag WHERE subject_type = ?1 AND subject_id = ?2 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![subject_type.as_str(), subject_id], |row| {
                Ok(UserFlag {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    subject_type: subject_type_at(row, 2)?,
                    subject_id: row.get(3)?,
                    created: timestamp_at(row, 4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn purge_flags(&self, subject_type: SubjectType, subject_id: i64) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM user_flag WHERE subject_type = ?1 AND subject_id = ?2",
            params![subject_type.as_str(), subject_id],
        )?;
        Ok(deleted)
    }

    // =========================================================================
    // Shouts
    // =========================================================================

    pub fn post_shout(
        &self,
        user_id: i64,
        subject_type: SubjectType,
        subject_id: i64,
        text: &str,
        sticky: bool,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO shout (user_id, subject_type, subject_id, text, sticky)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_id,
                subject_type.as_str(),
                subject_id,
                text,
                sticky as i32
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    // =========================================================================
    // User activity
    // =========================================================================

    pub fn record_activity(
        &self,
        user_id: i64,
        action: &str,
        subject_type: SubjectType,
        subject_id: i64,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO user_activity (user_id, action, subject_type, subject_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, action, subject_type.as_str(), subject_id],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn activity_for(
        &self,
        subject_type: SubjectType,
        subject_id: i64,
    ) -> Result<Vec<UserActivity>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT id, user_id, action, subject_type, subject_id, created
             FROM user_activity WHERE subject_type = ?1 AND subject_id = ?2 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![subject_type.as_str(), subject_id], |row| {
                Ok(UserActivity {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    action: row.get(2)?,
                    subject_type: subject_type_at(row, 3)?,
                    subject_id: row.get(4)?,
                    created: timestamp_at(row, 5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn purge_activity(&self, subject_type: SubjectType, subject_id: i64) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM user_activity WHERE subject_type = ?1 AND subject_id = ?2",
            params![subject_type.as_str(), subject_id],
        )?;
        Ok(deleted)
    }
}

impl ShoutRepository for SqliteAnnotationStore {
    fn shouts_for(&self, subject_type: SubjectType, subject_id: i64) -> Result<Vec<Shout>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT id, user_id, subject_type, subject_id, text, sticky, created
             FROM shout WHERE subject_type = ?1 AND subject_id = ?2 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![subject_type.as_str(), subject_id], |row| {
                Ok(Shout {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    subject_type: subject_type_at(row, 2)?,
                    subject_id: row.get(3)?,
                    text: row.get(4)?,
                    sticky: row.get::<_, i32>(5)? != 0,
                    created: timestamp_at(row, 6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn delete_shout(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM shout WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    fn purge_for_subject(&self, subject_type: SubjectType, subject_id: i64) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM shout WHERE subject_type = ?1 AND subject_id = ?2",
            params![subject_type.as_str(), subject_id],
        )?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_tmp_store() -> (SqliteAnnotationStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteAnnotationStore::new(temp_dir.path().join("annotations.db")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let (store, _temp_dir) = create_tmp_store();
        assert!(store.add_rating(1, SubjectType::Artist, 1, 6).is_err());
        store.add_rating(1, SubjectType::Artist, 1, 5).unwrap();
    }

    #[test]
    fn purge_removes_only_the_matching_subject() {
        let (store, _temp_dir) = create_tmp_store();

        store.add_flag(1, SubjectType::Artist, 10).unwrap();
        store.add_flag(1, SubjectType::Artist, 11).unwrap();
        store.add_flag(2, SubjectType::Album, 10).unwrap();

        let removed = store.purge_flags(SubjectType::Artist, 10).unwrap();
        assert_eq!(removed, 1);

        assert!(store.flags_for(SubjectType::Artist, 10).unwrap().is_empty());
        assert_eq!(store.flags_for(SubjectType::Artist, 11).unwrap().len(), 1);
        assert_eq!(store.flags_for(SubjectType::Album, 10).unwrap().len(), 1);
    }

    #[test]
    fn purge_is_idempotent() {
        let (store, _temp_dir) = create_tmp_store();

        store
            .add_art(SubjectType::Album, 3, "default", "image/jpeg", Some(1024))
            .unwrap();
        assert_eq!(store.purge_art(SubjectType::Album, 3).unwrap(), 1);
        assert_eq!(store.purge_art(SubjectType::Album, 3).unwrap(), 0);
        assert_eq!(store.purge_art(SubjectType::Album, 3).unwrap(), 0);
    }

    #[test]
    fn shout_repository_primitives() {
        let (store, _temp_dir) = create_tmp_store();

        let shout_id = store
            .post_shout(7, SubjectType::Track, 5, "great solo", false)
            .unwrap();
        store
            .post_shout(8, SubjectType::Track, 5, "agreed", true)
            .unwrap();

        let shouts = store.shouts_for(SubjectType::Track, 5).unwrap();
        assert_eq!(shouts.len(), 2);
        assert_eq!(shouts[0].text, "great solo");
        assert!(!shouts[0].sticky);
        assert!(shouts[1].sticky);

        assert!(store.delete_shout(shout_id).unwrap());
        assert!(!store.delete_shout(shout_id).unwrap());

        assert_eq!(store.purge_for_subject(SubjectType::Track, 5).unwrap(), 1);
        assert!(store.shouts_for(SubjectType::Track, 5).unwrap().is_empty());
    }
}

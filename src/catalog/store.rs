//! SQLite-backed catalog store.
//!
//! One store struct owns the catalog database and implements the
//! repository ports the deletion flows consume.

use super::models::{Album, Artist, Track};
use super::repository::{AlbumRepository, ArtistRepository, TrackRepository};
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use crate::sqlite_persistence::open_database;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = open_database(db_path, CATALOG_VERSIONED_SCHEMAS, "catalog")?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        let (artists, albums, tracks) = store.entity_counts()?;
        info!(
            "Opened catalog: {} artists, {} albums, {} tracks",
            artists, albums, tracks
        );
        Ok(store)
    }

    pub fn entity_counts(&self) -> Result<(usize, usize, usize)> {
        let conn = self.conn.lock().unwrap();
        let artists: i64 = conn.query_row("SELECT COUNT(*) FROM artist", [], |r| r.get(0))?;
        let albums: i64 = conn.query_row("SELECT COUNT(*) FROM album", [], |r| r.get(0))?;
        let tracks: i64 = conn.query_row("SELECT COUNT(*) FROM track", [], |r| r.get(0))?;
        Ok((artists as usize, albums as usize, tracks as usize))
    }

    pub fn add_artist(
        &self,
        name: &str,
        mbid: Option<&str>,
        summary: Option<&str>,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO artist (name, mbid, summary) VALUES (?1, ?2, ?3)",
            params![name, mbid, summary],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_album(&self, artist_id: i64, name: &str, year: Option<i32>) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO album (artist_id, name, year) VALUES (?1, ?2, ?3)",
            params![artist_id, name, year],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_track(
        &self,
        album_id: i64,
        name: &str,
        track_number: Option<i32>,
        duration_sec: Option<i64>,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO track (album_id, name, track_number, duration_sec)
             VALUES (?1, ?2, ?3, ?4)",
            params![album_id, name, track_number, duration_sec],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_album(&self, id: i64) -> Result<Option<Album>> {
        let conn = self.conn.lock().unwrap();
        let album = conn
            .query_row(
                "SELECT id, artist_id, name, year FROM album WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Album {
                        id: row.get(0)?,
                        artist_id: row.get(1)?,
                        name: row.get(2)?,
                        year: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(album)
    }

    pub fn get_track(&self, id: i64) -> Result<Option<Track>> {
        let conn = self.conn.lock().unwrap();
        let track = conn
            .query_row(
                "SELECT id, album_id, name, track_number, duration_sec FROM track WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Track {
                        id: row.get(0)?,
                        album_id: row.get(1)?,
                        name: row.get(2)?,
                        track_number: row.get(3)?,
                        duration_sec: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(track)
    }
}

impl ArtistRepository for SqliteCatalogStore {
    fn get_artist(&self, id: i64) -> Result<Option<Artist>> {
        let conn = self.conn.lock().unwrap();
        let artist = conn
            .query_row(
                "SELECT id, name, mbid, summary FROM artist WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Artist {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        mbid: row.get(2)?,
                        summary: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(artist)
    }

    fn delete_artist(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM artist WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

impl AlbumRepository for SqliteCatalogStore {
    fn album_ids_by_artist(&self, artist_id: i64) -> Result<Vec<i64>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare_cached("SELECT id FROM album WHERE artist_id = ?1 ORDER BY id")?;
        let ids = stmt
            .query_map(params![artist_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    fn load_album(&self, id: i64) -> Result<Album> {
        Ok(self.get_album(id)?.unwrap_or_else(|| Album::with_id(id)))
    }

    fn delete_album(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM album WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

impl TrackRepository for SqliteCatalogStore {
    fn track_ids_by_album(&self, album_id: i64) -> Result<Vec<i64>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare_cached("SELECT id FROM track WHERE album_id = ?1 ORDER BY id")?;
        let ids = stmt
            .query_map(params![album_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    fn delete_track(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM track WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

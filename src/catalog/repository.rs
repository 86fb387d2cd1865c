//! Repository ports for catalog entities.
//!
//! The deletion flows work entirely against these traits so storage can be
//! swapped (or stubbed in tests) without touching the orchestration.

use super::models::{Album, Artist};
use anyhow::Result;

pub trait ArtistRepository: Send + Sync {
    /// Returns the artist with the given id.
    /// Returns Ok(None) if the artist does not exist.
    /// Returns Err if there is a database error.
    fn get_artist(&self, id: i64) -> Result<Option<Artist>>;

    /// Deletes the artist row. Returns whether a row was actually removed.
    fn delete_artist(&self, id: i64) -> Result<bool>;
}

pub trait AlbumRepository: Send + Sync {
    /// Returns the ids of all albums belonging to the artist, ascending.
    fn album_ids_by_artist(&self, artist_id: i64) -> Result<Vec<i64>>;

    /// Materializes an album value. A missing row yields an identity-only
    /// value rather than an error; only a database failure is an Err.
    fn load_album(&self, id: i64) -> Result<Album>;

    /// Deletes the album row. Returns whether a row was actually removed.
    fn delete_album(&self, id: i64) -> Result<bool>;
}

pub trait TrackRepository: Send + Sync {
    /// Returns the ids of all tracks belonging to the album, ascending.
    fn track_ids_by_album(&self, album_id: i64) -> Result<Vec<i64>>;

    /// Deletes the track row. Returns whether a row was actually removed.
    fn delete_track(&self, id: i64) -> Result<bool>;
}

//! Catalog entity models.
//!
//! Identities are stable integer row ids. An `Album` belongs to exactly one
//! `Artist`, a `Track` to exactly one `Album`; the references are plain ids,
//! not enforced by the storage layer.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    /// MusicBrainz identifier, when known.
    pub mbid: Option<String>,
    pub summary: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: i64,
    pub artist_id: i64,
    pub name: String,
    pub year: Option<i32>,
}

impl Album {
    /// An album value carrying only its identity. Deletion flows need
    /// nothing more than the id, so materializing a row that no longer
    /// exists yields this rather than an error.
    pub fn with_id(id: i64) -> Self {
        Album {
            id,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub album_id: i64,
    pub name: String,
    pub track_number: Option<i32>,
    pub duration_sec: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_with_id_carries_only_identity() {
        let album = Album::with_id(42);
        assert_eq!(album.id, 42);
        assert_eq!(album.artist_id, 0);
        assert!(album.name.is_empty());
        assert!(album.year.is_none());
    }

    #[test]
    fn artist_roundtrips_through_json() {
        let artist = Artist {
            id: 7,
            name: "The Example".to_string(),
            mbid: Some("11d4b7f5-9f0b-42a4-9b3f-000000000000".to_string()),
            summary: None,
        };
        let json = serde_json::to_string(&artist).unwrap();
        assert_eq!(serde_json::from_str::<Artist>(&json).unwrap(), artist);
    }
}

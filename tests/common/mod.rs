//! Shared fixtures for deletion tests: tempdir-backed stores wired the
//! same way the admin binary wires them.

use anyhow::Result;
use melodica_catalog::{
    all_collectors, ArtistDeleter, CascadingAlbumDeleter, SqliteAnnotationStore,
    SqliteCatalogStore, SubjectType,
};
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestWorld {
    // Held so the databases outlive the stores.
    _temp_dir: TempDir,
    pub catalog: Arc<SqliteCatalogStore>,
    pub annotations: Arc<SqliteAnnotationStore>,
}

/// Per-family annotation row counts for one subject.
#[derive(Debug, PartialEq, Eq)]
pub struct AnnotationCounts {
    pub art: usize,
    pub ratings: usize,
    pub flags: usize,
    pub shouts: usize,
    pub activity: usize,
}

impl AnnotationCounts {
    pub fn zero() -> Self {
        AnnotationCounts {
            art: 0,
            ratings: 0,
            flags: 0,
            shouts: 0,
            activity: 0,
        }
    }

    pub fn ones() -> Self {
        AnnotationCounts {
            art: 1,
            ratings: 1,
            flags: 1,
            shouts: 1,
            activity: 1,
        }
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let catalog =
            Arc::new(SqliteCatalogStore::new(temp_dir.path().join("catalog.db")).unwrap());
        let annotations =
            Arc::new(SqliteAnnotationStore::new(temp_dir.path().join("annotations.db")).unwrap());
        TestWorld {
            _temp_dir: temp_dir,
            catalog,
            annotations,
        }
    }

    /// The production wiring: cascading album deleter underneath the
    /// artist deleter, all five collectors on both levels.
    pub fn artist_deleter(&self) -> ArtistDeleter {
        let collectors = all_collectors(self.annotations.clone(), self.annotations.clone());
        let album_deleter = Arc::new(CascadingAlbumDeleter::new(
            self.catalog.clone(),
            self.catalog.clone(),
            collectors.clone(),
        ));
        ArtistDeleter::new(
            album_deleter,
            self.catalog.clone(),
            self.catalog.clone(),
            collectors,
        )
    }

    /// Adds one row of every annotation family for the subject.
    pub fn annotate(&self, subject_type: SubjectType, subject_id: i64) -> Result<()> {
        self.annotations
            .add_art(subject_type, subject_id, "default", "image/jpeg", Some(2048))?;
        self.annotations.add_rating(1, subject_type, subject_id, 4)?;
        self.annotations.add_flag(1, subject_type, subject_id)?;
        self.annotations
            .post_shout(1, subject_type, subject_id, "nice", false)?;
        self.annotations
            .record_activity(1, "played", subject_type, subject_id)?;
        Ok(())
    }

    pub fn annotation_counts(
        &self,
        subject_type: SubjectType,
        subject_id: i64,
    ) -> AnnotationCounts {
        use melodica_catalog::ShoutRepository;
        AnnotationCounts {
            art: self
                .annotations
                .art_for(subject_type, subject_id)
                .unwrap()
                .len(),
            ratings: self
                .annotations
                .ratings_for(subject_type, subject_id)
                .unwrap()
                .len(),
            flags: self
                .annotations
                .flags_for(subject_type, subject_id)
                .unwrap()
                .len(),
            shouts: self
                .annotations
                .shouts_for(subject_type, subject_id)
                .unwrap()
                .len(),
            activity: self
                .annotations
                .activity_for(subject_type, subject_id)
                .unwrap()
                .len(),
        }
    }
}

pub struct SeededArtist {
    pub artist_id: i64,
    pub album_ids: Vec<i64>,
    pub track_ids: Vec<i64>,
}

/// Seeds an artist with two albums of two tracks each, plus one row of
/// every annotation family on the artist, every album and every track.
pub fn seed_discography(world: &TestWorld, name: &str) -> SeededArtist {
    let artist_id = world.catalog.add_artist(name, None, None).unwrap();
    world.annotate(SubjectType::Artist, artist_id).unwrap();

    let mut album_ids = Vec::new();
    let mut track_ids = Vec::new();
    for album_index in 0..2 {
        let album_id = world
            .catalog
            .add_album(artist_id, &format!("{} album {}", name, album_index), None)
            .unwrap();
        world.annotate(SubjectType::Album, album_id).unwrap();
        album_ids.push(album_id);

        for track_index in 0..2 {
            let track_id = world
                .catalog
                .add_track(
                    album_id,
                    &format!("{} track {}.{}", name, album_index, track_index),
                    Some(track_index + 1),
                    Some(180),
                )
                .unwrap();
            world.annotate(SubjectType::Track, track_id).unwrap();
            track_ids.push(track_id);
        }
    }

    SeededArtist {
        artist_id,
        album_ids,
        track_ids,
    }
}

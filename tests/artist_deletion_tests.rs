//! End-to-end artist deletion tests against real sqlite stores.
//!
//! These drive the production wiring: cascading album deleter underneath
//! the artist deleter, with all five annotation garbage collectors.

mod common;

use common::{seed_discography, AnnotationCounts, TestWorld};
use melodica_catalog::catalog::{Album, AlbumRepository, ArtistRepository, TrackRepository};
use melodica_catalog::{
    AlbumDeleter, AlbumDeletionError, ArtistDeleter, CascadingAlbumDeleter, SubjectType,
};
use melodica_catalog::gc::all_collectors;
use std::sync::Arc;

// =============================================================================
// Full cascade
// =============================================================================

#[test]
fn full_cascade_removes_artist_albums_tracks_and_annotations() {
    let world = TestWorld::new();
    let doomed = seed_discography(&world, "Doomed");
    let survivor = seed_discography(&world, "Survivor");

    let artist = world
        .catalog
        .get_artist(doomed.artist_id)
        .unwrap()
        .unwrap();
    world.artist_deleter().remove(&artist).unwrap();

    // Catalog rows are gone at every level.
    assert!(world.catalog.get_artist(doomed.artist_id).unwrap().is_none());
    assert!(world
        .catalog
        .album_ids_by_artist(doomed.artist_id)
        .unwrap()
        .is_empty());
    for album_id in &doomed.album_ids {
        assert!(world.catalog.get_album(*album_id).unwrap().is_none());
    }
    for track_id in &doomed.track_ids {
        assert!(world.catalog.get_track(*track_id).unwrap().is_none());
    }

    // Annotations are reclaimed at every level.
    assert_eq!(
        world.annotation_counts(SubjectType::Artist, doomed.artist_id),
        AnnotationCounts::zero()
    );
    for album_id in &doomed.album_ids {
        assert_eq!(
            world.annotation_counts(SubjectType::Album, *album_id),
            AnnotationCounts::zero()
        );
    }
    for track_id in &doomed.track_ids {
        assert_eq!(
            world.annotation_counts(SubjectType::Track, *track_id),
            AnnotationCounts::zero()
        );
    }

    // The other artist is untouched.
    assert!(world
        .catalog
        .get_artist(survivor.artist_id)
        .unwrap()
        .is_some());
    assert_eq!(
        world
            .catalog
            .album_ids_by_artist(survivor.artist_id)
            .unwrap()
            .len(),
        2
    );
    assert_eq!(
        world.annotation_counts(SubjectType::Artist, survivor.artist_id),
        AnnotationCounts::ones()
    );
    for album_id in &survivor.album_ids {
        assert_eq!(
            world.annotation_counts(SubjectType::Album, *album_id),
            AnnotationCounts::ones()
        );
    }
}

#[test]
fn removing_artist_without_albums_still_collects_annotations() {
    let world = TestWorld::new();
    let artist_id = world.catalog.add_artist("Solo", None, None).unwrap();
    world.annotate(SubjectType::Artist, artist_id).unwrap();

    let artist = world.catalog.get_artist(artist_id).unwrap().unwrap();
    world.artist_deleter().remove(&artist).unwrap();

    assert!(world.catalog.get_artist(artist_id).unwrap().is_none());
    assert_eq!(
        world.annotation_counts(SubjectType::Artist, artist_id),
        AnnotationCounts::zero()
    );
}

// =============================================================================
// Partial failure
// =============================================================================

/// Delegates to the real deleter but fails on one chosen album.
struct FlakyAlbumDeleter {
    inner: CascadingAlbumDeleter,
    fail_on: i64,
}

impl AlbumDeleter for FlakyAlbumDeleter {
    fn delete(&self, album: &Album) -> Result<(), AlbumDeletionError> {
        if album.id == self.fail_on {
            return Err(AlbumDeletionError);
        }
        self.inner.delete(album)
    }
}

#[test]
fn failed_album_deletion_aborts_and_leaves_artist_intact() {
    let world = TestWorld::new();
    let seeded = seed_discography(&world, "Flaky");
    let first_album = seeded.album_ids[0];
    let second_album = seeded.album_ids[1];

    let collectors = all_collectors(world.annotations.clone(), world.annotations.clone());
    let album_deleter = Arc::new(FlakyAlbumDeleter {
        inner: CascadingAlbumDeleter::new(
            world.catalog.clone(),
            world.catalog.clone(),
            collectors.clone(),
        ),
        fail_on: second_album,
    });
    let deleter = ArtistDeleter::new(
        album_deleter,
        world.catalog.clone(),
        world.catalog.clone(),
        collectors,
    );

    let artist = world
        .catalog
        .get_artist(seeded.artist_id)
        .unwrap()
        .unwrap();
    assert!(deleter.remove(&artist).is_err());

    // The first album was genuinely removed before the failure; nothing is
    // rolled back.
    assert!(world.catalog.get_album(first_album).unwrap().is_none());
    assert_eq!(
        world.annotation_counts(SubjectType::Album, first_album),
        AnnotationCounts::zero()
    );

    // The failing album, the artist row and their annotations all survive.
    assert!(world.catalog.get_album(second_album).unwrap().is_some());
    assert_eq!(
        world.annotation_counts(SubjectType::Album, second_album),
        AnnotationCounts::ones()
    );
    assert!(world.catalog.get_artist(seeded.artist_id).unwrap().is_some());
    assert_eq!(
        world.annotation_counts(SubjectType::Artist, seeded.artist_id),
        AnnotationCounts::ones()
    );
    assert_eq!(
        world
            .catalog
            .track_ids_by_album(second_album)
            .unwrap()
            .len(),
        2
    );
}

// =============================================================================
// Missing artist row
// =============================================================================

#[test]
fn removing_missing_artist_row_succeeds_without_collection() {
    let world = TestWorld::new();

    // Annotations for an artist id that has no catalog row. The delete
    // reports that nothing was removed, so collection must not run.
    let ghost = melodica_catalog::catalog::Artist {
        id: 424242,
        name: "Ghost".to_string(),
        mbid: None,
        summary: None,
    };
    world.annotate(SubjectType::Artist, ghost.id).unwrap();

    world.artist_deleter().remove(&ghost).unwrap();

    assert_eq!(
        world.annotation_counts(SubjectType::Artist, ghost.id),
        AnnotationCounts::ones()
    );
}

#[test]
fn removing_an_artist_twice_is_a_silent_no_op() {
    let world = TestWorld::new();
    let seeded = seed_discography(&world, "Twice");

    let artist = world
        .catalog
        .get_artist(seeded.artist_id)
        .unwrap()
        .unwrap();
    let deleter = world.artist_deleter();

    deleter.remove(&artist).unwrap();
    // Second pass finds no albums and no artist row: success, no error.
    deleter.remove(&artist).unwrap();

    assert!(world.catalog.get_artist(seeded.artist_id).unwrap().is_none());
}

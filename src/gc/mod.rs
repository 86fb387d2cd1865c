//! Garbage collection of orphaned annotation rows.
//!
//! Collectors are keyed purely by `(subject_type, subject_id)` and know
//! nothing about the entity that triggered the purge, so the same set of
//! adapters serves every deletable entity type. Calls are best-effort:
//! a collector never fails its caller, it logs and swallows store errors.

use crate::annotations::{ShoutRepository, SqliteAnnotationStore, SubjectType};
use std::sync::Arc;
use tracing::{debug, warn};

pub trait GarbageCollector: Send + Sync {
    /// Removes every row of one annotation family referencing the subject.
    /// Idempotent: collecting when nothing matches is a no-op.
    fn collect_garbage(&self, subject_type: SubjectType, subject_id: i64);
}

/// Builds the full set of collectors the deletion flows fan out to.
pub fn all_collectors(
    annotations: Arc<SqliteAnnotationStore>,
    shouts: Arc<dyn ShoutRepository>,
) -> Vec<Arc<dyn GarbageCollector>> {
    vec![
        Arc::new(ArtGc(annotations.clone())),
        Arc::new(FlagGc(annotations.clone())),
        Arc::new(RatingGc(annotations.clone())),
        Arc::new(ShoutGc(shouts)),
        Arc::new(ActivityGc(annotations)),
    ]
}

pub struct ArtGc(pub Arc<SqliteAnnotationStore>);

impl GarbageCollector for ArtGc {
    fn collect_garbage(&self, subject_type: SubjectType, subject_id: i64) {
        match self.0.purge_art(subject_type, subject_id) {
            Ok(removed) => debug!("Purged {} art rows for {} {}", removed, subject_type, subject_id),
            Err(e) => warn!(
                "Art garbage collection failed for {} {}: {:#}",
                subject_type, subject_id, e
            ),
        }
    }
}

pub struct FlagGc(pub Arc<SqliteAnnotationStore>);

impl GarbageCollector for FlagGc {
    fn collect_garbage(&self, subject_type: SubjectType, subject_id: i64) {
        match self.0.purge_flags(subject_type, subject_id) {
            Ok(removed) => debug!(
                "Purged {} user flag rows for {} {}",
                removed, subject_type, subject_id
            ),
            Err(e) => warn!(
                "User flag garbage collection failed for {} {}: {:#}",
                subject_type, subject_id, e
            ),
        }
    }
}

pub struct RatingGc(pub Arc<SqliteAnnotationStore>);

impl GarbageCollector for RatingGc {
    fn collect_garbage(&self, subject_type: SubjectType, subject_id: i64) {
        match self.0.purge_ratings(subject_type, subject_id) {
            Ok(removed) => debug!(
                "Purged {} rating rows for {} {}",
                removed, subject_type, subject_id
            ),
            Err(e) => warn!(
                "Rating garbage collection failed for {} {}: {:#}",
                subject_type, subject_id, e
            ),
        }
    }
}

pub struct ShoutGc(pub Arc<dyn ShoutRepository>);

impl GarbageCollector for ShoutGc {
    fn collect_garbage(&self, subject_type: SubjectType, subject_id: i64) {
        match self.0.purge_for_subject(subject_type, subject_id) {
            Ok(removed) => debug!(
                "Purged {} shout rows for {} {}",
                removed, subject_type, subject_id
            ),
            Err(e) => warn!(
                "Shout garbage collection failed for {} {}: {:#}",
                subject_type, subject_id, e
            ),
        }
    }
}

pub struct ActivityGc(pub Arc<SqliteAnnotationStore>);

impl GarbageCollector for ActivityGc {
    fn collect_garbage(&self, subject_type: SubjectType, subject_id: i64) {
        match self.0.purge_activity(subject_type, subject_id) {
            Ok(removed) => debug!(
                "Purged {} user activity rows for {} {}",
                removed, subject_type, subject_id
            ),
            Err(e) => warn!(
                "User activity garbage collection failed for {} {}: {:#}",
                subject_type, subject_id, e
            ),
        }
    }
}

use super::models::{Shout, SubjectType};
use anyhow::Result;

/// Port for shout (comment) storage. The deletion flows only consume
/// `purge_for_subject`; the lookup and delete primitives exist for the
/// moderation surface.
pub trait ShoutRepository: Send + Sync {
    /// Returns all shouts posted on the given subject, oldest first.
    fn shouts_for(&self, subject_type: SubjectType, subject_id: i64) -> Result<Vec<Shout>>;

    /// Deletes a single shout. Returns whether a row was actually removed.
    fn delete_shout(&self, id: i64) -> Result<bool>;

    /// Deletes every shout referencing the subject. Returns the number of
    /// rows removed; removing nothing is a no-op, not an error.
    fn purge_for_subject(&self, subject_type: SubjectType, subject_id: i64) -> Result<usize>;
}

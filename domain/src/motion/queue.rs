//! Motion queue
//!
//! Submitted motions wait here until they are withdrawn, resolved, or the
//! whole queue is cleared after a motion passes. Storage order is submission
//! order; [`MotionQueue::ordered_view`] presents them in floor priority.
//!
//! # Example
//!
//! ```
//! use mun_domain::motion::{MotionId, MotionParameters, MotionQueue};
//!
//! let mut queue = MotionQueue::new();
//! queue
//!     .submit(
//!         MotionId::ModeratedCaucus,
//!         MotionParameters::new().with_total_time(600).with_speaker_time(60),
//!         1_000,
//!     )
//!     .unwrap();
//! let suspend = queue
//!     .submit(MotionId::SuspendMeeting, MotionParameters::new().with_timer(900), 2_000)
//!     .unwrap();
//!
//! let first = queue.ordered_view().first().unwrap();
//! assert_eq!(first.queue_id, suspend);
//! ```

use super::registry::{Motion, MotionId, MotionParameters};
use crate::core::error::DomainError;
use crate::core::ids::QueueId;
use serde::{Deserialize, Serialize};

/// A submitted, not yet resolved motion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedMotion {
    pub queue_id: QueueId,
    pub motion_id: MotionId,
    pub parameters: MotionParameters,
    /// Milliseconds since the Unix epoch
    pub submitted_at: u64,
}

impl QueuedMotion {
    pub fn motion(&self) -> &'static Motion {
        self.motion_id.motion()
    }

    /// (disruption rank, type-specific key, queue id)
    fn priority(&self) -> (u8, u32, QueueId) {
        let motion = self.motion();
        (
            motion.disruption_rank,
            motion.secondary_key(&self.parameters),
            self.queue_id,
        )
    }
}

#[derive(Debug, Clone)]
pub struct MotionQueue {
    entries: Vec<QueuedMotion>,
    next_id: QueueId,
}

impl Default for MotionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionQueue {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: QueueId(1),
        }
    }

    /// Validate parameters and enqueue the motion
    ///
    /// Ids are strictly increasing for the lifetime of the queue, including
    /// across [`clear`](Self::clear).
    pub fn submit(
        &mut self,
        motion_id: MotionId,
        parameters: MotionParameters,
        submitted_at: u64,
    ) -> Result<QueueId, DomainError> {
        motion_id.motion().validate_parameters(&parameters)?;

        let queue_id = self.next_id;
        self.next_id = queue_id.next();
        self.entries.push(QueuedMotion {
            queue_id,
            motion_id,
            parameters,
            submitted_at,
        });
        Ok(queue_id)
    }

    /// Remove a motion; returns whether anything was removed
    pub fn withdraw(&mut self, queue_id: QueueId) -> bool {
        self.take(queue_id).is_some()
    }

    /// Remove and return a motion
    pub fn take(&mut self, queue_id: QueueId) -> Option<QueuedMotion> {
        let index = self.entries.iter().position(|m| m.queue_id == queue_id)?;
        Some(self.entries.remove(index))
    }

    /// Empty the queue, returning how many motions were dropped
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    pub fn get(&self, queue_id: QueueId) -> Option<&QueuedMotion> {
        self.entries.iter().find(|m| m.queue_id == queue_id)
    }

    pub fn contains(&self, queue_id: QueueId) -> bool {
        self.get(queue_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of every queued motion in submission order
    pub fn ids(&self) -> Vec<QueueId> {
        self.entries.iter().map(|m| m.queue_id).collect()
    }

    /// Motions in floor priority order
    pub fn ordered_view(&self) -> OrderedView<'_> {
        let mut motions: Vec<&QueuedMotion> = self.entries.iter().collect();
        motions.sort_by_key(|m| m.priority());
        OrderedView { motions }
    }
}

/// Priority-ordered borrow of the queue
///
/// Iterating does not consume the view, so it can be walked any number of
/// times while the queue is not mutated.
#[derive(Debug, Clone)]
pub struct OrderedView<'a> {
    motions: Vec<&'a QueuedMotion>,
}

impl<'a> OrderedView<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a QueuedMotion> + '_ {
        self.motions.iter().copied()
    }

    pub fn first(&self) -> Option<&'a QueuedMotion> {
        self.motions.first().copied()
    }

    pub fn len(&self) -> usize {
        self.motions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    pub fn to_vec(&self) -> Vec<QueuedMotion> {
        self.motions.iter().map(|m| (*m).clone()).collect()
    }
}

impl<'a> IntoIterator for OrderedView<'a> {
    type Item = &'a QueuedMotion;
    type IntoIter = std::vec::IntoIter<&'a QueuedMotion>;

    fn into_iter(self) -> Self::IntoIter {
        self.motions.into_iter()
    }
}

impl<'v, 'a> IntoIterator for &'v OrderedView<'a> {
    type Item = &'a QueuedMotion;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a QueuedMotion>>;

    fn into_iter(self) -> Self::IntoIter {
        self.motions.iter().copied()
    }
}

#![forbid(unsafe_code)]

//! Gallery navigation state.
//!
//! [`GalleryNavigator`] holds the ordered gallery members and the current
//! position. It is a plain state holder: the overlay mutates it from a
//! single input path, so there is no interior locking.
//!
//! # Invariants
//!
//! 1. `current` always addresses a member: `0 <= current < len`.
//! 2. A move whose candidate index falls outside `[0, len)` is rejected and
//!    leaves the state untouched. Navigation saturates; it never wraps.
//! 3. A zero offset is never accepted.

use std::fmt;

use crate::media::{MediaItem, MediaNode, NodeId};

/// Outcome of [`GalleryNavigator::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// Whether the move happened.
    pub accepted: bool,
    /// Index before the move.
    pub old_index: usize,
    /// Index after the move (equal to `old_index` when rejected).
    pub new_index: usize,
}

impl Advance {
    /// A rejected move at `index`.
    #[must_use]
    pub const fn rejected(index: usize) -> Self {
        Self {
            accepted: false,
            old_index: index,
            new_index: index,
        }
    }
}

/// Position for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 0-based index.
    pub index: usize,
    /// Number of members.
    pub total: usize,
}

impl fmt::Display for Position {
    /// 1-based counter text, e.g. `3/5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index + 1, self.total)
    }
}

/// Ordered gallery members plus the current position.
#[derive(Debug, Clone, Default)]
pub struct GalleryNavigator {
    members: Vec<MediaItem>,
    current: usize,
}

impl GalleryNavigator {
    /// Navigator over `members` starting at `start`, or `None` if `start`
    /// does not address a member.
    #[must_use]
    pub fn new(members: Vec<MediaItem>, start: usize) -> Option<Self> {
        let mut nav = Self::default();
        nav.initialize(members, start).then_some(nav)
    }

    /// Capture `nodes` and start at the member whose id is `target`.
    #[must_use]
    pub fn from_nodes(nodes: &[MediaNode], target: NodeId) -> Option<Self> {
        let members: Vec<MediaItem> = nodes.iter().map(MediaItem::capture).collect();
        let start = locate(&members, target)?;
        Self::new(members, start)
    }

    /// Replace the members and position.
    ///
    /// No-op returning `false` when `start` is out of range.
    pub fn initialize(&mut self, members: Vec<MediaItem>, start: usize) -> bool {
        if start >= members.len() {
            return false;
        }
        self.members = members;
        self.current = start;
        true
    }

    /// Move by `offset` if the destination is a member.
    pub fn advance(&mut self, offset: isize) -> Advance {
        let old_index = self.current;
        if offset == 0 {
            return Advance::rejected(old_index);
        }
        let candidate = old_index
            .checked_add_signed(offset)
            .filter(|&i| i < self.members.len());
        match candidate {
            Some(new_index) => {
                self.current = new_index;
                Advance {
                    accepted: true,
                    old_index,
                    new_index,
                }
            }
            None => Advance::rejected(old_index),
        }
    }

    /// Whether `advance(offset)` would be accepted.
    pub fn can_advance(&self, offset: isize) -> bool {
        offset != 0
            && self
                .current
                .checked_add_signed(offset)
                .is_some_and(|i| i < self.members.len())
    }

    pub fn position(&self) -> Position {
        Position {
            index: self.current,
            total: self.members.len(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The member at the current position.
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.members.get(self.current)
    }

    pub fn members(&self) -> &[MediaItem] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Index of the member captured from node `target`.
#[must_use]
pub fn locate(members: &[MediaItem], target: NodeId) -> Option<usize> {
    members.iter().position(|m| m.id() == target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(len: u64, start: usize) -> GalleryNavigator {
        let members = (0..len)
            .map(|i| MediaItem::capture(&MediaNode::image(i, format!("{i}.jpg"))))
            .collect();
        GalleryNavigator::new(members, start).expect("valid start")
    }

    #[test]
    fn counter_text_is_one_based() {
        let nav = gallery(5, 2);
        assert_eq!(nav.position().to_string(), "3/5");
    }

    #[test]
    fn advance_within_bounds() {
        let mut nav = gallery(5, 2);
        let adv = nav.advance(1);
        assert_eq!(
            adv,
            Advance {
                accepted: true,
                old_index: 2,
                new_index: 3
            }
        );
        assert_eq!(nav.current_index(), 3);
        assert_eq!(nav.current_item().map(MediaItem::id), Some(NodeId(3)));
    }

    #[test]
    fn advance_saturates_at_both_ends() {
        let mut nav = gallery(3, 0);
        assert!(!nav.advance(-1).accepted);
        assert_eq!(nav.current_index(), 0);

        assert!(nav.advance(2).accepted);
        let adv = nav.advance(1);
        assert_eq!(adv, Advance::rejected(2));
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn large_jumps_out_of_range_are_rejected() {
        let mut nav = gallery(3, 1);
        assert!(!nav.advance(isize::MAX).accepted);
        assert!(!nav.advance(isize::MIN).accepted);
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn zero_offset_is_never_accepted() {
        let mut nav = gallery(3, 1);
        assert_eq!(nav.advance(0), Advance::rejected(1));
        assert!(!nav.can_advance(0));
    }

    #[test]
    fn can_advance_matches_advance() {
        let nav = gallery(3, 0);
        assert!(nav.can_advance(1));
        assert!(nav.can_advance(2));
        assert!(!nav.can_advance(3));
        assert!(!nav.can_advance(-1));
    }

    #[test]
    fn invalid_start_is_a_noop() {
        let mut nav = gallery(2, 1);
        let replacement = vec![MediaItem::capture(&MediaNode::image(9, "9.jpg"))];
        assert!(!nav.initialize(replacement, 4));
        assert_eq!(nav.len(), 2);
        assert_eq!(nav.current_index(), 1);

        assert!(GalleryNavigator::new(Vec::new(), 0).is_none());
    }

    #[test]
    fn from_nodes_locates_target() {
        let nodes: Vec<_> = (10..15)
            .map(|i| MediaNode::image(i, format!("{i}.jpg")))
            .collect();
        let nav = GalleryNavigator::from_nodes(&nodes, NodeId(13)).expect("found");
        assert_eq!(nav.current_index(), 3);
        assert!(GalleryNavigator::from_nodes(&nodes, NodeId(99)).is_none());
    }

    #[test]
    fn single_member_gallery() {
        let mut nav = gallery(1, 0);
        assert_eq!(nav.position().to_string(), "1/1");
        assert!(!nav.advance(1).accepted);
        assert!(!nav.advance(-1).accepted);
    }
}

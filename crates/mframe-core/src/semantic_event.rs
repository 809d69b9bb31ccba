#![forbid(unsafe_code)]

//! High-level semantic events derived from raw input.
//!
//! [`SemanticEvent`] represents user *intentions* rather than raw key
//! presses or touch coordinates. The gesture recognizer and the key map
//! convert raw [`Event`](crate::event::Event)s into these.
//!
//! ## Invariants
//! 1. A `Swipe` is always horizontal: `|dx| > |dy|`.
//! 2. A `Swipe` maps to exactly one navigation [`Direction`]: the content
//!    follows the finger, so dragging left reveals the next item.

use crate::geometry::Delta;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Navigation direction through an ordered gallery.
///
/// `Rightward` moves to a higher index and the incoming content slides in
/// from the right edge. `Leftward` moves to a lower index and slides in from
/// the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward lower indices; content enters from the left.
    Leftward,
    /// Toward higher indices; content enters from the right.
    Rightward,
}

impl Direction {
    /// Direction implied by a signed index offset, `None` for zero.
    #[must_use]
    pub const fn from_offset(offset: isize) -> Option<Self> {
        if offset > 0 {
            Some(Self::Rightward)
        } else if offset < 0 {
            Some(Self::Leftward)
        } else {
            None
        }
    }

    /// Unit index offset for this direction.
    #[must_use]
    pub const fn offset(self) -> isize {
        match self {
            Self::Leftward => -1,
            Self::Rightward => 1,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Leftward => Self::Rightward,
            Self::Rightward => Self::Leftward,
        }
    }

    /// Stable lowercase name, suitable for CSS class suffixes and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leftward => "leftward",
            Self::Rightward => "rightward",
        }
    }
}

// ---------------------------------------------------------------------------
// SwipeDirection
// ---------------------------------------------------------------------------

/// Direction the finger travelled during a horizontal swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Navigation requested by this swipe.
    ///
    /// Dragging the content left pulls the next (higher index) item in.
    #[must_use]
    pub const fn navigation(self) -> Direction {
        match self {
            Self::Left => Direction::Rightward,
            Self::Right => Direction::Leftward,
        }
    }
}

// ---------------------------------------------------------------------------
// SemanticEvent
// ---------------------------------------------------------------------------

/// High-level events derived from raw input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SemanticEvent {
    /// A completed horizontal swipe.
    Swipe {
        /// Direction the finger travelled.
        direction: SwipeDirection,
        /// Displacement between touch-start and touch-end.
        delta: Delta,
    },
}

impl SemanticEvent {
    /// Navigation direction requested by this event, if any.
    #[must_use]
    pub const fn navigation(&self) -> Option<Direction> {
        match self {
            Self::Swipe { direction, .. } => Some(direction.navigation()),
        }
    }
}

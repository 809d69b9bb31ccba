#![forbid(unsafe_code)]

//! Panel transition engine.
//!
//! Only the current panel persists. A navigation builds exactly one panel
//! for the destination, tags it `Incoming`, tags the current panel
//! `Outgoing`, and asks the presenter to animate both along the same axis.
//! When the presenter reports completion, the outgoing panel is removed and
//! the incoming one becomes `Current`.
//!
//! # State Machine
//!
//! ```text
//!            begin(item, dir)                 complete(live token)
//!  Settled ──────────────────▶ Transitioning ─────────────────────▶ Settled
//!     ▲                            │   ▲
//!     │        settle()            │   │ begin(): settle in-flight, then
//!     └────────────────────────────┘   └──────── start the new transition
//! ```
//!
//! # Invariants
//!
//! 1. When settled, exactly one panel is live and it is tagged `Current`.
//! 2. While transitioning, exactly two panels are live: one `Incoming` and
//!    one `Outgoing`, both carrying the transition direction.
//! 3. Every [`TransitionToken`] is unique and strictly greater than every
//!    earlier one.
//! 4. Each constructed panel is promoted or removed at most once.
//!
//! # Interruption
//!
//! A `begin` while a transition is in flight settles it on the spot: the
//! outgoing panel is removed without waiting for its animation and the
//! incoming panel is promoted. The late completion signal for the
//! superseded token is then stale and ignored.

use std::fmt;

use mframe_core::semantic_event::Direction;

use crate::media::MediaItem;
use crate::panel::{Panel, PanelFactory, PanelRole};
use crate::presenter::Presenter;

/// Generation marker of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionToken(u64);

impl TransitionToken {
    /// Raw generation number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransitionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct InFlight {
    token: TransitionToken,
    incoming: Panel,
    outgoing: Panel,
}

/// Owns the live panels and the transition generation.
#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    factory: PanelFactory,
    current: Option<Panel>,
    in_flight: Option<InFlight>,
    generation: u64,
}

impl TransitionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and insert the first panel, without animation.
    ///
    /// Any live panels are removed first.
    pub fn mount(&mut self, item: &MediaItem, presenter: &mut impl Presenter) {
        self.clear(presenter);
        let panel = self.factory.build(Some(item));
        presenter.insert_panel(&panel);
        self.current = Some(panel);
    }

    /// Start a transition to `item`, entering from `direction`.
    ///
    /// Returns the token the presenter will report on completion.
    pub fn begin(
        &mut self,
        item: &MediaItem,
        direction: Direction,
        presenter: &mut impl Presenter,
    ) -> TransitionToken {
        let interrupted = self.settle(presenter);

        self.generation += 1;
        let token = TransitionToken(self.generation);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "mframe::transition",
            token = token.get(),
            direction = direction.as_str(),
            interrupted,
            "transition begin"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = interrupted;

        let mut incoming = self.factory.build(Some(item));

        let Some(mut outgoing) = self.current.take() else {
            // Nothing on screen to hand off from; show the panel directly.
            presenter.insert_panel(&incoming);
            self.current = Some(incoming);
            return token;
        };

        if outgoing.pause_media() {
            presenter.pause_media(outgoing.id());
        }

        incoming.set_animating(PanelRole::Incoming, direction);
        outgoing.set_animating(PanelRole::Outgoing, direction);

        // Staged off-screen first; the reflow pins that position so the
        // tag change below animates instead of jumping.
        presenter.insert_panel(&incoming);
        presenter.reflow();
        presenter.play_transition(token, &incoming, &outgoing);

        self.in_flight = Some(InFlight {
            token,
            incoming,
            outgoing,
        });
        token
    }

    /// Handle a completion signal. Returns `false` for stale tokens.
    pub fn complete(&mut self, token: TransitionToken, presenter: &mut impl Presenter) -> bool {
        match self.in_flight.take() {
            Some(flight) if flight.token == token => {
                self.promote(flight, presenter);
                true
            }
            other => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "mframe::transition",
                    token = token.get(),
                    live = other.as_ref().map(|f| f.token.get()),
                    "stale completion ignored"
                );
                self.in_flight = other;
                false
            }
        }
    }

    /// Finish any in-flight transition immediately. Returns whether one was
    /// in flight.
    pub fn settle(&mut self, presenter: &mut impl Presenter) -> bool {
        match self.in_flight.take() {
            Some(flight) => {
                self.promote(flight, presenter);
                true
            }
            None => false,
        }
    }

    fn promote(&mut self, flight: InFlight, presenter: &mut impl Presenter) {
        let InFlight {
            mut incoming,
            outgoing,
            ..
        } = flight;
        presenter.remove_panel(outgoing.id());
        incoming.settle();
        presenter.update_panel(&incoming);
        self.current = Some(incoming);
    }

    /// Remove every live panel.
    pub fn clear(&mut self, presenter: &mut impl Presenter) {
        if let Some(flight) = self.in_flight.take() {
            presenter.remove_panel(flight.outgoing.id());
            presenter.remove_panel(flight.incoming.id());
        }
        if let Some(panel) = self.current.take() {
            presenter.remove_panel(panel.id());
        }
    }

    /// Drop every live panel without telling the presenter, for when the
    /// presenter is discarding the whole root anyway.
    pub fn forget(&mut self) {
        self.in_flight = None;
        self.current = None;
    }

    /// The settled panel, `None` while transitioning.
    pub fn current_panel(&self) -> Option<&Panel> {
        self.current.as_ref()
    }

    pub fn incoming_panel(&self) -> Option<&Panel> {
        self.in_flight.as_ref().map(|f| &f.incoming)
    }

    pub fn outgoing_panel(&self) -> Option<&Panel> {
        self.in_flight.as_ref().map(|f| &f.outgoing)
    }

    /// The panel showing the latest requested content.
    pub fn visible_panel(&self) -> Option<&Panel> {
        self.incoming_panel().or(self.current.as_ref())
    }

    /// Token of the in-flight transition.
    pub fn live_token(&self) -> Option<TransitionToken> {
        self.in_flight.as_ref().map(|f| f.token)
    }

    pub fn is_transitioning(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Every live panel.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        let (incoming, outgoing) = match &self.in_flight {
            Some(f) => (Some(&f.incoming), Some(&f.outgoing)),
            None => (None, None),
        };
        self.current
            .iter()
            .chain(outgoing)
            .chain(incoming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaNode, NodeId, Playback};
    use crate::presenter::{HeadlessPresenter, PresenterOp};

    fn item(id: u64) -> MediaItem {
        MediaItem::capture(&MediaNode::image(id, format!("{id}.jpg")))
    }

    fn mounted(id: u64) -> (TransitionEngine, HeadlessPresenter) {
        let mut engine = TransitionEngine::new();
        let mut presenter = HeadlessPresenter::new();
        engine.mount(&item(id), &mut presenter);
        (engine, presenter)
    }

    #[test]
    fn mount_shows_one_current_panel() {
        let (engine, presenter) = mounted(0);
        assert_eq!(engine.panels().count(), 1);
        let panel = engine.current_panel().expect("current");
        assert_eq!(panel.role(), PanelRole::Current);
        assert_eq!(presenter.scene().panels.len(), 1);
    }

    #[test]
    fn begin_tags_incoming_and_outgoing_with_direction() {
        let (mut engine, mut p) = mounted(0);
        engine.begin(&item(1), Direction::Rightward, &mut p);

        let incoming = engine.incoming_panel().expect("incoming");
        let outgoing = engine.outgoing_panel().expect("outgoing");
        assert_eq!(incoming.role(), PanelRole::Incoming);
        assert_eq!(incoming.direction(), Some(Direction::Rightward));
        assert_eq!(outgoing.role(), PanelRole::Outgoing);
        assert_eq!(outgoing.direction(), Some(Direction::Rightward));
        assert!(engine.current_panel().is_none());
        assert_eq!(p.scene().panels.len(), 2);
    }

    #[test]
    fn leftward_direction_is_preserved() {
        let (mut engine, mut p) = mounted(1);
        engine.begin(&item(0), Direction::Leftward, &mut p);
        assert_eq!(
            engine.incoming_panel().and_then(Panel::direction),
            Some(Direction::Leftward)
        );
    }

    #[test]
    fn reflow_separates_insert_from_play() {
        let (mut engine, mut p) = mounted(0);
        p.take_ops();
        let token = engine.begin(&item(1), Direction::Rightward, &mut p);
        let ops = p.take_ops();
        let incoming = engine.incoming_panel().map(Panel::id).expect("incoming");
        let outgoing = engine.outgoing_panel().map(Panel::id).expect("outgoing");
        assert_eq!(
            ops,
            vec![
                PresenterOp::Insert(incoming),
                PresenterOp::Reflow,
                PresenterOp::Play {
                    token,
                    incoming,
                    outgoing
                },
            ]
        );
    }

    #[test]
    fn completion_promotes_incoming() {
        let (mut engine, mut p) = mounted(0);
        let token = engine.begin(&item(1), Direction::Rightward, &mut p);
        assert!(engine.complete(token, &mut p));

        assert!(!engine.is_transitioning());
        let current = engine.current_panel().expect("current");
        assert_eq!(current.role(), PanelRole::Current);
        assert_eq!(current.direction(), None);
        assert_eq!(current.source(), Some(NodeId(1)));
        assert_eq!(p.scene().panels.len(), 1);
        assert_eq!(p.scene().panels[0].role(), PanelRole::Current);
    }

    #[test]
    fn completion_is_idempotent() {
        let (mut engine, mut p) = mounted(0);
        let token = engine.begin(&item(1), Direction::Rightward, &mut p);
        assert!(engine.complete(token, &mut p));
        p.take_ops();
        assert!(!engine.complete(token, &mut p));
        assert!(p.ops().is_empty());
    }

    #[test]
    fn interruption_settles_previous_transition() {
        let (mut engine, mut p) = mounted(0);
        let first = engine.begin(&item(1), Direction::Rightward, &mut p);
        let second = engine.begin(&item(2), Direction::Rightward, &mut p);
        assert!(second > first);

        // The superseded completion is stale.
        assert!(!engine.complete(first, &mut p));
        assert_eq!(engine.live_token(), Some(second));
        assert_eq!(p.scene().panels.len(), 2);

        assert!(engine.complete(second, &mut p));
        let current: Vec<_> = p.scene().panels_with_role(PanelRole::Current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].source(), Some(NodeId(2)));
        assert_eq!(p.scene().panels.len(), 1);
    }

    #[test]
    fn settle_without_flight_is_noop() {
        let (mut engine, mut p) = mounted(0);
        p.take_ops();
        assert!(!engine.settle(&mut p));
        assert!(p.ops().is_empty());
    }

    #[test]
    fn outgoing_video_is_paused() {
        let mut engine = TransitionEngine::new();
        let mut p = HeadlessPresenter::new();
        let video = MediaItem::capture(&MediaNode::element(0, "figure").child(
            MediaNode::video(5, "v.mp4").playback(Playback::empty()),
        ));
        engine.mount(&video, &mut p);
        let id = engine.current_panel().map(Panel::id).expect("current");
        engine.begin(&item(1), Direction::Rightward, &mut p);
        assert!(p.ops().contains(&PresenterOp::Pause(id)));
    }

    #[test]
    fn outgoing_video_paused_even_when_modelled_paused() {
        let mut engine = TransitionEngine::new();
        let mut p = HeadlessPresenter::new();
        engine.mount(&MediaItem::capture(&MediaNode::video(0, "a.mp4")), &mut p);
        let id = engine.current_panel().map(Panel::id).expect("current");
        engine.begin(&item(1), Direction::Rightward, &mut p);
        assert!(p.ops().contains(&PresenterOp::Pause(id)));
    }

    #[test]
    fn outgoing_image_is_not_paused() {
        let (mut engine, mut p) = mounted(0);
        engine.begin(&item(1), Direction::Rightward, &mut p);
        assert!(!p.ops().iter().any(|op| matches!(op, PresenterOp::Pause(_))));
    }

    #[test]
    fn clear_removes_everything() {
        let (mut engine, mut p) = mounted(0);
        engine.begin(&item(1), Direction::Rightward, &mut p);
        engine.clear(&mut p);
        assert_eq!(engine.panels().count(), 0);
        assert!(p.scene().panels.is_empty());
    }

    #[test]
    fn begin_without_mount_shows_directly() {
        let mut engine = TransitionEngine::new();
        let mut p = HeadlessPresenter::new();
        let token = engine.begin(&item(3), Direction::Leftward, &mut p);
        assert!(!engine.is_transitioning());
        assert!(!engine.complete(token, &mut p));
        assert_eq!(
            engine.current_panel().and_then(Panel::source),
            Some(NodeId(3))
        );
    }
}

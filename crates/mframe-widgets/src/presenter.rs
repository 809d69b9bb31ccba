#![forbid(unsafe_code)]

//! Presentation layer boundary.
//!
//! The overlay decides *what* is on screen; a [`Presenter`] decides *how*.
//! Presenters render panels from their role and direction tags using
//! declarative transitions, own the overlay root and the page-level
//! listeners while a session is open, and report the end of each panel
//! transition back through
//! [`Microframe::on_transition_end`](crate::overlay::Microframe::on_transition_end).
//!
//! Calls arrive in a fixed order within one handler invocation, so a
//! presenter never needs to buffer or reorder them.
//!
//! [`HeadlessPresenter`] keeps an in-memory mirror of the scene and a log of
//! every call. Tests assert against it and the demo prints it.

use bitflags::bitflags;
use mframe_core::animation::TransitionStyle;

use crate::panel::{Panel, PanelId, PanelRole};
use crate::transition::TransitionToken;

bitflags! {
    /// Page-level listeners owned by an overlay session.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Listeners: u8 {
        /// Global key-down listener.
        const KEYDOWN = 0b001;
        /// Click listener on the overlay root.
        const CLICK   = 0b010;
        /// Touch-start/touch-end listeners on the overlay root.
        const TOUCH   = 0b100;
    }
}

/// Rendering surface for one overlay.
pub trait Presenter {
    /// Make the page underneath unscrollable.
    fn lock_scroll(&mut self);

    /// Restore page scrolling.
    fn unlock_scroll(&mut self);

    /// Create the overlay root in its hidden state.
    fn mount_root(&mut self, style: &TransitionStyle);

    /// Fade the overlay root in.
    fn show_root(&mut self);

    /// Fade the overlay root out and remove it with everything inside.
    fn dismiss_root(&mut self);

    /// Register session listeners.
    fn attach_listeners(&mut self, listeners: Listeners);

    /// Unregister session listeners.
    fn detach_listeners(&mut self, listeners: Listeners);

    /// Force a layout/paint boundary so the next tag change animates from
    /// the state that is on screen now.
    fn reflow(&mut self);

    /// Add a panel, positioned according to its tags without animating.
    fn insert_panel(&mut self, panel: &Panel);

    /// Re-apply a panel's tags.
    fn update_panel(&mut self, panel: &Panel);

    /// Remove a panel immediately.
    fn remove_panel(&mut self, id: PanelId);

    /// Animate `incoming` into place and `outgoing` away. Report completion
    /// with `token`.
    fn play_transition(&mut self, token: TransitionToken, incoming: &Panel, outgoing: &Panel);

    /// Pause playing media inside a panel.
    fn pause_media(&mut self, id: PanelId);

    /// Set the counter text, creating the counter on first use.
    fn set_counter(&mut self, text: &str);

    /// Set the navigation hint text and visibility, creating it on first use.
    fn set_hint(&mut self, text: &str, visible: bool);
}

// ---------------------------------------------------------------------------
// HeadlessPresenter
// ---------------------------------------------------------------------------

/// One recorded presenter call.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterOp {
    LockScroll,
    UnlockScroll,
    MountRoot,
    ShowRoot,
    DismissRoot,
    Attach(Listeners),
    Detach(Listeners),
    Reflow,
    Insert(PanelId),
    Update(PanelId, PanelRole),
    Remove(PanelId),
    Play {
        token: TransitionToken,
        incoming: PanelId,
        outgoing: PanelId,
    },
    Pause(PanelId),
    Counter(String),
    Hint(String, bool),
}

/// Lifecycle of the overlay root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootState {
    /// No root on the page.
    #[default]
    Absent,
    /// Mounted but not yet faded in.
    Mounted,
    /// Visible.
    Shown,
}

/// In-memory mirror of what a DOM presenter would have on the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Overlay root state.
    pub root: RootState,
    /// Whether page scrolling is locked.
    pub scroll_locked: bool,
    /// Number of live key-down listeners.
    pub key_listeners: usize,
    /// Number of live click listeners.
    pub click_listeners: usize,
    /// Number of live touch listener pairs.
    pub touch_listeners: usize,
    /// Panels in insertion order.
    pub panels: Vec<Panel>,
    /// Counter text, if a counter exists.
    pub counter: Option<String>,
    /// Hint text and visibility, if a hint exists.
    pub hint: Option<(String, bool)>,
}

impl Scene {
    /// Panels currently tagged with `role`.
    pub fn panels_with_role(&self, role: PanelRole) -> impl Iterator<Item = &Panel> {
        self.panels.iter().filter(move |p| p.role() == role)
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id() == id)
    }
}

/// Presenter that records calls and mirrors the scene in memory.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPresenter {
    scene: Scene,
    ops: Vec<PresenterOp>,
    played: Vec<TransitionToken>,
    root_mounts: usize,
    scroll_locks: usize,
    scroll_unlocks: usize,
    style: Option<TransitionStyle>,
}

impl HeadlessPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Every call so far, oldest first.
    pub fn ops(&self) -> &[PresenterOp] {
        &self.ops
    }

    /// Drain the recorded calls.
    pub fn take_ops(&mut self) -> Vec<PresenterOp> {
        std::mem::take(&mut self.ops)
    }

    /// Drain tokens of transitions started since the last call.
    pub fn take_played(&mut self) -> Vec<TransitionToken> {
        std::mem::take(&mut self.played)
    }

    /// Style passed to the most recent `mount_root`.
    pub fn style(&self) -> Option<&TransitionStyle> {
        self.style.as_ref()
    }

    /// Total `mount_root` calls.
    pub fn root_mounts(&self) -> usize {
        self.root_mounts
    }

    /// Total `(lock_scroll, unlock_scroll)` calls.
    pub fn scroll_toggles(&self) -> (usize, usize) {
        (self.scroll_locks, self.scroll_unlocks)
    }

    fn adjust(count: &mut usize, attach: bool) {
        if attach {
            *count += 1;
        } else {
            *count = count.saturating_sub(1);
        }
    }

    fn apply_listeners(&mut self, listeners: Listeners, attach: bool) {
        if listeners.contains(Listeners::KEYDOWN) {
            Self::adjust(&mut self.scene.key_listeners, attach);
        }
        if listeners.contains(Listeners::CLICK) {
            Self::adjust(&mut self.scene.click_listeners, attach);
        }
        if listeners.contains(Listeners::TOUCH) {
            Self::adjust(&mut self.scene.touch_listeners, attach);
        }
    }

    fn replace_panel(&mut self, panel: &Panel) {
        if let Some(slot) = self.scene.panels.iter_mut().find(|p| p.id() == panel.id()) {
            *slot = panel.clone();
        }
    }
}

impl Presenter for HeadlessPresenter {
    fn lock_scroll(&mut self) {
        self.scroll_locks += 1;
        self.scene.scroll_locked = true;
        self.ops.push(PresenterOp::LockScroll);
    }

    fn unlock_scroll(&mut self) {
        self.scroll_unlocks += 1;
        self.scene.scroll_locked = false;
        self.ops.push(PresenterOp::UnlockScroll);
    }

    fn mount_root(&mut self, style: &TransitionStyle) {
        self.root_mounts += 1;
        self.style = Some(*style);
        self.scene.root = RootState::Mounted;
        self.ops.push(PresenterOp::MountRoot);
    }

    fn show_root(&mut self) {
        if self.scene.root == RootState::Mounted {
            self.scene.root = RootState::Shown;
        }
        self.ops.push(PresenterOp::ShowRoot);
    }

    fn dismiss_root(&mut self) {
        self.scene.root = RootState::Absent;
        self.scene.panels.clear();
        self.scene.counter = None;
        self.scene.hint = None;
        self.ops.push(PresenterOp::DismissRoot);
    }

    fn attach_listeners(&mut self, listeners: Listeners) {
        self.apply_listeners(listeners, true);
        self.ops.push(PresenterOp::Attach(listeners));
    }

    fn detach_listeners(&mut self, listeners: Listeners) {
        self.apply_listeners(listeners, false);
        self.ops.push(PresenterOp::Detach(listeners));
    }

    fn reflow(&mut self) {
        self.ops.push(PresenterOp::Reflow);
    }

    fn insert_panel(&mut self, panel: &Panel) {
        self.scene.panels.push(panel.clone());
        self.ops.push(PresenterOp::Insert(panel.id()));
    }

    fn update_panel(&mut self, panel: &Panel) {
        self.replace_panel(panel);
        self.ops.push(PresenterOp::Update(panel.id(), panel.role()));
    }

    fn remove_panel(&mut self, id: PanelId) {
        self.scene.panels.retain(|p| p.id() != id);
        self.ops.push(PresenterOp::Remove(id));
    }

    fn play_transition(&mut self, token: TransitionToken, incoming: &Panel, outgoing: &Panel) {
        self.replace_panel(incoming);
        self.replace_panel(outgoing);
        self.played.push(token);
        self.ops.push(PresenterOp::Play {
            token,
            incoming: incoming.id(),
            outgoing: outgoing.id(),
        });
    }

    fn pause_media(&mut self, id: PanelId) {
        self.ops.push(PresenterOp::Pause(id));
    }

    fn set_counter(&mut self, text: &str) {
        self.scene.counter = Some(text.to_owned());
        self.ops.push(PresenterOp::Counter(text.to_owned()));
    }

    fn set_hint(&mut self, text: &str, visible: bool) {
        self.scene.hint = Some((text.to_owned(), visible));
        self.ops.push(PresenterOp::Hint(text.to_owned(), visible));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelFactory;

    #[test]
    fn listener_counts_follow_attach_and_detach() {
        let mut p = HeadlessPresenter::new();
        p.attach_listeners(Listeners::KEYDOWN | Listeners::TOUCH);
        assert_eq!(p.scene().key_listeners, 1);
        assert_eq!(p.scene().touch_listeners, 1);
        assert_eq!(p.scene().click_listeners, 0);

        p.detach_listeners(Listeners::all());
        assert_eq!(p.scene().key_listeners, 0);
        assert_eq!(p.scene().touch_listeners, 0);
        assert_eq!(p.scene().click_listeners, 0);
    }

    #[test]
    fn dismiss_clears_root_contents() {
        let mut p = HeadlessPresenter::new();
        p.mount_root(&TransitionStyle::default());
        p.show_root();
        assert_eq!(p.scene().root, RootState::Shown);

        p.insert_panel(&PanelFactory::new().build(None));
        p.set_counter("1/2");
        p.dismiss_root();
        assert_eq!(p.scene().root, RootState::Absent);
        assert!(p.scene().panels.is_empty());
        assert!(p.scene().counter.is_none());
        assert_eq!(p.root_mounts(), 1);
    }

    #[test]
    fn show_before_mount_is_ignored() {
        let mut p = HeadlessPresenter::new();
        p.show_root();
        assert_eq!(p.scene().root, RootState::Absent);
    }

    #[test]
    fn ops_are_recorded_in_order() {
        let mut p = HeadlessPresenter::new();
        p.lock_scroll();
        p.reflow();
        p.unlock_scroll();
        assert_eq!(
            p.take_ops(),
            vec![
                PresenterOp::LockScroll,
                PresenterOp::Reflow,
                PresenterOp::UnlockScroll
            ]
        );
        assert!(p.ops().is_empty());
        assert_eq!(p.scroll_toggles(), (1, 1));
    }
}

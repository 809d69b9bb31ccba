#![forbid(unsafe_code)]

//! Panels and the panel factory.
//!
//! A [`Panel`] wraps one copied media node (or nothing, for an empty
//! placeholder) together with the role and direction tags the presentation
//! layer animates from. [`PanelFactory`] builds panels from captured
//! [`MediaItem`]s and hands out unique [`PanelId`]s.
//!
//! # Build rules
//!
//! - Images prefer the full viewport width and load eagerly and
//!   asynchronously (`sizes="100vw"`, `loading="eager"`,
//!   `decoding="async"`), whatever the thumbnail asked for.
//! - Videos show native controls and start paused; autoplay is removed.
//! - Other elements are copied verbatim.
//! - Images and videos get a legend when the item has a caption. No caption
//!   means no legend node at all.

use mframe_core::semantic_event::Direction;

use crate::media::{MediaItem, MediaKind, MediaNode, NodeId, Playback};

/// Unique identity of a constructed panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub u64);

/// Role tag driving the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelRole {
    /// The settled, authoritative panel.
    Current,
    /// Animating into view.
    Incoming,
    /// Animating out of view.
    Outgoing,
    /// Placeholder with no content.
    Empty,
}

impl PanelRole {
    /// Stable lowercase name, used as a class name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
            Self::Empty => "empty",
        }
    }
}

/// Caption shown under an image or video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    text: String,
}

impl Legend {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A renderable wrapper around one piece of gallery content.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    id: PanelId,
    role: PanelRole,
    direction: Option<Direction>,
    media: Option<MediaNode>,
    legend: Option<Legend>,
}

impl Panel {
    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn role(&self) -> PanelRole {
        self.role
    }

    /// Transition direction while animating, `None` when settled.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// The copied media node.
    pub fn media(&self) -> Option<&MediaNode> {
        self.media.as_ref()
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// Id of the page node this panel was copied from.
    pub fn source(&self) -> Option<NodeId> {
        self.media.as_ref().map(MediaNode::id)
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_none()
    }

    /// Class list for DOM presenters: `panel`, the role, and the direction
    /// while animating.
    pub fn class_names(&self) -> Vec<&'static str> {
        let mut classes = vec!["panel", self.role.as_str()];
        if let Some(direction) = self.direction {
            classes.push(direction.as_str());
        }
        classes
    }

    /// Retag for a transition. Empty panels keep their role.
    pub(crate) fn set_animating(&mut self, role: PanelRole, direction: Direction) {
        if self.role != PanelRole::Empty {
            self.role = role;
        }
        self.direction = Some(direction);
    }

    /// Retag as the settled panel. Empty panels keep their role.
    pub(crate) fn settle(&mut self) {
        if self.role != PanelRole::Empty {
            self.role = PanelRole::Current;
        }
        self.direction = None;
    }

    /// Mark every video in this panel paused. Returns whether the panel
    /// holds any video at all; the host may have started playback without
    /// the model knowing.
    pub(crate) fn pause_media(&mut self) -> bool {
        let Some(media) = self.media.as_mut() else {
            return false;
        };
        media.pause_videos();
        media.contains_video()
    }
}

/// Builds panels with unique ids.
#[derive(Debug, Clone, Default)]
pub struct PanelFactory {
    next_id: u64,
}

impl PanelFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a panel for `item`, or an empty placeholder for `None`.
    ///
    /// Content panels start tagged `Current`; the transition engine retags
    /// them as needed.
    pub fn build(&mut self, item: Option<&MediaItem>) -> Panel {
        let id = PanelId(self.next_id);
        self.next_id += 1;

        let Some(item) = item else {
            return Panel {
                id,
                role: PanelRole::Empty,
                direction: None,
                media: None,
                legend: None,
            };
        };

        let mut media = item.node().clone();
        match item.kind() {
            MediaKind::Image => {
                media.set_attribute("sizes", "100vw");
                media.set_attribute("decoding", "async");
                media.set_attribute("loading", "eager");
            }
            MediaKind::Video => {
                let playback = media.playback_mut();
                playback.insert(Playback::CONTROLS | Playback::PAUSED);
                playback.remove(Playback::AUTOPLAY);
                media.remove_attribute("autoplay");
            }
            MediaKind::Element => {}
        }

        let legend = if item.kind().has_legend() {
            item.caption().map(|text| Legend {
                text: text.to_owned(),
            })
        } else {
            None
        };

        Panel {
            id,
            role: PanelRole::Current,
            direction: None,
            media: Some(media),
            legend,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(node: &MediaNode) -> Panel {
        PanelFactory::new().build(Some(&MediaItem::capture(node)))
    }

    #[test]
    fn none_builds_empty_placeholder() {
        let panel = PanelFactory::new().build(None);
        assert!(panel.is_empty());
        assert_eq!(panel.role(), PanelRole::Empty);
        assert!(panel.legend().is_none());
        assert_eq!(panel.class_names(), vec!["panel", "empty"]);
    }

    #[test]
    fn image_gets_large_view_hints() {
        let node = MediaNode::image(1, "a.jpg")
            .attr("loading", "lazy")
            .attr("sizes", "200px");
        let panel = build(&node);
        let media = panel.media().expect("media");
        assert_eq!(media.attribute("sizes"), Some("100vw"));
        assert_eq!(media.attribute("decoding"), Some("async"));
        assert_eq!(media.attribute("loading"), Some("eager"));
        assert_eq!(media.attribute("src"), Some("a.jpg"));
        // Source untouched.
        assert_eq!(node.attribute("loading"), Some("lazy"));
    }

    #[test]
    fn video_gets_controls_and_never_autoplays() {
        let node = MediaNode::video(1, "v.mp4")
            .attr("autoplay", "")
            .playback(Playback::AUTOPLAY | Playback::MUTED);
        let panel = build(&node);
        let media = panel.media().expect("media");
        let playback = media.playback_state();
        assert!(playback.contains(Playback::CONTROLS | Playback::PAUSED | Playback::MUTED));
        assert!(!playback.contains(Playback::AUTOPLAY));
        assert_eq!(media.attribute("autoplay"), None);
    }

    #[test]
    fn generic_element_copied_verbatim_without_legend() {
        let node = MediaNode::element(1, "div")
            .class("microframe")
            .title("Card")
            .text("<b>hi</b>");
        let panel = build(&node);
        assert_eq!(panel.media(), Some(&node));
        assert!(panel.legend().is_none());
    }

    #[test]
    fn legend_from_title_when_alt_empty() {
        let panel = build(&MediaNode::image(1, "a.jpg").alt("").title("Sunset"));
        assert_eq!(panel.legend().map(Legend::text), Some("Sunset"));
    }

    #[test]
    fn no_legend_when_alt_and_title_empty() {
        let panel = build(&MediaNode::image(1, "a.jpg").alt("").title(""));
        assert!(panel.legend().is_none());
    }

    #[test]
    fn video_legend_from_alt() {
        let panel = build(&MediaNode::video(1, "v.mp4").alt("Trailer"));
        assert_eq!(panel.legend().map(Legend::text), Some("Trailer"));
    }

    #[test]
    fn ids_are_unique() {
        let mut factory = PanelFactory::new();
        let a = factory.build(None);
        let b = factory.build(None);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn retagging_and_class_names() {
        let mut panel = build(&MediaNode::image(1, "a.jpg"));
        assert_eq!(panel.class_names(), vec!["panel", "current"]);

        panel.set_animating(PanelRole::Incoming, Direction::Rightward);
        assert_eq!(panel.class_names(), vec!["panel", "incoming", "rightward"]);

        panel.settle();
        assert_eq!(panel.role(), PanelRole::Current);
        assert_eq!(panel.direction(), None);
    }

    #[test]
    fn empty_panels_keep_their_role() {
        let mut panel = PanelFactory::new().build(None);
        panel.set_animating(PanelRole::Outgoing, Direction::Leftward);
        assert_eq!(panel.role(), PanelRole::Empty);
        panel.settle();
        assert_eq!(panel.role(), PanelRole::Empty);
    }

    #[test]
    fn source_tracks_node_id() {
        let panel = build(&MediaNode::image(42, "a.jpg"));
        assert_eq!(panel.source(), Some(NodeId(42)));
    }
}

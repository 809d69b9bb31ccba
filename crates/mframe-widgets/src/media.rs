#![forbid(unsafe_code)]

//! Media model: page content nodes and captured gallery items.
//!
//! A [`MediaNode`] is the overlay's view of a page element: a tag, its
//! attributes and classes, playback state for videos, and children. Hosts
//! build nodes from their DOM (or any other tree); the overlay only ever
//! works on copies, so the page content is never touched.
//!
//! A [`MediaItem`] is a node captured at open time together with the
//! display attributes derived from it (kind and caption).

use ahash::AHashMap;
use bitflags::bitflags;

/// Host-assigned identity of a page node.
///
/// Copies keep the id of their source so the overlay can locate the
/// clicked node among gallery members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Broad kind of a media node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// `<img>`.
    Image,
    /// `<video>`.
    Video,
    /// Any other element, shown verbatim.
    Element,
}

impl MediaKind {
    /// Kind implied by a (case-insensitive) tag name.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("img") {
            Self::Image
        } else if tag.eq_ignore_ascii_case("video") {
            Self::Video
        } else {
            Self::Element
        }
    }

    /// Whether items of this kind get a legend.
    #[must_use]
    pub const fn has_legend(self) -> bool {
        matches!(self, Self::Image | Self::Video)
    }
}

bitflags! {
    /// Playback state of a video node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Playback: u8 {
        /// Native controls are shown.
        const CONTROLS = 0b0000_0001;
        /// Starts playing on its own.
        const AUTOPLAY = 0b0000_0010;
        /// Currently paused.
        const PAUSED   = 0b0000_0100;
        /// Audio muted.
        const MUTED    = 0b0000_1000;
        /// Restarts when finished.
        const LOOP     = 0b0001_0000;
    }
}

/// A page element as seen by the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaNode {
    id: NodeId,
    tag: String,
    attributes: AHashMap<String, String>,
    classes: Vec<String>,
    playback: Playback,
    text: String,
    children: Vec<MediaNode>,
}

impl MediaNode {
    /// Create a node with the given tag.
    #[must_use]
    pub fn new(id: NodeId, tag: impl Into<String>) -> Self {
        Self {
            id,
            tag: tag.into().to_ascii_lowercase(),
            attributes: AHashMap::new(),
            classes: Vec::new(),
            playback: Playback::empty(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// `<img src=…>`.
    #[must_use]
    pub fn image(id: u64, src: impl Into<String>) -> Self {
        Self::new(NodeId(id), "img").attr("src", src)
    }

    /// `<video src=…>`.
    #[must_use]
    pub fn video(id: u64, src: impl Into<String>) -> Self {
        Self::new(NodeId(id), "video").attr("src", src)
    }

    /// Any other element.
    #[must_use]
    pub fn element(id: u64, tag: impl Into<String>) -> Self {
        Self::new(NodeId(id), tag)
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set the `alt` attribute.
    #[must_use]
    pub fn alt(self, alt: impl Into<String>) -> Self {
        self.attr("alt", alt)
    }

    /// Set the `title` attribute.
    #[must_use]
    pub fn title(self, title: impl Into<String>) -> Self {
        self.attr("title", title)
    }

    /// Add a class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set playback flags.
    #[must_use]
    pub fn playback(mut self, playback: Playback) -> Self {
        self.playback = playback;
        self
    }

    /// Set text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: MediaNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_tag(&self.tag)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn playback_state(&self) -> Playback {
        self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    pub fn text_content(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[MediaNode] {
        &self.children
    }

    /// Visit this node and every descendant, depth-first.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut MediaNode)) {
        f(self);
        for child in &mut self.children {
            child.walk_mut(f);
        }
    }

    /// Pause every video in this subtree. Returns how many were playing.
    pub fn pause_videos(&mut self) -> usize {
        let mut paused = 0;
        self.walk_mut(&mut |node| {
            if node.kind() == MediaKind::Video && !node.playback.contains(Playback::PAUSED) {
                node.playback.insert(Playback::PAUSED);
                paused += 1;
            }
        });
        paused
    }

    /// Whether this node or any descendant is a video.
    pub fn contains_video(&self) -> bool {
        self.kind() == MediaKind::Video || self.children.iter().any(MediaNode::contains_video)
    }

    /// Whether this node matches the overlay's target selector
    /// (`img, video, .microframe`).
    pub fn is_frameable(&self) -> bool {
        self.kind() != MediaKind::Element || self.has_class(FRAMEABLE_CLASS)
    }

    /// Whether the node explicitly opts out of the overlay.
    pub fn is_opted_out(&self) -> bool {
        self.has_class(OPT_OUT_CLASS)
    }
}

/// Class that makes an arbitrary element open in the overlay.
pub const FRAMEABLE_CLASS: &str = "microframe";
/// Class that keeps an image or video from opening in the overlay.
pub const OPT_OUT_CLASS: &str = "no-microframe";

/// Trimmed, non-empty attribute value.
fn non_empty_attr<'a>(node: &'a MediaNode, name: &str) -> Option<&'a str> {
    node.attribute(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// A node captured at open time plus its derived display attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    node: MediaNode,
    kind: MediaKind,
    caption: Option<String>,
}

impl MediaItem {
    /// Capture a copy of `node`.
    ///
    /// The caption of an image or video is its trimmed `alt`, falling back
    /// to its trimmed `title`. Empty values count as absent. Other
    /// elements never have a caption.
    #[must_use]
    pub fn capture(node: &MediaNode) -> Self {
        let kind = node.kind();
        let caption = if kind.has_legend() {
            non_empty_attr(node, "alt")
                .or_else(|| non_empty_attr(node, "title"))
                .map(str::to_owned)
        } else {
            None
        };
        Self {
            node: node.clone(),
            kind,
            caption,
        }
    }

    pub fn node(&self) -> &MediaNode {
        &self.node
    }

    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

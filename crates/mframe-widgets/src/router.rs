#![forbid(unsafe_code)]

//! Page click routing.
//!
//! Hosts deliver a page click as the chain of nodes from the clicked
//! element outward to the document root (`path[0]` is the click target,
//! `path[1]` its parent, and so on). Each node carries its full subtree.
//!
//! The nearest node in the chain that is an image, a video, or carries the
//! `microframe` class is the overlay target, unless it carries
//! `no-microframe`. If the target sits inside a group container (a
//! `gallery` or `media-group` class), every frameable descendant of the
//! nearest such container becomes a gallery member, in document order.
//! The opt-out class only stops a click from opening; it does not remove
//! a node from a gallery opened through one of its siblings.

use crate::media::MediaNode;

/// Classes marking a gallery container.
pub const GROUP_CLASSES: [&str; 2] = ["gallery", "media-group"];

/// What a page click asks the overlay to show.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenRequest {
    /// One element, no navigation.
    Single(MediaNode),
    /// A gallery opened at `start`.
    Gallery {
        /// Group members in document order.
        members: Vec<MediaNode>,
        /// Index of the clicked member.
        start: usize,
    },
}

impl OpenRequest {
    pub fn is_gallery(&self) -> bool {
        matches!(self, Self::Gallery { .. })
    }

    /// Number of items the request would show.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Gallery { members, .. } => members.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether `node` is a gallery container.
pub fn is_group(node: &MediaNode) -> bool {
    GROUP_CLASSES.iter().any(|class| node.has_class(class))
}

/// Every frameable descendant of `root` in document order, excluding
/// `root` itself.
pub fn frameable_descendants(root: &MediaNode) -> Vec<MediaNode> {
    fn collect(node: &MediaNode, out: &mut Vec<MediaNode>) {
        for child in node.children() {
            if child.is_frameable() {
                out.push(child.clone());
            }
            collect(child, out);
        }
    }

    let mut out = Vec::new();
    collect(root, &mut out);
    out
}

/// Decide what a page click opens, if anything.
pub fn route_click(path: &[&MediaNode]) -> Option<OpenRequest> {
    let target_at = path.iter().position(|node| node.is_frameable())?;
    let target = path[target_at];
    if target.is_opted_out() {
        return None;
    }

    let group = path[target_at..].iter().find(|node| is_group(node));
    if let Some(group) = group {
        let members = frameable_descendants(group);
        // The target is not a member when it is the container itself.
        if let Some(start) = members.iter().position(|m| m.id() == target.id()) {
            return Some(OpenRequest::Gallery { members, start });
        }
    }

    Some(OpenRequest::Single(target.clone()))
}

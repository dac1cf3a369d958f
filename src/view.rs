//! View Tree - Surface lookup, coordinate resolution, overlay graphics
//!
//! The host mirrors its element tree into a [`ViewTree`]: one node per
//! element in document order, each carrying a parent link and its current
//! viewport-space bounding box. Nodes that represent an annotatable page
//! surface additionally carry a [`SurfaceInfo`] (document id + page number);
//! that is the container marker.
//!
//! The engine never mutates layout. The host calls [`ViewTree::set_bounds`]
//! whenever scrolling or resizing moves an element, and every offset is
//! resolved fresh from the tree at the moment it is needed.
//!
//! # API
//!
//! - `push_element` / `push_surface` - Mirror host elements into the tree
//! - `set_bounds` - Update a node's bounding box after scroll/resize
//! - `elements_at` - All nodes under a point, topmost first
//! - `surface_at` - Nearest annotatable surface under a point
//! - `resolve_offset` - Cumulative viewport-to-surface displacement
//! - `append_graphic` / `remove_graphic` - Overlay children of a surface

use std::collections::HashMap;

use crate::types::{Offset, Rect};

// =============================================================================
// IDS
// =============================================================================

/// Index of a node in the view tree.
///
/// Ids are minted by `push_element`/`push_surface` and stay valid for the
/// lifetime of the tree; nodes are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Identity of one overlay graphic attached to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphicId(u64);

// =============================================================================
// NODES
// =============================================================================

/// Identity carried by an annotatable surface: one page of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub document: String,
    pub page: u32,
}

#[derive(Debug)]
struct ViewNode {
    parent: Option<NodeId>,
    bounds: Rect,
    surface: Option<SurfaceInfo>,
}

// =============================================================================
// VIEW TREE
// =============================================================================

/// Snapshot of the host's element tree plus the annotation overlay.
#[derive(Default)]
pub struct ViewTree {
    nodes: Vec<ViewNode>,
    overlays: HashMap<NodeId, Vec<(GraphicId, Box<dyn svg::Node>)>>,
    next_graphic: u64,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror a plain host element (scroll container, wrapper, ...).
    pub fn push_element(&mut self, parent: Option<NodeId>, bounds: Rect) -> NodeId {
        self.push(parent, bounds, None)
    }

    /// Mirror an annotatable surface carrying document/page identity.
    pub fn push_surface(
        &mut self,
        parent: Option<NodeId>,
        bounds: Rect,
        document: impl Into<String>,
        page: u32,
    ) -> NodeId {
        self.push(parent, bounds, Some(SurfaceInfo { document: document.into(), page }))
    }

    fn push(&mut self, parent: Option<NodeId>, bounds: Rect, surface: Option<SurfaceInfo>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ViewNode { parent, bounds, surface });
        id
    }

    /// Update a node's bounding box after the host scrolled or resized.
    pub fn set_bounds(&mut self, node: NodeId, bounds: Rect) {
        self.nodes[node.0].bounds = bounds;
    }

    /// Current bounding box of a node.
    pub fn bounds(&self, node: NodeId) -> Rect {
        self.nodes[node.0].bounds
    }

    /// Surface identity, if the node is an annotatable surface.
    pub fn surface_info(&self, node: NodeId) -> Option<&SurfaceInfo> {
        self.nodes[node.0].surface.as_ref()
    }

    /// Whether the node carries the container marker.
    pub fn is_surface(&self, node: NodeId) -> bool {
        self.nodes[node.0].surface.is_some()
    }

    // -------------------------------------------------------------------------
    // Surface lookup
    // -------------------------------------------------------------------------

    /// All nodes whose bounds contain the point, topmost first.
    ///
    /// Document order doubles as paint order, so "topmost" is the reverse of
    /// insertion order.
    pub fn elements_at(&self, x: f32, y: f32) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, node)| node.bounds.contains(x, y))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    /// The nearest annotatable surface under the point, if any.
    ///
    /// `None` means "abort gesture, no commit" for every caller; it is never
    /// an error.
    pub fn surface_at(&self, x: f32, y: f32) -> Option<NodeId> {
        let found = self
            .elements_at(x, y)
            .into_iter()
            .find(|id| self.is_surface(*id));

        if found.is_none() {
            log::trace!("no annotatable surface at ({x}, {y})");
        }
        found
    }

    // -------------------------------------------------------------------------
    // Offset resolution
    // -------------------------------------------------------------------------

    /// Cumulative displacement from viewport space to the node's local space.
    ///
    /// The node's own box counts when it is a surface. Walking up, ancestors
    /// start counting at the first surface-marked one (that ancestor
    /// included); anything below it contributes nothing. This accounts for
    /// scroll containers above the matched surface while skipping wrappers
    /// inside it.
    ///
    /// Pure function of the current tree state; intentionally never memoized.
    pub fn resolve_offset(&self, node: NodeId) -> Offset {
        let mut offset = Offset::ZERO;
        let mut passed_container = false;

        let start = &self.nodes[node.0];
        if start.surface.is_some() {
            offset.left += start.bounds.x;
            offset.top += start.bounds.y;
        }

        let mut current = start.parent;
        while let Some(id) = current {
            let ancestor = &self.nodes[id.0];
            if !passed_container && ancestor.surface.is_some() {
                passed_container = true;
            }
            if passed_container {
                offset.left += ancestor.bounds.x;
                offset.top += ancestor.bounds.y;
            }
            current = ancestor.parent;
        }

        offset
    }

    // -------------------------------------------------------------------------
    // Overlay graphics
    // -------------------------------------------------------------------------

    /// Insert a graphic element as the last overlay child of a node.
    pub fn append_graphic(&mut self, node: NodeId, element: Box<dyn svg::Node>) -> GraphicId {
        let id = GraphicId(self.next_graphic);
        self.next_graphic += 1;
        self.overlays.entry(node).or_default().push((id, element));
        id
    }

    /// Remove one overlay child. Returns false if it was already gone.
    pub fn remove_graphic(&mut self, node: NodeId, graphic: GraphicId) -> bool {
        let Some(children) = self.overlays.get_mut(&node) else {
            return false;
        };
        let before = children.len();
        children.retain(|(id, _)| *id != graphic);
        children.len() != before
    }

    /// Number of overlay children currently attached to a node.
    pub fn graphic_count(&self, node: NodeId) -> usize {
        self.overlays.get(&node).map_or(0, Vec::len)
    }

    /// Serialize a node's overlay children, in insertion order, for the host.
    pub fn graphics_markup(&self, node: NodeId) -> String {
        let Some(children) = self.overlays.get(&node) else {
            return String::new();
        };
        children
            .iter()
            .map(|(_, element)| element.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// TESTS
// =============================================================================

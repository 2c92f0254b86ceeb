use crate::SurfaceError;

/// The host's rendering primitive set, consumed by the windowing controller.
///
/// Implementations wrap a real UI tree (DOM, retained-mode scene graph, a test double). The
/// controller never interprets markup or node internals; it only threads them through and asks
/// for measurements and positioning.
///
/// Scroll and container-resize notifications are *not* registered through this trait: the
/// embedding delivers them by calling [`crate::VirtualList::on_scroll`] and
/// [`crate::VirtualList::on_viewport_resize`], and drives frames via
/// [`crate::VirtualList::tick`].
pub trait RenderSurface {
    type Node;

    /// Instantiates a node from opaque markup and attaches it to the list's root container.
    fn create_node(&mut self, markup: &str) -> Result<Self::Node, SurfaceError>;

    /// Returns the node's rendered pixel height.
    ///
    /// A node that is not currently part of the visible tree must still be measurable (a DOM
    /// surface would attach a throwaway off-screen clone to force layout). Failing here aborts
    /// the enclosing render pass.
    fn measure_height(&mut self, node: &Self::Node) -> Result<u32, SurfaceError>;

    /// Positions a node at a vertical offset without disturbing sibling layout (absolute or
    /// transform-based positioning, not flow layout).
    fn apply_offset(&mut self, node: &mut Self::Node, offset_top: u64);

    /// Detaches and drops a node.
    fn remove_node(&mut self, node: Self::Node);

    /// Sizes the full-height spacer so native scrollbars track total content height.
    fn set_track_height(&mut self, height: u64);
}

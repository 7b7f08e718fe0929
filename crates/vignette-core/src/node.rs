//! The layoutable node capability.
//!
//! Layout managers see host nodes only through [`LayoutNode`]. A node
//! reports what it is once per layout call via [`NodeKind`]; the size used
//! for fit-to-content sizing follows from that.

use glam::DVec2;

use crate::geometry::Size;

/// How a node exposes its extent to layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Node with an explicit size.
    Sized(Size),
    /// Text label; the size is its measured text extent.
    ///
    /// Label nodes also receive the label Y offsets of table, stack and outline.
    Label(Size),
    /// Anything else. Treated as zero-sized.
    #[default]
    Generic,
}

impl NodeKind {
    pub fn size(&self) -> Size {
        match self {
            NodeKind::Sized(size) | NodeKind::Label(size) => *size,
            NodeKind::Generic => Size::ZERO,
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, NodeKind::Label(_))
    }
}

/// A node that layout managers can position.
pub trait LayoutNode {
    /// What kind of node this is, and its extent.
    fn kind(&self) -> NodeKind;

    fn position(&self) -> DVec2;

    fn set_position(&mut self, position: DVec2);

    fn size(&self) -> Size {
        self.kind().size()
    }

    fn width(&self) -> f64 {
        self.size().width
    }

    fn height(&self) -> f64 {
        self.size().height
    }

    fn is_label(&self) -> bool {
        self.kind().is_label()
    }
}

impl<T: LayoutNode + ?Sized> LayoutNode for &mut T {
    fn kind(&self) -> NodeKind {
        (**self).kind()
    }

    fn position(&self) -> DVec2 {
        (**self).position()
    }

    fn set_position(&mut self, position: DVec2) {
        (**self).set_position(position)
    }
}

impl<T: LayoutNode + ?Sized> LayoutNode for Box<T> {
    fn kind(&self) -> NodeKind {
        (**self).kind()
    }

    fn position(&self) -> DVec2 {
        (**self).position()
    }

    fn set_position(&mut self, position: DVec2) {
        (**self).set_position(position)
    }
}

/// A plain node: a kind and a position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutItem {
    pub kind: NodeKind,
    pub position: DVec2,
}

impl LayoutItem {
    pub fn sized(width: f64, height: f64) -> Self {
        Self { kind: NodeKind::Sized(Size::new(width, height)), position: DVec2::ZERO }
    }

    pub fn label(width: f64, height: f64) -> Self {
        Self { kind: NodeKind::Label(Size::new(width, height)), position: DVec2::ZERO }
    }

    pub fn generic() -> Self {
        Self::default()
    }
}

impl LayoutNode for LayoutItem {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn position(&self) -> DVec2 {
        self.position
    }

    fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_sizes() {
        assert_eq!(LayoutItem::sized(4.0, 2.0).size(), Size::new(4.0, 2.0));
        assert_eq!(LayoutItem::generic().size(), Size::ZERO);
        assert!(LayoutItem::label(30.0, 12.0).is_label());
        assert!(!LayoutItem::sized(30.0, 12.0).is_label());
    }

    fn place<N: LayoutNode>(mut node: N, position: DVec2) -> f64 {
        node.set_position(position);
        node.width()
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut item = LayoutItem::sized(1.0, 1.0);
        assert_eq!(place(&mut item, DVec2::new(3.0, 4.0)), 1.0);
        assert_eq!(item.position, DVec2::new(3.0, 4.0));
    }
}

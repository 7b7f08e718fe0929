//! The layout manager contract.

use vignette_core::{LayoutNode, LayoutResult};

use crate::{
    GridLayoutManager, OutlineLayoutManager, ParallaxLayoutManager, RingLayoutManager,
    StackLayoutManager, TableLayoutManager, WrapLayoutManager,
};

/// Positions an ordered run of node slots.
///
/// A `None` slot is a placeholder: it keeps its place in the ordering but no
/// node is moved. Layout is idempotent: calling it twice with unchanged
/// configuration and nodes yields the same positions. When configuration is
/// unusable, `layout` returns an error and leaves every node untouched.
pub trait LayoutManager {
    fn layout<N: LayoutNode>(&mut self, nodes: &mut [Option<N>]) -> LayoutResult<()>;
}

/// Any of the layout managers, tagged by kind for persistence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AnyLayoutManager {
    Grid(GridLayoutManager),
    Table(TableLayoutManager),
    Stack(StackLayoutManager),
    Outline(OutlineLayoutManager),
    Wrap(WrapLayoutManager),
    Ring(RingLayoutManager),
    Parallax(ParallaxLayoutManager),
}

impl AnyLayoutManager {
    /// Short name of the manager kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AnyLayoutManager::Grid(_) => "grid",
            AnyLayoutManager::Table(_) => "table",
            AnyLayoutManager::Stack(_) => "stack",
            AnyLayoutManager::Outline(_) => "outline",
            AnyLayoutManager::Wrap(_) => "wrap",
            AnyLayoutManager::Ring(_) => "ring",
            AnyLayoutManager::Parallax(_) => "parallax",
        }
    }
}

impl LayoutManager for AnyLayoutManager {
    fn layout<N: LayoutNode>(&mut self, nodes: &mut [Option<N>]) -> LayoutResult<()> {
        match self {
            AnyLayoutManager::Grid(m) => m.layout(nodes),
            AnyLayoutManager::Table(m) => m.layout(nodes),
            AnyLayoutManager::Stack(m) => m.layout(nodes),
            AnyLayoutManager::Outline(m) => m.layout(nodes),
            AnyLayoutManager::Wrap(m) => m.layout(nodes),
            AnyLayoutManager::Ring(m) => m.layout(nodes),
            AnyLayoutManager::Parallax(m) => m.layout(nodes),
        }
    }
}

macro_rules! impl_from_manager {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AnyLayoutManager {
                fn from(manager: $ty) -> Self {
                    AnyLayoutManager::$variant(manager)
                }
            }
        )*
    };
}

impl_from_manager! {
    Grid => GridLayoutManager,
    Table => TableLayoutManager,
    Stack => StackLayoutManager,
    Outline => OutlineLayoutManager,
    Wrap => WrapLayoutManager,
    Ring => RingLayoutManager,
    Parallax => ParallaxLayoutManager,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridLimit;
    use glam::DVec2;
    use vignette_core::{LayoutItem, Size};

    #[test]
    fn test_dispatch_matches_direct_layout() {
        let grid = GridLayoutManager::new(GridLimit::Columns(2), Size::new(10.0, 10.0));
        let mut direct = grid.clone();
        let mut any = AnyLayoutManager::from(grid);
        assert_eq!(any.kind(), "grid");

        let mut a = vec![Some(LayoutItem::generic()); 3];
        let mut b = a.clone();
        direct.layout(&mut a).unwrap();
        any.layout(&mut b).unwrap();
        assert_eq!(a, b);
        assert_ne!(a[0].unwrap().position, DVec2::ZERO);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_tagged_persistence() {
        let manager = AnyLayoutManager::from(
            StackLayoutManager::new(crate::StackDirection::Up).with_cell_separator(4.0),
        );
        let json = serde_json::to_value(&manager).unwrap();
        assert_eq!(json["kind"], "stack");
        let restored: AnyLayoutManager = serde_json::from_value(json).unwrap();
        assert_eq!(restored, manager);
    }
}

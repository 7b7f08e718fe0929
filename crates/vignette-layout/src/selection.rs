//! Selection and hit-testing over a run of laid-out items.
//!
//! Containers such as button grids and rings share the same bookkeeping:
//! one selected item, highlighted, and queries mapping a point back to an
//! item. [`Selection`] holds that state for any slot array, so a container
//! composes it with whichever layout manager it uses.

use glam::DVec2;
use vignette_core::{LayoutError, LayoutNode, LayoutResult, Rect};

/// An item with enabled and highlight states.
pub trait Selectable {
    fn is_enabled(&self) -> bool {
        true
    }

    fn set_enabled(&mut self, _enabled: bool) {}

    fn is_highlighted(&self) -> bool;

    fn set_highlight(&mut self, highlight: bool);
}

impl<T: Selectable + ?Sized> Selectable for &mut T {
    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        (**self).set_enabled(enabled)
    }

    fn is_highlighted(&self) -> bool {
        (**self).is_highlighted()
    }

    fn set_highlight(&mut self, highlight: bool) {
        (**self).set_highlight(highlight)
    }
}

/// The selected item of a collection, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    selected: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected item.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select the item at `index`: highlight it and unhighlight the previous selection.
    ///
    /// Selecting a placeholder slot clears the highlight but records the index.
    pub fn select<S: Selectable>(&mut self, items: &mut [Option<S>], index: usize) -> LayoutResult<()> {
        check_index(index, items.len())?;
        if let Some(previous) = self.selected.filter(|&p| p != index) {
            if let Some(Some(item)) = items.get_mut(previous) {
                item.set_highlight(false);
            }
        }
        if let Some(item) = items[index].as_mut() {
            item.set_highlight(true);
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Unhighlight the selected item, if any, and forget it.
    pub fn clear<S: Selectable>(&mut self, items: &mut [Option<S>]) {
        if let Some(previous) = self.selected.take() {
            if let Some(Some(item)) = items.get_mut(previous) {
                item.set_highlight(false);
            }
        }
    }
}

fn check_index(index: usize, len: usize) -> LayoutResult<()> {
    if index >= len {
        return Err(LayoutError::IndexOutOfRange { index, len });
    }
    Ok(())
}

/// Set the enabled state of the item at `index`.
pub fn set_enabled_for_item<S: Selectable>(items: &mut [Option<S>], index: usize, enabled: bool) -> LayoutResult<()> {
    check_index(index, items.len())?;
    if let Some(item) = items[index].as_mut() {
        item.set_enabled(enabled);
    }
    Ok(())
}

/// Set the highlight state of the item at `index`, leaving the selection alone.
pub fn set_highlight_for_item<S: Selectable>(items: &mut [Option<S>], index: usize, highlight: bool) -> LayoutResult<()> {
    check_index(index, items.len())?;
    if let Some(item) = items[index].as_mut() {
        item.set_highlight(highlight);
    }
    Ok(())
}

/// Frame of a node centred on its position.
pub fn item_frame<N: LayoutNode>(node: &N) -> Rect {
    let size = node.size();
    Rect::from_origin_size(node.position() - size.to_vec() / 2.0, size)
}

/// Index of the first item whose centred frame contains `point`.
pub fn item_containing_point<N: LayoutNode>(nodes: &[Option<N>], point: DVec2) -> Option<usize> {
    nodes
        .iter()
        .position(|slot| slot.as_ref().is_some_and(|node| item_frame(node).contains(point)))
}

/// Index of the item whose position is closest to `point`, with its distance.
///
/// A non-positive `maximum_distance` means no limit.
pub fn item_closest_to_point<N: LayoutNode>(
    nodes: &[Option<N>],
    point: DVec2,
    maximum_distance: f64,
) -> Option<(usize, f64)> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| slot.as_ref().map(|node| (index, node.position().distance(point))))
        .filter(|&(_, distance)| maximum_distance <= 0.0 || distance <= maximum_distance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vignette_core::LayoutItem;

    #[derive(Debug, Default, Clone)]
    struct Button {
        enabled: bool,
        highlight: bool,
    }

    impl Selectable for Button {
        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }

        fn is_highlighted(&self) -> bool {
            self.highlight
        }

        fn set_highlight(&mut self, highlight: bool) {
            self.highlight = highlight;
        }
    }

    fn highlights(items: &[Option<Button>]) -> Vec<bool> {
        items.iter().map(|b| b.as_ref().is_some_and(|b| b.is_highlighted())).collect()
    }

    #[test]
    fn test_select_moves_highlight() {
        let mut items = vec![Some(Button::default()); 3];
        let mut selection = Selection::new();
        selection.select(&mut items, 1).unwrap();
        assert_eq!(highlights(&items), vec![false, true, false]);
        selection.select(&mut items, 2).unwrap();
        assert_eq!(highlights(&items), vec![false, false, true]);
        assert_eq!(selection.selected(), Some(2));

        selection.clear(&mut items);
        assert_eq!(highlights(&items), vec![false, false, false]);
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut items = vec![Some(Button::default()); 2];
        let mut selection = Selection::new();
        assert_eq!(
            selection.select(&mut items, 2),
            Err(LayoutError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(set_enabled_for_item(&mut items, 5, true).is_err());
        set_enabled_for_item(&mut items, 0, true).unwrap();
        assert!(items[0].as_ref().unwrap().is_enabled());
        set_highlight_for_item(&mut items, 1, true).unwrap();
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_hit_testing() {
        let mut nodes = vec![Some(LayoutItem::sized(10.0, 10.0)), None, Some(LayoutItem::sized(4.0, 4.0))];
        nodes[2].as_mut().unwrap().position = DVec2::new(20.0, 0.0);

        assert_eq!(item_containing_point(&nodes, DVec2::new(4.0, -4.0)), Some(0));
        assert_eq!(item_containing_point(&nodes, DVec2::new(12.0, 0.0)), None);
        assert_eq!(item_closest_to_point(&nodes, DVec2::new(12.0, 0.0), 0.0), Some((2, 8.0)));
        assert_eq!(item_closest_to_point(&nodes, DVec2::new(12.0, 0.0), 5.0), None);
    }
}

//! Layout managers for 2D scene nodes.
//!
//! Each manager owns its configuration and positions an ordered run of node
//! slots when asked. Managers share one contract, [`LayoutManager`]:
//!
//! 1. **Configure**: set geometry (borders, separators, anchor points, sizing rules)
//! 2. **Layout**: pass `&mut [Option<N>]`; `None` slots are skipped but keep their place
//! 3. **Inspect**: read last-layout state such as total size or row count
//!
//! Configuration is `Clone` and, with the `serde` feature, serializable, so a
//! host node can persist its manager. [`AnyLayoutManager`] wraps every kind in
//! one tagged enum.
//!
//! # Example
//!
//! ```
//! use vignette_layout::{GridLayoutManager, GridLimit, LayoutManager};
//! use vignette_core::{LayoutItem, Size};
//!
//! let mut grid = GridLayoutManager::new(GridLimit::Columns(3), Size::new(32.0, 32.0))
//!     .with_square_separator(4.0);
//! let mut nodes = vec![Some(LayoutItem::sized(24.0, 24.0)); 7];
//! grid.layout(&mut nodes).unwrap();
//! assert_eq!(grid.row_count(), 3);
//! ```

mod fill;
mod fill_mode;
mod grid;
mod manager;
mod outline;
mod parallax;
mod ring;
mod selection;
mod stack;
mod table;
mod wrap;

pub use fill::{cell_offsets, resolve_lengths, ResolvedLengths};
pub use fill_mode::{Axis, FillMode};
pub use grid::{GridLayoutManager, GridLimit};
pub use manager::{AnyLayoutManager, LayoutManager};
pub use outline::{line_containing_point_y, OutlineLayoutManager};
pub use parallax::ParallaxLayoutManager;
pub use ring::{RingLayoutManager, RingThetas};
pub use selection::{
    item_closest_to_point, item_containing_point, item_frame, set_enabled_for_item,
    set_highlight_for_item, Selectable, Selection,
};
pub use stack::{cell_containing_point, StackDirection, StackLayoutManager};
pub use table::TableLayoutManager;
pub use wrap::{Justification, WrapLayoutManager};

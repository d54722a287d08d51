//! Geometry primitives and the grid arrangement solver.
//!
//! Everything here is pure: no state, no randomness. Coordinates are CSS
//! pixels relative to the card container's top-left corner.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in container space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The same size with negative extents replaced by zero.
    #[must_use]
    pub fn non_negative(self) -> Self {
        Self { width: self.width.max(0.0), height: self.height.max(0.0) }
    }
}

/// A measured bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Bound `value` to `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: when `min > max` the result is
/// `max`.
#[must_use]
pub fn clamp(min: f64, max: f64, value: f64) -> f64 {
    value.max(min).min(max)
}

/// Offset that centers a box of size `element` inside `container`.
#[must_use]
pub fn center_offset(container: Size, element: Size) -> Point {
    Point::new((container.width - element.width) / 2.0, (container.height - element.height) / 2.0)
}

// =============================================================================
// GRID ARRANGEMENT
// =============================================================================

/// Spacing parameters for [`arrange_grid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpacing {
    pub padding_x: f64,
    pub padding_y: f64,
    pub gap: f64,
}

/// One box to place.
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem {
    pub id: String,
    pub size: Size,
}

/// Where a [`GridItem`] ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlacement {
    pub id: String,
    /// Center of the placed box.
    pub center: Point,
    /// False when the item's row overflowed the container's content box.
    pub fit: bool,
}

struct Row {
    top: f64,
    height: f64,
    right: f64,
    members: Vec<(usize, f64, Size)>,
}

/// Pack `items` left-to-right, top-to-bottom into rows inside `container`.
///
/// Rows start at `(padding_x, padding_y)` and neighbors are separated by `gap`
/// in both axes. A row wraps when the next item's right edge would pass
/// `container.width - padding_x`; a row always accepts its first item, so an
/// item wider than the content box gets a row of its own. Each row is as tall
/// as its tallest member and items are centered vertically within it.
///
/// Placement order follows input order. The function is deterministic.
#[must_use]
pub fn arrange_grid(container: Size, items: &[GridItem], spacing: GridSpacing) -> Vec<GridPlacement> {
    let content_right = container.width - spacing.padding_x;
    let content_bottom = container.height - spacing.padding_y;

    let mut rows: Vec<Row> = Vec::new();
    let mut cursor_x = spacing.padding_x;
    let mut cursor_y = spacing.padding_y;

    for (index, item) in items.iter().enumerate() {
        let size = item.size.non_negative();
        let wraps = rows
            .last()
            .is_some_and(|row| !row.members.is_empty() && cursor_x + size.width > content_right);
        if wraps || rows.is_empty() {
            if let Some(row) = rows.last() {
                cursor_y = row.top + row.height + spacing.gap;
            }
            cursor_x = spacing.padding_x;
            rows.push(Row { top: cursor_y, height: 0.0, right: cursor_x, members: Vec::new() });
        }

        let Some(row) = rows.last_mut() else {
            continue;
        };
        row.members.push((index, cursor_x, size));
        row.height = row.height.max(size.height);
        row.right = cursor_x + size.width;
        cursor_x += size.width + spacing.gap;
    }

    let mut placements: Vec<Option<GridPlacement>> = vec![None; items.len()];
    for row in &rows {
        let fit = row.right <= content_right && row.top + row.height <= content_bottom;
        let center_y = row.top + row.height / 2.0;
        for &(index, left, size) in &row.members {
            placements[index] = Some(GridPlacement {
                id: items[index].id.clone(),
                center: Point::new(left + size.width / 2.0, center_y),
                fit,
            });
        }
    }
    placements.into_iter().flatten().collect()
}

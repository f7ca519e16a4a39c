// SPDX-License-Identifier: MPL-2.0
//! Stack placement relative to an anchor.
//!
//! Toasts are stacked away from one edge of the anchor rectangle, in
//! insertion order, one gap apart. Each toast is centred on the anchor along
//! the other axis and shifted back inside the viewport if needed. When the
//! stack does not fit on the preferred side, the engine flips to the opposite
//! side if that side has more room; if it fits nowhere, the overflow is
//! reported instead of being clipped.
//!
//! Layout is two-phase: a toast whose size is not known yet gets an
//! off-screen measurement slot and takes no room in the stack until the
//! renderer reports its extent.

use super::record::ToastId;
use iced::{Point, Rectangle, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance beyond the viewport's right edge where unmeasured toasts are parked.
pub const MEASUREMENT_OFFSET: f32 = 10_000.0;

/// Edge of the anchor the stack grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Whether the stack grows along the vertical axis.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Side::Top),
            "bottom" => Ok(Side::Bottom),
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            other => Err(format!("unknown placement side: {other}")),
        }
    }
}

/// Where one toast goes.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub id: ToastId,
    /// Side the stack resolved to (may differ from the preferred one).
    pub side: Side,
    /// Distance from the anchor edge to the toast's near edge, along the stack axis.
    pub main_offset: f32,
    /// Shift away from the anchor-centred position along the cross axis,
    /// applied to keep the toast inside the viewport.
    pub cross_offset: f32,
    /// Top-left corner in viewport coordinates.
    pub position: Point,
    pub size: Size,
    /// `false` while the toast sits in its off-screen measurement slot.
    pub measured: bool,
}

impl Placement {
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.position, self.size)
    }
}

/// Result of a placement pass, in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub side: Side,
    pub placements: Vec<Placement>,
    /// Pixels by which the stack exceeds the room on the resolved side.
    pub overflow: Option<f32>,
}

impl Layout {
    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<&Placement> {
        self.placements.iter().find(|p| &p.id == id)
    }

    /// Whether the engine had to leave the preferred side.
    #[must_use]
    pub fn is_flipped(&self, preferred: Side) -> bool {
        self.side != preferred
    }

    pub fn measured(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|p| p.measured)
    }
}

/// Pure placement calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementEngine {
    pub viewport: Rectangle,
    pub anchor: Rectangle,
    pub side: Side,
    pub gap: f32,
}

impl PlacementEngine {
    #[must_use]
    pub fn new(viewport: Rectangle, anchor: Rectangle, side: Side, gap: f32) -> Self {
        Self {
            viewport,
            anchor,
            side,
            gap: gap.max(0.0),
        }
    }

    /// Room between the anchor and the viewport edge on `side`.
    #[must_use]
    pub fn room(&self, side: Side) -> f32 {
        let v = self.viewport;
        let a = self.anchor;
        let room = match side {
            Side::Top => a.y - v.y,
            Side::Bottom => (v.y + v.height) - (a.y + a.height),
            Side::Left => a.x - v.x,
            Side::Right => (v.x + v.width) - (a.x + a.width),
        };
        room.max(0.0)
    }

    /// Computes positions for `items` (in insertion order).
    #[must_use]
    pub fn layout(&self, items: &[(ToastId, Option<Size>)]) -> Layout {
        let required = self.required_extent(items);
        let side = self.resolve_side(required);
        let room = self.room(side);
        let overflow = (required > room).then_some(required - room);

        let mut cursor = 0.0;
        let placements = items
            .iter()
            .map(|(id, size)| match size {
                Some(size) => {
                    let main_offset = cursor + self.gap;
                    cursor = main_offset + main_extent(side, *size);
                    self.place(id.clone(), side, *size, main_offset)
                }
                None => self.measurement_slot(id.clone(), side),
            })
            .collect();

        Layout {
            side,
            placements,
            overflow,
        }
    }

    /// Total stack length including one gap per measured toast.
    fn required_extent(&self, items: &[(ToastId, Option<Size>)]) -> f32 {
        items
            .iter()
            .filter_map(|(_, size)| *size)
            .map(|size| main_extent(self.side, size) + self.gap)
            .sum()
    }

    fn resolve_side(&self, required: f32) -> Side {
        let preferred = self.side;
        let preferred_room = self.room(preferred);
        if required <= preferred_room {
            return preferred;
        }
        let other = preferred.opposite();
        // Ties keep the preferred side.
        if self.room(other) > preferred_room {
            other
        } else {
            preferred
        }
    }

    fn place(&self, id: ToastId, side: Side, size: Size, main_offset: f32) -> Placement {
        let a = self.anchor;
        let v = self.viewport;

        let (position, cross_offset) = if side.is_vertical() {
            let centred = a.center_x() - size.width / 2.0;
            let x = shift_into(centred, size.width, v.x, v.width);
            let y = match side {
                Side::Bottom => a.y + a.height + main_offset,
                _ => a.y - main_offset - size.height,
            };
            (Point::new(x, y), x - centred)
        } else {
            let centred = a.center_y() - size.height / 2.0;
            let y = shift_into(centred, size.height, v.y, v.height);
            let x = match side {
                Side::Right => a.x + a.width + main_offset,
                _ => a.x - main_offset - size.width,
            };
            (Point::new(x, y), y - centred)
        };

        Placement {
            id,
            side,
            main_offset,
            cross_offset,
            position,
            size,
            measured: true,
        }
    }

    fn measurement_slot(&self, id: ToastId, side: Side) -> Placement {
        Placement {
            id,
            side,
            main_offset: 0.0,
            cross_offset: 0.0,
            position: Point::new(
                self.viewport.x + self.viewport.width + MEASUREMENT_OFFSET,
                self.viewport.y,
            ),
            size: Size::ZERO,
            measured: false,
        }
    }
}

fn main_extent(side: Side, size: Size) -> f32 {
    if side.is_vertical() {
        size.height
    } else {
        size.width
    }
}

/// Clamps a span starting at `start` into `[lo, lo + len]`; pins to `lo` if it cannot fit.
fn shift_into(start: f32, extent: f32, lo: f32, len: f32) -> f32 {
    let hi = lo + len - extent;
    if hi < lo {
        lo
    } else {
        start.clamp(lo, hi)
    }
}

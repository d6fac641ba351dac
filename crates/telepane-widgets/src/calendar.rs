#![forbid(unsafe_code)]

//! Drop-down calendar overlay.
//!
//! A popup date grid layered above normal content. The overlay owns its own
//! open/closed state, its position relative to the host control (clamped to
//! the viewport, flipped above the host when it would overflow below), and
//! its z-order promotion above sibling overlays. Child elements are a tagged
//! enum — day cells and navigation buttons — dispatched by pattern matching,
//! so hit testing never probes dynamic properties.

use crate::date_model::CivilDate;
use telepane_core::control::{Control, ControlBase};
use telepane_core::delegate_control;
use telepane_core::event::{KeyCode, KeyEvent};
use telepane_core::geometry::Rect;

/// Width of one day cell, in pixels.
const CELL_WIDTH: i32 = 24;
/// Height of one day cell, in pixels.
const CELL_HEIGHT: i32 = 16;
/// Height of the navigation header, in pixels.
const HEADER_HEIGHT: i32 = 20;
/// Width of one navigation button, in pixels.
const NAV_WIDTH: i32 = 16;
/// Grid rows shown; six weeks always cover a month.
const GRID_ROWS: i32 = 6;

/// Overall overlay width.
pub const OVERLAY_WIDTH: i32 = 7 * CELL_WIDTH;
/// Overall overlay height: header, weekday row, six grid rows.
pub const OVERLAY_HEIGHT: i32 = HEADER_HEIGHT + (1 + GRID_ROWS) * CELL_HEIGHT;

/// Month/year navigation steps of the header buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    /// Back one year.
    PreviousYear,
    /// Back one month.
    PreviousMonth,
    /// Forward one month.
    NextMonth,
    /// Forward one year.
    NextYear,
}

impl NavDirection {
    /// The month delta this button applies.
    #[must_use]
    pub const fn month_delta(self) -> i32 {
        match self {
            Self::PreviousYear => -12,
            Self::PreviousMonth => -1,
            Self::NextMonth => 1,
            Self::NextYear => 12,
        }
    }
}

/// A child element of the overlay, tagged by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    /// A selectable day cell.
    Day(CivilDate),
    /// A month/year navigation button.
    NavButton(NavDirection),
}

/// The result of activating a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellActivation {
    /// A day was picked; the host should adopt it and close the overlay.
    Selected(CivilDate),
    /// The displayed month changed; the overlay stays open.
    Navigated,
}

/// The popup date grid.
#[derive(Debug, Clone)]
pub struct CalendarOverlay {
    base: ControlBase,
    highlight: CivilDate,
    z_index: i32,
}

impl CalendarOverlay {
    /// Create a closed overlay highlighting `seed`.
    #[must_use]
    pub fn new(seed: CivilDate) -> Self {
        let mut base = ControlBase::hidden();
        base.set_bounds(Rect::from_size(OVERLAY_WIDTH, OVERLAY_HEIGHT));
        Self {
            base,
            highlight: seed,
            z_index: 0,
        }
    }

    /// Whether the overlay is currently shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.visible()
    }

    /// The highlighted date.
    #[must_use]
    pub fn highlight(&self) -> CivilDate {
        self.highlight
    }

    /// Current z-index.
    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Show the overlay.
    ///
    /// Positions it below `host` (or above when it would overflow the
    /// viewport bottom and there is room above), clamps horizontally into
    /// the viewport, promotes it above the highest sibling layer, and seeds
    /// the highlight from the host's current date.
    pub fn open(&mut self, host: Rect, viewport: Rect, top_sibling_z: i32, seed: CivilDate) {
        let (left, top) = place(host, viewport, OVERLAY_WIDTH, OVERLAY_HEIGHT);
        self.base
            .set_bounds(Rect::new(left, top, OVERLAY_WIDTH, OVERLAY_HEIGHT));
        if top_sibling_z > self.z_index {
            self.z_index = top_sibling_z + 1;
        }
        self.highlight = seed;
        self.set_visible(true);
    }

    /// Hide the overlay.
    pub fn close(&mut self) {
        self.set_visible(false);
    }

    /// Overlay-owned keyboard handling while open.
    ///
    /// Arrows move the highlight by day/week, PageUp/PageDown by month with
    /// the day clamped into the target month. Returns `true` when the key
    /// was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.is_open() {
            return false;
        }
        let next = match key.code {
            KeyCode::Left => self.highlight.add_days(-1),
            KeyCode::Right => self.highlight.add_days(1),
            KeyCode::Up => self.highlight.add_days(-7),
            KeyCode::Down => self.highlight.add_days(7),
            KeyCode::PageUp => self.highlight.add_months(-1),
            KeyCode::PageDown => self.highlight.add_months(1),
            _ => return false,
        };
        self.highlight = next;
        true
    }

    /// Hit-test a page coordinate against the overlay's child elements.
    #[must_use]
    pub fn cell_at(&self, x: i32, y: i32) -> Option<CalendarCell> {
        if !self.hit(x, y) {
            return None;
        }
        let bounds = self.bounds();
        let local_x = x - bounds.x;
        let local_y = y - bounds.y;
        if local_y < HEADER_HEIGHT {
            return nav_button_at(local_x).map(CalendarCell::NavButton);
        }
        let grid_y = local_y - HEADER_HEIGHT - CELL_HEIGHT;
        if grid_y < 0 {
            // Weekday caption row.
            return None;
        }
        let row = grid_y / CELL_HEIGHT;
        let col = local_x / CELL_WIDTH;
        if row >= GRID_ROWS || col >= 7 {
            return None;
        }
        let index = row * 7 + col;
        Some(CalendarCell::Day(
            self.first_grid_date().add_days(i64::from(index)),
        ))
    }

    /// Activate a child element.
    pub fn activate_cell(&mut self, cell: CalendarCell) -> CellActivation {
        match cell {
            CalendarCell::Day(date) => {
                self.highlight = date;
                CellActivation::Selected(date)
            }
            CalendarCell::NavButton(direction) => {
                self.highlight = self.highlight.add_months(direction.month_delta());
                CellActivation::Navigated
            }
        }
    }

    /// Date shown in the grid's top-left cell (Sunday-first).
    fn first_grid_date(&self) -> CivilDate {
        let first = CivilDate::new(self.highlight.year, self.highlight.month, 1);
        first.add_days(-i64::from(first.weekday()))
    }
}

delegate_control!(CalendarOverlay, base);

/// Overlay placement relative to the host, clamped into the viewport.
fn place(host: Rect, viewport: Rect, width: i32, height: i32) -> (i32, i32) {
    let mut left = host.x;
    let mut top = host.bottom();
    if top + height > viewport.bottom() && host.y - height > viewport.y {
        top = host.y - height;
    }
    if left + width > viewport.right() {
        left = (viewport.right() - width).max(viewport.x);
    }
    (left, top)
}

fn nav_button_at(local_x: i32) -> Option<NavDirection> {
    if local_x < 0 {
        None
    } else if local_x < NAV_WIDTH {
        Some(NavDirection::PreviousYear)
    } else if local_x < 2 * NAV_WIDTH {
        Some(NavDirection::PreviousMonth)
    } else if local_x >= OVERLAY_WIDTH - NAV_WIDTH {
        Some(NavDirection::NextYear)
    } else if local_x >= OVERLAY_WIDTH - 2 * NAV_WIDTH {
        Some(NavDirection::NextMonth)
    } else {
        None
    }
}

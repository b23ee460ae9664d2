use serde::{Deserialize, Serialize};

use super::slot_utils::minutes_to_time_string;
use crate::parser::{CourseRecord, Day};

/// Display window and day order for the rendered week. Built once in `main`
/// and injected into the layout engine and the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Row order of the rendered table.
    pub days: Vec<Day>,
    /// Start of the first slot, minutes since midnight.
    pub day_start: u32,
    /// Start of the last slot, minutes since midnight.
    pub day_end: u32,
    /// Slot granularity in minutes.
    pub slot_minutes: u32,
}

impl Default for GridConfig {
    /// Full week, 08:00-20:30, 30-minute slots.
    fn default() -> GridConfig {
        GridConfig {
            days: vec![
                Day::Mon,
                Day::Tue,
                Day::Wed,
                Day::Thu,
                Day::Fri,
                Day::Sat,
                Day::Sun,
            ],
            day_start: 8 * 60,
            day_end: 20 * 60 + 30,
            slot_minutes: 30,
        }
    }
}

impl GridConfig {
    /// Builds the time axis shared by every day row.
    pub fn axis(&self) -> TimeAxis {
        TimeAxis::new(self.day_start, self.day_end, self.slot_minutes)
    }
}

/// The ordered sequence of equal-width time slots covering the display
/// window. Static per run and shared read-only by all days.
#[derive(Debug, Clone)]
pub struct TimeAxis {
    slot_minutes: u32,
    slot_starts: Vec<u32>,
}

impl TimeAxis {
    /// Slots from `first` to `last` inclusive, `slot_minutes` apart.
    pub fn new(first: u32, last: u32, slot_minutes: u32) -> TimeAxis {
        assert!(slot_minutes > 0, "slot granularity must be positive");
        let mut slot_starts = Vec::new();
        let mut t = first;
        while t <= last {
            slot_starts.push(t);
            t += slot_minutes;
        }
        TimeAxis {
            slot_minutes,
            slot_starts,
        }
    }

    pub fn len(&self) -> usize {
        self.slot_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slot_starts.is_empty()
    }

    /// Start of slot `index`, minutes since midnight.
    pub fn slot_start(&self, index: usize) -> u32 {
        self.slot_starts[index]
    }

    /// Header labels, one per slot ("08:00", "08:30", ...).
    pub fn labels(&self) -> Vec<String> {
        self.slot_starts
            .iter()
            .map(|&m| minutes_to_time_string(m))
            .collect()
    }

    /// Index of the slot covering `minutes`: an exact boundary match, or the
    /// nearest boundary below it, never above, so a class is not rounded past
    /// its own start. `None` for times outside the window.
    pub fn slot_index_at(&self, minutes: u32) -> Option<usize> {
        let first = *self.slot_starts.first()?;
        let last = *self.slot_starts.last()?;
        if minutes < first || minutes >= last + self.slot_minutes {
            return None;
        }
        // partition_point finds the first boundary above `minutes`.
        Some(self.slot_starts.partition_point(|&s| s <= minutes) - 1)
    }

    /// Number of slots a block of `duration_minutes` covers, rounded up.
    /// Anything shorter than one slot still occupies one.
    pub fn span_for(&self, duration_minutes: u32) -> usize {
        let span = ((duration_minutes + self.slot_minutes - 1) / self.slot_minutes) as usize;
        span.max(1)
    }
}

/// One rendered position in a day row. A block marks the *start* of an
/// occupied run; the `span - 1` slots it covers are consumed implicitly and
/// never appear as separate cells.
#[derive(Debug, Clone)]
pub enum Cell<'a> {
    Empty,
    Block { course: &'a CourseRecord, span: usize },
}

impl Cell<'_> {
    /// Width of this cell in slot units.
    pub fn width(&self) -> usize {
        match self {
            Cell::Empty => 1,
            Cell::Block { span, .. } => *span,
        }
    }
}

/// All rendered positions for one day. Every axis slot is accounted for
/// exactly once, either as a free-standing empty cell or inside one block's
/// span.
#[derive(Debug, Clone)]
pub struct DayRow<'a> {
    pub day: Day,
    pub cells: Vec<Cell<'a>>,
}

impl DayRow<'_> {
    /// Total width in slot units; always equals the axis length.
    pub fn slot_width(&self) -> usize {
        self.cells.iter().map(Cell::width).sum()
    }
}

/// The whole week, one row per configured day. Derived data, rebuilt from
/// the record set on every run; rows borrow the records and never own them.
#[derive(Debug, Clone)]
pub struct WeekGrid<'a> {
    pub rows: Vec<DayRow<'a>>,
}

pub mod layout;
pub mod slot_utils;
pub mod types;

pub use layout::layout_week;
pub use types::{Cell, DayRow, GridConfig, TimeAxis, WeekGrid};

use super::slot_utils::{minutes_to_time_string, parse_duration_to_minutes, parse_time_to_minutes};
use super::types::{Cell, DayRow, TimeAxis, WeekGrid};
use crate::parser::{CourseRecord, Day};

/// Lays the whole record set onto the weekly grid: one row per configured
/// day, each covering the axis exactly once. Records are only referenced,
/// never copied or changed.
pub fn layout_week<'a>(records: &'a [CourseRecord], axis: &TimeAxis, days: &[Day]) -> WeekGrid<'a> {
    let rows = days
        .iter()
        .map(|&day| layout_day(day, records, axis))
        .collect();
    WeekGrid { rows }
}

/// Builds one day row with a forward-only slot cursor: empty cells up to
/// each class, one block per class, empty cells to the end of the axis.
pub fn layout_day<'a>(day: Day, records: &'a [CourseRecord], axis: &TimeAxis) -> DayRow<'a> {
    // A record with an unparseable start or duration cannot be placed; it
    // reserves no slots and never shifts the cursor.
    let mut placeable: Vec<(u32, u32, &CourseRecord)> = records
        .iter()
        .filter(|r| r.day == Some(day))
        .filter_map(|r| {
            let start = parse_time_to_minutes(&r.start)?;
            let duration = parse_duration_to_minutes(&r.duration)?;
            Some((start, duration, r))
        })
        .collect();

    // Stable sort: equal start times keep their document order.
    placeable.sort_by_key(|&(start, _, _)| start);

    let mut cells: Vec<Cell> = Vec::new();
    let mut cursor = 0usize;

    for (start, duration, course) in placeable {
        // A start before the window clamps to the first slot; a start past
        // the window cannot be shown at all.
        let start_slot = match axis.slot_index_at(start) {
            Some(index) => index,
            None if !axis.is_empty() && start < axis.slot_start(0) => 0,
            None => {
                println!(
                    "⚠️  {} starts outside the display window ({}), left off {}",
                    course.code,
                    course.start,
                    day.code()
                );
                continue;
            }
        };

        if cursor >= axis.len() {
            println!(
                "⚠️  no slots left on {} for {} ({}), dropped",
                day.code(),
                course.code,
                course.start
            );
            continue;
        }

        // The cursor only moves forward. A start slot behind it means two
        // classes overlap once aligned to slot boundaries; the later one is
        // drawn at the cursor so the row keeps its exact width.
        if start_slot < cursor {
            println!(
                "⚠️  {} overlaps an earlier class on {}, drawn at {} instead of {}",
                course.code,
                day.code(),
                minutes_to_time_string(axis.slot_start(cursor)),
                course.start
            );
        }
        let start_slot = start_slot.max(cursor);

        for _ in cursor..start_slot {
            cells.push(Cell::Empty);
        }

        // Ceiling span, truncated so the block never runs past the axis.
        let span = axis.span_for(duration).min(axis.len() - start_slot);
        cells.push(Cell::Block { course, span });
        cursor = start_slot + span;
    }

    while cursor < axis.len() {
        cells.push(Cell::Empty);
        cursor += 1;
    }

    let row = DayRow { day, cells };
    debug_assert_eq!(row.slot_width(), axis.len());
    row
}

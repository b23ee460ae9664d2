use std::fs::File;
use std::io::Write;

use crate::parser::{CourseRecord, Day, NA};
use crate::schedule::slot_utils::{end_label, parse_duration_to_minutes, parse_time_to_minutes};
use crate::schedule::{Cell, DayRow, TimeAxis, WeekGrid};

/// Static shell of the output page. The stylesheet is embedded so the file
/// has no external assets.
const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Weekly Schedule</title>
<style>
body { background: #0b0f1a; color: #fff; font-family: sans-serif; margin: 0; padding: 2rem; }
h1 { text-align: center; }
.wrap { overflow-x: auto; background: #111622; border: 1px solid #1f2937; border-radius: 8px; }
table { border-collapse: separate; border-spacing: 2px; width: 100%; font-size: 0.8rem; }
th { padding: 0.5rem 0.75rem; color: #9ca3af; font-weight: 500; white-space: nowrap; }
td { min-width: 4rem; height: 5rem; vertical-align: top; }
td.day { position: sticky; left: 0; min-width: 3rem; height: auto; padding: 0.5rem;
         font-weight: 700; text-align: center; vertical-align: middle; }
td.block { padding: 0.5rem; border-radius: 6px; }
td.block .time { font-weight: 600; margin-bottom: 0.2rem; }
td.block .code { font-weight: 700; }
td.block .meta { font-size: 0.7rem; opacity: 0.9; }
.mon { background: #ca8a04; } .tue { background: #db2777; } .wed { background: #16a34a; }
.thu { background: #ea580c; } .fri { background: #2563eb; } .sat { background: #9333ea; }
.sun { background: #dc2626; }
</style>
</head>
<body>
<h1>Weekly Schedule</h1>
<div class="wrap">
"#;

const PAGE_FOOT: &str = r#"</div>
</body>
</html>
"#;

/// Minimal HTML escaping for text scraped out of the source document.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// CSS accent class for a day row and its blocks.
fn day_class(day: Day) -> &'static str {
    match day {
        Day::Mon => "mon",
        Day::Tue => "tue",
        Day::Wed => "wed",
        Day::Thu => "thu",
        Day::Fri => "fri",
        Day::Sat => "sat",
        Day::Sun => "sun",
    }
}

/// One occupied block: a `<td>` spanning `span` columns with the time range,
/// code, title, room and type/section.
fn block_html(course: &CourseRecord, span: usize, class: &str) -> String {
    let end = match (
        parse_time_to_minutes(&course.start),
        parse_duration_to_minutes(&course.duration),
    ) {
        (Some(start), Some(duration)) => end_label(start, duration),
        _ => NA.to_string(),
    };

    format!(
        "<td colspan=\"{}\" class=\"block {}\">\n\
         <div class=\"time\">[{}-{}]</div>\n\
         <div class=\"code\">{}</div>\n\
         <div class=\"title\">{}</div>\n\
         <div class=\"meta\">{} | {} {}</div>\n\
         </td>\n",
        span,
        class,
        escape_html(&course.start),
        escape_html(&end),
        escape_html(&course.code),
        escape_html(&course.title),
        escape_html(&course.room),
        escape_html(course.course_type.as_str()),
        escape_html(&course.section),
    )
}

/// One `<tr>` per day: the sticky day label, then the row's cells in order.
/// Covered slots are inside their block's colspan and emit nothing.
fn row_html(row: &DayRow) -> String {
    let class = day_class(row.day);
    let mut html = format!("<tr>\n<td class=\"day {}\">{}</td>\n", class, row.day.code());
    for cell in &row.cells {
        match cell {
            Cell::Empty => html.push_str("<td></td>\n"),
            Cell::Block { course, span } => html.push_str(&block_html(course, *span, class)),
        }
    }
    html.push_str("</tr>\n");
    html
}

/// Renders the whole timetable page: shell, a header row of axis labels,
/// one row per day.
pub fn schedule_page_html(grid: &WeekGrid, axis: &TimeAxis) -> String {
    let mut html = String::from(PAGE_HEAD);
    html.push_str("<table>\n<thead>\n<tr><th>Day/Time</th>");
    for label in axis.labels() {
        html.push_str(&format!("<th>{}</th>", label));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &grid.rows {
        html.push_str(&row_html(row));
    }
    html.push_str("</tbody>\n</table>\n");
    html.push_str(PAGE_FOOT);
    html
}

/// Writes the rendered page to a file
pub fn write_page_to_file(path: &str, html: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(path)?;
    file.write_all(html.as_bytes())?;
    Ok(())
}

/// Prints a per-day placement summary in a readable format
pub fn print_week_summary(grid: &WeekGrid) {
    println!("\n=== Weekly timetable ===");
    for row in &grid.rows {
        let blocks: Vec<&CourseRecord> = row
            .cells
            .iter()
            .filter_map(|cell| match cell {
                Cell::Block { course, .. } => Some(*course),
                Cell::Empty => None,
            })
            .collect();
        println!("{}: {} class(es)", row.day.code(), blocks.len());
        for course in blocks {
            println!(
                "  {} {} ({} {})",
                course.start,
                course.code,
                course.course_type.as_str(),
                course.section
            );
        }
    }
}

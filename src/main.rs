mod display;
mod parser;
mod schedule;

use std::error::Error;
use std::process;

use display::{print_week_summary, schedule_page_html, write_page_to_file};
use parser::{extract_courses, load_courses, save_courses, CourseRecord};
use schedule::{layout_week, GridConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        Some("extract") if args.len() == 4 => run_extract(&args[2], &args[3]),
        Some("render") if args.len() == 4 => run_render(&args[2], &args[3]),
        _ if args.len() == 3 => run_pipeline(&args[1], &args[2]),
        _ => {
            eprintln!("Usage: course-timetable <input.html> <output.html>");
            eprintln!("       course-timetable extract <input.html> <records.json>");
            eprintln!("       course-timetable render <records.json> <output.html>");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Stage 1 on its own: source page in, record file out.
fn run_extract(input_path: &str, records_path: &str) -> Result<(), Box<dyn Error>> {
    println!("Extracting course cards from '{}'...", input_path);
    let html = std::fs::read_to_string(input_path)?;

    let records = extract_courses(&html);
    if records.is_empty() {
        return Err(format!("no course cards found in '{}'", input_path).into());
    }
    println!("Extracted {} course record(s)", records.len());

    save_courses(records_path, &records)?;
    println!("Records written to '{}'", records_path);
    Ok(())
}

/// Stage 2 on its own: record file in, rendered page out.
fn run_render(records_path: &str, output_path: &str) -> Result<(), Box<dyn Error>> {
    println!("Loading course records from '{}'...", records_path);
    let records = load_courses(records_path)?;
    if records.is_empty() {
        return Err(format!("'{}' contains no course records", records_path).into());
    }
    println!("Loaded {} course record(s)", records.len());

    render_to_file(&records, output_path)
}

/// Default mode: both stages composed in-process, no intermediate file.
fn run_pipeline(input_path: &str, output_path: &str) -> Result<(), Box<dyn Error>> {
    println!("Generating timetable from '{}'...", input_path);
    let html = std::fs::read_to_string(input_path)?;

    let records = extract_courses(&html);
    if records.is_empty() {
        return Err(format!("no course cards found in '{}'", input_path).into());
    }
    println!("Extracted {} course record(s)", records.len());

    render_to_file(&records, output_path)
}

/// Shared tail of the pipeline: layout, console summary, page, file.
fn render_to_file(records: &[CourseRecord], output_path: &str) -> Result<(), Box<dyn Error>> {
    let config = GridConfig::default();
    let axis = config.axis();

    let grid = layout_week(records, &axis, &config.days);
    print_week_summary(&grid);

    let page = schedule_page_html(&grid, &axis);
    write_page_to_file(output_path, &page)?;
    println!("\nTimetable saved to '{}'", output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PAGE: &str = r#"
        <html><body>
        <div class="card">
          <div style="font-weight: 600; font-size: 10px;">MON</div>
          <div style="font-weight: 500; font-size: 18px;">09:00 - 10:30</div>
          <div style="font-weight: 600; font-size: 12px;">CS101</div>
          <div class="cut-word">Intro to Computing</div>
          <div><span>Room</span> E204</div>
          <span class="badge badge-blue">Lec</span>
          <span style="color: rgb(10, 187, 135);">800</span>
        </div>
        <div class="card">
          <div style="font-weight: 600; font-size: 10px;">TUE</div>
          <div style="font-weight: 500; font-size: 18px;">13:00 - 16:00</div>
          <div style="font-weight: 600; font-size: 12px;">CS102</div>
          <div class="cut-word">Programming Lab</div>
          <div><span>ห้อง</span> B310</div>
          <span class="badge badge-orange">ปฏิบัติ</span>
          <span style="color: rgb(10, 187, 135);">801</span>
        </div>
        </body></html>"#;

    #[test]
    fn staged_pipeline_round_trips_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.html");
        let records = dir.path().join("records.json");
        let output = dir.path().join("schedule.html");
        fs::write(&input, PAGE).unwrap();

        run_extract(input.to_str().unwrap(), records.to_str().unwrap()).unwrap();
        run_render(records.to_str().unwrap(), output.to_str().unwrap()).unwrap();

        let json = fs::read_to_string(&records).unwrap();
        assert!(json.contains("\"CS101\""));
        assert!(json.contains("\"Laboratory\""));

        let page = fs::read_to_string(&output).unwrap();
        assert!(page.contains("[09:00-10:30]"));
        assert!(page.contains("[13:00-16:00]"));
        assert!(page.contains("B310"));
    }

    #[test]
    fn single_shot_pipeline_writes_the_page() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.html");
        let output = dir.path().join("schedule.html");
        fs::write(&input, PAGE).unwrap();

        run_pipeline(input.to_str().unwrap(), output.to_str().unwrap()).unwrap();
        let page = fs::read_to_string(&output).unwrap();
        assert!(page.contains("CS101"));
        assert!(page.contains("Programming Lab"));
    }

    #[test]
    fn extraction_fails_when_no_cards_are_present() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.html");
        let records = dir.path().join("records.json");
        fs::write(&input, "<html><body><p>nothing here</p></body></html>").unwrap();

        let err = run_extract(input.to_str().unwrap(), records.to_str().unwrap());
        assert!(err.is_err());
        assert!(!records.exists());
    }

    #[test]
    fn render_fails_on_a_malformed_record_file() {
        let dir = tempfile::tempdir().unwrap();
        let records = dir.path().join("records.json");
        let output = dir.path().join("schedule.html");
        fs::write(&records, "this is not json").unwrap();

        let err = run_render(records.to_str().unwrap(), output.to_str().unwrap());
        assert!(err.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn render_fails_on_an_empty_record_set() {
        let dir = tempfile::tempdir().unwrap();
        let records = dir.path().join("records.json");
        let output = dir.path().join("schedule.html");
        fs::write(&records, "[]").unwrap();

        let err = run_render(records.to_str().unwrap(), output.to_str().unwrap());
        assert!(err.is_err());
        assert!(!output.exists());
    }
}

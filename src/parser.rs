use std::fs;
use std::path::Path;

use chrono::NaiveTime;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel for any field whose marker is missing from a card.
pub const NA: &str = "N/A";

/// Label vocabularies for the two template languages (English / Thai).
/// Both sets resolve to the same field; matching is a literal text check.
const ROOM_LABELS: [&str; 2] = ["Room", "ห้อง"];
const LECTURE_LABELS: [&str; 2] = ["Lec", "บรรยาย"];
const LAB_LABELS: [&str; 2] = ["Lab", "ปฏิบัติ"];

/// Day of the week as it appears on a course card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    /// Parses a three-letter day code, case-insensitively.
    pub fn parse(s: &str) -> Option<Day> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MON" => Some(Day::Mon),
            "TUE" => Some(Day::Tue),
            "WED" => Some(Day::Wed),
            "THU" => Some(Day::Thu),
            "FRI" => Some(Day::Fri),
            "SAT" => Some(Day::Sat),
            "SUN" => Some(Day::Sun),
            _ => None,
        }
    }

    /// Canonical uppercase code, as used on the cards and the row headers.
    pub fn code(&self) -> &'static str {
        match self {
            Day::Mon => "MON",
            Day::Tue => "TUE",
            Day::Wed => "WED",
            Day::Thu => "THU",
            Day::Fri => "FRI",
            Day::Sat => "SAT",
            Day::Sun => "SUN",
        }
    }
}

/// Kind of class session. `Unknown` keeps the raw badge text so it can still
/// be shown as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseType {
    Lecture,
    Laboratory,
    Unknown(String),
}

impl CourseType {
    /// Resolves a badge label from either language to the semantic type.
    pub fn classify(label: &str) -> CourseType {
        let label = label.trim();
        if LECTURE_LABELS.contains(&label) {
            CourseType::Lecture
        } else if LAB_LABELS.contains(&label) {
            CourseType::Laboratory
        } else {
            CourseType::Unknown(label.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CourseType::Lecture => "Lecture",
            CourseType::Laboratory => "Laboratory",
            CourseType::Unknown(raw) => raw,
        }
    }
}

impl Serialize for CourseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CourseType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "Lecture" => CourseType::Lecture,
            "Laboratory" => CourseType::Laboratory,
            _ => CourseType::Unknown(s),
        })
    }
}

/// One course entry, in document order. Produced once by extraction and
/// read-only afterwards; `start` and `duration` are normalized `HH:MM`
/// strings, or the sentinel when the time range could not be parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    pub day: Option<Day>,
    pub start: String,
    pub duration: String,
    pub code: String,
    pub title: String,
    pub room: String,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    pub section: String,
}

/// Pre-parsed selectors for the known card template. The style strings are
/// the template's own inline styles and identify fields, not presentation.
struct CardSelectors {
    card: Selector,
    day: Selector,
    time: Selector,
    code: Selector,
    title: Selector,
    span: Selector,
    badge: Selector,
    section: Selector,
}

impl CardSelectors {
    fn new() -> CardSelectors {
        CardSelectors {
            card: sel("div.card"),
            day: sel(r#"div[style="font-weight: 600; font-size: 10px;"]"#),
            time: sel(r#"div[style="font-weight: 500; font-size: 18px;"]"#),
            code: sel(r#"div[style="font-weight: 600; font-size: 12px;"]"#),
            title: sel("div.cut-word"),
            span: sel("span"),
            badge: sel(r#"span[class*="badge-blue"], span[class*="badge-orange"]"#),
            section: sel(r#"span[style="color: rgb(10, 187, 135);"]"#),
        }
    }
}

/// All selector strings are fixed and known-valid CSS.
fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Extracts every course card from the registration page, in document order.
/// No reordering, no dedup. A missing marker only costs that one field; the
/// rest of the card and the remaining cards still come through.
pub fn extract_courses(html: &str) -> Vec<CourseRecord> {
    let doc = Html::parse_document(html);
    let sels = CardSelectors::new();

    let mut records = Vec::new();
    for card in doc.select(&sels.card) {
        records.push(extract_card(&card, &sels));
    }
    records
}

fn extract_card(card: &ElementRef, sels: &CardSelectors) -> CourseRecord {
    let day = first_text(card, &sels.day).and_then(|t| Day::parse(&t));

    let time_range = first_text(card, &sels.time).unwrap_or_else(|| NA.to_string());
    let (start, duration) = parse_time_range(&time_range);

    let code = first_text(card, &sels.code).unwrap_or_else(|| NA.to_string());
    let title = first_text(card, &sels.title).unwrap_or_else(|| NA.to_string());
    let room = extract_room(card, sels);
    let course_type = match first_text(card, &sels.badge) {
        Some(label) => CourseType::classify(&label),
        None => CourseType::Unknown(NA.to_string()),
    };
    let section = first_text(card, &sels.section).unwrap_or_else(|| NA.to_string());

    CourseRecord {
        day,
        start,
        duration,
        code,
        title,
        room,
        course_type,
        section,
    }
}

/// Text of the first match for `selector` inside `scope`, or `None` when the
/// marker is absent or empty.
fn first_text(scope: &ElementRef, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
}

/// Collected text of an element with runs of whitespace collapsed.
fn element_text(el: &ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The room value sits next to its label span ("Room 204" / "ห้อง 204"), so
/// the value is the label span's parent text with the label removed.
fn extract_room(card: &ElementRef, sels: &CardSelectors) -> String {
    for span in card.select(&sels.span) {
        let text = element_text(&span);
        let label = match ROOM_LABELS.iter().copied().find(|&l| text.contains(l)) {
            Some(l) => l,
            None => continue,
        };
        if let Some(parent) = span.parent().and_then(ElementRef::wrap) {
            let value = element_text(&parent).replace(label, "");
            let value = value.trim();
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }
    NA.to_string()
}

/// Splits `HH:MM - HH:MM` into a normalized start and a duration. An end
/// before the start means the session runs past midnight, so a day is added
/// before subtracting. Anything that does not parse falls back to sentinels;
/// the record is still emitted and layout decides what to do with it.
fn parse_time_range(time_range: &str) -> (String, String) {
    let (start_str, end_str) = match time_range.split_once(" - ") {
        Some(parts) => parts,
        None => return (NA.to_string(), NA.to_string()),
    };

    let start = NaiveTime::parse_from_str(start_str.trim(), "%H:%M");
    let end = NaiveTime::parse_from_str(end_str.trim(), "%H:%M");
    match (start, end) {
        (Ok(start), Ok(end)) => {
            let mut minutes = end.signed_duration_since(start).num_minutes();
            if minutes < 0 {
                minutes += 24 * 60;
            }
            (
                start.format("%H:%M").to_string(),
                format!("{:02}:{:02}", minutes / 60, minutes % 60),
            )
        }
        // Start alone is still worth showing; the missing end flags the
        // duration as unusable.
        (Ok(start), Err(_)) => (start.format("%H:%M").to_string(), NA.to_string()),
        _ => (NA.to_string(), NA.to_string()),
    }
}

/// Loads the intermediate record file written by `extract`.
///
/// # Arguments
/// * `path` - Path to the JSON record file
pub fn load_courses<P: AsRef<Path>>(path: P) -> Result<Vec<CourseRecord>, Box<dyn std::error::Error>> {
    let data = fs::read_to_string(path)?;
    let records: Vec<CourseRecord> = serde_json::from_str(&data)?;
    Ok(records)
}

/// Writes the record sequence as pretty-printed JSON, in extraction order.
pub fn save_courses<P: AsRef<Path>>(
    path: P,
    records: &[CourseRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

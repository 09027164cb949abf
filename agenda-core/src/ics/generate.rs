//! Render the event set as an RFC 5545 calendar document.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::event::Event;

pub const CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

const PRODID: &str = "-//agenda//NONSGML Event Feed//NL";
const UID_DOMAIN: &str = "agenda";

/// Render all events as one VCALENDAR, stamped with the current time
pub fn render_now(events: &[Event]) -> String {
    render(events, Utc::now())
}

/// Render all events as one VCALENDAR with one VEVENT per event.
///
/// `now` becomes the DTSTAMP of every block.
pub fn render(events: &[Event], now: DateTime<Utc>) -> String {
    let dtstamp = now.format("%Y%m%dT%H%M%SZ").to_string();
    let mut cal = Calendar::new();

    for event in events {
        let ics_event = icalendar::Event::new()
            .uid(&format!("{}@{UID_DOMAIN}", event.id))
            .summary(&normalize_line_breaks(&event.title))
            .add_property("DTSTAMP", &dtstamp)
            .add_property("DTSTART", compact_timestamp(&event.start))
            .add_property("DTEND", compact_timestamp(&event.end))
            .done();
        cal.push(ics_event);
    }

    set_prodid(&cal.done().to_string())
}

/// Strip date and time separators: `2024-05-01T09:00` becomes `20240501T0900`.
///
/// No timezone handling. Control characters are dropped so a value can never
/// end its content line early.
pub fn compact_timestamp(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '-' | ':') && !c.is_control())
        .collect()
}

/// The crate escapes `\n` in text values but leaves a bare `\r` alone
fn normalize_line_breaks(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n")
}

/// Replace the crate's default PRODID with ours
fn set_prodid(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
        } else {
            result.push_str(line);
        }
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(id: &str, title: &str, start: &str, end: &str) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
    }

    fn unfold(ics: &str) -> String {
        ics.replace("\r\n ", "")
    }

    /// Content lines of the first VEVENT, unfolded and sorted
    fn first_block(ics: &str) -> Vec<String> {
        let unfolded = unfold(ics);
        let mut block: Vec<String> = unfolded
            .split("BEGIN:VEVENT\r\n")
            .nth(1)
            .unwrap()
            .split("END:VEVENT")
            .next()
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        block.sort();
        block
    }

    #[test]
    fn empty_feed_has_only_envelope() {
        let ics = render(&[], fixed_now());

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"), "{ics}");
        assert!(ics.ends_with("END:VCALENDAR\r\n"), "{ics}");
        assert!(ics.contains("\r\nVERSION:2.0\r\n"), "{ics}");
        assert!(ics.contains("\r\nPRODID:-//agenda//NONSGML Event Feed//NL\r\n"), "{ics}");
        assert!(!ics.contains("VEVENT"), "{ics}");
        assert_eq!(ics.matches("PRODID:").count(), 1);
    }

    #[test]
    fn renders_one_block_per_event() {
        let events = vec![
            event("a1", "Standup", "2024-05-01T09:00", "2024-05-01T09:15"),
            event("b2", "Retro", "2024-05-02T16:00", "2024-05-02T17:00"),
            event("c3", "Demo", "2024-05-03T11:00", "2024-05-03T12:00"),
        ];

        let ics = render(&events, fixed_now());

        assert_eq!(ics.matches("BEGIN:VEVENT\r\n").count(), 3);
        assert_eq!(ics.matches("END:VEVENT\r\n").count(), 3);
        for e in &events {
            assert!(
                ics.contains(&format!("UID:{}@agenda\r\n", e.id)),
                "Missing UID for {}. ICS:\n{}",
                e.id,
                ics
            );
        }
    }

    #[test]
    fn block_has_exactly_five_properties() {
        let events = vec![event("a1", "Standup", "2024-05-01T09:00", "2024-05-01T09:15")];

        let ics = render(&events, fixed_now());

        assert_eq!(
            first_block(&ics),
            vec![
                "DTEND:20240501T0915",
                "DTSTAMP:20240501T083000Z",
                "DTSTART:20240501T0900",
                "SUMMARY:Standup",
                "UID:a1@agenda",
            ]
        );
    }

    #[test]
    fn compact_timestamp_strips_separators_only() {
        assert_eq!(compact_timestamp("2024-05-01T09:00"), "20240501T0900");
        assert_eq!(compact_timestamp("2024-05-01T09:00:30Z"), "20240501T090030Z");
        assert_eq!(compact_timestamp("2024-05-01"), "20240501");
        assert_eq!(compact_timestamp("morgen"), "morgen");
    }

    #[test]
    fn compact_timestamp_drops_line_breaks() {
        assert_eq!(compact_timestamp("2024-05-01\r\nEND:VEVENT"), "20240501ENDVEVENT");
    }

    #[test]
    fn summary_is_escaped() {
        let events = vec![event(
            "a1",
            "Lunch; bring snacks, drinks\\cups\nEND:VEVENT",
            "2024-05-01T12:00",
            "2024-05-01T13:00",
        )];

        let ics = render(&events, fixed_now());

        assert!(
            unfold(&ics).contains("SUMMARY:Lunch\\; bring snacks\\, drinks\\\\cups\\nEND:VEVENT\r\n"),
            "Summary not escaped. ICS:\n{}",
            ics
        );
        // The injected END:VEVENT must not start a line of its own
        assert_eq!(ics.lines().filter(|l| *l == "END:VEVENT").count(), 1);
    }

    #[test]
    fn carriage_returns_in_summary_become_escaped_newlines() {
        let events = vec![event("a1", "a\r\nb\rc", "2024-05-01T12:00", "2024-05-01T13:00")];

        let ics = render(&events, fixed_now());

        assert!(unfold(&ics).contains("SUMMARY:a\\nb\\nc\r\n"), "{ics}");
        assert!(!ics.replace("\r\n", "").contains('\r'), "{ics:?}");
    }

    #[test]
    fn hostile_start_cannot_break_the_block() {
        let events = vec![event(
            "a1",
            "Standup",
            "2024-05-01T09:00\nEND:VEVENT\nBEGIN:VEVENT",
            "2024-05-01T09:15",
        )];

        let ics = render(&events, fixed_now());

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1, "{ics}");
        assert_eq!(ics.lines().filter(|l| *l == "END:VEVENT").count(), 1, "{ics}");
    }

    #[test]
    fn long_lines_are_folded() {
        let title = "Quarterly planning session with the whole team ".repeat(4);
        let events = vec![event("a1", &title, "2024-05-01T09:00", "2024-05-01T17:00")];

        let ics = render(&events, fixed_now());

        assert!(ics.contains("\r\n "), "Nothing folded. ICS:\n{ics}");
        for line in ics.split("\r\n") {
            let content = line.strip_prefix(' ').unwrap_or(line);
            assert!(content.len() <= 75, "Line too long ({}): {}", content.len(), line);
        }
        assert!(unfold(&ics).contains(&format!("SUMMARY:{}\r\n", title)));
    }

    #[test]
    fn folding_keeps_multibyte_characters_whole() {
        let title = "Vergadering über € ".repeat(10);
        let events = vec![event("a1", &title, "2024-05-01T09:00", "2024-05-01T10:00")];

        let ics = render(&events, fixed_now());

        for line in ics.split("\r\n") {
            let content = line.strip_prefix(' ').unwrap_or(line);
            assert!(content.len() <= 75, "Line too long ({}): {}", content.len(), line);
        }
        assert!(unfold(&ics).contains(&format!("SUMMARY:{}\r\n", title)));
    }
}

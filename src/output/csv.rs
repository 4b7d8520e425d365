//! Event log CSV export.
//!
//! Each cell is JSON-encoded: strings quoted and escaped, numbers bare,
//! missing values as `""`. Rows are CRLF-separated.

use crate::model::EventRecord;
use chrono::SecondsFormat;
use serde_json::Value;

pub const CSV_HEADERS: [&str; 6] = [
    "caseId",
    "activity",
    "timestamp",
    "resource",
    "lifecycle",
    "durationSecs",
];

pub fn export_csv(events: &[EventRecord]) -> String {
    let mut lines = Vec::with_capacity(events.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for event in events {
        let cells = [
            Value::from(event.case_id.as_str()),
            Value::from(event.activity.as_str()),
            Value::from(event.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            event.resource.as_deref().map(Value::from).unwrap_or_else(|| Value::from("")),
            Value::from(event.lifecycle.as_str()),
            event.duration_secs.map(Value::from).unwrap_or_else(|| Value::from("")),
        ];
        let row: Vec<String> = cells.iter().map(Value::to_string).collect();
        lines.push(row.join(","));
    }

    lines.join("\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_export_csv() {
        let ts = Utc.with_ymd_and_hms(2025, 8, 10, 8, 5, 0).unwrap();
        let mut bare = EventRecord::complete("M-2", "Say \"hi\", then go", ts, 0);
        bare.duration_secs = None;
        let events = vec![
            EventRecord::complete("M-1001", "CNC Milling", ts, 5400).with_resource("Operator Raj"),
            bare,
        ];

        let csv = export_csv(&events);
        let lines: Vec<&str> = csv.split("\r\n").collect();

        assert_eq!(lines[0], "caseId,activity,timestamp,resource,lifecycle,durationSecs");
        assert_eq!(
            lines[1],
            r#""M-1001","CNC Milling","2025-08-10T08:05:00Z","Operator Raj","complete",5400"#
        );
        assert_eq!(
            lines[2],
            r#""M-2","Say \"hi\", then go","2025-08-10T08:05:00Z","","complete","""#
        );
    }

    #[test]
    fn test_export_keeps_unknown_lifecycle() {
        let json = r#"{"caseId":"M-1","activity":"A","timestamp":"2025-08-10T08:05:00Z","lifecycle":"paused","durationSecs":5}"#;
        let event: EventRecord = serde_json::from_str(json).unwrap();

        let csv = export_csv(&[event]);
        assert!(csv.ends_with(r#""M-1","A","2025-08-10T08:05:00Z","","paused",5"#));
    }

    #[test]
    fn test_export_empty() {
        assert_eq!(export_csv(&[]), CSV_HEADERS.join(","));
    }
}

//! Long-event alerts for raw event listings.
//!
//! Unrelated to the relative deviation threshold: this is an absolute
//! duration cut-off on individual events.

use crate::model::EventRecord;

/// Whether a single event ran longer than `alert_secs`
pub fn is_long_event(event: &EventRecord, alert_secs: u64) -> bool {
    event.duration() > alert_secs
}

/// Events over the cut-off, in document order
pub fn long_events(events: &[EventRecord], alert_secs: u64) -> Vec<&EventRecord> {
    events.iter().filter(|e| is_long_event(e, alert_secs)).collect()
}

//! Process-wide KPIs and the coarse period trend.

use super::metrics::{mean_duration, round_secs};
use crate::model::EventRecord;
use crate::utils::config::{KPI_TREND_BUCKETS, KPI_TREND_SAMPLE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Headline numbers across all events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessKpis {
    /// Distinct case ids
    pub active_cases: usize,
    pub completed_events: usize,
    /// Rounded mean over complete events
    pub avg_duration_secs: u64,
}

/// Mean duration (minutes) of one period bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendBucket {
    pub name: String,
    pub avg_minutes: u64,
}

/// Traffic-light band for an on-time percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnTimeBand {
    Good,
    Warning,
    Critical,
}

pub fn on_time_band(percent: u8) -> OnTimeBand {
    if percent >= 80 {
        OnTimeBand::Good
    } else if percent >= 50 {
        OnTimeBand::Warning
    } else {
        OnTimeBand::Critical
    }
}

pub fn compute_kpis(events: &[EventRecord]) -> ProcessKpis {
    let active_cases = events
        .iter()
        .map(|e| e.case_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let completes: Vec<&EventRecord> = events.iter().filter(|e| e.is_complete()).collect();

    ProcessKpis {
        active_cases,
        completed_events: completes.len(),
        avg_duration_secs: mean_duration(completes.iter().map(|e| e.duration()))
            .map(round_secs)
            .unwrap_or(0),
    }
}

/// Spread the most recent complete events round-robin over `P1..P4`
pub fn period_trend(events: &[EventRecord]) -> Vec<TrendBucket> {
    let mut completes: Vec<&EventRecord> = events.iter().filter(|e| e.is_complete()).collect();
    completes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut buckets: Vec<Vec<u64>> = vec![Vec::new(); KPI_TREND_BUCKETS];
    for (i, event) in completes.into_iter().take(KPI_TREND_SAMPLE).enumerate() {
        buckets[i % KPI_TREND_BUCKETS].push(event.duration());
    }

    buckets
        .into_iter()
        .enumerate()
        .map(|(i, values)| TrendBucket {
            name: format!("P{}", i + 1),
            avg_minutes: mean_duration(values.into_iter())
                .map(|secs| round_secs(secs / 60.0))
                .unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Lifecycle;
    use chrono::{Duration, TimeZone, Utc};

    fn event(case: &str, minute: i64, secs: u64) -> EventRecord {
        let base = Utc.with_ymd_and_hms(2025, 8, 10, 8, 0, 0).unwrap();
        EventRecord::complete(case, "A", base + Duration::minutes(minute), secs)
    }

    #[test]
    fn test_kpis() {
        let events = vec![
            event("M-1", 0, 600),
            event("M-1", 1, 1200),
            event("M-2", 2, 0).with_lifecycle(Lifecycle::Start),
        ];
        let kpis = compute_kpis(&events);
        assert_eq!(kpis.active_cases, 2);
        assert_eq!(kpis.completed_events, 2);
        assert_eq!(kpis.avg_duration_secs, 900);
    }

    #[test]
    fn test_kpis_empty() {
        assert_eq!(compute_kpis(&[]), ProcessKpis::default());
    }

    #[test]
    fn test_period_trend_buckets() {
        let events: Vec<EventRecord> = (0..8).map(|m| event("M-1", m, 60 * (m as u64 + 1))).collect();
        let trend = period_trend(&events);
        assert_eq!(trend.len(), 4);
        assert_eq!(trend[0].name, "P1");
        // newest first: minutes 8,7,6,5,4,3,2,1 -> P1 = {8, 4}
        assert_eq!(trend[0].avg_minutes, 6);
        assert_eq!(trend[3].avg_minutes, 3);
    }

    #[test]
    fn test_period_trend_empty_buckets_are_zero() {
        let trend = period_trend(&[event("M-1", 0, 600)]);
        assert_eq!(trend[0].avg_minutes, 10);
        assert!(trend[1..].iter().all(|b| b.avg_minutes == 0));
    }

    #[test]
    fn test_on_time_band() {
        assert_eq!(on_time_band(100), OnTimeBand::Good);
        assert_eq!(on_time_band(80), OnTimeBand::Good);
        assert_eq!(on_time_band(50), OnTimeBand::Warning);
        assert_eq!(on_time_band(49), OnTimeBand::Critical);
    }
}

use chrono::{DateTime, Duration, TimeZone, Utc};
use flowlens::aggregator::{
    compute_metrics, explain_bottleneck, find_bottleneck, NO_DATA_MESSAGE,
};
use flowlens::model::{EventRecord, Lifecycle, StepDefinition};
use pretty_assertions::assert_eq;

fn ts(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 10, 8, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn complete(activity: &str, secs: u64) -> EventRecord {
    EventRecord::complete("M-1001", activity, ts(0), secs)
}

#[test]
fn test_zero_events_defaults() {
    let steps = vec![
        StepDefinition::new("s1", "A").with_sla(1.0),
        StepDefinition::new("s2", "B"),
    ];

    let metrics = compute_metrics(&steps, &[]);

    assert_eq!(metrics.len(), 2);
    for m in metrics.iter() {
        assert_eq!(m.count, 0);
        assert_eq!(m.avg_duration_secs, 0);
        assert_eq!(m.on_time_percent, 100);
        assert!(m.recent_trend.is_empty());
    }
}

#[test]
fn test_unmatched_events_ignored() {
    let steps = vec![StepDefinition::new("s1", "A")];
    let events = vec![complete("A", 60), complete("a", 60), complete("Unknown", 9999)];

    let metrics = compute_metrics(&steps, &events);

    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics.get("s1").unwrap().count, 1);
    assert_eq!(metrics.get("s1").unwrap().avg_duration_secs, 60);
}

#[test]
fn test_sla_scenario() {
    let steps = vec![StepDefinition::new("s1", "A").with_sla(1.0)];
    let events = vec![complete("A", 3600), complete("A", 7200)];

    let metrics = compute_metrics(&steps, &events);
    let a = metrics.get("s1").unwrap();

    assert_eq!(a.count, 2);
    assert_eq!(a.avg_duration_secs, 5400);
    assert_eq!(a.on_time_percent, 50);
}

#[test]
fn test_on_time_percent_in_range() {
    let steps = vec![StepDefinition::new("s1", "A").with_sla(0.5)];
    let events: Vec<EventRecord> = (0..7).map(|i| complete("A", 1000 + i * 300)).collect();

    let metrics = compute_metrics(&steps, &events);
    let pct = metrics.get("s1").unwrap().on_time_percent;

    // 1000..=2800 against 1800: 1000, 1300, 1600 on time
    assert_eq!(pct, 43);
    assert!(pct <= 100);
}

#[test]
fn test_no_sla_always_on_time() {
    let steps = vec![StepDefinition::new("s1", "A")];
    let events = vec![complete("A", 1), complete("A", 1_000_000)];

    assert_eq!(compute_metrics(&steps, &events).get("s1").unwrap().on_time_percent, 100);
}

#[test]
fn test_rounding_half_away_from_zero() {
    let steps = vec![StepDefinition::new("s1", "A")];
    let events = vec![complete("A", 1), complete("A", 2)];

    assert_eq!(compute_metrics(&steps, &events).get("s1").unwrap().avg_duration_secs, 2);
}

#[test]
fn test_missing_duration_counts_as_zero() {
    let steps = vec![StepDefinition::new("s1", "A")];
    let mut bare = complete("A", 0);
    bare.duration_secs = None;
    let events = vec![bare, complete("A", 100)];

    assert_eq!(compute_metrics(&steps, &events).get("s1").unwrap().avg_duration_secs, 50);
}

#[test]
fn test_idempotent() {
    let steps = vec![
        StepDefinition::new("s1", "A").with_sla(1.0),
        StepDefinition::new("s2", "B"),
    ];
    let events = vec![
        complete("A", 4000),
        complete("B", 120).with_lifecycle(Lifecycle::Start),
        complete("A", 300),
    ];
    let before = events.clone();

    let first = compute_metrics(&steps, &events);
    let second = compute_metrics(&steps, &events);

    assert_eq!(first, second);
    assert_eq!(events, before);
}

#[test]
fn test_duplicate_label_first_match() {
    let steps = vec![StepDefinition::new("s1", "A"), StepDefinition::new("s2", "A")];
    let events = vec![complete("A", 600)];

    let metrics = compute_metrics(&steps, &events);

    assert_eq!(metrics.get("s1").unwrap().count, 1);
    assert_eq!(metrics.get("s2").unwrap().count, 0);
    assert_eq!(metrics.get("s2").unwrap().on_time_percent, 100);
}

#[test]
fn test_trend_uses_most_recent_complete_events() {
    let steps = vec![StepDefinition::new("s1", "A")];
    let mut events: Vec<EventRecord> = (0..20)
        .map(|i| EventRecord::complete("M-1", "A", ts(i), i as u64))
        .collect();
    events.push(EventRecord::complete("M-1", "A", ts(100), 5000).with_lifecycle(Lifecycle::Start));

    let metrics = compute_metrics(&steps, &events);
    let values: Vec<u64> = metrics.get("s1").unwrap().recent_trend.iter().map(|p| p.value).collect();

    assert_eq!(values, (8..20).collect::<Vec<u64>>());
}

#[test]
fn test_empty_events_sentinel() {
    let steps = vec![StepDefinition::new("s1", "A"), StepDefinition::new("s2", "B")];
    assert_eq!(explain_bottleneck(&steps, &[]), NO_DATA_MESSAGE);
}

#[test]
fn test_bottleneck_prefers_slow_and_frequent() {
    let steps = vec![StepDefinition::new("s1", "Outlier"), StepDefinition::new("s2", "Busy")];
    let mut events = vec![complete("Outlier", 1000)];
    events.extend((0..9).map(|_| complete("Busy", 400)));

    // 1000 * 1 vs 400 * 3
    let bottleneck = find_bottleneck(&compute_metrics(&steps, &events)).unwrap();
    assert_eq!(bottleneck.step_id, "s2");
    assert_eq!(
        explain_bottleneck(&steps, &events),
        "Busy is the current hotspot — avg 6m; on-time 100%."
    );
}

#[test]
fn test_zero_duration_events_still_pick_a_hotspot() {
    let steps = vec![StepDefinition::new("s1", "A"), StepDefinition::new("s2", "B")];
    let events = vec![complete("A", 0)];

    assert_eq!(
        explain_bottleneck(&steps, &events),
        "A is the current hotspot — avg —; on-time 100%."
    );
}

#[test]
fn test_in_progress_only_events_pick_first_step() {
    let steps = vec![StepDefinition::new("s1", "A"), StepDefinition::new("s2", "B")];
    let events = vec![
        complete("B", 7200).with_lifecycle(Lifecycle::Start),
        complete("A", 600).with_lifecycle(Lifecycle::Suspend),
    ];

    let bottleneck = find_bottleneck(&compute_metrics(&steps, &events)).unwrap();
    assert_eq!(bottleneck.step_id, "s1");
    assert_eq!(bottleneck.score, 0.0);
    assert_eq!(
        explain_bottleneck(&steps, &events),
        "A is the current hotspot — avg —; on-time 100%."
    );
}

#[test]
fn test_zero_score_tie_goes_to_first_definition() {
    let steps = vec![
        StepDefinition::new("s1", "A"),
        StepDefinition::new("s2", "B"),
        StepDefinition::new("s3", "C"),
    ];
    let events = vec![complete("C", 0), complete("B", 0)];

    let bottleneck = find_bottleneck(&compute_metrics(&steps, &events)).unwrap();
    assert_eq!(bottleneck.step_id, "s1");
}

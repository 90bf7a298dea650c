//! End-to-end delay collection through the public API.

use std::time::Duration;

use lull_core::{CollectError, Collector, Waiter, wait_n, wait_random};
use lull_types::{CollectStrategy, CollectorSettings, Delay, DelayBound, DelayCount, InvalidArgument};
use tokio::time::Instant;

use crate::common::{TEST_UNIT, TICK, assert_ascending, assert_within};

fn settings(bound: f64, count: usize) -> CollectorSettings {
    CollectorSettings::new(DelayBound::new(bound).unwrap(), DelayCount::new(count))
        .with_time_unit(TEST_UNIT)
}

#[tokio::test(start_paused = true)]
async fn bound_ten_count_five() {
    let settings = settings(10.0, 5);
    let delays = Collector::from_settings(&settings)
        .collect(settings.count().get())
        .await
        .unwrap();

    assert_eq!(delays.len(), 5);
    assert_within(&delays, 10.0);
    assert_ascending(&delays);
}

#[tokio::test(start_paused = true)]
async fn bound_zero_count_three() {
    let delays = wait_n(3, 0.0).await.unwrap();
    assert_eq!(delays, vec![Delay::ZERO, Delay::ZERO, Delay::ZERO]);
}

#[tokio::test(start_paused = true)]
async fn count_zero_is_empty_without_waiting() {
    let started = Instant::now();
    let delays = wait_n(0, 10.0).await.unwrap();
    assert!(delays.is_empty());
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn negative_bound_is_invalid_argument() {
    let started = Instant::now();

    let err = wait_n(4, -1.0).await.unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(matches!(
        wait_random(-1.0).await,
        Err(InvalidArgument::NegativeBound(_))
    ));
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn sorting_output_again_changes_nothing() {
    let delays = Collector::from_settings(&settings(10.0, 12))
        .collect(12)
        .await
        .unwrap();
    let mut again = delays.clone();
    again.sort();
    assert_eq!(again, delays);
}

#[tokio::test(start_paused = true)]
async fn every_waiter_samples_independently() {
    // Catches waiters sharing one draw. Sixteen equal independent f64 draws
    // from [0, 10) do not happen in practice.
    let delays = Collector::from_settings(&settings(10.0, 16))
        .collect(16)
        .await
        .unwrap();
    let first = delays[0];
    assert!(
        delays.iter().any(|d| *d != first),
        "16 identical samples: {delays:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn concurrent_run_overlaps_waits() {
    let collector = Collector::from_settings(&settings(10.0, 10));
    let started = Instant::now();
    let delays = collector.collect(10).await.unwrap();
    let elapsed = started.elapsed();

    let longest = delays.last().unwrap().to_duration(TEST_UNIT);
    let total: Duration = delays.iter().map(|d| d.to_duration(TEST_UNIT)).sum();
    assert!(elapsed <= longest + TICK, "{elapsed:?} > {longest:?}");
    assert!(elapsed >= longest);
    assert!(elapsed <= total + TICK);
}

#[tokio::test(start_paused = true)]
async fn sequential_run_waits_back_to_back() {
    let collector = Collector::from_settings(
        &settings(10.0, 5).with_strategy(CollectStrategy::Sequential),
    );
    let started = Instant::now();
    let delays = collector.collect(5).await.unwrap();
    let elapsed = started.elapsed();

    let total: Duration = delays.iter().map(|d| d.to_duration(TEST_UNIT)).sum();
    assert_ascending(&delays);
    assert!(elapsed >= total, "{elapsed:?} < {total:?}");
    assert!(elapsed <= total + TICK * 5, "{elapsed:?} > {total:?}");
}

#[tokio::test(start_paused = true)]
async fn deadline_reports_partial_progress() {
    let collector = Collector::new(Waiter::new(DelayBound::DEFAULT))
        .with_deadline(Some(Duration::from_millis(2)));

    let err = collector.collect(5).await.unwrap_err();
    match err {
        CollectError::DeadlineElapsed {
            deadline,
            completed,
            requested,
        } => {
            assert_eq!(deadline, Duration::from_millis(2));
            assert_eq!(requested, 5);
            assert!(completed < requested);
        }
        other => panic!("expected DeadlineElapsed, got {other:?}"),
    }
}

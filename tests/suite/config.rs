//! Config file through to a finished collector run.

use std::time::Duration;

use lull_config::{ConfigError, LullConfig, Overrides};
use lull_core::Collector;
use lull_types::{CollectStrategy, InvalidArgument};

use crate::common::{assert_ascending, assert_within, write_config};

#[tokio::test(start_paused = true)]
async fn file_settings_drive_collection() {
    let (_dir, path) = write_config(
        r#"
[waiter]
max_delay = 4.0
time_unit_ms = 5

[collector]
count = 6
strategy = "sequential"
"#,
    );

    let config = LullConfig::load_from(&path).unwrap().unwrap();
    let settings = config.resolve(&Overrides::default()).unwrap();
    assert_eq!(settings.strategy(), CollectStrategy::Sequential);
    assert_eq!(settings.time_unit(), Duration::from_millis(5));

    let delays = Collector::from_settings(&settings)
        .collect(settings.count().get())
        .await
        .unwrap();
    assert_eq!(delays.len(), 6);
    assert_within(&delays, 4.0);
    assert_ascending(&delays);
}

#[test]
fn cli_overrides_win_over_file() {
    let (_dir, path) = write_config("[waiter]\nmax_delay = 4.0\n[collector]\ncount = 6\n");
    let config = LullConfig::load_from(&path).unwrap().unwrap();

    let settings = config
        .resolve(&Overrides {
            count: Some(2),
            ..Overrides::default()
        })
        .unwrap();
    assert_eq!(settings.count().get(), 2);
    assert_eq!(settings.bound().as_f64(), 4.0);
}

#[test]
fn negative_bound_in_file_is_invalid_argument() {
    let (_dir, path) = write_config("[waiter]\nmax_delay = -1.0\n");
    let config = LullConfig::load_from(&path).unwrap().unwrap();
    assert_eq!(
        config.resolve(&Overrides::default()).unwrap_err(),
        InvalidArgument::NegativeBound(-1.0)
    );
}

#[test]
fn wrong_type_is_parse_error() {
    let (_dir, path) = write_config("[collector]\ncount = \"five\"\n");
    let err = LullConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn oversized_count_fails_at_resolve() {
    let (_dir, path) = write_config("[collector]\ncount = 9223372036854775807\n");
    let config = LullConfig::load_from(&path).unwrap().unwrap();
    assert_eq!(
        config.resolve(&Overrides::default()).unwrap_err(),
        InvalidArgument::CountTooLarge(9_223_372_036_854_775_807)
    );

    let err = config
        .resolve(&Overrides {
            count: Some(1 << 21),
            strategy: Some(CollectStrategy::Sequential),
            deadline_ms: Some(1),
            ..Overrides::default()
        })
        .unwrap_err();
    assert_eq!(err, InvalidArgument::CountTooLarge(1 << 21));
}

use guardvec_allocator::Recorder;
use guardvec_driver::config::DriverConfig;
use guardvec_driver::{Driver, Error, Report};
use std::time::Duration;

fn quiet_config(workers: u32, appends_per_worker: u32) -> DriverConfig {
    DriverConfig {
        workers,
        appends_per_worker,
        ..Default::default()
    }
    .with_pacing(Duration::from_millis(1))
}

#[test]
fn should_store_every_worker_value_once() -> anyhow::Result<()> {
    let recorder = Recorder::new();
    let driver = Driver::with_sink(DriverConfig::default(), recorder.clone());
    driver.spawn_workers()?;

    let report = driver.report()?;
    assert_eq!(15, report.size);
    assert!([100, 200, 300, 400, 500].contains(&report.first));

    let mut stored = (0..driver.values().len())
        .map(|index| driver.values().get(index))
        .collect::<Result<Vec<_>, _>>()?;
    stored.sort_unstable();
    assert_eq!(
        vec![
            100, 101, 102, 200, 201, 202, 300, 301, 302, 400, 401, 402, 500, 501, 502
        ],
        stored
    );

    drop(driver);
    assert!(recorder.acquisitions() >= 1);
    assert!(recorder.is_balanced());
    Ok(())
}

#[test]
fn should_keep_first_value_from_some_worker() -> anyhow::Result<()> {
    let recorder = Recorder::new();
    let driver = Driver::with_sink(quiet_config(5, 3), recorder);
    driver.spawn_workers()?;

    let Report { first, .. } = driver.report()?;
    assert!((1..=5).map(|id| id * 100).any(|value| value == first));
    Ok(())
}

#[test]
fn should_scale_with_config() -> anyhow::Result<()> {
    let recorder = Recorder::new();
    {
        let driver = Driver::with_sink(quiet_config(16, 20), recorder.clone());
        driver.spawn_workers()?;
        assert_eq!(16 * 20, driver.report()?.size);
    }
    assert!(recorder.is_balanced());
    Ok(())
}

#[test]
fn should_report_data_error_when_nothing_was_appended() {
    let driver = Driver::with_sink(quiet_config(0, 3), Recorder::new());
    driver.spawn_workers().unwrap();

    let err = driver.report().unwrap_err();
    assert!(err.is_data());
    assert!(matches!(err, Error::Sequence(guardvec::Error::Data(_))));
}

#[test]
fn should_run_default_exercise_through_config_sink() -> anyhow::Result<()> {
    let config: DriverConfig = "pacing: 1ms\ndiagnostics: { target: log }".parse()?;
    let report = guardvec_driver::run(config)?;
    assert_eq!(15, report.size);
    Ok(())
}

use guardvec_driver::config::DriverConfig;
use guardvec_driver::{Driver, Result};
use std::process::ExitCode;

fn exercise() -> Result<()> {
    let driver = Driver::new(DriverConfig::default());
    driver.spawn_workers()?;
    println!("{}", driver.report()?);
    // the remaining storage is released (and logged) here
    drop(driver);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match exercise() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_data() => {
            eprintln!("data error: {err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("general error: {err}");
            ExitCode::FAILURE
        }
    }
}

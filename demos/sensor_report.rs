//! Sensor Report Demo
//!
//! Collects one board sensor snapshot and prints it as JSON, the format
//! the gateway's management agent ingests.
//!
//! Run with: cargo run --example `sensor_report`

use placa::adc::AdcClient;
use placa::aht20::Aht20;
use placa::report;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut sensor = match Aht20::new(0) {
        Ok(sensor) => sensor,
        Err(e) => {
            eprintln!("cannot open climate sensor: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = sensor.init() {
        eprintln!("climate sensor init failed: {e}");
        return ExitCode::FAILURE;
    }

    let adc = AdcClient::new();

    match report::collect(&mut sensor, &adc) {
        Ok(snapshot) => match serde_json::to_string(&snapshot) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("cannot encode report: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("cannot collect report: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Fan Daemon Demo
//!
//! The gateway's fan-control loop: poll the SoC and board temperatures,
//! apply the fan curve, and update the EMC2101 duty cycle. Logs through
//! `tracing`; set `RUST_LOG=info` to watch it work.
//!
//! Run with: cargo run --example `fan_daemon`

use placa::adc::{AdcClient, BoardChannel};
use placa::aht20::Aht20;
use placa::emc2101::Emc2101;
use placa::thermal::{self, FanCurve};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

const POLL_INTERVAL: Duration = Duration::from_secs(60);
const INITIAL_DUTY: u8 = 30;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut fan = match Emc2101::new(0) {
        Ok(fan) => fan,
        Err(e) => {
            eprintln!("cannot open fan controller: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = fan.init() {
        eprintln!("fan controller probe failed: {e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = fan.apply_default_config(INITIAL_DUTY) {
        eprintln!("fan controller configuration failed: {e}");
        return ExitCode::FAILURE;
    }

    // The climate sensor and ADC enrich the log; the loop runs without them.
    let mut climate = Aht20::new(0).ok();
    let adc = AdcClient::new();
    let curve = FanCurve::default();
    let mut duty = INITIAL_DUTY;

    info!(initial_duty = duty, "fan daemon started");

    loop {
        if let Ok(rpm) = fan.fan_speed() {
            info!(rpm, "fan speed");
        }
        if let Ok(temp) = fan.temperature() {
            info!(temp_celsius = temp, "fan controller internal temperature");
        }

        if let Some(sensor) = climate.as_mut() {
            match sensor.measure() {
                Ok(reading) => info!(
                    temp_celsius = reading.temperature_celsius,
                    humidity_percent = reading.humidity_percent,
                    "board climate"
                ),
                Err(e) => warn!(error = %e, "climate measurement failed"),
            }
        }

        for channel in BoardChannel::ALL {
            let measurement = adc.read_measurement(channel);
            info!(channel = %channel, value = %measurement, "rail measurement");
        }

        match thermal::cpu_temperature() {
            Ok(cpu) => {
                let target = curve.duty_for(cpu);
                if target != duty {
                    match fan.set_duty_cycle(target) {
                        Ok(()) => {
                            info!(cpu_celsius = cpu, duty_percent = target, "fan duty updated");
                            duty = target;
                        }
                        Err(e) => warn!(error = %e, duty_percent = target, "fan duty update failed"),
                    }
                }
            }
            Err(e) => warn!(error = %e, "cannot read SoC temperature"),
        }

        thread::sleep(POLL_INTERVAL);
    }
}

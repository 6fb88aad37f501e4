//! SoC temperature and fan policy.
//!
//! The gateway keeps its enclosure fan keyed to the SoC temperature: the
//! kernel exposes the die sensor through a sysfs thermal zone, and a
//! [`FanCurve`] maps that temperature onto an EMC2101 duty cycle.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Default sysfs node for the SoC die sensor.
pub const THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";

/// Read the SoC temperature in degrees Celsius from the default zone.
///
/// # Errors
///
/// Returns an error if the zone file cannot be read or parsed.
pub fn cpu_temperature() -> Result<f32> {
    cpu_temperature_from(Path::new(THERMAL_ZONE))
}

/// Read a temperature in degrees Celsius from a specific zone file.
///
/// Thermal zone files report millidegrees as a decimal integer.
///
/// # Errors
///
/// Returns an error if the zone file cannot be read or parsed.
pub fn cpu_temperature_from(zone: &Path) -> Result<f32> {
    let contents = fs::read_to_string(zone)
        .map_err(|e| Error::thermal_zone(format!("read {}: {e}", zone.display())))?;
    parse_millidegrees(&contents)
}

#[allow(clippy::cast_precision_loss)] // millidegree counts are small
fn parse_millidegrees(contents: &str) -> Result<f32> {
    let raw = contents
        .trim_end()
        .parse::<i32>()
        .map_err(|e| Error::thermal_zone(format!("parse temperature: {e}")))?;
    Ok(raw as f32 / 1000.0)
}

/// One step of a fan curve: at or above this temperature, run at least
/// this duty cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanStep {
    /// Lower temperature bound for this step, in degrees Celsius.
    pub min_temp_celsius: f32,
    /// Duty cycle to request, 0-100 %.
    pub duty_percent: u8,
}

/// A step curve mapping temperature onto a fan duty cycle.
///
/// Steps are held hottest-first; [`duty_for`](Self::duty_for) returns the
/// duty of the first step at or below the given temperature, or 0 % below
/// every step.
#[derive(Debug, Clone, PartialEq)]
pub struct FanCurve {
    steps: Vec<FanStep>,
}

impl FanCurve {
    /// Build a curve from steps in any order.
    #[must_use]
    pub fn new(mut steps: Vec<FanStep>) -> Self {
        steps.sort_by(|a, b| {
            b.min_temp_celsius
                .partial_cmp(&a.min_temp_celsius)
                .unwrap_or(Ordering::Equal)
        });
        Self { steps }
    }

    /// The board's standard curve: full speed from 80 degC, 30 % from
    /// 60 degC, off below that.
    #[must_use]
    pub fn gateway_default() -> Self {
        Self::new(vec![
            FanStep {
                min_temp_celsius: 80.0,
                duty_percent: 100,
            },
            FanStep {
                min_temp_celsius: 60.0,
                duty_percent: 30,
            },
        ])
    }

    /// The duty cycle this curve requests at `temp_celsius`.
    #[must_use]
    pub fn duty_for(&self, temp_celsius: f32) -> u8 {
        self.steps
            .iter()
            .find(|step| temp_celsius >= step.min_temp_celsius)
            .map_or(0, |step| step.duty_percent)
    }

    /// The curve's steps, hottest-first.
    #[must_use]
    pub fn steps(&self) -> &[FanStep] {
        &self.steps
    }
}

impl Default for FanCurve {
    fn default() -> Self {
        Self::gateway_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curve_thresholds() {
        let curve = FanCurve::gateway_default();
        assert_eq!(curve.duty_for(25.0), 0);
        assert_eq!(curve.duty_for(59.9), 0);
        assert_eq!(curve.duty_for(60.0), 30);
        assert_eq!(curve.duty_for(79.9), 30);
        assert_eq!(curve.duty_for(80.0), 100);
        assert_eq!(curve.duty_for(120.0), 100);
    }

    #[test]
    fn test_curve_sorts_steps_hottest_first() {
        let curve = FanCurve::new(vec![
            FanStep {
                min_temp_celsius: 40.0,
                duty_percent: 10,
            },
            FanStep {
                min_temp_celsius: 70.0,
                duty_percent: 80,
            },
        ]);
        assert_eq!(curve.steps()[0].min_temp_celsius, 70.0);
        assert_eq!(curve.duty_for(75.0), 80);
        assert_eq!(curve.duty_for(45.0), 10);
    }

    #[test]
    fn test_empty_curve_is_always_off() {
        let curve = FanCurve::new(Vec::new());
        assert_eq!(curve.duty_for(200.0), 0);
    }

    #[test]
    fn test_nan_temperature_reads_as_coolest() {
        let curve = FanCurve::gateway_default();
        assert_eq!(curve.duty_for(f32::NAN), 0);
    }

    #[test]
    fn test_parse_millidegrees() {
        assert!((parse_millidegrees("45678\n").unwrap() - 45.678).abs() < 0.001);
        assert!((parse_millidegrees("0").unwrap() - 0.0).abs() < f32::EPSILON);
        assert!((parse_millidegrees("-5000\n").unwrap() + 5.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_millidegrees_rejects_garbage() {
        assert!(parse_millidegrees("not a number").is_err());
        assert!(parse_millidegrees("").is_err());
    }

    #[test]
    fn test_missing_zone_is_an_error_not_a_panic() {
        let result = cpu_temperature_from(Path::new("/nonexistent/thermal_zone/temp"));
        assert!(result.is_err());
    }

    #[test]
    fn test_zone_file_roundtrip() {
        let path = std::env::temp_dir().join("placa_thermal_zone_test");
        fs::write(&path, "61250\n").unwrap();
        let temp = cpu_temperature_from(&path).unwrap();
        assert!((temp - 61.25).abs() < 0.001);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_cpu_temperature_does_not_panic() {
        // Succeeds only where the default zone exists; must fail cleanly
        // elsewhere.
        let _ = cpu_temperature();
    }
}

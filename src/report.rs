//! Board sensor report.
//!
//! One snapshot of everything the board can measure: AHT20 climate data
//! plus the four converted ADC channels. The report is `Serialize` so the
//! embedding program can ship it as JSON (or anything else serde speaks);
//! encoding is the embedder's choice, not the library's.

use crate::adc::{AdcClient, BoardChannel};
use crate::aht20::Aht20;
use crate::error::Result;
use serde::Serialize;

/// One snapshot of the board's sensors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct BoardReport {
    /// AHT20 temperature in degrees Celsius.
    pub temperature_celsius: f32,
    /// AHT20 relative humidity, 0-100 %RH.
    pub humidity_percent: f32,
    /// Supply current, milliamps (ADC channel 0).
    pub current_0_ma: f32,
    /// Auxiliary current, milliamps (ADC channel 1).
    pub current_1_ma: f32,
    /// Supply rail voltage, millivolts (ADC channel 2).
    pub voltage_0_mv: f32,
    /// Backup rail voltage, millivolts (ADC channel 3).
    pub voltage_1_mv: f32,
}

/// Collect one report from live sensors.
///
/// # Errors
///
/// Returns an error if the AHT20 measurement fails; the ADC channels are
/// infallible reads.
pub fn collect(aht20: &mut Aht20, adc: &AdcClient) -> Result<BoardReport> {
    let climate = aht20.measure()?;
    Ok(BoardReport {
        temperature_celsius: climate.temperature_celsius,
        humidity_percent: climate.humidity_percent,
        current_0_ma: adc.read_measurement(BoardChannel::Current0).value(),
        current_1_ma: adc.read_measurement(BoardChannel::Current1).value(),
        voltage_0_mv: adc.read_measurement(BoardChannel::Voltage0).value(),
        voltage_1_mv: adc.read_measurement(BoardChannel::Voltage1).value(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_is_zeroed() {
        let report = BoardReport::default();
        assert!((report.temperature_celsius - 0.0).abs() < f32::EPSILON);
        assert!((report.current_0_ma - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_report_serializes_with_stable_field_names() {
        let report = BoardReport {
            temperature_celsius: 21.5,
            humidity_percent: 40.0,
            current_0_ma: 120.0,
            current_1_ma: 80.0,
            voltage_0_mv: 12_000.0,
            voltage_1_mv: 5_000.0,
        };
        let json = serde_json::to_string(&report).unwrap();
        for field in [
            "temperature_celsius",
            "humidity_percent",
            "current_0_ma",
            "current_1_ma",
            "voltage_0_mv",
            "voltage_1_mv",
        ] {
            assert!(json.contains(field), "missing field {field} in {json}");
        }
    }

    #[test]
    fn test_collect_does_not_panic_without_hardware() {
        // Constructing the sensor fails off the board; collect is only
        // reachable with a live bus.
        let sensor = Aht20::new(0);
        if let Ok(mut sensor) = sensor {
            let adc = AdcClient::new();
            let _ = collect(&mut sensor, &adc);
        }
    }
}

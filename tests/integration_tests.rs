//! Integration tests for Placa.
//!
//! These tests verify the public API works correctly as a cohesive unit.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use placa::adc::{self, AdcClient, BoardChannel, Measurement, CHANNEL_COUNT};
use placa::aht20::{self, Aht20};
use placa::emc2101::{self, Emc2101};
use placa::error::{Error, Subsystem};
use placa::power::PowerRail;
use placa::report::BoardReport;
use placa::thermal::{self, FanCurve};
use placa::{is_board_available, is_linux, VERSION};
use std::path::Path;

// =============================================================================
// Library-level tests
// =============================================================================

#[test]
fn test_version_semver_format() {
    // Version should be in semver format (x.y.z)
    let parts: Vec<&str> = VERSION.split('.').collect();
    assert!(parts.len() >= 2, "Version should have at least major.minor");
    for part in &parts {
        assert!(
            part.parse::<u32>().is_ok(),
            "Version parts should be numeric"
        );
    }
}

#[test]
fn test_is_linux_platform_detection() {
    let result = is_linux();
    #[cfg(target_os = "linux")]
    assert!(result, "Should detect Linux on Linux");
    #[cfg(not(target_os = "linux"))]
    assert!(!result, "Should not detect Linux on other platforms");
}

#[test]
fn test_is_board_available_no_crash() {
    // Should never panic, regardless of hardware
    let _ = is_board_available();
}

// =============================================================================
// ADC client API tests
// =============================================================================

#[test]
fn test_adc_construction_always_succeeds() {
    // No fallible initialization path exists; the handle is usable at once.
    let adc = AdcClient::new();
    let _: u16 = adc.read(0);

    let adc = AdcClient::default();
    let _: u16 = adc.read(0);
}

#[test]
fn test_adc_read_all_wired_channels() {
    let adc = AdcClient::new();
    for channel in 0..CHANNEL_COUNT {
        let _: u16 = adc.read(channel);
    }
}

#[test]
fn test_adc_repeated_reads_same_channel() {
    // Two reads in succession require no re-initialization; the values may
    // legitimately differ since each read is a live query.
    let adc = AdcClient::new();
    let _ = adc.read(1);
    let _ = adc.read(1);
    let _ = adc.read(1);
}

#[test]
fn test_adc_max_channel_id_boundary() {
    // Channel 255 is forwarded verbatim; the wrapper adds no bounds check
    // and must not crash.
    let adc = AdcClient::new();
    let _: u16 = adc.read(255);
}

#[cfg(not(feature = "vendor-adc"))]
#[test]
fn test_adc_independent_handles() {
    let a = AdcClient::new();
    let b = AdcClient::new();

    let a_first = a.read(0);
    let _ = b.read(0);
    let _ = b.read(0);
    let a_second = a.read(0);

    let fresh = AdcClient::new();
    assert_eq!(a_first, fresh.read(0));
    assert_eq!(a_second, fresh.read(0));
}

#[test]
fn test_adc_vendor_backing_consistent() {
    assert_eq!(adc::is_available(), AdcClient::is_vendor_backed());
}

#[test]
fn test_adc_typed_conversion_surface() {
    let adc = AdcClient::new();
    for channel in BoardChannel::ALL {
        let measurement = adc.read_measurement(channel);
        assert!(measurement.value().is_finite());
        assert!(measurement.value() >= 0.0);
    }
}

#[test]
fn test_measurement_display_format() {
    let m = Measurement::Millivolts(12_345.6);
    let shown = m.to_string();
    assert!(shown.contains("mV"));
    assert!(shown.contains("12345.6"));
}

// =============================================================================
// Error API tests
// =============================================================================

#[test]
fn test_error_subsystem_all_variants() {
    let subsystems = [
        Subsystem::Adc,
        Subsystem::Aht20,
        Subsystem::Emc2101,
        Subsystem::PowerRail,
        Subsystem::Thermal,
    ];

    for subsystem in &subsystems {
        let err = Error::not_available(*subsystem);
        assert!(err.is_not_available());
        assert_eq!(err.subsystem(), Some(*subsystem));
    }
}

#[test]
fn test_error_constructors_all_variants() {
    let errors = vec![
        Error::not_available(Subsystem::Adc),
        Error::i2c("test"),
        Error::gpio("test"),
        Error::unexpected_device_id(Subsystem::Emc2101, 0x99),
        Error::sensor_busy(Subsystem::Aht20),
        Error::checksum(0x12, 0x34),
        Error::invalid_input("test"),
        Error::thermal_zone("test"),
    ];

    for err in &errors {
        // All errors should have non-empty display
        let display = err.to_string();
        assert!(!display.is_empty());
        assert!(display.len() > 5, "Error message should be descriptive");
    }
}

#[test]
fn test_error_std_error_trait() {
    fn accepts_std_error<E: std::error::Error>(_: &E) {}

    let err = Error::i2c("bus fault");
    accepts_std_error(&err);
}

// =============================================================================
// Sensor driver tests (graceful without hardware)
// =============================================================================

#[test]
fn test_aht20_graceful_on_missing_hardware() {
    // Succeeds only with a live bus; must fail cleanly everywhere else.
    let sensor = Aht20::new(0);
    drop(sensor);
}

#[test]
fn test_aht20_is_available_no_crash() {
    let _ = aht20::is_available(0);
}

#[test]
fn test_emc2101_graceful_on_missing_hardware() {
    let fan = Emc2101::new(0);
    drop(fan);
}

#[test]
fn test_emc2101_is_available_no_crash() {
    let _ = emc2101::is_available(0);
}

#[test]
fn test_emc2101_full_init_path_without_hardware() {
    // Off the board every step fails with an error, never a panic.
    if let Ok(mut fan) = Emc2101::new(0) {
        let _ = fan.init();
        let _ = fan.apply_default_config(30);
        let _ = fan.fan_speed();
        let _ = fan.temperature();
    }
}

// =============================================================================
// Power rail tests
// =============================================================================

#[test]
fn test_power_rail_addressing() {
    let rail = PowerRail::new(16);
    assert_eq!(rail.pin(), 16);
    assert_eq!(PowerRail::default().pin(), PowerRail::DEFAULT_PIN);
}

// =============================================================================
// Thermal tests
// =============================================================================

#[test]
fn test_thermal_missing_zone_is_error() {
    let result = thermal::cpu_temperature_from(Path::new("/nonexistent/zone"));
    assert!(result.is_err());
    assert!(!result.unwrap_err().to_string().is_empty());
}

#[test]
fn test_fan_curve_default_policy() {
    let curve = FanCurve::default();
    assert_eq!(curve.duty_for(20.0), 0);
    assert_eq!(curve.duty_for(65.0), 30);
    assert_eq!(curve.duty_for(85.0), 100);
}

// =============================================================================
// Report tests
// =============================================================================

#[test]
fn test_report_json_shape() {
    let report = BoardReport {
        temperature_celsius: 42.0,
        humidity_percent: 55.5,
        current_0_ma: 100.0,
        current_1_ma: 50.0,
        voltage_0_mv: 11_800.0,
        voltage_1_mv: 4_950.0,
    };
    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["temperature_celsius"], 42.0);
    assert_eq!(json["humidity_percent"], 55.5);
    assert!(json.get("voltage_1_mv").is_some());
}

// =============================================================================
// Cross-module integration tests
// =============================================================================

#[test]
fn test_all_subsystems_have_availability_check() {
    // Every probeable subsystem should have an is_available() function
    let _ = placa::adc::is_available();
    let _ = placa::aht20::is_available(0);
    let _ = placa::emc2101::is_available(0);
}

#[test]
fn test_board_available_aggregates_all() {
    // If any probeable subsystem is available, the board should be too
    let board = is_board_available();
    let any_available = placa::adc::is_available()
        || placa::aht20::is_available(0)
        || placa::emc2101::is_available(0);

    assert_eq!(board, any_available);
}

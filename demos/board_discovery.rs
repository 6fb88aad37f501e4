//! Board Discovery Demo
//!
//! Discovers and reports all reachable gateway board peripherals.
//!
//! Run with: cargo run --example `board_discovery`

use placa::adc::{AdcClient, BoardChannel};
use placa::{aht20, emc2101, thermal};

fn main() {
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║           PLACA - Gateway Board Discovery                  ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();

    // Check platform
    println!("Platform: {}", if placa::is_linux() { "Linux" } else { "Other" });
    println!("Placa Version: {}", placa::VERSION);
    println!();

    // TLA2024 ADC
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ TLA2024 ADC (vendor driver)                                 │");
    println!("├─────────────────────────────────────────────────────────────┤");
    if AdcClient::is_vendor_backed() {
        println!("│ Status: ✓ VENDOR DRIVER                                     │");
    } else {
        println!("│ Status: ~ SIMULATED (build without vendor-adc feature)      │");
    }
    let adc = AdcClient::new();
    for channel in BoardChannel::ALL {
        let raw = adc.read(channel.index());
        let converted = adc.read_measurement(channel);
        println!(
            "│ {:<11} raw {:>5}  ->  {:>12}                      │",
            channel.to_string(),
            raw,
            converted.to_string()
        );
    }
    println!("└─────────────────────────────────────────────────────────────┘");
    println!();

    // AHT20 climate sensor
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ AHT20 Climate Sensor (I2C 0x38)                             │");
    println!("├─────────────────────────────────────────────────────────────┤");
    if aht20::is_available(0) {
        println!("│ Status: ✓ AVAILABLE                                         │");
        if let Ok(mut sensor) = aht20::Aht20::new(0) {
            if sensor.init().is_ok() {
                if let Ok(reading) = sensor.measure() {
                    println!(
                        "│ Temperature: {:>6.1} degC                                   │",
                        reading.temperature_celsius
                    );
                    println!(
                        "│ Humidity:    {:>6.1} %RH                                    │",
                        reading.humidity_percent
                    );
                }
            }
        }
    } else {
        println!("│ Status: ✗ Not available (no sensor on bus 0)                │");
    }
    println!("└─────────────────────────────────────────────────────────────┘");
    println!();

    // EMC2101 fan controller
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ EMC2101 Fan Controller (I2C 0x4C)                           │");
    println!("├─────────────────────────────────────────────────────────────┤");
    if emc2101::is_available(0) {
        println!("│ Status: ✓ AVAILABLE                                         │");
        if let Ok(mut fan) = emc2101::Emc2101::new(0) {
            if let Ok(rpm) = fan.fan_speed() {
                println!("│ Fan Speed: {rpm:>5} RPM                                      │");
            }
            if let Ok(temp) = fan.temperature() {
                println!("│ Internal Temp: {temp:>3} degC                                  │");
            }
        }
    } else {
        println!("│ Status: ✗ Not available (no controller on bus 0)            │");
    }
    println!("└─────────────────────────────────────────────────────────────┘");
    println!();

    // SoC thermal zone
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ SoC Thermal Zone (sysfs)                                    │");
    println!("├─────────────────────────────────────────────────────────────┤");
    match thermal::cpu_temperature() {
        Ok(temp) => {
            println!("│ Status: ✓ AVAILABLE                                         │");
            println!("│ SoC Temperature: {temp:>5.1} degC                               │");
        }
        Err(_) => {
            println!("│ Status: ✗ Not available (no thermal zone)                   │");
        }
    }
    println!("└─────────────────────────────────────────────────────────────┘");
    println!();

    // Summary
    println!("╔════════════════════════════════════════════════════════════╗");
    println!(
        "║ Summary: board peripherals {}                       ║",
        if placa::is_board_available() {
            "reachable    "
        } else {
            "not reachable"
        }
    );
    println!("╚════════════════════════════════════════════════════════════╝");
}

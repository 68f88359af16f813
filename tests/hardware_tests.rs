//! Hardware-dependent tests that require a real Logitech G600
//!
//! These tests are ignored by default and can be run with:
//! `cargo test -- --ignored`
//!
//! They require:
//! - A connected Logitech G600
//! - Root/sudo permissions (or a udev rule) for hidraw access

use g600linux::device::{self, HidControlInterface};
use g600linux::mapping::{ConfigFormat, MouseMapping};
use g600linux::settings::AppSettings;

/// Test device detection with real hardware
#[test]
#[ignore]
fn test_real_device_detection() {
    use std::process::Command;

    let output = Command::new("lsusb")
        .output()
        .expect("Failed to run lsusb");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("046d:c24a"),
        "No G600 found. Connect a G600 to run this test."
    );
}

/// Read all three modes and check they survive both textual forms
#[test]
#[ignore]
fn test_real_read_round_trip() {
    let settings = AppSettings::default();
    let mut iface = HidControlInterface::find(&settings).expect("G600 not found");
    let mapping = device::read_mapping(&mut iface, &settings).expect("read failed");

    for format in [ConfigFormat::HumanReadable, ConfigFormat::Bytes] {
        let json = mapping.to_json(format).unwrap();
        let built = MouseMapping::from_json(&json).unwrap();
        if format == ConfigFormat::Bytes {
            assert_eq!(built.mapping, mapping);
        }
    }
}

/// Write back what was read, without sending anything
#[test]
#[ignore]
fn test_real_dry_run_write() {
    let settings = AppSettings::default();
    let mut iface = HidControlInterface::find(&settings).expect("G600 not found");
    let mapping = device::read_mapping(&mut iface, &settings).expect("read failed");
    device::write_mapping(&mut iface, &mapping, &settings, true).expect("dry run failed");
}

//! Logitech G600 config report framing
//!
//! Each of the three modes is stored in its own HID feature report on the
//! control interface (interface 1).
//!
//! Report Structure (154 bytes):
//! - Byte 0: Report ID (0xF3 = mode 1, 0xF4 = mode 2, 0xF5 = mode 3)
//! - Bytes 1-153: Mode payload, see [`crate::mapping::MODE_RECORD`]
//!
//! On the wire these are plain HID class requests:
//! - GET_REPORT: bmRequestType 0xA1, bRequest 0x01, wValue 0x03F3..0x03F5
//! - SET_REPORT: bmRequestType 0x21, bRequest 0x09, same wValue

/// Number of modes stored on the mouse
pub const MODE_COUNT: usize = 3;

/// Full report length including the report id
pub const MODE_REPORT_LEN: usize = 154;

/// Payload bytes after the report id
pub const MODE_PAYLOAD_LEN: usize = MODE_REPORT_LEN - 1;

/// Report ids, one per mode, in mode order
pub const REPORT_IDS: [u8; MODE_COUNT] = [0xF3, 0xF4, 0xF5];

/// HID report type for feature reports (high byte of wValue)
pub const FEATURE_REPORT_TYPE: u8 = 0x03;

/// wValue of the control transfer addressing `report_id`
pub fn report_w_value(report_id: u8) -> u16 {
    u16::from_be_bytes([FEATURE_REPORT_TYPE, report_id])
}

/// Prefix a mode payload with its report id
pub fn frame_report(report_id: u8, payload: &[u8]) -> Vec<u8> {
    let mut report = Vec::with_capacity(payload.len() + 1);
    report.push(report_id);
    report.extend_from_slice(payload);
    report
}

/// Split a report into its id and payload
pub fn split_report(report: &[u8]) -> Option<(u8, &[u8])> {
    report.split_first().map(|(id, payload)| (*id, payload))
}

/// Space-separated hex dump used in transfer tracing
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

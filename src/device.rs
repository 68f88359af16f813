//! Device detection and communication module

use crate::error::TransportError;
use crate::mapping::MouseMapping;
use crate::protocol::{MODE_COUNT, MODE_REPORT_LEN, REPORT_IDS, hex_dump};
use crate::settings::AppSettings;
use anyhow::{Context, Result};
use hidapi::{HidApi, HidDevice};
use std::ffi::CString;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Logitech USB Vendor ID
pub const LOGITECH_VENDOR_ID: u16 = 0x046d;

/// G600 Product ID
pub const G600_PRODUCT_ID: u16 = 0xc24a;

/// Interface that carries the config feature reports
pub const G600_CONTROL_INTERFACE: i32 = 1;

/// Information about a detected G600 interface
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub path: CString,
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer: String,
    pub product: String,
    pub interface_number: i32,
}

/// Find the G600 control interface
pub fn find_g600(api: &HidApi, settings: &AppSettings) -> Option<DeviceInfo> {
    for device in api.device_list() {
        if device.vendor_id() == settings.vendor_id && device.product_id() == settings.product_id {
            debug!(
                "Found G600 interface {}: {:?}",
                device.interface_number(),
                device.path().to_string_lossy()
            );
        }
    }

    api.device_list()
        .find(|device| {
            device.vendor_id() == settings.vendor_id
                && device.product_id() == settings.product_id
                && device.interface_number() == settings.interface_number
        })
        .map(|device| DeviceInfo {
            path: device.path().to_owned(),
            vendor_id: device.vendor_id(),
            product_id: device.product_id(),
            manufacturer: device.manufacturer_string().unwrap_or_default().to_string(),
            product: device.product_string().unwrap_or_default().to_string(),
            interface_number: device.interface_number(),
        })
}

/// Exclusive access to the interface that carries config reports.
///
/// `claim` must succeed before any report transfer and `release` undoes it.
/// Report buffers start with the report id, as with hidapi.
pub trait ControlInterface {
    fn claim(&mut self) -> Result<(), TransportError>;
    fn release(&mut self) -> Result<(), TransportError>;
    /// GET_REPORT; returns the number of bytes read, including the id
    fn get_feature_report(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;
    /// SET_REPORT; returns the number of bytes written, including the id
    fn send_feature_report(&mut self, data: &[u8]) -> Result<usize, TransportError>;
}

/// hidraw-backed control interface of a real mouse
pub struct HidControlInterface {
    api: HidApi,
    info: DeviceInfo,
    handle: Option<HidDevice>,
}

impl HidControlInterface {
    /// Locate the mouse; the interface is not claimed yet
    pub fn find(settings: &AppSettings) -> Result<Self, TransportError> {
        let api = HidApi::new()?;
        let info = find_g600(&api, settings).ok_or(TransportError::NotFound)?;
        info!(
            "Found {} {} at {:?}",
            info.manufacturer,
            info.product,
            info.path.to_string_lossy()
        );
        Ok(Self {
            api,
            info,
            handle: None,
        })
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn handle(&self) -> Result<&HidDevice, TransportError> {
        self.handle.as_ref().ok_or(TransportError::NotClaimed)
    }
}

impl ControlInterface for HidControlInterface {
    fn claim(&mut self) -> Result<(), TransportError> {
        if self.handle.is_none() {
            self.handle = Some(self.api.open_path(&self.info.path)?);
            debug!("Claimed interface {}", self.info.interface_number);
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), TransportError> {
        if self.handle.take().is_some() {
            debug!("Released interface {}", self.info.interface_number);
        }
        Ok(())
    }

    fn get_feature_report(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        Ok(self.handle()?.get_feature_report(buf)?)
    }

    fn send_feature_report(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        // hidapi reports failure rather than a partial count
        self.handle()?.send_feature_report(data)?;
        Ok(data.len())
    }
}

/// A claimed control interface; released again when dropped
pub struct Session<'a, C: ControlInterface> {
    iface: &'a mut C,
    settle_delay: Duration,
    claimed: bool,
}

impl<'a, C: ControlInterface> Session<'a, C> {
    pub fn open(iface: &'a mut C, settle_delay: Duration) -> Result<Self, TransportError> {
        iface.claim()?;
        Ok(Self {
            iface,
            settle_delay,
            claimed: true,
        })
    }

    /// Read all three mode reports, in mode order
    pub fn read_mode_buffers(&mut self) -> Result<[Vec<u8>; MODE_COUNT], TransportError> {
        debug!("About to read USB...");
        let mut modes: [Vec<u8>; MODE_COUNT] = Default::default();
        for (mode, report_id) in modes.iter_mut().zip(REPORT_IDS) {
            let mut buf = vec![0u8; MODE_REPORT_LEN];
            buf[0] = report_id;
            let len = self.iface.get_feature_report(&mut buf)?;
            debug!("for report id {:#04x}, read these bytes: {}", report_id, hex_dump(&buf[..len.min(buf.len())]));
            if len != MODE_REPORT_LEN {
                return Err(TransportError::ShortRead {
                    report_id,
                    expected: MODE_REPORT_LEN,
                    actual: len,
                });
            }
            *mode = buf;
        }
        debug!("...Done reading USB");
        Ok(modes)
    }

    /// Write all three mode reports, in mode order, pausing after each
    pub fn write_mode_buffers(
        &mut self,
        reports: &[Vec<u8>; MODE_COUNT],
        dry_run: bool,
    ) -> Result<(), TransportError> {
        debug!("About to write USB...");
        for (report, report_id) in reports.iter().zip(REPORT_IDS) {
            debug!("for report id {:#04x}, sending these bytes: {}", report_id, hex_dump(report));
            if dry_run {
                info!("dry run set, not sending config write for report {:#04x}", report_id);
                continue;
            }
            let written = self.iface.send_feature_report(report)?;
            if written != report.len() {
                return Err(TransportError::ShortWrite {
                    report_id,
                    expected: report.len(),
                    actual: written,
                });
            }
            std::thread::sleep(self.settle_delay);
        }
        debug!("...Done writing USB");
        Ok(())
    }

    /// Release explicitly, surfacing any error
    pub fn close(mut self) -> Result<(), TransportError> {
        self.claimed = false;
        self.iface.release()
    }
}

impl<C: ControlInterface> Drop for Session<'_, C> {
    fn drop(&mut self) {
        if self.claimed {
            if let Err(e) = self.iface.release() {
                warn!("Failed to release control interface: {}", e);
            }
        }
    }
}

/// Read the full mapping off the mouse
pub fn read_mapping<C: ControlInterface>(iface: &mut C, settings: &AppSettings) -> Result<MouseMapping> {
    let mut session = Session::open(iface, settings.settle_delay()).context("Failed to claim the G600 control interface")?;
    let buffers = session.read_mode_buffers().context("Failed to read mode reports")?;
    session.close().context("Failed to release the G600 control interface")?;
    MouseMapping::from_mode_buffers(&buffers).context("Mouse returned a malformed config")
}

/// Write the full mapping to the mouse
pub fn write_mapping<C: ControlInterface>(
    iface: &mut C,
    mapping: &MouseMapping,
    settings: &AppSettings,
    dry_run: bool,
) -> Result<()> {
    let reports = mapping.to_mode_buffers();
    let mut session = Session::open(iface, settings.settle_delay()).context("Failed to claim the G600 control interface")?;
    session.write_mode_buffers(&reports, dry_run).context("Failed to write mode reports")?;
    session.close().context("Failed to release the G600 control interface")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{MODE_PAYLOAD_LEN, frame_report};

    /// Records every call; behaviour per report id is scripted
    #[derive(Default)]
    struct MockInterface {
        log: Vec<String>,
        claimed: bool,
        short_read: Option<u8>,
        short_write: Option<u8>,
        written: Vec<Vec<u8>>,
    }

    impl ControlInterface for MockInterface {
        fn claim(&mut self) -> Result<(), TransportError> {
            self.log.push("claim".into());
            self.claimed = true;
            Ok(())
        }

        fn release(&mut self) -> Result<(), TransportError> {
            self.log.push("release".into());
            self.claimed = false;
            Ok(())
        }

        fn get_feature_report(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
            assert!(self.claimed, "read while not claimed");
            let id = buf[0];
            self.log.push(format!("get {:#04x}", id));
            for (i, b) in buf.iter_mut().enumerate().skip(1) {
                *b = id.wrapping_add(i as u8);
            }
            Ok(if self.short_read == Some(id) { 10 } else { buf.len() })
        }

        fn send_feature_report(&mut self, data: &[u8]) -> Result<usize, TransportError> {
            assert!(self.claimed, "write while not claimed");
            self.log.push(format!("set {:#04x}", data[0]));
            self.written.push(data.to_vec());
            Ok(if self.short_write == Some(data[0]) { data.len() - 1 } else { data.len() })
        }
    }

    fn fast() -> AppSettings {
        AppSettings {
            settle_delay_ms: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_read_is_sequential_and_bracketed() {
        let mut iface = MockInterface::default();
        let mapping = read_mapping(&mut iface, &fast()).unwrap();
        assert_eq!(iface.log, ["claim", "get 0xf3", "get 0xf4", "get 0xf5", "release"]);
        assert_eq!(mapping.payloads()[1][0], 0xF4u8.wrapping_add(1));
    }

    #[test]
    fn test_short_read_releases_interface() {
        let mut iface = MockInterface {
            short_read: Some(0xF4),
            ..Default::default()
        };
        let err = read_mapping(&mut iface, &fast()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TransportError>(),
            Some(TransportError::ShortRead { report_id: 0xF4, actual: 10, .. })
        ));
        assert_eq!(iface.log, ["claim", "get 0xf3", "get 0xf4", "release"]);
        assert!(!iface.claimed);
    }

    #[test]
    fn test_write_sends_all_modes_in_order() {
        let payloads = [[1u8; MODE_PAYLOAD_LEN], [2u8; MODE_PAYLOAD_LEN], [3u8; MODE_PAYLOAD_LEN]];
        let mapping = MouseMapping::from_payloads(payloads);
        let mut iface = MockInterface::default();
        write_mapping(&mut iface, &mapping, &fast(), false).unwrap();
        assert_eq!(iface.log, ["claim", "set 0xf3", "set 0xf4", "set 0xf5", "release"]);
        assert_eq!(iface.written[2], frame_report(0xF5, &payloads[2]));
    }

    #[test]
    fn test_short_write_is_fatal() {
        let mapping = MouseMapping::from_payloads([[0u8; MODE_PAYLOAD_LEN]; MODE_COUNT]);
        let mut iface = MockInterface {
            short_write: Some(0xF3),
            ..Default::default()
        };
        let err = write_mapping(&mut iface, &mapping, &fast(), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TransportError>(),
            Some(TransportError::ShortWrite { report_id: 0xF3, .. })
        ));
        assert_eq!(iface.log, ["claim", "set 0xf3", "release"]);
    }

    #[test]
    fn test_dry_run_sends_nothing() {
        let mapping = MouseMapping::from_payloads([[0u8; MODE_PAYLOAD_LEN]; MODE_COUNT]);
        let mut iface = MockInterface::default();
        write_mapping(&mut iface, &mapping, &fast(), true).unwrap();
        assert_eq!(iface.log, ["claim", "release"]);
        assert!(iface.written.is_empty());
    }

    #[test]
    fn test_session_drop_releases() {
        let mut iface = MockInterface::default();
        {
            let _session = Session::open(&mut iface, Duration::ZERO).unwrap();
        }
        assert_eq!(iface.log, ["claim", "release"]);
    }
}

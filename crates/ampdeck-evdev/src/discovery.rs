#![forbid(unsafe_code)]

//! Device enumeration through sysfs.
//!
//! Every `eventN` entry under `/sys/class/input` describes one device node
//! `/dev/input/eventN`. The driver name is read from `device/name` and the
//! supported event classes from the `device/capabilities/ev` hex bitmask.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ampdeck_backend::{DeviceCaps, DeviceEnumerator, DeviceInfo};
use ampdeck_core::event::codes;
use tracing::debug;

use crate::device::EvdevDevice;
use crate::error::{EvdevError, Result};

/// Default sysfs input class directory.
pub const SYS_INPUT: &str = "/sys/class/input";
/// Default device node directory.
pub const DEV_INPUT: &str = "/dev/input";

/// Lists evdev nodes from a sysfs tree.
#[derive(Debug, Clone)]
pub struct SysfsEnumerator {
    sys_root: PathBuf,
    dev_root: PathBuf,
}

impl Default for SysfsEnumerator {
    fn default() -> Self {
        Self::new(SYS_INPUT, DEV_INPUT)
    }
}

impl SysfsEnumerator {
    pub fn new(sys_root: impl Into<PathBuf>, dev_root: impl Into<PathBuf>) -> Self {
        Self {
            sys_root: sys_root.into(),
            dev_root: dev_root.into(),
        }
    }

    fn describe(&self, entry: &str, index: u32) -> Option<DeviceInfo> {
        let device = self.sys_root.join(entry).join("device");
        let name = match fs::read_to_string(device.join("name")) {
            Ok(name) => name.trim().to_owned(),
            Err(err) => {
                debug!(entry, %err, "skipping input entry without a name");
                return None;
            }
        };
        let caps = fs::read_to_string(device.join("capabilities").join("ev"))
            .map(|s| parse_ev_caps(&s))
            .unwrap_or_default();
        Some(DeviceInfo {
            path: self.dev_root.join(format!("event{index}")),
            name,
            caps,
        })
    }
}

impl DeviceEnumerator for SysfsEnumerator {
    type Device = EvdevDevice;
    type Error = EvdevError;

    fn list_devices(&self) -> Result<Vec<DeviceInfo>> {
        let entries = match fs::read_dir(&self.sys_root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(EvdevError::NotFound(self.sys_root.clone()));
            }
            Err(err) => return Err(err.into()),
        };

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(index) = event_index(name) else {
                continue;
            };
            if let Some(info) = self.describe(name, index) {
                found.push((index, info));
            }
        }
        found.sort_by_key(|(index, _)| *index);
        Ok(found.into_iter().map(|(_, info)| info).collect())
    }

    fn open(&self, info: &DeviceInfo) -> Result<EvdevDevice> {
        EvdevDevice::open(&info.path, info.name.clone())
    }
}

/// `eventN` → `N`.
fn event_index(name: &str) -> Option<u32> {
    name.strip_prefix("event")?.parse().ok()
}

/// Parse the `capabilities/ev` bitmask.
///
/// The kernel prints the mask as space-separated hex words, most
/// significant first; the event classes of interest live in the last word.
pub fn parse_ev_caps(s: &str) -> DeviceCaps {
    let Some(word) = s.split_whitespace().last() else {
        return DeviceCaps::empty();
    };
    let Ok(mask) = u64::from_str_radix(word, 16) else {
        return DeviceCaps::empty();
    };
    let mut caps = DeviceCaps::empty();
    if mask & (1 << codes::EV_KEY) != 0 {
        caps |= DeviceCaps::KEY;
    }
    if mask & (1 << codes::EV_ABS) != 0 {
        caps |= DeviceCaps::ABS;
    }
    caps
}

/// Whether `path` looks like an evdev node name.
pub fn is_event_node(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(event_index)
        .is_some()
}

#![forbid(unsafe_code)]
#![doc = "Linux evdev backend for ampdeck."]
#![doc = ""]
#![doc = "Implements the `ampdeck-backend` input traits over `/dev/input/eventN` nodes:"]
#![doc = "[`SysfsEnumerator`] lists devices from sysfs and [`EvdevDevice`] performs"]
#![doc = "blocking batch reads of kernel `input_event` records."]

pub mod codec;
mod device;
pub mod discovery;
mod error;

pub use device::EvdevDevice;
pub use discovery::{SysfsEnumerator, is_event_node, parse_ev_caps};
pub use error::{EvdevError, Result};

//! # Device Module
//!
//! Virtual input device registration and frame dispatch via Linux uinput.

pub mod dispatcher;
pub mod layout;
pub mod virtual_pad;

pub use dispatcher::Dispatcher;
pub use layout::{AxisSpec, DeviceLayout};
pub use virtual_pad::{EventWriter, VirtualPad};

//! Simulated TMS9918-class video chip and CPU interrupt line.
//!
//! [`Machine`] implements the driver's [`VdpPorts`](msx_vdp::VdpPorts) and
//! [`Interrupts`](msx_vdp::Interrupts), so a [`Vdp`](msx_vdp::Vdp) can run
//! against it unchanged. It watches for the two ways an interrupt handler
//! corrupts a transfer and records them as [`Violation`]s.

#![no_std]

pub mod machine;
pub mod tms9918;

pub use machine::{IsrAction, Machine, Violation};
pub use tms9918::{Status, Tms9918};

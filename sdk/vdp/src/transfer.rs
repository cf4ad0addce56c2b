//! # Bulk transfers
//!
//! One latch, then a tight burst of data port accesses. The device advances
//! its cursor after every byte, so the loop body is nothing but the port
//! access.
//!
//! ```ignore
//! vdp.fill(layout::NAMES, 768, 0);
//! vdp.copy_to_memory(&level_tiles, layout::PATTERNS);
//! vdp.fast_copy16(&two_tiles, layout::PATTERNS + 8 * 0x41);
//! ```
//!
//! On the default [`Vdp`] methods interrupts are masked only around the
//! latch. A frame interrupt may run during the burst; that is fine as long
//! as the handler leaves the device cursor alone. If it does not, use the
//! `_di` variants on [`Masked`].
//!
//! Lengths are not checked against the 16 KiB address space. A burst that
//! runs off the end wraps to address 0 the same way the device cursor does.

use crate::{
    bus::{VdpBus, VdpPorts},
    driver::{Masked, Vdp},
    protocol::{Direction, VramAddress},
};

impl<B: VdpBus> Vdp<B> {
    /// Write `value` to `length` consecutive bytes from `address`.
    /// `length == 0` writes nothing.
    pub fn fill(&mut self, address: VramAddress, length: u16, value: u8) {
        self.resync();
        self.latch(address, Direction::Write);
        for _ in 0..length {
            self.bus.write_data(value);
        }
    }

    /// Copy `buffer` to video memory starting at `address`.
    pub fn copy_to_memory(&mut self, buffer: &[u8], address: VramAddress) {
        self.resync();
        self.latch(address, Direction::Write);
        for &byte in buffer {
            self.bus.write_data(byte);
        }
    }

    /// Fill `buffer` from video memory starting at `address`.
    pub fn copy_from_memory(&mut self, address: VramAddress, buffer: &mut [u8]) {
        self.resync();
        self.latch(address, Direction::Read);
        for byte in buffer.iter_mut() {
            *byte = self.bus.read_data();
        }
    }

    /// Copy a fixed-size block. The length is part of the type, so the loop
    /// has no counter left at run time.
    #[inline(always)]
    pub fn fast_copy_fixed<const N: usize>(&mut self, buffer: &[u8; N], address: VramAddress) {
        self.resync();
        self.latch(address, Direction::Write);
        write_block(&mut self.bus, buffer);
    }

    /// Sixteen bytes, i.e. two consecutive 8x8 patterns.
    #[inline(always)]
    pub fn fast_copy16(&mut self, buffer: &[u8; 16], address: VramAddress) {
        self.fast_copy_fixed(buffer, address);
    }
}

impl<B: VdpBus> Masked<'_, B> {
    pub fn fill_di(&mut self, address: VramAddress, length: u16, value: u8) {
        self.vdp.resync();
        self.latch(address, Direction::Write);
        for _ in 0..length {
            self.vdp.bus.write_data(value);
        }
    }

    pub fn copy_to_memory_di(&mut self, buffer: &[u8], address: VramAddress) {
        self.vdp.resync();
        self.latch(address, Direction::Write);
        for &byte in buffer {
            self.vdp.bus.write_data(byte);
        }
    }

    pub fn copy_from_memory_di(&mut self, address: VramAddress, buffer: &mut [u8]) {
        self.vdp.resync();
        self.latch(address, Direction::Read);
        for byte in buffer.iter_mut() {
            *byte = self.vdp.bus.read_data();
        }
    }

    #[inline(always)]
    pub fn fast_copy_fixed_di<const N: usize>(&mut self, buffer: &[u8; N], address: VramAddress) {
        self.vdp.resync();
        self.latch(address, Direction::Write);
        write_block(&mut self.vdp.bus, buffer);
    }
}

/// Data phase of a fixed-size write. Fully unrolled for small `N`.
#[inline(always)]
pub(crate) fn write_block<P: VdpPorts + ?Sized, const N: usize>(ports: &mut P, block: &[u8; N]) {
    for &byte in block {
        ports.write_data(byte);
    }
}

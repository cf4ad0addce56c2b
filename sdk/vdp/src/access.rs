//! Single-byte video memory access.
//!
//! Each call latches its own address, so these are the slowest way to move
//! more than a couple of bytes. See [`transfer`](crate::transfer) for bursts.

use crate::{
    bus::VdpBus,
    driver::{Masked, Vdp},
    protocol::{Direction, VramAddress},
};

impl<B: VdpBus> Vdp<B> {
    #[inline(always)]
    pub fn poke(&mut self, address: VramAddress, value: u8) {
        self.latch(address, Direction::Write);
        self.bus.write_data(value);
    }

    #[inline(always)]
    pub fn peek(&mut self, address: VramAddress) -> u8 {
        self.latch(address, Direction::Read);
        self.bus.read_data()
    }
}

impl<B: VdpBus> Masked<'_, B> {
    #[inline(always)]
    pub fn poke_di(&mut self, address: VramAddress, value: u8) {
        self.latch(address, Direction::Write);
        self.vdp.bus.write_data(value);
    }

    #[inline(always)]
    pub fn peek_di(&mut self, address: VramAddress) -> u8 {
        self.latch(address, Direction::Read);
        self.vdp.bus.read_data()
    }
}

//! # Port protocol
//!
//! Every access to video memory starts with a *latch*: two bytes written to
//! the control port.
//!
//! ```text
//!            7   6   5 ............ 0
//! first   :  A7 ........................ A0      (low address byte)
//! second  :  0 | W | A13 ............ A8         (W = 1 for writes)
//! ```
//!
//! After the latch, each data port access moves one byte and advances the
//! device cursor by one. The cursor is only valid until the next latch, from
//! us or from anyone else, so nothing here assumes where it points between
//! calls.
//!
//! Register writes use the same two-byte shape with bit 7 of the second byte
//! set: `value`, then `0x80 | register`.
//!
//! The device cannot tell whose byte it is receiving. If an interrupt handler
//! talks to the device between the two latch bytes, the device pairs the
//! handler's byte with ours and the cursor ends up somewhere random. So the
//! pair is always written with interrupts masked.

use core::ops::Add;

use bit_field::BitField;

use crate::bus::{Interrupts, IrqGuard, VdpPorts};

/// Size of the video memory address space.
pub const VRAM_SIZE: usize = 0x4000;

const ADDRESS_MASK: u16 = 0x3FFF;
const WRITE_FLAG: u8 = 0b01;
const REGISTER_FLAG: u8 = 0x80;

/// A 14-bit video memory address.
///
/// Construction masks off the top two bits, so the value can always be
/// split into latch bytes without touching the direction flag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VramAddress(u16);

impl VramAddress {
    #[inline(always)]
    pub const fn new(address: u16) -> Self {
        Self(address & ADDRESS_MASK)
    }

    #[inline(always)]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// `self + offset`, wrapping inside the 14-bit space like the device
    /// cursor does.
    #[inline(always)]
    pub const fn offset(self, offset: u16) -> Self {
        Self::new(self.0.wrapping_add(offset))
    }

    /// The two control port bytes that latch this address.
    #[inline(always)]
    pub fn latch_bytes(self, direction: Direction) -> [u8; 2] {
        let mut high = (self.0 >> 8) as u8;
        high.set_bits(6..8, direction.flag());
        [self.0 as u8, high]
    }
}

impl Add<u16> for VramAddress {
    type Output = VramAddress;

    #[inline(always)]
    fn add(self, rhs: u16) -> VramAddress {
        self.offset(rhs)
    }
}

impl From<u16> for VramAddress {
    fn from(address: u16) -> Self {
        Self::new(address)
    }
}

/// Direction of the burst that follows a latch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

impl Direction {
    #[inline(always)]
    const fn flag(self) -> u8 {
        match self {
            Direction::Read => 0,
            Direction::Write => WRITE_FLAG,
        }
    }
}

/// Latch `address` with interrupts masked around the two control bytes
/// only. Interrupts are enabled again when this returns, so a handler may
/// run during the data phase.
#[inline(always)]
pub fn latch<B: VdpPorts + Interrupts + ?Sized>(bus: &mut B, address: VramAddress, direction: Direction) {
    let mut bus = IrqGuard::new(bus);
    latch_unmasked(&mut *bus, address, direction);
}

/// Latch `address` without touching the interrupt state. The caller must
/// already have interrupts masked.
#[inline(always)]
pub fn latch_unmasked<P: VdpPorts + ?Sized>(ports: &mut P, address: VramAddress, direction: Direction) {
    let [low, high] = address.latch_bytes(direction);
    ports.write_control(low);
    ports.write_control(high);
}

/// Write `value` to register `register` (0..=7) with the pair masked.
#[inline(always)]
pub fn write_register<B: VdpPorts + Interrupts + ?Sized>(bus: &mut B, register: u8, value: u8) {
    let mut bus = IrqGuard::new(bus);
    write_register_unmasked(&mut *bus, register, value);
}

#[inline(always)]
pub fn write_register_unmasked<P: VdpPorts + ?Sized>(ports: &mut P, register: u8, value: u8) {
    ports.write_control(value);
    ports.write_control(REGISTER_FLAG | (register & 0x07));
}

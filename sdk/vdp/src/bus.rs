//! # Bus
//!
//! Everything the driver does to the hardware goes through four port
//! operations ([`VdpPorts`]) and two interrupt operations ([`Interrupts`]).
//! A type that provides both is a [`VdpBus`].
//!
//! ```ignore
//! // ports and interrupts from different places
//! let bus = Board::new(unsafe { MmioPorts::ti99() }, my_irq_controller);
//! let mut vdp = Vdp::new(bus);
//! ```
//!
//! ## Interrupt guards
//!
//! [`IrqGuard`] is the only way the driver masks interrupts. Creating one
//! disables them, dropping it enables them again, so every exit path
//! re-enables.

use core::ops::{Deref, DerefMut};

/// The two-port device interface.
///
/// Control port writes set up addresses and registers, data port accesses
/// move bytes at the device's auto-incrementing cursor.
pub trait VdpPorts {
    fn write_control(&mut self, value: u8);
    fn write_data(&mut self, value: u8);
    fn read_data(&mut self) -> u8;
    /// Read the status register. This also resets the device's
    /// control-port byte latch.
    fn read_status(&mut self) -> u8;
}

/// CPU interrupt masking.
pub trait Interrupts {
    fn disable(&mut self);
    fn enable(&mut self);
}

/// Ports plus interrupt control.
pub trait VdpBus: VdpPorts + Interrupts {}

impl<T: VdpPorts + Interrupts> VdpBus for T {}

impl<T: VdpPorts + ?Sized> VdpPorts for &mut T {
    #[inline(always)]
    fn write_control(&mut self, value: u8) {
        (**self).write_control(value)
    }

    #[inline(always)]
    fn write_data(&mut self, value: u8) {
        (**self).write_data(value)
    }

    #[inline(always)]
    fn read_data(&mut self) -> u8 {
        (**self).read_data()
    }

    #[inline(always)]
    fn read_status(&mut self) -> u8 {
        (**self).read_status()
    }
}

impl<T: Interrupts + ?Sized> Interrupts for &mut T {
    #[inline(always)]
    fn disable(&mut self) {
        (**self).disable()
    }

    #[inline(always)]
    fn enable(&mut self) {
        (**self).enable()
    }
}

/// Interrupt controller for systems where no handler ever touches the
/// device. Both operations do nothing.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoInterrupts;

impl Interrupts for NoInterrupts {
    #[inline(always)]
    fn disable(&mut self) {}

    #[inline(always)]
    fn enable(&mut self) {}
}

/// Joins a port implementation and an interrupt controller into one bus.
#[derive(Debug)]
pub struct Board<P, I> {
    pub ports: P,
    pub irq: I,
}

impl<P: VdpPorts, I: Interrupts> Board<P, I> {
    pub const fn new(ports: P, irq: I) -> Self {
        Self { ports, irq }
    }
}

impl<P: VdpPorts, I> VdpPorts for Board<P, I> {
    #[inline(always)]
    fn write_control(&mut self, value: u8) {
        self.ports.write_control(value)
    }

    #[inline(always)]
    fn write_data(&mut self, value: u8) {
        self.ports.write_data(value)
    }

    #[inline(always)]
    fn read_data(&mut self) -> u8 {
        self.ports.read_data()
    }

    #[inline(always)]
    fn read_status(&mut self) -> u8 {
        self.ports.read_status()
    }
}

impl<P, I: Interrupts> Interrupts for Board<P, I> {
    #[inline(always)]
    fn disable(&mut self) {
        self.irq.disable()
    }

    #[inline(always)]
    fn enable(&mut self) {
        self.irq.enable()
    }
}

/// Interrupts are masked for as long as this guard lives.
///
/// The guard borrows the bus and dereferences to it, so port accesses made
/// inside the masked window go through the guard:
///
/// ```ignore
/// let mut bus = IrqGuard::new(&mut bus);
/// bus.write_control(low);
/// bus.write_control(high);
/// // interrupts come back here
/// ```
pub struct IrqGuard<'a, B: Interrupts + ?Sized> {
    bus: &'a mut B,
}

impl<'a, B: Interrupts + ?Sized> IrqGuard<'a, B> {
    #[inline(always)]
    pub fn new(bus: &'a mut B) -> Self {
        bus.disable();
        Self { bus }
    }
}

impl<'a, B: Interrupts + ?Sized> Drop for IrqGuard<'a, B> {
    #[inline(always)]
    fn drop(&mut self) {
        self.bus.enable();
    }
}

impl<'a, B: Interrupts + ?Sized> Deref for IrqGuard<'a, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.bus
    }
}

impl<'a, B: Interrupts + ?Sized> DerefMut for IrqGuard<'a, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.bus
    }
}

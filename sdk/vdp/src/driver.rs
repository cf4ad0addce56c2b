use crate::{
    bus::VdpBus,
    config::VdpConfig,
    display::{Registers, ScreenMode, SpriteConfig},
    protocol::{self, Direction, VramAddress},
};

/// The driver. Owns the bus and the shadow state of the device.
///
/// Operations are spread over the modules that describe them:
/// byte access in [`access`](crate::access), bulk transfers in
/// [`transfer`](crate::transfer), display control in
/// [`display`](crate::display) and table-level operations in
/// [`tiles`](crate::tiles).
pub struct Vdp<B> {
    pub(crate) bus: B,
    pub(crate) regs: Registers,
    pub(crate) mode: Option<ScreenMode>,
    pub(crate) config: VdpConfig,
}

impl<B: VdpBus> Vdp<B> {
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, VdpConfig::default())
    }

    pub fn with_config(bus: B, config: VdpConfig) -> Self {
        Self::with_registers(bus, config, Registers::default())
    }

    /// Start from a known register state instead of the power-on guess in
    /// [`Registers::default`]. Use this when something else (the BIOS, a
    /// loader) has already programmed the device, so read-modify-writes of
    /// `R1` keep its bits.
    pub fn with_registers(bus: B, config: VdpConfig, regs: Registers) -> Self {
        Self {
            bus,
            regs,
            mode: None,
            config,
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn sprite_config(&self) -> SpriteConfig {
        self.regs.sprite_config()
    }

    /// Last mode set through [`Vdp::set_mode`].
    pub fn mode(&self) -> Option<ScreenMode> {
        self.mode
    }

    pub fn config(&self) -> &VdpConfig {
        &self.config
    }

    /// Read the status register. Clears the frame interrupt flag and
    /// resets the control-port byte latch.
    pub fn read_status(&mut self) -> u8 {
        self.bus.read_status()
    }

    /// Write a raw register value and keep the shadow in sync.
    pub fn write_register(&mut self, register: u8, value: u8) {
        log::debug!("vdp: R{} <- {:#04x}", register & 0x07, value);
        self.regs.set(register, value);
        protocol::write_register(&mut self.bus, register, value);
    }

    /// Point the device cursor at `address`. Interrupts are masked for the
    /// two latch bytes only.
    pub fn latch(&mut self, address: VramAddress, direction: Direction) {
        protocol::latch(&mut self.bus, address, direction);
    }

    /// Mask interrupts until the returned view is dropped.
    ///
    /// The view offers the `_di` variants: operations that never touch the
    /// interrupt state themselves, so a whole sequence of them runs as one
    /// uninterrupted window.
    ///
    /// ```ignore
    /// let mut vdp = vdp.masked();
    /// vdp.set_sprite_attributes_di(&player, SpriteSlot::new(0).unwrap());
    /// vdp.set_sprite_attributes_di(&enemy, SpriteSlot::new(1).unwrap());
    /// // interrupts come back here
    /// ```
    pub fn masked(&mut self) -> Masked<'_, B> {
        self.bus.disable();
        Masked {
            vdp: self,
            restore: true,
        }
    }

    /// A masked view that assumes interrupts are already off and leaves
    /// them off when dropped. For use inside the interrupt handler.
    ///
    /// # Safety
    /// Interrupts must really be masked for the life of the view, otherwise
    /// the latch pairs it writes are unprotected.
    pub unsafe fn assume_masked(&mut self) -> Masked<'_, B> {
        Masked {
            vdp: self,
            restore: false,
        }
    }

    /// Status read before a bulk latch, if configured.
    #[inline(always)]
    pub(crate) fn resync(&mut self) {
        if self.config.resync_before_latch {
            self.bus.read_status();
        }
    }
}

/// Interrupt-masked view of a [`Vdp`]. See [`Vdp::masked`].
pub struct Masked<'a, B: VdpBus> {
    pub(crate) vdp: &'a mut Vdp<B>,
    restore: bool,
}

impl<'a, B: VdpBus> Masked<'a, B> {
    /// Latch without touching the interrupt state.
    pub fn latch(&mut self, address: VramAddress, direction: Direction) {
        protocol::latch_unmasked(&mut self.vdp.bus, address, direction);
    }

    pub fn read_status(&mut self) -> u8 {
        self.vdp.bus.read_status()
    }

    pub fn registers(&self) -> &Registers {
        &self.vdp.regs
    }

    pub fn sprite_config(&self) -> SpriteConfig {
        self.vdp.regs.sprite_config()
    }
}

impl<'a, B: VdpBus> Drop for Masked<'a, B> {
    fn drop(&mut self) {
        if self.restore {
            self.vdp.bus.enable();
        }
    }
}

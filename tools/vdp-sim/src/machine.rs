use core::fmt::{Display, Formatter};
use heapless::Vec;
use log::{debug, warn};
use msx_vdp::{Direction, Interrupts, VdpPorts, VramAddress};

use crate::tms9918::Tms9918;

/// What the simulated interrupt handler does to the device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IsrAction {
    /// Touches nothing.
    Idle,
    /// Reads the status port, like the MSX BIOS frame handler.
    ReadStatus,
    /// Writes one byte of video memory, moving the cursor.
    Poke { address: VramAddress, value: u8 },
}

/// A protocol error caused by the handler and the main program sharing
/// the device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The handler ran between the two bytes of a latch.
    SplitLatch { first: u8 },
    /// The main program continued a burst after the handler moved the
    /// cursor.
    CursorClobbered { address: u16 },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Violation::SplitLatch { first } => {
                write!(f, "interrupt between latch bytes (first byte {:#04x})", first)
            }
            Violation::CursorClobbered { address } => {
                write!(f, "burst continued at ${:04X} after handler moved the cursor", address)
            }
        }
    }
}

/// The device plus the CPU's interrupt flag and line.
///
/// Every port access made by the main program counts as one step. The
/// interrupt line can be raised immediately or after a number of steps;
/// the handler runs as soon as the line is up and interrupts are enabled,
/// i.e. between two port accesses or at the moment interrupts come back.
#[derive(Debug)]
pub struct Machine {
    pub vdp: Tms9918,
    pub isr: IsrAction,

    interrupts_enabled: bool,
    irq_pending: bool,
    irq_countdown: Option<u32>,
    cursor_clobbered: bool,
    violations: Vec<Violation, 16>,

    pub interrupts_serviced: u32,
    pub port_accesses: u32,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(Tms9918::default())
    }
}

impl Machine {
    pub fn new(vdp: Tms9918) -> Self {
        Self {
            vdp,
            isr: IsrAction::ReadStatus,
            interrupts_enabled: true,
            irq_pending: false,
            irq_countdown: None,
            cursor_clobbered: false,
            violations: Vec::new(),
            interrupts_serviced: 0,
            port_accesses: 0,
        }
    }

    pub fn with_isr(mut self, isr: IsrAction) -> Self {
        self.isr = isr;
        self
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    pub fn irq_pending(&self) -> bool {
        self.irq_pending
    }

    /// Violations seen so far, oldest first. Holds the first 16.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn clear_violations(&mut self) {
        self.violations.clear();
    }

    /// Raise the interrupt line now.
    pub fn raise_irq(&mut self) {
        self.irq_pending = true;
        self.poll();
    }

    /// Raise the interrupt line after `steps` more port accesses.
    pub fn raise_irq_after(&mut self, steps: u32) {
        if steps == 0 {
            self.raise_irq();
        } else {
            self.irq_countdown = Some(steps);
        }
    }

    /// End of frame: set the device's INT flag and raise the line if the
    /// device has interrupts enabled.
    pub fn frame(&mut self) {
        self.vdp.vblank();
        if self.vdp.irq_line() {
            self.raise_irq();
        }
    }

    fn step(&mut self) {
        self.port_accesses += 1;
        if let Some(steps) = self.irq_countdown {
            if steps <= 1 {
                self.irq_countdown = None;
                self.irq_pending = true;
            } else {
                self.irq_countdown = Some(steps - 1);
            }
        }
        self.poll();
    }

    fn poll(&mut self) {
        if self.irq_pending && self.interrupts_enabled {
            self.service();
        }
    }

    fn service(&mut self) {
        self.irq_pending = false;
        self.interrupts_serviced += 1;
        debug!("servicing interrupt #{}", self.interrupts_serviced);

        if let Some(first) = self.vdp.latch_pending() {
            self.record(Violation::SplitLatch { first });
        }

        match self.isr {
            IsrAction::Idle => {}
            IsrAction::ReadStatus => {
                self.vdp.read_status();
            }
            IsrAction::Poke { address, value } => {
                for byte in address.latch_bytes(Direction::Write) {
                    self.vdp.write_control(byte);
                }
                self.vdp.write_data(value);
                self.cursor_clobbered = true;
            }
        }
    }

    fn check_cursor(&mut self) {
        if self.cursor_clobbered {
            self.cursor_clobbered = false;
            let address = self.vdp.address();
            self.record(Violation::CursorClobbered { address });
        }
    }

    fn record(&mut self, violation: Violation) {
        warn!("protocol violation: {}", violation);
        // keep the earliest ones, later ones are usually fallout
        let _ = self.violations.push(violation);
    }
}

impl VdpPorts for Machine {
    fn write_control(&mut self, value: u8) {
        self.vdp.write_control(value);
        if self.vdp.latch_pending().is_none() {
            self.cursor_clobbered = false;
        }
        self.step();
    }

    fn write_data(&mut self, value: u8) {
        self.check_cursor();
        self.vdp.write_data(value);
        self.step();
    }

    fn read_data(&mut self) -> u8 {
        self.check_cursor();
        let value = self.vdp.read_data();
        self.step();
        value
    }

    fn read_status(&mut self) -> u8 {
        let status = self.vdp.read_status();
        self.step();
        status
    }
}

impl Interrupts for Machine {
    fn disable(&mut self) {
        self.interrupts_enabled = false;
    }

    fn enable(&mut self) {
        self.interrupts_enabled = true;
        self.poll();
    }
}

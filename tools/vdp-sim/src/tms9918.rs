use bit_field::BitField;
use core::fmt::{Debug, Formatter};
use log::{debug, warn};
use msx_vdp::{Direction, Mode1, VRAM_SIZE};

bitflags::bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Status: u8 {
        /// Frame interrupt pending. Set at the end of the active display.
        const INT          = 0b1000_0000;
        const FIFTH_SPRITE = 0b0100_0000;
        const COINCIDENCE  = 0b0010_0000;
    }
}

const ADDRESS_MASK: u16 = 0x3FFF;

/// Port-level model of the video chip.
///
/// Only the CPU-facing side is modelled: the control-port byte latch, the
/// auto-incrementing cursor with its read-ahead buffer, the registers and
/// the status flags. Nothing is rendered.
#[derive(Clone)]
pub struct Tms9918 {
    pub vram: [u8; VRAM_SIZE],
    pub registers: [u8; 8],
    pub status: Status,

    address: u16,
    pending_low: Option<u8>,
    read_ahead: u8,
    direction: Direction,

    pub data_writes: u32,
    pub data_reads: u32,
}

impl Default for Tms9918 {
    fn default() -> Self {
        Self::filled(0)
    }
}

impl Debug for Tms9918 {
    fn fmt(&self, f: &mut Formatter) -> core::fmt::Result {
        f.debug_struct("Tms9918")
            .field("registers", &self.registers)
            .field("status", &self.status)
            .field("address", &self.address)
            .field("pending_low", &self.pending_low)
            .field("direction", &self.direction)
            .finish()
    }
}

impl Tms9918 {
    /// A device whose memory holds `byte` everywhere.
    pub fn filled(byte: u8) -> Self {
        Self {
            vram: [byte; VRAM_SIZE],
            registers: [0; 8],
            status: Status::empty(),
            address: 0,
            pending_low: None,
            read_ahead: 0,
            direction: Direction::Read,
            data_writes: 0,
            data_reads: 0,
        }
    }

    #[inline(always)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[inline(always)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// First control byte received, second still outstanding.
    #[inline(always)]
    pub fn latch_pending(&self) -> Option<u8> {
        self.pending_low
    }

    pub fn write_control(&mut self, data: u8) {
        let Some(low) = self.pending_low.take() else {
            self.pending_low = Some(data);
            return;
        };

        if data.get_bit(7) {
            let register = data.get_bits(0..3) as usize;
            debug!("R{} <- {:08b}", register, low);
            self.registers[register] = low;
            return;
        }

        self.address = u16::from_le_bytes([low, data.get_bits(0..6)]);
        if data.get_bit(6) {
            self.direction = Direction::Write;
        } else {
            self.direction = Direction::Read;
            self.prefetch();
        }
        debug!("latched ${:04X} for {:?}", self.address, self.direction);
    }

    pub fn write_data(&mut self, data: u8) {
        self.pending_low = None;
        if self.direction != Direction::Write {
            warn!("data write at ${:04X} after a read latch", self.address);
        }
        self.vram[self.address as usize] = data;
        self.read_ahead = data;
        self.advance();
        self.data_writes += 1;
    }

    pub fn read_data(&mut self) -> u8 {
        self.pending_low = None;
        if self.direction != Direction::Read {
            warn!("data read at ${:04X} after a write latch", self.address);
        }
        let data = self.read_ahead;
        self.prefetch();
        self.data_reads += 1;
        data
    }

    /// Returns the status flags and clears them. Also resets the control
    /// port byte latch.
    pub fn read_status(&mut self) -> u8 {
        self.pending_low = None;
        let status = self.status.bits();
        self.status = Status::empty();
        status
    }

    /// End of active display.
    pub fn vblank(&mut self) {
        self.status.insert(Status::INT);
    }

    /// The interrupt output: INT flag set and enabled in `R1`.
    pub fn irq_line(&self) -> bool {
        self.status.contains(Status::INT) && self.registers[1] & Mode1::IE.bits() != 0
    }

    #[inline(always)]
    fn prefetch(&mut self) {
        self.read_ahead = self.vram[self.address as usize];
        self.advance();
    }

    #[inline(always)]
    fn advance(&mut self) {
        self.address = (self.address + 1) & ADDRESS_MASK;
    }
}

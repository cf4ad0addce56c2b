//! # Display control
//!
//! One-shot configuration: screen mode, display on/off, colors, sprite
//! size. Registers are write-only on the device, so the driver keeps a
//! shadow of all eight and does every read-modify-write against the shadow.
//!
//! ## Mode0 (`R0`)
//!
//! | Flag     | Effect                                   |
//! |----------|------------------------------------------|
//! | `M3`     | Graphic 2 (bitmapped tiles)              |
//! | `EXTVID` | Mix external video input                 |
//!
//! ## Mode1 (`R1`)
//!
//! | Flag       | Effect                                 |
//! |------------|----------------------------------------|
//! | `VRAM_16K` | 4116 memory layout (always on for MSX) |
//! | `DISPLAY`  | Output enabled (1) vs blanked (0)      |
//! | `IE`       | Frame interrupt enabled                |
//! | `M1`       | Text 1                                 |
//! | `M2`       | Multicolor                             |
//! | `SIZE`     | 16x16 sprites                          |
//! | `MAG`      | Sprites magnified 2x                   |

use bit_field::BitField;
use log::debug;

use crate::{
    bus::{IrqGuard, VdpBus},
    protocol::{write_register, write_register_unmasked},
    Vdp,
};

bitflags::bitflags! {
    /// Mode register 0 (`R0`).
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Mode0: u8 {
        const EXTVID = 0b0000_0001;
        const M3     = 0b0000_0010;
    }

    /// Mode register 1 (`R1`).
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Mode1: u8 {
        const MAG      = 0b0000_0001;
        const SIZE     = 0b0000_0010;
        const M2       = 0b0000_1000;
        const M1       = 0b0001_0000;
        const IE       = 0b0010_0000;
        const DISPLAY  = 0b0100_0000;
        const VRAM_16K = 0b1000_0000;
    }
}

/// Shadow copy of the eight write-only registers.
///
/// The default is a guess at the power-on state: 16K memory, frame interrupt
/// on, display off, everything else zero. When the device has already been
/// programmed, seed the shadow with [`Registers::from_raw`] and
/// [`Vdp::with_registers`], or call [`Vdp::set_mode`] before anything that
/// rewrites `R1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Registers {
    pub mode0: Mode0,
    pub mode1: Mode1,
    /// `R2..=R6`: table base registers.
    pub tables: [u8; 5],
    /// `R7`: ink in the high nibble, border in the low nibble.
    pub color: u8,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            mode0: Mode0::empty(),
            mode1: Mode1::VRAM_16K | Mode1::IE,
            tables: [0; 5],
            color: 0,
        }
    }
}

impl Registers {
    /// Shadow seeded from known register values, e.g. the BIOS copies at
    /// `0xF3DF..=0xF3E6` on MSX.
    pub fn from_raw(values: [u8; 8]) -> Self {
        let mut regs = Self::default();
        for (index, &value) in values.iter().enumerate() {
            regs.set(index as u8, value);
        }
        regs
    }

    /// Sprite size and magnification as currently set in `R1`.
    pub fn sprite_config(&self) -> SpriteConfig {
        SpriteConfig {
            size: if self.mode1.contains(Mode1::SIZE) {
                SpriteSize::Large
            } else {
                SpriteSize::Small
            },
            zoom: self.mode1.contains(Mode1::MAG),
        }
    }

    /// Raw value of register `index` (0..=7).
    pub fn get(&self, index: u8) -> u8 {
        match index & 0x07 {
            0 => self.mode0.bits(),
            1 => self.mode1.bits(),
            7 => self.color,
            n => self.tables[n as usize - 2],
        }
    }

    pub(crate) fn set(&mut self, index: u8, value: u8) {
        match index & 0x07 {
            0 => self.mode0 = Mode0::from_bits_retain(value),
            1 => self.mode1 = Mode1::from_bits_retain(value),
            7 => self.color = value,
            n => self.tables[n as usize - 2] = value,
        }
    }
}

/// The sixteen palette entries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Transparent = 0,
    Black = 1,
    MediumGreen = 2,
    LightGreen = 3,
    DarkBlue = 4,
    LightBlue = 5,
    DarkRed = 6,
    Cyan = 7,
    MediumRed = 8,
    LightRed = 9,
    DarkYellow = 10,
    LightYellow = 11,
    DarkGreen = 12,
    Magenta = 13,
    Gray = 14,
    White = 15,
}

impl Color {
    pub const ALL: [Color; 16] = [
        Color::Transparent,
        Color::Black,
        Color::MediumGreen,
        Color::LightGreen,
        Color::DarkBlue,
        Color::LightBlue,
        Color::DarkRed,
        Color::Cyan,
        Color::MediumRed,
        Color::LightRed,
        Color::DarkYellow,
        Color::LightYellow,
        Color::DarkGreen,
        Color::Magenta,
        Color::Gray,
        Color::White,
    ];

    /// Palette entry for the low nibble of `index`.
    #[inline(always)]
    pub const fn from_nibble(index: u8) -> Color {
        Self::ALL[(index & 0x0F) as usize]
    }

    /// Foreground/background pair as stored in color table bytes.
    #[inline(always)]
    pub fn pair(fg: Color, bg: Color) -> u8 {
        let mut byte = 0u8;
        byte.set_bits(4..8, fg as u8);
        byte.set_bits(0..4, bg as u8);
        byte
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScreenMode {
    /// 40x24 text, no sprites (`SCREEN 0`).
    Text1,
    /// 32x24 tiles, one color pair per 8 patterns (`SCREEN 1`).
    Graphic1,
    /// 32x24 tiles, three pattern banks, per-row colors (`SCREEN 2`).
    Graphic2,
    /// 64x48 color blocks (`SCREEN 3`).
    Multicolor,
}

impl ScreenMode {
    fn mode0(self) -> Mode0 {
        match self {
            ScreenMode::Graphic2 => Mode0::M3,
            _ => Mode0::empty(),
        }
    }

    fn mode1(self) -> Mode1 {
        match self {
            ScreenMode::Text1 => Mode1::M1,
            ScreenMode::Multicolor => Mode1::M2,
            _ => Mode1::empty(),
        }
    }

    /// `R2..=R6` for the standard table positions of each mode.
    fn tables(self) -> [u8; 5] {
        match self {
            ScreenMode::Text1 => [0x00, 0x00, 0x01, 0x00, 0x00],
            ScreenMode::Graphic1 => [0x06, 0x80, 0x00, 0x36, 0x07],
            ScreenMode::Graphic2 => [0x06, 0xFF, 0x03, 0x36, 0x07],
            ScreenMode::Multicolor => [0x02, 0x00, 0x00, 0x36, 0x07],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SpriteSize {
    /// 8x8 pixels, 8 pattern bytes.
    #[default]
    Small,
    /// 16x16 pixels, 32 pattern bytes.
    Large,
}

impl SpriteSize {
    #[inline(always)]
    pub const fn pattern_len(self) -> usize {
        match self {
            SpriteSize::Small => 8,
            SpriteSize::Large => 32,
        }
    }
}

/// Sprite size and magnification, read from the `SIZE`/`MAG` bits of the
/// `R1` shadow.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SpriteConfig {
    pub size: SpriteSize,
    pub zoom: bool,
}

impl SpriteConfig {
    fn flags(self) -> Mode1 {
        let mut flags = Mode1::empty();
        flags.set(Mode1::SIZE, self.size == SpriteSize::Large);
        flags.set(Mode1::MAG, self.zoom);
        flags
    }
}

impl<B: VdpBus> Vdp<B> {
    /// Turn video output on. Safe to call when it is already on.
    pub fn screen_enable(&mut self) {
        self.regs.mode1.insert(Mode1::DISPLAY);
        write_register(&mut self.bus, 1, self.regs.mode1.bits());
    }

    /// Blank the display. Video memory access is faster while blanked.
    pub fn screen_disable(&mut self) {
        self.regs.mode1.remove(Mode1::DISPLAY);
        write_register(&mut self.bus, 1, self.regs.mode1.bits());
    }

    /// Program `R0..=R6` for `mode`. Display, interrupt and sprite bits of
    /// `R1` are kept. All seven writes happen in one masked window.
    pub fn set_mode(&mut self, mode: ScreenMode) {
        debug!("vdp: switching to {:?}", mode);

        let keep = Mode1::DISPLAY | Mode1::IE | Mode1::SIZE | Mode1::MAG;
        self.regs.mode0 = mode.mode0();
        self.regs.mode1 = (self.regs.mode1 & keep) | Mode1::VRAM_16K | mode.mode1();
        self.regs.tables = mode.tables();
        self.mode = Some(mode);

        let mut bus = IrqGuard::new(&mut self.bus);
        for index in 0..7 {
            write_register_unmasked(&mut *bus, index, self.regs.get(index));
        }
    }

    /// Set text color (`ink`) and border/backdrop color in one `R7` write.
    pub fn set_color(&mut self, ink: Color, border: Color) {
        self.regs.color = Color::pair(ink, border);
        write_register(&mut self.bus, 7, self.regs.color);
    }

    /// Set sprite size and magnification. Rewrites `R1` from the shadow
    /// with interrupts masked across the read-modify-write.
    pub fn configure_sprites(&mut self, size: SpriteSize, zoom: bool) {
        debug!("vdp: sprites {:?}, zoom {}", size, zoom);

        let mut bus = IrqGuard::new(&mut self.bus);
        let mut mode1 = self.regs.mode1;
        mode1.remove(Mode1::SIZE | Mode1::MAG);
        mode1.insert(SpriteConfig { size, zoom }.flags());
        self.regs.mode1 = mode1;
        write_register_unmasked(&mut *bus, 1, mode1.bits());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::mock::{Event, Recorder};
    use crate::VdpConfig;

    #[test]
    fn color_packs_ink_high_border_low() {
        let mut vdp = Vdp::new(Recorder::default());
        vdp.set_color(Color::White, Color::DarkBlue);
        assert_eq!(vdp.bus().controls(), [0xF4, 0x87]);
        assert_eq!(vdp.registers().get(7), 0xF4);
    }

    #[test]
    fn nibbles_map_onto_the_palette() {
        assert_eq!(Color::from_nibble(0x0F), Color::White);
        assert_eq!(Color::from_nibble(0x14), Color::DarkBlue);
        assert_eq!(Color::pair(Color::Black, Color::Cyan), 0x17);
    }

    #[test]
    fn enable_is_idempotent() {
        let mut vdp = Vdp::new(Recorder::default());
        vdp.screen_enable();
        vdp.screen_enable();
        let controls = vdp.bus().controls();
        assert_eq!(controls[0..2], controls[2..4]);
        assert!(Mode1::from_bits_retain(controls[0]).contains(Mode1::DISPLAY));

        vdp.screen_disable();
        assert!(!vdp.registers().mode1.contains(Mode1::DISPLAY));
    }

    #[test]
    fn sprite_bits_are_replaced_not_accumulated() {
        let mut vdp = Vdp::new(Recorder::default());
        vdp.configure_sprites(SpriteSize::Large, true);
        assert!(vdp.registers().mode1.contains(Mode1::SIZE | Mode1::MAG));

        vdp.configure_sprites(SpriteSize::Small, false);
        let mode1 = vdp.registers().mode1;
        assert!(!mode1.intersects(Mode1::SIZE | Mode1::MAG));
        assert!(mode1.contains(Mode1::IE | Mode1::VRAM_16K));
        assert_eq!(vdp.sprite_config(), SpriteConfig::default());
    }

    #[test]
    fn set_mode_writes_all_table_registers_in_one_window() {
        let mut vdp = Vdp::new(Recorder::default());
        vdp.configure_sprites(SpriteSize::Large, false);
        vdp.bus_mut().events.clear();

        vdp.set_mode(ScreenMode::Graphic2);

        let events = &vdp.bus().events;
        assert_eq!(events.first(), Some(&Event::Disable));
        assert_eq!(events.last(), Some(&Event::Enable));
        assert_eq!(events.len(), 2 + 14);
        assert_eq!(
            vdp.bus().controls(),
            [
                0x02, 0x80, 0xA2, 0x81, 0x06, 0x82, 0xFF, 0x83, 0x03, 0x84, 0x36, 0x85, 0x07,
                0x86
            ]
        );
        assert_eq!(vdp.mode(), Some(ScreenMode::Graphic2));
    }

    #[test]
    fn raw_r1_write_changes_sprite_config() {
        let mut vdp = Vdp::new(Recorder::default());
        let mode1 = Mode1::VRAM_16K | Mode1::IE | Mode1::SIZE | Mode1::MAG;
        vdp.write_register(1, mode1.bits());
        assert_eq!(
            vdp.sprite_config(),
            SpriteConfig {
                size: SpriteSize::Large,
                zoom: true,
            }
        );

        vdp.write_register(1, (Mode1::VRAM_16K | Mode1::IE).bits());
        assert_eq!(vdp.sprite_config(), SpriteConfig::default());
    }

    #[test]
    fn seeded_shadow_is_kept_by_read_modify_write() {
        // R1 as the BIOS leaves it in SCREEN 2: display on, 16x16 sprites
        let seeded = Registers::from_raw([0x02, 0xE2, 0x06, 0xFF, 0x03, 0x36, 0x07, 0xF4]);
        let mut vdp = Vdp::with_registers(Recorder::default(), VdpConfig::default(), seeded);
        assert_eq!(vdp.sprite_config().size, SpriteSize::Large);

        vdp.configure_sprites(SpriteSize::Large, true);
        assert_eq!(vdp.bus().controls(), [0xE3, 0x81]);
        assert_eq!(vdp.registers().get(7), 0xF4);
    }
}

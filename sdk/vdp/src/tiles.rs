//! # Tile layer and hardware sprites
//!
//! Table-level operations built from the bulk primitives and the fixed
//! [`layout`](crate::layout).
//!
//! ## Name table
//!
//! 32x24 cells, one pattern index per cell, row-major. Cell `(x, y)` lives
//! at `NAMES + y * 32 + x`.
//!
//! ```ignore
//! vdp.clear_tile_layer(Color::pair(Color::White, Color::Black));
//! vdp.draw_text(2, 3, b"PRESS SPACE");
//! ```
//!
//! ## Sprites
//!
//! 32 slots of four bytes each: Y, X, pattern, color. A Y of 208 in any slot
//! hides that slot and every slot after it.
//!
//! ```ignore
//! let player = SpriteAttributes::new(120, 96, 0, Color::LightYellow);
//! vdp.set_sprite_attributes(&player, SpriteSlot::new(0).unwrap());
//! ```

use crate::{
    bus::{IrqGuard, VdpBus},
    config::MaskWindow,
    display::Color,
    driver::{Masked, Vdp},
    layout::{
        BANK_COUNT, BANK_STRIDE, COLORS, GRID_WIDTH, NAME_TABLE_LEN, NAMES, SPRITE_ATTRIBUTES,
        SPRITE_PATTERNS, SPRITE_RECORD_LEN, SPRITE_SLOTS, TILE_COLOR_LEN,
    },
    protocol::{latch_unmasked, Direction, VramAddress},
    transfer::write_block,
};

/// Y value that stops sprite processing at this slot.
pub const SPRITE_TERMINATOR: u8 = 208;

const UNROLL: usize = 8;

/// A hardware sprite slot, `0..32`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpriteSlot(u8);

impl SpriteSlot {
    pub const fn new(index: u8) -> Option<Self> {
        if index < SPRITE_SLOTS {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Address of this slot's attribute record.
    #[inline(always)]
    pub const fn address(self) -> VramAddress {
        SPRITE_ATTRIBUTES.offset(self.0 as u16 * SPRITE_RECORD_LEN as u16)
    }
}

/// Pattern bytes for one sprite, sized by the sprite mode they are drawn for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpritePattern<'a> {
    /// One 8x8 pattern.
    Small(&'a [u8; 8]),
    /// Four 8x8 quadrants of a 16x16 sprite: top left, bottom left, top
    /// right, bottom right.
    Large(&'a [u8; 32]),
}

/// One sprite attribute record, in device byte order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[repr(C)]
pub struct SpriteAttributes {
    pub y: u8,
    pub x: u8,
    pub pattern: u8,
    /// Color in the low nibble, early clock in bit 7.
    pub color: u8,
}

impl SpriteAttributes {
    /// Shift the sprite 32 pixels left so it can enter from the left edge.
    pub const EARLY_CLOCK: u8 = 0x80;

    /// Record for a sprite at screen position `(x, y)`. Note the argument
    /// order is x first, while the record itself stores y first.
    pub const fn new(x: u8, y: u8, pattern: u8, color: Color) -> Self {
        Self {
            y,
            x,
            pattern,
            color: color as u8,
        }
    }

    #[inline(always)]
    pub const fn to_bytes(self) -> [u8; SPRITE_RECORD_LEN] {
        [self.y, self.x, self.pattern, self.color]
    }
}

impl<B: VdpBus> Vdp<B> {
    /// Zero the whole name table, then set the color of pattern 0 in each
    /// of the three banks to `color`. Leaves a blank frame in one color.
    pub fn clear_tile_layer(&mut self, color: u8) {
        log::trace!("vdp: clearing tile layer, color {:#04x}", color);

        self.fill(NAMES, NAME_TABLE_LEN as u16, 0);
        for bank in 0..BANK_COUNT {
            self.fill(COLORS + bank * BANK_STRIDE, TILE_COLOR_LEN, color);
        }
    }

    /// Copy a full screen of tile indices into the name table.
    pub fn refresh_name_table(&mut self, buffer: &[u8; NAME_TABLE_LEN]) {
        self.copy_to_memory(buffer, NAMES);
    }

    /// Like [`refresh_name_table`](Self::refresh_name_table) with the
    /// data phase unrolled eight bytes at a time. How long interrupts stay
    /// masked is set by [`VdpConfig::name_table_mask`](crate::VdpConfig).
    pub fn fast_refresh_name_table(&mut self, buffer: &[u8; NAME_TABLE_LEN]) {
        self.resync();
        match self.config.name_table_mask {
            MaskWindow::Latch => {
                self.latch(NAMES, Direction::Write);
                write_unrolled(&mut self.bus, buffer);
            }
            MaskWindow::Transfer => {
                let mut bus = IrqGuard::new(&mut self.bus);
                latch_unmasked(&mut *bus, NAMES, Direction::Write);
                write_unrolled(&mut *bus, buffer);
            }
        }
    }

    /// Write one sprite record into `slot`. Touches exactly the four bytes
    /// of that slot.
    pub fn set_sprite_attributes(&mut self, record: &SpriteAttributes, slot: SpriteSlot) {
        self.copy_to_memory(&record.to_bytes(), slot.address());
    }

    /// Hide `slot` and every slot after it.
    pub fn hide_sprites_from(&mut self, slot: SpriteSlot) {
        self.poke(slot.address(), SPRITE_TERMINATOR);
    }

    /// Load one sprite pattern. `pattern` counts in 8-byte units for both
    /// sizes, so a large pattern at `n` fills `n..n + 4`.
    pub fn load_sprite_pattern(&mut self, pattern: u8, data: SpritePattern<'_>) {
        let address = SPRITE_PATTERNS + pattern as u16 * 8;
        match data {
            SpritePattern::Small(bytes) => self.fast_copy_fixed(bytes, address),
            SpritePattern::Large(bytes) => self.fast_copy_fixed(bytes, address),
        }
    }

    /// Write `text` into the name table from cell `(x, y)` onwards, one
    /// byte per cell, stopping at the first NUL or at the end of the slice.
    pub fn draw_text(&mut self, x: u8, y: u8, text: &[u8]) {
        let mut address = NAMES + y as u16 * GRID_WIDTH + x as u16;
        for &c in text.iter().take_while(|&&c| c != 0) {
            self.poke(address, c);
            address = address + 1;
        }
    }
}

impl<B: VdpBus> Masked<'_, B> {
    pub fn set_sprite_attributes_di(&mut self, record: &SpriteAttributes, slot: SpriteSlot) {
        self.latch(slot.address(), Direction::Write);
        write_block(&mut self.vdp.bus, &record.to_bytes());
    }

    pub fn fast_refresh_name_table_di(&mut self, buffer: &[u8; NAME_TABLE_LEN]) {
        self.latch(NAMES, Direction::Write);
        write_unrolled(&mut self.vdp.bus, buffer);
    }
}

#[inline(always)]
fn write_unrolled<P: crate::bus::VdpPorts + ?Sized>(ports: &mut P, buffer: &[u8; NAME_TABLE_LEN]) {
    for row in 0..NAME_TABLE_LEN / UNROLL {
        let base = row * UNROLL;
        for i in 0..UNROLL {
            ports.write_data(buffer[base + i]);
        }
    }
}

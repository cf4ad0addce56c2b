//! Video memory layout used by the tile and sprite operations.
//!
//! These are the standard MSX `SCREEN 2` table positions, which
//! [`ScreenMode::Graphic2`](crate::display::ScreenMode::Graphic2) programs.

use crate::protocol::VramAddress;

/// Pattern generator table, three banks of 0x800 bytes.
pub const PATTERNS: VramAddress = VramAddress::new(0x0000);
/// Name table (tile map).
pub const NAMES: VramAddress = VramAddress::new(0x1800);
/// Sprite attribute table.
pub const SPRITE_ATTRIBUTES: VramAddress = VramAddress::new(0x1B00);
/// Color table, three banks of 0x800 bytes.
pub const COLORS: VramAddress = VramAddress::new(0x2000);
/// Sprite pattern generator table.
pub const SPRITE_PATTERNS: VramAddress = VramAddress::new(0x3800);

/// Distance between consecutive pattern/color banks.
pub const BANK_STRIDE: u16 = 0x800;
pub const BANK_COUNT: u16 = 3;

/// Tile cells per row.
pub const GRID_WIDTH: u16 = 32;
pub const GRID_HEIGHT: u16 = 24;
/// 256 cells per bank, three banks.
pub const NAME_TABLE_LEN: usize = 256 * 3;

/// Bytes in one hardware sprite attribute record.
pub const SPRITE_RECORD_LEN: usize = 4;
pub const SPRITE_SLOTS: u8 = 32;

/// Bytes of color attributes per tile (one per pattern row).
pub const TILE_COLOR_LEN: u16 = 8;

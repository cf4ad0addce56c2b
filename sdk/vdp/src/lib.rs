//! # msx-vdp
//!
//! Driver for TMS9918-class video display processors: the chip behind MSX,
//! ColecoVision, SG-1000 and TI-99/4A video. The CPU reaches its 16 KiB of
//! video memory only through two ports, a control port and a data port.
//!
//! ## Layers
//!
//! | Module                 | What it does                                      |
//! |------------------------|---------------------------------------------------|
//! | [`bus`]                | port/interrupt traits, [`IrqGuard`]               |
//! | [`protocol`]           | address latch and register write sequences       |
//! | [`access`]             | `peek` / `poke`                                   |
//! | [`transfer`]           | fill, block copies, fixed-size fast copies        |
//! | [`display`]            | mode, display on/off, colors, sprite size         |
//! | [`tiles`]              | name table, color table, sprite attributes, text  |
//!
//! Everything above [`protocol`] goes through it, and nothing below looks up.
//!
//! ## Getting started
//!
//! ```ignore
//! let mut vdp = Vdp::new(Board::new(ports, irq));
//! vdp.set_mode(ScreenMode::Graphic2);
//! vdp.set_color(Color::White, Color::Black);
//! vdp.clear_tile_layer(Color::pair(Color::White, Color::Black));
//! vdp.draw_text(2, 3, b"HELLO");
//! vdp.screen_enable();
//! ```
//!
//! ## Interrupts
//!
//! The frame interrupt handler usually reads the status port, and reading
//! the status port resets the device's control-port byte latch. Every latch
//! is therefore written with interrupts masked. Plain methods on [`Vdp`]
//! mask only the two latch bytes; the `_di` methods on [`Masked`] run
//! entirely inside a window the caller holds open.
//!
//! Nothing is validated at run time. Addresses are 14-bit by construction,
//! sprite slots are checked when built, and fixed-size transfers take arrays.

#![no_std]

pub mod access;
pub mod bus;
pub mod config;
pub mod display;
mod driver;
pub mod layout;
pub mod mmio;
pub mod protocol;
pub mod tiles;
pub mod transfer;

pub use bus::{Board, Interrupts, IrqGuard, NoInterrupts, VdpBus, VdpPorts};
pub use config::{MaskWindow, VdpConfig};
pub use display::{Color, Mode0, Mode1, Registers, ScreenMode, SpriteConfig, SpriteSize};
pub use driver::{Masked, Vdp};
pub use mmio::MmioPorts;
pub use protocol::{Direction, VramAddress, VRAM_SIZE};
pub use tiles::{SpriteAttributes, SpritePattern, SpriteSlot, SPRITE_TERMINATOR};

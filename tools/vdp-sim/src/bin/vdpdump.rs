use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use msx_vdp::{
    layout::{GRID_HEIGHT, GRID_WIDTH, NAMES},
    Color, ScreenMode, SpriteAttributes, SpritePattern, SpriteSize, SpriteSlot, Vdp,
};
use tracing::info;
use vdp_sim::Machine;

#[derive(Parser)]
#[command(name = "vdpdump")]
#[command(version, about = "Draw a test scene through msx-vdp on the simulator and dump it", long_about = None)]
struct Cli {
    /// Screen mode to program
    #[arg(short, long, value_enum, default_value_t = Mode::Graphic2)]
    mode: Mode,

    /// Text to draw into the name table
    #[arg(short, long, default_value = "HELLO MSX")]
    text: String,

    /// Column of the first character
    #[arg(short, default_value_t = 2)]
    x: u8,

    /// Row of the text
    #[arg(short, default_value_t = 3)]
    y: u8,

    /// Ink color (palette index 0-15)
    #[arg(long, default_value_t = 15)]
    ink: u8,

    /// Border color (palette index 0-15)
    #[arg(long, default_value_t = 1)]
    border: u8,

    /// Number of sprites to place along the diagonal
    #[arg(long, default_value_t = 4)]
    sprites: u8,

    /// Use 16x16 sprites
    #[arg(long)]
    large_sprites: bool,

    /// Write the 16 KiB video memory image here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum)]
enum Mode {
    Text1,
    Graphic1,
    Graphic2,
    Multicolor,
}

impl From<Mode> for ScreenMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Text1 => ScreenMode::Text1,
            Mode::Graphic1 => ScreenMode::Graphic1,
            Mode::Graphic2 => ScreenMode::Graphic2,
            Mode::Multicolor => ScreenMode::Multicolor,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let ink = Color::from_nibble(cli.ink);
    let border = Color::from_nibble(cli.border);
    let size = if cli.large_sprites { SpriteSize::Large } else { SpriteSize::Small };

    let mut vdp = Vdp::new(Machine::default());
    vdp.screen_disable();
    vdp.set_mode(cli.mode.into());
    vdp.configure_sprites(size, false);
    vdp.set_color(ink, border);
    vdp.clear_tile_layer(Color::pair(ink, border));
    vdp.draw_text(cli.x, cli.y, cli.text.as_bytes());

    let pattern = match size {
        SpriteSize::Small => SpritePattern::Small(&[0xFF; 8]),
        SpriteSize::Large => SpritePattern::Large(&[0xFF; 32]),
    };
    vdp.load_sprite_pattern(0, pattern);
    for i in 0..cli.sprites {
        let Some(slot) = SpriteSlot::new(i) else {
            anyhow::bail!("only 32 sprite slots, asked for {}", cli.sprites);
        };
        let record = SpriteAttributes::new(i.wrapping_mul(16), i.wrapping_mul(6), 0, Color::from_nibble(i + 2));
        vdp.set_sprite_attributes(&record, slot);
    }
    if let Some(slot) = SpriteSlot::new(cli.sprites) {
        vdp.hide_sprites_from(slot);
    }
    vdp.screen_enable();

    let machine = vdp.into_bus();
    info!(
        "{} port accesses, {} data writes",
        machine.port_accesses, machine.vdp.data_writes
    );

    for (i, value) in machine.vdp.registers.iter().enumerate() {
        println!("R{}: {:08b}", i, value);
    }
    println!();

    let names = NAMES.get() as usize;
    for row in 0..GRID_HEIGHT as usize {
        let start = names + row * GRID_WIDTH as usize;
        let line: String = machine.vdp.vram[start..start + GRID_WIDTH as usize]
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        println!("{:2} |{}|", row, line);
    }

    for violation in machine.violations() {
        println!("violation: {}", violation);
    }

    if let Some(path) = cli.output {
        std::fs::write(&path, machine.vdp.vram)
            .with_context(|| format!("writing video memory image to {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

use msx_vdp::{Vdp, VdpConfig, VramAddress, VRAM_SIZE};
use vdp_sim::{Machine, Tms9918};

fn vdp_over(fill: u8) -> Vdp<Machine> {
    Vdp::new(Machine::new(Tms9918::filled(fill)))
}

#[test]
fn poke_then_peek_round_trips_every_address() {
    let mut vdp = vdp_over(0);
    for address in 0..VRAM_SIZE as u16 {
        let value = (address as u8).wrapping_mul(31) ^ 0x5A;
        vdp.poke(VramAddress::new(address), value);
        assert_eq!(vdp.peek(VramAddress::new(address)), value, "at ${:04X}", address);
    }
    assert!(vdp.bus().violations().is_empty());
}

#[test]
fn zero_length_fill_touches_nothing() {
    let mut vdp = vdp_over(0xAA);
    vdp.fill(VramAddress::new(0x1800), 0, 0x00);

    let machine = vdp.bus();
    assert_eq!(machine.vdp.data_writes, 0);
    assert!(machine.vdp.vram.iter().all(|&b| b == 0xAA));
}

#[test]
fn fill_writes_exactly_length_bytes() {
    for length in [1u16, 7, 256, 768, 0x1000] {
        let mut vdp = vdp_over(0xAA);
        let start = 0x0800usize;
        vdp.fill(VramAddress::new(start as u16), length, 0x3C);

        let vram = &vdp.bus().vdp.vram;
        let end = start + length as usize;
        assert_eq!(vram[start - 1], 0xAA);
        assert!(vram[start..end].iter().all(|&b| b == 0x3C), "length {}", length);
        assert_eq!(vram[end], 0xAA);
        assert_eq!(vdp.bus().vdp.data_writes, length as u32);
    }
}

#[test]
fn copy_round_trips_through_video_memory() {
    let buffer: Vec<u8> = (0..1000u32).map(|i| (i * 7 + 3) as u8).collect();
    for (address, length) in [(0x0000u16, 1usize), (0x1B00, 4), (0x2000, 17), (0x0123, 1000)] {
        let mut vdp = vdp_over(0);
        let address = VramAddress::new(address);
        vdp.copy_to_memory(&buffer[..length], address);

        let mut back = vec![0u8; length];
        vdp.copy_from_memory(address, &mut back);
        assert_eq!(back, buffer[..length]);
    }
}

#[test]
fn copy_wraps_at_the_top_of_memory() {
    let mut vdp = vdp_over(0);
    vdp.copy_to_memory(&[1, 2, 3, 4], VramAddress::new(0x3FFE));

    let vram = &vdp.bus().vdp.vram;
    assert_eq!(vram[0x3FFE..], [1, 2]);
    assert_eq!(vram[..2], [3, 4]);
}

#[test]
fn fast_copy_matches_generic_copy() {
    let block: [u8; 16] = core::array::from_fn(|i| 0xF0 | i as u8);

    let mut fast = vdp_over(0xAA);
    fast.fast_copy16(&block, VramAddress::new(0x0208));
    let mut slow = vdp_over(0xAA);
    slow.copy_to_memory(&block, VramAddress::new(0x0208));

    assert_eq!(fast.bus().vdp.vram, slow.bus().vdp.vram);
    assert_eq!(fast.bus().vdp.data_writes, 16);
}

#[test]
fn di_variants_move_the_same_bytes() {
    let mut vdp = vdp_over(0);
    {
        let mut masked = vdp.masked();
        masked.fill_di(VramAddress::new(0x0100), 8, 0x11);
        masked.copy_to_memory_di(&[5, 6, 7], VramAddress::new(0x0200));
        masked.fast_copy_fixed_di(&[9; 4], VramAddress::new(0x0300));
        masked.poke_di(VramAddress::new(0x0400), 0x42);
        assert_eq!(masked.peek_di(VramAddress::new(0x0400)), 0x42);

        let mut back = [0u8; 3];
        masked.copy_from_memory_di(VramAddress::new(0x0200), &mut back);
        assert_eq!(back, [5, 6, 7]);
    }

    let machine = vdp.bus();
    assert!(machine.interrupts_enabled());
    assert_eq!(machine.vdp.vram[0x0100..0x0108], [0x11; 8]);
    assert_eq!(machine.vdp.vram[0x0300..0x0304], [9; 4]);
}

#[test]
fn resync_can_be_turned_off() {
    let config = VdpConfig {
        resync_before_latch: false,
        ..VdpConfig::default()
    };
    let mut vdp = Vdp::with_config(Machine::default(), config);
    vdp.fill(VramAddress::new(0), 3, 1);
    // two latch bytes plus three data bytes
    assert_eq!(vdp.bus().port_accesses, 5);

    let mut vdp = Vdp::new(Machine::default());
    vdp.fill(VramAddress::new(0), 3, 1);
    assert_eq!(vdp.bus().port_accesses, 6);
}

use msx_vdp::{
    layout::{NAME_TABLE_LEN, NAMES},
    Interrupts, MaskWindow, SpriteAttributes, SpriteSlot, Vdp, VdpConfig, VdpPorts, VramAddress,
};
use vdp_sim::{IsrAction, Machine, Violation};

const HANDLER_POKE: IsrAction = IsrAction::Poke {
    address: VramAddress::new(0x3F00),
    value: 0xEE,
};

#[test]
fn unmasked_latch_is_caught_when_split() {
    let mut machine = Machine::default();
    machine.raise_irq_after(1);

    // hand-rolled poke with no masking at all
    machine.write_control(0x00);
    machine.write_control(0x58);
    machine.write_data(0x41);

    assert_eq!(machine.violations(), [Violation::SplitLatch { first: 0x00 }]);
    // the handler's status read dropped our first byte, so 0x58 became a
    // new first byte and the data went somewhere else
    assert_ne!(machine.vdp.vram[0x1800], 0x41);
}

#[test]
fn masked_latch_defers_the_handler_past_the_pair() {
    // fire the interrupt at every possible port access of a poke
    for steps in 1..=4 {
        let mut vdp = Vdp::new(Machine::default());
        vdp.bus_mut().raise_irq_after(steps);
        vdp.poke(VramAddress::new(0x1800), 0x41);

        let machine = vdp.bus();
        assert!(machine.violations().is_empty(), "irq after {} accesses", steps);
        assert_eq!(machine.vdp.vram[0x1800], 0x41);
        assert!(machine.interrupts_enabled());
        if steps <= 3 {
            assert_eq!(machine.interrupts_serviced, 1);
        }
    }
}

#[test]
fn every_bulk_operation_survives_status_reading_handlers() {
    let screen = [0x20u8; NAME_TABLE_LEN];
    let record = SpriteAttributes::default();
    let slot = SpriteSlot::new(2).unwrap();

    for steps in 1..=6 {
        let mut vdp = Vdp::new(Machine::default());
        let check = |vdp: &mut Vdp<Machine>| {
            assert!(vdp.bus().violations().is_empty(), "irq after {} accesses", steps);
            vdp.bus_mut().raise_irq_after(steps);
        };

        check(&mut vdp);
        vdp.fill(VramAddress::new(0x0000), 64, 0xFF);
        check(&mut vdp);
        vdp.copy_to_memory(&[1, 2, 3, 4, 5], VramAddress::new(0x0100));
        check(&mut vdp);
        vdp.fast_copy16(&[7; 16], VramAddress::new(0x0200));
        check(&mut vdp);
        vdp.clear_tile_layer(0x11);
        check(&mut vdp);
        vdp.refresh_name_table(&screen);
        check(&mut vdp);
        vdp.set_sprite_attributes(&record, slot);
        check(&mut vdp);
        vdp.draw_text(0, 0, b"HI");
        check(&mut vdp);
        let mut back = [0u8; 5];
        vdp.copy_from_memory(VramAddress::new(0x0100), &mut back);
        assert_eq!(back, [1, 2, 3, 4, 5]);
        check(&mut vdp);
    }
}

#[test]
fn cursor_moving_handler_is_caught_in_the_data_phase() {
    let mut vdp = Vdp::new(Machine::default().with_isr(HANDLER_POKE));
    // status read, two latch bytes, then fire before the third data byte
    vdp.bus_mut().raise_irq_after(5);
    vdp.copy_to_memory(&[1, 2, 3, 4], VramAddress::new(0x0100));

    let machine = vdp.bus();
    assert_eq!(machine.interrupts_serviced, 1);
    assert!(matches!(
        machine.violations(),
        [Violation::CursorClobbered { .. }]
    ));
    assert_eq!(machine.vdp.vram[0x0100..0x0102], [1, 2]);
    assert_ne!(machine.vdp.vram[0x0102..0x0104], [3, 4]);
}

#[test]
fn masked_burst_holds_the_handler_until_release() {
    let mut vdp = Vdp::new(Machine::default().with_isr(HANDLER_POKE));
    vdp.bus_mut().raise_irq_after(5);
    vdp.masked().copy_to_memory_di(&[1, 2, 3, 4], VramAddress::new(0x0100));

    let machine = vdp.bus();
    assert!(machine.violations().is_empty());
    assert_eq!(machine.vdp.vram[0x0100..0x0104], [1, 2, 3, 4]);
    // the handler ran once the window closed
    assert_eq!(machine.interrupts_serviced, 1);
    assert_eq!(machine.vdp.vram[0x3F00], 0xEE);
}

#[test]
fn name_table_mask_policy_decides_who_wins() {
    let screen = [0x55u8; NAME_TABLE_LEN];
    let names = NAMES.get() as usize;

    let latch_only = VdpConfig {
        name_table_mask: MaskWindow::Latch,
        ..VdpConfig::default()
    };
    let mut vdp = Vdp::with_config(Machine::default().with_isr(HANDLER_POKE), latch_only);
    vdp.bus_mut().raise_irq_after(100);
    vdp.fast_refresh_name_table(&screen);
    assert!(!vdp.bus().violations().is_empty());

    let whole = VdpConfig {
        name_table_mask: MaskWindow::Transfer,
        ..VdpConfig::default()
    };
    let mut vdp = Vdp::with_config(Machine::default().with_isr(HANDLER_POKE), whole);
    vdp.bus_mut().raise_irq_after(100);
    vdp.fast_refresh_name_table(&screen);
    let machine = vdp.bus();
    assert!(machine.violations().is_empty());
    assert_eq!(machine.vdp.vram[names..names + NAME_TABLE_LEN], screen);
    assert_eq!(machine.interrupts_serviced, 1);
}

#[test]
fn assumed_mask_leaves_interrupts_to_the_caller() {
    let mut vdp = Vdp::new(Machine::default());
    vdp.bus_mut().disable();
    {
        let mut masked = unsafe { vdp.assume_masked() };
        masked.poke_di(VramAddress::new(0x0010), 1);
        masked.set_sprite_attributes_di(&SpriteAttributes::default(), SpriteSlot::new(0).unwrap());
    }
    assert!(!vdp.bus().interrupts_enabled());

    vdp.bus_mut().raise_irq();
    assert_eq!(vdp.bus().interrupts_serviced, 0);
    vdp.bus_mut().enable();
    assert_eq!(vdp.bus().interrupts_serviced, 1);
}

#[test]
fn frame_interrupt_between_operations_is_harmless() {
    let mut vdp = Vdp::new(Machine::default().with_isr(HANDLER_POKE));
    vdp.write_register(1, 0xE0);
    vdp.poke(VramAddress::new(0x0000), 0x01);
    vdp.bus_mut().frame();
    vdp.poke(VramAddress::new(0x0001), 0x02);

    let machine = vdp.bus();
    assert!(machine.violations().is_empty());
    assert_eq!(machine.vdp.vram[0..2], [1, 2]);
}

use std::time::{Duration, Instant};

use vip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8_core::{Chip8, Fault, NullSink, Pacer, Quirks, RecordingSink, ShiftFlag, Step};

fn boot(program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::seeded(0xC8, Quirks::default());
    chip8.load_program(program).expect("program should fit");
    chip8
}

fn run(chip8: &mut Chip8, steps: usize) {
    for _ in 0..steps {
        chip8.step(&mut NullSink).expect("program should not fault");
    }
}

fn lit(frame: &vip8_core::FrameBuffer) -> usize {
    frame.iter().flatten().filter(|&&px| px == 1).count()
}

#[test]
fn jump_with_offset_from_own_address() {
    // 0x200 LD V0, 5
    // 0x202 JP V0, 0x202
    let mut chip8 = boot(&[0x60, 0x05, 0xB2, 0x02]);
    run(&mut chip8, 1);
    assert_eq!(chip8.pc(), 0x202);
    run(&mut chip8, 1);
    assert_eq!(chip8.pc(), 0x200 + 2 + 5);
}

#[test]
fn skip_equal_moves_four_or_two() {
    // 0x200 LD V3, 7
    // 0x202 SE V3, 7   (skips)
    // 0x204 NOP-ish LD V4, 1
    // 0x206 SE V3, 8   (doesn't skip)
    let mut chip8 = boot(&[0x63, 0x07, 0x33, 0x07, 0x64, 0x01, 0x33, 0x08]);
    run(&mut chip8, 2);
    assert_eq!(chip8.pc(), 0x206);
    run(&mut chip8, 1);
    assert_eq!(chip8.pc(), 0x208);
}

#[test]
fn draws_digit_glyphs() {
    // 0x200 LD V1, 0xA
    // 0x202 LD F, V1
    // 0x204 DRW V2, V2, 5
    // 0x206 DRW V2, V2, 5
    let mut chip8 = boot(&[0x61, 0x0A, 0xF1, 0x29, 0xD2, 0x25, 0xD2, 0x25]);
    let mut sink = RecordingSink::default();
    for _ in 0..4 {
        chip8.step(&mut sink).unwrap();
    }
    assert_eq!(chip8.i(), 0x32);
    assert_eq!(sink.frames.len(), 2);

    // "A" is 0xF0 0x90 0xF0 0x90 0x90
    let first = &sink.frames[0];
    assert_eq!(first[0][0..4], [1, 1, 1, 1]);
    assert_eq!(first[1][0..4], [1, 0, 0, 1]);
    assert_eq!(lit(first), 14);

    // Drawing the same sprite again erases it and reports the collision
    assert_eq!(lit(&sink.frames[1]), 0);
    assert_eq!(chip8.v(0xF), Some(1));
}

#[test]
fn bcd_then_load_digits() {
    // 0x200 LD V0, 254
    // 0x202 LD I, 0x300
    // 0x204 LD B, V0
    // 0x206 LD V2, [I]
    let mut chip8 = boot(&[0x60, 0xFE, 0xA3, 0x00, 0xF0, 0x33, 0xF2, 0x65]);
    run(&mut chip8, 4);
    assert_eq!(&chip8.memory()[0x300..0x303], &[2, 5, 4]);
    assert_eq!((chip8.v(0), chip8.v(1), chip8.v(2)), (Some(2), Some(5), Some(4)));
}

#[test]
fn subroutine_round_trip() {
    // 0x200 CALL 0x206
    // 0x202 LD V1, 2
    // 0x204 JP 0x204
    // 0x206 LD V0, 1
    // 0x208 RET
    let mut chip8 = boot(&[
        0x22, 0x06, 0x61, 0x02, 0x12, 0x04, 0x60, 0x01, 0x00, 0xEE,
    ]);
    run(&mut chip8, 5);
    assert_eq!((chip8.v(0), chip8.v(1)), (Some(1), Some(2)));
    assert_eq!(chip8.pc(), 0x204);
}

#[test]
fn runaway_recursion_overflows_stack() {
    // 0x200 CALL 0x200
    let mut chip8 = boot(&[0x22, 0x00]);
    run(&mut chip8, 16);
    assert_eq!(
        chip8.step(&mut NullSink),
        Err(Fault::StackOverflow { address: 0x200 })
    );
}

#[test]
fn machine_code_calls_are_skipped() {
    let mut chip8 = boot(&[0x01, 0x23, 0x60, 0x09]);
    assert_eq!(chip8.step(&mut NullSink), Ok(Step::Ignored(0x0123)));
    run(&mut chip8, 1);
    assert_eq!(chip8.v(0), Some(9));
}

#[test]
fn shift_flag_quirk() {
    // 0x200 LD V1, 0xC0
    // 0x202 SHL V1
    let program = [0x61, 0xC0, 0x81, 0x0E];

    let mut normalized = Chip8::seeded(0, Quirks::default());
    normalized.load_program(&program).unwrap();
    run(&mut normalized, 2);
    assert_eq!((normalized.v(1), normalized.v(0xF)), (Some(0x80), Some(1)));

    let mut masked = Chip8::seeded(
        0,
        Quirks {
            shift_flag: ShiftFlag::Masked,
        },
    );
    masked.load_program(&program).unwrap();
    run(&mut masked, 2);
    assert_eq!((masked.v(1), masked.v(0xF)), (Some(0x80), Some(0x80)));
}

#[test]
fn delay_loop_paced_by_ticks() {
    // 0x200 LD V0, 3
    // 0x202 LD DT, V0
    // 0x204 LD V1, DT
    // 0x206 SE V1, 0
    // 0x208 JP 0x204
    // 0x20A JP 0x20A
    let mut chip8 = boot(&[
        0x60, 0x03, 0xF0, 0x15, 0xF1, 0x07, 0x31, 0x00, 0x12, 0x04, 0x12, 0x0A,
    ]);

    let start = Instant::now();
    let mut pacer = Pacer::new(Duration::from_millis(10), start);
    let mut now = start;
    let mut ticks = 0;
    // Ten instructions per simulated millisecond
    for _ in 0..100 {
        for _ in 0..10 {
            chip8.step(&mut NullSink).unwrap();
        }
        now += Duration::from_millis(1);
        if pacer.poll(now) {
            chip8.tick();
            ticks += 1;
        }
        if chip8.pc() == 0x20A {
            break;
        }
    }
    assert_eq!(chip8.pc(), 0x20A);
    assert_eq!(ticks, 3);
    assert_eq!(chip8.delay_timer(), 0);
}

#[test]
fn random_masks_are_reproducible() {
    let program = [0xC0, 0x0F, 0xC1, 0xF0, 0xC2, 0xFF];
    let mut a = boot(&program);
    let mut b = boot(&program);
    run(&mut a, 3);
    run(&mut b, 3);
    assert_eq!(a.v(0).map(|v| v & 0xF0), Some(0));
    assert_eq!(a.v(1).map(|v| v & 0x0F), Some(0));
    for x in 0..3 {
        assert_eq!(a.v(x), b.v(x));
    }
}

#[test]
fn frame_is_the_full_screen() {
    let chip8 = Chip8::new();
    let frame = chip8.frame();
    assert_eq!(frame.len(), DISPLAY_HEIGHT);
    assert_eq!(frame[0].len(), DISPLAY_WIDTH);
    assert_eq!(DISPLAY_WIDTH * DISPLAY_HEIGHT, 2048);
}

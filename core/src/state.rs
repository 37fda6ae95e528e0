use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET,
    STACK_DEPTH,
};

/// The FrameBuffer is indexed as [y][x]; every cell is either 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Held status of each key on the hexadecimal keypad; 1 if held since the last tick
pub type KeyLines = [u8; KEY_COUNT];

/// The machine state operated on by the CPU
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register for carry, borrow, shifted-out bits and collisions
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Pointer
/// - (sp) the number of return addresses on the stack, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound) that count down towards 0 once per tick
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory, the sprite sheet lives at 0x000..0x050
/// - 64x32 frame buffer
///
/// ## Input
/// - 16 key lines, asserted by the keyboard and cleared once per tick
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub keys: KeyLines,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            keys: [0; KEY_COUNT],
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_sheet_at_zero() {
        let state = State::new();
        assert_eq!(state.memory[..80], SPRITE_SHEET[..]);
        assert!(state.memory[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_starts_at_program() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.i, 0);
    }

    #[test]
    fn test_starts_blank() {
        let state = State::new();
        assert!(state.frame_buffer.iter().flatten().all(|&px| px == 0));
        assert_eq!(state.keys, [0; KEY_COUNT]);
        assert_eq!((state.delay_timer, state.sound_timer), (0, 0));
    }
}

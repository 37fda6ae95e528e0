use std::io::Read;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::{KEY_COUNT, LAST_FETCH_ADDRESS, MAX_ROM_SIZE, PROGRAM_START};
use crate::error::{Fault, LoadError};
use crate::instruction::{from_op, Context, Step};
use crate::opcode;
use crate::quirks::Quirks;
use crate::sink::FrameSink;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`, which it alone owns
///  - the random source used by CXKK
///  - the `quirks` it was built with
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing keys
/// - advancing the CPU one instruction
/// - ticking its timers
/// - inspecting its frame buffer, timers and registers
pub struct Chip8 {
    state: State,
    rng: Box<dyn RngCore>,
    quirks: Quirks,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_quirks(Quirks::default())
    }

    /// A machine whose random source is seeded from the operating system
    pub fn with_quirks(quirks: Quirks) -> Self {
        Self::with_rng(Box::new(StdRng::from_entropy()), quirks)
    }

    /// A machine that draws its random numbers from `rng`
    ///
    /// # Arguments
    /// * `rng` the random source; seed it for reproducible runs
    /// * `quirks` the interpreter behaviours to emulate
    pub fn with_rng(rng: Box<dyn RngCore>, quirks: Quirks) -> Self {
        Chip8 {
            state: State::new(),
            rng,
            quirks,
        }
    }

    /// A machine with a reproducible random source
    pub fn seeded(seed: u64, quirks: Quirks) -> Self {
        Self::with_rng(Box::new(StdRng::seed_from_u64(seed)), quirks)
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader that yields the raw program bytes
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        // Read one byte more than fits so oversized roms can be told apart
        reader
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut rom)?;
        self.load_program(&rom)
    }

    /// Copy a program into memory at 0x200, leaving memory untouched if it doesn't fit
    pub fn load_program(&mut self, program: &[u8]) -> Result<usize, LoadError> {
        if program.len() > MAX_ROM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = usize::from(PROGRAM_START);
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        tracing::info!("loaded {} byte program at {:03X}", program.len(), start);
        Ok(program.len())
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Assert the line for `key`; it stays held until the next tick
    ///
    /// # Arguments
    /// * `key` the keypad key, 0x0..=0xF
    pub fn key_press(&mut self, key: u8) {
        match self.state.keys.get_mut(usize::from(key)) {
            Some(line) => *line = 0x1,
            None => tracing::warn!("key {:#04X} is not on the keypad", key),
        }
    }

    /// Advances the CPU by a single instruction
    /// - fetches the opcode at the pc and moves the pc past it
    /// - executes it, replacing the state with the one it produces
    /// - hands the frame to `sink` if the instruction changed it
    ///
    /// A faulting instruction produces no state, so the machine is left exactly as it was
    /// with the pc pointing at the offending instruction.
    pub fn step(&mut self, sink: &mut dyn FrameSink) -> Result<Step, Fault> {
        let address = self.state.pc;
        let op = self.get_op()?;
        tracing::trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            address
        );

        let operation = from_op(op).ok_or(Fault::UnknownOpcode {
            opcode: op,
            address,
        })?;

        let fetched = State {
            pc: address + 0x2,
            ..self.state
        };
        let mut ctx = Context {
            rng: self.rng.as_mut(),
            quirks: self.quirks,
        };
        let (state, step) = operation(op, &fetched, &mut ctx)?;
        self.state = state;

        if step == Step::Redraw {
            sink.present(&self.state.frame_buffer);
        }
        Ok(step)
    }

    /// Handles one tick of the fixed external clock
    /// - decrements the delay and sound timers towards 0
    /// - releases every key line
    pub fn tick(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
        self.state.keys = [0; KEY_COUNT];
    }

    /// Whether the program is asking for a tone
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn i(&self) -> u16 {
        self.state.i
    }

    /// The value of register V`x`, if there is such a register
    pub fn v(&self, x: usize) -> Option<u8> {
        self.state.v.get(x).copied()
    }

    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16, Fault> {
        let pc = self.state.pc;
        if pc > LAST_FETCH_ADDRESS {
            return Err(Fault::ProgramCounterOutOfRange { pc });
        }
        let pc = usize::from(pc);
        Ok(opcode::from_bytes(
            self.state.memory[pc],
            self.state.memory[pc + 1],
        ))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

use thiserror::Error;

/// Failure to place a program image into memory. Nothing has executed when this is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM is too large ({size} bytes), at most {max} bytes fit from 0x200")]
    TooLarge { size: usize, max: usize },

    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),
}

/// A state the machine cannot execute from. Each one ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("unknown opcode {opcode:#06X} at {address:#05X}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error("call at {address:#05X} with a full stack")]
    StackOverflow { address: u16 },

    #[error("return at {address:#05X} with an empty stack")]
    StackUnderflow { address: u16 },

    #[error("program counter {pc:#06X} is outside of fetchable memory")]
    ProgramCounterOutOfRange { pc: u16 },

    #[error("opcode {opcode:#06X} accesses memory at {address:#06X}, past the end of memory")]
    MemoryOutOfBounds { opcode: u16, address: usize },

    #[error("key {key:#04X} is not on the keypad")]
    KeyOutOfRange { key: u8 },
}

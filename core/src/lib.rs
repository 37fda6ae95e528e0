pub use chip8::Chip8;
pub use error::{Fault, LoadError};
pub use instruction::Step;
pub use pacer::Pacer;
pub use quirks::{Quirks, ShiftFlag};
pub use sink::{FrameSink, NullSink, RecordingSink};
pub use state::FrameBuffer;

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
mod pacer;
mod quirks;
mod sink;
pub mod state;

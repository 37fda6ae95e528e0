use rand::RngCore;

use crate::error::Fault;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::quirks::Quirks;
use crate::state::State;

/// What executing a single instruction did, beyond producing the next state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The instruction ran
    Continue,
    /// The instruction ran and changed the frame buffer
    Redraw,
    /// No key was held, the program counter was rewound so the same instruction runs again
    AwaitingKey,
    /// A call to a native machine code routine; there is no native code to run so nothing happened
    Ignored(u16),
}

/// The state after an instruction and what happened, or the fault that stopped it.
/// A faulting instruction produces no state, so the previous one stands.
pub type Outcome = Result<(State, Step), Fault>;

/// Everything an instruction may need besides the machine state
pub struct Context<'a> {
    pub rng: &'a mut dyn RngCore,
    pub quirks: Quirks,
}

/// An instruction's semantics as a transition from one state to the next.
/// The program counter of `state` has already been moved past the instruction.
pub type Operation = fn(op: u16, state: &State, ctx: &mut Context<'_>) -> Outcome;

/// Selects the Operation for a given Opcode, or None if the opcode is undefined
pub fn from_op(op: u16) -> Option<Operation> {
    let operation: Operation = match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => clr,
        (0x0, 0x0, 0xE, 0xE) => rts,
        (0x0, ..) => sys,
        (0x1, ..) => jump,
        (0x2, ..) => call,
        (0x3, ..) => ske,
        (0x4, ..) => skne,
        (0x5, .., 0x0) => skre,
        (0x6, ..) => load,
        (0x7, ..) => add,
        (0x8, .., 0x0) => mv,
        (0x8, .., 0x1) => or,
        (0x8, .., 0x2) => and,
        (0x8, .., 0x3) => xor,
        (0x8, .., 0x4) => addr,
        (0x8, .., 0x5) => sub,
        (0x8, .., 0x6) => shr,
        (0x8, .., 0x7) => subn,
        (0x8, .., 0xE) => shl,
        (0x9, .., 0x0) => skrne,
        (0xA, ..) => loadi,
        (0xB, ..) => jumpi,
        (0xC, ..) => rand,
        (0xD, ..) => draw,
        (0xE, .., 0x9, 0xE) => skpr,
        (0xE, .., 0xA, 0x1) => skup,
        (0xF, .., 0x0, 0x7) => moved,
        (0xF, .., 0x0, 0xA) => keyd,
        (0xF, .., 0x1, 0x5) => loads,
        (0xF, .., 0x1, 0x8) => ld,
        (0xF, .., 0x1, 0xE) => addi,
        (0xF, .., 0x2, 0x9) => ldspr,
        (0xF, .., 0x3, 0x3) => bcd,
        (0xF, .., 0x5, 0x5) => stor,
        (0xF, .., 0x6, 0x5) => read,
        _ => return None,
    };
    Some(operation)
}

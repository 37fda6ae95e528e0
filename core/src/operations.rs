use std::ops::Range;

use rand::Rng;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG, GLYPH_SIZE, MEMORY_SIZE, STACK_DEPTH};
use crate::error::Fault;
use crate::instruction::{Context, Outcome, Step};
use crate::opcode::Opcode;
use crate::state::State;

/// Address of the instruction being executed; the pc has already moved past it
fn here(state: &State) -> u16 {
    state.pc.wrapping_sub(0x2)
}

/// The memory cells `start..start + len`, if they all exist
fn span(op: u16, start: u16, len: usize) -> Result<Range<usize>, Fault> {
    let start = usize::from(start);
    let end = start + len;
    if len > 0 && end > MEMORY_SIZE {
        return Err(Fault::MemoryOutOfBounds {
            opcode: op,
            address: end - 1,
        });
    }
    Ok(start..end)
}

fn key_held(state: &State, key: u8) -> Result<bool, Fault> {
    state
        .keys
        .get(usize::from(key))
        .map(|&line| line != 0x0)
        .ok_or(Fault::KeyOutOfRange { key })
}

fn next(state: State) -> Outcome {
    Ok((state, Step::Continue))
}

/// pc += 2 when `condition` holds, stepping over the next instruction
fn skip_if(state: &State, condition: bool) -> Outcome {
    let pc = if condition {
        state.pc.wrapping_add(0x2)
    } else {
        state.pc
    };
    next(State { pc, ..*state })
}

/// call a native routine at addr; ignored
pub fn sys(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    tracing::debug!("ignoring machine code call {:04X} at {:03X}", op, here(state));
    Ok((*state, Step::Ignored(op)))
}

/// clear
pub fn clr(_op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let cleared = State {
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        ..*state
    };
    Ok((cleared, Step::Redraw))
}

/// PC = STACK.pop()
pub fn rts(_op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let sp = state.sp.checked_sub(0x1).ok_or(Fault::StackUnderflow {
        address: here(state),
    })?;
    next(State {
        pc: state.stack[usize::from(sp)],
        sp,
        ..*state
    })
}

/// PC = addr
pub fn jump(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    next(State {
        pc: op.addr(),
        ..*state
    })
}

/// STACK.push(PC); PC = addr
pub fn call(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let depth = usize::from(state.sp);
    if depth >= STACK_DEPTH {
        return Err(Fault::StackOverflow {
            address: here(state),
        });
    }
    let mut stack = state.stack;
    stack[depth] = state.pc;
    next(State {
        pc: op.addr(),
        sp: state.sp + 0x1,
        stack,
        ..*state
    })
}

/// if Vx == kk then pc += 2
pub fn ske(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    skip_if(state, state.v[op.x()] == op.kk())
}

/// if Vx != kk then pc += 2
pub fn skne(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    skip_if(state, state.v[op.x()] != op.kk())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    skip_if(state, state.v[op.x()] == state.v[op.y()])
}

/// Vx = kk
pub fn load(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let mut v = state.v;
    v[op.x()] = op.kk();
    next(State { v, ..*state })
}

/// Vx += kk
/// Overflow is dropped and VF is left alone
pub fn add(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let mut v = state.v;
    v[op.x()] = v[op.x()].wrapping_add(op.kk());
    next(State { v, ..*state })
}

/// Vx = Vy
pub fn mv(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let mut v = state.v;
    v[op.x()] = v[op.y()];
    next(State { v, ..*state })
}

/// Vx |= Vy
pub fn or(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let mut v = state.v;
    v[op.x()] |= v[op.y()];
    next(State { v, ..*state })
}

/// Vx &= Vy
pub fn and(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let mut v = state.v;
    v[op.x()] &= v[op.y()];
    next(State { v, ..*state })
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let mut v = state.v;
    v[op.x()] ^= v[op.y()];
    next(State { v, ..*state })
}

// The 8XY_ operations below write VF after Vx, so when x is F the flag is what remains.

/// Vx += Vy; VF = overflow
pub fn addr(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let (res, over) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    let mut v = state.v;
    v[op.x()] = res;
    v[FLAG] = u8::from(over);
    next(State { v, ..*state })
}

/// Vx -= Vy; VF = !underflow
pub fn sub(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let (res, under) = state.v[op.x()].overflowing_sub(state.v[op.y()]);
    let mut v = state.v;
    v[op.x()] = res;
    v[FLAG] = u8::from(!under);
    next(State { v, ..*state })
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let vx = state.v[op.x()];
    let mut v = state.v;
    v[op.x()] = vx >> 1;
    v[FLAG] = vx & 0x1;
    next(State { v, ..*state })
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let (res, under) = state.v[op.y()].overflowing_sub(state.v[op.x()]);
    let mut v = state.v;
    v[op.x()] = res;
    v[FLAG] = u8::from(!under);
    next(State { v, ..*state })
}

/// Vx <<= 1; VF = shifted out bit, see `ShiftFlag`
pub fn shl(op: u16, state: &State, ctx: &mut Context) -> Outcome {
    let vx = state.v[op.x()];
    let mut v = state.v;
    v[op.x()] = vx << 1;
    v[FLAG] = ctx.quirks.shift_flag.shl_flag(vx);
    next(State { v, ..*state })
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    skip_if(state, state.v[op.x()] != state.v[op.y()])
}

/// I = addr
pub fn loadi(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    next(State {
        i: op.addr(),
        ..*state
    })
}

/// PC = V0 + addr
pub fn jumpi(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    next(State {
        pc: op.addr() + u16::from(state.v[0x0]),
        ..*state
    })
}

/// Vx = rand_byte & kk
pub fn rand(op: u16, state: &State, ctx: &mut Context) -> Outcome {
    let rand_byte: u8 = ctx.rng.gen();
    let mut v = state.v;
    v[op.x()] = rand_byte & op.kk();
    next(State { v, ..*state })
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite in memory I..I+n onto the FrameBuffer at x, y.
/// The origin wraps around the screen but the sprite itself is clipped at the edges.
/// Sets VF if any lit pixel is erased.
pub fn draw(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let rows = span(op, state.i, usize::from(op.n()))?;
    let x0 = usize::from(state.v[op.x()]) % DISPLAY_WIDTH;
    let y0 = usize::from(state.v[op.y()]) % DISPLAY_HEIGHT;

    let mut frame_buffer = state.frame_buffer;
    let mut v = state.v;
    // Reset the flag (used for collision detection)
    v[FLAG] = 0x0;

    for (dy, address) in rows.enumerate() {
        let y = y0 + dy;
        if y >= DISPLAY_HEIGHT {
            break;
        }
        let sprite = state.memory[address];
        for dx in 0..(DISPLAY_WIDTH - x0).min(8) {
            let pixel = (sprite >> (7 - dx)) & 0x1;
            let cell = &mut frame_buffer[y][x0 + dx];
            v[FLAG] |= pixel & *cell;
            *cell ^= pixel;
        }
    }

    let drawn = State {
        v,
        frame_buffer,
        ..*state
    };
    Ok((drawn, Step::Redraw))
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let held = key_held(state, state.v[op.x()])?;
    skip_if(state, held)
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let held = key_held(state, state.v[op.x()])?;
    skip_if(state, !held)
}

/// Vx = DT
pub fn moved(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let mut v = state.v;
    v[op.x()] = state.delay_timer;
    next(State { v, ..*state })
}

/// Vx = first held key, or run this instruction again
pub fn keyd(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    match state.keys.iter().position(|&line| line != 0x0) {
        Some(key) => {
            let mut v = state.v;
            v[op.x()] = key as u8;
            next(State { v, ..*state })
        }
        None => {
            let waiting = State {
                pc: here(state),
                ..*state
            };
            Ok((waiting, Step::AwaitingKey))
        }
    }
}

/// DT = Vx
pub fn loads(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    next(State {
        delay_timer: state.v[op.x()],
        ..*state
    })
}

/// ST = Vx
pub fn ld(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    next(State {
        sound_timer: state.v[op.x()],
        ..*state
    })
}

/// I += Vx
pub fn addi(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    next(State {
        i: state.i.wrapping_add(u16::from(state.v[op.x()])),
        ..*state
    })
}

/// I = Vx * 5
/// Set I to the address of the glyph for Vx in the sprite sheet
pub fn ldspr(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    next(State {
        i: u16::from(state.v[op.x()]) * GLYPH_SIZE,
        ..*state
    })
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let cells = span(op, state.i, 3)?;
    let vx = state.v[op.x()];
    let mut memory = state.memory;
    memory[cells].copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
    next(State { memory, ..*state })
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let cells = span(op, state.i, op.x() + 1)?;
    let mut memory = state.memory;
    memory[cells].copy_from_slice(&state.v[..=op.x()]);
    next(State { memory, ..*state })
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: u16, state: &State, _ctx: &mut Context) -> Outcome {
    let cells = span(op, state.i, op.x() + 1)?;
    let mut v = state.v;
    v[..=op.x()].copy_from_slice(&state.memory[cells]);
    next(State { v, ..*state })
}

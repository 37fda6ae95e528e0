use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use vip8_core::constants::{CYCLE_DELAY_MICROS, TIMER_HZ};
use vip8_core::{Quirks, ShiftFlag};

#[derive(Parser, Debug)]
#[command(version, about = "Runs Chip-8 ROMs", long_about = None)]
pub struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Size multiplier for each pixel
    #[arg(short, long, default_value_t = 10)]
    scale: usize,

    /// Pause between instructions in microseconds; 0 runs unthrottled
    #[arg(short, long, default_value_t = CYCLE_DELAY_MICROS)]
    cycle_delay_us: u64,

    /// Timer ticks per second
    #[arg(short, long, default_value_t = TIMER_HZ)]
    timer_hz: u32,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Leave the shifted out bit of SHL in place (0x80) rather than normalizing it to 1
    #[arg(long)]
    masked_shift_flag: bool,
}

/// Settings for a single run
#[derive(Debug, Clone)]
pub struct Config {
    pub rom: PathBuf,
    pub scale: usize,
    pub cycle_delay: Duration,
    pub timer_hz: u32,
    pub seed: Option<u64>,
    pub quirks: Quirks,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let shift_flag = if args.masked_shift_flag {
            ShiftFlag::Masked
        } else {
            ShiftFlag::Normalized
        };
        Config {
            rom: args.rom,
            scale: args.scale.max(1),
            cycle_delay: Duration::from_micros(args.cycle_delay_us),
            timer_hz: args.timer_hz.max(1),
            seed: args.seed,
            quirks: Quirks { shift_flag },
        }
    }
}

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vip8_core::{Chip8, Pacer, Step};
use vip8_display::Display;

use crate::config::Config;
use crate::keymap::{keymap, QUIT_KEY};

pub fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let mut chip8: Chip8 = match config.seed {
        Some(seed) => Chip8::seeded(seed, config.quirks),
        None => Chip8::with_quirks(config.quirks),
    };

    // Load ROM; nothing runs unless it fits
    let file = File::open(&config.rom)?;
    let mut reader = BufReader::new(file);
    let size = chip8.load_rom(&mut reader)?;
    tracing::info!("running {} ({} bytes)", config.rom.display(), size);

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init()?;
    let mut display: Display = Display::new(&sdl, config.scale)?;
    let mut events = sdl.event_pump()?;

    // Set initial timing
    let cycle_time: Duration = config.cycle_delay;
    let mut pacer = Pacer::with_frequency(config.timer_hz, Instant::now());
    tracing::debug!("ticking timers every {:?}", pacer.interval());

    // Whether or not the cycle delay should be respected
    let mut fast_forward: bool = false;
    // Whether the program was last seen asking for a tone
    let mut tone: bool = false;

    'event: loop {
        // Handle input; key lines are only ever released by the timer tick
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (k, _) if k == QUIT_KEY => break 'event,
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(Keycode::Space),
                    ..
                } => fast_forward = false,
                _ => continue,
            };
        }

        // Update state
        match chip8.step(&mut display) {
            Ok(Step::Ignored(op)) => tracing::trace!("skipped {:04X}", op),
            Ok(_) => {}
            Err(fault) => {
                tracing::error!("halting: {}", fault);
                return Err(fault.into());
            }
        }

        if pacer.poll(Instant::now()) {
            chip8.tick();
        }

        // There is no audio device; tone changes are only logged
        if chip8.sound_active() != tone {
            tone = !tone;
            tracing::debug!("tone {}", if tone { "on" } else { "off" });
        }

        // Handle timing
        if !fast_forward && !cycle_time.is_zero() {
            std::thread::sleep(cycle_time);
        }
    }

    tracing::info!("quit");
    Ok(())
}

//! Encrypted Morse - terminal host
//!
//! Plays one panel on stdin/stdout. Each line is either a host command
//! (`activate`, `tick [n]`, `solve`, `status`, `quit`), an operator
//! command (`help`, `show`, `set`) or a remote command passed straight to
//! the panel (`submit .-..`, `toggle knob`, ...).
//! Panel logs are drained to stderr after every line.

use std::io::{self, BufRead, Write as _};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use encrypted_morse::config::{PanelConfig, DEFAULT_BINARY_TICK_US, DEFAULT_MORSE_TICK_US};
use encrypted_morse::console::{is_operator_command, run_operator};
use encrypted_morse::log_drain::drain_to;
use encrypted_morse::{
    BombWidgets, Feedback, Lamp, LampSample, LogStream, Panel, Verdict,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser, Debug)]
#[command(name = "panel", version = env!("VERSION_STRING"), about = "Play an Encrypted Morse panel in the terminal")]
struct Args {
    /// Bomb serial number
    #[arg(long, default_value = "AB3XE9")]
    serial: String,

    #[arg(long, default_value_t = 2)]
    batteries: u32,

    #[arg(long, default_value_t = 1)]
    ports: u32,

    /// RNG seed; drawn from the clock when absent
    #[arg(long, env = "MORSE_SEED")]
    seed: Option<u64>,

    /// Position-coded binary lamps
    #[arg(long)]
    colorblind: bool,

    /// Morse lamp sub-tick (ms)
    #[arg(long, default_value_t = DEFAULT_MORSE_TICK_US / 1_000)]
    morse_tick_ms: u32,

    /// Binary lamp sub-tick (ms)
    #[arg(long, default_value_t = DEFAULT_BINARY_TICK_US / 1_000)]
    binary_tick_ms: u32,

    /// Frame length used by `tick` (ms)
    #[arg(long, default_value_t = 50)]
    frame_ms: u64,
}

static CONFIG: PanelConfig = PanelConfig::new();
static LOG: LogStream = LogStream::new();

fn main() -> io::Result<()> {
    let args = Args::parse();

    for (name, value) in [("morse_tick_ms", args.morse_tick_ms), ("binary_tick_ms", args.binary_tick_ms)] {
        if let Some(param) = encrypted_morse::config::find_param(name) {
            if let Err(e) = param.set(&CONFIG, encrypted_morse::config::ParamValue::U32(value)) {
                eprintln!("{}: {}", name, e);
                std::process::exit(2);
            }
        }
    }
    CONFIG.set_colorblind(args.colorblind);

    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let widgets = BombWidgets::new(&args.serial, args.batteries, args.ports);
    let mut panel = Panel::new(&widgets, &mut rng, &CONFIG, &LOG);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "seed {}", seed)?;
    flush_log();

    let frame_us = args.frame_ms.saturating_mul(1_000);
    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();

        match words.next() {
            None => {}
            Some("quit") | Some("exit") => break,
            Some("activate") => panel.activate(),
            Some("tick") => {
                let frames: u32 = match words.next().map(str::parse::<u32>).transpose() {
                    Ok(n) => n.unwrap_or(1),
                    Err(e) => {
                        writeln!(out, "tick: {}", e)?;
                        continue;
                    }
                };
                for _ in 0..frames {
                    let sample = panel.advance(frame_us);
                    writeln!(out, "{}", render(&sample))?;
                }
            }
            Some("solve") => report(&mut out, panel.force_solve())?,
            Some("status") => {
                let wires = panel.wires();
                writeln!(
                    out,
                    "strikes={} solved={} knob={:?} wires={:?}/{:?}",
                    panel.strikes().count(),
                    panel.is_solved(),
                    panel.morse_source(),
                    wires[0],
                    wires[1]
                )?;
            }
            Some(name) if is_operator_command(name) => {
                let mut text = String::new();
                match run_operator(&line, &CONFIG, &mut text) {
                    Ok(()) => out.write_all(text.as_bytes())?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            Some(_) => match panel.command(&line) {
                Ok(feedback) => {
                    for fb in feedback {
                        report(&mut out, fb)?;
                    }
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
        }
        flush_log();
    }

    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn flush_log() {
    let mut text = String::new();
    drain_to(&LOG, &mut text);
    eprint!("{}", text);
}

fn report(out: &mut impl io::Write, fb: Feedback) -> io::Result<()> {
    if let Some(sound) = fb.sound {
        writeln!(out, "sound {:?}", sound)?;
    }
    match fb.verdict {
        Some(Verdict::Strike) => writeln!(out, "STRIKE"),
        Some(Verdict::Pass) => writeln!(out, "PASS"),
        None => Ok(()),
    }
}

fn lamp_char(lamp: Lamp) -> char {
    match lamp {
        Lamp::Off => '.',
        Lamp::Message => 'M',
        Lamp::Key => 'K',
        Lamp::Zero => '0',
        Lamp::One => '1',
    }
}

fn render(sample: &LampSample) -> String {
    format!(
        "morse[{}] binary[{}{}]",
        lamp_char(sample.morse),
        lamp_char(sample.binary[0]),
        lamp_char(sample.binary[1])
    )
}

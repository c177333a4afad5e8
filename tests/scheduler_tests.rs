//! Lamp timing tests

use encrypted_morse::config::PanelSettings;
use encrypted_morse::lamp::Lamp;
use encrypted_morse::morse::{self, Symbol};
use encrypted_morse::puzzle::{Puzzle, PuzzleInputs, HINT_BITS};
use encrypted_morse::scheduler::{
    Channel, ChannelState, MorseSource, SignalScheduler, Track, BINARY_IDLE_TICKS, MORSE_IDLE_TICKS,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// One step per call.
const UNIT: PanelSettings = PanelSettings { morse_tick_us: 1, binary_tick_us: 1, colorblind: false };

fn lit_pattern<T: Track + ?Sized>(idle: u8, track: &T, steps: usize) -> Vec<bool> {
    let mut channel = Channel::new(idle);
    (0..steps)
        .map(|_| {
            channel.advance(1, 1, track);
            channel.is_lit()
        })
        .collect()
}

fn puzzle(seed: u64) -> Puzzle {
    let inputs = PuzzleInputs { serial: "AB3XE9", batteries: 2, ports: 1 };
    Puzzle::generate(&inputs, &mut ChaCha8Rng::seed_from_u64(seed))
}

#[test]
fn test_single_dot_cycle() {
    let track = [Symbol::Dot];
    let pattern = lit_pattern(MORSE_IDLE_TICKS, &track[..], 30);

    let mut expected = vec![false; 13];
    expected.extend([true, false]);
    let expected: Vec<bool> = expected.iter().chain(expected.iter()).copied().collect();
    assert_eq!(pattern, expected);
}

#[test]
fn test_dash_and_gap_shapes() {
    let track = morse::parse("- .").unwrap();
    let pattern = lit_pattern(MORSE_IDLE_TICKS, &track[..], 13 + 4 + 4 + 2);
    assert!(pattern[..13].iter().all(|l| !l));
    assert_eq!(&pattern[13..17], &[true, true, true, false]);
    assert_eq!(&pattern[17..21], &[false; 4]);
    assert_eq!(&pattern[21..], &[true, false]);
}

#[test]
fn test_binary_cycle_length() {
    let p = puzzle(1);
    let steps = BINARY_IDLE_TICKS as usize + 2 * HINT_BITS;
    let pattern = lit_pattern(BINARY_IDLE_TICKS, p.hint_a(), steps);
    assert_eq!(pattern.iter().filter(|l| **l).count(), HINT_BITS);
    assert!(pattern[..10].iter().all(|l| !l));

    // Next cycle starts dark again
    let mut channel = Channel::new(BINARY_IDLE_TICKS);
    for _ in 0..steps {
        channel.advance(1, 1, p.hint_a());
    }
    assert_eq!(channel.state(), ChannelState::START);
}

#[test]
fn test_binary_lamps_show_hint_a() {
    for colorblind in [false, true] {
        let p = puzzle(9);
        let settings = PanelSettings { colorblind, ..UNIT };
        let mut scheduler = SignalScheduler::new();

        let mut bits = Vec::new();
        for _ in 0..(10 + 2 * HINT_BITS) {
            let frame = scheduler.advance(1, &settings, &p);
            if let Some(bit) = frame.binary_bit() {
                if colorblind {
                    assert_eq!(frame.binary[usize::from(!bit)], Lamp::Off);
                } else {
                    assert_eq!(frame.binary[0], frame.binary[1]);
                }
                bits.push(bit);
            }
        }
        assert_eq!(bits, p.hint_a().bits().to_vec());
    }
}

#[test]
fn test_frames_accumulate_to_sub_ticks() {
    let p = puzzle(2);
    let settings = PanelSettings { morse_tick_us: 150_000, binary_tick_us: 200_000, colorblind: false };
    let mut scheduler = SignalScheduler::new();

    let frames: Vec<_> = (0..12).map(|_| scheduler.advance(50_000, &settings, &p)).collect();
    let morse_steps = frames.iter().filter(|f| f.morse_stepped()).count();
    let binary_steps = frames.iter().filter(|f| f.binary_stepped()).count();
    assert_eq!(morse_steps, 4);
    assert_eq!(binary_steps, 3);
}

#[test]
fn test_knob_switches_stream_and_restarts() {
    let p = puzzle(4);
    let mut scheduler = SignalScheduler::new();
    for _ in 0..20 {
        scheduler.advance(1, &UNIT, &p);
    }

    assert_eq!(scheduler.toggle_source(), MorseSource::Key);
    assert_eq!(scheduler.morse().state(), ChannelState::START);

    let lamps: Vec<Lamp> = (0..40).map(|_| scheduler.advance(1, &UNIT, &p).morse).collect();
    assert!(lamps[..13].iter().all(|l| *l == Lamp::Off));
    assert!(lamps.iter().all(|l| matches!(l, Lamp::Off | Lamp::Key)));
    assert!(lamps.contains(&Lamp::Key));
}

#[test]
fn test_disable_keeps_position_enable_restarts() {
    let p = puzzle(6);
    let mut scheduler = SignalScheduler::new();
    for _ in 0..16 {
        scheduler.advance(1, &UNIT, &p);
    }
    let before = scheduler.morse().state();

    assert!(!scheduler.morse_mut().toggle());
    for _ in 0..10 {
        assert_eq!(scheduler.advance(1, &UNIT, &p).morse, Lamp::Off);
    }
    assert_eq!(scheduler.morse().state(), before);

    assert!(scheduler.morse_mut().toggle());
    assert_eq!(scheduler.morse().state(), ChannelState::START);
}

#[test]
fn test_huge_frame_saturates() {
    let p = puzzle(12);
    let settings = PanelSettings { morse_tick_us: 150_000, binary_tick_us: 200_000, colorblind: false };
    let mut scheduler = SignalScheduler::new();

    assert!(!scheduler.advance(1_000, &settings, &p).morse_stepped());
    let frame = scheduler.advance(u64::MAX, &settings, &p);
    assert!(frame.morse_stepped());
    assert!(frame.binary_stepped());
}

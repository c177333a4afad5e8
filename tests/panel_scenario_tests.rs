//! End-to-end panel sessions

use encrypted_morse::config::PanelConfig;
use encrypted_morse::console::{run_operator, ConsoleError};
use encrypted_morse::lamp::Lamp;
use encrypted_morse::log_drain::drain_to;
use encrypted_morse::logging::LogStream;
use encrypted_morse::matcher::MatcherState;
use encrypted_morse::morse::Symbol;
use encrypted_morse::scheduler::{ChannelState, MorseSource};
use encrypted_morse::strike::StrikeCode;
use encrypted_morse::{BombWidgets, Feedback, Panel, Press, Sound, Verdict, WireColor};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn new_panel<'a>(config: &'a PanelConfig, log: &'a LogStream, seed: u64) -> Panel<'a> {
    let widgets = BombWidgets::new("K7EIOU", 3, 3);
    Panel::new(&widgets, &mut ChaCha8Rng::seed_from_u64(seed), config, log)
}

fn press_for(symbol: Symbol) -> Press {
    match symbol {
        Symbol::Dash => Press::Dash,
        _ => Press::Dot,
    }
}

fn wrong_press(symbol: Symbol) -> Press {
    press_for(symbol.opposite())
}

#[test]
fn test_solve_by_presses() {
    let (config, log) = (PanelConfig::new(), LogStream::new());
    let mut panel = new_panel(&config, &log, 1);
    panel.activate();

    let response = panel.puzzle().response_morse().to_vec();
    let (last, rest) = response.split_last().unwrap();
    for (i, s) in rest.iter().enumerate() {
        let fb = panel.press(press_for(*s));
        assert_eq!(fb.verdict, None);
        assert_eq!(panel.matcher().state(), MatcherState::Awaiting { index: i + 1 });
    }

    let fb = panel.press(press_for(*last));
    assert_eq!(fb.verdict, Some(Verdict::Pass));
    assert_eq!(panel.strikes().count(), 0);
    assert_eq!(panel.wires(), [WireColor::Solved, WireColor::Solved]);
}

#[test]
fn test_wrong_symbol_strikes_and_restarts() {
    let (config, log) = (PanelConfig::new(), LogStream::new());
    let mut panel = new_panel(&config, &log, 2);
    panel.activate();

    let response = panel.puzzle().response_morse().to_vec();
    panel.press(press_for(response[0]));
    let fb = panel.press(wrong_press(response[1]));
    assert_eq!(fb, Feedback { sound: None, verdict: Some(Verdict::Strike) });
    assert_eq!(panel.strikes().last(), StrikeCode::WrongSymbol);
    assert_eq!(panel.strikes().data(), 1);
    assert_eq!(panel.matcher().state(), MatcherState::Awaiting { index: 0 });

    let mut text = String::new();
    drain_to(&log, &mut text);
    let expected = format!(
        "Entered {} as symbol #2, correct symbol is {}. Strike.",
        response[1].opposite().name(),
        response[1].name()
    );
    assert!(text.contains(&expected), "{}", text);

    // Full response still works from the top
    let mut last = Feedback::default();
    for s in &response {
        last = panel.press(press_for(*s));
    }
    assert!(last.is_pass());
    assert_eq!(panel.strikes().count(), 1);
}

#[test]
fn test_reset_rewinds_input_and_lamps() {
    let (config, log) = (PanelConfig::new(), LogStream::new());
    let mut panel = new_panel(&config, &log, 3);
    panel.activate();
    for _ in 0..30 {
        panel.advance(200_000);
    }

    let response = panel.puzzle().response_morse().to_vec();
    panel.press(press_for(response[0]));

    assert_eq!(panel.press(Press::Reset).sound, Some(Sound::Reset));
    assert_eq!(panel.matcher().state(), MatcherState::Awaiting { index: 0 });
    assert_eq!(panel.scheduler().morse().state(), ChannelState::START);
    assert_eq!(panel.scheduler().binary().state(), ChannelState::START);
}

#[test]
fn test_forced_solve_before_activation_still_strikes_inputs() {
    let (config, log) = (PanelConfig::new(), LogStream::new());
    let mut panel = new_panel(&config, &log, 11);
    assert!(panel.force_solve().is_pass());

    assert_eq!(panel.press(Press::Dash), Feedback { sound: None, verdict: Some(Verdict::Strike) });
    assert_eq!(panel.strikes().last(), StrikeCode::Unarmed);
    assert!(panel.advance(200_000).is_dark());
}

#[test]
fn test_knob_works_after_solve_switches_do_not() {
    let (config, log) = (PanelConfig::new(), LogStream::new());
    let mut panel = new_panel(&config, &log, 4);
    panel.activate();
    assert!(panel.force_solve().is_pass());

    assert_eq!(panel.press(Press::Knob).sound, Some(Sound::Switch));
    assert_eq!(panel.morse_source(), MorseSource::Key);

    assert_eq!(panel.press(Press::BinarySwitch).sound, Some(Sound::Switch));
    assert!(panel.scheduler().binary().is_enabled());

    let frame = panel.advance(150_000);
    assert_eq!(frame.morse, Lamp::One);
    assert!(frame.solved());
}

#[test]
fn test_switch_wire_colours() {
    let (config, log) = (PanelConfig::new(), LogStream::new());
    let mut panel = new_panel(&config, &log, 5);
    panel.activate();

    assert_eq!(panel.wires(), [WireColor::On, WireColor::On]);
    panel.press(Press::MorseSwitch);
    assert_eq!(panel.wires(), [WireColor::Off, WireColor::On]);
    panel.press(Press::BinarySwitch);
    assert_eq!(panel.wires(), [WireColor::Off, WireColor::Off]);

    for _ in 0..200 {
        assert!(panel.advance(200_000).is_dark());
    }
}

#[test]
fn test_remote_commands_drive_presses() {
    let (config, log) = (PanelConfig::new(), LogStream::new());
    let mut panel = new_panel(&config, &log, 6);
    panel.activate();

    let response: String = panel.puzzle().response_morse().iter().map(|s| s.as_char()).collect();

    let feedback = panel.command(&format!("submit {}", response)).unwrap();
    assert_eq!(feedback.len(), response.len());
    assert!(feedback.last().unwrap().is_pass());
    assert!(panel.is_solved());
}

#[test]
fn test_rejected_command_changes_nothing() {
    let (config, log) = (PanelConfig::new(), LogStream::new());
    let mut panel = new_panel(&config, &log, 7);
    panel.activate();

    assert_eq!(panel.command("submit .-x"), Err(ConsoleError::InvalidSymbol));
    assert_eq!(panel.command("toggle foo"), Err(ConsoleError::UnknownTarget));
    assert_eq!(panel.command(""), Err(ConsoleError::UnknownCommand));
    assert_eq!(panel.command("show"), Err(ConsoleError::UnknownCommand));
    assert_eq!(panel.command("set colorblind on"), Err(ConsoleError::UnknownCommand));
    assert!(!config.snapshot().colorblind);
    assert_eq!(panel.strikes().count(), 0);
    assert_eq!(panel.matcher().state(), MatcherState::Awaiting { index: 0 });
    assert_eq!(panel.morse_source(), MorseSource::Message);
}

#[test]
fn test_colorblind_setting_applies_live() {
    let (config, log) = (PanelConfig::new(), LogStream::new());
    let mut panel = new_panel(&config, &log, 8);
    panel.activate();

    let mut out = String::new();
    run_operator("set colorblind on", &config, &mut out).unwrap();
    assert_eq!(out, "colorblind=true\n");

    let mut seen = 0;
    for _ in 0..200 {
        let frame = panel.advance(200_000);
        if let Some(bit) = frame.binary_bit() {
            assert_eq!(frame.binary[usize::from(!bit)], Lamp::Off);
            seen += 1;
        }
    }
    assert!(seen > 0);
}

#[test]
fn test_panels_numbered_in_log() {
    let (config, log) = (PanelConfig::new(), LogStream::new());
    let first = new_panel(&config, &log, 9);
    let second = new_panel(&config, &log, 10);
    assert!(second.number() > first.number());

    let mut text = String::new();
    drain_to(&log, &mut text);
    assert!(text.contains(&format!("[Encrypted Morse #{}] Received key: {}", first.number(), first.puzzle().key())));
    assert!(text.contains(&format!("[Encrypted Morse #{}] Correct response: {}", second.number(), second.puzzle().response())));
    assert!(text.contains("First half of generated binary sequence will be reversed"));
}

//! Puzzle generation tests
//!
//! Checks the properties a player relies on to solve the panel, across
//! many seeds and widget combinations.

use encrypted_morse::morse::{self, Symbol};
use encrypted_morse::puzzle::{
    decrypt, restore, serial_hint, Puzzle, PuzzleInputs, FALLBACK_RESPONSE, HINT_BITS, VOCABULARY,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SERIALS: [&str; 5] = ["AB3XE9", "ZZ0QP1", "K7EIOU", "XYZ123", "9LM4R2"];

fn generate(serial: &str, batteries: u32, ports: u32, seed: u64) -> Puzzle {
    let inputs = PuzzleInputs { serial, batteries, ports };
    Puzzle::generate(&inputs, &mut ChaCha8Rng::seed_from_u64(seed))
}

fn for_each_puzzle(mut check: impl FnMut(&Puzzle)) {
    for seed in 0..60 {
        for (i, serial) in SERIALS.iter().enumerate() {
            let batteries = (seed % 4) as u32;
            let ports = (i % 3) as u32;
            check(&generate(serial, batteries, ports, seed));
        }
    }
}

#[test]
fn test_message_never_contains_gap() {
    for_each_puzzle(|p| {
        assert!(!p.message().contains(&Symbol::Gap), "gap in {}", morse::render(p.message()));
        assert!(p.message().len() <= HINT_BITS);
    });
}

#[test]
fn test_hints_recover_encrypted_call() {
    for_each_puzzle(|p| {
        let restored = restore(p.message(), p.hint_a(), p.hint_b());
        assert_eq!(morse::decode(&restored).as_deref(), Some(p.encrypted_call()));
    });
}

#[test]
fn test_key_decrypts_to_call() {
    for_each_puzzle(|p| {
        assert_eq!(p.key().len(), p.call().len());
        assert_eq!(decrypt(p.encrypted_call(), p.key()), p.call());
        assert_eq!(morse::decode(p.key_morse()).as_deref(), Some(p.key()));
    });
}

#[test]
fn test_response_follows_call() {
    let mut corrupted = 0;
    for_each_puzzle(|p| {
        match VOCABULARY.iter().find(|(call, _)| *call == p.call()) {
            Some((_, response)) => {
                assert!(!p.corrupted());
                assert_eq!(p.response(), *response);
            }
            None => {
                assert!(p.corrupted());
                assert_eq!(p.response(), FALLBACK_RESPONSE);
                corrupted += 1;
            }
        }
        assert_eq!(p.response_morse(), morse::encode(p.response(), false).as_slice());
        assert!(!p.response_morse().contains(&Symbol::Gap));
    });
    // 300 draws at 15%
    assert!(corrupted > 10 && corrupted < 100, "corrupted {}", corrupted);
}

#[test]
fn test_corrupted_call_differs_by_one_letter() {
    for_each_puzzle(|p| {
        if !p.corrupted() {
            return;
        }
        let closest = VOCABULARY
            .iter()
            .map(|(call, _)| call.chars().zip(p.call().chars()).filter(|(a, b)| a != b).count())
            .min()
            .unwrap();
        assert_eq!(closest, 1, "{}", p.call());
    });
}

#[test]
fn test_hint_b_depends_only_on_widgets() {
    let a = generate("AB3XE9", 2, 1, 1);
    let b = generate("AB3XE9", 2, 1, 999);
    assert_eq!(a.hint_b(), b.hint_b());
    assert_eq!(*a.hint_b(), serial_hint("AB3XE9", false));
    assert!(!a.reversed());
}

#[test]
fn test_equal_batteries_and_ports_reverse_front_half() {
    let plain = generate("AB3XE9", 2, 1, 5);
    let reversed = generate("AB3XE9", 3, 3, 5);
    assert!(reversed.reversed());

    let p = plain.hint_b().bits();
    let r = reversed.hint_b().bits();
    for i in 0..21 {
        assert_eq!(r[i], p[20 - i]);
    }
    assert_eq!(r[21..], p[21..]);
}

#[test]
fn test_same_seed_same_puzzle() {
    let a = generate("K7EIOU", 1, 2, 77);
    let b = generate("K7EIOU", 1, 2, 77);
    assert_eq!(a.message(), b.message());
    assert_eq!(a.hint_a(), b.hint_a());
    assert_eq!(a.key(), b.key());
    assert_eq!(a.grouping(), b.grouping());
}

#[test]
fn test_unrecognized_serial_characters_reported() {
    let p = generate("A#3XE9", 2, 1, 3);
    assert_eq!(p.anomalies(), &['#']);
    assert_eq!(*p.hint_b(), serial_hint("AQ3XE9", false));
}

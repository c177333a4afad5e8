//! Puzzle generation.
//!
//! Runs once per session. Produces an immutable [`Puzzle`] from the
//! bomb's serial number, battery and port counts, and a random source.
//!
//! # Pipeline
//!
//! ```text
//! rng ──▶ hint A (42 random bits) ─────────────────────┐
//! serial, batteries, ports ──▶ hint B (42 bits) ───────┤
//! rng ──▶ call/response ──▶ key ──▶ encrypted call     │
//!                                  │                    ▼
//!                                  └──▶ morse ──▶ gap elimination ──▶ message
//! ```
//!
//! The transmitted message never contains a letter gap. Hint A and hint B
//! together say, per position, whether the symbol was a gap, was swapped,
//! or is as sent (see [`restore`]).

use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;

use crate::morse::{self, Symbol};

/// Length of each hint sequence.
pub const HINT_BITS: usize = 42;

/// Bits contributed by one serial character.
pub const BITS_PER_CHAR: usize = 7;

/// Serial characters that fit in a hint sequence.
pub const SERIAL_CHARS: usize = HINT_BITS / BITS_PER_CHAR;

/// Bits reversed when battery count equals port count.
pub const REVERSED_BITS: usize = HINT_BITS / 2;

/// Probability that the call is corrupted.
pub const CORRUPTION_CHANCE: f64 = 0.15;

/// Call/response pairs. Every call is eight letters.
pub const VOCABULARY: [(&str, &str); 7] = [
    ("DETONATE", "PLEASENO"),
    ("READYNOW", "CHEESECAKE"),
    ("WEREDEAD", "SADFACE"),
    ("SHESELLS", "SEASHELLS"),
    ("REMEMBER", "SOUVENIR"),
    ("GREATJOB", "THANKYOU"),
    ("SOLOTHIS", "IDAREYOU"),
];

/// Response when the call matches nothing in [`VOCABULARY`].
pub const FALLBACK_RESPONSE: &str = "EXCUSEME";

const VOWEL_PATTERN: u8 = 0b101_1001;
const EARLY_CONSONANT_PATTERN: u8 = 0b110_0010;
const LATE_CONSONANT_PATTERN: u8 = 0b100_0100;

// ============================================================================
// Hint sequences
// ============================================================================

/// A fixed-length bit sequence.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HintSequence {
    bits: [bool; HINT_BITS],
}

impl HintSequence {
    /// All zeros.
    pub const ZERO: Self = Self { bits: [false; HINT_BITS] };

    /// Independent fair coin flips.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut seq = Self::ZERO;
        for bit in seq.bits.iter_mut() {
            *bit = rng.gen_bool(0.5);
        }
        seq
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, bit: bool) {
        self.bits[index] = bit;
    }

    pub fn bits(&self) -> &[bool; HINT_BITS] {
        &self.bits
    }

    /// Reverse the first `len` bits in place.
    pub fn reverse_front(&mut self, len: usize) {
        self.bits[..len.min(HINT_BITS)].reverse();
    }

    /// `0`/`1` text, as logged.
    pub fn render(&self) -> String {
        self.bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
    }
}

impl core::fmt::Debug for HintSequence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "HintSequence({})", self.render())
    }
}

/// How a serial character is classified for hint B.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerialClass {
    Digit(u8),
    Vowel,
    /// Consonant before O (B..=N).
    EarlyConsonant,
    /// Consonant after O (P..=Z).
    LateConsonant,
    /// Anything else. Encoded with the late-consonant pattern.
    Unrecognized,
}

impl SerialClass {
    /// Classify one serial character (case-insensitive).
    pub fn of(c: char) -> Self {
        match c.to_ascii_uppercase() {
            d @ '0'..='9' => SerialClass::Digit(d as u8 - b'0'),
            'A' | 'E' | 'I' | 'O' | 'U' => SerialClass::Vowel,
            'B'..='N' => SerialClass::EarlyConsonant,
            'P'..='Z' => SerialClass::LateConsonant,
            _ => SerialClass::Unrecognized,
        }
    }

    /// The 7-bit pattern, MSB first.
    pub fn pattern(self) -> u8 {
        match self {
            SerialClass::Digit(d) => d,
            SerialClass::Vowel => VOWEL_PATTERN,
            SerialClass::EarlyConsonant => EARLY_CONSONANT_PATTERN,
            SerialClass::LateConsonant | SerialClass::Unrecognized => LATE_CONSONANT_PATTERN,
        }
    }
}

/// Hint B: seven bits per serial character, first half reversed when
/// `reverse_front` is set.
///
/// Only the first [`SERIAL_CHARS`] characters count. Missing characters
/// leave their bits at zero.
pub fn serial_hint(serial: &str, reverse_front: bool) -> HintSequence {
    let mut seq = HintSequence::ZERO;
    for (slot, c) in serial.chars().take(SERIAL_CHARS).enumerate() {
        let pattern = SerialClass::of(c).pattern();
        for bit in 0..BITS_PER_CHAR {
            let mask = 1 << (BITS_PER_CHAR - 1 - bit);
            seq.set(slot * BITS_PER_CHAR + bit, pattern & mask != 0);
        }
    }
    if reverse_front {
        seq.reverse_front(REVERSED_BITS);
    }
    seq
}

// ============================================================================
// Cipher
// ============================================================================

/// Shift amount of a key letter: A = 1 through Z = 26.
#[inline]
pub fn shift(key_letter: char) -> u8 {
    (key_letter.to_ascii_uppercase() as u8)
        .wrapping_sub(b'A')
        .wrapping_add(1)
        % 26
}

fn rotate(letter: char, by: u8, forward: bool) -> char {
    let base = (letter.to_ascii_uppercase() as u8).wrapping_sub(b'A') % 26;
    let by = by % 26;
    let rotated = if forward { (base + by) % 26 } else { (base + 26 - by) % 26 };
    char::from(b'A' + rotated)
}

/// Shift each call letter back by its key letter.
pub fn encrypt(call: &str, key: &str) -> String {
    call.chars()
        .zip(key.chars())
        .map(|(c, k)| rotate(c, shift(k), false))
        .collect()
}

/// Inverse of [`encrypt`].
pub fn decrypt(encrypted: &str, key: &str) -> String {
    encrypted
        .chars()
        .zip(key.chars())
        .map(|(c, k)| rotate(c, shift(k), true))
        .collect()
}

// ============================================================================
// Gap elimination
// ============================================================================

/// Remove every letter gap from `morse`, rewriting hint A so the original
/// symbol stays recoverable with [`restore`].
///
/// Each position depends only on its own symbol and hint bits. Positions
/// past [`HINT_BITS`] are left alone.
pub fn eliminate_gaps(morse: &mut [Symbol], hint_a: &mut HintSequence, hint_b: &HintSequence) {
    for (i, symbol) in morse.iter_mut().enumerate().take(HINT_BITS) {
        let a = hint_a.get(i);
        let b = hint_b.get(i);

        match *symbol {
            Symbol::Gap => {
                *symbol = Symbol::from_bit(b);
                hint_a.set(i, b);
            }
            // Swap position
            s if !a && b => *symbol = s.opposite(),
            // A dot with A = B = 0 would read as a gap
            Symbol::Dot if !b => hint_a.set(i, true),
            // A dash with A = B = 1 would read as a gap; make it a swap
            Symbol::Dash if b => {
                hint_a.set(i, false);
                *symbol = Symbol::Dot;
            }
            _ => {}
        }
    }
}

/// Recover the pre-elimination symbol at every position.
///
/// Symbol, A and B all equal: a gap. Otherwise A = 0, B = 1: swapped.
/// Otherwise: as sent.
pub fn restore(stream: &[Symbol], hint_a: &HintSequence, hint_b: &HintSequence) -> Vec<Symbol> {
    stream
        .iter()
        .enumerate()
        .map(|(i, &symbol)| {
            if i >= HINT_BITS {
                return symbol;
            }
            let a = hint_a.get(i);
            let b = hint_b.get(i);
            match symbol.bit() {
                Some(s) if s == a && a == b => Symbol::Gap,
                _ if !a && b => symbol.opposite(),
                _ => symbol,
            }
        })
        .collect()
}

// ============================================================================
// Generator
// ============================================================================

/// Values read from the bomb once, at generation time.
#[derive(Clone, Copy, Debug)]
pub struct PuzzleInputs<'a> {
    pub serial: &'a str,
    pub batteries: u32,
    pub ports: u32,
}

impl PuzzleInputs<'_> {
    /// Hint B's first half is reversed when these match.
    pub fn reverses_front(&self) -> bool {
        self.batteries == self.ports
    }
}

/// Everything hidden on the panel for one session.
#[derive(Clone, Debug)]
pub struct Puzzle {
    hint_a: HintSequence,
    hint_b: HintSequence,
    message: Vec<Symbol>,
    key_morse: Vec<Symbol>,
    response_morse: Vec<Symbol>,
    call: String,
    response: &'static str,
    key: String,
    encrypted_call: String,
    grouping: String,
    reversed: bool,
    corrupted: bool,
    anomalies: Vec<char>,
}

impl Puzzle {
    /// Run the full generation pipeline.
    pub fn generate<R: Rng + ?Sized>(inputs: &PuzzleInputs<'_>, rng: &mut R) -> Self {
        let mut hint_a = HintSequence::random(rng);

        let reversed = inputs.reverses_front();
        let hint_b = serial_hint(inputs.serial, reversed);
        let anomalies = inputs
            .serial
            .chars()
            .take(SERIAL_CHARS)
            .filter(|c| SerialClass::of(*c) == SerialClass::Unrecognized)
            .collect();

        let (call, response, corrupted) = choose_call(rng);

        let key: String = call
            .chars()
            .map(|_| char::from(b'A' + rng.gen_range(0..26u8)))
            .collect();
        let encrypted_call = encrypt(&call, &key);

        let mut message = morse::encode(&encrypted_call, true);
        debug_assert!(message.len() <= HINT_BITS);
        eliminate_gaps(&mut message, &mut hint_a, &hint_b);

        let grouping = morse::tokenize(&message, rng).letters;

        Self {
            hint_a,
            hint_b,
            key_morse: morse::encode(&key, true),
            response_morse: morse::encode(response, false),
            message,
            call,
            response,
            key,
            encrypted_call,
            grouping,
            reversed,
            corrupted,
            anomalies,
        }
    }

    /// Hint A as transmitted on the binary channel.
    pub fn hint_a(&self) -> &HintSequence {
        &self.hint_a
    }

    /// Hint B as derived from the serial number.
    pub fn hint_b(&self) -> &HintSequence {
        &self.hint_b
    }

    /// Gap-free message stream.
    pub fn message(&self) -> &[Symbol] {
        &self.message
    }

    /// Key as Morse, with letter gaps.
    pub fn key_morse(&self) -> &[Symbol] {
        &self.key_morse
    }

    /// The response to enter, without letter gaps.
    pub fn response_morse(&self) -> &[Symbol] {
        &self.response_morse
    }

    pub fn call(&self) -> &str {
        &self.call
    }

    pub fn response(&self) -> &'static str {
        self.response
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn encrypted_call(&self) -> &str {
        &self.encrypted_call
    }

    /// One arbitrary letter reading of the message. Diagnostics only.
    pub fn grouping(&self) -> &str {
        &self.grouping
    }

    /// Whether hint B's first half was reversed.
    pub fn reversed(&self) -> bool {
        self.reversed
    }

    /// Whether the call was corrupted (response is the fallback).
    pub fn corrupted(&self) -> bool {
        self.corrupted
    }

    /// Serial characters that fell back to the late-consonant pattern.
    pub fn anomalies(&self) -> &[char] {
        &self.anomalies
    }
}

/// Pick a vocabulary pair, corrupting one call letter with
/// [`CORRUPTION_CHANCE`].
fn choose_call<R: Rng + ?Sized>(rng: &mut R) -> (String, &'static str, bool) {
    let (call, response) = VOCABULARY[rng.gen_range(0..VOCABULARY.len())];
    let mut call = String::from(call);

    if !rng.gen_bool(CORRUPTION_CHANCE) {
        return (call, response, false);
    }

    let index = rng.gen_range(0..call.len());
    let original = call.as_bytes()[index];
    // 25 choices, skipping the original letter
    let mut replacement = b'A' + rng.gen_range(0..25u8);
    if replacement >= original {
        replacement += 1;
    }
    call.replace_range(index..=index, char::from(replacement).encode_utf8(&mut [0; 4]));

    (call, FALLBACK_RESPONSE, true)
}

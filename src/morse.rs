//! Morse codec for the A–Z alphabet.
//!
//! Pure logic, no timing. Letters map to dot/dash sequences, and a
//! prefix tree built at compile time answers "which letters can be read
//! off the front of this stream" for the randomized tokenizer.
//!
//! # Ambiguity
//!
//! Morse is not prefix-free: `.` (E), `..` (I), `...` (S) and `....` (H)
//! are all letters. Without letter gaps a stream has many valid
//! groupings; [`maximal_munch`] reports every one reachable from the
//! front and [`tokenize`] picks one at random.

use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;

/// One Morse symbol.
///
/// Discriminants are the wire values used by hint decoding
/// (dot = 0, dash = 1, letter gap = 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Symbol {
    Dot = 0,
    Dash = 1,
    Gap = 2,
}

impl Symbol {
    /// Dot for `false`, dash for `true`.
    #[inline]
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Symbol::Dash
        } else {
            Symbol::Dot
        }
    }

    /// Swap dot and dash. A gap stays a gap.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Symbol::Dot => Symbol::Dash,
            Symbol::Dash => Symbol::Dot,
            Symbol::Gap => Symbol::Gap,
        }
    }

    /// Bit value of a dot (false) or dash (true); `None` for a gap.
    #[inline]
    pub fn bit(self) -> Option<bool> {
        match self {
            Symbol::Dot => Some(false),
            Symbol::Dash => Some(true),
            Symbol::Gap => None,
        }
    }

    /// Printable form: `.`, `-` or a space.
    pub fn as_char(self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
            Symbol::Gap => ' ',
        }
    }

    /// Inverse of [`Symbol::as_char`].
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            ' ' => Some(Symbol::Gap),
            _ => None,
        }
    }

    /// Human name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Dot => "dot(.)",
            Symbol::Dash => "dash(-)",
            Symbol::Gap => "gap( )",
        }
    }
}

const O: Symbol = Symbol::Dot;
const I: Symbol = Symbol::Dash;

/// Codes for A through Z, in order.
pub const CODES: [&[Symbol]; 26] = [
    &[O, I],       // A
    &[I, O, O, O], // B
    &[I, O, I, O], // C
    &[I, O, O],    // D
    &[O],          // E
    &[O, O, I, O], // F
    &[I, I, O],    // G
    &[O, O, O, O], // H
    &[O, O],       // I
    &[O, I, I, I], // J
    &[I, O, I],    // K
    &[O, I, O, O], // L
    &[I, I],       // M
    &[I, O],       // N
    &[I, I, I],    // O
    &[O, I, I, O], // P
    &[I, I, O, I], // Q
    &[O, I, O],    // R
    &[O, O, O],    // S
    &[I],          // T
    &[O, O, I],    // U
    &[O, O, O, I], // V
    &[O, I, I],    // W
    &[I, O, O, I], // X
    &[I, O, I, I], // Y
    &[I, I, O, O], // Z
];

/// Longest letter code, in symbols.
pub const MAX_CODE_LEN: usize = 4;

/// Code for a letter (case-insensitive). `None` outside A–Z.
pub fn code_for(letter: char) -> Option<&'static [Symbol]> {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some(CODES[(upper as u8 - b'A') as usize])
    } else {
        None
    }
}

/// Letter for an exact code, if any.
pub fn letter_for(code: &[Symbol]) -> Option<char> {
    MORSE_TRIE.lookup(code)
}

/// Encode text as Morse.
///
/// Characters outside A–Z (either case) are skipped. With `letter_gaps`,
/// a [`Symbol::Gap`] separates consecutive letters; there is never a
/// trailing gap.
pub fn encode(text: &str, letter_gaps: bool) -> Vec<Symbol> {
    let mut out = Vec::with_capacity(text.len() * (MAX_CODE_LEN + 1));
    for code in text.chars().filter_map(code_for) {
        if letter_gaps && !out.is_empty() {
            out.push(Symbol::Gap);
        }
        out.extend_from_slice(code);
    }
    out
}

/// Decode a gap-separated stream back to letters.
///
/// Returns `None` if any group is not a letter code (including empty
/// groups from doubled gaps).
pub fn decode(symbols: &[Symbol]) -> Option<String> {
    if symbols.is_empty() {
        return Some(String::new());
    }
    symbols
        .split(|s| *s == Symbol::Gap)
        .map(letter_for)
        .collect()
}

/// Render symbols as `.`/`-`/space text.
pub fn render(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| s.as_char()).collect()
}

/// Parse `.`/`-`/space text. `None` on any other character.
pub fn parse(text: &str) -> Option<Vec<Symbol>> {
    text.chars().map(Symbol::from_char).collect()
}

// ============================================================================
// Prefix tree
// ============================================================================

/// Nodes needed for every code up to four symbols (1 + 2 + 4 + 8 + 16).
const MAX_NODES: usize = 31;

/// Child slot value meaning "no child". The root is never a child.
const NO_CHILD: u8 = 0;

#[derive(Clone, Copy)]
struct Node {
    letter: Option<u8>,
    children: [u8; 2],
}

/// Binary prefix tree over the 26 letter codes (dot branch, dash branch).
pub struct MorseTrie {
    nodes: [Node; MAX_NODES],
}

/// The tree, built once at compile time from [`CODES`].
pub static MORSE_TRIE: MorseTrie = MorseTrie::build();

impl MorseTrie {
    /// Build the tree from [`CODES`].
    pub const fn build() -> Self {
        let mut nodes = [Node { letter: None, children: [NO_CHILD; 2] }; MAX_NODES];
        let mut used = 1;

        let mut letter = 0;
        while letter < CODES.len() {
            let code = CODES[letter];
            let mut node = 0;
            let mut depth = 0;
            while depth < code.len() {
                let branch = code[depth] as usize;
                if nodes[node].children[branch] == NO_CHILD {
                    nodes[node].children[branch] = used as u8;
                    used += 1;
                }
                node = nodes[node].children[branch] as usize;
                depth += 1;
            }
            nodes[node].letter = Some(b'A' + letter as u8);
            letter += 1;
        }

        Self { nodes }
    }

    /// Follow one symbol from `node`. Gaps have no branch.
    fn child(&self, node: usize, symbol: Symbol) -> Option<usize> {
        let branch = match symbol {
            Symbol::Dot => 0,
            Symbol::Dash => 1,
            Symbol::Gap => return None,
        };
        match self.nodes[node].children[branch] {
            NO_CHILD => None,
            next => Some(next as usize),
        }
    }

    /// Letter spelled by exactly `code`.
    pub fn lookup(&self, code: &[Symbol]) -> Option<char> {
        let mut node = 0;
        for &symbol in code {
            node = self.child(node, symbol)?;
        }
        self.nodes[node].letter.map(char::from)
    }

    /// Walk from the root along `symbols`, recording each depth that
    /// lands on a letter.
    pub fn munch(&self, symbols: &[Symbol]) -> Munch {
        let mut munch = Munch::default();
        let mut node = 0;
        for (i, &symbol) in symbols.iter().take(MAX_CODE_LEN).enumerate() {
            node = match self.child(node, symbol) {
                Some(next) => next,
                None => break,
            };
            if let Some(letter) = self.nodes[node].letter {
                munch.letters[i] = Some(char::from(letter));
                munch.depth = i + 1;
            }
        }
        munch
    }
}

/// Result of a maximal-munch walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Munch {
    /// Longest prefix length that is a letter (0 if none).
    pub depth: usize,
    /// Letter found at each prefix length `1..=4` (index `len - 1`).
    pub letters: [Option<char>; MAX_CODE_LEN],
}

impl Munch {
    /// Letter read by consuming `len` symbols.
    pub fn letter(&self, len: usize) -> Option<char> {
        len.checked_sub(1)
            .and_then(|i| self.letters.get(i).copied())
            .flatten()
    }

    /// Every valid prefix length, shortest first.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.letters
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_some())
            .map(|(i, _)| i + 1)
    }

    /// Letters at every valid depth, e.g. `"EIS"` for `...-`.
    pub fn chain(&self) -> String {
        self.letters.iter().flatten().collect()
    }
}

/// Longest letter readable from the front of a gap-free stream, plus the
/// letter at every shorter valid depth.
pub fn maximal_munch(symbols: &[Symbol]) -> Munch {
    MORSE_TRIE.munch(symbols)
}

/// A random letter grouping of a gap-free stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tokenized {
    /// The input with a gap appended after every letter taken.
    pub division: Vec<Symbol>,
    /// The letter chosen for each group.
    pub letters: String,
}

/// Split a dot/dash stream into letters, choosing each letter length
/// uniformly among the valid prefix lengths.
///
/// Every input symbol is consumed, so `division.len()` is the input
/// length plus one gap per letter. A stray gap in the input cannot start
/// a letter; it is consumed without producing one.
pub fn tokenize<R: Rng + ?Sized>(symbols: &[Symbol], rng: &mut R) -> Tokenized {
    let mut division = Vec::with_capacity(symbols.len() * 2);
    let mut letters = String::new();
    let mut rest = symbols;

    while !rest.is_empty() {
        let munch = maximal_munch(rest);
        let choices = munch.lengths().count();
        if choices == 0 {
            rest = &rest[1..];
            continue;
        }

        let pick = rng.gen_range(0..choices);
        let len = munch.lengths().nth(pick).unwrap_or(munch.depth);
        if let Some(letter) = munch.letter(len) {
            letters.push(letter);
        }

        division.extend_from_slice(&rest[..len]);
        division.push(Symbol::Gap);
        rest = &rest[len..];
    }

    Tokenized { division, letters }
}

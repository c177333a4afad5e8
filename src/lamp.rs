//! Module: lamp
//!
//! Purpose: LampSample, the panel's visible output for one frame.
//!
//! Architecture:
//! - Compact 4-byte structure, one per `Panel::advance` call
//! - Dark lamps are data (explicitly `Lamp::Off`)
//! - Rendering (materials, light colours) belongs to the host
//!
//! Safety: Safe. No unsafe blocks. Copy types only.

/// State of one indicator lamp.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lamp {
    #[default]
    Off = 0,
    /// Amber: message stream on the Morse lamp.
    Message = 1,
    /// Blue: key stream on the Morse lamp.
    Key = 2,
    /// Red: binary zero.
    Zero = 3,
    /// Green: binary one, and the Morse lamp once solved.
    One = 4,
}

impl Lamp {
    /// Colour for a binary digit.
    #[inline]
    pub const fn for_bit(bit: bool) -> Self {
        if bit {
            Lamp::One
        } else {
            Lamp::Zero
        }
    }

    #[inline]
    pub fn is_lit(self) -> bool {
        self != Lamp::Off
    }
}

/// A single frame of lamp output.
///
/// Memory layout:
/// ```text
/// [morse:1][binary0:1][binary1:1][flags:1] = 4 bytes
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LampSample {
    /// The Morse lamp.
    pub morse: Lamp,

    /// The two binary lamps.
    ///
    /// Normally both show the same colour. In colour-blind mode only the
    /// lamp whose index equals the bit lights up.
    pub binary: [Lamp; 2],

    /// Step markers. See FLAG_* constants.
    pub flags: u8,
}

impl LampSample {
    /// Every lamp dark, no flags.
    pub const DARK: Self = Self {
        morse: Lamp::Off,
        binary: [Lamp::Off; 2],
        flags: 0,
    };

    /// Frame shown once the response is entered: Morse lamp pinned green,
    /// binary lamps dark.
    pub const SOLVED: Self = Self {
        morse: Lamp::One,
        binary: [Lamp::Off; 2],
        flags: FLAG_SOLVED,
    };

    /// No lamp lit.
    pub fn is_dark(&self) -> bool {
        !self.morse.is_lit() && !self.binary.iter().any(|l| l.is_lit())
    }

    /// The bit shown on the binary lamps, if any.
    pub fn binary_bit(&self) -> Option<bool> {
        match self.binary {
            [Lamp::Zero, _] | [_, Lamp::Zero] => Some(false),
            [Lamp::One, _] | [_, Lamp::One] => Some(true),
            _ => None,
        }
    }

    /// The Morse channel took a step this frame.
    pub fn morse_stepped(&self) -> bool {
        (self.flags & FLAG_MORSE_STEP) != 0
    }

    /// The binary channel took a step this frame.
    pub fn binary_stepped(&self) -> bool {
        (self.flags & FLAG_BINARY_STEP) != 0
    }

    pub fn solved(&self) -> bool {
        (self.flags & FLAG_SOLVED) != 0
    }
}

// ============================================================================
// Sample Flags
// ============================================================================

/// Morse channel advanced one sub-tick this frame.
pub const FLAG_MORSE_STEP: u8 = 0x01;

/// Binary channel advanced one sub-tick this frame.
pub const FLAG_BINARY_STEP: u8 = 0x02;

/// Panel is solved; lamps are pinned.
pub const FLAG_SOLVED: u8 = 0x04;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lamp_sample_size() {
        assert_eq!(core::mem::size_of::<LampSample>(), 4);
    }

    #[test]
    fn test_dark_and_solved() {
        assert!(LampSample::DARK.is_dark());
        assert!(!LampSample::SOLVED.is_dark());
        assert!(LampSample::SOLVED.solved());
        assert_eq!(LampSample::SOLVED.binary_bit(), None);
    }

    #[test]
    fn test_binary_bit_either_coding() {
        let mut sample = LampSample::DARK;

        sample.binary = [Lamp::Zero, Lamp::Zero];
        assert_eq!(sample.binary_bit(), Some(false));

        sample.binary = [Lamp::Off, Lamp::One];
        assert_eq!(sample.binary_bit(), Some(true));

        sample.binary = [Lamp::Zero, Lamp::Off];
        assert_eq!(sample.binary_bit(), Some(false));
    }

    #[test]
    fn test_flag_checking() {
        let mut sample = LampSample::DARK;

        sample.flags = FLAG_MORSE_STEP;
        assert!(sample.morse_stepped());
        assert!(!sample.binary_stepped());

        sample.flags = FLAG_MORSE_STEP | FLAG_BINARY_STEP;
        assert!(sample.morse_stepped());
        assert!(sample.binary_stepped());
        assert!(!sample.solved());
    }
}

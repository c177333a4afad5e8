//! Strike bookkeeping for the panel.
//!
//! Strikes are not errors: they are the panel's normal answer to a wrong
//! input. The host decides what a strike costs; the panel only reports
//! them and keeps a tally for diagnostics.

/// Why a strike was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum StrikeCode {
    /// No strike recorded.
    None = 0,

    /// Dot or dash pressed before the session was activated.
    Unarmed = 1,

    /// Dot or dash that did not match the expected response symbol.
    WrongSymbol = 2,
}

/// Strike tally.
///
/// `data` carries the response index for [`StrikeCode::WrongSymbol`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StrikeLedger {
    code: Option<StrikeCode>,
    data: u32,
    count: u32,
}

impl StrikeLedger {
    pub const fn new() -> Self {
        Self { code: None, data: 0, count: 0 }
    }

    /// Record a strike.
    #[inline]
    pub fn record(&mut self, code: StrikeCode, data: u32) {
        self.code = Some(code);
        self.data = data;
        self.count = self.count.saturating_add(1);
    }

    /// Most recent strike reason.
    #[inline]
    pub fn last(&self) -> StrikeCode {
        self.code.unwrap_or(StrikeCode::None)
    }

    #[inline]
    pub fn data(&self) -> u32 {
        self.data
    }

    /// Strikes since the panel was created.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }
}

//! The closed set of supported formats and dispatch over them.
//!
//! [`format_count`] and [`format_description`] probe formats in [`WiegandFormat::ALL`]
//! order, which is also the order [`WiegandFormat::detect`] uses to pick a winner.

use crate::card::WiegandCard;
use crate::formats::{c1k35s, h10301, h10302, h10304};
use crate::message::{MessageError, WiegandMessage};
use std::fmt::{self, Write as _};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("no format selected")]
    NoFormat,
    #[error("{format} expects {expected} bits, message has {actual}")]
    LengthMismatch { format: WiegandFormat, expected: u8, actual: u8 },
    #[error("Message: {0}")]
    Message(#[from] MessageError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WiegandFormat {
    /// No match; never a valid pack target.
    #[default]
    None,
    H10301,
    C1k35s,
    H10302,
    H10304,
}

impl WiegandFormat {
    /// Probing order for counting, describing and detection.
    pub const ALL: [WiegandFormat; 4] = [
        WiegandFormat::H10301,
        WiegandFormat::C1k35s,
        WiegandFormat::H10302,
        WiegandFormat::H10304,
    ];

    pub fn name(self) -> &'static str {
        format_name(self)
    }

    /// Fixed message length, `None` for [`WiegandFormat::None`].
    pub fn length(self) -> Option<u8> {
        match self {
            WiegandFormat::None => None,
            WiegandFormat::H10301 => Some(h10301::LENGTH),
            WiegandFormat::C1k35s => Some(c1k35s::LENGTH),
            WiegandFormat::H10302 => Some(h10302::LENGTH),
            WiegandFormat::H10304 => Some(h10304::LENGTH),
        }
    }

    pub fn has_facility_code(self) -> bool {
        self.max_facility_code() != 0
    }

    pub fn max_facility_code(self) -> u32 {
        match self {
            WiegandFormat::H10301 => 0xFF,
            WiegandFormat::C1k35s => 0xFFF,
            WiegandFormat::H10304 => 0xFFFF,
            WiegandFormat::H10302 | WiegandFormat::None => 0,
        }
    }

    pub fn max_card_number(self) -> u64 {
        match self {
            WiegandFormat::H10301 => 0xFFFF,
            WiegandFormat::C1k35s => 0xF_FFFF,
            WiegandFormat::H10302 => (1 << 35) - 1,
            WiegandFormat::H10304 => 0x7_FFFF,
            WiegandFormat::None => 0xFFFF_FFFF,
        }
    }

    /// Next format in menu order, wrapping around; `None` starts at H10301.
    pub fn next(self) -> WiegandFormat {
        match self {
            WiegandFormat::None | WiegandFormat::H10304 => WiegandFormat::H10301,
            WiegandFormat::H10301 => WiegandFormat::C1k35s,
            WiegandFormat::C1k35s => WiegandFormat::H10302,
            WiegandFormat::H10302 => WiegandFormat::H10304,
        }
    }

    pub fn pack(self, card: &WiegandCard) -> Result<WiegandMessage, FormatError> {
        let msg = match self {
            WiegandFormat::None => return Err(FormatError::NoFormat),
            WiegandFormat::H10301 => h10301::pack(card)?,
            WiegandFormat::C1k35s => c1k35s::pack(card)?,
            WiegandFormat::H10302 => h10302::pack(card)?,
            WiegandFormat::H10304 => h10304::pack(card)?,
        };
        log::debug!(
            "packed {} FC:{} CN:{} -> {}",
            self,
            card.facility_code,
            card.card_number,
            msg
        );
        Ok(msg)
    }

    /// Strict unpack: the length must match; parity is reported in the card.
    pub fn unpack(self, msg: &WiegandMessage) -> Result<WiegandCard, FormatError> {
        let card = match self {
            WiegandFormat::None => return Err(FormatError::NoFormat),
            WiegandFormat::H10301 => h10301::unpack(msg)?,
            WiegandFormat::C1k35s => c1k35s::unpack(msg)?,
            WiegandFormat::H10302 => h10302::unpack(msg)?,
            WiegandFormat::H10304 => h10304::unpack(msg)?,
        };
        if !card.parity_valid {
            log::trace!("{}: parity check failed for {}", self, msg);
        }
        Ok(card)
    }

    /// Unpack, keeping the card only when the length matches and parity holds.
    pub fn unpack_valid(self, msg: &WiegandMessage) -> Option<WiegandCard> {
        self.unpack(msg).ok().filter(|card| card.parity_valid)
    }

    /// Read this format's fields from `msg` as if it had this format's length,
    /// ignoring parity. The returned card always has `parity_valid == false`.
    pub fn unpack_unchecked(self, msg: &WiegandMessage) -> Result<WiegandCard, FormatError> {
        match self {
            WiegandFormat::None => Err(FormatError::NoFormat),
            WiegandFormat::H10301 => Ok(h10301::read_fields(msg)),
            WiegandFormat::C1k35s => Ok(c1k35s::read_fields(msg)),
            WiegandFormat::H10302 => Ok(h10302::read_fields(msg)),
            WiegandFormat::H10304 => Ok(h10304::read_fields(msg)),
        }
    }

    /// First format in probing order that unpacks `msg` with valid parity.
    pub fn detect(msg: &WiegandMessage) -> Option<(WiegandFormat, WiegandCard)> {
        let found = Self::ALL
            .into_iter()
            .find_map(|format| format.unpack_valid(msg).map(|card| (format, card)));
        match found {
            Some((format, _)) => log::debug!("detected {} for {}", format, msg),
            None => log::debug!("no format matches {}", msg),
        }
        found
    }
}

/// Decode `msg` preferring the caller's remembered format.
///
/// Tries, in order: a strict unpack with `hint`, auto-detection, then reading
/// `hint`'s fields without length or parity checks.
pub fn resolve(msg: &WiegandMessage, hint: WiegandFormat) -> Option<(WiegandFormat, WiegandCard)> {
    if let Some(card) = hint.unpack_valid(msg) {
        return Some((hint, card));
    }
    if let Some(found) = WiegandFormat::detect(msg) {
        return Some(found);
    }
    let card = hint.unpack_unchecked(msg).ok()?;
    log::debug!("{}: using hinted fields without parity for {}", hint, msg);
    Some((hint, card))
}

/// Number of formats that unpack `msg` with valid parity.
pub fn format_count(msg: &WiegandMessage) -> usize {
    WiegandFormat::ALL
        .into_iter()
        .filter(|format| format.unpack_valid(msg).is_some())
        .count()
}

/// One entry per matching format: name on the first line, then the fields.
pub fn format_description(msg: &WiegandMessage) -> String {
    let mut out = String::new();
    for format in WiegandFormat::ALL {
        let Some(card) = format.unpack_valid(msg) else {
            continue;
        };
        // Writing to a String cannot fail.
        let _ = if format.has_facility_code() {
            writeln!(out, "{}\nFC: {} CN: {}", format, card.facility_code, card.card_number)
        } else {
            writeln!(out, "{}\nCN: {}", format, card.card_number)
        };
    }
    out
}

pub fn format_name(format: WiegandFormat) -> &'static str {
    match format {
        WiegandFormat::H10301 => "H10301",
        WiegandFormat::C1k35s => "C1k35s",
        WiegandFormat::H10302 => "H10302",
        WiegandFormat::H10304 => "H10304",
        WiegandFormat::None => "Unknown",
    }
}

impl fmt::Display for WiegandFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive format name.
impl FromStr for WiegandFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WiegandFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown format: {}", s))
    }
}

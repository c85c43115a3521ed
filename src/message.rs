//! Length-aware 96-bit Wiegand message with logical bit and linear field access.
//!
//! Storage is three `u32` words: `top` holds physical bits 64..96, `mid` 32..64 and
//! `bot` 0..32. Callers address bits *logically*: position 0 is the first transmitted
//! (most significant) bit and `length - 1` the last. The physical index of logical
//! position `pos` is `length - pos - 1`.

use byteorder::{BigEndian, ByteOrder};
use std::fmt;

/// Largest number of bits a message can hold.
pub const MAX_BITS: u8 = 96;

/// Size of the serialized form produced by [`WiegandMessage::to_bytes`].
pub const ENCODED_LEN: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("bit {pos} is outside a {length}-bit message")]
    BitOutOfRange { pos: u8, length: u8 },
    #[error("physical bit index {index} is not representable")]
    IndexNotRepresentable { index: u8 },
    #[error("message length {0} exceeds 96 bits")]
    LengthTooLarge(u8),
    #[error("encoded message must be 13 bytes, got {0}")]
    EncodedLength(usize),
}

/// A packed Wiegand message.
///
/// The lowest valued (last transmitted) bit is always aligned to bit 0 of `bot`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WiegandMessage {
    /// Number of encoded bits, excluding any transport preamble.
    pub length: u8,
    /// Bits in `x << 64` positions.
    pub top: u32,
    /// Bits in `x << 32` positions.
    pub mid: u32,
    /// Lowest ordinal positions.
    pub bot: u32,
}

impl WiegandMessage {
    /// Zeroed message of the given bit length.
    pub fn with_length(length: u8) -> Result<Self, MessageError> {
        Self::from_words(0, 0, 0, i32::from(length))
    }

    /// Build a message from explicit words. A `length` of zero or less leaves the
    /// message length at 0.
    pub fn from_words(top: u32, mid: u32, bot: u32, length: i32) -> Result<Self, MessageError> {
        let length = if length > 0 {
            match u8::try_from(length) {
                Ok(n) if n <= MAX_BITS => n,
                Ok(n) => return Err(MessageError::LengthTooLarge(n)),
                Err(_) => return Err(MessageError::LengthTooLarge(u8::MAX)),
            }
        } else {
            0
        };
        Ok(WiegandMessage { length, top, mid, bot })
    }

    /// Translate a logical position to a physical index, or fail if `pos` is
    /// outside the message.
    fn physical_index(&self, pos: u8) -> Result<u8, MessageError> {
        if pos >= self.length {
            return Err(MessageError::BitOutOfRange { pos, length: self.length });
        }
        let index = self.length - pos - 1;
        if index >= MAX_BITS {
            return Err(MessageError::IndexNotRepresentable { index });
        }
        Ok(index)
    }

    fn word_mut(&mut self, index: u8) -> (&mut u32, u8) {
        match index {
            64..=u8::MAX => (&mut self.top, index - 64),
            32..=63 => (&mut self.mid, index - 32),
            _ => (&mut self.bot, index),
        }
    }

    fn word(&self, index: u8) -> (u32, u8) {
        match index {
            64..=u8::MAX => (self.top, index - 64),
            32..=63 => (self.mid, index - 32),
            _ => (self.bot, index),
        }
    }

    /// Bit at logical position `pos`. Positions outside the message read as unset.
    pub fn get_bit(&self, pos: u8) -> bool {
        match self.physical_index(pos) {
            Ok(index) => {
                let (word, shift) = self.word(index);
                (word >> shift) & 1 == 1
            }
            Err(_) => false,
        }
    }

    /// Set or clear the bit at logical position `pos`. On failure the message is
    /// unchanged.
    pub fn set_bit(&mut self, value: bool, pos: u8) -> Result<(), MessageError> {
        let index = self.physical_index(pos)?;
        let (word, shift) = self.word_mut(index);
        if value {
            *word |= 1 << shift;
        } else {
            *word &= !(1 << shift);
        }
        Ok(())
    }

    /// Read `length` logical bits starting at `first_bit`, first bit most significant.
    ///
    /// Bits past the end of the message contribute zeros; no error is reported.
    pub fn get_linear_field(&self, first_bit: u8, length: u8) -> u64 {
        (0..length).fold(0u64, |acc, i| {
            let bit = first_bit.checked_add(i).map_or(false, |pos| self.get_bit(pos));
            (acc << 1) | u64::from(bit)
        })
    }

    /// Write the low `length` bits of `value` starting at `first_bit`, most
    /// significant first.
    ///
    /// The write is all-or-nothing: if any bit lies outside the message, nothing
    /// is changed and the first failure is returned.
    pub fn set_linear_field(
        &mut self,
        value: u64,
        first_bit: u8,
        length: u8,
    ) -> Result<(), MessageError> {
        let mut scratch = *self;
        for i in 0..length {
            let pos = first_bit.checked_add(i).ok_or(MessageError::BitOutOfRange {
                pos: u8::MAX,
                length: self.length,
            })?;
            let shift = u32::from(length - i - 1);
            let bit = value.checked_shr(shift).map_or(false, |v| v & 1 == 1);
            scratch.set_bit(bit, pos)?;
        }
        *self = scratch;
        Ok(())
    }

    /// Whole 96-bit content as a single integer.
    pub fn as_u128(&self) -> u128 {
        (u128::from(self.top) << 64) | (u128::from(self.mid) << 32) | u128::from(self.bot)
    }

    /// Build from a 96-bit integer; bits above 96 are dropped.
    pub fn from_u128(value: u128, length: u8) -> Result<Self, MessageError> {
        Self::from_words(
            (value >> 64) as u32,
            (value >> 32) as u32,
            value as u32,
            i32::from(length),
        )
    }

    /// Serialize as a length byte followed by `top`, `mid` and `bot` big-endian.
    pub fn to_bytes(&self) -> [u8; ENCODED_LEN] {
        let mut out = [0u8; ENCODED_LEN];
        out[0] = self.length;
        BigEndian::write_u32(&mut out[1..5], self.top);
        BigEndian::write_u32(&mut out[5..9], self.mid);
        BigEndian::write_u32(&mut out[9..13], self.bot);
        out
    }

    /// Inverse of [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MessageError> {
        if bytes.len() != ENCODED_LEN {
            return Err(MessageError::EncodedLength(bytes.len()));
        }
        Self::from_words(
            BigEndian::read_u32(&bytes[1..5]),
            BigEndian::read_u32(&bytes[5..9]),
            BigEndian::read_u32(&bytes[9..13]),
            i32::from(bytes[0]),
        )
    }
}

/// `<length>#<hex>`, with `ceil(length / 4)` hex digits (at least one).
impl fmt::Display for WiegandMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = ((usize::from(self.length) + 3) / 4).max(1);
        write!(f, "{}#{:0width$X}", self.length, self.as_u128(), width = width)
    }
}

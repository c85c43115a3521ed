//! Per-format pack/unpack implementations.
//!
//! Every codec exposes the same surface:
//!
//! - `LENGTH`: the fixed message length in bits;
//! - `pack(&WiegandCard)`: lay out the fields and compute parity; oversized fields are masked;
//! - `unpack(&WiegandMessage)`: fail on a length mismatch, otherwise decode the fields and
//!   report parity in [`WiegandCard::parity_valid`](crate::card::WiegandCard::parity_valid);
//! - `read_fields(&WiegandMessage)`: decode the fields as if the message had `LENGTH` bits,
//!   without checking length or parity.
//!
//! Dispatch over the closed set lives in [`WiegandFormat`](crate::format::WiegandFormat).

pub mod c1k35s;
pub mod h10301;
pub mod h10302;
pub mod h10304;

use crate::format::{FormatError, WiegandFormat};
use crate::message::WiegandMessage;
use crate::parity::{even_parity32, odd_parity32};

/// Length of the H10302 / H10304 family.
const LENGTH_37: u8 = 37;

fn check_length(msg: &WiegandMessage, format: WiegandFormat, expected: u8) -> Result<(), FormatError> {
    if msg.length != expected {
        return Err(FormatError::LengthMismatch { format, expected, actual: msg.length });
    }
    Ok(())
}

/// Expected (leading, trailing) parity bits of a 37-bit message: even over logical
/// bits 1..=18, odd over logical bits 18..=35. Bit 18 is covered by both.
fn parity_37(msg: &WiegandMessage) -> (bool, bool) {
    let leading = even_parity32(msg.get_linear_field(1, 18) as u32);
    let trailing = odd_parity32(msg.get_linear_field(18, 18) as u32);
    (leading, trailing)
}

fn apply_parity_37(msg: &mut WiegandMessage) -> Result<(), FormatError> {
    let (leading, trailing) = parity_37(msg);
    msg.set_bit(leading, 0)?;
    msg.set_bit(trailing, LENGTH_37 - 1)?;
    Ok(())
}

fn check_parity_37(msg: &WiegandMessage) -> bool {
    let (leading, trailing) = parity_37(msg);
    msg.get_bit(0) == leading && msg.get_bit(LENGTH_37 - 1) == trailing
}

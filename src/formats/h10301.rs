//! H10301: HID 26-bit standard.
//!
//! ```text
//! logical  0 | 1 ..= 8  | 9 ..= 24    | 25
//!          E | facility | card number | O
//! ```
//!
//! The leading bit is even parity over the first twelve payload bits, the trailing bit odd
//! parity over the last twelve.

use super::check_length;
use crate::card::WiegandCard;
use crate::format::{FormatError, WiegandFormat};
use crate::message::WiegandMessage;
use crate::parity::{even_parity32, odd_parity32};

pub const LENGTH: u8 = 26;

pub fn pack(card: &WiegandCard) -> Result<WiegandMessage, FormatError> {
    let mut bot = ((card.card_number & 0xFFFF) as u32) << 1;
    bot |= (card.facility_code & 0xFF) << 17;
    bot |= u32::from(odd_parity32((bot >> 1) & 0xFFF));
    bot |= u32::from(even_parity32((bot >> 13) & 0xFFF)) << 25;
    Ok(WiegandMessage { length: LENGTH, top: 0, mid: 0, bot })
}

pub fn read_fields(msg: &WiegandMessage) -> WiegandCard {
    WiegandCard::new((msg.bot >> 17) & 0xFF, u64::from((msg.bot >> 1) & 0xFFFF))
}

pub fn unpack(msg: &WiegandMessage) -> Result<WiegandCard, FormatError> {
    check_length(msg, WiegandFormat::H10301, LENGTH)?;
    let mut card = read_fields(msg);
    card.parity_valid = odd_parity32((msg.bot >> 1) & 0xFFF) == (msg.bot & 1 == 1)
        && even_parity32((msg.bot >> 13) & 0xFFF) == ((msg.bot >> 25) & 1 == 1);
    Ok(card)
}

//! H10304: HID 37-bit with facility code.
//!
//! ```text
//! logical  0 | 1 ..= 16 | 17 ..= 35   | 36
//!          E | facility | card number | O
//! ```
//!
//! Parity placement is the same as H10302.

use super::{apply_parity_37, check_length, check_parity_37, LENGTH_37};
use crate::card::WiegandCard;
use crate::format::{FormatError, WiegandFormat};
use crate::message::WiegandMessage;

pub const LENGTH: u8 = LENGTH_37;

pub fn pack(card: &WiegandCard) -> Result<WiegandMessage, FormatError> {
    let mut msg = WiegandMessage::with_length(LENGTH)?;
    msg.set_linear_field(u64::from(card.facility_code), 1, 16)?;
    msg.set_linear_field(card.card_number, 17, 19)?;
    apply_parity_37(&mut msg)?;
    Ok(msg)
}

pub fn read_fields(msg: &WiegandMessage) -> WiegandCard {
    let hinted = WiegandMessage { length: LENGTH, ..*msg };
    WiegandCard::new(
        hinted.get_linear_field(1, 16) as u32,
        hinted.get_linear_field(17, 19),
    )
}

pub fn unpack(msg: &WiegandMessage) -> Result<WiegandCard, FormatError> {
    check_length(msg, WiegandFormat::H10304, LENGTH)?;
    let mut card = read_fields(msg);
    card.parity_valid = check_parity_37(msg);
    Ok(card)
}

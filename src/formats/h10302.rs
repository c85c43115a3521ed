//! H10302: HID 37-bit card number only.
//!
//! ```text
//! logical  0 | 1 ..= 35    | 36
//!          E | card number | O
//! ```

use super::{apply_parity_37, check_length, check_parity_37, LENGTH_37};
use crate::card::WiegandCard;
use crate::format::{FormatError, WiegandFormat};
use crate::message::WiegandMessage;

pub const LENGTH: u8 = LENGTH_37;

pub fn pack(card: &WiegandCard) -> Result<WiegandMessage, FormatError> {
    let mut msg = WiegandMessage::with_length(LENGTH)?;
    msg.set_linear_field(card.card_number, 1, 35)?;
    apply_parity_37(&mut msg)?;
    Ok(msg)
}

pub fn read_fields(msg: &WiegandMessage) -> WiegandCard {
    let hinted = WiegandMessage { length: LENGTH, ..*msg };
    WiegandCard::new(0, hinted.get_linear_field(1, 35))
}

pub fn unpack(msg: &WiegandMessage) -> Result<WiegandCard, FormatError> {
    check_length(msg, WiegandFormat::H10302, LENGTH)?;
    let mut card = read_fields(msg);
    card.parity_valid = check_parity_37(msg);
    Ok(card)
}

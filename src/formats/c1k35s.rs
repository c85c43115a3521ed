//! C1k35s: HID Corporate 1000, 35-bit.
//!
//! The card number occupies `bot` bits 1..=20 and the company id (facility code)
//! `bot` bits 21..=31 plus `mid` bit 0 for its twelfth bit. Three parity bits
//! cover interleaved subsets of the payload:
//!
//! - `mid` bit 1: even parity over `mid & 0x1 ^ bot & 0xB6DB6DB6`;
//! - `bot` bit 0: odd parity over `mid & 0x3 ^ bot & 0x6DB6DB6C`;
//! - `mid` bit 2: odd parity over `mid & 0x3 ^ bot`.
//!
//! They must be computed in that order: each one covers the previous.

use super::check_length;
use crate::card::WiegandCard;
use crate::format::{FormatError, WiegandFormat};
use crate::message::WiegandMessage;
use crate::parity::{even_parity32, odd_parity32};

pub const LENGTH: u8 = 35;

const MASK_SECOND: u32 = 0xB6DB_6DB6;
const MASK_LAST: u32 = 0x6DB6_DB6C;
const MASK_FIRST: u32 = 0xFFFF_FFFF;

fn second_parity(mid: u32, bot: u32) -> bool {
    even_parity32((mid & 0x1) ^ (bot & MASK_SECOND))
}

fn last_parity(mid: u32, bot: u32) -> bool {
    odd_parity32((mid & 0x3) ^ (bot & MASK_LAST))
}

fn first_parity(mid: u32, bot: u32) -> bool {
    odd_parity32((mid & 0x3) ^ (bot & MASK_FIRST))
}

pub fn pack(card: &WiegandCard) -> Result<WiegandMessage, FormatError> {
    let mut bot = ((card.card_number & 0x000F_FFFF) as u32) << 1;
    bot |= (card.facility_code & 0x0000_07FF) << 21;
    let mut mid = (card.facility_code & 0x0000_0800) >> 11;
    mid |= u32::from(second_parity(mid, bot)) << 1;
    bot |= u32::from(last_parity(mid, bot));
    mid |= u32::from(first_parity(mid, bot)) << 2;
    Ok(WiegandMessage { length: LENGTH, top: 0, mid, bot })
}

pub fn read_fields(msg: &WiegandMessage) -> WiegandCard {
    WiegandCard::new(
        ((msg.mid & 1) << 11) | (msg.bot >> 21),
        u64::from((msg.bot >> 1) & 0x000F_FFFF),
    )
}

pub fn unpack(msg: &WiegandMessage) -> Result<WiegandCard, FormatError> {
    check_length(msg, WiegandFormat::C1k35s, LENGTH)?;
    let (mid, bot) = (msg.mid, msg.bot);
    let mut card = read_fields(msg);
    card.parity_valid = second_parity(mid, bot) == ((mid >> 1) & 1 == 1)
        && last_parity(mid, bot) == (bot & 1 == 1)
        && first_parity(mid, bot) == ((mid >> 2) & 1 == 1);
    Ok(card)
}

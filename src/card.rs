//! Semantic (unpacked) credential fields.

use crate::format::WiegandFormat;

/// An unpacked Wiegand card, like HID prox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WiegandCard {
    pub facility_code: u32,
    pub card_number: u64,
    /// Not populated by any supported format.
    pub issue_level: u32,
    /// Not populated by any supported format.
    pub oem: u32,
    /// Output of unpacking only; ignored when packing.
    pub parity_valid: bool,
}

/// Step applied to a card number by [`WiegandCard::adjust`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAdjustment {
    Increment,
    Decrement,
    Reset,
}

impl WiegandCard {
    pub fn new(facility_code: u32, card_number: u64) -> Self {
        WiegandCard { facility_code, card_number, ..Default::default() }
    }

    /// Clamp facility code and card number to what `format` can carry.
    ///
    /// Packing masks oversized values; clamp first when the largest
    /// representable value is preferable to wrapped low bits.
    pub fn clamped_to(&self, format: WiegandFormat) -> Self {
        WiegandCard {
            facility_code: self.facility_code.min(format.max_facility_code()),
            card_number: self.card_number.min(format.max_card_number()),
            ..*self
        }
    }

    /// Step the card number, saturating at 0 and at the format's maximum.
    pub fn adjust(&mut self, adjustment: CardAdjustment, format: WiegandFormat) {
        self.card_number = match adjustment {
            CardAdjustment::Increment => {
                self.card_number.saturating_add(1).min(format.max_card_number())
            }
            CardAdjustment::Decrement => self.card_number.saturating_sub(1),
            CardAdjustment::Reset => 0,
        };
        log::debug!(
            "adjusted card ({:?}): FC:{} CN:{}",
            adjustment,
            self.facility_code,
            self.card_number
        );
    }
}

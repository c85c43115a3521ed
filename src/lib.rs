//! # wiegand-codec — Wiegand credential packing
//!
//! Packs and unpacks the fixed-length, bit-packed credentials used by physical
//! access-control card formats, and checks their parity.
//!
//! ## Layers
//!
//! - **Message**: [`WiegandMessage`], up to 96 bits in three `u32` words with logical
//!   (first-transmitted-bit-first) bit and linear field access
//! - **Formats**: pack/unpack per format in [`formats`], dispatched through the closed
//!   [`WiegandFormat`] enum
//! - **Registry**: [`format_count`], [`format_description`], [`format_name`],
//!   [`WiegandFormat::detect`] and hinted [`resolve`]
//! - **Text**: [`parse`] for `26#2F61C5D` messages and `H10301 FC:123 CN:45678` cards
//!
//! ## Formats
//!
//! | Format | Bits | Facility code | Card number |
//! |--------|------|---------------|-------------|
//! | H10301 | 26 | 8 | 16 |
//! | C1k35s | 35 | 12 | 20 |
//! | H10302 | 37 | — | 35 |
//! | H10304 | 37 | 16 | 19 |
//!
//! ## Example
//!
//! ```
//! use wiegand_codec::{format_count, WiegandCard, WiegandFormat};
//!
//! let msg = WiegandFormat::H10301.pack(&WiegandCard::new(123, 45678)).unwrap();
//! assert_eq!(msg.length, 26);
//! let card = WiegandFormat::H10301.unpack(&msg).unwrap();
//! assert!(card.parity_valid);
//! assert_eq!(format_count(&msg), 1);
//! ```

pub mod card;
pub mod format;
pub mod formats;
pub mod message;
pub mod parity;
pub mod parser;

pub use card::{CardAdjustment, WiegandCard};
pub use format::{format_count, format_description, format_name, resolve, FormatError, WiegandFormat};
pub use message::{MessageError, WiegandMessage};
pub use parity::Parity;
pub use parser::{parse, parse_card, parse_message, Credential};

//! Parse credential text into messages and cards using PEST.
//!
//! Two forms are accepted (see `grammar.pest`):
//!
//! - a raw message `<length>#<hex>`, e.g. `26#2F61C5D`, the same form
//!   [`WiegandMessage`]'s `Display` produces;
//! - a card `<format> [FC:<n>] CN:<n>`, e.g. `H10301 FC:123 CN:45678`. Format names and
//!   keys are case-insensitive; numbers are decimal or `0x` hex.

use crate::card::WiegandCard;
use crate::format::WiegandFormat;
use crate::message::{WiegandMessage, MAX_BITS};
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct CredentialParser;

/// A parsed line of credential text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    Message(WiegandMessage),
    Card(WiegandFormat, WiegandCard),
}

impl Credential {
    /// The packed form: raw messages as-is, cards packed with their format.
    pub fn to_message(&self) -> Result<WiegandMessage, crate::format::FormatError> {
        match self {
            Credential::Message(msg) => Ok(*msg),
            Credential::Card(format, card) => format.pack(card),
        }
    }
}

type Pair<'a> = pest::iterators::Pair<'a, Rule>;

/// Parse either a raw message or a card.
pub fn parse(source: &str) -> Result<Credential, String> {
    let pair = first_pair(Rule::credential_input, source)?;
    match pair.as_rule() {
        Rule::raw_message => build_message(pair).map(Credential::Message),
        Rule::card_spec => build_card(pair).map(|(f, c)| Credential::Card(f, c)),
        other => Err(format!("unexpected {:?}", other)),
    }
}

/// Parse a raw `<length>#<hex>` message.
pub fn parse_message(source: &str) -> Result<WiegandMessage, String> {
    build_message(first_pair(Rule::message_input, source)?)
}

/// Parse a `<format> [FC:<n>] CN:<n>` card.
pub fn parse_card(source: &str) -> Result<(WiegandFormat, WiegandCard), String> {
    build_card(first_pair(Rule::card_input, source)?)
}

fn first_pair(rule: Rule, source: &str) -> Result<Pair<'_>, String> {
    let mut pairs = CredentialParser::parse(rule, source.trim())
        .map_err(|e| format!("Parse error: {}", e))?;
    pairs.next().ok_or_else(|| "Empty parse".to_string())
}

fn build_message(pair: Pair<'_>) -> Result<WiegandMessage, String> {
    let mut inner = pair.into_inner();
    let length_str = inner.next().ok_or("message: missing length")?.as_str();
    let hex = inner.next().ok_or("message: missing content")?.as_str();

    let length: u8 = length_str
        .parse()
        .ok()
        .filter(|n| *n <= MAX_BITS)
        .ok_or_else(|| format!("message length {} exceeds {} bits", length_str, MAX_BITS))?;
    let significant = hex.trim_start_matches('0');
    if significant.len() > 24 {
        return Err(format!("message content {} exceeds {} bits", hex, MAX_BITS));
    }
    let value = if significant.is_empty() {
        0
    } else {
        u128::from_str_radix(significant, 16).map_err(|e| format!("message content: {}", e))?
    };
    if value >> length != 0 {
        return Err(format!("message content {} does not fit in {} bits", hex, length));
    }
    WiegandMessage::from_u128(value, length).map_err(|e| e.to_string())
}

fn build_card(pair: Pair<'_>) -> Result<(WiegandFormat, WiegandCard), String> {
    let mut inner = pair.into_inner();
    let format: WiegandFormat = inner.next().ok_or("card: missing format")?.as_str().parse()?;

    let mut facility_code = None;
    let mut card_number = None;
    for field in inner {
        let mut kv = field.into_inner();
        let key = kv.next().ok_or("field: missing key")?.as_str().to_ascii_uppercase();
        let value = parse_number(kv.next().ok_or("field: missing value")?.as_str())?;
        let slot = if key == "FC" { &mut facility_code } else { &mut card_number };
        if slot.replace(value).is_some() {
            return Err(format!("duplicate field {}", key));
        }
    }

    let card_number = card_number.ok_or_else(|| format!("{}: missing CN", format))?;
    let facility_code = match facility_code {
        Some(_) if !format.has_facility_code() => {
            return Err(format!("{} has no facility code", format));
        }
        Some(fc) => u32::try_from(fc).map_err(|_| format!("facility code {} too large", fc))?,
        None => 0,
    };
    Ok((format, WiegandCard::new(facility_code, card_number)))
}

fn parse_number(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("number {}: {}", s, e))
}

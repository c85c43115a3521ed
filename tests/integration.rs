//! Integration tests: pack/unpack per format, parity sensitivity, length gate, and the
//! format registry (count, description, detection).

use wiegand_codec::{
    format_count, format_description, format_name, resolve, FormatError, WiegandCard,
    WiegandFormat, WiegandMessage,
};

/// Spread of (facility, card) pairs inside each format's field widths, including
/// both extremes.
fn sample_cards(format: WiegandFormat) -> Vec<WiegandCard> {
    let max_fc = format.max_facility_code();
    let max_cn = format.max_card_number();
    let facilities = if format.has_facility_code() {
        vec![0, 1, max_fc / 3, max_fc / 2 + 1, max_fc]
    } else {
        vec![0]
    };
    let mut cards = Vec::new();
    for fc in facilities {
        for cn in [0, 1, max_cn / 7, max_cn / 2, max_cn - 1, max_cn] {
            cards.push(WiegandCard::new(fc, cn));
        }
    }
    cards
}

fn flip(msg: &WiegandMessage, pos: u8) -> WiegandMessage {
    let mut out = *msg;
    let bit = out.get_bit(pos);
    out.set_bit(!bit, pos).expect("in range");
    out
}

#[test]
fn test_round_trip_all_formats() {
    for format in WiegandFormat::ALL {
        for card in sample_cards(format) {
            let msg = format.pack(&card).expect("pack");
            assert_eq!(Some(msg.length), format.length());
            let back = format.unpack(&msg).expect("unpack");
            assert_eq!(back.facility_code, card.facility_code, "{} {:?}", format, card);
            assert_eq!(back.card_number, card.card_number, "{} {:?}", format, card);
            assert!(back.parity_valid, "{} {:?}", format, card);
        }
    }
}

#[test]
fn test_h10301_scenario() {
    let msg = WiegandFormat::H10301.pack(&WiegandCard::new(123, 45678)).expect("pack");
    assert_eq!(msg.length, 26);
    let card = WiegandFormat::H10301.unpack(&msg).expect("unpack");
    assert_eq!(card.facility_code, 123);
    assert_eq!(card.card_number, 45678);
    assert!(card.parity_valid);
}

#[test]
fn test_h10302_full_width_ignores_facility() {
    let max = 34_359_738_367u64;
    let msg = WiegandFormat::H10302.pack(&WiegandCard::new(500, max)).expect("pack");
    assert_eq!(msg.length, 37);
    let card = WiegandFormat::H10302.unpack(&msg).expect("unpack");
    assert_eq!(card.card_number, max);
    assert_eq!(card.facility_code, 0);
    assert!(card.parity_valid);
}

#[test]
fn test_zero_37_bit_message() {
    // The trailing bit is odd parity, so the all-zero word pattern is not a valid
    // codeword; the packed zero card carries a single trailing 1.
    let zero = WiegandMessage::from_words(0, 0, 0, 37).expect("message");
    let card = WiegandFormat::H10302.unpack(&zero).expect("length matches");
    assert_eq!(card.card_number, 0);
    assert_eq!(card.facility_code, 0);
    assert!(!card.parity_valid);

    let packed = WiegandFormat::H10302.pack(&WiegandCard::default()).expect("pack");
    assert_eq!(packed, WiegandMessage::from_words(0, 0, 1, 37).expect("message"));
    let card = WiegandFormat::H10302.unpack(&packed).expect("unpack");
    assert_eq!(card.card_number, 0);
    assert!(card.parity_valid);
}

#[test]
fn test_parity_sensitivity_every_bit() {
    for format in WiegandFormat::ALL {
        for card in sample_cards(format).into_iter().step_by(5) {
            let msg = format.pack(&card).expect("pack");
            for pos in 0..msg.length {
                let bad = flip(&msg, pos);
                let decoded = format.unpack(&bad).expect("length unchanged");
                assert!(!decoded.parity_valid, "{} {:?} bit {}", format, card, pos);
            }
        }
    }
}

#[test]
fn test_length_gate() {
    for format in WiegandFormat::ALL {
        let expected = format.length().expect("length");
        for length in [0u8, 1, 25, 26, 27, 34, 35, 36, 37, 38, 96] {
            if length == expected {
                continue;
            }
            let msg = WiegandMessage::from_words(u32::MAX, u32::MAX, u32::MAX, i32::from(length))
                .expect("message");
            assert_eq!(
                format.unpack(&msg),
                Err(FormatError::LengthMismatch { format, expected, actual: length })
            );
        }
    }
}

#[test]
fn test_packing_masks_oversized_fields() {
    let card = WiegandCard::new(u32::MAX, u64::MAX);
    for format in WiegandFormat::ALL {
        let msg = format.pack(&card).expect("pack");
        let back = format.unpack(&msg).expect("unpack");
        assert_eq!(back.facility_code, format.max_facility_code(), "{}", format);
        assert_eq!(back.card_number, format.max_card_number(), "{}", format);
        assert!(back.parity_valid);
    }
}

#[test]
fn test_pack_ignores_output_fields() {
    let mut card = WiegandCard::new(10, 20);
    let plain = WiegandFormat::H10304.pack(&card).expect("pack");
    card.parity_valid = true;
    card.issue_level = 7;
    card.oem = 9;
    assert_eq!(WiegandFormat::H10304.pack(&card).expect("pack"), plain);
}

#[test]
fn test_format_count_single_h10301() {
    let msg = WiegandFormat::H10301.pack(&WiegandCard::new(55, 1234)).expect("pack");
    assert_eq!(format_count(&msg), 1);
}

#[test]
fn test_format_count_37_bit_ambiguity() {
    // H10302 and H10304 share length and parity placement.
    let msg = WiegandFormat::H10304.pack(&WiegandCard::new(3, 4)).expect("pack");
    assert_eq!(format_count(&msg), 2);
    assert_eq!(
        format_description(&msg),
        format!("H10302\nCN: {}\nH10304\nFC: 3 CN: 4\n", (3u64 << 19) | 4)
    );
}

#[test]
fn test_format_count_none() {
    let mut msg = WiegandFormat::C1k35s.pack(&WiegandCard::new(1000, 5000)).expect("pack");
    msg.mid ^= 0b100;
    assert_eq!(format_count(&msg), 0);
    assert_eq!(format_description(&msg), "");
    assert_eq!(WiegandFormat::detect(&msg), None);
    assert_eq!(format_count(&WiegandMessage::default()), 0);
}

#[test]
fn test_detect_uses_probe_order() {
    let msg = WiegandFormat::H10304.pack(&WiegandCard::new(0, 77)).expect("pack");
    let (format, card) = WiegandFormat::detect(&msg).expect("detected");
    assert_eq!(format, WiegandFormat::H10302);
    assert_eq!(card.card_number, 77);

    let msg = WiegandFormat::C1k35s.pack(&WiegandCard::new(2000, 77)).expect("pack");
    let (format, card) = WiegandFormat::detect(&msg).expect("detected");
    assert_eq!(format, WiegandFormat::C1k35s);
    assert_eq!(card.facility_code, 2000);
}

#[test]
fn test_registry_is_idempotent() {
    let msg = WiegandFormat::H10301.pack(&WiegandCard::new(7, 8)).expect("pack");
    let before = msg;
    let first = (format_count(&msg), format_description(&msg));
    let second = (format_count(&msg), format_description(&msg));
    assert_eq!(first, second);
    assert_eq!(msg, before);
}

#[test]
fn test_format_names() {
    let names: Vec<_> = WiegandFormat::ALL.into_iter().map(format_name).collect();
    assert_eq!(names, ["H10301", "C1k35s", "H10302", "H10304"]);
    assert_eq!(format_name(WiegandFormat::None), "Unknown");
}

#[test]
fn test_resolve_with_hint() {
    let msg = WiegandFormat::H10304.pack(&WiegandCard::new(12, 34)).expect("pack");
    let (format, card) = resolve(&msg, WiegandFormat::H10304).expect("resolved");
    assert_eq!(format, WiegandFormat::H10304);
    assert_eq!((card.facility_code, card.card_number), (12, 34));

    // A hint for the wrong length falls through to detection.
    let (format, _) = resolve(&msg, WiegandFormat::H10301).expect("resolved");
    assert_eq!(format, WiegandFormat::H10302);
}

#[test]
fn test_unchecked_decode_tolerates_length() {
    let msg = WiegandFormat::C1k35s.pack(&WiegandCard::new(0xABC, 0xDEF)).expect("pack");
    let stored = WiegandMessage { length: 40, ..msg };
    assert!(WiegandFormat::C1k35s.unpack(&stored).is_err());
    let card = WiegandFormat::C1k35s.unpack_unchecked(&stored).expect("fields");
    assert_eq!((card.facility_code, card.card_number), (0xABC, 0xDEF));
    assert!(!card.parity_valid);
}

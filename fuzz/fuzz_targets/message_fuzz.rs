//! Message fuzz target: arbitrary words and lengths through every format and the
//! registry. Nothing may panic, and when no bits are set above the length, a strict
//! unpack that reports valid parity must re-pack to the identical message.
//! Build with: cargo fuzz run message_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    use wiegand_codec::{format_count, format_description, WiegandFormat, WiegandMessage};

    let Ok(msg) = WiegandMessage::from_bytes(data) else {
        return;
    };
    let clean = msg.as_u128() >> msg.length == 0;
    let _ = format_count(&msg);
    let _ = format_description(&msg);
    for format in WiegandFormat::ALL {
        let _ = format.unpack_unchecked(&msg);
        if let Some(card) = format.unpack_valid(&msg).filter(|_| clean) {
            assert_eq!(format.pack(&card), Ok(msg));
        }
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run message_fuzz");
}

//! Parser fuzz target: feed arbitrary text to the credential parser.
//! The parser must not panic; anything it accepts must display and re-parse to the same
//! message. Build with: cargo fuzz run parser_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(credential) = wiegand_codec::parse(s) {
        if let Ok(msg) = credential.to_message() {
            let again = wiegand_codec::parse_message(&msg.to_string());
            assert_eq!(again, Ok(msg));
        }
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run parser_fuzz");
}

//! Pack, unpack and describe Wiegand credentials from the command line.
//!
//! Usage:
//!   wiegand pack [--clamp] FORMAT [FC:n] CN:n
//!   wiegand unpack FORMAT LEN#HEX
//!   wiegand describe [--file PATH] [LEN#HEX ...]
//!
//! `pack` masks oversized fields unless `--clamp` is given. `describe` reads one
//! message per line from `--file` or stdin when no messages are given; blank lines and
//! lines starting with `#` are skipped.
//!
//! Set `RUST_LOG=debug` to trace packing and detection. Exit code 1 if any input fails.

use anyhow::{bail, Context};
use std::io::{self, Read};
use std::path::PathBuf;
use wiegand_codec::{format_count, format_description, parse_card, parse_message, WiegandFormat};

const USAGE: &str = "usage: wiegand pack [--clamp] FORMAT [FC:n] CN:n\n       wiegand unpack FORMAT LEN#HEX\n       wiegand describe [--file PATH] [LEN#HEX ...]";

fn take_flag(args: &mut Vec<String>, long: &str, short: &str) -> bool {
    if let Some(pos) = args.iter().position(|a| a == long || a == short) {
        args.remove(pos);
        true
    } else {
        false
    }
}

fn take_option(args: &mut Vec<String>, long: &str) -> anyhow::Result<Option<String>> {
    match args.iter().position(|a| a == long) {
        Some(pos) => {
            args.remove(pos);
            if pos >= args.len() {
                bail!("{} needs a value", long);
            }
            Ok(Some(args.remove(pos)))
        }
        None => Ok(None),
    }
}

fn pack(mut args: Vec<String>) -> anyhow::Result<bool> {
    let clamp = take_flag(&mut args, "--clamp", "-c");
    let (format, mut card) = match parse_card(&args.join(" ")) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(false);
        }
    };
    if clamp {
        card = card.clamped_to(format);
    }
    let msg = format.pack(&card)?;
    println!("{}", msg);
    Ok(true)
}

fn unpack(args: Vec<String>) -> anyhow::Result<bool> {
    let [format, raw] = args.as_slice() else {
        bail!("{}", USAGE);
    };
    let format: WiegandFormat = match format.parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(false);
        }
    };
    let msg = match parse_message(raw) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}: {}", raw, e);
            return Ok(false);
        }
    };
    match format.unpack(&msg) {
        Ok(card) => {
            println!(
                "FC: {} CN: {} parity: {}",
                card.facility_code,
                card.card_number,
                if card.parity_valid { "ok" } else { "FAIL" }
            );
            Ok(card.parity_valid)
        }
        Err(e) => {
            eprintln!("{}: {}", raw, e);
            Ok(false)
        }
    }
}

fn describe_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> bool {
    let mut ok = true;
    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_message(line) {
            Ok(msg) => {
                println!("{}: {} format(s)", msg, format_count(&msg));
                for entry in format_description(&msg).lines() {
                    println!("  {}", entry);
                }
            }
            Err(e) => {
                eprintln!("{}: {}", line, e);
                ok = false;
            }
        }
    }
    ok
}

fn describe(mut args: Vec<String>) -> anyhow::Result<bool> {
    if let Some(path) = take_option(&mut args, "--file")? {
        let path = PathBuf::from(path);
        let src = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let from_file = describe_lines(src.lines());
        let from_args = describe_lines(args.iter().map(String::as_str));
        return Ok(from_file && from_args);
    }
    if args.is_empty() {
        let mut src = String::new();
        io::stdin().read_to_string(&mut src)?;
        return Ok(describe_lines(src.lines()));
    }
    Ok(describe_lines(args.iter().map(String::as_str)))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || take_flag(&mut args, "--help", "-h") {
        println!("{}", USAGE);
        return Ok(());
    }
    let command = args.remove(0);
    let ok = match command.as_str() {
        "pack" => pack(args)?,
        "unpack" => unpack(args)?,
        "describe" => describe(args)?,
        other => bail!("unknown command {}\n{}", other, USAGE),
    };
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

//! Renders raw bytes as a bytes literal (`b'...'`) so that whatever the
//! device sent, printable or not, shows up in the report exactly.

use std::fmt::Write;

pub const SINGLE_QUOTE: u8 = b'\'';
pub const DOUBLE_QUOTE: u8 = b'"';
pub const BACKSLASH: u8 = b'\\';

/// Picks `'` unless the data has a `'` and no `"` in it.
fn quote_for(data: &[u8]) -> u8 {
    if data.contains(&SINGLE_QUOTE) && !data.contains(&DOUBLE_QUOTE) {
        DOUBLE_QUOTE
    } else {
        SINGLE_QUOTE
    }
}

pub fn byte_literal(data: &[u8]) -> String {
    let quote = quote_for(data);
    let mut out = String::with_capacity(data.len() + 3);
    out.push('b');
    out.push(quote as char);

    for &b in data {
        match b {
            BACKSLASH => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            _ if b == quote => {
                out.push('\\');
                out.push(quote as char);
            }
            0x20..=0x7E => out.push(b as char),
            _ => {
                // writing to a String can't fail
                let _ = write!(out, "\\x{:02x}", b);
            }
        }
    }

    out.push(quote as char);
    out
}

//! Canonical JSON output for world-state values and payloads.
//!
//! Endorsing peers may run a Go build of this contract, so values written
//! here must match the bytes of Go's `encoding/json`:
//!
//! - `<`, `>`, `&`, U+2028 and U+2029 inside strings are written as
//!   `\u003c`, `\u003e`, `\u0026`, `\u2028`, `\u2029`
//! - control characters other than `\n`, `\r`, `\t` use `\u00XX`
//! - `f32` values use the shortest digits that round-trip, in plain
//!   decimal form (`50`, `68.7`, `123456790`) unless the magnitude is below
//!   `1e-6` or at least `1e21`, where exponent form is used (`1e+21`,
//!   `1.5e-7`)
//!
//! Non-finite floats never reach the formatter; `Asset` refuses them at
//! serialization.

use std::io;

use serde::Serialize;
use serde_json::ser::{CharEscape, Formatter};

/// Serialize `value` to canonical JSON bytes.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::with_capacity(256);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, CanonicalFormatter);
    value.serialize(&mut ser)?;
    Ok(out)
}

/// Compact formatter with the string and float rules above.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn write_f32<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f32) -> io::Result<()> {
        writer.write_all(format_f32(value).as_bytes())
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped: &[u8] = match ch {
                '<' => b"\\u003c",
                '>' => b"\\u003e",
                '&' => b"\\u0026",
                '\u{2028}' => b"\\u2028",
                '\u{2029}' => b"\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped)?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn write_char_escape<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        char_escape: CharEscape,
    ) -> io::Result<()> {
        let escaped: &[u8] = match char_escape {
            CharEscape::Quote => b"\\\"",
            CharEscape::ReverseSolidus => b"\\\\",
            CharEscape::Solidus => b"\\/",
            CharEscape::LineFeed => b"\\n",
            CharEscape::CarriageReturn => b"\\r",
            CharEscape::Tab => b"\\t",
            CharEscape::Backspace => return write_control(writer, 0x08),
            CharEscape::FormFeed => return write_control(writer, 0x0c),
            CharEscape::AsciiControl(byte) => return write_control(writer, byte),
        };
        writer.write_all(escaped)
    }
}

fn write_control<W: ?Sized + io::Write>(writer: &mut W, byte: u8) -> io::Result<()> {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    writer.write_all(&[
        b'\\',
        b'u',
        b'0',
        b'0',
        HEX[(byte >> 4) as usize],
        HEX[(byte & 0x0f) as usize],
    ])
}

/// Shortest round-trip digits for `value`; finite input only.
fn format_f32(value: f32) -> String {
    let abs = value.abs();
    if abs != 0.0 && (abs < 1e-6 || abs >= 1e21) {
        let s = format!("{value:e}");
        match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        }
    } else {
        format!("{value}")
    }
}

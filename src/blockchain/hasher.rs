//! Canonical block encoding and SHA-256 digest.
//!
//! Blocks are encoded as JSON with keys sorted at every level, `", "` and
//! `": "` separators and non-ASCII text escaped as `\uXXXX`. Floats use the
//! shortest round-trip digits, written in exponent form (`1e-05`, `1e+16`)
//! outside `1e-4 <= |x| < 1e16`. Any node that encodes the same field values
//! this way computes the same digest.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::Block;
use crate::transaction::Transaction;

/// Hex-encoded SHA-256 of the canonical encoding of `block`.
pub fn digest(block: &Block) -> String {
    digest_value(&block_value(block))
}

/// Hex-encoded SHA-256 of the canonical encoding of an arbitrary JSON value.
pub fn digest_value(value: &Value) -> String {
    hex::encode(Sha256::digest(canonical_bytes(value)))
}

/// Hex-encoded SHA-256 of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Canonical byte encoding of a JSON value.
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    // `Map` is ordered by key, so objects come out sorted.
    let mut buf = Vec::with_capacity(256);
    let mut ser = Serializer::with_formatter(&mut buf, CanonicalFormatter);
    value
        .serialize(&mut ser)
        .expect("in-memory JSON encoding");
    buf
}

fn block_value(block: &Block) -> Value {
    let mut map = Map::new();
    map.insert("index".into(), Value::from(block.index));
    map.insert("previous_hash".into(), Value::from(block.previous_hash.as_str()));
    map.insert("proof".into(), Value::from(block.proof));
    map.insert("timestamp".into(), Value::from(block.timestamp));
    map.insert(
        "transactions".into(),
        Value::Array(block.transactions.iter().map(transaction_value).collect()),
    );
    Value::Object(map)
}

fn transaction_value(tx: &Transaction) -> Value {
    let mut map = Map::new();
    map.insert("amount".into(), Value::Number(tx.amount.clone()));
    map.insert("recipient".into(), Value::from(tx.recipient.as_str()));
    map.insert("sender".into(), Value::from(tx.sender.as_str()));
    Value::Object(map)
}

struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() && ch != '\u{7f}' {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }

    fn write_f64<W: ?Sized + Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(float_repr(value).as_bytes())
    }
}

/// Shortest round-trip form of a finite float: positional with at least one
/// fractional digit for decimal exponents in `-4..16`, otherwise
/// `d[.ddd]e±XX` with a signed, two-digit minimum exponent.
fn float_repr(value: f64) -> String {
    // `{:e}` yields the shortest digits as `[-]d[.ddd]e<exp>`.
    let sci = format!("{value:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };

    if !(-4..16).contains(&exp) {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{sign}{mantissa}e{exp_sign}{:02}", exp.unsigned_abs());
    }

    let digits = mantissa.replace('.', "");
    if exp < 0 {
        let zeros = "0".repeat((-exp - 1) as usize);
        return format!("{sign}0.{zeros}{digits}");
    }
    let int_len = exp as usize + 1;
    if digits.len() <= int_len {
        let zeros = "0".repeat(int_len - digits.len());
        format!("{sign}{digits}{zeros}.0")
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{sign}{int_part}.{frac_part}")
    }
}

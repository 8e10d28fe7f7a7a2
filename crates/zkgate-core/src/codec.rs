//! Big-integer signal encoding.
//!
//! Circuits pack short byte strings (dates, country codes, addresses) into a
//! field element: the bytes are read as a big-endian unsigned integer, and the
//! public signal is its decimal representation. Decoding takes the minimal
//! big-endian magnitude, so leading zero bytes are lost on the way back.

use num_bigint_dig::BigUint;

use crate::error::SignalError;

/// Value the circuits emit for a date slot left out by the selector: the
/// integer whose bytes spell `"000000"`.
pub const EMPTY_DATE: &str = "52983525027888";

fn parse_decimal(value: &str) -> Result<BigUint, SignalError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SignalError::InvalidDecimal(value.to_string()));
    }
    BigUint::parse_bytes(value.as_bytes(), 10)
        .ok_or_else(|| SignalError::InvalidDecimal(value.to_string()))
}

/// Decode a decimal signal into the minimal big-endian bytes of its value.
/// Zero decodes to an empty byte string.
pub fn decode_bytes(value: &str) -> Result<Vec<u8>, SignalError> {
    let n = parse_decimal(value)?;
    if n.bits() == 0 {
        return Ok(Vec::new());
    }
    Ok(n.to_bytes_be())
}

/// Decode a decimal signal into the text its bytes spell. Invalid input
/// decodes to an empty string; non-UTF-8 bytes are replaced.
pub fn decode_text(value: &str) -> String {
    match decode_bytes(value) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => String::new(),
    }
}

/// Encode bytes the way the circuits do: big-endian integer in decimal.
pub fn encode_bytes(bytes: &[u8]) -> String {
    BigUint::from_bytes_be(bytes).to_str_radix(10)
}

/// Convert a decimal root into the 32-byte big-endian form used on-chain.
pub fn decimal_to_bytes32(value: &str) -> Result<[u8; 32], SignalError> {
    let bytes = decode_bytes(value)?;
    if bytes.len() > 32 {
        return Err(SignalError::Overflow {
            max: 32,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

/// Whether a date signal is unused by the proof (`0` or the encoded `"000000"`).
pub fn is_empty_date(value: &str) -> bool {
    value == "0" || value == EMPTY_DATE
}

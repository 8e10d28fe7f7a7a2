use std::str::FromStr;

use bech32::primitives::decode::CheckedHrpstring;
use bech32::primitives::iter::Fe32IterExt;
use bech32::{Bech32, Fe32, Hrp};

use zkgate_core::decode_bytes;

use crate::error::RuleError;

/// Length of an account address.
const ADDRESS_LEN: usize = 20;

/// Address an event data signal must be bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedAddress {
    /// Bech32 account address, e.g. `rarimo1...`.
    Bech32 {
        hrp: Hrp,
        address: String,
        data: Vec<u8>,
    },
    /// `0x`-prefixed 20-byte hex address.
    Hex([u8; ADDRESS_LEN]),
}

impl FromStr for ExpectedAddress {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            let bytes =
                hex::decode(digits).map_err(|e| RuleError::InvalidAddress(format!("{s}: {e}")))?;
            let address: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
                RuleError::InvalidAddress(format!("{s}: expected 20 bytes, got {}", b.len()))
            })?;
            return Ok(Self::Hex(address));
        }

        // Bech32 only: payloads are re-encoded with this checksum.
        let checked = CheckedHrpstring::new::<Bech32>(s)
            .map_err(|e| RuleError::InvalidAddress(format!("{s}: {e}")))?;
        Ok(Self::Bech32 {
            hrp: checked.hrp(),
            address: s.to_lowercase(),
            data: checked.byte_iter().collect(),
        })
    }
}

impl ExpectedAddress {
    /// Whether a decoded event data payload designates this address.
    ///
    /// Circuits store bech32 addresses as their 5-bit data words, so such a
    /// payload is re-encoded and compared as a string. A payload of exactly
    /// 20 bytes is taken as the raw address.
    fn matches(&self, payload: &[u8]) -> bool {
        match self {
            Self::Hex(address) => address_bytes(payload).is_some_and(|b| b == address),
            Self::Bech32 { data, .. } if payload.len() == ADDRESS_LEN => payload == data.as_slice(),
            Self::Bech32 { hrp, address, .. } => words_to_bytes(payload)
                .and_then(|bytes| bech32::encode::<Bech32>(hrp.clone(), &bytes).ok())
                .is_some_and(|encoded| encoded == *address),
        }
    }
}

/// What an event data signal must contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDataRule {
    /// Exact decoded bytes.
    Bytes(Vec<u8>),
    /// An account address.
    Address(ExpectedAddress),
}

impl EventDataRule {
    pub fn validate(&self, value: &str) -> Result<(), RuleError> {
        if value.is_empty() {
            return Err(RuleError::Required);
        }

        let payload = decode_bytes(value).map_err(|_| RuleError::EventDataMismatch)?;
        let matches = match self {
            Self::Bytes(expected) => payload == *expected,
            Self::Address(address) => address.matches(&payload),
        };

        if matches {
            Ok(())
        } else {
            Err(RuleError::EventDataMismatch)
        }
    }
}

fn address_bytes(payload: &[u8]) -> Option<Vec<u8>> {
    if payload.len() == ADDRESS_LEN {
        return Some(payload.to_vec());
    }
    words_to_bytes(payload)
}

/// Regroup 5-bit words into bytes; fails on non-zero padding.
fn words_to_bytes(words: &[u8]) -> Option<Vec<u8>> {
    let fes = words
        .iter()
        .map(|&word| Fe32::try_from(word).ok())
        .collect::<Option<Vec<_>>>()?;

    let padding = words.len() * 5 % 8;
    if padding >= 5 {
        return None;
    }
    if words.last().is_some_and(|&last| last & ((1 << padding) - 1) != 0) {
        return None;
    }
    Some(fes.into_iter().fes_to_bytes().collect())
}

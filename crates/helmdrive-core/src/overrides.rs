//! Override payload canonicalization
//!
//! YAML has many textual spellings of the same value - key order, quoting,
//! multi-line scalars - which would read as drift if payloads were compared
//! as text. Payloads are therefore compared and stored as minified JSON:
//! parse as YAML (a superset of JSON), emit compact JSON. serde_json keeps
//! object keys in a sorted map, so the output is canonical and
//! normalization is a fixed point.

use crate::error::Result;

/// Canonicalize a YAML or JSON payload to minified JSON
///
/// Fails when the input is not valid YAML; no partial output is returned.
pub fn normalize(input: &str) -> Result<String> {
    let value: serde_json::Value = serde_yaml::from_str(input)?;
    Ok(serde_json::to_string(&value)?)
}

/// Best-effort canonicalization for advisory comparison
///
/// Returns the canonical form when normalization succeeds and the input
/// verbatim when it fails. Only for call sites where normalization is
/// cosmetic; anything that must store canonical text uses [`normalize`].
pub fn normalize_lenient(input: &str) -> String {
    normalize(input).unwrap_or_else(|_| input.to_string())
}

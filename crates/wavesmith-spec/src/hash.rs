//! Canonical hashing.
//!
//! Inputs are canonicalized with RFC 8785 (JCS) style rules and hashed with
//! BLAKE3. Identical inputs always map to the same hash and distinct inputs to
//! distinct hashes, which is what artifact names are built from.

use serde::Serialize;

use crate::envelope::Envelope;
use crate::error::SpecError;
use crate::wave::WaveSpec;

/// Number of hex characters of the input hash used in artifact names.
pub const SHORT_HASH_LEN: usize = 12;

#[derive(Serialize)]
struct HashedInput<'a> {
    spec: &'a WaveSpec,
    envelope: Option<&'a Envelope>,
}

/// Computes the canonical BLAKE3 hash of a wave spec and optional envelope.
///
/// ```text
/// input_hash = hex(BLAKE3(JCS({"envelope": ..., "spec": ...})))
/// ```
///
/// # Example
/// ```
/// use wavesmith_spec::WaveSpec;
/// use wavesmith_spec::hash::canonical_input_hash;
///
/// let hash = canonical_input_hash(&WaveSpec::default(), None).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_input_hash(spec: &WaveSpec, envelope: Option<&Envelope>) -> Result<String, SpecError> {
    let value = serde_json::to_value(HashedInput { spec, envelope })?;
    canonical_value_hash(&value)
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> Result<String, SpecError> {
    let canonical = canonicalize_json(value)?;
    Ok(blake3_hash(canonical.as_bytes()))
}

/// Canonicalizes a JSON value.
///
/// - Object keys are sorted lexicographically
/// - No whitespace between tokens
/// - Integer-valued floats are written without a fraction
/// - Strings use minimal escaping
pub fn canonicalize_json(value: &serde_json::Value) -> Result<String, SpecError> {
    let mut out = String::new();
    write_canonical(value, &mut out);
    Ok(out)
}

fn write_canonical(value: &serde_json::Value, out: &mut String) {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => out.push_str(&format_jcs_number(n)),
        serde_json::Value::String(s) => write_jcs_string(s, out),
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<_> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_jcs_string(key, out);
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
    }
}

fn format_jcs_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if !f.is_finite() => "null".to_string(),
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        // Rust's Display for f64 is already the shortest round-trip form.
        Some(f) => format!("{}", f),
        None => "null".to_string(),
    }
}

fn write_jcs_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Computes a BLAKE3 hash of arbitrary data as 64 lowercase hex characters.
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Returns the artifact-name prefix of a full hash.
pub fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(SHORT_HASH_LEN)]
}

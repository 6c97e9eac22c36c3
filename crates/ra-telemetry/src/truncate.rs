//! Attribute truncation to keep span log entries under backend size limits.

use serde_json::{Map, Value};

/// Marker appended to every truncated string value.
pub const TRUNCATION_SUFFIX: &str = "... [truncated]";

/// Bytes reserved below the per-attribute limit for the suffix and slack.
const TRUNCATION_MARGIN: usize = 100;

/// Byte thresholds for span attribute processing.
#[derive(Debug, Clone, Copy)]
pub struct TruncationLimits {
    /// Serialized size of the whole attributes mapping above which
    /// truncation kicks in. 200 KiB stays well under a 256 KiB entry limit.
    pub max_total_bytes: usize,
    /// Raw byte length above which an individual string value is truncated.
    pub max_attribute_bytes: usize,
}

impl Default for TruncationLimits {
    fn default() -> Self {
        Self {
            max_total_bytes: 200 * 1024,
            max_attribute_bytes: 10 * 1024,
        }
    }
}

/// Truncate oversized string attributes if the mapping as a whole exceeds
/// the total budget.
///
/// Returns the input unchanged when its serialized size is within
/// `max_total_bytes`. Otherwise every string value longer than
/// `max_attribute_bytes` is cut to the first `max_attribute_bytes - 100`
/// bytes (a split multi-byte sequence is replaced, not kept) and marked with
/// [`TRUNCATION_SUFFIX`]. Non-string values and under-threshold strings pass
/// through untouched; keys are never added or removed. Idempotent, and never
/// fails or panics for any attribute value.
pub fn truncate_attributes(attributes: &Map<String, Value>, limits: TruncationLimits) -> Map<String, Value> {
    let total_bytes = serde_json::to_vec(attributes).map_or(0, |b| b.len());
    if total_bytes <= limits.max_total_bytes {
        return attributes.clone();
    }

    let keep = limits.max_attribute_bytes.saturating_sub(TRUNCATION_MARGIN);
    let mut processed = Map::with_capacity(attributes.len());
    let mut truncated = 0usize;

    for (key, value) in attributes {
        match value {
            Value::String(s) if s.len() > limits.max_attribute_bytes => {
                let mut cut = String::from_utf8_lossy(&s.as_bytes()[..keep]).into_owned();
                cut.push_str(TRUNCATION_SUFFIX);
                tracing::info!(
                    key = %key,
                    original_bytes = s.len(),
                    kept_bytes = cut.len(),
                    "truncated large attribute to stay within logging limits"
                );
                processed.insert(key.clone(), Value::String(cut));
                truncated += 1;
            }
            other => {
                processed.insert(key.clone(), other.clone());
            }
        }
    }

    if truncated > 0 {
        tracing::info!(
            truncated_attributes = truncated,
            total_bytes,
            "processed large span attributes by truncating to fit logging limits"
        );
    }

    processed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn small_limits() -> TruncationLimits {
        TruncationLimits {
            max_total_bytes: 1024,
            max_attribute_bytes: 512,
        }
    }

    fn attrs(pairs: Vec<(&str, Value)>) -> Map<String, Value> {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_identity_below_total_threshold() {
        // A long string in a small mapping: no truncation because the total
        // budget is not exceeded.
        let input = attrs(vec![
            ("output", json!("x".repeat(600))),
            ("count", json!(3)),
        ]);
        let limits = TruncationLimits {
            max_total_bytes: 10_000,
            max_attribute_bytes: 512,
        };
        assert_eq!(truncate_attributes(&input, limits), input);
    }

    #[test]
    fn test_oversized_strings_are_cut_and_marked() {
        let input = attrs(vec![
            ("big", json!("a".repeat(2000))),
            ("small", json!("short")),
            ("num", json!(42)),
            ("flag", json!(true)),
        ]);
        let out = truncate_attributes(&input, small_limits());

        let big = out["big"].as_str().unwrap();
        assert!(big.ends_with(TRUNCATION_SUFFIX));
        assert_eq!(big.len(), 512 - 100 + TRUNCATION_SUFFIX.len());
        assert!(big.len() <= 512);

        // Everything else is bit-identical; no keys added or removed.
        assert_eq!(out["small"], json!("short"));
        assert_eq!(out["num"], json!(42));
        assert_eq!(out["flag"], json!(true));
        assert_eq!(out.len(), input.len());
    }

    #[test]
    fn test_under_threshold_strings_survive_a_hot_mapping() {
        // Total budget blown by one value; the other string is under the
        // per-attribute limit and must pass through even so.
        let input = attrs(vec![
            ("big", json!("b".repeat(4096))),
            ("mid", json!("m".repeat(300))),
        ]);
        let out = truncate_attributes(&input, small_limits());
        assert_eq!(out["mid"], input["mid"]);
        assert_ne!(out["big"], input["big"]);
    }

    #[test]
    fn test_idempotent() {
        let input = attrs(vec![
            ("big", json!("c".repeat(5000))),
            ("nested", json!({"inner": "d"})),
            ("n", json!(1.5)),
        ]);
        let once = truncate_attributes(&input, small_limits());
        let twice = truncate_attributes(&once, small_limits());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_multibyte_cut_does_not_panic_and_stays_bounded() {
        // 'é' is two bytes in UTF-8; the leading 'a' shifts the cut point
        // mid-character.
        let input = attrs(vec![("big", json!(format!("a{}", "é".repeat(1500))))]);
        let out = truncate_attributes(&input, small_limits());
        let big = out["big"].as_str().unwrap();
        assert!(big.ends_with(TRUNCATION_SUFFIX));
        assert!(big.len() <= 512);
    }

    #[test]
    fn test_non_string_values_never_truncated() {
        let input = attrs(vec![
            ("big", json!("e".repeat(3000))),
            ("array", json!([1, 2, 3])),
            ("object", json!({"k": "v"})),
            ("null", json!(null)),
        ]);
        let out = truncate_attributes(&input, small_limits());
        assert_eq!(out["array"], input["array"]);
        assert_eq!(out["object"], input["object"]);
        assert_eq!(out["null"], input["null"]);
    }

    #[test]
    fn test_default_limits_match_logging_budget() {
        let limits = TruncationLimits::default();
        assert_eq!(limits.max_total_bytes, 200 * 1024);
        assert_eq!(limits.max_attribute_bytes, 10 * 1024);
    }
}

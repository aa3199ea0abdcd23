//! Carves JSON-ish payloads out of inline script text and repairs them into
//! parseable JSON.
//!
//! The payloads are JavaScript object literals, not JSON: some keys are bare
//! identifiers, some strings are single-quoted, and the whole thing sits
//! inside surrounding script syntax. Extraction is a two-stage pipeline
//! (brace-depth carve, then known-substitution repair) so each stage can be
//! tested on its own.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde_json::Value;

use crate::error::ImportError;

/// Where the raw fragment is dumped when a repaired payload still fails to
/// parse. The page format is not contractually stable; the dump is forensic
/// evidence of a format change.
pub const DEFAULT_DIAGNOSTIC_PATH: &str = "decode_error.log";

/// Field name that terminates the metadata scan; the payload proper ends
/// right before it.
pub const META_SENTINEL: &str = "userInfo";

/// Bare-identifier assignment bundled into the metadata block. Stripped
/// after quote repair because its value is not a JSON literal.
const SYNTHETIC_ASSIGNMENT: &str = "\"isConnected\":isConnected,";

/// Extract the region of `data` lying at brace-nesting depth greater than
/// `threshold`.
///
/// Depth is incremented on `{` before the copy check and decremented on `}`
/// after it, so the braces delimiting the region are part of the result.
/// `;`, `(` and `)` are artifacts of the surrounding script syntax and are
/// never copied.
pub fn carve(data: &str, threshold: u32) -> String {
    let mut depth = 0u32;
    let mut candidate = String::new();
    for ch in data.chars() {
        if ch == '{' {
            depth += 1;
        }
        if depth > threshold && !matches!(ch, ';' | '(' | ')') {
            candidate.push(ch);
        }
        if ch == '}' {
            depth = depth.saturating_sub(1);
        }
    }
    candidate
}

/// Extract the top-level object of `data`, stopping as soon as the
/// accumulated buffer ends with `sentinel`.
///
/// The sentinel and the quote/comma introducing it are dropped and the
/// object is re-closed, leaving only the fields scanned before it.
pub fn carve_until_sentinel(data: &str, sentinel: &str) -> String {
    let mut depth = 0u32;
    let mut candidate = String::new();
    for ch in data.chars() {
        if ch == '{' {
            depth += 1;
        }
        if depth > 0 {
            candidate.push(ch);
            if candidate.ends_with(sentinel) {
                // drop only the quote and comma introducing the sentinel;
                // anything further belongs to the preceding field
                candidate.truncate(candidate.len() - sentinel.len());
                if candidate.ends_with(&['"', '\''][..]) {
                    candidate.pop();
                }
                if candidate.ends_with(',') {
                    candidate.pop();
                }
                candidate.push('}');
                return candidate;
            }
        }
        if ch == '}' {
            depth = depth.saturating_sub(1);
        }
    }
    candidate
}

/// Quote the two keys the page emits as bare JavaScript identifiers.
pub fn quote_bare_keys(candidate: &str) -> String {
    candidate
        .replace("utensils", "\"utensils\"")
        .replace("ingredientGroups", "\"ingredientGroups\"")
}

fn parse_or_dump(candidate: &str, raw: &str, dump_path: &Path) -> Result<Value, ImportError> {
    match serde_json::from_str(candidate) {
        Ok(value) => Ok(value),
        Err(source) => {
            if let Err(io) = fs::write(dump_path, raw) {
                warn!(
                    "could not persist raw fragment to {}: {}",
                    dump_path.display(),
                    io
                );
            }
            Err(ImportError::MalformedPayload {
                source,
                dump: dump_path.to_path_buf(),
            })
        }
    }
}

/// Extract and parse the payload object at nesting depth > `threshold`.
///
/// Threshold 0 targets a top-level object literal, threshold 1 one sitting
/// inside an enclosing wrapper object. On parse failure the original raw
/// input is written to `dump_path` before the error propagates.
pub fn extract_payload(data: &str, threshold: u32, dump_path: &Path) -> Result<Value, ImportError> {
    let candidate = quote_bare_keys(&carve(data, threshold));
    debug!("carved candidate: {candidate}");
    parse_or_dump(&candidate, data, dump_path)
}

/// Extract and parse the recipe-metadata block, which bundles the payload
/// with tracking fields of no interest. The scan stops at [`META_SENTINEL`];
/// single-quoted strings are repaired and the one known bare-identifier
/// assignment is stripped.
pub fn extract_meta(data: &str, dump_path: &Path) -> Result<Value, ImportError> {
    let candidate = carve_until_sentinel(data, META_SENTINEL)
        .replace('\'', "\"")
        .replace(SYNTHETIC_ASSIGNMENT, "");
    debug!("carved metadata candidate: {candidate}");
    parse_or_dump(&candidate, data, dump_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carve_top_level_object() {
        let script = r#"var contentInfo = {"type":"Dessert","difficulty":"Facile"};"#;
        assert_eq!(
            carve(script, 0),
            r#"{"type":"Dessert","difficulty":"Facile"}"#
        );
    }

    #[test]
    fn test_carve_wrapped_object() {
        let script = r#"var x = foo({"state":{"a":1,"b":[2,3]}});"#;
        assert_eq!(carve(script, 1), r#"{"a":1,"b":[2,3]}"#);
    }

    #[test]
    fn test_carve_strips_script_punctuation() {
        let script = "load({\"a\":\"x\"});";
        assert_eq!(carve(script, 0), "{\"a\":\"x\"}");
    }

    #[test]
    fn test_carve_is_idempotent_on_balanced_input() {
        let script = r#"var x = foo({"state":{"a":1,"utensils":[{"n":2}]}});"#;
        let once = carve(script, 1);
        assert_eq!(carve(&once, 0), once);
        let top = carve(r#"var y = {"k":{"v":1}};"#, 0);
        assert_eq!(carve(&top, 0), top);
    }

    #[test]
    fn test_quote_bare_keys() {
        let raw = r#"{utensils:[],ingredientGroups:[]}"#;
        assert_eq!(
            quote_bare_keys(raw),
            r#"{"utensils":[],"ingredientGroups":[]}"#
        );
    }

    #[test]
    fn test_extract_payload_exposes_quoted_keys() {
        let script = concat!(
            r#"var x = foo({"ingredientsUtensils":"#,
            r#"{"a":1,ingredientGroups:[{"items":[]}],utensils:[{"utensil_name":"bol"}]}});"#,
        );
        let dump = std::env::temp_dir().join("marmiton-import-items-test.log");
        let payload = extract_payload(script, 1, &dump).unwrap();
        assert!(payload.get("ingredientGroups").is_some());
        assert!(payload.get("utensils").is_some());
        assert_eq!(payload["a"], 1);
    }

    #[test]
    fn test_carve_until_sentinel_drops_trailing_fields() {
        let script = concat!(
            "var recipesData = {'recipes':[{'note':4,'people':6}],",
            "'isConnected':isConnected,'nbViews':12,'userInfo':{'id':null}};",
        );
        let candidate = carve_until_sentinel(script, META_SENTINEL);
        assert!(candidate.ends_with("'nbViews':12}"));
        assert!(!candidate.contains("userInfo"));
    }

    #[test]
    fn test_extract_meta_keeps_string_value_before_sentinel() {
        let script = concat!(
            "var recipesData = {'recipes':[{'note':4}],",
            "'city':'Paris','userInfo':{'id':null}};",
        );
        let dump = std::env::temp_dir().join("marmiton-import-sentinel-test.log");
        let payload = extract_meta(script, &dump).unwrap();
        assert_eq!(payload["city"], "Paris");
        assert_eq!(payload["recipes"][0]["note"], 4);
        assert!(payload.get("userInfo").is_none());
    }

    #[test]
    fn test_extract_meta_repairs_quoting_and_synthetic_assignment() {
        let script = concat!(
            "var recipesData = {'recipes':[{'note':4,'people':6}],",
            "'isConnected':isConnected,'nbViews':12,'userInfo':{'id':null}};",
        );
        let dump = std::env::temp_dir().join("marmiton-import-meta-test.log");
        let payload = extract_meta(script, &dump).unwrap();
        assert_eq!(payload["recipes"][0]["note"], 4);
        assert_eq!(payload["nbViews"], 12);
        assert!(payload.get("isConnected").is_none());
        assert!(payload.get("userInfo").is_none());
    }

    #[test]
    fn test_malformed_payload_dumps_raw_input_before_erroring() {
        let dir = tempfile::tempdir().unwrap();
        let dump = dir.path().join("decode_error.log");
        let script = r#"var x = foo({"state":{"a":1,"b":});"#;
        let err = extract_payload(script, 1, &dump).unwrap_err();
        assert!(matches!(err, ImportError::MalformedPayload { .. }));
        assert_eq!(std::fs::read_to_string(&dump).unwrap(), script);
    }
}

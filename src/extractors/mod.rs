mod script_json;

pub use self::script_json::{
    carve, carve_until_sentinel, extract_meta, extract_payload, quote_bare_keys,
    DEFAULT_DIAGNOSTIC_PATH, META_SENTINEL,
};

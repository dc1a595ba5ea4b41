use std::path::Path;

use candidate_engine::{Candidate, CandidateBuilder, Field};
use serde_json::Value as JSValue;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Identifiers for the records that do not carry one: the file name and the line number.
pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

/// The text of a JSON value. Numbers and booleans are accepted; anything else is missing.
pub fn read_js_text(x: Option<&JSValue>) -> Option<String> {
    match x {
        Some(JSValue::String(s)) => Some(s.clone()),
        Some(JSValue::Number(n)) => Some(n.to_string()),
        Some(JSValue::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

/// Builds a candidate out of (field, value) pairs. Blank or missing identifiers
/// are replaced by `default_id`.
pub fn assemble_candidate<I>(pairs: I, default_id: String) -> Candidate
where
    I: IntoIterator<Item = (Field, Option<String>)>,
{
    let mut builder = CandidateBuilder::new(default_id.clone());
    for (field, value) in pairs {
        builder = builder.field_opt(field, value);
    }
    let mut c = builder.build();
    if c.id.trim().is_empty() {
        c.id = default_id;
    }
    c
}

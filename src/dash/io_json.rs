// Reading the candidates from a JSON array.

use candidate_engine::{Candidate, Field};

use crate::dash::io_common::{assemble_candidate, make_default_id, read_js_text};
use crate::dash::*;

pub fn read_json_candidates(path: &str) -> DashResult<Vec<Candidate>> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    let elements = js.as_array().context(NotAnArraySnafu { path })?;
    Ok(candidates_from_array(elements, path))
}

fn candidates_from_array(elements: &[JSValue], path: &str) -> Vec<Candidate> {
    let default_id = make_default_id(path);
    let mut res: Vec<Candidate> = Vec::new();
    for (idx, elt) in elements.iter().enumerate() {
        let obj = match elt.as_object() {
            Some(obj) => obj,
            None => {
                warn!(
                    "read_json_candidates: {}: element {} is not an object, skipping it",
                    path, idx
                );
                continue;
            }
        };
        let mut pairs: Vec<(Field, Option<String>)> = Vec::new();
        for (key, value) in obj.iter() {
            match Field::from_source_key(key) {
                Some(field) => {
                    let text = read_js_text(Some(value));
                    if text.is_none() && !value.is_null() {
                        debug!(
                            "read_json_candidates: element {}: unexpected value for {}: {:?}",
                            idx, key, value
                        );
                    }
                    pairs.push((field, text));
                }
                None => debug!("read_json_candidates: ignoring key {:?}", key),
            }
        }
        res.push(assemble_candidate(pairs, default_id(idx + 1)));
    }
    res
}

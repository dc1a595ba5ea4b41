// Primitives for reading CSV files.

use candidate_engine::{Candidate, Field};

use crate::dash::io_common::{assemble_candidate, make_default_id};
use crate::dash::*;

pub fn read_csv_candidates(path: &str, delimiter: u8) -> DashResult<Vec<Candidate>> {
    let default_id = make_default_id(path);
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let columns: Vec<Option<Field>> = rdr
        .headers()
        .context(CsvHeaderSnafu { path })?
        .iter()
        .map(|h| Field::from_source_key(h.trim_start_matches('\u{feff}')))
        .collect();
    debug!("read_csv_candidates: columns: {:?}", columns);
    if columns.iter().all(|c| c.is_none()) {
        warn!(
            "read_csv_candidates: {}: no known column in the header, check the delimiter",
            path
        );
    }

    let mut res: Vec<Candidate> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is on the first line.
        let lineno = idx + 2;
        let line = match line_r {
            Ok(line) => line,
            Err(e) => {
                warn!(
                    "read_csv_candidates: {}: skipping line {}: {}",
                    path, lineno, e
                );
                continue;
            }
        };
        let pairs = columns
            .iter()
            .zip(line.iter())
            .filter_map(|(col, cell)| col.map(|f| (f, non_empty(cell))));
        res.push(assemble_candidate(pairs, default_id(lineno)));
    }
    Ok(res)
}

fn non_empty(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

// Reading the candidates from an Excel workbook.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use candidate_engine::{Candidate, Field};

use crate::dash::io_common::{assemble_candidate, make_default_id};
use crate::dash::*;

pub fn read_excel_candidates(path: &str, worksheet: Option<&str>) -> DashResult<Vec<Candidate>> {
    let wrange = get_range(path, worksheet)?;
    Ok(candidates_from_range(&wrange, path))
}

fn get_range(path: &str, worksheet: Option<&str>) -> DashResult<Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };
    Ok(wrange)
}

fn candidates_from_range(wrange: &Range<DataType>, path: &str) -> Vec<Candidate> {
    let default_id = make_default_id(path);
    let mut iter = wrange.rows();
    let columns: Vec<Option<Field>> = match iter.next() {
        Some(header) => header
            .iter()
            .map(|cell| cell_text(cell).and_then(|h| Field::from_source_key(&h)))
            .collect(),
        None => {
            warn!("read_excel_candidates: {}: the worksheet is empty", path);
            return Vec::new();
        }
    };
    debug!("read_excel_candidates: columns: {:?}", columns);

    let mut res: Vec<Candidate> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        if row.iter().all(|cell| cell_text(cell).is_none()) {
            debug!("read_excel_candidates: skipping empty row {}", lineno);
            continue;
        }
        let pairs = columns
            .iter()
            .zip(row.iter())
            .filter_map(|(col, cell)| col.map(|f| (f, cell_text(cell))));
        res.push(assemble_candidate(pairs, default_id(lineno)));
    }
    res
}

/// The text of a cell. Whole numbers are written without decimals.
fn cell_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) if s.is_empty() => None,
        DataType::String(s) => Some(s.clone()),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 => Some(format!("{:.0}", f)),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

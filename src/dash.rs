use log::{debug, info, warn};

use candidate_engine::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Write;

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_json;
pub mod render;
pub mod session;
pub mod views;

use crate::dash::config_reader::*;
use crate::dash::views::*;

#[derive(Debug, Snafu)]
pub enum DashError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON content of {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Expected an array of candidates in {path}"))]
    NotAnArray { path: String },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet in Excel file {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name} not found in Excel file {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading the header of CSV file {path}"))]
    CsvHeader { source: csv::Error, path: String },
    #[snafu(display("Invalid delimiter {delimiter:?}: expected a single ASCII character"))]
    InvalidDelimiter { delimiter: String },
    #[snafu(display("Unknown data provider {provider:?} (expected json, csv or xlsx)"))]
    UnknownProvider { provider: String },
    #[snafu(display("Unknown view {path:?} (expected /, /chart or /pie)"))]
    UnknownView { path: String },
    #[snafu(display("Missing parent directory for {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("Error writing to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashError>;

/// The candidates loaded for one view, with the problems met while loading them.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Snapshot {
    pub records: Vec<Candidate>,
    pub diagnostics: Vec<String>,
}

/// Loads all the data sources, in order.
///
/// This never fails: a source that cannot be read adds nothing to the
/// snapshot and leaves a diagnostic instead.
pub fn load_snapshot(sources: &[ResolvedSource]) -> Snapshot {
    let mut snapshot = Snapshot::default();
    for src in sources.iter() {
        match read_with_retries(src) {
            Ok(mut records) => {
                info!(
                    "Loaded {} candidates from {}",
                    records.len(),
                    src.path.as_str()
                );
                snapshot.records.append(&mut records);
            }
            Err(e) => {
                warn!("Could not load {}: {}", src.path, e);
                let mut msg = e.to_string();
                if let Some(cause) = std::error::Error::source(&e) {
                    msg = format!("{}: {}", msg, cause);
                }
                snapshot.diagnostics.push(msg);
            }
        }
    }
    debug!(
        "load_snapshot: {} candidates, {} diagnostics",
        snapshot.records.len(),
        snapshot.diagnostics.len()
    );
    snapshot
}

fn read_source(src: &ResolvedSource) -> DashResult<Vec<Candidate>> {
    info!("Attempting to read {:?} file {:?}", src.provider, src.path);
    match src.provider {
        Provider::Json => io_json::read_json_candidates(&src.path),
        Provider::Csv => io_csv::read_csv_candidates(&src.path, src.delimiter),
        Provider::Xlsx => {
            io_excel::read_excel_candidates(&src.path, src.excel_worksheet_name.as_deref())
        }
    }
}

fn read_with_retries(src: &ResolvedSource) -> DashResult<Vec<Candidate>> {
    let mut attempt: u32 = 0;
    loop {
        match read_source(src) {
            Ok(records) => return Ok(records),
            Err(e) if attempt < src.retries => {
                attempt += 1;
                warn!(
                    "Reading {} failed ({}), attempt {} of {}",
                    src.path, e, attempt, src.retries
                );
            }
            Err(e) => return Err(e),
        }
    }
}

/// Navigates to a view and loads its data.
pub fn open_view(nav: &mut Navigator, path: &str, sources: &[ResolvedSource]) -> DashResult<()> {
    let token = nav.navigate(path)?;
    let snapshot = load_snapshot(sources);
    nav.deliver(token, snapshot);
    Ok(())
}

/// Applies the filters given on the command line to the current view.
fn apply_args(view: &mut View, args: &Args) {
    let selections = [
        (Field::Department, &args.department),
        (Field::NuanceCode, &args.nuance_code),
        (Field::NuanceLabel, &args.nuance_label),
    ];
    for (field, value) in selections {
        if let Some(v) = value {
            if !view.select(field, Some(v.as_str())) {
                warn!(
                    "The view {} cannot be filtered by {}, ignoring {:?}",
                    view.kind().path(),
                    field.source_key(),
                    v
                );
            }
        }
    }
    if let Some(q) = &args.search {
        if !view.set_search(q) {
            warn!(
                "The view {} has no search, ignoring {:?}",
                view.kind().path(),
                q
            );
        }
    }
    // The page comes last: every filter goes back to the first page.
    if let Some(p) = args.page {
        view.go_to_page(p);
    }
}

fn write_summary(summary: &JSValue, out: &str) -> DashResult<String> {
    let pretty = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu { path: out })?;
    if out == "stdout" {
        println!("{}", pretty);
    } else {
        fs::write(out, &pretty).context(WritingOutputSnafu { path: out })?;
        info!("Summary written to {}", out);
    }
    Ok(pretty)
}

pub fn read_summary(path: &str) -> DashResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

/// Compares a summary with a reference summary, printing the differences.
pub fn check_reference(summary: &JSValue, reference_path: &str) -> DashResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {
        path: reference_path,
    })?;
    let pretty_ref = serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {
        path: reference_path,
    })?;
    if pretty_ref != pretty {
        warn!("Found differences with the reference summary");
        print_diff(pretty_ref.as_str(), pretty.as_str(), "\n");
        whatever!(
            "Difference detected between the summary and the reference summary {}",
            reference_path
        )
    }
    Ok(())
}

pub fn run_dashboard(args: &Args) -> DashResult<()> {
    let settings = Settings::from_args(args)?;
    info!("settings: {:?}", settings);

    let mut nav = Navigator::new(settings.display.clone());
    let path = args.view.clone().unwrap_or_else(|| "/".to_string());
    open_view(&mut nav, &path, &settings.sources)?;

    if let Some(view) = nav.current_mut() {
        apply_args(view, args);
    }

    if args.interactive {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        return session::run_interactive(stdin.lock(), &mut out, &mut nav, &settings);
    }

    let view = match nav.current() {
        Some(v) => v,
        None => whatever!("No view is open"),
    };
    let frame = view.frame();

    let text = render::render_text(&frame, &settings.style);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(text.as_bytes())
        .context(WritingOutputSnafu { path: "stdout" })?;

    let summary = render::frame_summary(&frame, &settings.title);
    if let Some(out_path) = &settings.output_path {
        write_summary(&summary, out_path)?;
    }
    if let Some(reference) = &args.reference {
        check_reference(&summary, reference)?;
    }
    Ok(())
}

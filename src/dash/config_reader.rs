use crate::args::Args;
use crate::dash::render::TextStyle;
use crate::dash::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_PAGE_SIZE: usize = 5;
const DEFAULT_VISIBLE_PAGES: usize = 5;
const DEFAULT_BAR_WIDTH: usize = 40;
const DEFAULT_SERIES_LABEL: &str = "Nombre de candidats";
const DEFAULT_TITLE: &str = "Résultats des législatives 2024";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    pub title: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    pub delimiter: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    pub retries: Option<u32>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(rename = "pageSize")]
    pub page_size: Option<usize>,
    #[serde(rename = "visiblePages")]
    pub visible_pages: Option<usize>,
    pub palette: Option<Vec<String>>,
    #[serde(rename = "seriesLabel")]
    pub series_label: Option<String>,
    #[serde(rename = "barWidth")]
    pub bar_width: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "dataSources", default)]
    pub data_sources: Vec<DataSource>,
    #[serde(default)]
    pub display: DisplaySettings,
}

pub fn read_config(path: &str) -> DashResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Provider {
    Json,
    Csv,
    Xlsx,
}

impl Provider {
    pub fn parse(provider: &str) -> DashResult<Provider> {
        match provider.to_lowercase().as_str() {
            "json" => Ok(Provider::Json),
            "csv" => Ok(Provider::Csv),
            "xlsx" | "excel" => Ok(Provider::Xlsx),
            _ => UnknownProviderSnafu { provider }.fail(),
        }
    }

    /// Guesses the provider from the extension of the file, defaulting to JSON.
    pub fn from_extension(path: &str) -> Provider {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        match ext.as_deref() {
            Some("csv") | Some("txt") => Provider::Csv,
            Some("xlsx") | Some("xlsm") => Provider::Xlsx,
            _ => Provider::Json,
        }
    }
}

/// A data source, ready to be read.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResolvedSource {
    pub provider: Provider,
    pub path: String,
    pub delimiter: u8,
    pub excel_worksheet_name: Option<String>,
    pub retries: u32,
}

/// The options shared by all the views.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DisplayOptions {
    pub page_size: usize,
    pub visible_pages: usize,
    pub palette: Palette,
    pub series_label: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            page_size: DEFAULT_PAGE_SIZE,
            visible_pages: DEFAULT_VISIBLE_PAGES,
            palette: Palette::default(),
            series_label: DEFAULT_SERIES_LABEL.to_string(),
        }
    }
}

/// Everything needed to run the dashboard, from the configuration file and
/// the command line. The command line takes precedence.
#[derive(Debug, Clone)]
pub struct Settings {
    pub title: String,
    pub sources: Vec<ResolvedSource>,
    pub display: DisplayOptions,
    pub style: TextStyle,
    pub output_path: Option<String>,
}

fn parse_delimiter(delimiter: Option<&str>) -> DashResult<u8> {
    match delimiter {
        None => Ok(b';'),
        Some("\\t") | Some("tab") => Ok(b'\t'),
        Some(d) if d.len() == 1 && d.is_ascii() => Ok(d.as_bytes()[0]),
        Some(d) => InvalidDelimiterSnafu { delimiter: d }.fail(),
    }
}

fn resolve_source(root: &Path, ds: &DataSource) -> DashResult<ResolvedSource> {
    let p: PathBuf = root.join(&ds.file_path);
    let path = p.as_path().display().to_string();
    let provider = match &ds.provider {
        Some(s) => Provider::parse(s)?,
        None => Provider::from_extension(&path),
    };
    Ok(ResolvedSource {
        provider,
        path,
        delimiter: parse_delimiter(ds.delimiter.as_deref())?,
        excel_worksheet_name: ds.excel_worksheet_name.clone(),
        retries: ds.retries.unwrap_or(0),
    })
}

impl Settings {
    pub fn from_args(args: &Args) -> DashResult<Settings> {
        let (config, root) = match &args.config {
            Some(config_path) => {
                let config = read_config(config_path)?;
                let root: PathBuf = Path::new(config_path)
                    .parent()
                    .context(MissingParentDirSnafu {
                        path: config_path.as_str(),
                    })?
                    .to_path_buf();
                (config, root)
            }
            None => (DashboardConfig::default(), PathBuf::new()),
        };

        let sources: Vec<ResolvedSource> = if let Some(input) = &args.input {
            let ds = DataSource {
                provider: args.input_type.clone(),
                file_path: input.clone(),
                delimiter: args.delimiter.clone(),
                excel_worksheet_name: args.excel_worksheet_name.clone(),
                retries: None,
            };
            vec![resolve_source(Path::new(""), &ds)?]
        } else {
            let mut res: Vec<ResolvedSource> = Vec::new();
            for ds in config.data_sources.iter() {
                res.push(resolve_source(&root, ds)?);
            }
            res
        };
        if sources.is_empty() {
            whatever!("No data source: use the --input option or list dataSources in the configuration file")
        }

        let page_size = args
            .page_size
            .or(config.display.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        ensure_whatever!(page_size > 0, "The page size must be at least 1");

        let display = DisplayOptions {
            page_size,
            visible_pages: config
                .display
                .visible_pages
                .unwrap_or(DEFAULT_VISIBLE_PAGES),
            palette: config
                .display
                .palette
                .as_deref()
                .map(Palette::new)
                .unwrap_or_default(),
            series_label: config
                .display
                .series_label
                .clone()
                .unwrap_or_else(|| DEFAULT_SERIES_LABEL.to_string()),
        };

        let style = TextStyle {
            color: !args.no_color,
            bar_width: config.display.bar_width.unwrap_or(DEFAULT_BAR_WIDTH),
        };

        Ok(Settings {
            title: config
                .output_settings
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            sources,
            display,
            style,
            output_path: args
                .out
                .clone()
                .or_else(|| config.output_settings.output_path.clone()),
        })
    }
}

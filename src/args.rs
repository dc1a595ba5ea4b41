use clap::Parser;

/// This is a dashboard for the candidates of the legislative elections.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file listing the data sources and the display options.
    /// For more information about the file format, read the manual of the candidate_engine crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path or empty) The file containing the candidates. Setting this option overrides the
    /// data sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (json, csv or xlsx) The type of the input. If not specified, it is guessed from the
    /// extension of the input file, with json as the default.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default ;) The delimiter of the columns, for csv inputs.
    #[clap(long, value_parser)]
    pub delimiter: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default /) The view to open: / (list), /chart (bar chart per nuance) or /pie (pie chart
    /// per department and nuance).
    #[clap(long, value_parser)]
    pub view: Option<String>,

    /// Only shows the candidates whose name contains this text (case insensitive).
    #[clap(short, long, value_parser)]
    pub search: Option<String>,

    /// Only shows the candidates of this department.
    #[clap(long, value_parser)]
    pub department: Option<String>,

    /// Only shows the candidates with this nuance code.
    #[clap(long, value_parser)]
    pub nuance_code: Option<String>,

    /// Only shows the candidates with this nuance label.
    #[clap(long, value_parser)]
    pub nuance_label: Option<String>,

    /// (default 1) The page of the list to show.
    #[clap(short, long, value_parser)]
    pub page: Option<usize>,

    /// (default 5) The number of candidates per page.
    #[clap(long, value_parser)]
    pub page_size: Option<usize>,

    /// (file path, 'stdout' or empty) If specified, the summary of the view will be written in JSON format to
    /// the given location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, legidash will
    /// check that the summary of the view matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// Reads commands from the standard input (search, filters, pages, navigation) and shows the
    /// view after each command.
    #[clap(long, takes_value = false)]
    pub interactive: bool,

    /// Disables the colors in the terminal output.
    #[clap(long, takes_value = false)]
    pub no_color: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

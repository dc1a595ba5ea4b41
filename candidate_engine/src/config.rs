// ********* Input data structures ***********

use std::borrow::Borrow;
use std::error::Error;
use std::fmt::Display;

/// The fields of a candidate record.
///
/// Every field can be used as a grouping or filtering dimension. The nuance
/// code and the nuance label are two independent dimensions: the data does not
/// guarantee that one determines the other.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Field {
    Id,
    GivenName,
    FamilyName,
    Civility,
    Department,
    Constituency,
    PanelNumber,
    NuanceCode,
    NuanceLabel,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Id,
        Field::GivenName,
        Field::FamilyName,
        Field::Civility,
        Field::Department,
        Field::Constituency,
        Field::PanelNumber,
        Field::NuanceCode,
        Field::NuanceLabel,
    ];

    /// The name of the field in the published candidate files.
    pub fn source_key(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::GivenName => "prenomCandidat",
            Field::FamilyName => "nomCandidat",
            Field::Civility => "civiliteCandidat",
            Field::Department => "departement",
            Field::Constituency => "circonscription",
            Field::PanelNumber => "numPanneau",
            Field::NuanceCode => "codeNuance",
            Field::NuanceLabel => "libelleNuance",
        }
    }

    pub fn from_source_key(key: &str) -> Option<Field> {
        let key = key.trim();
        Field::ALL
            .iter()
            .find(|f| f.source_key().eq_ignore_ascii_case(key))
            .copied()
    }
}

/// A candidate, as loaded from a data source.
///
/// Records are never modified after loading. Apart from the identifier, all
/// the fields are optional: a missing value is displayed as an empty string.
#[derive(Eq, PartialEq, Debug, Clone, Default, Hash)]
pub struct Candidate {
    pub id: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub civility: Option<String>,
    pub department: Option<String>,
    pub constituency: Option<String>,
    pub panel_number: Option<String>,
    pub nuance_code: Option<String>,
    pub nuance_label: Option<String>,
}

impl Candidate {
    /// The raw value of a field, which may be blank.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Id => Some(self.id.as_str()),
            Field::GivenName => self.given_name.as_deref(),
            Field::FamilyName => self.family_name.as_deref(),
            Field::Civility => self.civility.as_deref(),
            Field::Department => self.department.as_deref(),
            Field::Constituency => self.constituency.as_deref(),
            Field::PanelNumber => self.panel_number.as_deref(),
            Field::NuanceCode => self.nuance_code.as_deref(),
            Field::NuanceLabel => self.nuance_label.as_deref(),
        }
    }

    /// The value of a field for display purposes. Missing values are empty.
    pub fn display(&self, field: Field) -> &str {
        self.get(field).unwrap_or("")
    }

    /// The value of a field when used as a category.
    ///
    /// Blank values count as missing: they are not a category of their own.
    pub fn category(&self, field: Field) -> Option<&str> {
        self.get(field).filter(|s| !s.trim().is_empty())
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        match field {
            Field::Id => self.id = value.unwrap_or_default(),
            Field::GivenName => self.given_name = value,
            Field::FamilyName => self.family_name = value,
            Field::Civility => self.civility = value,
            Field::Department => self.department = value,
            Field::Constituency => self.constituency = value,
            Field::PanelNumber => self.panel_number = value,
            Field::NuanceCode => self.nuance_code = value,
            Field::NuanceLabel => self.nuance_label = value,
        }
    }
}

// ******** Output data structures *********

/// Counts per key, in the order in which the keys were first seen.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Tally<K> {
    pub(crate) entries: Vec<(K, u64)>,
}

/// Number of candidates per category value.
pub type CategoryCounts = Tally<String>;

/// Number of candidates per pair of category values.
pub type CompositeCounts = Tally<CompositeKey>;

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Tally {
            entries: Vec::new(),
        }
    }
}

impl<K> Tally<K> {
    pub fn get<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sum of all the counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }
}

/// A key made of two category values, for example a department and a nuance code.
///
/// The two parts are kept apart, so two different pairs never map to the same key.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct CompositeKey {
    pub first: String,
    pub second: String,
}

impl CompositeKey {
    /// The ASCII unit separator, which does not appear in the text of the records.
    pub const SEPARATOR: char = '\u{1f}';

    pub fn new(first: &str, second: &str) -> CompositeKey {
        CompositeKey {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    /// A key function that pairs the category values of two fields.
    /// Records missing either field produce no key.
    pub fn by_fields(first: Field, second: Field) -> impl Fn(&Candidate) -> Option<CompositeKey> {
        move |c: &Candidate| match (c.category(first), c.category(second)) {
            (Some(a), Some(b)) => Some(CompositeKey::new(a, b)),
            _ => None,
        }
    }

    /// The flat form of the key, with both parts joined by `SEPARATOR`.
    pub fn joined(&self) -> String {
        format!("{}{}{}", self.first, CompositeKey::SEPARATOR, self.second)
    }

    pub fn split(joined: &str) -> Option<CompositeKey> {
        joined
            .split_once(CompositeKey::SEPARATOR)
            .map(|(a, b)| CompositeKey::new(a, b))
    }

    fn needs_quotes(part: &str) -> bool {
        part.contains(" - ") || part.starts_with('"')
    }
}

/// Shown as `first - second`. When a part could be confused with the
/// ` - ` join, both parts are quoted: `"A - B" - "C"`.
impl Display for CompositeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if CompositeKey::needs_quotes(&self.first) || CompositeKey::needs_quotes(&self.second) {
            write!(f, "{:?} - {:?}", self.first, self.second)
        } else {
            write!(f, "{} - {}", self.first, self.second)
        }
    }
}

/// The default chart colors.
pub const DEFAULT_PALETTE: [&str; 20] = [
    "#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#E377C2", "#7F7F7F",
    "#BCBD22", "#17BECF", "#AEC7E8", "#FFBB78", "#98DF8A", "#FF9896", "#C5B0D5", "#C49C94",
    "#F7B6D2", "#C7C7C7", "#DBDB8D", "#9EDAE5",
];

/// Used when no color can be assigned (empty palette).
pub const NEUTRAL_COLOR: &str = "#7F7F7F";

/// An ordered list of colors, as hexadecimal `#RRGGBB` strings.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new(colors: &[String]) -> Palette {
        Palette {
            colors: colors.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.colors.get(idx).map(|s| s.as_str())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// One series of a chart: one value and one color per label.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
    pub colors: Vec<String>,
}

/// The data behind a bar or pie chart.
///
/// An empty chart still has its series, with no data in it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn empty(series_label: &str) -> ChartData {
        ChartData {
            labels: Vec::new(),
            datasets: vec![Dataset {
                label: series_label.to_string(),
                data: Vec::new(),
                colors: Vec::new(),
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Errors for page requests that do not respect the pagination contract.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum PageError {
    ZeroPageSize,
    OutOfRange { page: usize, total_pages: usize },
}

impl Error for PageError {}

impl Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::ZeroPageSize => write!(f, "page size must be at least 1"),
            PageError::OutOfRange { page, total_pages } => write!(
                f,
                "page {} is outside of the valid range [1, {}]",
                page, total_pages
            ),
        }
    }
}

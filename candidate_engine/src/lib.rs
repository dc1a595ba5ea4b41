/*!
Aggregation, filtering and pagination over a list of election candidates.

All the functions in this crate are pure: they take a snapshot of candidate
records (any iterator of `&Candidate`) and return new values, without ever
modifying the records.

```
use candidate_engine::*;

let records = vec![
    CandidateBuilder::new("1").nuance("RN", "Rassemblement National").build(),
    CandidateBuilder::new("2").nuance("LR", "Les Républicains").build(),
    CandidateBuilder::new("3").nuance("RN", "Rassemblement National").build(),
];

let counts = count_by_category(&records, Field::NuanceCode);
assert_eq!(counts.get("RN"), Some(2));
assert_eq!(distinct_values(&records, Field::NuanceCode), vec!["RN", "LR"]);
```

See the [manual] for the input formats and the views built on top of this crate.
*/

mod config;
pub mod builder;
mod filter;
pub mod manual;
mod pagination;

use log::debug;

use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

pub use crate::builder::CandidateBuilder;
pub use crate::config::*;
pub use crate::filter::*;
pub use crate::pagination::*;

impl<K: Hash + Eq + Clone> Tally<K> {
    fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Tally<K> {
        let mut positions: HashMap<K, usize> = HashMap::new();
        let mut entries: Vec<(K, u64)> = Vec::new();
        for k in keys {
            if let Some(pos) = positions.get(&k) {
                entries[*pos].1 += 1;
            } else {
                positions.insert(k.clone(), entries.len());
                entries.push((k, 1));
            }
        }
        Tally { entries }
    }
}

/// The distinct values of a field, in the order in which they first appear.
///
/// Records with a missing or blank value for this field are skipped.
pub fn distinct_values<'a, I>(records: I, field: Field) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut res: Vec<&'a str> = Vec::new();
    for c in records {
        if let Some(v) = c.category(field) {
            if seen.insert(v) {
                res.push(v);
            }
        }
    }
    res
}

/// Counts the records for each value of a field.
///
/// Only the values present in `records` appear in the result, in first-seen order.
pub fn count_by_category<'a, I>(records: I, field: Field) -> CategoryCounts
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let counts = Tally::from_keys(
        records
            .into_iter()
            .filter_map(|c| c.category(field))
            .map(|s| s.to_string()),
    );
    debug!(
        "count_by_category: {:?}: {} categories, {} records",
        field,
        counts.len(),
        counts.total()
    );
    counts
}

/// Counts the records for each composite key returned by `key_fn`.
///
/// Records for which `key_fn` returns `None` are not counted.
/// See `CompositeKey::by_fields` for the usual key function.
pub fn count_by_composite_key<'a, I, F>(records: I, key_fn: F) -> CompositeCounts
where
    I: IntoIterator<Item = &'a Candidate>,
    F: Fn(&'a Candidate) -> Option<CompositeKey>,
{
    let counts = Tally::from_keys(records.into_iter().filter_map(key_fn));
    debug!(
        "count_by_composite_key: {} keys, {} records",
        counts.len(),
        counts.total()
    );
    counts
}

/// The color of a category.
///
/// The color is the entry of the palette at the position of `category` among
/// the distinct values of `all_categories` (wrapping around the palette).
/// The same arguments always return the same color. Pass the categories of the
/// full snapshot so that a category keeps its color when filters change.
///
/// Returns `None` if the category is not in `all_categories` or if the palette is empty.
pub fn color_for<'p, S: AsRef<str>>(
    category: &str,
    all_categories: &[S],
    palette: &'p Palette,
) -> Option<&'p str> {
    if palette.is_empty() {
        return None;
    }
    let mut seen: HashSet<&str> = HashSet::new();
    let mut index = 0;
    for c in all_categories.iter().map(|s| s.as_ref()) {
        if c == category {
            return palette.get(index % palette.len());
        }
        if seen.insert(c) {
            index += 1;
        }
    }
    None
}

/// Chart data for a bar chart, one bar per category.
pub fn bar_chart_data<S: AsRef<str>>(
    counts: &CategoryCounts,
    all_categories: &[S],
    palette: &Palette,
    series_label: &str,
) -> ChartData {
    let mut chart = ChartData::empty(series_label);
    for (label, count) in counts.iter() {
        chart.labels.push(label.clone());
        push_point(&mut chart, count, color_for(label, all_categories, palette));
    }
    chart
}

/// Chart data for a pie chart, one slice per composite key.
///
/// Slices are colored after the second part of the key (the party when the
/// key is a department and a party).
pub fn pie_chart_data<S: AsRef<str>>(
    counts: &CompositeCounts,
    all_categories: &[S],
    palette: &Palette,
    series_label: &str,
) -> ChartData {
    let mut chart = ChartData::empty(series_label);
    for (key, count) in counts.iter() {
        chart.labels.push(key.to_string());
        push_point(
            &mut chart,
            count,
            color_for(&key.second, all_categories, palette),
        );
    }
    chart
}

fn push_point(chart: &mut ChartData, count: u64, color: Option<&str>) {
    // ChartData::empty always creates the series.
    if let Some(ds) = chart.datasets.first_mut() {
        ds.data.push(count);
        ds.colors.push(color.unwrap_or(NEUTRAL_COLOR).to_string());
    }
}

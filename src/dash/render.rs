// Drawing the views as text for the terminal, and as a JSON summary.

use serde_json::json;
use serde_json::Map as JSMap;

use crate::dash::views::{Frame, ListPage, ViewKind};
use crate::dash::*;

const FULL_BLOCK: char = '█';
const SLICE_MARK: char = '■';
const RESET: &str = "\x1b[0m";

/// How the text output looks.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TextStyle {
    /// Uses 24-bit ANSI colors for the charts.
    pub color: bool,
    /// The width of the longest bar, in characters.
    pub bar_width: usize,
}

impl TextStyle {
    /// No colors, for files and tests.
    pub fn plain() -> TextStyle {
        TextStyle {
            color: false,
            bar_width: 40,
        }
    }
}

fn view_title(kind: ViewKind) -> &'static str {
    match kind {
        ViewKind::Home => "Liste des candidats",
        ViewKind::Bar => "Nombre de candidats par nuance",
        ViewKind::Pie => "Nombre de candidats par département et par nuance",
    }
}

fn field_title(field: Field) -> &'static str {
    match field {
        Field::Id => "Identifiant",
        Field::GivenName => "Prénom",
        Field::FamilyName => "Nom",
        Field::Civility => "Civilité",
        Field::Department => "Département",
        Field::Constituency => "Circonscription",
        Field::PanelNumber => "Panneau",
        Field::NuanceCode => "Code nuance",
        Field::NuanceLabel => "Nuance",
    }
}

/// Parses a `#RRGGBB` color.
fn hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn paint(text: &str, color: &str, style: &TextStyle) -> String {
    match hex_rgb(color) {
        Some((r, g, b)) if style.color => {
            format!("\x1b[38;2;{};{};{}m{}{}", r, g, b, text, RESET)
        }
        _ => text.to_string(),
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn candidate_line(c: &Candidate) -> String {
    let mut line = format!(
        "{} {}",
        c.display(Field::GivenName),
        c.display(Field::FamilyName)
    );
    if let Some(civ) = c.category(Field::Civility) {
        line.push_str(&format!(" ({})", civ));
    }
    line.push_str(&format!(
        " - {}, {}",
        c.display(Field::Department),
        c.display(Field::Constituency)
    ));
    line
}

fn candidate_card(c: &Candidate) -> String {
    let mut card = format!("┌ {}\n", candidate_line(c));
    for field in [
        Field::Id,
        Field::PanelNumber,
        Field::NuanceCode,
        Field::NuanceLabel,
    ] {
        card.push_str(&format!("│ {}: {}\n", field_title(field), c.display(field)));
    }
    card.push_str("└\n");
    card
}

fn render_filters(frame: &Frame, out: &mut String) {
    for (field, values) in frame.options.iter() {
        let selected = frame.criteria.selected(*field);
        let choices: Vec<String> = values
            .iter()
            .map(|v| {
                if Some(*v) == selected {
                    format!("[{}]", v)
                } else {
                    v.to_string()
                }
            })
            .collect();
        let all = if selected.is_none() { "[Tous]" } else { "Tous" };
        out.push_str(&format!(
            "{}: {} {}\n",
            field_title(*field),
            all,
            choices.join(" ")
        ));
    }
    if frame.kind.has_list() {
        out.push_str(&format!("Recherche: {:?}\n", frame.criteria.query()));
    }
}

fn render_pager(list: &ListPage, out: &mut String) {
    if list.total_pages == 0 {
        return;
    }
    let pages: Vec<String> = list
        .pages
        .iter()
        .map(|p| {
            if *p == list.page {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect();
    let previous = if list.page > 1 { "« Précédent" } else { " " };
    let next = if list.page < list.total_pages {
        "Suivant »"
    } else {
        " "
    };
    out.push_str(&format!(
        "{} {} {}\nPage {} sur {} ({} candidats)\n",
        previous,
        pages.join(" "),
        next,
        list.page,
        list.total_pages,
        list.matches
    ));
}

fn render_list(kind: ViewKind, list: &ListPage, out: &mut String) {
    if list.candidates.is_empty() {
        out.push_str("Aucun candidat ne correspond à la recherche.\n");
        return;
    }
    for c in list.candidates.iter() {
        match kind {
            ViewKind::Home => out.push_str(&candidate_card(c)),
            _ => out.push_str(&format!("- {}\n", candidate_line(c))),
        }
    }
    render_pager(list, out);
}

fn render_bars(chart: &ChartData, style: &TextStyle, out: &mut String) {
    let ds = match chart.datasets.first() {
        Some(ds) if !chart.is_empty() => ds,
        _ => {
            out.push_str("(aucune donnée)\n");
            return;
        }
    };
    out.push_str(&format!("{}\n", ds.label));
    let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let max = ds.data.iter().copied().max().unwrap_or(0);
    for ((label, count), color) in chart.labels.iter().zip(ds.data.iter()).zip(ds.colors.iter()) {
        let len = if max == 0 {
            0
        } else {
            // Non-zero counts always get at least one block.
            ((*count as usize * style.bar_width) / max as usize).max(1)
        };
        let bar: String = std::iter::repeat(FULL_BLOCK).take(len).collect();
        out.push_str(&format!(
            "{} {} {}\n",
            pad(label, label_width),
            paint(&bar, color, style),
            count
        ));
    }
}

fn render_pie(chart: &ChartData, style: &TextStyle, out: &mut String) {
    let ds = match chart.datasets.first() {
        Some(ds) if !chart.is_empty() => ds,
        _ => {
            out.push_str("(aucune donnée)\n");
            return;
        }
    };
    out.push_str(&format!("{}\n", ds.label));
    let total: u64 = ds.data.iter().sum();
    let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    for ((label, count), color) in chart.labels.iter().zip(ds.data.iter()).zip(ds.colors.iter()) {
        let share = if total == 0 {
            0.0
        } else {
            100.0 * (*count as f64) / (total as f64)
        };
        out.push_str(&format!(
            "{} {} {:>5} ({:.1}%)\n",
            paint(&SLICE_MARK.to_string(), color, style),
            pad(label, label_width),
            count,
            share
        ));
    }
}

/// The view as text.
pub fn render_text(frame: &Frame, style: &TextStyle) -> String {
    let mut out = format!("== {} ({}) ==\n", view_title(frame.kind), frame.kind.path());
    if frame.loading {
        out.push_str("Chargement des données...\n");
        return out;
    }
    for d in frame.diagnostics.iter() {
        out.push_str(&format!("! {}\n", d));
    }
    render_filters(frame, &mut out);
    out.push('\n');
    if let Some(chart) = &frame.chart {
        match frame.kind {
            ViewKind::Pie => render_pie(chart, style, &mut out),
            _ => render_bars(chart, style, &mut out),
        }
        out.push('\n');
    }
    if let Some(list) = &frame.list {
        render_list(frame.kind, list, &mut out);
    }
    out
}

fn candidate_to_json(c: &Candidate) -> JSValue {
    let mut obj: JSMap<String, JSValue> = JSMap::new();
    for field in Field::ALL {
        obj.insert(field.source_key().to_string(), json!(c.get(field)));
    }
    JSValue::Object(obj)
}

fn chart_to_json(chart: &ChartData) -> JSValue {
    let datasets: Vec<JSValue> = chart
        .datasets
        .iter()
        .map(|ds| {
            json!({
                "label": ds.label,
                "data": ds.data,
                "backgroundColor": ds.colors,
            })
        })
        .collect();
    json!({"labels": chart.labels, "datasets": datasets})
}

/// The view as JSON, for the --out and --reference options.
pub fn frame_summary(frame: &Frame, title: &str) -> JSValue {
    let mut filters: JSMap<String, JSValue> = JSMap::new();
    for (field, _) in frame.options.iter() {
        filters.insert(
            field.source_key().to_string(),
            json!(frame.criteria.selected(*field)),
        );
    }
    if frame.kind.has_list() {
        filters.insert("search".to_string(), json!(frame.criteria.query()));
    }

    let mut summary = json!({
        "title": title,
        "view": frame.kind.path(),
        "loading": frame.loading,
        "diagnostics": frame.diagnostics,
        "filters": filters,
        "totalPages": 0,
    });
    if let Some(list) = &frame.list {
        let candidates: Vec<JSValue> = list.candidates.iter().map(|c| candidate_to_json(c)).collect();
        summary["page"] = json!(list.page);
        summary["totalPages"] = json!(list.total_pages);
        summary["pages"] = json!(list.pages);
        summary["matches"] = json!(list.matches);
        summary["candidates"] = json!(candidates);
    }
    if let Some(chart) = &frame.chart {
        summary["chart"] = chart_to_json(chart);
    }
    summary
}

// The views of the dashboard and the navigation between them.
//
// A view holds the selection of the user (filters, search text, page) and the
// candidates loaded for it. Everything that is shown is derived again from
// these two on every change, through the engine functions.

use crate::dash::config_reader::DisplayOptions;
use crate::dash::*;

/// The fields searched by the search box: the names of the candidates.
pub const NAME_FIELDS: [Field; 2] = [Field::FamilyName, Field::GivenName];

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ViewKind {
    /// The list of candidates.
    Home,
    /// The bar chart of the number of candidates per nuance label.
    Bar,
    /// The pie chart of the number of candidates per department and nuance code.
    Pie,
}

impl ViewKind {
    pub fn from_path(path: &str) -> Option<ViewKind> {
        match path.trim().trim_matches('/').to_lowercase().as_str() {
            "" | "home" => Some(ViewKind::Home),
            "chart" | "bar" => Some(ViewKind::Bar),
            "pie" => Some(ViewKind::Pie),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            ViewKind::Home => "/",
            ViewKind::Bar => "/chart",
            ViewKind::Pie => "/pie",
        }
    }

    /// The fields that can be filtered in this view.
    pub fn filter_fields(&self) -> &'static [Field] {
        match self {
            ViewKind::Home => &[Field::Department, Field::NuanceCode, Field::NuanceLabel],
            ViewKind::Bar => &[Field::Department, Field::NuanceLabel],
            ViewKind::Pie => &[Field::Department, Field::NuanceCode],
        }
    }

    pub fn has_list(&self) -> bool {
        !matches!(self, ViewKind::Pie)
    }
}

/// Identifies one mount of a view. Data loaded for an older mount is discarded.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct MountToken(u64);

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum LoadState {
    Loading,
    Loaded(Snapshot),
}

/// The selection of the user in a view.
///
/// Any change to the filters or the search text goes back to the first page.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ViewState {
    pub criteria: Criteria,
    pub page: usize,
}

impl ViewState {
    pub fn new(search_fields: &[Field]) -> ViewState {
        ViewState {
            criteria: Criteria::new(search_fields),
            page: 1,
        }
    }

    pub fn set_search(&mut self, query: &str) {
        self.criteria.set_query(query);
        self.page = 1;
    }

    pub fn select(&mut self, field: Field, value: Option<&str>) {
        self.criteria.select(field, value);
        self.page = 1;
    }

    pub fn clear(&mut self) {
        self.criteria.clear();
        self.page = 1;
    }
}

/// One page of the list of candidates.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ListPage<'a> {
    pub candidates: Vec<&'a Candidate>,
    /// The number of candidates matching the selection, over all the pages.
    pub matches: usize,
    pub page: usize,
    pub total_pages: usize,
    /// The page numbers to offer for navigation.
    pub pages: Vec<usize>,
}

/// Everything needed to draw a view.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub kind: ViewKind,
    pub loading: bool,
    pub diagnostics: &'a [String],
    pub criteria: &'a Criteria,
    /// For each filter, the values that can be selected.
    pub options: Vec<(Field, Vec<&'a str>)>,
    pub list: Option<ListPage<'a>>,
    pub chart: Option<ChartData>,
}

#[derive(Debug, Clone)]
pub struct View {
    kind: ViewKind,
    token: MountToken,
    state: ViewState,
    load: LoadState,
    display: DisplayOptions,
}

impl View {
    fn new(kind: ViewKind, token: MountToken, display: DisplayOptions) -> View {
        View {
            kind,
            token,
            state: ViewState::new(&NAME_FIELDS),
            load: LoadState::Loading,
            display,
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    fn records(&self) -> &[Candidate] {
        match &self.load {
            LoadState::Loading => &[],
            LoadState::Loaded(s) => &s.records,
        }
    }

    fn diagnostics(&self) -> &[String] {
        match &self.load {
            LoadState::Loading => &[],
            LoadState::Loaded(s) => &s.diagnostics,
        }
    }

    /// Sets the search text. Returns false if this view has no search: the
    /// search only narrows lists, and the pie view has none.
    pub fn set_search(&mut self, query: &str) -> bool {
        if !self.kind.has_list() {
            return false;
        }
        debug!("{}: search {:?}", self.kind.path(), query);
        self.state.set_search(query);
        true
    }

    /// Selects a value for one of the filters of this view.
    /// Returns false if this view has no filter for this field.
    pub fn select(&mut self, field: Field, value: Option<&str>) -> bool {
        if !self.kind.filter_fields().contains(&field) {
            return false;
        }
        debug!("{}: select {:?} = {:?}", self.kind.path(), field, value);
        self.state.select(field, value);
        true
    }

    pub fn clear_filters(&mut self) {
        self.state.clear();
    }

    /// The candidates that match the current selection.
    pub fn matching(&self) -> Vec<&Candidate> {
        self.state.criteria.apply(self.records())
    }

    pub fn total_pages(&self) -> usize {
        if !self.kind.has_list() {
            return 0;
        }
        total_pages(self.matching().len(), self.display.page_size)
    }

    /// Moves to a page, clamped to the existing pages. Returns the new page.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.state.page = clamp_page(page, self.total_pages());
        self.state.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.state.page + 1)
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.state.page.saturating_sub(1))
    }

    pub fn frame(&self) -> Frame<'_> {
        let records = self.records();
        let options = self
            .kind
            .filter_fields()
            .iter()
            .map(|f| (*f, distinct_values(records, *f)))
            .collect();
        let (list, chart) = match self.kind {
            ViewKind::Home => (Some(self.list_page()), None),
            ViewKind::Bar => (Some(self.list_page()), Some(self.bar_chart())),
            ViewKind::Pie => (None, Some(self.pie_chart())),
        };
        Frame {
            kind: self.kind,
            loading: self.is_loading(),
            diagnostics: self.diagnostics(),
            criteria: &self.state.criteria,
            options,
            list,
            chart,
        }
    }

    fn list_page(&self) -> ListPage<'_> {
        let matching = self.matching();
        let matches = matching.len();
        let num_pages = total_pages(matches, self.display.page_size);
        let page = clamp_page(self.state.page, num_pages);
        let candidates: Vec<&Candidate> = if num_pages == 0 {
            Vec::new()
        } else {
            match paginate(&matching, self.display.page_size, page) {
                Ok(slice) => slice.to_vec(),
                Err(e) => {
                    warn!("{}: {}", self.kind.path(), e);
                    Vec::new()
                }
            }
        };
        ListPage {
            candidates,
            matches,
            page,
            total_pages: num_pages,
            pages: visible_page_window(num_pages, page, self.display.visible_pages),
        }
    }

    // The bars are only narrowed by the department: the selected label is
    // highlighted in the list below the chart.
    fn bar_chart(&self) -> ChartData {
        let records = self.records();
        let all_labels = distinct_values(records, Field::NuanceLabel);
        let in_department = filter_by_category(
            records,
            Field::Department,
            self.state.criteria.selected(Field::Department),
        );
        let counts = count_by_category(in_department, Field::NuanceLabel);
        bar_chart_data(
            &counts,
            &all_labels,
            &self.display.palette,
            &self.display.series_label,
        )
    }

    fn pie_chart(&self) -> ChartData {
        let all_codes = distinct_values(self.records(), Field::NuanceCode);
        let counts = count_by_composite_key(
            self.matching(),
            CompositeKey::by_fields(Field::Department, Field::NuanceCode),
        );
        pie_chart_data(
            &counts,
            &all_codes,
            &self.display.palette,
            &self.display.series_label,
        )
    }
}

/// Opens the views, one at a time.
///
/// Leaving a view drops its selection. Every navigation creates a new mount
/// token; the data must be delivered with the token of the current mount.
#[derive(Debug)]
pub struct Navigator {
    generation: u64,
    current: Option<View>,
    display: DisplayOptions,
}

impl Navigator {
    pub fn new(display: DisplayOptions) -> Navigator {
        Navigator {
            generation: 0,
            current: None,
            display,
        }
    }

    pub fn navigate(&mut self, path: &str) -> DashResult<MountToken> {
        let kind = ViewKind::from_path(path).context(UnknownViewSnafu { path })?;
        if let Some(old) = self.current.take() {
            info!("Leaving view {}", old.kind.path());
        }
        self.generation += 1;
        let token = MountToken(self.generation);
        info!("Opening view {} ({:?})", kind.path(), token);
        self.current = Some(View::new(kind, token, self.display.clone()));
        Ok(token)
    }

    /// Hands the loaded data to the view. Returns false if the view it was
    /// loaded for is no longer open, in which case the data is dropped.
    pub fn deliver(&mut self, token: MountToken, snapshot: Snapshot) -> bool {
        match self.current.as_mut() {
            Some(view) if view.token == token => {
                view.load = LoadState::Loaded(snapshot);
                true
            }
            _ => {
                warn!("Discarding data loaded for a view that is no longer open ({:?})", token);
                false
            }
        }
    }

    pub fn unmount(&mut self) {
        if let Some(old) = self.current.take() {
            info!("Leaving view {}", old.kind.path());
        }
    }

    pub fn current(&self) -> Option<&View> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut View> {
        self.current.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: usize, code: &str, department: &str) -> Candidate {
        CandidateBuilder::new(id.to_string())
            .names("Jean", &format!("Nom{}", id))
            .department(department)
            .nuance(code, &format!("Libellé {}", code))
            .build()
    }

    // 5 LR, 4 ENS, 3 RN
    fn twelve() -> Snapshot {
        let codes = [
            "LR", "LR", "LR", "LR", "LR", "ENS", "ENS", "ENS", "ENS", "RN", "RN", "RN",
        ];
        Snapshot {
            records: codes
                .iter()
                .enumerate()
                .map(|(idx, code)| {
                    candidate(idx + 1, code, if idx < 6 { "Ain" } else { "Aisne" })
                })
                .collect(),
            diagnostics: Vec::new(),
        }
    }

    fn open(path: &str, snapshot: Snapshot) -> Navigator {
        let mut nav = Navigator::new(DisplayOptions::default());
        let token = nav.navigate(path).unwrap();
        assert!(nav.deliver(token, snapshot));
        nav
    }

    fn ids(list: &ListPage) -> Vec<String> {
        list.candidates.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn paths() {
        assert_eq!(ViewKind::from_path("/"), Some(ViewKind::Home));
        assert_eq!(ViewKind::from_path(""), Some(ViewKind::Home));
        assert_eq!(ViewKind::from_path("/chart"), Some(ViewKind::Bar));
        assert_eq!(ViewKind::from_path("bar"), Some(ViewKind::Bar));
        assert_eq!(ViewKind::from_path("/pie/"), Some(ViewKind::Pie));
        assert_eq!(ViewKind::from_path("/results"), None);
        for k in [ViewKind::Home, ViewKind::Bar, ViewKind::Pie] {
            assert_eq!(ViewKind::from_path(k.path()), Some(k));
        }
    }

    #[test]
    fn home_pages() {
        let mut nav = open("/", twelve());
        let view = nav.current_mut().unwrap();
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.go_to_page(2), 2);
        let frame = view.frame();
        let list = frame.list.as_ref().unwrap();
        assert_eq!(ids(list), vec!["6", "7", "8", "9", "10"]);
        assert_eq!(list.pages, vec![1, 2, 3]);
        assert_eq!(list.matches, 12);
        assert!(frame.chart.is_none());
    }

    #[test]
    fn paging_is_clamped() {
        let mut nav = open("/", twelve());
        let view = nav.current_mut().unwrap();
        assert_eq!(view.go_to_page(9), 3);
        assert_eq!(view.next_page(), 3);
        assert_eq!(view.previous_page(), 2);
        assert_eq!(view.previous_page(), 1);
        assert_eq!(view.previous_page(), 1);
        assert_eq!(view.go_to_page(0), 1);
    }

    #[test]
    fn filters_reset_the_page() {
        let mut nav = open("/", twelve());
        let view = nav.current_mut().unwrap();
        view.go_to_page(3);
        assert!(view.select(Field::NuanceCode, Some("ENS")));
        assert_eq!(view.state().page, 1);
        view.go_to_page(2);
        assert_eq!(view.state().page, 1);
        view.select(Field::NuanceCode, None);
        view.go_to_page(2);
        view.set_search("nom1");
        assert_eq!(view.state().page, 1);
        let frame = view.frame();
        // Nom1, Nom10, Nom11, Nom12
        assert_eq!(frame.list.unwrap().matches, 4);
    }

    #[test]
    fn shrinking_selection_clamps_the_shown_page() {
        let mut nav = open("/", twelve());
        let view = nav.current_mut().unwrap();
        view.go_to_page(3);
        // Direct state changes do not go through the page reset.
        view.state.criteria.select(Field::NuanceCode, Some("RN"));
        let frame = view.frame();
        let list = frame.list.unwrap();
        assert_eq!(list.page, 1);
        assert_eq!(ids(&list), vec!["10", "11", "12"]);
    }

    #[test]
    fn home_options() {
        let nav = open("/", twelve());
        let frame = nav.current().unwrap().frame();
        assert_eq!(frame.options.len(), 3);
        assert_eq!(frame.options[0], (Field::Department, vec!["Ain", "Aisne"]));
        assert_eq!(frame.options[1].1, vec!["LR", "ENS", "RN"]);
    }

    #[test]
    fn bar_view() {
        let mut nav = open("/chart", twelve());
        let view = nav.current_mut().unwrap();
        assert!(!view.select(Field::NuanceCode, Some("RN")));
        assert!(view.select(Field::NuanceLabel, Some("Libellé RN")));
        let frame = view.frame();
        let chart = frame.chart.as_ref().unwrap();
        assert_eq!(chart.labels, vec!["Libellé LR", "Libellé ENS", "Libellé RN"]);
        assert_eq!(chart.datasets[0].data, vec![5, 4, 3]);
        assert_eq!(chart.datasets[0].colors[2], DEFAULT_PALETTE[2]);
        assert_eq!(ids(frame.list.as_ref().unwrap()), vec!["10", "11", "12"]);
    }

    #[test]
    fn bar_view_by_department() {
        let mut nav = open("/chart", twelve());
        let view = nav.current_mut().unwrap();
        view.select(Field::Department, Some("Aisne"));
        let frame = view.frame();
        let chart = frame.chart.unwrap();
        assert_eq!(chart.labels, vec!["Libellé ENS", "Libellé RN"]);
        assert_eq!(chart.datasets[0].data, vec![3, 3]);
        // Colors follow the whole list, not the selection.
        assert_eq!(chart.datasets[0].colors[0], DEFAULT_PALETTE[1]);
    }

    #[test]
    fn pie_view() {
        let mut nav = open("/pie", twelve());
        let view = nav.current_mut().unwrap();
        assert_eq!(view.total_pages(), 0);
        let frame = view.frame();
        assert!(frame.list.is_none());
        let chart = frame.chart.unwrap();
        assert_eq!(
            chart.labels,
            vec!["Ain - LR", "Ain - ENS", "Aisne - ENS", "Aisne - RN"]
        );
        assert_eq!(chart.datasets[0].data, vec![5, 1, 3, 3]);
        view.select(Field::NuanceCode, Some("ENS"));
        let chart = view.frame().chart.unwrap();
        assert_eq!(chart.datasets[0].data, vec![1, 3]);
        assert_eq!(chart.datasets[0].colors[0], DEFAULT_PALETTE[1]);
    }

    #[test]
    fn empty_dataset() {
        for path in ["/", "/chart", "/pie"] {
            let nav = open(path, Snapshot::default());
            let view = nav.current().unwrap();
            assert_eq!(view.total_pages(), 0);
            let frame = view.frame();
            if let Some(list) = frame.list {
                assert_eq!(list.total_pages, 0);
                assert!(list.candidates.is_empty());
                assert!(list.pages.is_empty());
            }
            if let Some(chart) = frame.chart {
                assert!(chart.labels.is_empty());
                assert_eq!(chart.datasets.len(), 1);
                assert!(chart.datasets[0].data.is_empty());
            }
        }
    }

    #[test]
    fn pie_view_has_no_search() {
        let mut nav = open("/pie", twelve());
        let view = nav.current_mut().unwrap();
        assert!(!view.set_search("nom1"));
        assert_eq!(view.state().criteria.query(), "");
        let chart = view.frame().chart.unwrap();
        assert_eq!(chart.datasets[0].data, vec![5, 1, 3, 3]);
    }

    #[test]
    fn loading_view_is_empty() {
        let mut nav = Navigator::new(DisplayOptions::default());
        nav.navigate("/chart").unwrap();
        let view = nav.current().unwrap();
        assert!(view.is_loading());
        let frame = view.frame();
        assert!(frame.loading);
        assert!(frame.chart.unwrap().is_empty());
    }

    #[test]
    fn late_data_is_discarded() {
        let mut nav = Navigator::new(DisplayOptions::default());
        let first = nav.navigate("/").unwrap();
        let second = nav.navigate("/pie").unwrap();
        assert_ne!(first, second);
        assert!(!nav.deliver(first, twelve()));
        assert!(nav.current().unwrap().is_loading());
        assert!(nav.deliver(second, twelve()));
        assert!(!nav.current().unwrap().is_loading());
        nav.unmount();
        assert!(!nav.deliver(second, twelve()));
        assert!(nav.current().is_none());
    }

    #[test]
    fn navigation_drops_the_selection() {
        let mut nav = open("/", twelve());
        nav.current_mut().unwrap().set_search("Nom1");
        let token = nav.navigate("/").unwrap();
        nav.deliver(token, twelve());
        assert_eq!(nav.current().unwrap().state().criteria.query(), "");
        assert!(nav.navigate("/unknown").is_err());
    }
}

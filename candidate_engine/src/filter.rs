use crate::config::*;

/// Does the record belong to the selected category?
///
/// An unset or blank selection accepts every record.
pub fn matches_category(c: &Candidate, field: Field, selected: Option<&str>) -> bool {
    match selected {
        None => true,
        Some(s) if s.trim().is_empty() => true,
        Some(s) => c.category(field) == Some(s),
    }
}

/// Does one of the fields contain the (already lowercased) query?
pub fn matches_search(c: &Candidate, lowercase_query: &str, fields: &[Field]) -> bool {
    if lowercase_query.is_empty() {
        return true;
    }
    fields.iter().any(|f| {
        c.get(*f)
            .map(|v| v.to_lowercase().contains(lowercase_query))
            .unwrap_or(false)
    })
}

/// The records whose `field` equals `selected`, in their original order.
pub fn filter_by_category<'a, I>(records: I, field: Field, selected: Option<&str>) -> Vec<&'a Candidate>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    records
        .into_iter()
        .filter(|c| matches_category(c, field, selected))
        .collect()
}

/// The records for which one of `fields` contains `query`, ignoring case.
pub fn filter_by_search<'a, I>(records: I, query: &str, fields: &[Field]) -> Vec<&'a Candidate>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let q = query.to_lowercase();
    records
        .into_iter()
        .filter(|c| matches_search(c, &q, fields))
        .collect()
}

/// A set of category selections and a search query, applied together.
///
/// Applying the criteria gives the same records as chaining `filter_by_category`
/// for each selection and `filter_by_search`, in any order.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Criteria {
    selections: Vec<(Field, String)>,
    query: String,
    search_fields: Vec<Field>,
}

impl Criteria {
    pub fn new(search_fields: &[Field]) -> Criteria {
        Criteria {
            selections: Vec::new(),
            query: String::new(),
            search_fields: search_fields.to_vec(),
        }
    }

    /// Selects a value for a field, replacing the previous selection.
    /// `None` or a blank value removes the selection.
    pub fn select(&mut self, field: Field, value: Option<&str>) {
        self.selections.retain(|(f, _)| *f != field);
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            self.selections.push((field, v.to_string()));
        }
    }

    pub fn selected(&self, field: Field) -> Option<&str> {
        self.selections
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn selections(&self) -> &[(Field, String)] {
        &self.selections
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn clear(&mut self) {
        self.selections.clear();
        self.query.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty() && self.query.is_empty()
    }

    pub fn matches(&self, c: &Candidate) -> bool {
        self.selections
            .iter()
            .all(|(f, v)| matches_category(c, *f, Some(v.as_str())))
            && matches_search(c, &self.query.to_lowercase(), &self.search_fields)
    }

    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a Candidate>
    where
        I: IntoIterator<Item = &'a Candidate>,
    {
        let q = self.query.to_lowercase();
        records
            .into_iter()
            .filter(|c| {
                self.selections
                    .iter()
                    .all(|(f, v)| matches_category(c, *f, Some(v.as_str())))
                    && matches_search(c, &q, &self.search_fields)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CandidateBuilder;

    fn records() -> Vec<Candidate> {
        vec![
            CandidateBuilder::new("1")
                .names("Marie", "DUPONT")
                .department("Ain")
                .nuance("LR", "Les Républicains")
                .build(),
            CandidateBuilder::new("2")
                .names("Luc", "dupont")
                .department("Aisne")
                .nuance("RN", "Rassemblement National")
                .build(),
            CandidateBuilder::new("3")
                .names("Dupuis", "Martin")
                .department("Ain")
                .nuance("RN", "Rassemblement National")
                .build(),
            CandidateBuilder::new("4")
                .names("Claire", "Bernard")
                .department("Ain")
                .nuance("ENS", "Ensemble")
                .build(),
            CandidateBuilder::new("5").department("Ain").build(),
        ]
    }

    fn ids(cs: &[&Candidate]) -> Vec<String> {
        cs.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn search_ignores_case() {
        let rs = records();
        let found = filter_by_search(&rs, "dup", &[Field::FamilyName]);
        assert_eq!(ids(&found), vec!["1", "2"]);
        let found = filter_by_search(&rs, "DUP", &[Field::FamilyName, Field::GivenName]);
        assert_eq!(ids(&found), vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_selection_and_query_are_identity() {
        let rs = records();
        assert_eq!(filter_by_category(&rs, Field::NuanceCode, None).len(), 5);
        assert_eq!(filter_by_category(&rs, Field::NuanceCode, Some("")).len(), 5);
        assert_eq!(filter_by_search(&rs, "", &[Field::FamilyName]).len(), 5);
    }

    #[test]
    fn missing_fields_never_match() {
        let rs = records();
        let found = filter_by_search(&rs, "a", &[Field::FamilyName]);
        assert!(!ids(&found).contains(&"5".to_string()));
        let rn = filter_by_category(&rs, Field::NuanceCode, Some("RN"));
        assert_eq!(ids(&rn), vec!["2", "3"]);
    }

    #[test]
    fn filters_commute() {
        let rs = records();
        let fields = [Field::FamilyName, Field::GivenName];
        for code in [None, Some("RN"), Some("LR"), Some("ENS"), Some("XX")] {
            for q in ["", "dup", "ar", "zz"] {
                let a = filter_by_search(filter_by_category(&rs, Field::NuanceCode, code), q, &fields);
                let b = filter_by_category(filter_by_search(&rs, q, &fields), Field::NuanceCode, code);
                assert_eq!(a, b, "code {:?} query {:?}", code, q);
            }
        }
    }

    #[test]
    fn criteria_matches_chained_filters() {
        let rs = records();
        let mut crit = Criteria::new(&[Field::FamilyName, Field::GivenName]);
        crit.select(Field::Department, Some("Ain"));
        crit.select(Field::NuanceLabel, Some("Rassemblement National"));
        crit.set_query("DUP");
        let expected = filter_by_search(
            filter_by_category(
                filter_by_category(&rs, Field::Department, Some("Ain")),
                Field::NuanceLabel,
                Some("Rassemblement National"),
            ),
            "DUP",
            &[Field::FamilyName, Field::GivenName],
        );
        assert_eq!(crit.apply(&rs), expected);
        assert_eq!(ids(&expected), vec!["3"]);
        assert!(crit.matches(&rs[2]));
        assert!(!crit.matches(&rs[0]));
    }

    #[test]
    fn criteria_selection_replaces_and_clears() {
        let mut crit = Criteria::new(&[Field::FamilyName]);
        crit.select(Field::NuanceCode, Some("RN"));
        crit.select(Field::NuanceCode, Some("LR"));
        assert_eq!(crit.selected(Field::NuanceCode), Some("LR"));
        assert_eq!(crit.selections().len(), 1);
        crit.select(Field::NuanceCode, Some(""));
        assert_eq!(crit.selected(Field::NuanceCode), None);
        crit.set_query("x");
        assert!(!crit.is_empty());
        crit.clear();
        assert!(crit.is_empty());
    }

    #[test]
    fn blank_selection_does_nothing() {
        let rs = records();
        assert_eq!(filter_by_category(&rs, Field::NuanceCode, Some("  ")).len(), 5);
        let mut crit = Criteria::new(&[Field::FamilyName]);
        crit.select(Field::Department, Some(" \t"));
        assert_eq!(crit.selected(Field::Department), None);
        assert!(crit.is_empty());
        assert_eq!(crit.apply(&rs).len(), 5);
    }
}

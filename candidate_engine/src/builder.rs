pub use crate::config::*;

/// A builder for candidate records.
///
/// Readers go through `field`, which accepts any field by name. The other
/// methods are shortcuts for the common groups of fields.
///
/// ```
/// use candidate_engine::builder::CandidateBuilder;
/// use candidate_engine::Field;
///
/// let c = CandidateBuilder::new("75-01-3")
///     .names("Marie", "Dupont")
///     .department("Paris")
///     .field(Field::Constituency, "1ère circonscription")
///     .nuance("ENS", "Ensemble")
///     .build();
///
/// assert_eq!(c.display(Field::FamilyName), "Dupont");
/// assert_eq!(c.display(Field::Civility), "");
/// ```
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    _candidate: Candidate,
}

impl CandidateBuilder {
    pub fn new<S: Into<String>>(id: S) -> CandidateBuilder {
        CandidateBuilder {
            _candidate: Candidate {
                id: id.into(),
                ..Candidate::default()
            },
        }
    }

    pub fn field<S: Into<String>>(mut self, field: Field, value: S) -> CandidateBuilder {
        self._candidate.set(field, Some(value.into()));
        self
    }

    /// Sets a field only when a value is present.
    pub fn field_opt(mut self, field: Field, value: Option<String>) -> CandidateBuilder {
        if value.is_some() {
            self._candidate.set(field, value);
        }
        self
    }

    pub fn names(self, given_name: &str, family_name: &str) -> CandidateBuilder {
        self.field(Field::GivenName, given_name)
            .field(Field::FamilyName, family_name)
    }

    pub fn civility(self, civility: &str) -> CandidateBuilder {
        self.field(Field::Civility, civility)
    }

    pub fn department(self, department: &str) -> CandidateBuilder {
        self.field(Field::Department, department)
    }

    pub fn constituency(self, constituency: &str) -> CandidateBuilder {
        self.field(Field::Constituency, constituency)
    }

    pub fn panel_number(self, panel_number: &str) -> CandidateBuilder {
        self.field(Field::PanelNumber, panel_number)
    }

    pub fn nuance(self, code: &str, label: &str) -> CandidateBuilder {
        self.field(Field::NuanceCode, code)
            .field(Field::NuanceLabel, label)
    }

    pub fn build(self) -> Candidate {
        self._candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_stay_empty() {
        let c = CandidateBuilder::new("1")
            .field_opt(Field::Civility, None)
            .field_opt(Field::Department, Some("Ain".to_string()))
            .build();
        assert_eq!(c.civility, None);
        assert_eq!(c.department.as_deref(), Some("Ain"));
        assert_eq!(c.display(Field::PanelNumber), "");
        assert_eq!(c.get(Field::Id), Some("1"));
    }

    #[test]
    fn source_keys() {
        for f in Field::ALL {
            assert_eq!(Field::from_source_key(f.source_key()), Some(f));
        }
        assert_eq!(Field::from_source_key(" NomCandidat "), Some(Field::FamilyName));
        assert_eq!(Field::from_source_key("inconnu"), None);
    }

    #[test]
    fn blank_values_are_not_categories() {
        let c = CandidateBuilder::new("1").nuance(" ", "Divers").build();
        assert_eq!(c.category(Field::NuanceCode), None);
        assert_eq!(c.category(Field::NuanceLabel), Some("Divers"));
        assert_eq!(c.display(Field::NuanceCode), " ");
    }
}

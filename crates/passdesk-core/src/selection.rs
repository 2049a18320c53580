//! Narrowing the pass listing and picking the records a bulk run targets.

use indexmap::IndexSet;

use crate::model::PassRecord;

/// Per-column search terms. Every non-empty term must occur in its column,
/// ignoring case.
///
/// The block, row and seat columns read the auxiliary fields by position,
/// so a standing record's number is searched as its block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassFilter {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub block: String,
    pub row: String,
    pub seat: String,
    pub status: String,
}

impl PassFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, term: impl Into<String>) -> Self {
        self.email = term.into();
        self
    }

    pub fn first_name(mut self, term: impl Into<String>) -> Self {
        self.first_name = term.into();
        self
    }

    pub fn last_name(mut self, term: impl Into<String>) -> Self {
        self.last_name = term.into();
        self
    }

    pub fn block(mut self, term: impl Into<String>) -> Self {
        self.block = term.into();
        self
    }

    pub fn row(mut self, term: impl Into<String>) -> Self {
        self.row = term.into();
        self
    }

    pub fn seat(mut self, term: impl Into<String>) -> Self {
        self.seat = term.into();
        self
    }

    pub fn status(mut self, term: impl Into<String>) -> Self {
        self.status = term.into();
        self
    }

    pub fn matches(&self, record: &PassRecord) -> bool {
        let aux = record.pass_data.auxiliary_fields();
        let aux_text = |i: usize| aux.get(i).map(|f| f.value_text()).unwrap_or_default();

        contains(&record.email, &self.email)
            && contains(&record.first_name, &self.first_name)
            && contains(&record.last_name, &self.last_name)
            && contains(&aux_text(0), &self.block)
            && contains(&aux_text(1), &self.row)
            && contains(&aux_text(2), &self.seat)
            && contains(record.status.as_deref().unwrap_or_default(), &self.status)
    }

    /// Records that match, in listing order.
    pub fn apply<'a>(&self, records: &'a [PassRecord]) -> Vec<&'a PassRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Serials picked for a bulk run, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    serials: IndexSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `serial`, or remove it if already picked. Returns whether it is
    /// selected afterwards.
    pub fn toggle(&mut self, serial: &str) -> bool {
        if self.serials.shift_remove(serial) {
            false
        } else {
            self.serials.insert(serial.to_string());
            true
        }
    }

    /// Clear every visible record if all of them are selected, otherwise
    /// select them all. Records outside `visible` are left as they are.
    pub fn toggle_all(&mut self, visible: &[&PassRecord]) {
        let all_selected = visible
            .iter()
            .all(|r| self.serials.contains(&r.serial_number));
        for record in visible {
            if all_selected {
                self.serials.shift_remove(&record.serial_number);
            } else {
                self.serials.insert(record.serial_number.clone());
            }
        }
    }

    pub fn contains(&self, serial: &str) -> bool {
        self.serials.contains(serial)
    }

    pub fn len(&self) -> usize {
        self.serials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.serials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.serials.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.serials.clear();
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.serials.iter()
    }
}

impl FromIterator<String> for Selection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            serials: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::to_standing;
    use crate::model::fixtures::season_ticket;

    fn record(serial: &str, first: &str, email: &str, status: Option<&str>) -> PassRecord {
        PassRecord {
            serial_number: serial.into(),
            email: email.into(),
            first_name: first.into(),
            last_name: "Fan".into(),
            status: status.map(Into::into),
            pass_data: season_ticket(),
        }
    }

    fn listing() -> Vec<PassRecord> {
        let mut standing = record("C", "Cy", "cy@example.com", None);
        standing.pass_data.set_auxiliary_fields(to_standing("42"));
        vec![
            record("A", "Ada", "ada@example.com", Some("sent")),
            record("B", "Bob", "bob@example.org", Some("bounced")),
            standing,
        ]
    }

    fn serials(records: &[&PassRecord]) -> Vec<String> {
        records.iter().map(|r| r.serial_number.clone()).collect()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let rows = listing();
        assert_eq!(PassFilter::new().apply(&rows).len(), 3);
    }

    #[test]
    fn test_terms_are_case_insensitive_and_combined() {
        let rows = listing();
        let filter = PassFilter::new().email("EXAMPLE.COM").first_name("a");
        assert_eq!(serials(&filter.apply(&rows)), ["A"]);
    }

    #[test]
    fn test_aux_columns_are_positional() {
        let rows = listing();
        assert_eq!(serials(&PassFilter::new().row("b").apply(&rows)), ["A", "B"]);
        assert_eq!(serials(&PassFilter::new().block("42").apply(&rows)), ["C"]);
        assert!(PassFilter::new().seat("5").apply(&rows[2..]).is_empty());
    }

    #[test]
    fn test_status_filter_skips_records_without_status() {
        let rows = listing();
        assert_eq!(serials(&PassFilter::new().status("Bounce").apply(&rows)), ["B"]);
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert!(selection.toggle("A"));
        assert!(selection.toggle("B"));
        assert!(!selection.toggle("A"));
        assert_eq!(selection.iter().collect::<Vec<_>>(), ["B"]);
    }

    #[test]
    fn test_toggle_all_over_visible_records() {
        let rows = listing();
        let visible = PassFilter::new().email(".com").apply(&rows);
        let mut selection: Selection = ["B".to_string()].into_iter().collect();

        selection.toggle_all(&visible);
        assert_eq!(selection.iter().collect::<Vec<_>>(), ["B", "A", "C"]);

        selection.toggle_all(&visible);
        assert_eq!(selection.iter().collect::<Vec<_>>(), ["B"]);
    }
}

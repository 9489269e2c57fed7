//! Remote Select State
//!
//! Widget-local state of a remote select: selection, search gating and the
//! loading guard that keeps initial population from being saved back.

use crate::models::SelectOption;

/// Search starts once the term has this many characters
pub const MIN_INPUT_LENGTH: usize = 3;

/// Debounce before a search request is sent
pub const SEARCH_DELAY_MS: u32 = 250;

/// Id given to options created from typed text
pub const NEW_TAG_ID: &str = "0";

/// Lifecycle of one widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetState {
    /// Initial values are being fetched; changes are not saved
    #[default]
    Loading,
    Ready,
}

impl WidgetState {
    pub fn accepts_saves(self) -> bool {
        self == Self::Ready
    }
}

/// Whether `term` is long enough to search for.
pub fn should_search(term: &str) -> bool {
    term.trim().chars().count() >= MIN_INPUT_LENGTH
}

/// New option for free text, `None` for blank input.
pub fn create_tag(term: &str) -> Option<SelectOption> {
    let text = term.trim();
    if text.is_empty() {
        return None;
    }
    Some(SelectOption {
        id: NEW_TAG_ID.to_string(),
        text: text.to_string(),
        new_tag: true,
    })
}

/// Split typed input at token separators (`,` and `, `).
///
/// Returns the completed tokens and the text after the last separator,
/// which stays in the input.
pub fn split_tokens(input: &str) -> (Vec<String>, String) {
    let mut parts: Vec<&str> = input.split(',').collect();
    let rest = parts.pop().unwrap_or("");
    let tokens = parts
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    let rest = if input.contains(',') { rest.trim_start() } else { rest };
    (tokens, rest.to_string())
}

/// Current choice of a widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<SelectOption>,
    multiple: bool,
}

impl Selection {
    pub fn new(multiple: bool) -> Self {
        Self {
            items: Vec::new(),
            multiple,
        }
    }

    pub fn items(&self) -> &[SelectOption] {
        &self.items
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn contains(&self, option: &SelectOption) -> bool {
        self.items.iter().any(|o| same_option(o, option))
    }

    /// Add an option (replace, for single selects). Returns whether the
    /// selection changed.
    pub fn select(&mut self, option: SelectOption) -> bool {
        if self.contains(&option) {
            return false;
        }
        if !self.multiple {
            self.items.clear();
        }
        self.items.push(option);
        true
    }

    /// Remove the option at `pos`. Returns the removed option.
    pub fn unselect(&mut self, pos: usize) -> Option<SelectOption> {
        (pos < self.items.len()).then(|| self.items.remove(pos))
    }

    /// Add the initial values from the server to what the markup preselected.
    pub fn merge(&mut self, items: Vec<SelectOption>) {
        for item in items {
            self.select(item);
        }
    }
}

/// Options offered below the search box. With `tags` enabled the typed text
/// comes first as a new option unless a result already has that text.
pub fn suggestions(results: &[SelectOption], query: &str, tags: bool) -> Vec<SelectOption> {
    let mut list = results.to_vec();
    if tags {
        if let Some(tag) = create_tag(query) {
            let known = list.iter().any(|o| o.text.to_lowercase() == tag.text.to_lowercase());
            if !known {
                list.insert(0, tag);
            }
        }
    }
    list
}

/// New tags all share id `0`, so they are told apart by text.
fn same_option(a: &SelectOption, b: &SelectOption) -> bool {
    if a.id == NEW_TAG_ID || b.id == NEW_TAG_ID {
        a.id == b.id && a.text == b.text
    } else {
        a.id == b.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_state_gates_saves() {
        assert!(!WidgetState::default().accepts_saves());
        assert!(WidgetState::Ready.accepts_saves());
    }

    #[test]
    fn test_should_search() {
        assert!(!should_search("ab"));
        assert!(!should_search("  ab  "));
        assert!(should_search("abc"));
        assert!(should_search("äöå"));
    }

    #[test]
    fn test_create_tag() {
        let tag = create_tag("  avaruusooppera ").unwrap();
        assert_eq!(tag.id, NEW_TAG_ID);
        assert_eq!(tag.text, "avaruusooppera");
        assert!(tag.new_tag);
        assert_eq!(create_tag("   "), None);
    }

    #[test]
    fn test_split_tokens() {
        assert_eq!(split_tokens("scifi"), (vec![], "scifi".to_string()));
        assert_eq!(
            split_tokens("scifi, fantasia,kauhu"),
            (vec!["scifi".to_string(), "fantasia".to_string()], "kauhu".to_string())
        );
        assert_eq!(split_tokens("scifi, "), (vec!["scifi".to_string()], String::new()));
        assert_eq!(split_tokens(",,"), (vec![], String::new()));
    }

    #[test]
    fn test_multiple_selection() {
        let mut sel = Selection::new(true);
        assert!(sel.select(SelectOption::new("1", "A")));
        assert!(sel.select(SelectOption::new("2", "B")));
        assert!(!sel.select(SelectOption::new("1", "A")));
        assert_eq!(sel.items().len(), 2);
        assert_eq!(sel.unselect(0), Some(SelectOption::new("1", "A")));
        assert_eq!(sel.unselect(5), None);
        assert_eq!(sel.items(), &[SelectOption::new("2", "B")]);
    }

    #[test]
    fn test_single_selection_replaces() {
        let mut sel = Selection::new(false);
        sel.select(SelectOption::new("1", "A"));
        sel.select(SelectOption::new("2", "B"));
        assert_eq!(sel.items(), &[SelectOption::new("2", "B")]);
    }

    #[test]
    fn test_new_tags_compared_by_text() {
        let mut sel = Selection::new(true);
        assert!(sel.select(create_tag("one").unwrap()));
        assert!(sel.select(create_tag("two").unwrap()));
        assert!(!sel.select(create_tag("one").unwrap()));
        assert_eq!(sel.items().len(), 2);
    }

    #[test]
    fn test_merge_deduplicates() {
        let mut sel = Selection::new(true);
        sel.select(SelectOption::new("3", "C"));
        sel.merge(vec![
            SelectOption::new("1", "A"),
            SelectOption::new("1", "A"),
            SelectOption::new("3", "C"),
        ]);
        assert_eq!(sel.items().len(), 2);
    }

    #[test]
    fn test_suggestions() {
        let results = vec![SelectOption::new("5", "Scifi")];
        assert_eq!(suggestions(&results, "sci", false), results);

        let with_tag = suggestions(&results, "scifi-klassikot", true);
        assert_eq!(with_tag.len(), 2);
        assert!(with_tag[0].new_tag);
        assert_eq!(with_tag[0].text, "scifi-klassikot");

        // Exact (case-insensitive) match does not add a duplicate.
        assert_eq!(suggestions(&results, "SCIFI", true), results);
        assert_eq!(suggestions(&[], "  ", true), vec![]);
    }
}

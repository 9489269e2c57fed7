//! Field-set model
//!
//! An ordered list of entries, each carrying its index as a plain field.
//! Input identifiers are derived from that index with [`FieldId`].

use crate::{FieldId, FieldSetError};

/// Kind of form control a template field renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// `<input>` with the given `type` (text, number, date, ...)
    Text(String),
    Checkbox,
    Radio,
    Select,
    TextArea,
    Hidden,
}

impl InputKind {
    /// Classify a control from its tag name and `type` attribute.
    /// Buttons are not data fields and yield `None`.
    pub fn classify(tag: &str, type_attr: Option<&str>) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "select" => Some(Self::Select),
            "textarea" => Some(Self::TextArea),
            "input" => {
                let ty = type_attr.unwrap_or("text").to_ascii_lowercase();
                match ty.as_str() {
                    "button" | "submit" | "reset" | "image" => None,
                    "checkbox" => Some(Self::Checkbox),
                    "radio" => Some(Self::Radio),
                    "hidden" => Some(Self::Hidden),
                    _ => Some(Self::Text(ty)),
                }
            }
            _ => None,
        }
    }

    pub fn is_checkable(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }

    /// Value of a freshly cleared control.
    pub fn empty_value(&self) -> FieldValue {
        if self.is_checkable() {
            FieldValue::Checked(false)
        } else {
            FieldValue::Text(String::new())
        }
    }
}

/// Current value of one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Checked(_) => "",
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, Self::Checked(true))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Checked(c) => !c,
        }
    }
}

/// Shape of one field, shared by every entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTemplate {
    /// Field part of the identifier (`name` in `items-0-name`)
    pub name: String,
    pub kind: InputKind,
    pub label: Option<String>,
    pub class: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    /// `value` attribute of checkbox/radio controls
    pub check_value: Option<String>,
    /// `(value, text)` pairs of a select
    pub options: Vec<(String, String)>,
}

impl FieldTemplate {
    pub fn new(name: impl Into<String>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            class: None,
            placeholder: None,
            required: false,
            check_value: None,
            options: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// One control as found in server-rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput {
    /// `id` attribute, falling back to `name`
    pub id: String,
    pub template: FieldTemplate,
    pub value: FieldValue,
}

/// One repeatable group of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub index: usize,
    /// Values in template order
    pub values: Vec<FieldValue>,
}

/// What happens to the indices of the remaining entries after a removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovePolicy {
    /// Leave indices alone; gaps are accepted by the server.
    #[default]
    KeepGaps,
    /// Reassign `0..n` in display order.
    Renumber,
}

/// Outcome of [`FieldSet::remove_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// The entry was the last one and was cleared in place.
    Cleared,
}

/// Ordered, never-empty list of entries sharing one set of field templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    prefix: String,
    templates: Vec<FieldTemplate>,
    entries: Vec<Entry>,
    policy: RemovePolicy,
}

impl FieldSet {
    /// Build a field set with `count` empty entries numbered from zero.
    pub fn new(
        prefix: impl Into<String>,
        templates: Vec<FieldTemplate>,
        count: usize,
        policy: RemovePolicy,
    ) -> Result<Self, FieldSetError> {
        let prefix = prefix.into();
        if count == 0 {
            return Err(FieldSetError::NoEntries(prefix));
        }
        let entries = (0..count)
            .map(|index| Entry {
                index,
                values: templates.iter().map(|t| t.kind.empty_value()).collect(),
            })
            .collect();
        Ok(Self {
            prefix,
            templates,
            entries,
            policy,
        })
    }

    /// Build a field set from scanned markup, one `Vec<RawInput>` per entry.
    ///
    /// The last entry provides the field templates, as it is the one cloned
    /// on add. Each entry's index comes from its first input; all other
    /// inputs must agree with it and share the prefix. Indices must be
    /// strictly ascending in display order.
    pub fn from_raw(
        container: &str,
        rows: Vec<Vec<RawInput>>,
        policy: RemovePolicy,
    ) -> Result<Self, FieldSetError> {
        let template_row = match rows.last() {
            Some(row) if !row.is_empty() => row,
            _ => return Err(FieldSetError::NoEntries(container.to_string())),
        };

        let first = FieldId::parse(&template_row[0].id)?;
        let prefix = first.prefix.clone();

        let mut templates = Vec::with_capacity(template_row.len());
        for input in template_row {
            let id = FieldId::parse(&input.id)?;
            let mut template = input.template.clone();
            template.name = id.field;
            templates.push(template);
        }

        let mut entries: Vec<Entry> = Vec::with_capacity(rows.len());
        for row in &rows {
            let Some(head) = row.first() else {
                return Err(FieldSetError::NoEntries(container.to_string()));
            };
            let index = FieldId::parse(&head.id)?.index;
            if let Some(previous) = entries.last().map(|e| e.index) {
                if index <= previous {
                    return Err(FieldSetError::UnorderedEntry { index, previous });
                }
            }
            let mut values: Vec<FieldValue> =
                templates.iter().map(|t| t.kind.empty_value()).collect();

            for input in row {
                let id = FieldId::parse(&input.id)?;
                if id.prefix != prefix {
                    return Err(FieldSetError::ForeignIdentifier {
                        expected: prefix,
                        found: input.id.clone(),
                    });
                }
                if id.index != index {
                    return Err(FieldSetError::InconsistentEntry {
                        id: input.id.clone(),
                        expected: index,
                    });
                }
                if let Some(pos) = templates.iter().position(|t| t.name == id.field) {
                    values[pos] = input.value.clone();
                }
            }
            entries.push(Entry { index, values });
        }

        Ok(Self {
            prefix,
            templates,
            entries,
            policy,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn templates(&self) -> &[FieldTemplate] {
        &self.templates
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn policy(&self) -> RemovePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True only for a set built without entries, which the constructors reject.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry indices in display order.
    pub fn indices(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.index).collect()
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.iter().find(|e| e.index == index)
    }

    /// Identifier of field `pos` inside entry `index`.
    pub fn field_id(&self, index: usize, pos: usize) -> Option<FieldId> {
        self.templates
            .get(pos)
            .map(|t| FieldId::new(self.prefix.clone(), index, t.name.clone()))
    }

    pub fn value(&self, index: usize, pos: usize) -> Option<&FieldValue> {
        self.entry(index).and_then(|e| e.values.get(pos))
    }

    pub fn set_value(
        &mut self,
        index: usize,
        pos: usize,
        value: FieldValue,
    ) -> Result<(), FieldSetError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.index == index)
            .ok_or(FieldSetError::UnknownEntry(index))?;
        if let Some(slot) = entry.values.get_mut(pos) {
            *slot = value;
        }
        Ok(())
    }

    /// Append an empty entry after the current last one and return its
    /// index, which is always one more than the previous last index.
    pub fn add_entry(&mut self) -> Result<usize, FieldSetError> {
        let index = match self.entries.last() {
            Some(last) => last
                .index
                .checked_add(1)
                .ok_or(FieldSetError::IndexOverflow(last.index))?,
            None => 0,
        };
        self.entries.push(Entry {
            index,
            values: self.templates.iter().map(|t| t.kind.empty_value()).collect(),
        });
        log::debug!("field set `{}`: added entry {}", self.prefix, index);
        Ok(index)
    }

    /// Remove the entry with `index`, or clear it when it is the only one.
    pub fn remove_entry(&mut self, index: usize) -> Result<Removal, FieldSetError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.index == index)
            .ok_or(FieldSetError::UnknownEntry(index))?;

        if self.entries.len() == 1 {
            let templates = &self.templates;
            let entry = &mut self.entries[pos];
            for (value, template) in entry.values.iter_mut().zip(templates) {
                *value = template.kind.empty_value();
            }
            log::debug!("field set `{}`: cleared last entry {}", self.prefix, index);
            return Ok(Removal::Cleared);
        }

        self.entries.remove(pos);
        if self.policy == RemovePolicy::Renumber {
            for (i, entry) in self.entries.iter_mut().enumerate() {
                entry.index = i;
            }
        }
        log::debug!("field set `{}`: removed entry {}", self.prefix, index);
        Ok(Removal::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(id: &str, value: &str) -> RawInput {
        RawInput {
            id: id.to_string(),
            template: FieldTemplate::new("", InputKind::Text("text".into())),
            value: FieldValue::Text(value.to_string()),
        }
    }

    fn checkbox(id: &str, checked: bool) -> RawInput {
        RawInput {
            id: id.to_string(),
            template: FieldTemplate::new("", InputKind::Checkbox),
            value: FieldValue::Checked(checked),
        }
    }

    fn items(policy: RemovePolicy) -> FieldSet {
        FieldSet::from_raw("items", vec![vec![text("items-0-name", "")]], policy).unwrap()
    }

    #[test]
    fn test_classify() {
        assert_eq!(InputKind::classify("INPUT", None), Some(InputKind::Text("text".into())));
        assert_eq!(InputKind::classify("input", Some("checkbox")), Some(InputKind::Checkbox));
        assert_eq!(InputKind::classify("input", Some("submit")), None);
        assert_eq!(InputKind::classify("select", None), Some(InputKind::Select));
        assert_eq!(InputKind::classify("button", None), None);
    }

    #[test]
    fn test_add_increments_from_last() {
        let mut set = FieldSet::from_raw(
            "items",
            vec![
                vec![text("items-0-name", "A"), checkbox("items-0-main", true)],
                vec![text("items-4-name", "B"), checkbox("items-4-main", true)],
            ],
            RemovePolicy::KeepGaps,
        )
        .unwrap();

        let index = set.add_entry().unwrap();
        assert_eq!(index, 5);
        assert_eq!(set.len(), 3);
        assert_eq!(set.indices(), vec![0, 4, 5]);
        assert_eq!(set.field_id(5, 0).unwrap().to_string(), "items-5-name");
        assert_eq!(set.field_id(5, 1).unwrap().to_string(), "items-5-main");
        let added = set.entry(5).unwrap();
        assert!(added.values.iter().all(FieldValue::is_empty));
        // Existing values are untouched.
        assert_eq!(set.value(4, 0), Some(&FieldValue::Text("B".into())));
        assert!(set.value(4, 1).unwrap().is_checked());
    }

    #[test]
    fn test_repeated_add_never_reuses_index() {
        let mut set = items(RemovePolicy::KeepGaps);
        let added: Vec<usize> = (0..5).map(|_| set.add_entry().unwrap()).collect();
        assert_eq!(added, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_scenario_keep_gaps() {
        let mut set = items(RemovePolicy::KeepGaps);
        assert_eq!(set.add_entry().unwrap(), 1);
        assert_eq!(set.add_entry().unwrap(), 2);
        assert_eq!(set.remove_entry(1), Ok(Removal::Removed));
        assert_eq!(set.indices(), vec![0, 2]);
        // Adding after a gap still increments from the last entry.
        assert_eq!(set.add_entry().unwrap(), 3);
    }

    #[test]
    fn test_scenario_renumber() {
        let mut set = items(RemovePolicy::Renumber);
        set.add_entry().unwrap();
        set.add_entry().unwrap();
        set.set_value(2, 0, FieldValue::Text("third".into())).unwrap();
        assert_eq!(set.remove_entry(1), Ok(Removal::Removed));
        assert_eq!(set.indices(), vec![0, 1]);
        assert_eq!(set.value(1, 0), Some(&FieldValue::Text("third".into())));
        assert_eq!(set.add_entry().unwrap(), 2);
    }

    #[test]
    fn test_remove_last_entry_clears_in_place() {
        let mut set = FieldSet::from_raw(
            "items",
            vec![vec![text("items-0-name", "X"), checkbox("items-0-main", true)]],
            RemovePolicy::KeepGaps,
        )
        .unwrap();

        assert_eq!(set.remove_entry(0), Ok(Removal::Cleared));
        assert_eq!(set.len(), 1);
        assert_eq!(set.indices(), vec![0]);
        assert_eq!(set.value(0, 0), Some(&FieldValue::Text(String::new())));
        assert_eq!(set.value(0, 1), Some(&FieldValue::Checked(false)));
        assert_eq!(set.field_id(0, 0).unwrap().to_string(), "items-0-name");
    }

    #[test]
    fn test_remove_decrements_count() {
        let mut set = items(RemovePolicy::KeepGaps);
        set.add_entry().unwrap();
        set.add_entry().unwrap();
        set.add_entry().unwrap();
        for expected in (1..4).rev() {
            let first = set.indices()[0];
            set.remove_entry(first).unwrap();
            assert_eq!(set.len(), expected);
        }
    }

    #[test]
    fn test_remove_unknown_entry() {
        let mut set = items(RemovePolicy::KeepGaps);
        assert_eq!(set.remove_entry(9), Err(FieldSetError::UnknownEntry(9)));
        assert_eq!(
            set.set_value(9, 0, FieldValue::Text("x".into())),
            Err(FieldSetError::UnknownEntry(9))
        );
    }

    #[test]
    fn test_from_raw_rejects_bad_markup() {
        assert_eq!(
            FieldSet::from_raw("items", vec![], RemovePolicy::KeepGaps),
            Err(FieldSetError::NoEntries("items".into()))
        );
        assert_eq!(
            FieldSet::from_raw("items", vec![vec![text("name", "")]], RemovePolicy::KeepGaps),
            Err(FieldSetError::MalformedIdentifier("name".into()))
        );
        assert_eq!(
            FieldSet::from_raw(
                "items",
                vec![vec![text("items-0-name", ""), text("links-0-url", "")]],
                RemovePolicy::KeepGaps
            ),
            Err(FieldSetError::ForeignIdentifier {
                expected: "items".into(),
                found: "links-0-url".into()
            })
        );
        assert_eq!(
            FieldSet::from_raw(
                "items",
                vec![vec![text("items-0-name", ""), text("items-1-role", "")]],
                RemovePolicy::KeepGaps
            ),
            Err(FieldSetError::InconsistentEntry {
                id: "items-1-role".into(),
                expected: 0
            })
        );
    }

    #[test]
    fn test_from_raw_rejects_unordered_indices() {
        assert_eq!(
            FieldSet::from_raw(
                "items",
                vec![vec![text("items-0-name", "A")], vec![text("items-0-name", "B")]],
                RemovePolicy::KeepGaps
            ),
            Err(FieldSetError::UnorderedEntry { index: 0, previous: 0 })
        );
        assert_eq!(
            FieldSet::from_raw(
                "items",
                vec![
                    vec![text("items-5-name", "")],
                    vec![text("items-2-name", "")],
                    vec![text("items-3-name", "")],
                ],
                RemovePolicy::KeepGaps
            ),
            Err(FieldSetError::UnorderedEntry { index: 2, previous: 5 })
        );
    }

    #[test]
    fn test_add_after_largest_index_fails() {
        let id = format!("items-{}-name", usize::MAX);
        let mut set =
            FieldSet::from_raw("items", vec![vec![text(&id, "")]], RemovePolicy::KeepGaps)
                .unwrap();
        assert_eq!(set.add_entry(), Err(FieldSetError::IndexOverflow(usize::MAX)));
        assert_eq!(set.indices(), vec![usize::MAX]);
    }

    #[test]
    fn test_new_requires_entries() {
        let templates = vec![FieldTemplate::new("name", InputKind::Text("text".into()))];
        assert!(FieldSet::new("items", templates.clone(), 0, RemovePolicy::KeepGaps).is_err());
        let set = FieldSet::new("items", templates, 2, RemovePolicy::KeepGaps).unwrap();
        assert_eq!(set.indices(), vec![0, 1]);
    }
}

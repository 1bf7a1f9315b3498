/// Dropdown entry meaning "nothing selected". Never written to a line.
pub const NOT_SELECTED: &str = "未選択";

/// Path marker the host uses for styles that only live in memory.
pub const DO_NOT_SAVE: &str = "do_not_save";

/// Options for a dropdown, always headed by [`NOT_SELECTED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceList {
    items: Vec<String>,
}

impl ChoiceList {
    /// Build from registry names. Blank names, the literal `None` and
    /// duplicates are skipped; order is kept.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items = vec![NOT_SELECTED.to_string()];
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || name == "None" {
                continue;
            }
            if !items.iter().any(|existing| existing == name) {
                items.push(name.to_string());
            }
        }

        Self { items }
    }

    /// Build from `(name, path)` style entries, dropping styles stored
    /// under [`DO_NOT_SAVE`].
    pub fn styles<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        Self::new(
            entries
                .into_iter()
                .filter(|(_, path)| *path != Some(DO_NOT_SAVE))
                .map(|(name, _)| name),
        )
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ChoiceList {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

/// True when `value` carries an actual selection.
pub fn is_selected(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != NOT_SELECTED
}

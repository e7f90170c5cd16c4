use std::path::PathBuf;

/// A source fragment's name paired with the text that goes into assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub name: String,
    pub content: String,
}

/// Insertion-ordered mapping of source file name to content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextContents {
    entries: Vec<FileContext>,
}

impl ContextContents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `content` under `name`. An existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        let content = content.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.content = content,
            None => self.entries.push(FileContext { name, content }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.content.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.content.as_str())
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for ContextContents {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut contents = ContextContents::new();
        for (name, content) in iter {
            contents.insert(name, content);
        }
        contents
    }
}

/// Where the repo context file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    pub directory: PathBuf,
    pub filename: String,
}

impl OutputLocation {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Per-session selection of source files, rebuilt from every listing.
///
/// Entries keep listing order. Nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    entries: Vec<(String, bool)>,
}

impl SelectionState {
    /// Builds a selection with every name unselected.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: names.into_iter().map(|n| (n.into(), false)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns false when `name` is not part of the listing.
    pub fn set(&mut self, name: &str, selected: bool) -> bool {
        match self.entries.iter_mut().find(|(entry, _)| entry == name) {
            Some((_, value)) => {
                *value = selected;
                true
            }
            None => false,
        }
    }

    pub fn toggle_at(&mut self, index: usize) {
        if let Some((_, selected)) = self.entries.get_mut(index) {
            *selected = !*selected;
        }
    }

    pub fn select_all(&mut self) {
        for (_, selected) in &mut self.entries {
            *selected = true;
        }
    }

    pub fn deselect_all(&mut self) {
        for (_, selected) in &mut self.entries {
            *selected = false;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|(_, selected)| *selected).count()
    }

    pub fn selected_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, selected)| *selected)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries
            .iter()
            .map(|(name, selected)| (name.as_str(), *selected))
    }
}

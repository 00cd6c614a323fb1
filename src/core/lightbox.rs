use crate::types::{LightboxEntry, Project};

/// Full-screen viewer over every image of every project.
///
/// The cursor wraps in both directions. Navigation on an empty list is a
/// no-op.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lightbox {
    entries: Vec<LightboxEntry>,
    cursor: usize,
    open: bool,
}

impl Lightbox {
    pub fn from_projects(projects: &[Project]) -> Self {
        let entries = projects
            .iter()
            .flat_map(|project| {
                project.images.iter().map(move |src| LightboxEntry {
                    src: src.clone(),
                    title: project.title.clone(),
                    description: project.description.clone(),
                })
            })
            .collect();
        Lightbox {
            entries,
            cursor: 0,
            open: false,
        }
    }

    pub fn entries(&self) -> &[LightboxEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current(&self) -> Option<&LightboxEntry> {
        self.entries.get(self.cursor)
    }

    /// Opens on the first image of `projects[project_index]`.
    ///
    /// `projects` must be the list the lightbox was built from. Returns
    /// `None` and stays closed when that project has no images.
    pub fn open_at(&mut self, projects: &[Project], project_index: usize) -> Option<&LightboxEntry> {
        let project = projects.get(project_index)?;
        if project.images.is_empty() {
            return None;
        }
        let offset: usize = projects[..project_index]
            .iter()
            .map(|project| project.images.len())
            .sum();
        if offset >= self.entries.len() {
            return None;
        }
        self.cursor = offset;
        self.open = true;
        self.current()
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn next(&mut self) -> Option<&LightboxEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.entries.len();
        self.current()
    }

    pub fn previous(&mut self) -> Option<&LightboxEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let len = self.entries.len();
        self.cursor = (self.cursor + len - 1) % len;
        self.current()
    }
}

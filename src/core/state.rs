use crate::{
    core::{
        gallery::{view_indices, CategoryFilter},
        lightbox::Lightbox,
    },
    types::Project,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SetFilter(CategoryFilter),
    Search(String),
    /// Position within the current view, not within the full list.
    OpenLightbox(usize),
    CloseLightbox,
    NextImage,
    PreviousImage,
    Key(Key),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryState {
    projects: Vec<Project>,
    filter: CategoryFilter,
    query: String,
    view: Vec<usize>,
    lightbox: Lightbox,
}

impl GalleryState {
    pub fn new(projects: Vec<Project>) -> Self {
        let view = (0..projects.len()).collect();
        let lightbox = Lightbox::from_projects(&projects);
        GalleryState {
            projects,
            filter: CategoryFilter::All,
            query: String::new(),
            view,
            lightbox,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Projects currently shown, in source order.
    pub fn visible(&self) -> impl Iterator<Item = &Project> + '_ {
        self.view.iter().map(move |index| &self.projects[*index])
    }

    fn refresh_view(&mut self) {
        self.view = view_indices(&self.projects, &self.filter, &self.query);
    }
}

pub fn update(mut state: GalleryState, command: Command) -> GalleryState {
    match command {
        Command::SetFilter(filter) => {
            state.filter = filter;
            state.refresh_view();
        }
        Command::Search(query) => {
            state.query = query;
            state.refresh_view();
        }
        Command::OpenLightbox(position) => {
            if let Some(index) = state.view.get(position).copied() {
                state.lightbox.open_at(&state.projects, index);
            }
        }
        Command::CloseLightbox => state.lightbox.close(),
        Command::NextImage => {
            state.lightbox.next();
        }
        Command::PreviousImage => {
            state.lightbox.previous();
        }
        Command::Key(key) if state.lightbox.is_open() => match key {
            Key::Escape => state.lightbox.close(),
            Key::ArrowLeft => {
                state.lightbox.previous();
            }
            Key::ArrowRight => {
                state.lightbox.next();
            }
            Key::Other => {}
        },
        Command::Key(_) => {}
    }
    state
}

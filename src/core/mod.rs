pub mod about;
pub mod data;
pub mod gallery;
pub mod lightbox;
pub mod preview;
pub mod settings;
pub mod state;

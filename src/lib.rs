pub mod app;
pub mod config;
pub mod detect;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod labels;
pub mod model;
pub mod view;

pub use editor::{BoxEditor, LabelSource, Session, Surface};
pub use model::BoundingBox;

mod content;
mod ids;
mod image;
mod question;
mod track;

pub use content::{ContentError, ContentMeta, ContentModel};
pub use ids::TrackId;
pub use image::{ImageLocation, ImageRef, ImageRefError};
pub use question::{Question, QuestionError, QuestionKind, Selection};
pub use track::{AdvanceMode, Track, TrackError, TrackSettings};

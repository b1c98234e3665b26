// Data models and DTOs

pub mod tutorial;

pub use tutorial::{Tutorial, TutorialDraft, TutorialRequest};

pub mod extractors;
pub mod health;
pub mod metrics;
pub mod response;
pub mod tutorials;

// Re-export commonly used types
pub use extractors::{AppJson, AppPath, AppQuery, TitleFilter};
pub use response::{Created, NoContent};

mod color_when;
mod entry_ordering;
mod log_level;

pub use color_when::ColorWhen;
pub use entry_ordering::{EntryOrdering, SortField};
pub use log_level::LogLevel;

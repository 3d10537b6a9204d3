mod console_progress;
mod multi_progress;
mod progress_style;

pub use console_progress::ConsoleProgress;
pub use multi_progress::MultiProgressNew;
pub use progress_style::ProgressStyleTemplate;

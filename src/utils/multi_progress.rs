use crate::utils::ProgressStyleTemplate;
use indicatif::{MultiProgress, ProgressBar};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub trait MultiProgressNew {
    /// Ticking spinner line for stage messages.
    fn add_status_line(&self) -> ProgressBar;
    /// Position/length counter, advanced explicitly by the caller.
    fn add_counter(&self, label: &'static str) -> ProgressBar;
}

impl MultiProgressNew for MultiProgress {
    fn add_status_line(&self) -> ProgressBar {
        let pb = self.add(ProgressBar::new_spinner());
        pb.set_style(ProgressStyleTemplate::only_message());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn add_counter(&self, label: &'static str) -> ProgressBar {
        let pb = self.add(ProgressBar::no_length());
        pb.set_style(ProgressStyleTemplate::number_bar());
        pb.set_message(label);
        pb
    }
}

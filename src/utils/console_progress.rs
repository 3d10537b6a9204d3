use crate::model::Revision;
use crate::report::{ProgressReporter, Stage};
use crate::utils::MultiProgressNew;
use indicatif::{MultiProgress, ProgressBar};

pub fn progress_line(written: usize, total: usize, title: &str) -> String {
    format!("wrote {written} of {total}: {title}")
}

/// Terminal progress: a status spinner, a revision counter and one printed
/// line per written row.
pub struct ConsoleProgress {
    multi_progress: MultiProgress,
    status_pb: ProgressBar,
    rows_pb: ProgressBar,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        let multi_progress = MultiProgress::new();
        let status_pb = multi_progress.add_status_line();
        let rows_pb = multi_progress.add_counter("Revisions");
        Self {
            multi_progress,
            status_pb,
            rows_pb,
        }
    }

    pub fn abandon(&self, message: impl ToString) {
        self.rows_pb.abandon();
        self.status_pb.abandon_with_message(format!("❌ {}", message.to_string()));
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn stage(&mut self, stage: Stage) {
        match stage {
            Stage::Authenticating => self.status_pb.set_message("Resolving current user ..."),
            Stage::FetchingRevisions => self.status_pb.set_message("Fetch revisions ..."),
            Stage::Enriching { total } => {
                self.rows_pb.set_length(total as u64);
                self.status_pb
                    .set_message(format!("Enriching {total} revisions ..."));
            }
            Stage::Finalized => {
                self.rows_pb.finish();
                self.status_pb.finish_with_message(format!(
                    "✅ Completed report ({} rows)",
                    self.rows_pb.position()
                ));
            }
        }
    }

    fn row_written(&mut self, written: usize, total: usize, revision: &Revision) {
        self.rows_pb.set_position(written as u64);
        let line = progress_line(written, total, &revision.title);
        // A hidden target (no tty) swallows `println`, so print directly.
        if self.multi_progress.is_hidden() || self.multi_progress.println(&line).is_err() {
            println!("{line}");
        }
    }

    fn row_skipped(&mut self, revision: &Revision) {
        self.status_pb
            .set_message(format!("Skipped D{}: {}", revision.id, revision.title));
    }
}

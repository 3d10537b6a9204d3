use crate::cache::Caches;
use crate::conduit::ConduitClient;
use crate::enrich::RevisionEnricher;
use crate::model::{Result, Revision, User};
use crate::report::ReportSink;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Stage {
    Authenticating,
    FetchingRevisions,
    Enriching { total: usize },
    Finalized,
}

/// Receives driver progress. Rows are reported only once they are in the sink.
pub trait ProgressReporter {
    fn stage(&mut self, stage: Stage);
    fn row_written(&mut self, written: usize, total: usize, revision: &Revision);
    fn row_skipped(&mut self, _revision: &Revision) {}
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ReportSummary {
    pub written: usize,
    /// Ids of revisions left out because their data was incomplete.
    pub skipped: Vec<i64>,
}

/// Runs one report: authenticate, list revisions, then enrich and write them
/// one at a time in list order.
pub struct ReportDriver<'a> {
    client: &'a ConduitClient,
    caches: Caches,
}

impl<'a> ReportDriver<'a> {
    pub fn new(client: &'a ConduitClient) -> Self {
        Self {
            client,
            caches: Caches::new(),
        }
    }

    pub fn caches(&self) -> &Caches {
        &self.caches
    }

    pub async fn run<S: ReportSink>(
        &self,
        filters: &[(String, String)],
        sink: &mut S,
        progress: &mut dyn ProgressReporter,
    ) -> Result<ReportSummary> {
        progress.stage(Stage::Authenticating);
        let me = self.authenticate().await?;

        progress.stage(Stage::FetchingRevisions);
        let revisions = self.client.query_revisions(&me.phid, filters).await?;
        log::info!("{} revision(s) authored by {}", revisions.len(), me.username);

        self.write_rows(&revisions, sink, progress).await
    }

    /// Resolves the token's user and seeds it into the user cache.
    pub async fn authenticate(&self) -> Result<User> {
        let me = self.client.whoami().await?;
        self.caches.seed_user(me.clone());
        Ok(me)
    }

    pub async fn write_rows<S: ReportSink>(
        &self,
        revisions: &[Revision],
        sink: &mut S,
        progress: &mut dyn ProgressReporter,
    ) -> Result<ReportSummary> {
        let total = revisions.len();
        progress.stage(Stage::Enriching { total });

        let enricher = RevisionEnricher::new(self.client, &self.caches);
        let mut summary = ReportSummary::default();
        for revision in revisions {
            match enricher.enrich(revision).await {
                Ok(row) => {
                    sink.write_row(&row)?;
                    summary.written += 1;
                    progress.row_written(summary.written, total, revision);
                }
                Err(err) if err.is_skippable() => {
                    log::warn!("Skipping D{} ({}): {err}", revision.id, revision.title);
                    summary.skipped.push(revision.id);
                    progress.row_skipped(revision);
                }
                Err(err) => return Err(err),
            }
        }

        sink.finish()?;
        progress.stage(Stage::Finalized);
        Ok(summary)
    }
}

use crate::cache::Caches;
use crate::conduit::ConduitClient;
use crate::enrich::model::{days_between, format_date, DiffSpan, ReportRow, RevisionData};
use crate::model::{Error, Repository, Result, Revision, User};
use futures::future;

pub trait RowDeriver {
    fn derive_row(&self) -> Result<ReportRow>;
}

impl RowDeriver for RevisionData<'_> {
    fn derive_row(&self) -> Result<ReportRow> {
        let revision = self.revision;
        let Some(span) = DiffSpan::from_diffs(&self.diffs) else {
            return Err(Error::data_shape(format!("D{} has no diffs", revision.id)));
        };
        let date = |timestamp: i64| {
            format_date(timestamp).ok_or_else(|| {
                Error::data_shape(format!("D{} has invalid timestamp {timestamp}", revision.id))
            })
        };

        Ok(ReportRow {
            title: revision.title.clone(),
            uri: revision.uri.clone(),
            first_diff: date(span.first)?,
            last_diff: date(span.last)?,
            dev_time: span.days(),
            created: date(revision.date_created)?,
            modified: date(revision.date_modified)?,
            open_for: days_between(revision.date_modified, revision.date_created),
            status: revision.status_name.clone(),
            reviewers: self
                .reviewers
                .iter()
                .map(|reviewer| reviewer.username.clone())
                .collect(),
            diff_count: revision.diff_count,
            line_count: revision.line_count,
            repo: self.repository.as_ref().map(|repo| repo.name.clone()),
            commit_paths: self.commit_paths.clone(),
        })
    }
}

/// Gathers the data behind one report row.
pub struct RevisionEnricher<'a> {
    client: &'a ConduitClient,
    caches: &'a Caches,
}

impl<'a> RevisionEnricher<'a> {
    pub fn new(client: &'a ConduitClient, caches: &'a Caches) -> Self {
        Self { client, caches }
    }

    pub async fn enrich(&self, revision: &Revision) -> Result<ReportRow> {
        self.fetch(revision).await?.derive_row()
    }

    /// Runs the diff, repository, commit path and reviewer lookups together.
    /// The first failure cancels the rest.
    pub async fn fetch<'r>(&self, revision: &'r Revision) -> Result<RevisionData<'r>> {
        let (diffs, repository, commit_paths, reviewers) = futures::try_join!(
            self.client.query_diffs(revision.id),
            self.repository(revision.repository_phid.as_deref()),
            self.client.get_commit_paths(revision.id),
            future::try_join_all(revision.reviewers.iter().map(|phid| self.user(phid))),
        )?;
        Ok(RevisionData::new(
            revision,
            diffs,
            repository,
            commit_paths,
            reviewers,
        ))
    }

    async fn user(&self, phid: &str) -> Result<User> {
        let client = self.client;
        self.caches
            .users
            .get_or_fetch(phid, || async move {
                client
                    .query_user(phid)
                    .await?
                    .ok_or_else(|| Error::data_shape(format!("Not found user {phid}")))
            })
            .await
    }

    async fn repository(&self, phid: Option<&str>) -> Result<Option<Repository>> {
        let Some(phid) = phid else {
            return Ok(None);
        };
        self.caches
            .repos
            .get_or_fetch(phid, || self.client.query_repository(phid))
            .await
    }
}

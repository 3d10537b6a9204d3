use crate::model::{Diff, Repository, Revision, User};
use chrono::{Duration, Local, TimeZone};
use itertools::{Itertools, MinMaxResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything fetched for one revision, before any field is derived.
#[derive(Debug, Clone)]
pub struct RevisionData<'a> {
    pub revision: &'a Revision,
    pub diffs: Vec<Diff>,
    pub repository: Option<Repository>,
    pub commit_paths: Vec<String>,
    pub reviewers: Vec<User>,
}

impl<'a> RevisionData<'a> {
    pub fn new(
        revision: &'a Revision,
        diffs: Vec<Diff>,
        repository: Option<Repository>,
        commit_paths: Vec<String>,
        reviewers: Vec<User>,
    ) -> Self {
        Self {
            revision,
            diffs,
            repository,
            commit_paths,
            reviewers,
        }
    }
}

/// Earliest and latest diff creation time of a revision, in epoch seconds.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DiffSpan {
    pub first: i64,
    pub last: i64,
}

impl DiffSpan {
    pub fn new(first: i64, last: i64) -> Self {
        Self { first, last }
    }

    pub fn from_diffs(diffs: &[Diff]) -> Option<Self> {
        match diffs.iter().map(|diff| diff.date_created).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(date) => Some(Self::new(date, date)),
            MinMaxResult::MinMax(first, last) => Some(Self::new(first, last)),
        }
    }

    pub fn days(&self) -> i64 {
        days_between(self.last, self.first)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReportRow {
    pub title: String,
    pub uri: String,
    pub first_diff: String,
    pub last_diff: String,
    pub dev_time: i64,
    pub created: String,
    pub modified: String,
    pub open_for: i64,
    pub status: String,
    pub reviewers: Vec<String>,
    pub diff_count: usize,
    pub line_count: i64,
    pub repo: Option<String>,
    pub commit_paths: Vec<String>,
}

/// Whole days from `earlier` to `later`, truncated toward zero.
pub fn days_between(later: i64, earlier: i64) -> i64 {
    Duration::seconds(later - earlier).num_days()
}

/// Calendar date of an epoch timestamp in the local timezone.
pub fn format_date(timestamp: i64) -> Option<String> {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|datetime| datetime.format(DATE_FORMAT).to_string())
}

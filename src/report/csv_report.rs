use crate::enrich::ReportRow;
use crate::model::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const HEADERS: [&str; 14] = [
    "title",
    "uri",
    "firstDiff",
    "lastDiff",
    "devTime",
    "created",
    "modified",
    "openFor",
    "status",
    "reviewers",
    "diffCount",
    "lineCount",
    "repo",
    "commitPaths",
];

/// Multi-valued fields share one cell.
const LIST_SEPARATOR: &str = ",";

/// Destination for report rows, finished once after the last row.
pub trait ReportSink {
    fn write_row(&mut self, row: &ReportRow) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

pub struct CsvReport<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvReport<File> {
    pub fn create(path: &Path) -> Result<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvReport<W> {
    pub fn from_writer(inner: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(HEADERS)?;
        Ok(Self { writer })
    }
}

impl<W: Write> ReportSink for CsvReport<W> {
    fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.writer.write_record(record(row))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn record(row: &ReportRow) -> [String; 14] {
    [
        row.title.clone(),
        row.uri.clone(),
        row.first_diff.clone(),
        row.last_diff.clone(),
        row.dev_time.to_string(),
        row.created.clone(),
        row.modified.clone(),
        row.open_for.to_string(),
        row.status.clone(),
        row.reviewers.join(LIST_SEPARATOR),
        row.diff_count.to_string(),
        row.line_count.to_string(),
        row.repo.clone().unwrap_or_default(),
        row.commit_paths.join(LIST_SEPARATOR),
    ]
}

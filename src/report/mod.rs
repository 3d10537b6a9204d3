pub mod csv_report;
pub mod driver;

pub use csv_report::{CsvReport, ReportSink};
pub use driver::{ProgressReporter, ReportDriver, ReportSummary, Stage};

pub mod enricher;
mod model;

pub use enricher::RevisionEnricher;
pub use model::ReportRow;

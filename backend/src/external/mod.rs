//! External API integrations

pub mod record_store;
pub mod report_generator;

pub use record_store::{HttpRecordStore, RecordStore};
pub use report_generator::ReportGeneratorClient;

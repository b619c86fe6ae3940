pub mod compare_report;
pub mod scan_plan;

pub use compare_report::CompareReport;
pub use scan_plan::{PlannedImage, ScanPlan};

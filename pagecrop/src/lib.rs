pub mod batch;
pub mod page_dir;
pub mod report;

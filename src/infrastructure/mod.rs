pub mod report;
pub mod storage;

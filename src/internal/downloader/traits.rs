pub mod download_logger;
pub mod offset_write;
pub mod range_source;

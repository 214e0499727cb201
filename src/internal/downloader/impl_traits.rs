pub mod impl_download_logger;
pub mod impl_http_range_source;
pub mod impl_offset_write;

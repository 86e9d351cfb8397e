pub mod time;

pub use time::{create_time_or_now, format_datestamp, parse_epoch_strict, record_create_time};

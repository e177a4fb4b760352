pub mod file_record;
pub mod formats;

pub use file_record::FileRecord;
pub use formats::{FileFormats, Format, FormatsParseError};

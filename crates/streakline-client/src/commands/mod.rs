pub mod center;
pub(crate) mod common;
pub mod dash;
pub mod records;
pub mod report;
pub mod status;
pub mod users;

pub mod file_errors;
pub mod search_errors;
pub mod store_errors;
pub mod tag_errors;

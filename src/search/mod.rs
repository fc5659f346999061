pub mod criteria;
pub mod models;
pub mod service;


pub use criteria::SearchCriteria;
pub use models::*;

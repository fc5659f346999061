pub mod models;
pub mod repository;
pub mod service;
pub mod tree;
pub mod validation;


// make it easier to just use models
pub use models::*;
pub use tree::TagTree;

pub mod models;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use models::*;

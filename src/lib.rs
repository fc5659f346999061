pub mod config;
pub mod decisions;
pub mod files;
pub mod logging;
pub mod model;
pub mod repository;
pub mod search;
pub mod selection;
pub mod tags;
#[cfg(test)]
mod test;

pub mod config;
pub mod issue;
pub mod repo;

pub use config::*;
pub use issue::*;
pub use repo::*;

pub mod anchor;
pub mod error;
pub mod repositories;

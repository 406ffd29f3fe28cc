pub mod path;
pub mod testing;
pub mod validation;

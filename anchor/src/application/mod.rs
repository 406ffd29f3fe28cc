// anchor/src/application/mod.rs
pub mod services;

pub use services::anchor_service_impl::AnchorServiceImpl;

// src/application/services/mod.rs
pub mod anchor_service;
pub mod anchor_service_impl;
pub mod factory;

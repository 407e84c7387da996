//! Core library exports for the product catalog.
//!
//! This crate exposes the product domain model, its Diesel models and the
//! repository layer used to persist and query catalog records.

pub mod db;
pub mod domain;
pub mod models;
pub mod repository;
pub mod schema;

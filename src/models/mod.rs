//! Diesel models mirroring the database schema.

pub mod product;

//! Seller Aggregation
//!
//! Derived, read-only views over users, products and orders: the public
//! seller directory and per-seller sales profiles. Consumes the order
//! engine's records without ever mutating them.

pub mod service;

pub use service::{SellerProfile, SellerPublic, SellerSales, SellerService, SellerStats};

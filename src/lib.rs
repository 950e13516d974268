//! Read-only currency exchange rate lookup service exposed over gRPC.
//!
//! Layering, top down: [`grpc`] validates request shape and speaks the
//! wire contract, [`service`] applies the currency-support rules and
//! precision narrowing, [`storage`] defines the read seam that
//! [`postgres_storage`] implements against the live store.

pub mod config;
pub mod currency;
pub mod grpc;
pub mod models;
pub mod postgres_storage;
pub mod service;
pub mod storage;

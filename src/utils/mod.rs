//! Shared helpers for the provider adapters

pub mod http;

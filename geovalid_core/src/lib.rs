//! Generic decoded JSON value tree shared by the geovalid crates.
//!
//! This crate deliberately contains no JSON text parser: callers decode with
//! whatever parser they like (the [`json::interop`] module covers
//! `serde_json`) and hand the resulting tree to the validators.

pub mod json;

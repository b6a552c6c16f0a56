//! # bp-core
//!
//! Core types and pure aggregation logic for the BrightPath school backend.
//!
//! This crate provides the foundational types shared across all BrightPath crates:
//! - Entity structs for every stored record (students, users, parents, results, ...)
//! - Role and status enums
//! - Request payloads accepted by the HTTP surface, with validation
//! - Response view types returned as JSON
//! - Grouping/reduction passes over fetched rows (compilation, coverage,
//!   class summaries, release filtering)
//! - Cross-cutting error types

pub mod aggregate;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod requests;
pub mod responses;

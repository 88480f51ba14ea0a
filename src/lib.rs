//! Project Manager - Client-side project state
//!
//! This crate keeps an in-memory list of projects synchronized with a remote
//! `/projects` collection resource: load on start, create, optimistic update
//! and delete, with every outcome reported to the caller.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

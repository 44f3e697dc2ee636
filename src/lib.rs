//! tagsweep - tag auditing and backfill for AWS resources
//!
//! The sweep walks the services a billing report names, lists each
//! service's resources through its own SDK, and normalizes every
//! vendor tag shape down to flat key-value pairs. The `audit` pass
//! writes resources missing a target tag to a CSV; the `apply` pass
//! reads such a CSV back and pushes one tag per row through the
//! matching vendor tagging API.

#![warn(clippy::all, rust_2018_idioms)]

pub mod aws;
pub mod commands;
pub mod report;
pub mod sanitize;
pub mod services;
pub mod tags;

//! In-memory labeled array containers.

pub mod dataset;

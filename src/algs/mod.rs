//! Numeric transforms applied between loading and emitting.

pub mod connectivity;
pub mod lonlat;

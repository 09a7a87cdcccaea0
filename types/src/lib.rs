//! Common types used throughout dicebattle.

pub mod casino;

//! Authentication primitives.
//!
//! - [`jwt`] -- verification of Supabase-issued access tokens.

pub mod jwt;

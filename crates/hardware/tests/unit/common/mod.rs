//! Common component tests.


/// Access kind parsing and helpers.
pub mod access_type;

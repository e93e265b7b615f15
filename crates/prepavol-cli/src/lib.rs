//! Prepavol CLI library.
//!
//! This crate provides the text and JSON renderers used by the `prepavol`
//! binary, together with terminal styling helpers.

pub mod output;
pub mod terminal;

#[cfg(test)]
pub(crate) mod test_helpers;

//! # Transformer Implementations
//!
//! The submodules contain the transformer implementations.

pub mod categorical_rules;

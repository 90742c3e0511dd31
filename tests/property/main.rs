//! Property-based tests
//!
//! Input validation and configuration parsing checked over generated inputs.

mod duration_proptest;
mod validation_proptest;

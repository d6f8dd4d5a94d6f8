//! Unique-identifier generation for calendar objects.
//!
//! ## Summary
//! Components that are constructed without an explicit identifier get one
//! from here. Keeping generation in a single place means everything else in
//! the workspace stays deterministic: tests construct components with
//! explicit identifiers and never touch this module.

/// Generate an opaque unique identifier.
///
/// The value is a random UUID rendered in its canonical hyphenated form,
/// e.g. `550e8400-e29b-41d4-a716-446655440000`.
#[must_use]
pub fn generate_uid() -> String {
    uuid::Uuid::new_v4().to_string()
}

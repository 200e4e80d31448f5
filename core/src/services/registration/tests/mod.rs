//! Tests for the registration flow

#[cfg(test)]
pub(crate) mod fixtures;

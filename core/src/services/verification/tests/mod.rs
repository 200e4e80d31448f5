//! Tests for the verification code workflow

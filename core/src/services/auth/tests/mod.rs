//! Tests for authentication flows

//! Tests for provider keys and the provided connect operations

//! Tests for configuration records and loading

mod database_tests;

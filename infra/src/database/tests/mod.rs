//! Tests for the MySQL pool and provider

mod connection_tests;

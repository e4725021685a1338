//! Integration test suite for the Shopfront client.

mod helpers;

mod api_test;
mod session_test;

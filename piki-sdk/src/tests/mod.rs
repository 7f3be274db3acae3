//! Unit tests for the Piki SDK
//!
//! This module contains tests for various components of the SDK.

// Re-export test modules
pub mod config_tests;
pub mod error_tests;
pub mod filter_tests;
pub mod intent_tests;
pub mod workflow_mock_tests;

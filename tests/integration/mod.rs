// Integration tests for mailscout
// This module organizes all integration tests

pub mod live;
pub mod overrides;

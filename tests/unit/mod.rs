// Unit tests for mailscout
// This module organizes all unit tests

pub mod discovery;
pub mod models;

//! Consolidated test utilities for git-steward
//!
//! This module provides unified testing utilities for integration tests,
//! focused on real git repository fleets for reliable testing.

pub mod repository;

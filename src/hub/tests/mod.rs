//! Unit tests for the hub facade.

//! Unit tests for lifecycle timers, notifications and undo.

//! Unit tests for goals and milestones.

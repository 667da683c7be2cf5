//! Unit tests for the team bounded context.

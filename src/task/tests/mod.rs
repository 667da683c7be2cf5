//! Unit tests for the task bounded context.

mod domain_tests;
mod relations_tests;
mod support;
mod validation_tests;

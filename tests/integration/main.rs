//! Integration tests for qubeley.

mod util;

mod arg_tests;
mod collection_tests;
mod invalid_config_tests;
mod valid_config_tests;

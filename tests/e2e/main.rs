//! End-to-end tests for the thumbview binary

mod cli_basic;
mod resolve_cli;

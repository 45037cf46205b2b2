//! Integration tests module

pub mod bootstrap;
pub mod common;
pub mod remote_install;
pub mod workflow;

//! Shared test fixtures for the ve-bootstrap workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`env`] - on-disk layouts of already-created environments
//! - [`toolchain`] - [`FakeToolchain`](toolchain::FakeToolchain), a shell-script
//!   stand-in for the interpreter, installer and creation tool (Unix only)

pub mod env;
#[cfg(unix)]
pub mod toolchain;

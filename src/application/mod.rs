// SPDX-License-Identifier: MPL-2.0
//! Application layer.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The command-line host wires ports to the gallery and viewer

pub mod port;

// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`http`]: History, generation and payload over HTTP (implements [`GalleryBackend`])
//!
//! [`GalleryBackend`]: crate::application::port::GalleryBackend

pub mod http;

pub use http::HttpBackend;

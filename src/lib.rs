// SPDX-License-Identifier: MPL-2.0
//! `lens_gallery` renders a large list of generated images in bounded
//! batches and presents any of them in a gesture-driven lightbox.
//!
//! Both cores are host-agnostic state machines: the [`gallery`] loader and
//! the [`viewer`] consume messages and return effects for a rendering host
//! to apply. The [`app`] module is a command-line host over the HTTP
//! [`infrastructure`] adapter.

#![doc(html_root_url = "https://docs.rs/lens_gallery/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod infrastructure;
pub mod payload;
pub mod ui;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_utils;

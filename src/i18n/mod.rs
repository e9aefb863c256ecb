// SPDX-License-Identifier: MPL-2.0
//! Localized text lookup.
//!
//! Uses the Fluent localization system with `.ftl` files embedded at build
//! time from `assets/i18n/`.
//!
//! # Features
//!
//! - Locale resolution from CLI, config, then system settings
//! - Named arguments via [`I18n::tr_with_args`]
//! - Missing keys render as `MISSING: <key>` instead of failing

pub mod fluent;

pub use fluent::I18n;

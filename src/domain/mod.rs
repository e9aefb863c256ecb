// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core gallery types.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Beyond `std`, only `serde` is used (to read image references off the
//! wire), so the types stay independent of the transport and presentation
//! layers.
//!
//! # Modules
//!
//! - [`media`]: Image references ([`ImageRef`](media::ImageRef))
//! - [`ui`]: Validated tuning values ([`BatchSize`](ui::newtypes::BatchSize),
//!   [`PreloadCount`](ui::newtypes::PreloadCount), [`Resistance`](ui::newtypes::Resistance),
//!   [`MaxScale`](ui::newtypes::MaxScale))

pub mod media;
pub mod ui;

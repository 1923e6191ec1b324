// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! UI components for the Sagger editor window

pub mod style_toolbar;

pub use style_toolbar::{StyleSelected, style_toolbar_view};

// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Top-level Xilem views

mod editor;

pub use editor::editor_screen;

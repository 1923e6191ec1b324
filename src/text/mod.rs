// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Plain text storage for the editor.
//!
//! - Gap buffer of characters with a logical caret
//! - Line splitting and caret line/column mapping
//! - Caret blink state

pub mod buffer;
pub mod caret;

pub use buffer::TextBuffer;
pub use caret::Caret;

// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Sagger: a plain text editor whose lines sag under their own weight

use xilem::{EventLoop, winit::error::EventLoopError};

fn main() -> Result<(), EventLoopError> {
    sagger::run(EventLoop::with_user_event())
}

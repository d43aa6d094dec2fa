// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Reply construction, request filtering and metrics shared by the server
//! loop.
//!
//! Everything here is pure logic with no I/O, so it is tested without a
//! socket.

mod metrics;
mod pipeline;
mod response;
mod state;
mod validation;

pub use self::metrics::{MetricsSnapshot, ServerMetrics};
pub use self::pipeline::{HandleResult, handle_request};
pub use self::response::build_reply;
pub use self::state::ServerSystemState;
pub use self::validation::validate_request;

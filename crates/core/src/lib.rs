// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document creation service.
//!
//! Wires the pure allocator from `atelier-domain` to a `DocumentStore`
//! and owns the retry-on-conflict loop that makes concurrent creation
//! safe.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod clock;
mod error;
mod service;
mod store;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, StoreError};
pub use service::{CreateDocument, DEFAULT_MAX_ATTEMPTS, DocumentService};
pub use store::{DocumentStore, NewDocument};

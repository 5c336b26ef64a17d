// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for vacuum state changes.
//!
//! Every state change applied during a poll, and every availability
//! transition, is published on the vacuum's tokio broadcast channel.
//! Call [`Vacuum::subscribe`](crate::Vacuum::subscribe) to receive them.
//! A subscriber that falls more than [`EVENT_CHANNEL_CAPACITY`] events
//! behind gets `RecvError::Lagged` and loses the oldest ones.

mod vacuum_event;

pub use vacuum_event::VacuumEvent;

/// Number of events buffered per vacuum before slow subscribers lag.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

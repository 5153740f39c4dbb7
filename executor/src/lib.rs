/*
 * Description: Drive flexer invocations from async consumers.
 *
 * Copyright (C) 2022-2023 Danny McClanahan <dmcC2@hypnicjerk.ai>
 * SPDX-License-Identifier: LGPL-3.0-or-later
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Lesser General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Lesser General Public License for more details.
 *
 * You should have received a copy of the GNU Lesser General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Drive flexer invocations from async consumers.
//!
//! A flex sequence is an ordinary lazy iterator. Wrapping it in a [`Feed`](control_flow::Feed)
//! and [pumping](control_flow::Feed::pump) it into a bounded channel hands each element to an
//! async consumer as soon as it is produced, and suspends the producer until the consumer has
//! taken it.
//!
//!```
//! # fn main() {
//! # futures::executor::block_on(async {
//! use flexer_executor::control_flow::{Collector, Drain, Feed};
//!
//! let (out, drain) = Drain::new();
//! let pump = Feed::new("1 20 300".split(' ').map(str::len)).pump(&out);
//! let total = drain.fold(0, |acc, len| acc + len);
//! let (pumped, total) = futures::join!(pump, total);
//! assert!(pumped == Ok(3));
//! assert!(total == 6);
//! # })
//! # }
//!```

#![warn(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
/* Make all doctests fail if they produce any warnings. */
#![doc(test(attr(deny(warnings))))]
#![deny(clippy::all)]

pub mod control_flow;
pub mod streams;

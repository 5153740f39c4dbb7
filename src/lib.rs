/*
 * Description: A declarative state-machine engine for streaming tokenizers and parsers.
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

//! A declarative state-machine engine for streaming tokenizers and parsers.
//!
//! Grammars are written as one [`RuleTable`](rules::RuleTable) per state: an ordered list of
//! (classifier, action list) branches plus an end-of-input action list. The
//! [driver](driver::Flexer) runs a single-pass loop over a [one-element lookahead](cursor::Lookahead),
//! executing exactly one action list per tick and threading the automaton state through each step
//! of it.
//!
//!```
//! use flexer::{action::Step, classify::Equals, driver::FlexerBuilder};
//!
//! #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
//! enum Mode {
//!   #[default]
//!   Outside,
//!   Inside,
//! }
//!
//! let mut builder = FlexerBuilder::<Mode, Equals<char>, Step<Mode>>::new();
//! builder
//!   .register(Mode::Outside)
//!   .when(Equals('(')).then(Step::Next).then(Step::Goto(Mode::Inside))
//!   .otherwise().then(Step::Next);
//! builder
//!   .register(Mode::Inside)
//!   .when(Equals(')')).then(Step::Next).then(Step::Goto(Mode::Outside))
//!   .otherwise().then(Step::Next)
//!   .on_end(Step::Fail("unclosed paren".to_string()));
//! let flexer = builder.build().unwrap();
//!
//! assert!(flexer.process_all("a(b)c".chars(), (), None).is_ok());
//! assert!(flexer.process_all("a(b".chars(), (), None).is_err());
//!```

#![warn(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
/* Make all doctests fail if they produce any warnings. */
#![doc(test(attr(deny(warnings))))]
#![deny(clippy::all)]

/// Chunk types exchanged by stream-like consumers of an invocation.
pub mod messaging {
  /// Something which produces chunks.
  pub trait Readable {
    /// The type of chunk produced.
    type ReadChunk;
  }

  /// Something which accepts chunks.
  pub trait Writable {
    /// The type of chunk accepted.
    type WriteChunk;
  }
}

pub mod action;
pub mod classify;
pub mod config;
pub mod cursor;
pub mod driver;
pub mod error;
pub mod rules;
pub mod state;

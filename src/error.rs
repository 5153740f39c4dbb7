/*
 * Description: Failures raised while building or running a flexer.
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

//! Failures raised while building or running a flexer.

use displaydoc::Display;
use thiserror::Error;

/// A defect in the rule tables themselves, as opposed to in the input.
///
/// These are never retried: the grammar must be fixed.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum GrammarError {
  /// state {state} registers the same classifier twice
  DuplicateClassifier {
    /// The offending state.
    state: String,
  },
  /// state {state} is registered twice
  DuplicateState {
    /// The offending state.
    state: String,
  },
  /// state {state} appends a step before opening any branch
  DetachedStep {
    /// The offending state.
    state: String,
  },
  /// state {state} transitions to {target}, which has no rule table
  UnknownTarget {
    /// The state whose table holds the transition.
    state: String,
    /// The unregistered destination.
    target: String,
  },
  /// state {state} has an action list consuming {steps} items in one tick
  ExcessConsumption {
    /// The offending state.
    state: String,
    /// How many consuming steps the list holds.
    steps: usize,
  },
  /// state {state} has no rule table
  UnregisteredState {
    /// The state the automaton was in.
    state: String,
  },
  /// no branch of state {state} handles the current item
  UnhandledItem {
    /// The state the automaton was in.
    state: String,
  },
  /// state {state} ran {ticks} ticks without consuming any input
  Stalled {
    /// The state reached by the last tick.
    state: String,
    /// Consecutive ticks without consuming.
    ticks: usize,
  },
}

/// {message}
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[ignore_extra_doc_attributes]
///
/// A message-only failure raised by [`Step::Fail`](crate::action::Step::Fail).
///
/// Specializations convert this into their own error type, attaching whatever position
/// information they track.
pub struct Failure {
  /// Why the invocation was aborted.
  pub message: String,
}

impl Failure {
  /// Construct a failure with the given message.
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

/// Errors raised by automata built only from [`Step`](crate::action::Step)s.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum Error {
  /// {0}
  Grammar(#[from] GrammarError),
  /// {0}
  Failed(#[from] Failure),
}

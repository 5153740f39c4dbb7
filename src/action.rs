/*
 * Description: Operations executed within a single tick.
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

//! Operations executed within a single tick.

use crate::{
  cursor::Cursor,
  error::{Error, Failure},
  state::StateTag,
};

/// One executable step of an action list.
///
/// A step may consume at most one element from `input`, may mutate the invocation's context, and
/// returns the state seen by the next step of the same tick.
pub trait Action<S, T, X> {
  /// What a failing step aborts the invocation with.
  type Error;

  /// Execute this step.
  fn act(&self, state: S, input: &mut dyn Cursor<T>, ctx: &mut X) -> Result<S, Self::Error>;
}

/// What [`FlexerBuilder::build`](crate::driver::FlexerBuilder::build) can learn about a step
/// before it ever runs.
///
/// Used to reject transitions into states that were never registered, and action lists that
/// would consume more than one element per tick.
pub trait Transitions<S> {
  /// The state this step moves to, if it is fixed.
  fn target(&self) -> Option<S>;

  /// Whether this step consumes an element of the input.
  fn consumes(&self) -> bool {
    false
  }
}

/// Primitives shared by every specialization.
///
///```
/// use flexer::{action::Step, cursor::{Cursor, Lookahead}};
///
/// let mut lookahead = Lookahead::new([1, 2].into_iter());
/// let input: &mut dyn Cursor<i32> = &mut lookahead;
/// assert!(Step::Goto(5).apply(0, &mut *input) == Ok(5));
/// assert!(Step::Noop.apply(0, &mut *input) == Ok(0));
/// assert!(Step::Next.apply(0, &mut *input) == Ok(0));
/// assert!(input.current() == Some(&2));
/// assert!(Step::Fail("no".to_string()).apply(0, &mut *input).is_err());
///```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step<S> {
  /// Keep the current state; consume nothing.
  Noop,
  /// Consume the current element without recording it anywhere.
  Next,
  /// Move to the given state; consume nothing.
  Goto(S),
  /// Abort the invocation.
  Fail(String),
}

impl<S> Step<S>
where
  S: Copy,
{
  /// Execute this step against `input`.
  pub fn apply<T>(&self, state: S, input: &mut dyn Cursor<T>) -> Result<S, Failure> {
    match self {
      Self::Noop => Ok(state),
      Self::Next => {
        input.advance();
        Ok(state)
      },
      Self::Goto(target) => Ok(*target),
      Self::Fail(message) => Err(Failure::new(message.clone())),
    }
  }
}

impl<S> Transitions<S> for Step<S>
where
  S: Copy,
{
  fn target(&self) -> Option<S> {
    match self {
      Self::Goto(target) => Some(*target),
      _ => None,
    }
  }

  fn consumes(&self) -> bool {
    matches!(self, Self::Next)
  }
}

impl<S, T, X> Action<S, T, X> for Step<S>
where
  S: StateTag,
{
  type Error = Error;

  fn act(&self, state: S, input: &mut dyn Cursor<T>, _ctx: &mut X) -> Result<S, Error> {
    Ok(self.apply(state, input)?)
  }
}

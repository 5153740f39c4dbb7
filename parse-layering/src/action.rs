/*
 * Description: Steps available to parser rule tables.
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

//! Steps available to parser rule tables.

use crate::error::{Error, ParseError};

use flexer::{
  action::{Action, Step, Transitions},
  cursor::Cursor,
  state::StateTag,
};
use text_flexer::{TextPos, Token};

use core::fmt;

/// User code run by an [`invoke`](crate::Rule::invoke) step.
///
/// Receives the current state, the token cursor and the invocation's context, and returns the
/// next state. By convention it inspects [`Cursor::current`] but leaves advancing to an explicit
/// [`advance`](crate::Rule::advance) step.
pub type Callback<S, K, X> =
  Box<dyn Fn(S, &mut dyn Cursor<Token<K>>, &mut X) -> Result<S, ParseError> + Send + Sync>;

/// One step of a parser action list.
pub enum TokenAction<S, K, X> {
  /// A primitive shared with every flexer. [`Step::Next`] behaves like [`Advance`](Self::Advance).
  Step(Step<S>),
  /// Move past the current token.
  Advance,
  /// Run user code.
  Invoke(Callback<S, K, X>),
  /// Reaching end of input here is valid.
  Accept,
  /// Reaching end of input here is a syntax error.
  Reject(String),
}

impl<S, K, X> fmt::Debug for TokenAction<S, K, X>
where
  S: fmt::Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Step(step) => f.debug_tuple("Step").field(step).finish(),
      Self::Advance => write!(f, "Advance"),
      Self::Invoke(_) => write!(f, "Invoke(..)"),
      Self::Accept => write!(f, "Accept"),
      Self::Reject(message) => f.debug_tuple("Reject").field(message).finish(),
    }
  }
}

impl<S, K, X> Transitions<S> for TokenAction<S, K, X>
where
  S: Copy,
{
  fn target(&self) -> Option<S> {
    match self {
      Self::Step(step) => step.target(),
      _ => None,
    }
  }

  fn consumes(&self) -> bool {
    match self {
      Self::Step(step) => step.consumes(),
      Self::Advance => true,
      _ => false,
    }
  }
}

/// Context of a parser invocation: the caller's context plus the position of the last token
/// advanced past.
#[derive(Debug)]
pub struct Session<X> {
  context: X,
  last: Option<TextPos>,
}

impl<X> Session<X> {
  /// Wrap the caller's context.
  pub fn new(context: X) -> Self {
    Self {
      context,
      last: None,
    }
  }

  /// The caller's context.
  pub fn context(&self) -> &X {
    &self.context
  }

  /// Unwrap the caller's context.
  pub fn into_context(self) -> X {
    self.context
  }

  /// End position of the last token advanced past.
  pub fn last_position(&self) -> Option<TextPos> {
    self.last
  }

  fn advance<K>(&mut self, input: &mut dyn Cursor<Token<K>>) {
    if let Some(token) = input.advance() {
      self.last = Some(token.end_position);
    }
  }
}

impl<S, K, X> Action<S, Token<K>, Session<X>> for TokenAction<S, K, X>
where
  S: StateTag,
{
  type Error = Error;

  fn act(
    &self,
    state: S,
    input: &mut dyn Cursor<Token<K>>,
    session: &mut Session<X>,
  ) -> Result<S, Error> {
    let outcome = match self {
      Self::Step(Step::Next) | Self::Advance => {
        session.advance(input);
        Ok(state)
      },
      Self::Step(step) => step.apply(state, &mut *input).map_err(ParseError::from),
      Self::Invoke(callback) => callback(state, &mut *input, &mut session.context),
      Self::Accept => Ok(state),
      Self::Reject(message) => Err(ParseError::new(message.clone())),
    };
    outcome.map_err(|err| {
      let here = input
        .current()
        .map(|token| token.end_position)
        .or(session.last);
      err.or_at(here).into()
    })
  }
}

/*
 * Description: Steps available to tokenizer rule tables.
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

//! Steps available to tokenizer rule tables.

use crate::{error::SyntaxError, token::TextContext, TokenizeError};

use flexer::{
  action::{Action, Step, Transitions},
  cursor::Cursor,
  state::StateTag,
};

/// One step of a tokenizer action list.
///
/// Each tick consumes at most one character: a list holding more than one of
/// [`Skip`](Self::Skip), [`Consume`](Self::Consume) and [`Step::Next`] is rejected when the
/// tokenizer is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharAction<S> {
  /// A primitive shared with every flexer.
  ///
  /// [`Step::Next`] behaves like [`Skip`](Self::Skip) so positions stay accurate, and
  /// [`Step::Fail`] is reported at the current position.
  Step(Step<S>),
  /// Consume one character and discard it.
  Skip,
  /// Consume one character into the pending token.
  Consume,
  /// Frame the pending token with the current state as its kind, then move to the given state.
  Frame(S),
  /// Frame the pending token and stay put. Intended for end of input.
  FrameStay,
  /// Discard the pending text. Intended for end of input.
  Drop,
  /// Abort at the current position. Intended for end of input.
  FailAtEnd(String),
}

impl<S> Transitions<S> for CharAction<S>
where
  S: Copy,
{
  fn target(&self) -> Option<S> {
    match self {
      Self::Step(step) => step.target(),
      Self::Frame(target) => Some(*target),
      _ => None,
    }
  }

  fn consumes(&self) -> bool {
    match self {
      Self::Step(step) => step.consumes(),
      Self::Skip | Self::Consume => true,
      _ => false,
    }
  }
}

impl<S> Action<S, char, TextContext<S>> for CharAction<S>
where
  S: StateTag,
{
  type Error = TokenizeError;

  fn act(
    &self,
    state: S,
    input: &mut dyn Cursor<char>,
    ctx: &mut TextContext<S>,
  ) -> Result<S, TokenizeError> {
    match self {
      Self::Step(Step::Next) | Self::Skip => {
        if let Some(c) = input.advance() {
          ctx.skip(c);
        }
        Ok(state)
      },
      Self::Step(step) => step
        .apply(state, input)
        .map_err(|failure| SyntaxError::new(ctx.position(), failure.message).into()),
      Self::Consume => {
        if let Some(c) = input.advance() {
          ctx.consume(c);
        }
        Ok(state)
      },
      Self::Frame(target) => {
        ctx.frame(state);
        Ok(*target)
      },
      Self::FrameStay => {
        ctx.frame(state);
        Ok(state)
      },
      Self::Drop => {
        ctx.drop_buffer();
        Ok(state)
      },
      Self::FailAtEnd(message) => Err(SyntaxError::new(ctx.position(), message.clone()).into()),
    }
  }
}

/*
 * Description: Errors raised while parsing token streams.
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

//! Errors raised while parsing token streams.

use flexer::error::{Failure, GrammarError};
use text_flexer::{TextPos, Token, TokenizeError};

use displaydoc::Display;
use thiserror::Error;

use core::fmt;

/// The token stream was rejected.
///
/// Errors raised without a position are given one by the parser: the end position of the current
/// token, or of the last token advanced past once the stream has ended.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub struct ParseError {
  /// Why the tokens were rejected.
  pub message: String,
  /// Where, if known.
  pub position: Option<TextPos>,
}

impl ParseError {
  /// An error whose position will be filled in by the parser.
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      position: None,
    }
  }

  /// An error located at the end of `token`.
  pub fn at<K>(token: &Token<K>, message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      position: Some(token.end_position),
    }
  }

  /// Use `position` unless one is already attached.
  pub fn or_at(self, position: Option<TextPos>) -> Self {
    Self {
      position: self.position.or(position),
      ..self
    }
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self.position {
      Some(position) => write!(f, "{}: {}", position, self.message),
      None => write!(f, "{}", self.message),
    }
  }
}

impl From<Failure> for ParseError {
  fn from(failure: Failure) -> Self {
    Self::new(failure.message)
  }
}

/// Everything that can abort a parser invocation.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum Error {
  /// parse error: {0}
  Parse(#[from] ParseError),
  /// {0}
  Grammar(#[from] GrammarError),
  /// {0}
  Tokenize(#[from] TokenizeError),
}

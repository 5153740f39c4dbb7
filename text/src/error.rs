/*
 * Description: Errors raised while tokenizing.
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

//! Errors raised while tokenizing.

use crate::token::TextPos;

use flexer::error::GrammarError;

use displaydoc::Display;
use thiserror::Error;

/// {position}: {message}
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[ignore_extra_doc_attributes]
///
/// The input was rejected by a `fail` step.
pub struct SyntaxError {
  /// Where the tokenizer stood when it failed.
  pub position: TextPos,
  /// Why the input was rejected.
  pub message: String,
}

impl SyntaxError {
  /// Construct an error at `position`.
  pub fn new(position: TextPos, message: impl Into<String>) -> Self {
    Self {
      position,
      message: message.into(),
    }
  }

  /// 1-based line of the failure.
  pub fn line(&self) -> usize {
    self.position.line
  }

  /// 0-based column of the failure.
  pub fn column(&self) -> usize {
    self.position.column
  }
}

/// Everything that can abort a tokenizer invocation.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum TokenizeError {
  /// syntax error at {0}
  Syntax(#[from] SyntaxError),
  /// {0}
  Grammar(#[from] GrammarError),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display() {
    let err = SyntaxError::new(
      TextPos {
        index: 4,
        line: 2,
        column: 1,
      },
      "bad",
    );
    assert_eq!(err.to_string(), "2:1: bad");
    assert_eq!((err.line(), err.column()), (2, 1));
    assert_eq!(
      TokenizeError::from(err).to_string(),
      "syntax error at 2:1: bad"
    );
  }
}

/*
 * Description: Positions and framed tokens.
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

//! Positions and framed tokens.

use displaydoc::Display;

use std::{collections::VecDeque, mem};

/// {line}:{column}
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[ignore_extra_doc_attributes]
///
/// A location in the input text.
///
/// `line` counts from 1 and `column` from 0; consuming a newline moves to the start of the next
/// line.
///
///```
/// use text_flexer::TextPos;
///
/// let mut pos = TextPos::default();
/// assert!(pos == TextPos { index: 0, line: 1, column: 0 });
/// pos.advance('a');
/// pos.advance('\n');
/// pos.advance('b');
/// assert!(pos == TextPos { index: 3, line: 2, column: 1 });
/// assert!(pos.to_string() == "2:1");
///```
pub struct TextPos {
  /// Number of characters before this position.
  pub index: usize,
  /// 1-based line number.
  pub line: usize,
  /// 0-based offset within the line.
  pub column: usize,
}

impl Default for TextPos {
  fn default() -> Self {
    Self {
      index: 0,
      line: 1,
      column: 0,
    }
  }
}

impl TextPos {
  /// Move past `c`.
  pub fn advance(&mut self, c: char) {
    self.index += 1;
    if c == '\n' {
      self.line += 1;
      self.column = 0;
    } else {
      self.column += 1;
    }
  }
}

/// A framed span of consumed text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token<S> {
  /// Position just past the last character consumed before framing.
  pub end_position: TextPos,
  /// The consumed characters.
  pub text: String,
  /// The state active when the token was framed.
  pub kind: S,
}

/// Per-invocation state of a [`Tokenizer`](crate::Tokenizer).
#[derive(Debug)]
pub struct TextContext<S> {
  buffer: String,
  position: TextPos,
  pending: VecDeque<Token<S>>,
}

impl<S> Default for TextContext<S> {
  fn default() -> Self {
    Self {
      buffer: String::new(),
      position: TextPos::default(),
      pending: VecDeque::new(),
    }
  }
}

impl<S> TextContext<S> {
  /// Position just past the last consumed or skipped character.
  pub fn position(&self) -> TextPos {
    self.position
  }

  /// Text consumed since the last token was framed.
  pub fn buffer(&self) -> &str {
    &self.buffer
  }

  /// Framed tokens not yet handed out.
  pub fn pending(&self) -> impl Iterator<Item = &Token<S>> {
    self.pending.iter()
  }

  pub(crate) fn skip(&mut self, c: char) {
    self.position.advance(c);
  }

  pub(crate) fn consume(&mut self, c: char) {
    self.buffer.push(c);
    self.position.advance(c);
  }

  pub(crate) fn frame(&mut self, kind: S) {
    let token = Token {
      end_position: self.position,
      text: mem::take(&mut self.buffer),
      kind,
    };
    self.pending.push_back(token);
  }

  pub(crate) fn drop_buffer(&mut self) {
    self.buffer.clear();
  }

  pub(crate) fn next_pending(&mut self) -> Option<Token<S>> {
    self.pending.pop_front()
  }

  pub(crate) fn into_pending(self) -> VecDeque<Token<S>> {
    self.pending
  }
}

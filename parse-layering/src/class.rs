/*
 * Description: Classifiers over framed tokens.
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

//! Classifiers over framed tokens.

use flexer::classify::Classifier;
use text_flexer::Token;

/// Selects a branch of a [`Parser`](crate::Parser) state.
///
///```
/// use flexer::classify::Classifier;
/// use parse_layering::TokenClass;
/// use text_flexer::{TextPos, Token};
///
/// let token = Token { end_position: TextPos::default(), text: "if".to_string(), kind: 'w' };
/// assert!(TokenClass::Kind('w').contains(&token));
/// assert!(TokenClass::Exact('w', "if".to_string()).contains(&token));
/// assert!(!TokenClass::Exact('w', "else".to_string()).contains(&token));
/// assert!(!TokenClass::Kind('n').contains(&token));
///```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenClass<K> {
  /// Any token framed by this tokenizer state.
  Kind(K),
  /// A token of this kind with exactly this text.
  Exact(K, String),
}

impl<K> From<K> for TokenClass<K> {
  fn from(kind: K) -> Self {
    Self::Kind(kind)
  }
}

impl<K> Classifier<Token<K>> for TokenClass<K>
where
  K: PartialEq,
{
  fn contains(&self, token: &Token<K>) -> bool {
    match self {
      Self::Kind(kind) => &token.kind == kind,
      Self::Exact(kind, text) => &token.kind == kind && &token.text == text,
    }
  }
}

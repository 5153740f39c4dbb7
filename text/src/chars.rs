/*
 * Description: Single-character predicates.
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

//! Single-character predicates.

use flexer::classify::Classifier;

use displaydoc::Display;
use regex::Regex;

use core::hash::{Hash, Hasher};

/// Broad categories of characters.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum CharClass {
  /// any letter
  AnyLetter,
  /// a latin letter
  LatinLetter,
  /// a digit
  Digit,
  /// whitespace
  Whitespace,
}

impl CharClass {
  /// Whether `c` belongs to this class.
  ///
  ///```
  /// use text_flexer::CharClass;
  ///
  /// assert!(CharClass::AnyLetter.contains('é'));
  /// assert!(!CharClass::LatinLetter.contains('é'));
  /// assert!(CharClass::Digit.contains('7'));
  /// assert!(CharClass::Whitespace.contains('\n'));
  ///```
  pub fn contains(self, c: char) -> bool {
    match self {
      Self::AnyLetter => c.is_alphabetic(),
      Self::LatinLetter => c.is_ascii_alphabetic(),
      Self::Digit => c.is_numeric(),
      Self::Whitespace => c.is_whitespace(),
    }
  }
}

/// A regex character class matched against one character at a time.
///
/// Two patterns are the same classifier when their source text is identical.
///
///```
/// use text_flexer::CharPattern;
///
/// let hex = CharPattern::new("[0-9a-fA-F]").unwrap();
/// assert!(hex.contains('c'));
/// assert!(!hex.contains('g'));
/// assert!(hex.as_str() == "[0-9a-fA-F]");
/// assert!(CharPattern::new("[").is_err());
///```
#[derive(Clone, Debug)]
pub struct CharPattern {
  source: String,
  anchored: Regex,
}

impl CharPattern {
  /// Compile `class`, which must match exactly one character to be useful.
  pub fn new(class: &str) -> Result<Self, regex::Error> {
    let anchored = Regex::new(&format!("^(?:{})$", class))?;
    Ok(Self {
      source: class.to_string(),
      anchored,
    })
  }

  /// The pattern this was compiled from.
  pub fn as_str(&self) -> &str {
    &self.source
  }

  /// Whether `c` matches the pattern.
  pub fn contains(&self, c: char) -> bool {
    let mut buf = [0u8; 4];
    self.anchored.is_match(c.encode_utf8(&mut buf))
  }
}

impl PartialEq for CharPattern {
  fn eq(&self, other: &Self) -> bool {
    self.source == other.source
  }
}

impl Eq for CharPattern {}

impl Hash for CharPattern {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.source.hash(state);
  }
}

/// Selects a branch of a [`Tokenizer`](crate::Tokenizer) state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CharPredicate {
  /// Exactly this character.
  Char(char),
  /// Any character of the class.
  Class(CharClass),
  /// Any character matching the pattern.
  Pattern(CharPattern),
}

impl From<char> for CharPredicate {
  fn from(c: char) -> Self {
    Self::Char(c)
  }
}

impl From<CharClass> for CharPredicate {
  fn from(class: CharClass) -> Self {
    Self::Class(class)
  }
}

impl From<CharPattern> for CharPredicate {
  fn from(pattern: CharPattern) -> Self {
    Self::Pattern(pattern)
  }
}

impl Classifier<char> for CharPredicate {
  fn contains(&self, item: &char) -> bool {
    match self {
      Self::Char(c) => c == item,
      Self::Class(class) => class.contains(*item),
      Self::Pattern(pattern) => pattern.contains(*item),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classes() {
    let letter = CharPredicate::from(CharClass::AnyLetter);
    assert!(letter.contains(&'ж'));
    assert!(!letter.contains(&'1'));
    let latin = CharPredicate::from(CharClass::LatinLetter);
    assert!(latin.contains(&'Q'));
    assert!(!latin.contains(&'ж'));
    assert!(CharPredicate::from(CharClass::Whitespace).contains(&'\t'));
    assert!(CharPredicate::from('=').contains(&'='));
    assert!(!CharPredicate::from('=').contains(&'-'));
  }

  #[test]
  fn patterns_match_whole_chars() {
    let pattern = CharPredicate::from(CharPattern::new("a|bc").unwrap());
    assert!(pattern.contains(&'a'));
    assert!(!pattern.contains(&'b'));
    let any = CharPredicate::from(CharPattern::new(r"\p{Greek}").unwrap());
    assert!(any.contains(&'λ'));
    assert!(!any.contains(&'l'));
  }

  #[test]
  fn patterns_compare_by_source() {
    assert_eq!(
      CharPattern::new("[ab]").unwrap(),
      CharPattern::new("[ab]").unwrap()
    );
    assert_ne!(
      CharPattern::new("[ab]").unwrap(),
      CharPattern::new("[ba]").unwrap()
    );
  }
}

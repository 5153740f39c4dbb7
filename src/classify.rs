/*
 * Description: Predicates selecting a branch of a rule table.
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

//! Predicates selecting a branch of a rule table.

/// A predicate over a single stream element.
pub trait Classifier<T> {
  /// Whether `item` belongs to this class.
  fn contains(&self, item: &T) -> bool;
}

/// Matches exactly one value.
///
///```
/// use flexer::classify::{Classifier, Equals};
///
/// assert!(Equals('a').contains(&'a'));
/// assert!(!Equals('a').contains(&'b'));
///```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Equals<T>(pub T);

impl<T> Classifier<T> for Equals<T>
where
  T: PartialEq,
{
  fn contains(&self, item: &T) -> bool {
    &self.0 == item
  }
}

/// The key of one entry in a [`RuleTable`](crate::rules::RuleTable).
///
///```
/// use flexer::classify::{Branch, Classifier, Equals};
///
/// assert!(Branch::When(Equals(3)).contains(&3));
/// assert!(!Branch::When(Equals(3)).contains(&4));
/// assert!(Branch::<Equals<u8>>::Otherwise.contains(&4));
///```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Branch<C> {
  /// Selected when the classifier contains the element.
  When(C),
  /// Catch-all; contains every element.
  Otherwise,
}

impl<T, C> Classifier<T> for Branch<C>
where
  C: Classifier<T>,
{
  fn contains(&self, item: &T) -> bool {
    match self {
      Self::When(classifier) => classifier.contains(item),
      Self::Otherwise => true,
    }
  }
}

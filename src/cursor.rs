/*
 * Description: A forward iterator holding one element of lookahead.
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

//! A forward iterator holding one element of lookahead.

/// Object-safe view of the input, handed to every action.
pub trait Cursor<T> {
  /// The element the next tick dispatches on, or [`None`] once the input is exhausted.
  fn current(&self) -> Option<&T>;

  /// Whether the input is exhausted. Never goes back to `false`.
  fn is_ended(&self) -> bool;

  /// Consume and return the current element, pulling the next one into lookahead.
  ///
  /// Does nothing after the input has ended.
  fn advance(&mut self) -> Option<T>;

  /// How many elements have been consumed so far.
  fn consumed(&self) -> usize;
}

/// Wraps an iterator, eagerly holding exactly one unconsumed element.
///
///```
/// use flexer::cursor::{Cursor, Lookahead};
///
/// let mut cursor = Lookahead::new("ab".chars());
/// assert!(cursor.current() == Some(&'a'));
/// assert!(cursor.advance() == Some('a'));
/// assert!(cursor.current() == Some(&'b'));
/// assert!(!cursor.is_ended());
/// assert!(cursor.advance() == Some('b'));
/// assert!(cursor.is_ended());
/// assert!(cursor.advance().is_none());
/// assert!(cursor.consumed() == 2);
///```
#[derive(Debug)]
pub struct Lookahead<I>
where
  I: Iterator,
{
  inner: I,
  current: Option<I::Item>,
  consumed: usize,
}

impl<I> Lookahead<I>
where
  I: Iterator,
{
  /// Pull the first element of `inner` into lookahead.
  pub fn new(mut inner: I) -> Self {
    let current = inner.next();
    Self {
      inner,
      current,
      consumed: 0,
    }
  }
}

impl<I> Cursor<I::Item> for Lookahead<I>
where
  I: Iterator,
{
  fn current(&self) -> Option<&I::Item> {
    self.current.as_ref()
  }

  fn is_ended(&self) -> bool {
    self.current.is_none()
  }

  fn advance(&mut self) -> Option<I::Item> {
    /* The underlying iterator is never polled again once it has returned None, so it doesn't
     * need to be fused. */
    let taken = self.current.take()?;
    self.current = self.inner.next();
    self.consumed += 1;
    Some(taken)
  }

  fn consumed(&self) -> usize {
    self.consumed
  }
}

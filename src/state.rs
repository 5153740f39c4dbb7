/*
 * Description: Tags naming the interpretation modes of an automaton.
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

//! Tags naming the interpretation modes of an automaton.

use core::{fmt::Debug, hash::Hash};

/// A closed enumeration of automaton states.
///
/// The [`Default`] member is the initial state whenever a caller doesn't supply one, so grammars
/// mark their zero-valued variant with `#[default]`:
///```
/// use flexer::state::StateTag;
///
/// #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
/// enum Mode {
///   #[default]
///   Free,
///   Word,
/// }
///
/// fn initial<S: StateTag>() -> S {
///   S::default()
/// }
/// assert!(initial::<Mode>() == Mode::Free);
/// assert!(initial::<Mode>() != Mode::Word);
///```
pub trait StateTag: Copy + Eq + Hash + Debug + Default {}

impl<S> StateTag for S where S: Copy + Eq + Hash + Debug + Default {}

/// Render a state for inclusion in error messages.
pub(crate) fn describe<S: Debug>(state: &S) -> String {
  format!("{:?}", state)
}

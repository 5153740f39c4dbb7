/*
 * Description: Per-state tables of ordered branches.
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

//! Per-state tables of ordered branches.

use crate::{
  classify::{Branch, Classifier},
  error::GrammarError,
  state::{describe, StateTag},
};

use indexmap::IndexMap;

use core::hash::Hash;

/// Ordered (classifier, action list) entries for one state, plus an end-of-input action list.
///
/// Several classifiers may share one action list, so branches refer to lists by index.
#[derive(Debug)]
pub struct RuleTable<C, A> {
  branches: IndexMap<Branch<C>, usize>,
  lists: Vec<Vec<A>>,
  on_end: Vec<A>,
}

impl<C, A> Default for RuleTable<C, A> {
  fn default() -> Self {
    Self {
      branches: IndexMap::new(),
      lists: Vec::new(),
      on_end: Vec::new(),
    }
  }
}

impl<C, A> RuleTable<C, A> {
  /// The action list of the first branch, in registration order, whose classifier contains `item`.
  pub fn lookup<T>(&self, item: &T) -> Option<&[A]>
  where
    C: Classifier<T>,
  {
    self
      .branches
      .iter()
      .find(|(branch, _)| branch.contains(item))
      .map(|(_, &list)| self.lists[list].as_slice())
  }

  /// The actions executed when the input ends in this state.
  pub fn on_end(&self) -> &[A] {
    &self.on_end
  }

  /// Every action list of this table, the end-of-input list last.
  pub fn action_lists(&self) -> impl Iterator<Item = &[A]> {
    self
      .lists
      .iter()
      .map(Vec::as_slice)
      .chain(Some(self.on_end.as_slice()))
  }

  /// Every action registered in this table, for validation.
  pub fn actions(&self) -> impl Iterator<Item = &A> {
    self.lists.iter().flatten().chain(self.on_end.iter())
  }

  /// Whether a catch-all branch was installed.
  pub fn is_exhaustive(&self) -> bool
  where
    C: Hash + Eq,
  {
    self.branches.contains_key(&Branch::Otherwise)
  }
}

/// Fluent registration of the branches of one state.
///
/// Returned by [`FlexerBuilder::register`](crate::driver::FlexerBuilder::register). Mistakes made
/// while registering are recorded and reported by
/// [`FlexerBuilder::build`](crate::driver::FlexerBuilder::build), so the chain never has to be
/// interrupted to handle them.
pub struct Rule<'t, S, C, A> {
  state: S,
  table: &'t mut RuleTable<C, A>,
  defects: &'t mut Vec<GrammarError>,
  current: Option<usize>,
}

impl<'t, S, C, A> Rule<'t, S, C, A>
where
  S: StateTag,
  C: Hash + Eq,
{
  pub(crate) fn new(
    state: S,
    table: &'t mut RuleTable<C, A>,
    defects: &'t mut Vec<GrammarError>,
  ) -> Self {
    Self {
      state,
      table,
      defects,
      current: None,
    }
  }

  /// The state being registered.
  pub fn state(&self) -> S {
    self.state
  }

  /// Open a branch selected by `classifier`.
  pub fn when(self, classifier: C) -> Self {
    self.when_any([classifier])
  }

  /// Open a branch selected by any of `classifiers`, all sharing one action list.
  pub fn when_any(self, classifiers: impl IntoIterator<Item = C>) -> Self {
    self.open(classifiers.into_iter().map(Branch::When))
  }

  /// Open the catch-all branch.
  pub fn otherwise(self) -> Self {
    self.open([Branch::Otherwise])
  }

  /// Append a step to the most recently opened branch.
  pub fn then(mut self, action: A) -> Self {
    match self.current {
      Some(list) => self.table.lists[list].push(action),
      None => self.defects.push(GrammarError::DetachedStep {
        state: describe(&self.state),
      }),
    }
    self
  }

  /// Append a step to the end-of-input action list.
  pub fn on_end(mut self, action: A) -> Self {
    self.table.on_end.push(action);
    self
  }

  fn open(mut self, branches: impl IntoIterator<Item = Branch<C>>) -> Self {
    let list = self.table.lists.len();
    self.table.lists.push(Vec::new());
    for branch in branches {
      if self.table.branches.contains_key(&branch) {
        self.defects.push(GrammarError::DuplicateClassifier {
          state: describe(&self.state),
        });
      } else {
        self.table.branches.insert(branch, list);
      }
    }
    self.current = Some(list);
    self
  }
}

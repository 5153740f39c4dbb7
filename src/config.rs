/*
 * Description: Options controlling a flexer invocation.
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

//! Options controlling a flexer invocation.

/// Engine-wide settings, fixed when a [`Flexer`](crate::driver::Flexer) is built.
///
///```
/// use flexer::config::Config;
///
/// assert!(Config::default().stall_limit.is_none());
/// assert!(Config::default().with_stall_limit(8).stall_limit == Some(8));
///```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
  /// Maximum number of consecutive ticks allowed to consume no input.
  ///
  /// Exceeding it raises [`GrammarError::Stalled`](crate::error::GrammarError::Stalled). `None`
  /// disables the check.
  pub stall_limit: Option<usize>,
}

impl Config {
  /// Abort invocations which go more than `limit` ticks without consuming anything.
  pub fn with_stall_limit(self, limit: usize) -> Self {
    Self {
      stall_limit: Some(limit),
    }
  }
}

/*
 * Description: Generate a token stream from text with declarative state tables.
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

//! Generate a token stream from text with declarative state tables.
//!
//! Each registered state describes what to do with the next character: [skip](Rule::skip) it,
//! [consume](Rule::consume) it into the pending token, or [frame](Rule::frame_and_transition) the
//! pending token and move elsewhere. Framed [`Token`]s are tagged with the state that produced
//! them, which doubles as their type.
//!
//!```
//! use text_flexer::{CharClass, Tokenizer};
//!
//! #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
//! enum Lex {
//!   #[default]
//!   Gap,
//!   Word,
//! }
//!
//! let mut builder = Tokenizer::builder();
//! builder
//!   .register(Lex::Gap)
//!   .when(CharClass::Whitespace).skip()
//!   .otherwise().transition(Lex::Word)
//!   .on_end_drop();
//! builder
//!   .register(Lex::Word)
//!   .when(CharClass::Whitespace).frame_and_transition(Lex::Gap)
//!   .otherwise().consume()
//!   .on_end_frame();
//! let tokenizer = builder.build().unwrap();
//!
//! let words: Vec<String> = tokenizer
//!   .flex_all("to be\nor".chars(), None)
//!   .unwrap()
//!   .into_iter()
//!   .map(|token| token.text)
//!   .collect();
//! assert!(words == ["to", "be", "or"]);
//!```

#![warn(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
/* Make all doctests fail if they produce any warnings. */
#![doc(test(attr(deny(warnings))))]
#![deny(clippy::all)]

pub mod action;
pub mod chars;
pub mod error;
pub mod token;
pub mod tokenizer;

pub use chars::{CharClass, CharPattern, CharPredicate};
pub use error::{SyntaxError, TokenizeError};
pub use token::{TextContext, TextPos, Token};
pub use tokenizer::{Rule, Tokenizer, TokenizerBuilder, Tokens};

/*
 * Description: Layer callback-driven parsers over flexer token streams.
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

//! Layer callback-driven parsers over flexer token streams.
//!
//! A [`Parser`] consumes the [`Token`](text_flexer::Token)s produced by a
//! [`Tokenizer`](text_flexer::Tokenizer), dispatching on their kind. Branch actions are user
//! callbacks which accumulate a result into a caller-defined context, plus explicit
//! [`advance`](Rule::advance) steps.
//!
//!```
//! use parse_layering::Parser;
//! use text_flexer::{CharClass, Tokenizer};
//!
//! #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
//! enum Lex {
//!   #[default]
//!   Gap,
//!   Num,
//! }
//!
//! #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
//! enum Sum {
//!   #[default]
//!   Adding,
//! }
//!
//! let mut lexer = Tokenizer::builder();
//! lexer
//!   .register(Lex::Gap)
//!   .when(CharClass::Digit).transition(Lex::Num)
//!   .otherwise().skip()
//!   .on_end_drop();
//! lexer
//!   .register(Lex::Num)
//!   .when(CharClass::Digit).consume()
//!   .otherwise().frame_and_transition(Lex::Gap)
//!   .on_end_frame();
//! let lexer = lexer.build().unwrap();
//!
//! let mut parser = Parser::builder();
//! parser
//!   .register(Sum::Adding)
//!   .when(Lex::Num)
//!   .invoke(|state, input, total: &mut u32| {
//!     *total += input.current().unwrap().text.parse::<u32>().unwrap();
//!     Ok(state)
//!   })
//!   .advance()
//!   .otherwise().fail("expected a number")
//!   .on_end_accept();
//! let parser = parser.build().unwrap();
//!
//! assert!(parser.parse_text(&lexer, "1 + 20 + 300", 0, None, None).unwrap() == 321);
//!```

#![warn(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
/* Make all doctests fail if they produce any warnings. */
#![doc(test(attr(deny(warnings))))]
#![deny(clippy::all)]

pub mod action;
pub mod class;
pub mod error;
pub mod parser;

pub use class::TokenClass;
pub use error::{Error, ParseError};
pub use parser::{Parse, Parser, ParserBuilder, Rule};

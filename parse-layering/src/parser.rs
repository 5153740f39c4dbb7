/*
 * Description: Token-stream flexers driven by user callbacks.
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

//! Token-stream flexers driven by user callbacks.

use crate::{
  action::{Session, TokenAction},
  class::TokenClass,
  error::{Error, ParseError},
};

use flexer::{
  action::Step,
  config::Config,
  cursor::Cursor,
  driver::{Flexer, FlexerBuilder, Process},
  error::GrammarError,
  rules,
  state::StateTag,
};
use text_flexer::{Token, Tokenizer};

use tracing::debug;

type Inner<S, K, X> = Flexer<S, TokenClass<K>, TokenAction<S, K, X>>;

/// Registers the rule tables of a [`Parser`].
pub struct ParserBuilder<S, K, X> {
  inner: FlexerBuilder<S, TokenClass<K>, TokenAction<S, K, X>>,
}

impl<S, K, X> Default for ParserBuilder<S, K, X> {
  fn default() -> Self {
    Self {
      inner: FlexerBuilder::default(),
    }
  }
}

impl<S, K, X> ParserBuilder<S, K, X>
where
  S: StateTag,
  K: StateTag,
{
  /// Replace the engine settings.
  pub fn configure(&mut self, config: Config) -> &mut Self {
    self.inner.configure(config);
    self
  }

  /// Start registering the branches of `state`.
  pub fn register(&mut self, state: S) -> Rule<'_, S, K, X> {
    Rule(self.inner.register(state))
  }

  /// Validate the tables.
  pub fn build(self) -> Result<Parser<S, K, X>, GrammarError> {
    Ok(Parser {
      flexer: self.inner.build()?,
    })
  }
}

/// Fluent registration of one parser state.
pub struct Rule<'t, S, K, X>(rules::Rule<'t, S, TokenClass<K>, TokenAction<S, K, X>>);

impl<'t, S, K, X> Rule<'t, S, K, X>
where
  S: StateTag,
  K: StateTag,
{
  /// Open a branch for tokens of `kind`.
  pub fn when(self, kind: K) -> Self {
    self.when_class(TokenClass::Kind(kind))
  }

  /// Open a branch for tokens of `kind` reading exactly `text`.
  pub fn when_exact(self, kind: K, text: impl Into<String>) -> Self {
    self.when_class(TokenClass::Exact(kind, text.into()))
  }

  /// Open a branch for an arbitrary [`TokenClass`].
  pub fn when_class(self, class: TokenClass<K>) -> Self {
    Self(self.0.when(class))
  }

  /// Open a branch for tokens of any of `kinds`, sharing one action list.
  pub fn when_any(self, kinds: impl IntoIterator<Item = K>) -> Self {
    Self(self.0.when_any(kinds.into_iter().map(TokenClass::Kind)))
  }

  /// Open the catch-all branch.
  pub fn otherwise(self) -> Self {
    Self(self.0.otherwise())
  }

  /// Run `callback`, which returns the next state.
  pub fn invoke<F>(self, callback: F) -> Self
  where
    F: Fn(S, &mut dyn Cursor<Token<K>>, &mut X) -> Result<S, ParseError> + Send + Sync + 'static,
  {
    self.then(TokenAction::Invoke(Box::new(callback)))
  }

  /// Move past the current token.
  pub fn advance(self) -> Self {
    self.then(TokenAction::Advance)
  }

  /// Do nothing.
  pub fn noop(self) -> Self {
    self.then(TokenAction::Step(Step::Noop))
  }

  /// Move to `target`.
  pub fn transition(self, target: S) -> Self {
    self.then(TokenAction::Step(Step::Goto(target)))
  }

  /// Abort with a [`ParseError`] located at the current token.
  pub fn fail(self, message: impl Into<String>) -> Self {
    self.then(TokenAction::Step(Step::Fail(message.into())))
  }

  /// Reaching end of input in this state is valid.
  pub fn on_end_accept(self) -> Self {
    Self(self.0.on_end(TokenAction::Accept))
  }

  /// Reaching end of input in this state is an error.
  pub fn on_end_reject(self, message: impl Into<String>) -> Self {
    Self(self.0.on_end(TokenAction::Reject(message.into())))
  }

  fn then(self, action: TokenAction<S, K, X>) -> Self {
    Self(self.0.then(action))
  }
}

/// A token-stream flexer, reusable across any number of inputs.
#[derive(Debug)]
pub struct Parser<S, K, X> {
  flexer: Inner<S, K, X>,
}

impl<S, K, X> Parser<S, K, X>
where
  S: StateTag,
  K: StateTag,
{
  /// Start registering rule tables.
  pub fn builder() -> ParserBuilder<S, K, X> {
    ParserBuilder::default()
  }

  /// The underlying engine.
  pub fn flexer(&self) -> &Inner<S, K, X> {
    &self.flexer
  }

  /// Lazily parse `tokens` into `ctx`, starting from `init` or the default state.
  pub fn flex<I>(&self, tokens: I, ctx: X, init: Option<S>) -> Parse<'_, S, K, X, I::IntoIter>
  where
    I: IntoIterator<Item = Token<K>>,
  {
    debug!(?init, "parsing");
    Parse {
      process: self.flexer.process(tokens, Session::new(ctx), init),
    }
  }

  /// Parse all of `tokens`, returning the context.
  pub fn flex_all<I>(&self, tokens: I, ctx: X, init: Option<S>) -> Result<X, Error>
  where
    I: IntoIterator<Item = Token<K>>,
  {
    let session = self.flexer.process_all(tokens, Session::new(ctx), init)?;
    Ok(session.into_context())
  }

  /// Tokenize `text` and parse the tokens as they are framed.
  ///
  /// The tokenizer starts from `tokenizer_init` and the parser from `init`, each falling back to
  /// its default state. A tokenizer error ends the token stream and takes precedence over whatever
  /// the parser made of the truncated stream.
  pub fn parse_text(
    &self,
    tokenizer: &Tokenizer<K>,
    text: &str,
    ctx: X,
    init: Option<S>,
    tokenizer_init: Option<K>,
  ) -> Result<X, Error> {
    let mut failure = None;
    let tokens = tokenizer
      .flex_str(text, tokenizer_init)
      .map_while(|outcome| match outcome {
        Ok(token) => Some(token),
        Err(err) => {
          failure = Some(err);
          None
        },
      });
    let parsed = self.flex_all(tokens, ctx, init);
    match failure {
      Some(err) => Err(err.into()),
      None => parsed,
    }
  }
}

/// The lazy state sequence of one [`Parser::flex`] invocation.
///
/// Results already committed to the context stay there after an error.
pub struct Parse<'f, S, K, X, I>
where
  I: Iterator<Item = Token<K>>,
{
  process: Process<'f, S, TokenClass<K>, TokenAction<S, K, X>, I, Session<X>>,
}

impl<'f, S, K, X, I> Parse<'f, S, K, X, I>
where
  S: StateTag,
  I: Iterator<Item = Token<K>>,
{
  /// The invocation's context.
  pub fn context(&self) -> &X {
    self.process.context().context()
  }

  /// End the invocation, recovering its context.
  pub fn into_context(self) -> X {
    self.process.into_context().into_context()
  }

  /// The state the next tick dispatches on.
  pub fn state(&self) -> S {
    self.process.state()
  }
}

impl<'f, S, K, X, I> Iterator for Parse<'f, S, K, X, I>
where
  S: StateTag,
  K: StateTag,
  I: Iterator<Item = Token<K>>,
{
  type Item = Result<S, Error>;

  fn next(&mut self) -> Option<Self::Item> {
    self.process.next()
  }
}

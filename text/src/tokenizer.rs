/*
 * Description: Character-stream flexers producing positioned tokens.
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

//! Character-stream flexers producing positioned tokens.

use crate::{
  action::CharAction,
  chars::CharPredicate,
  error::TokenizeError,
  token::{TextContext, TextPos, Token},
};

use flexer::{
  action::Step,
  config::Config,
  driver::{Flexer, FlexerBuilder, Process},
  error::GrammarError,
  rules,
  state::StateTag,
};

use tracing::debug;

use std::str::Chars;

type Inner<S> = Flexer<S, CharPredicate, CharAction<S>>;

/// Registers the rule tables of a [`Tokenizer`].
pub struct TokenizerBuilder<S> {
  inner: FlexerBuilder<S, CharPredicate, CharAction<S>>,
}

impl<S> Default for TokenizerBuilder<S>
where
  S: StateTag,
{
  fn default() -> Self {
    Self {
      inner: FlexerBuilder::new(),
    }
  }
}

impl<S> TokenizerBuilder<S>
where
  S: StateTag,
{
  /// Replace the engine settings.
  pub fn configure(&mut self, config: Config) -> &mut Self {
    self.inner.configure(config);
    self
  }

  /// Start registering the branches of `state`.
  pub fn register(&mut self, state: S) -> Rule<'_, S> {
    Rule(self.inner.register(state))
  }

  /// Validate the tables.
  pub fn build(self) -> Result<Tokenizer<S>, GrammarError> {
    Ok(Tokenizer {
      flexer: self.inner.build()?,
    })
  }
}

/// Fluent registration of one tokenizer state.
pub struct Rule<'t, S>(rules::Rule<'t, S, CharPredicate, CharAction<S>>);

impl<'t, S> Rule<'t, S>
where
  S: StateTag,
{
  /// Open a branch for a character, a [`CharClass`](crate::CharClass) or a
  /// [`CharPattern`](crate::CharPattern).
  pub fn when(self, predicate: impl Into<CharPredicate>) -> Self {
    Self(self.0.when(predicate.into()))
  }

  /// Open a branch for any of several predicates, sharing one action list.
  pub fn when_any<P>(self, predicates: impl IntoIterator<Item = P>) -> Self
  where
    P: Into<CharPredicate>,
  {
    Self(self.0.when_any(predicates.into_iter().map(Into::into)))
  }

  /// Open the catch-all branch.
  pub fn otherwise(self) -> Self {
    Self(self.0.otherwise())
  }

  /// Consume one character and discard it.
  pub fn skip(self) -> Self {
    self.then(CharAction::Skip)
  }

  /// Consume one character into the pending token.
  pub fn consume(self) -> Self {
    self.then(CharAction::Consume)
  }

  /// Do nothing.
  pub fn noop(self) -> Self {
    self.then(CharAction::Step(Step::Noop))
  }

  /// Move to `target` without framing anything.
  pub fn transition(self, target: S) -> Self {
    self.then(CharAction::Step(Step::Goto(target)))
  }

  /// Frame the pending token, tagged with the current state, then move to `target`.
  pub fn frame_and_transition(self, target: S) -> Self {
    self.then(CharAction::Frame(target))
  }

  /// Abort with a [`SyntaxError`](crate::SyntaxError) at the current position.
  pub fn fail(self, message: impl Into<String>) -> Self {
    self.then(CharAction::Step(Step::Fail(message.into())))
  }

  /// At end of input, frame whatever is pending as a final token.
  pub fn on_end_frame(self) -> Self {
    Self(self.0.on_end(CharAction::FrameStay))
  }

  /// At end of input, silently discard whatever is pending.
  pub fn on_end_drop(self) -> Self {
    Self(self.0.on_end(CharAction::Drop))
  }

  /// Reaching end of input in this state is an error.
  pub fn on_end_fail(self, message: impl Into<String>) -> Self {
    Self(self.0.on_end(CharAction::FailAtEnd(message.into())))
  }

  fn then(self, action: CharAction<S>) -> Self {
    Self(self.0.then(action))
  }
}

/// A character-stream flexer, reusable across any number of inputs.
#[derive(Debug)]
pub struct Tokenizer<S> {
  flexer: Inner<S>,
}

impl<S> Tokenizer<S>
where
  S: StateTag,
{
  /// Start registering rule tables.
  pub fn builder() -> TokenizerBuilder<S> {
    TokenizerBuilder::default()
  }

  /// The underlying engine.
  pub fn flexer(&self) -> &Inner<S> {
    &self.flexer
  }

  /// Lazily tokenize `input`, starting from `init` or the default state.
  ///
  /// Tokens are handed out as soon as the tick that framed them completes, so only a bounded
  /// prefix of the input is read to produce each one.
  pub fn flex<I>(&self, input: I, init: Option<S>) -> Tokens<'_, S, I::IntoIter>
  where
    I: IntoIterator<Item = char>,
  {
    debug!(?init, "tokenizing");
    Tokens {
      process: self.flexer.process(input, TextContext::default(), init),
      failure: None,
    }
  }

  /// Lazily tokenize a string.
  pub fn flex_str<'a>(&'a self, input: &'a str, init: Option<S>) -> Tokens<'a, S, Chars<'a>> {
    self.flex(input.chars(), init)
  }

  /// Tokenize all of `input`.
  pub fn flex_all<I>(&self, input: I, init: Option<S>) -> Result<Vec<Token<S>>, TokenizeError>
  where
    I: IntoIterator<Item = char>,
  {
    let ctx = self
      .flexer
      .process_all(input, TextContext::default(), init)?;
    Ok(ctx.into_pending().into())
  }
}

/// The lazy token sequence of one [`Tokenizer::flex`] invocation.
///
/// After an error it yields nothing more, but tokens framed before the failing step are handed out
/// first.
pub struct Tokens<'f, S, I>
where
  I: Iterator<Item = char>,
{
  process: Process<'f, S, CharPredicate, CharAction<S>, I, TextContext<S>>,
  failure: Option<TokenizeError>,
}

impl<'f, S, I> Tokens<'f, S, I>
where
  S: StateTag,
  I: Iterator<Item = char>,
{
  /// Position just past the last character read so far.
  pub fn position(&self) -> TextPos {
    self.process.context().position()
  }

  /// The state the next tick dispatches on.
  pub fn state(&self) -> S {
    self.process.state()
  }
}

impl<'f, S, I> Iterator for Tokens<'f, S, I>
where
  S: StateTag,
  I: Iterator<Item = char>,
{
  type Item = Result<Token<S>, TokenizeError>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if let Some(token) = self.process.context_mut().next_pending() {
        return Some(Ok(token));
      }
      if let Some(err) = self.failure.take() {
        return Some(Err(err));
      }
      match self.process.next()? {
        Ok(_) => (),
        Err(err) => {
          self.failure = Some(err);
        },
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{chars::CharClass, error::SyntaxError, CharPattern};

  use pretty_assertions::assert_eq;
  use proptest::prelude::*;

  #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
  enum Ini {
    #[default]
    Free,
    ParamName,
    SpaceAfterEquals,
    ParamValue,
  }

  fn assignments() -> Tokenizer<Ini> {
    let mut builder = Tokenizer::builder();
    builder
      .register(Ini::Free)
      .when(CharClass::LatinLetter)
      .transition(Ini::ParamName)
      .when(CharClass::Whitespace)
      .skip()
      .otherwise()
      .fail("expected a param name")
      .on_end_drop();
    builder
      .register(Ini::ParamName)
      .when_any([
        CharPredicate::from(CharClass::LatinLetter),
        CharClass::Digit.into(),
        '_'.into(),
      ])
      .consume()
      .when(' ')
      .skip()
      .when('=')
      .frame_and_transition(Ini::SpaceAfterEquals)
      .skip()
      .otherwise()
      .fail("forbidden symbol in param name")
      .on_end_fail("expected '='");
    builder
      .register(Ini::SpaceAfterEquals)
      .when(' ')
      .skip()
      .otherwise()
      .transition(Ini::ParamValue)
      .on_end_fail("expected a value");
    builder
      .register(Ini::ParamValue)
      .when('\n')
      .frame_and_transition(Ini::Free)
      .skip()
      .otherwise()
      .consume()
      .on_end_frame();
    builder.build().unwrap()
  }

  fn kinds_and_texts(tokens: Vec<Token<Ini>>) -> Vec<(Ini, String)> {
    tokens
      .into_iter()
      .map(|token| (token.kind, token.text))
      .collect()
  }

  #[test]
  fn worked_grammar() {
    let tokens = assignments().flex_all("key = value\n".chars(), None).unwrap();
    assert_eq!(
      kinds_and_texts(tokens),
      vec![
        (Ini::ParamName, "key".to_string()),
        (Ini::ParamValue, "value".to_string()),
      ]
    );
  }

  #[test]
  fn tokenizer_is_reusable() {
    let tokenizer = assignments();
    let first = tokenizer.flex_all("a=1\nb = 2".chars(), None).unwrap();
    let second = tokenizer.flex_all("a=1\nb = 2".chars(), None).unwrap();
    assert_eq!(first, second);
    assert_eq!(
      kinds_and_texts(first),
      vec![
        (Ini::ParamName, "a".to_string()),
        (Ini::ParamValue, "1".to_string()),
        (Ini::ParamName, "b".to_string()),
        (Ini::ParamValue, "2".to_string()),
      ]
    );
  }

  #[test]
  fn explicit_initial_state() {
    let tokens = assignments()
      .flex_all("raw value".chars(), Some(Ini::ParamValue))
      .unwrap();
    assert_eq!(
      kinds_and_texts(tokens),
      vec![(Ini::ParamValue, "raw value".to_string())]
    );
  }

  fn consume_all() -> Tokenizer<Ini> {
    let mut builder = Tokenizer::builder();
    builder
      .register(Ini::Free)
      .otherwise()
      .consume()
      .on_end_frame();
    builder.build().unwrap()
  }

  #[test]
  fn end_position() {
    let tokens = consume_all().flex_all("ab\ncd".chars(), None).unwrap();
    assert_eq!(
      tokens,
      vec![Token {
        end_position: TextPos {
          index: 5,
          line: 2,
          column: 2
        },
        text: "ab\ncd".to_string(),
        kind: Ini::Free,
      }]
    );
  }

  #[test]
  fn empty_input_produces_nothing() {
    let tokenizer = consume_all();
    assert_eq!(tokenizer.flex_all("".chars(), None), Ok(vec![]));
    /* Not even the end-of-input failure fires. */
    assert_eq!(assignments().flex_str("", Some(Ini::ParamName)).count(), 0);
  }

  #[test]
  fn fail_is_positioned() {
    let mut builder = Tokenizer::builder();
    builder
      .register(Ini::Free)
      .when(';')
      .fail("bad")
      .otherwise()
      .consume()
      .on_end_frame();
    let tokenizer = builder.build().unwrap();
    assert_eq!(
      tokenizer.flex_all("a;b".chars(), None),
      Err(TokenizeError::Syntax(SyntaxError::new(
        TextPos {
          index: 1,
          line: 1,
          column: 1
        },
        "bad"
      )))
    );
  }

  #[test]
  fn fail_at_end_is_positioned() {
    let err = assignments().flex_all("ab\ncd".chars(), None).unwrap_err();
    assert_eq!(
      err,
      TokenizeError::Syntax(SyntaxError::new(
        TextPos {
          index: 2,
          line: 1,
          column: 2
        },
        "forbidden symbol in param name"
      ))
    );
    let err = assignments().flex_all("\n\nkey".chars(), None).unwrap_err();
    assert_eq!(
      err,
      TokenizeError::Syntax(SyntaxError::new(
        TextPos {
          index: 5,
          line: 3,
          column: 3
        },
        "expected '='"
      ))
    );
  }

  #[test]
  fn tokens_framed_before_a_failure_are_kept() {
    let mut builder = Tokenizer::builder();
    builder
      .register(Ini::Free)
      .when('!')
      .frame_and_transition(Ini::ParamName)
      .fail("stop")
      .otherwise()
      .consume();
    builder.register(Ini::ParamName);
    let tokenizer = builder.build().unwrap();
    let mut tokens = tokenizer.flex_str("ab!cd", None);
    let first = tokens.next().unwrap().unwrap();
    assert_eq!((first.kind, first.text.as_str()), (Ini::Free, "ab"));
    assert!(matches!(
      tokens.next(),
      Some(Err(TokenizeError::Syntax(SyntaxError { ref message, .. }))) if message == "stop"
    ));
    assert!(tokens.next().is_none());
  }

  #[test]
  fn drop_discards_pending_text() {
    let mut builder = Tokenizer::builder();
    builder
      .register(Ini::Free)
      .when(',')
      .frame_and_transition(Ini::Free)
      .skip()
      .otherwise()
      .consume()
      .on_end_drop();
    let tokenizer = builder.build().unwrap();
    let texts: Vec<String> = tokenizer
      .flex_all("x,y,dangling".chars(), None)
      .unwrap()
      .into_iter()
      .map(|token| token.text)
      .collect();
    assert_eq!(texts, vec!["x", "y"]);
  }

  #[test]
  fn patterns_and_classes_share_a_branch() {
    let mut builder = Tokenizer::builder();
    builder
      .register(Ini::Free)
      .when_any([
        CharPredicate::from(CharPattern::new("[a-f]").unwrap()),
        CharClass::Digit.into(),
      ])
      .consume()
      .otherwise()
      .frame_and_transition(Ini::Free)
      .skip()
      .on_end_frame();
    let tokenizer = builder.build().unwrap();
    let texts: Vec<String> = tokenizer
      .flex_all("c0ffee g42".chars(), None)
      .unwrap()
      .into_iter()
      .map(|token| token.text)
      .collect();
    assert_eq!(texts, vec!["c0ffee", "", "42"]);
  }

  #[test]
  fn unmatched_character_is_a_grammar_error() {
    let mut builder = Tokenizer::builder();
    builder
      .register(Ini::Free)
      .when(CharClass::Digit)
      .consume()
      .on_end_frame();
    let tokenizer = builder.build().unwrap();
    assert_eq!(
      tokenizer.flex_all("12x".chars(), None),
      Err(TokenizeError::Grammar(GrammarError::UnhandledItem {
        state: "Free".to_string()
      }))
    );
  }

  #[test]
  fn one_character_per_tick() {
    let mut builder = Tokenizer::builder();
    builder
      .register(Ini::Free)
      .otherwise()
      .consume()
      .consume()
      .on_end_frame();
    assert_eq!(
      builder.build().unwrap_err(),
      GrammarError::ExcessConsumption {
        state: "Free".to_string(),
        steps: 2,
      }
    );

    let mut builder = Tokenizer::builder();
    builder
      .register(Ini::Free)
      .when(' ')
      .skip()
      .frame_and_transition(Ini::Free)
      .consume()
      .otherwise()
      .consume()
      .on_end_frame();
    assert_eq!(
      builder.build().unwrap_err(),
      GrammarError::ExcessConsumption {
        state: "Free".to_string(),
        steps: 2,
      }
    );

    let mut builder = Tokenizer::builder();
    builder
      .register(Ini::Free)
      .when(' ')
      .skip()
      .otherwise()
      .consume()
      .noop()
      .on_end_frame();
    let tokenizer = builder.build().unwrap();
    let ticks = tokenizer
      .flexer()
      .process("abcd".chars(), TextContext::default(), None)
      .count();
    /* One tick per character, then one for the end of input. */
    assert_eq!(ticks, 5);
  }

  #[test]
  fn first_token_reads_a_bounded_prefix() {
    let mut builder = Tokenizer::builder();
    builder
      .register(Ini::Free)
      .when(' ')
      .skip()
      .otherwise()
      .transition(Ini::ParamName)
      .on_end_drop();
    builder
      .register(Ini::ParamName)
      .when(' ')
      .frame_and_transition(Ini::Free)
      .otherwise()
      .consume()
      .on_end_frame();
    let tokenizer = builder.build().unwrap();

    let mut pulled = 0;
    let endless = "ab cd ".chars().cycle().inspect(|_| {
      pulled += 1;
      assert!(pulled <= 8, "tokenizer read past the first token");
    });
    let mut tokens = tokenizer.flex(endless, None);
    let first = tokens.next().unwrap().unwrap();
    assert_eq!(first.text, "ab");
    assert_eq!(tokens.position().index, 2);
  }

  proptest! {
    #[test]
    fn positions_track_lines(text in "[a-z\n ]{1,64}") {
      let tokens = consume_all().flex_all(text.chars(), None).unwrap();
      prop_assert_eq!(tokens.len(), 1);
      let end = tokens[0].end_position;
      let last_line = text.rsplit('\n').next().unwrap();
      prop_assert_eq!(&tokens[0].text, &text);
      prop_assert_eq!(end.index, text.chars().count());
      prop_assert_eq!(end.line, 1 + text.matches('\n').count());
      prop_assert_eq!(end.column, last_line.chars().count());
    }
  }
}

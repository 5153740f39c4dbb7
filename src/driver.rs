/*
 * Description: The single-pass cooperative loop executing rule tables.
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

//! The single-pass cooperative loop executing rule tables.

use crate::{
  action::{Action, Transitions},
  classify::Classifier,
  config::Config,
  cursor::{Cursor, Lookahead},
  error::GrammarError,
  rules::{Rule, RuleTable},
  state::{describe, StateTag},
};

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use core::hash::Hash;

fn defect(err: GrammarError) -> GrammarError {
  warn!(%err, "grammar configuration defect");
  err
}

/// Registers one [`RuleTable`] per state, then validates them all at once.
pub struct FlexerBuilder<S, C, A> {
  tables: IndexMap<S, RuleTable<C, A>>,
  defects: Vec<GrammarError>,
  config: Config,
}

impl<S, C, A> Default for FlexerBuilder<S, C, A> {
  fn default() -> Self {
    Self {
      tables: IndexMap::new(),
      defects: Vec::new(),
      config: Config::default(),
    }
  }
}

impl<S, C, A> FlexerBuilder<S, C, A>
where
  S: StateTag,
  C: Hash + Eq,
{
  /// Create a builder with no states registered.
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace the engine settings.
  pub fn configure(&mut self, config: Config) -> &mut Self {
    self.config = config;
    self
  }

  /// Start registering the branches of `state`.
  pub fn register(&mut self, state: S) -> Rule<'_, S, C, A> {
    let Self {
      tables, defects, ..
    } = self;
    if tables.contains_key(&state) {
      defects.push(GrammarError::DuplicateState {
        state: describe(&state),
      });
    }
    let table = tables.entry(state).or_default();
    Rule::new(state, table, defects)
  }

  /// Check every table and freeze them into a [`Flexer`].
  ///
  /// Reports the first defect recorded during registration, the first transition into a state
  /// that was never registered, or the first action list which would consume more than one
  /// element per tick.
  pub fn build(self) -> Result<Flexer<S, C, A>, GrammarError>
  where
    A: Transitions<S>,
  {
    let Self {
      tables,
      defects,
      config,
    } = self;
    if let Some(err) = defects.into_iter().next() {
      return Err(defect(err));
    }
    for (state, table) in tables.iter() {
      let unknown = table
        .actions()
        .filter_map(|action| action.target())
        .find(|target| !tables.contains_key(target));
      if let Some(target) = unknown {
        return Err(defect(GrammarError::UnknownTarget {
          state: describe(state),
          target: describe(&target),
        }));
      }
      let greedy = table
        .action_lists()
        .map(|list| list.iter().filter(|action| action.consumes()).count())
        .find(|&steps| steps > 1);
      if let Some(steps) = greedy {
        return Err(defect(GrammarError::ExcessConsumption {
          state: describe(state),
          steps,
        }));
      }
    }
    debug!(states = tables.len(), ?config, "built flexer");
    Ok(Flexer { tables, config })
  }
}

/// Immutable rule tables, reusable across any number of invocations.
#[derive(Debug)]
pub struct Flexer<S, C, A> {
  tables: IndexMap<S, RuleTable<C, A>>,
  config: Config,
}

impl<S, C, A> Flexer<S, C, A>
where
  S: StateTag,
{
  /// The table registered for `state`.
  pub fn table(&self, state: &S) -> Option<&RuleTable<C, A>> {
    self.tables.get(state)
  }

  /// The settings this flexer was built with.
  pub fn config(&self) -> Config {
    self.config
  }

  /// Lazily run the automaton over `input`, starting from `init` or the default state.
  ///
  /// Each element of the returned iterator is the state after one tick. The invocation owns
  /// `ctx` until it is recovered with [`Process::into_context`]. An empty input performs no
  /// ticks at all, not even the end-of-input actions.
  pub fn process<I, X>(
    &self,
    input: I,
    ctx: X,
    init: Option<S>,
  ) -> Process<'_, S, C, A, I::IntoIter, X>
  where
    I: IntoIterator,
  {
    let input = Lookahead::new(input.into_iter());
    let finished = input.is_ended();
    if finished {
      debug!("empty input: no ticks will run");
    }
    Process {
      flexer: self,
      input,
      ctx,
      state: init.unwrap_or_default(),
      idle: 0,
      finished,
    }
  }

  /// Run the automaton to completion and return the context.
  pub fn process_all<I, X>(&self, input: I, ctx: X, init: Option<S>) -> Result<X, A::Error>
  where
    I: IntoIterator,
    C: Classifier<I::Item>,
    A: Action<S, I::Item, X>,
    A::Error: From<GrammarError>,
  {
    let mut process = self.process(input, ctx, init);
    for outcome in process.by_ref() {
      outcome?;
    }
    Ok(process.into_context())
  }
}

/// One invocation of a [`Flexer`], advanced one tick per call to [`Iterator::next`].
///
/// Stops after the end-of-input tick or after the first error. Abandoning it midway is always
/// safe; nothing runs in the background.
pub struct Process<'f, S, C, A, I, X>
where
  I: Iterator,
{
  flexer: &'f Flexer<S, C, A>,
  input: Lookahead<I>,
  ctx: X,
  state: S,
  idle: usize,
  finished: bool,
}

impl<'f, S, C, A, I, X> Process<'f, S, C, A, I, X>
where
  S: StateTag,
  I: Iterator,
{
  /// The state the next tick dispatches on.
  pub fn state(&self) -> S {
    self.state
  }

  /// The input cursor.
  pub fn cursor(&self) -> &Lookahead<I> {
    &self.input
  }

  /// The invocation's context.
  pub fn context(&self) -> &X {
    &self.ctx
  }

  /// The invocation's context, mutably.
  pub fn context_mut(&mut self) -> &mut X {
    &mut self.ctx
  }

  /// End the invocation, recovering its context.
  pub fn into_context(self) -> X {
    self.ctx
  }

  /// Whether no further ticks will run.
  pub fn is_finished(&self) -> bool {
    self.finished
  }
}

impl<'f, S, C, A, I, X> Process<'f, S, C, A, I, X>
where
  S: StateTag,
  C: Classifier<I::Item>,
  A: Action<S, I::Item, X>,
  A::Error: From<GrammarError>,
  I: Iterator,
{
  fn tick(&mut self) -> Result<S, A::Error> {
    let flexer = self.flexer;
    let state = self.state;
    let table = flexer.tables.get(&state).ok_or_else(|| {
      defect(GrammarError::UnregisteredState {
        state: describe(&state),
      })
    })?;
    let actions = match self.input.current() {
      Some(item) => table.lookup(item).ok_or_else(|| {
        defect(GrammarError::UnhandledItem {
          state: describe(&state),
        })
      })?,
      None => {
        debug!(?state, consumed = self.input.consumed(), "end of input");
        self.finished = true;
        table.on_end()
      },
    };

    let before = self.input.consumed();
    let mut next = state;
    for action in actions {
      next = action.act(next, &mut self.input, &mut self.ctx)?;
    }
    trace!(from = ?state, to = ?next, "tick");
    self.state = next;

    if self.finished {
      return Ok(next);
    }
    if self.input.consumed() == before {
      self.idle += 1;
    } else {
      self.idle = 0;
    }
    match flexer.config.stall_limit {
      Some(limit) if self.idle > limit => Err(
        defect(GrammarError::Stalled {
          state: describe(&next),
          ticks: self.idle,
        })
        .into(),
      ),
      _ => Ok(next),
    }
  }
}

impl<'f, S, C, A, I, X> Iterator for Process<'f, S, C, A, I, X>
where
  S: StateTag,
  C: Classifier<I::Item>,
  A: Action<S, I::Item, X>,
  A::Error: From<GrammarError>,
  I: Iterator,
{
  type Item = Result<S, A::Error>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }
    let outcome = self.tick();
    if outcome.is_err() {
      self.finished = true;
    }
    Some(outcome)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    action::Step,
    classify::Equals,
    error::{Error, Failure},
  };

  use pretty_assertions::assert_eq;

  #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
  enum Mode {
    #[default]
    Start,
    Left,
    Right,
  }

  #[derive(Clone, Debug, PartialEq, Eq, Hash)]
  enum Is {
    Char(char),
    Vowel,
  }

  impl Classifier<char> for Is {
    fn contains(&self, item: &char) -> bool {
      match self {
        Self::Char(c) => c == item,
        Self::Vowel => "aeiou".contains(*item),
      }
    }
  }

  /// Records every consumed char into the context.
  #[derive(Clone, Debug)]
  enum Act {
    Step(Step<Mode>),
    Record,
  }

  impl Transitions<Mode> for Act {
    fn target(&self) -> Option<Mode> {
      match self {
        Self::Step(step) => step.target(),
        Self::Record => None,
      }
    }

    fn consumes(&self) -> bool {
      match self {
        Self::Step(step) => step.consumes(),
        Self::Record => true,
      }
    }
  }

  impl Action<Mode, char, Vec<char>> for Act {
    type Error = Error;

    fn act(
      &self,
      state: Mode,
      input: &mut dyn Cursor<char>,
      ctx: &mut Vec<char>,
    ) -> Result<Mode, Error> {
      match self {
        Self::Step(step) => Ok(step.apply(state, input)?),
        Self::Record => {
          ctx.extend(input.advance());
          Ok(state)
        },
      }
    }
  }

  type Builder = FlexerBuilder<Mode, Is, Act>;

  fn ordered() -> Flexer<Mode, Is, Act> {
    let mut builder = Builder::new();
    for mode in [Mode::Start, Mode::Left, Mode::Right] {
      builder
        .register(mode)
        .when(Is::Char('a'))
        .then(Act::Record)
        .then(Act::Step(Step::Goto(Mode::Left)))
        .when(Is::Vowel)
        .then(Act::Record)
        .then(Act::Step(Step::Goto(Mode::Right)))
        .otherwise()
        .then(Act::Record)
        .on_end(Act::Step(Step::Noop));
    }
    builder.build().unwrap()
  }

  #[test]
  fn first_match_wins() {
    let flexer = ordered();
    let states: Vec<Mode> = flexer
      .process("aex".chars(), Vec::new(), None)
      .collect::<Result<_, _>>()
      .unwrap();
    /* One state per char, then one for the end of input. */
    assert_eq!(
      states,
      vec![Mode::Left, Mode::Right, Mode::Right, Mode::Right]
    );
  }

  #[test]
  fn steps_thread_state_within_a_tick() {
    let mut builder = Builder::new();
    builder
      .register(Mode::Start)
      .otherwise()
      .then(Act::Step(Step::Goto(Mode::Left)))
      .then(Act::Step(Step::Goto(Mode::Right)))
      .then(Act::Record);
    builder.register(Mode::Left).otherwise().then(Act::Record);
    builder
      .register(Mode::Right)
      .otherwise()
      .then(Act::Record)
      .on_end(Act::Step(Step::Noop));
    let flexer = builder.build().unwrap();
    let mut process = flexer.process("xy".chars(), Vec::new(), None);
    assert_eq!(process.next(), Some(Ok(Mode::Right)));
    assert_eq!(process.context(), &vec!['x']);
    assert_eq!(process.next(), Some(Ok(Mode::Right)));
    assert_eq!(process.next(), Some(Ok(Mode::Right)));
    assert_eq!(process.next(), None);
    assert_eq!(process.into_context(), vec!['x', 'y']);
  }

  #[test]
  fn process_all_returns_context() {
    let flexer = ordered();
    let recorded = flexer
      .process_all("banana".chars(), Vec::new(), Some(Mode::Right))
      .unwrap();
    assert_eq!(recorded.into_iter().collect::<String>(), "banana");
  }

  #[test]
  fn empty_input_runs_no_ticks() {
    let mut builder = Builder::new();
    builder
      .register(Mode::Start)
      .otherwise()
      .then(Act::Record)
      .on_end(Act::Step(Step::Fail("end reached".to_string())));
    let flexer = builder.build().unwrap();
    let mut process = flexer.process("".chars(), Vec::new(), None);
    assert!(process.is_finished());
    assert_eq!(process.next(), None);
    assert!(flexer.process_all("".chars(), Vec::new(), None).is_ok());
    assert_eq!(
      flexer.process_all("q".chars(), Vec::new(), None),
      Err(Error::Failed(Failure::new("end reached")))
    );
  }

  #[test]
  fn unmatched_item_is_a_grammar_error() {
    let mut builder = Builder::new();
    builder
      .register(Mode::Start)
      .when(Is::Char('a'))
      .then(Act::Record)
      .on_end(Act::Step(Step::Noop));
    let flexer = builder.build().unwrap();
    let mut process = flexer.process("ab".chars(), Vec::new(), None);
    assert_eq!(process.next(), Some(Ok(Mode::Start)));
    assert_eq!(
      process.next(),
      Some(Err(Error::Grammar(GrammarError::UnhandledItem {
        state: "Start".to_string()
      })))
    );
    assert_eq!(process.next(), None);
    /* The unmatched element was neither consumed nor recorded. */
    assert_eq!(process.cursor().current(), Some(&'b'));
    assert_eq!(process.into_context(), vec!['a']);
  }

  #[test]
  fn unregistered_initial_state() {
    let mut builder = Builder::new();
    builder.register(Mode::Start).otherwise().then(Act::Record);
    let flexer = builder.build().unwrap();
    assert_eq!(
      flexer.process_all("a".chars(), Vec::new(), Some(Mode::Left)),
      Err(Error::Grammar(GrammarError::UnregisteredState {
        state: "Left".to_string()
      }))
    );
  }

  #[test]
  fn build_rejects_defects() {
    let mut builder = Builder::new();
    builder
      .register(Mode::Start)
      .when(Is::Vowel)
      .then(Act::Record)
      .when(Is::Vowel);
    assert_eq!(
      builder.build().unwrap_err(),
      GrammarError::DuplicateClassifier {
        state: "Start".to_string()
      }
    );

    let mut builder = Builder::new();
    builder.register(Mode::Start).otherwise().then(Act::Record);
    builder.register(Mode::Start);
    assert_eq!(
      builder.build().unwrap_err(),
      GrammarError::DuplicateState {
        state: "Start".to_string()
      }
    );

    let mut builder = Builder::new();
    builder
      .register(Mode::Start)
      .otherwise()
      .then(Act::Step(Step::Goto(Mode::Right)));
    assert_eq!(
      builder.build().unwrap_err(),
      GrammarError::UnknownTarget {
        state: "Start".to_string(),
        target: "Right".to_string(),
      }
    );

    let mut builder = Builder::new();
    builder
      .register(Mode::Start)
      .when(Is::Vowel)
      .then(Act::Record)
      .otherwise()
      .then(Act::Record)
      .then(Act::Step(Step::Next));
    assert_eq!(
      builder.build().unwrap_err(),
      GrammarError::ExcessConsumption {
        state: "Start".to_string(),
        steps: 2,
      }
    );
  }

  #[test]
  fn stall_limit() {
    let mut builder = Builder::new();
    builder.configure(Config::default().with_stall_limit(3));
    builder
      .register(Mode::Start)
      .otherwise()
      .then(Act::Step(Step::Goto(Mode::Left)));
    builder
      .register(Mode::Left)
      .otherwise()
      .then(Act::Step(Step::Goto(Mode::Start)));
    let flexer = builder.build().unwrap();
    let outcomes: Vec<_> = flexer.process("a".chars(), Vec::new(), None).collect();
    assert_eq!(outcomes.len(), 4);
    assert_eq!(
      outcomes.last(),
      Some(&Err(Error::Grammar(GrammarError::Stalled {
        state: "Start".to_string(),
        ticks: 4,
      })))
    );
  }

  #[test]
  fn reading_first_states_pulls_bounded_input() {
    let flexer = ordered();
    let mut pulled = 0;
    let guarded = core::iter::repeat('z').inspect(|_| {
      pulled += 1;
      assert!(pulled <= 10, "pulled past the bound");
    });
    let first: Vec<Mode> = flexer
      .process(guarded, Vec::new(), None)
      .take(3)
      .collect::<Result<_, _>>()
      .unwrap();
    assert_eq!(first, vec![Mode::Start; 3]);
  }

  #[test]
  fn bare_steps_form_a_recognizer() {
    let mut builder = FlexerBuilder::<Mode, Equals<char>, Step<Mode>>::new();
    builder
      .register(Mode::Start)
      .when(Equals('<'))
      .then(Step::Next)
      .then(Step::Goto(Mode::Left))
      .otherwise()
      .then(Step::Fail("expected '<'".to_string()));
    builder
      .register(Mode::Left)
      .when(Equals('>'))
      .then(Step::Next)
      .then(Step::Goto(Mode::Start))
      .otherwise()
      .then(Step::Next)
      .on_end(Step::Fail("unclosed".to_string()));
    let flexer = builder.build().unwrap();
    assert_eq!(flexer.process_all("<ab><c>".chars(), (), None), Ok(()));
    assert_eq!(
      flexer.process_all("<ab".chars(), (), None),
      Err(Error::Failed(Failure::new("unclosed")))
    );
    assert_eq!(
      flexer.process_all("x".chars(), (), None),
      Err(Error::Failed(Failure::new("expected '<'")))
    );
  }
}

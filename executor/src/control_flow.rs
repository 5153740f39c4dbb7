/*
 * Description: Hand lazily flexed values to async consumers.
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

//! Use [`streams`](crate::streams) for control flow.

use crate::streams::{channels::*, traits::*, Closed};

use flexer::messaging::{Readable, Writable};

use async_mutex::Mutex;
use async_trait::async_trait;
use tracing::{debug, trace};

/// One element of a stream which announces its own end.
///
/// Note that `Y` may be a [`Result`]!
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit<Y> {
  /// Another value.
  Yielded(Y),
  /// No more values will follow.
  Completed,
}

impl<Y> Emit<Y> {
  /// Map a function over any yielded value, or propagate completeness.
  ///
  ///```
  /// use flexer_executor::control_flow::Emit;
  ///
  /// let f = |x| x + 1;
  /// assert!(Emit::Yielded(0).map(f) == Emit::Yielded(1));
  /// assert!(Emit::Completed.map(f) == Emit::Completed);
  ///```
  pub fn map<T, F>(self, f: F) -> Emit<T>
  where
    F: FnOnce(Y) -> T,
  {
    match self {
      Self::Yielded(val) => Emit::Yielded(f(val)),
      Self::Completed => Emit::Completed,
    }
  }

  fn from_next(next: Option<Y>) -> Self {
    match next {
      Some(val) => Self::Yielded(val),
      None => Self::Completed,
    }
  }
}

/// Interface to apply folds over streams.
#[async_trait]
pub trait Collector: Writable {
  /// Fold over the values of the stream until it completes.
  async fn fold<Acc, F>(self, init: Acc, f: F) -> Acc
  where
    Acc: Send,
    F: Fn(Acc, Self::WriteChunk) -> Acc + Send + Sync;
}

/// Collect values written by another task.
///
///```
/// # fn main() {
/// # futures::executor::block_on(async {
/// use flexer_executor::{streams::traits::*, control_flow::*};
///
/// let (stream, drain) = Drain::<u8>::new();
/// let sum = drain.fold(0, |acc, cur| acc + cur);
/// let write = async {
///   stream.write_one(Emit::Yielded(3)).await.unwrap();
///   stream.write_one(Emit::Yielded(4)).await.unwrap();
///   stream.write_one(Emit::Completed).await.unwrap();
/// };
/// let (sum, ()) = futures::join!(sum, write);
/// assert!(sum == 7);
/// # })
/// # }
///```
#[derive(Debug)]
pub struct Drain<T> {
  receiver: ReadableChannel<Emit<T>>,
}

impl<T> Drain<T> {
  /// Create a new (`writable_stream`, `drain`) pair over a single-slot channel.
  pub fn new() -> (WritableChannel<Emit<T>>, Self) {
    Self::buffered(BufferConfig::default())
  }

  /// Create a new (`writable_stream`, `drain`) pair with the given buffering.
  pub fn buffered(config: BufferConfig) -> (WritableChannel<Emit<T>>, Self) {
    let (sender, receiver) = DuplexChannel::buffered(config).split_ends();
    (sender, Self { receiver })
  }
}

impl<T> Writable for Drain<T>
where
  T: Send,
{
  type WriteChunk = T;
}

#[async_trait]
impl<T> Collector for Drain<T>
where
  T: Send,
{
  /// A stream whose writers all went away is treated as completed.
  async fn fold<Acc, F>(self, init: Acc, f: F) -> Acc
  where
    Acc: Send,
    F: Fn(Acc, Self::WriteChunk) -> Acc + Send + Sync,
  {
    let mut cur = init;
    loop {
      match self.receiver.read_one().await {
        Ok(Emit::Yielded(chunk)) => {
          cur = f(cur, chunk);
        },
        Ok(Emit::Completed) | Err(Closed) => {
          return cur;
        },
      }
    }
  }
}

/// Read a lazy flex sequence one element at a time.
///
/// Every read advances the wrapped iterator by exactly one element, so wrapping a lazy
/// `Tokenizer::flex` sequence consumes only as much input as the consumer has asked for.
///
///```
/// use flexer_executor::{streams::traits::*, control_flow::{Emit, Feed}};
///
/// let feed = Feed::new([3, 4].into_iter());
/// assert!(feed.peek() == Some(Emit::Yielded(3)));
/// assert!(feed.peek() == Some(Emit::Yielded(4)));
/// assert!(feed.peek() == Some(Emit::Completed));
///```
#[derive(Debug)]
pub struct Feed<I> {
  elements: Mutex<I>,
}

impl<I> Feed<I>
where
  I: Iterator + Send,
  I::Item: Send,
{
  /// Wrap the iterator `elements`.
  pub fn new(elements: I) -> Self {
    Self {
      elements: Mutex::new(elements),
    }
  }

  /// Forward every element into `out`, then [`Emit::Completed`].
  ///
  /// The flex sequences of this workspace end after their first error, so pumping one stops
  /// there too. Returns how many elements were forwarded, or [`Closed`] if `out` was dropped
  /// first.
  pub async fn pump<W>(self, out: &W) -> Result<usize, Closed>
  where
    W: WritableStream<WriteChunk = Emit<I::Item>>,
  {
    debug!("pumping");
    let mut forwarded = 0;
    loop {
      match self.read_one().await? {
        Emit::Yielded(val) => {
          trace!(forwarded, "forwarding");
          out.write_one(Emit::Yielded(val)).await?;
          forwarded += 1;
        },
        Emit::Completed => {
          debug!(forwarded, "pumped to completion");
          out.write_one(Emit::Completed).await?;
          return Ok(forwarded);
        },
      }
    }
  }
}

impl<I> Readable for Feed<I>
where
  I: Iterator,
{
  type ReadChunk = Emit<I::Item>;
}

impl<I> Peekable for Feed<I>
where
  I: Iterator + Send,
  I::Item: Send,
{
  fn peek(&self) -> Option<Self::ReadChunk> {
    self
      .elements
      .try_lock()
      .map(|mut elements| Emit::from_next(elements.next()))
  }
}

#[async_trait]
impl<I> ReadableStream for Feed<I>
where
  I: Iterator + Send,
  I::Item: Send,
{
  async fn read_one(&self) -> Result<Self::ReadChunk, Closed> {
    let mut elements = self.elements.lock().await;
    Ok(Emit::from_next(elements.next()))
  }
}

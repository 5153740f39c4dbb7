/*
 * Description: Channel-backed streams with back-pressure.
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

//! Variants of stream-like objects.

use flexer::messaging::{Readable, Writable};

use async_trait::async_trait;
use displaydoc::Display;
use thiserror::Error;

/// the other end of the stream was dropped
#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub struct Closed;

/// Stream interfaces.
pub mod traits {
  use super::*;

  /// A synchronous readable interface which never waits.
  pub trait Peekable: Readable + Send + Sync {
    /// Pick off the top element, if available without contention.
    fn peek(&self) -> Option<Self::ReadChunk>;
  }

  /// Asynchronously generate values.
  #[async_trait]
  pub trait ReadableStream: Readable + Send + Sync {
    /// Wait to pick off the top element.
    async fn read_one(&self) -> Result<Self::ReadChunk, Closed>;
  }

  /// Asynchronously receive values.
  #[async_trait]
  pub trait WritableStream: Writable + Send + Sync {
    /// Wait until there is room for `chunk`.
    async fn write_one(&self, chunk: Self::WriteChunk) -> Result<(), Closed>;
  }
}

/// Implementations of stream traits using [`async_channel`].
pub mod channels {
  use super::{traits::*, *};

  mod readable {
    use super::*;

    /// The receiving end of a channel.
    #[derive(Debug, Clone)]
    pub struct ReadableChannel<T> {
      receiver: async_channel::Receiver<T>,
    }

    impl<T> ReadableChannel<T> {
      /// Wrap `receiver`.
      pub fn new(receiver: async_channel::Receiver<T>) -> Self {
        Self { receiver }
      }
    }

    impl<T> Readable for ReadableChannel<T>
    where
      T: Send,
    {
      type ReadChunk = T;
    }

    impl<T> Peekable for ReadableChannel<T>
    where
      T: Send,
    {
      fn peek(&self) -> Option<Self::ReadChunk> {
        self.receiver.try_recv().ok()
      }
    }

    #[async_trait]
    impl<T> ReadableStream for ReadableChannel<T>
    where
      T: Send,
    {
      async fn read_one(&self) -> Result<Self::ReadChunk, Closed> {
        self.receiver.recv().await.map_err(|_| Closed)
      }
    }
  }
  pub use readable::ReadableChannel;

  mod writable {
    use super::*;

    /// The sending end of a channel.
    #[derive(Debug, Clone)]
    pub struct WritableChannel<T> {
      sender: async_channel::Sender<T>,
    }

    impl<T> WritableChannel<T> {
      /// Wrap `sender`.
      pub fn new(sender: async_channel::Sender<T>) -> Self {
        Self { sender }
      }
    }

    impl<T> Writable for WritableChannel<T>
    where
      T: Send,
    {
      type WriteChunk = T;
    }

    #[async_trait]
    impl<T> WritableStream for WritableChannel<T>
    where
      T: Send,
    {
      async fn write_one(&self, chunk: Self::WriteChunk) -> Result<(), Closed> {
        self.sender.send(chunk).await.map_err(|_| Closed)
      }
    }
  }
  pub use writable::WritableChannel;

  mod duplex {
    use super::*;

    /// Types of channel inside a [`DuplexChannel`].
    #[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
    #[ignore_extra_doc_attributes]
    pub enum BufferConfig {
      /// <finite buffer: {0}>
      ///
      /// Choose a [bounded](async_channel::bounded) channel. Writers wait once it holds this many
      /// chunks.
      Finite(usize),
      /// <infinite buffer>
      ///
      /// Choose an [unbounded](async_channel::unbounded) channel.
      Infinite,
    }

    /// A single slot, so a producer runs at most one chunk ahead of its consumer.
    impl Default for BufferConfig {
      fn default() -> Self {
        BufferConfig::Finite(1)
      }
    }

    /// Both ends of one channel.
    ///
    ///```
    /// # fn main() {
    /// # futures::executor::block_on(async {
    /// use flexer_executor::streams::{traits::*, channels::*, Closed};
    ///
    /// let unbounded = DuplexChannel::<u8>::buffered(BufferConfig::Infinite);
    /// unbounded.write_one(5).await.unwrap();
    /// unbounded.write_one(6).await.unwrap();
    /// assert!(Ok(5) == unbounded.read_one().await);
    /// assert!(Some(6) == unbounded.peek());
    /// assert!(unbounded.peek().is_none());
    ///
    /// let (sender, receiver) = DuplexChannel::<u8>::default().split_ends();
    /// sender.write_one(7).await.unwrap();
    /// assert!(Ok(7) == receiver.read_one().await);
    /// drop(sender);
    /// assert!(Err(Closed) == receiver.read_one().await);
    /// # })
    /// # }
    ///```
    #[derive(Debug, Clone)]
    pub struct DuplexChannel<T> {
      sender: WritableChannel<T>,
      receiver: ReadableChannel<T>,
    }

    impl<T> DuplexChannel<T> {
      /// Generate a duplex channel with the given buffering.
      pub fn buffered(config: BufferConfig) -> Self {
        let (sender, receiver) = match config {
          BufferConfig::Finite(size) => async_channel::bounded(size),
          BufferConfig::Infinite => async_channel::unbounded(),
        };
        Self {
          sender: WritableChannel::new(sender),
          receiver: ReadableChannel::new(receiver),
        }
      }

      /// Extract the write and read ends.
      pub fn split_ends(self) -> (WritableChannel<T>, ReadableChannel<T>) {
        let Self { sender, receiver } = self;
        (sender, receiver)
      }
    }

    impl<T> Default for DuplexChannel<T> {
      fn default() -> Self {
        Self::buffered(BufferConfig::default())
      }
    }

    impl<T> Readable for DuplexChannel<T>
    where
      T: Send,
    {
      type ReadChunk = T;
    }

    impl<T> Peekable for DuplexChannel<T>
    where
      T: Send,
    {
      fn peek(&self) -> Option<Self::ReadChunk> {
        let Self { receiver, .. } = self;
        receiver.peek()
      }
    }

    #[async_trait]
    impl<T> ReadableStream for DuplexChannel<T>
    where
      T: Send,
    {
      async fn read_one(&self) -> Result<Self::ReadChunk, Closed> {
        let Self { receiver, .. } = self;
        receiver.read_one().await
      }
    }

    impl<T> Writable for DuplexChannel<T>
    where
      T: Send,
    {
      type WriteChunk = T;
    }

    #[async_trait]
    impl<T> WritableStream for DuplexChannel<T>
    where
      T: Send,
    {
      async fn write_one(&self, chunk: Self::WriteChunk) -> Result<(), Closed> {
        let Self { sender, .. } = self;
        sender.write_one(chunk).await
      }
    }
  }
  pub use duplex::{BufferConfig, DuplexChannel};
}

#[cfg(test)]
mod tests {
  use super::{channels::*, traits::*, *};

  use futures::{executor::block_on, future::FutureExt, join, pin_mut};

  #[test]
  fn default_buffer_holds_one_chunk() {
    assert_eq!(BufferConfig::default(), BufferConfig::Finite(1));
    assert_eq!(BufferConfig::default().to_string(), "<finite buffer: 1>");

    let (sender, receiver) = DuplexChannel::<u8>::default().split_ends();
    assert_eq!(sender.write_one(1).now_or_never(), Some(Ok(())));
    let second = sender.write_one(2);
    pin_mut!(second);
    assert!(second.as_mut().now_or_never().is_none());
    assert_eq!(receiver.peek(), Some(1));
    assert_eq!(second.now_or_never(), Some(Ok(())));
    assert_eq!(receiver.peek(), Some(2));
  }

  #[test]
  fn writes_fail_once_readers_are_gone() {
    let (sender, receiver) = DuplexChannel::<u8>::default().split_ends();
    drop(receiver);
    assert_eq!(block_on(sender.write_one(3)), Err(Closed));
  }

  #[test]
  fn reader_and_writer_interleave() {
    let (sender, receiver) = DuplexChannel::<u32>::default().split_ends();
    let (written, read) = block_on(async {
      join!(
        async {
          for i in 0..10 {
            sender.write_one(i).await?;
          }
          drop(sender);
          Ok::<_, Closed>(())
        },
        async {
          let mut total = 0;
          while let Ok(i) = receiver.read_one().await {
            total += i;
          }
          total
        }
      )
    });
    assert_eq!(written, Ok(()));
    assert_eq!(read, 45);
  }
}

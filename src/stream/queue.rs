// src/stream/queue.rs
//! Bounded producer/consumer queues.
//!
//! Every record stream runs one side on a dedicated thread and the other on
//! the caller, joined by a fixed-capacity channel. A full queue blocks the
//! producer, an empty one blocks the consumer, so peak memory is bounded by
//! the capacity regardless of input size.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::error::{PlaceRankError, Result};

/// Pushes one record into a queue, failing if the consumer has gone away.
///
/// # Errors
/// Returns a `Pipeline` error if the receiving side was dropped.
pub fn emit<T>(tx: &Sender<T>, item: T) -> Result<()> {
    tx.send(item)
        .map_err(|_| PlaceRankError::Pipeline("record queue closed by consumer".into()))
}

/// A thread generating records into a bounded queue.
pub struct Producer<T> {
    receiver: Receiver<T>,
    handle: JoinHandle<Result<()>>,
}

/// Spawns `produce` on a named thread. The queue closes when it returns.
///
/// # Errors
/// Returns error if the thread cannot be spawned.
pub fn spawn_producer<T, F>(name: &str, capacity: usize, produce: F) -> Result<Producer<T>>
where
    T: Send + 'static,
    F: FnOnce(&Sender<T>) -> Result<()> + Send + 'static,
{
    let (tx, rx) = bounded(capacity);
    let handle = thread::Builder::new()
        .name(name.to_string())
        .spawn(move || produce(&tx))
        .map_err(|e| PlaceRankError::Pipeline(format!("cannot spawn {name}: {e}")))?;
    Ok(Producer {
        receiver: rx,
        handle,
    })
}

impl<T> Producer<T> {
    /// Consumes every record in order, then joins the producer.
    ///
    /// A consumer error stops the stream early and takes precedence over
    /// whatever the producer reports afterwards.
    ///
    /// # Errors
    /// Returns the first consumer error, else the producer's error.
    pub fn drain<F>(self, mut consume: F) -> Result<()>
    where
        F: FnMut(T) -> Result<()>,
    {
        let mut failure = None;
        for item in &self.receiver {
            if let Err(e) = consume(item) {
                failure = Some(e);
                break;
            }
        }
        let produced = self.finish();
        match failure {
            Some(e) => Err(e),
            None => produced,
        }
    }

    /// Collects the whole stream.
    ///
    /// # Errors
    /// Returns the producer's error.
    pub fn collect_vec(self, size_hint: usize) -> Result<Vec<T>> {
        let mut items = Vec::with_capacity(size_hint);
        self.drain(|item| {
            items.push(item);
            Ok(())
        })?;
        Ok(items)
    }

    fn finish(self) -> Result<()> {
        drop(self.receiver);
        self.handle
            .join()
            .unwrap_or_else(|_| Err(PlaceRankError::Pipeline("producer thread panicked".into())))
    }
}

/// A thread draining a bounded queue; reports completion on a one-shot channel.
pub struct Sink<T> {
    sender: Sender<T>,
    done: Receiver<Result<()>>,
    handle: JoinHandle<()>,
}

/// Spawns `consume` on a named thread, fed by a queue of `capacity`.
///
/// # Errors
/// Returns error if the thread cannot be spawned.
pub fn spawn_sink<T, F>(name: &str, capacity: usize, consume: F) -> Result<Sink<T>>
where
    T: Send + 'static,
    F: FnOnce(Receiver<T>) -> Result<()> + Send + 'static,
{
    let (tx, rx) = bounded(capacity);
    let (done_tx, done_rx) = bounded(1);
    let handle = thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            let result = consume(rx);
            let _ = done_tx.send(result);
        })
        .map_err(|e| PlaceRankError::Pipeline(format!("cannot spawn {name}: {e}")))?;
    Ok(Sink {
        sender: tx,
        done: done_rx,
        handle,
    })
}

impl<T> Sink<T> {
    /// Queues one record, blocking while the queue is full.
    ///
    /// # Errors
    /// Returns the consumer's error if it stopped early.
    pub fn send(&self, item: T) -> Result<()> {
        if self.sender.send(item).is_ok() {
            return Ok(());
        }
        match self.done.recv() {
            Ok(Err(e)) => Err(e),
            _ => Err(PlaceRankError::Pipeline("record sink stopped early".into())),
        }
    }

    /// Closes the queue and waits for the consumer to drain it.
    ///
    /// # Errors
    /// Returns the consumer's error.
    pub fn close(self) -> Result<()> {
        let Sink {
            sender,
            done,
            handle,
        } = self;
        drop(sender);
        let result = done.recv().unwrap_or_else(|_| {
            Err(PlaceRankError::Pipeline(
                "record sink exited without signalling completion".into(),
            ))
        });
        let _ = handle.join();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn producer_delivers_in_order_through_small_queue() {
        let producer = spawn_producer("numbers", 2, |tx| {
            for i in 0..100 {
                emit(tx, i)?;
            }
            Ok(())
        })
        .unwrap();
        let items = producer.collect_vec(100).unwrap();
        assert_eq!(items, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn producer_error_surfaces_after_drain() {
        let producer = spawn_producer("failing", 4, |tx| {
            emit(tx, 1)?;
            Err(PlaceRankError::Pipeline("boom".into()))
        })
        .unwrap();
        let mut seen = Vec::new();
        let result = producer.drain(|i| {
            seen.push(i);
            Ok(())
        });
        assert_eq!(seen, vec![1]);
        assert!(matches!(result, Err(PlaceRankError::Pipeline(m)) if m == "boom"));
    }

    #[test]
    fn consumer_error_stops_producer() {
        let producer = spawn_producer("endless", 1, |tx| loop {
            emit(tx, 0u8)?;
        })
        .unwrap();
        let result = producer.drain(|_| Err(PlaceRankError::Pipeline("stop".into())));
        assert!(matches!(result, Err(PlaceRankError::Pipeline(m)) if m == "stop"));
    }

    #[test]
    fn sink_signals_completion_after_close() {
        let sink = spawn_sink("sum", 2, |rx: Receiver<u32>| {
            let total: u32 = rx.iter().sum();
            assert_eq!(total, 10);
            Ok(())
        })
        .unwrap();
        for i in 1..=4 {
            sink.send(i).unwrap();
        }
        sink.close().unwrap();
    }
}

// src/stream/records.rs
//! Count-prefixed record files.
//!
//! A file holds a bincode `u64` record count followed by exactly that many
//! records. Each stage can be replayed from its predecessor's file.
//!
//! Reads are bounded by the file size, so a foreign or corrupt file fails
//! with a decode error instead of driving allocation from garbage lengths.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::queue::{emit, spawn_producer, spawn_sink, Producer, Sink};
use crate::error::{PlaceRankError, Result};

/// Records preallocated at most, whatever the count prefix claims.
const PREALLOCATE_LIMIT: u64 = 1 << 16;

/// Bytes taken by the count prefix.
const COUNT_PREFIX_LEN: u64 = 8;

/// Fixed-width little-endian encoding, the layout of `bincode::serialize`.
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

fn open_sized(path: &Path) -> Result<(File, u64)> {
    let file = File::open(path).map_err(|e| PlaceRankError::io(path, e))?;
    let len = file.metadata().map_err(|e| PlaceRankError::io(path, e))?.len();
    Ok((file, len))
}

fn decode_error(path: &Path, index: Option<u64>, err: &bincode::Error) -> PlaceRankError {
    let message = match (index, err.as_ref()) {
        (None, _) => format!("cannot read record count: {err}"),
        (Some(i), bincode::ErrorKind::Io(io)) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
            format!("stream truncated at record {i}")
        }
        (Some(i), bincode::ErrorKind::SizeLimit) => {
            format!("record {i} declares a length beyond the end of the file")
        }
        (Some(i), _) => format!("record {i}: {err}"),
    };
    PlaceRankError::decode(path, message)
}

fn encode_error(path: &Path, err: bincode::Error) -> PlaceRankError {
    match *err {
        bincode::ErrorKind::Io(io) => PlaceRankError::io(path, io),
        other => PlaceRankError::Pipeline(format!("cannot encode record for {}: {other}", path.display())),
    }
}

/// Reads only the count prefix of a record file.
///
/// # Errors
/// Returns error if the file cannot be opened or the prefix is malformed.
pub fn read_count(path: &Path) -> Result<u64> {
    let (file, len) = open_sized(path)?;
    codec()
        .with_limit(len)
        .deserialize_from(BufReader::new(file))
        .map_err(|e| decode_error(path, None, &e))
}

/// Opens a record file and streams its records through a bounded queue.
///
/// Returns the declared count alongside the producer.
///
/// # Errors
/// Returns error if the file cannot be opened or its count prefix is
/// malformed. Per-record decode errors surface when the producer is drained.
pub fn read_records<T>(path: &Path, capacity: usize) -> Result<(u64, Producer<T>)>
where
    T: DeserializeOwned + Send + 'static,
{
    let (file, len) = open_sized(path)?;
    let mut reader = BufReader::new(file);
    let count: u64 = codec()
        .with_limit(len)
        .deserialize_from(&mut reader)
        .map_err(|e| decode_error(path, None, &e))?;
    // Every record encodes to at least one byte.
    let body = len.saturating_sub(COUNT_PREFIX_LEN);
    if count > body {
        return Err(PlaceRankError::decode(
            path,
            format!("count prefix declares {count} records but only {body} bytes follow"),
        ));
    }
    debug!(path = %path.display(), count, "reading record file");

    let owned: PathBuf = path.to_path_buf();
    let producer = spawn_producer("record-reader", capacity, move |tx| {
        for i in 0..count {
            let record: T = codec()
                .with_limit(body)
                .deserialize_from(&mut reader)
                .map_err(|e| decode_error(&owned, Some(i), &e))?;
            emit(tx, record)?;
        }
        Ok(())
    })?;
    Ok((count, producer))
}

/// Reads a whole record file into memory.
///
/// # Errors
/// Returns error on I/O or decode failure.
pub fn read_all<T>(path: &Path, capacity: usize) -> Result<Vec<T>>
where
    T: DeserializeOwned + Send + 'static,
{
    let (count, producer) = read_records(path, capacity)?;
    let hint = usize::try_from(count.min(PREALLOCATE_LIMIT)).unwrap_or(0);
    producer.collect_vec(hint)
}

/// Creates a record file for `count` records and returns the queue feeding
/// its writer thread. Closing the sink fails unless exactly `count` records
/// were sent.
///
/// # Errors
/// Returns error if the file cannot be created.
pub fn write_records<T>(path: &Path, count: u64, capacity: usize) -> Result<Sink<T>>
where
    T: Serialize + Send + 'static,
{
    let file = File::create(path).map_err(|e| PlaceRankError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    codec()
        .serialize_into(&mut writer, &count)
        .map_err(|e| encode_error(path, e))?;

    let owned: PathBuf = path.to_path_buf();
    spawn_sink("record-writer", capacity, move |rx| {
        let mut written = 0u64;
        for record in rx {
            codec()
                .serialize_into(&mut writer, &record)
                .map_err(|e| encode_error(&owned, e))?;
            written += 1;
        }
        writer.flush().map_err(|e| PlaceRankError::io(&owned, e))?;
        if written != count {
            return Err(PlaceRankError::Pipeline(format!(
                "{}: wrote {written} records, declared {count}",
                owned.display()
            )));
        }
        debug!(path = %owned.display(), count, "record file written");
        Ok(())
    })
}

/// Writes records through a bounded queue.
///
/// # Errors
/// Returns error on I/O failure.
pub fn write_all<T, I>(path: &Path, records: I, capacity: usize) -> Result<()>
where
    T: Serialize + Send + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: ExactSizeIterator,
{
    let records = records.into_iter();
    let sink = write_records(path, records.len() as u64, capacity)?;
    for record in records {
        sink.send(record)?;
    }
    sink.close()
}

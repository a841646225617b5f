//! In-memory streams for serializer tests.

use crate::protocol::StreamError;
use crate::stream::{Deadline, ReadableStream, WritableStream};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Records every transport write, optionally failing once `fail_after` writes succeeded.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    writes: Vec<Bytes>,
    fail_after: Option<usize>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_after(writes: usize) -> Self {
        Self { writes: Vec::new(), fail_after: Some(writes) }
    }

    pub(crate) fn writes(&self) -> &[Bytes] {
        &self.writes
    }

    pub(crate) fn concat(&self) -> String {
        let bytes: Vec<u8> = self.writes.iter().flat_map(|b| b.iter().copied()).collect();
        String::from_utf8(bytes).unwrap()
    }
}

#[async_trait]
impl WritableStream for RecordingTransport {
    async fn write(&mut self, data: Bytes) -> Result<(), StreamError> {
        if self.fail_after.is_some_and(|n| self.writes.len() >= n) {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe).into());
        }
        self.writes.push(data);
        Ok(())
    }
}

/// Replays a fixed script of pull results and counts the pulls it served.
///
/// The reader reports closed once the script is exhausted.
#[derive(Debug)]
pub(crate) struct ScriptedReader {
    script: VecDeque<Result<Bytes, StreamError>>,
    pulls: Arc<AtomicUsize>,
    max_bytes_seen: Arc<AtomicUsize>,
}

impl ScriptedReader {
    pub(crate) fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Result<&'static str, &'static str>>,
    {
        let script = script
            .into_iter()
            .map(|item| item.map(|s| Bytes::from_static(s.as_bytes())).map_err(StreamError::upstream))
            .collect();
        Self { script, pulls: Arc::default(), max_bytes_seen: Arc::default() }
    }

    pub(crate) fn pulls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.pulls)
    }

    pub(crate) fn max_bytes_seen(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.max_bytes_seen)
    }
}

#[async_trait]
impl ReadableStream for ScriptedReader {
    async fn read(&mut self, max_bytes: usize, _deadline: Deadline) -> Result<Bytes, StreamError> {
        self.pulls.fetch_add(1, Ordering::SeqCst);
        self.max_bytes_seen.fetch_max(max_bytes, Ordering::SeqCst);
        self.script.pop_front().unwrap_or_else(|| Ok(Bytes::new()))
    }

    fn is_closed(&self) -> bool {
        self.script.is_empty()
    }
}

/// Decodes a chunked payload, panicking on malformed framing.
pub(crate) fn dechunk(mut payload: &str) -> String {
    let mut body = String::new();
    loop {
        let (size, rest) = payload.split_once("\r\n").expect("chunk size line");
        let size = usize::from_str_radix(size, 16).expect("hex chunk size");
        if size == 0 {
            assert_eq!(rest, "\r\n", "terminator must end the payload");
            return body;
        }
        body.push_str(&rest[..size]);
        assert_eq!(&rest[size..size + 2], "\r\n");
        payload = &rest[size + 2..];
    }
}

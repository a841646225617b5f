//! Shared fixtures for the serializer benchmarks.

use async_trait::async_trait;
use bytes::Bytes;
use courier_http::protocol::StreamError;
use courier_http::stream::WritableStream;

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    payload: TestPayload,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, payload: TestPayload) -> Self {
        Self { name, group, payload }
    }

    pub fn small(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Small, payload)
    }

    pub fn normal(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Normal, payload)
    }

    pub fn large(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Large, payload)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn payload(&self) -> &TestPayload {
        &self.payload
    }
}

/// A body of `len` bytes, handed to the serializer in `chunk_size` pieces when streamed.
#[derive(Debug, Copy, Clone)]
pub struct TestPayload {
    len: usize,
    chunk_size: usize,
}

impl TestPayload {
    pub const fn new(len: usize, chunk_size: usize) -> Self {
        Self { len, chunk_size }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bytes(&self) -> Bytes {
        Bytes::from(vec![b'x'; self.len])
    }

    /// The payload split into streaming chunks.
    pub fn chunks(&self) -> Vec<Bytes> {
        let bytes = self.bytes();
        (0..self.len).step_by(self.chunk_size.max(1)).map(|start| bytes.slice(start..(start + self.chunk_size).min(self.len))).collect()
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}

/// An in-memory transport that keeps only the number of bytes written.
#[derive(Debug, Default)]
pub struct CountingTransport {
    written: usize,
}

impl CountingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

#[async_trait]
impl WritableStream for CountingTransport {
    async fn write(&mut self, data: Bytes) -> Result<(), StreamError> {
        self.written += data.len();
        Ok(())
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output capture shared between a reader task and the runner.
//!
//! Each stream gets its own reader task that appends every line as it
//! arrives, so output survives a kill and a chatty process never blocks on
//! a full pipe.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;

/// How much of a stream to keep in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureLimit {
    /// Keep everything.
    #[default]
    Unbounded,
    /// Keep the newest `n` bytes and prefix the result with an overflow marker.
    Bytes(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct Capture {
    inner: Arc<Mutex<Buffer>>,
}

#[derive(Debug)]
struct Buffer {
    bytes: VecDeque<u8>,
    limit: CaptureLimit,
    dropped: u64,
}

impl Capture {
    pub(crate) fn new(limit: CaptureLimit) -> Self {
        Self { inner: Arc::new(Mutex::new(Buffer { bytes: VecDeque::new(), limit, dropped: 0 })) }
    }

    pub(crate) fn push(&self, chunk: &[u8]) {
        let mut buf = self.inner.lock();
        buf.bytes.extend(chunk);
        if let CaptureLimit::Bytes(max) = buf.limit {
            let excess = buf.bytes.len().saturating_sub(max);
            if excess > 0 {
                buf.bytes.drain(..excess);
                buf.dropped += excess as u64;
            }
        }
    }

    /// Everything captured so far, decoded lossily.
    pub(crate) fn snapshot(&self) -> String {
        let buf = self.inner.lock();
        let (front, back) = buf.bytes.as_slices();
        let mut raw = Vec::with_capacity(front.len() + back.len());
        raw.extend_from_slice(front);
        raw.extend_from_slice(back);
        let text = String::from_utf8_lossy(&raw);
        if buf.dropped > 0 {
            format!("[... {} bytes of earlier output dropped ...]\n{text}", buf.dropped)
        } else {
            text.into_owned()
        }
    }

    /// Spawn a task that appends `reader` line by line until EOF or error.
    pub(crate) fn spawn_reader<R>(&self, reader: R, stream: &'static str) -> JoinHandle<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let capture = self.clone();
        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = Vec::with_capacity(1024);
            loop {
                line.clear();
                match reader.read_until(b'\n', &mut line).await {
                    Ok(0) => break,
                    Ok(_) => capture.push(&line),
                    Err(e) => {
                        tracing::debug!(stream, error = %e, "output reader stopped");
                        break;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;

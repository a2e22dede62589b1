// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn unbounded_keeps_everything() {
    let capture = Capture::new(CaptureLimit::Unbounded);
    capture.push(b"line one\n");
    capture.push(b"line two\n");
    assert_eq!(capture.snapshot(), "line one\nline two\n");
}

#[test]
fn bounded_keeps_newest_bytes_with_marker() {
    let capture = Capture::new(CaptureLimit::Bytes(4));
    capture.push(b"abcdef");
    capture.push(b"gh");
    assert_eq!(capture.snapshot(), "[... 4 bytes of earlier output dropped ...]\nefgh");
}

#[test]
fn bounded_under_limit_has_no_marker() {
    let capture = Capture::new(CaptureLimit::Bytes(64));
    capture.push(b"short");
    assert_eq!(capture.snapshot(), "short");
}

#[test]
fn invalid_utf8_is_replaced() {
    let capture = Capture::new(CaptureLimit::Unbounded);
    capture.push(&[b'o', b'k', 0xff]);
    assert_eq!(capture.snapshot(), "ok\u{fffd}");
}

#[tokio::test]
async fn reader_task_drains_until_eof() {
    let capture = Capture::new(CaptureLimit::Unbounded);
    let data: &[u8] = b"first\nsecond\nno newline";
    capture.spawn_reader(data, "stdout").await.unwrap();
    assert_eq!(capture.snapshot(), "first\nsecond\nno newline");
}

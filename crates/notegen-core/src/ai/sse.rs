//! SSE (Server-Sent Events) stream ingest and text accumulator
//!
//! Consumes arbitrary-sized byte chunks from a streaming generation
//! response, decodes `data: {...}` lines terminated by `[DONE]`, and
//! grows a single accumulated-text value, publishing every update to a
//! sink callback.
//!
//! Two buffering layers make the result independent of chunk boundaries:
//! a byte tail carries partial UTF-8 sequences between chunks, and a
//! pending-text buffer carries partial lines. A `data:` line whose JSON
//! payload itself straddled a newline is pushed back and rejoined with
//! the next chunk rather than dropped.

use serde_json::Value;
use tracing::{debug, warn};

/// Outcome of processing one complete line
enum LineOutcome {
    /// Line fully handled (or ignorable) - consume it
    Consumed,
    /// `data:` payload did not parse - rejoin with upcoming bytes
    Incomplete,
}

/// Stateful decoder for one generation stream.
///
/// Owns the accumulated text for exactly one request; create a fresh
/// accumulator per request.
pub struct SseAccumulator {
    /// Undecoded bytes from a UTF-8 sequence split across chunks
    byte_tail: Vec<u8>,
    /// Decoded text not yet consumed as complete lines
    pending: String,
    /// Everything extracted so far (append-only)
    accumulated: String,
    /// Set once the `[DONE]` sentinel has been seen
    done: bool,
}

impl Default for SseAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SseAccumulator {
    pub fn new() -> Self {
        Self {
            byte_tail: Vec::new(),
            pending: String::new(),
            accumulated: String::new(),
            done: false,
        }
    }

    /// Whether the `[DONE]` sentinel has been received.
    ///
    /// Once set, further chunks are ignored (the transport should still be
    /// drained by the caller to avoid a stalled connection).
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Text accumulated so far.
    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    /// Consume the accumulator, returning the final text.
    pub fn into_text(self) -> String {
        self.accumulated
    }

    /// Feed one chunk of bytes. The sink is invoked with the full
    /// accumulated text after every extracted delta.
    pub fn process_chunk(&mut self, chunk: &[u8], sink: &mut dyn FnMut(&str)) {
        if self.done {
            return;
        }
        debug!("SSE chunk: {} bytes", chunk.len());
        self.decode_bytes(chunk);
        self.drain_lines(sink);
    }

    /// Final pass after the transport has ended: flush a trailing delta
    /// that had no terminating newline.
    pub fn finish(&mut self, sink: &mut dyn FnMut(&str)) {
        if !self.byte_tail.is_empty() {
            warn!(
                "discarding {} bytes of incomplete UTF-8 at end of stream",
                self.byte_tail.len()
            );
            self.byte_tail.clear();
        }
        if !self.done {
            self.drain_lines(sink);
        }
        if self.done {
            self.pending.clear();
            return;
        }
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            let trimmed = line.trim_end_matches('\r');
            if let LineOutcome::Incomplete = self.handle_line(trimmed, sink) {
                warn!("unparseable trailing SSE line dropped: {} chars", trimmed.len());
            }
        }
    }

    /// Decode as much of `byte_tail + chunk` as is valid UTF-8, keeping any
    /// trailing partial sequence for the next chunk. Truly invalid bytes
    /// are replaced rather than aborting the stream.
    fn decode_bytes(&mut self, chunk: &[u8]) {
        let mut bytes = std::mem::take(&mut self.byte_tail);
        bytes.extend_from_slice(chunk);

        let mut offset = 0;
        while offset < bytes.len() {
            match std::str::from_utf8(&bytes[offset..]) {
                Ok(text) => {
                    self.pending.push_str(text);
                    offset = bytes.len();
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    if valid > 0 {
                        // Safety: just validated by from_utf8
                        self.pending
                            .push_str(std::str::from_utf8(&bytes[offset..offset + valid]).unwrap());
                        offset += valid;
                    }
                    match err.error_len() {
                        Some(bad) => {
                            self.pending.push('\u{FFFD}');
                            offset += bad;
                        }
                        None => {
                            // Incomplete multi-byte sequence at the end
                            self.byte_tail = bytes[offset..].to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Extract and process complete lines from the pending buffer.
    fn drain_lines(&mut self, sink: &mut dyn FnMut(&str)) {
        while !self.done {
            let Some(newline) = self.pending.find('\n') else {
                break;
            };
            let line: String = self.pending[..newline].trim_end_matches('\r').to_string();
            match self.handle_line(&line, sink) {
                LineOutcome::Consumed => {
                    self.pending.drain(..=newline);
                }
                LineOutcome::Incomplete => {
                    // The payload was split despite newline framing. Remove
                    // the newline (and a stray \r) so the next chunk
                    // concatenates directly onto this line, then wait for
                    // more data before retrying the batch.
                    let start = if newline > 0 && self.pending.as_bytes()[newline - 1] == b'\r' {
                        newline - 1
                    } else {
                        newline
                    };
                    self.pending.replace_range(start..=newline, "");
                    break;
                }
            }
        }
    }

    /// Process one complete line (carriage return already stripped).
    fn handle_line(&mut self, line: &str, sink: &mut dyn FnMut(&str)) -> LineOutcome {
        // Comments and blank separators
        if line.is_empty() || line.starts_with(':') {
            return LineOutcome::Consumed;
        }
        let Some(rest) = line.strip_prefix("data: ") else {
            return LineOutcome::Consumed;
        };
        let payload = rest.trim();

        if payload == "[DONE]" {
            debug!(
                "SSE [DONE] received, {} chars accumulated",
                self.accumulated.len()
            );
            self.done = true;
            return LineOutcome::Consumed;
        }

        let Ok(json) = serde_json::from_str::<Value>(payload) else {
            return LineOutcome::Incomplete;
        };

        if let Some(delta) = json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("delta"))
            .and_then(|d| d.get("content"))
            .and_then(|t| t.as_str())
        {
            if !delta.is_empty() {
                self.accumulated.push_str(delta);
                sink(&self.accumulated);
            }
        }
        LineOutcome::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta_line(content: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":{}}}}}]}}\n",
            serde_json::to_string(content).unwrap()
        )
    }

    fn run(stream: &[u8], chunk_size: usize) -> (String, bool, Vec<String>) {
        let mut acc = SseAccumulator::new();
        let mut updates = Vec::new();
        let mut sink = |text: &str| updates.push(text.to_string());
        for chunk in stream.chunks(chunk_size.max(1)) {
            acc.process_chunk(chunk, &mut sink);
        }
        acc.finish(&mut sink);
        let done = acc.is_done();
        (acc.into_text(), done, updates)
    }

    #[test]
    fn test_single_delta_then_done() {
        let stream = b"data: {\"choices\":[{\"delta\":{\"content\":\"X\"}}]}\n\ndata: [DONE]\n\n";
        let (text, done, updates) = run(stream, stream.len());
        assert_eq!(text, "X");
        assert!(done);
        assert_eq!(updates, vec!["X"]);
    }

    #[test]
    fn test_chunk_split_invariance() {
        let mut stream = String::new();
        stream.push_str(": keep-alive\n");
        stream.push_str(&delta_line("# Photosynthesis"));
        stream.push('\n');
        stream.push_str(&delta_line("\nLight reactions convert"));
        stream.push_str(&delta_line(" energy."));
        stream.push_str("data: [DONE]\n\n");
        let bytes = stream.as_bytes();

        let (whole, ..) = run(bytes, bytes.len());
        for size in [1, 2, 3, 7, 64, 4096] {
            let (split, done, _) = run(bytes, size);
            assert_eq!(split, whole, "mismatch at chunk size {size}");
            assert!(done);
        }
        assert_eq!(whole, "# Photosynthesis\nLight reactions convert energy.");
    }

    #[test]
    fn test_comments_and_blanks_ignored() {
        let stream = format!(
            ": ping\n\n{}\n: another comment\n\ndata: [DONE]\n",
            delta_line("hello")
        );
        let (text, done, _) = run(stream.as_bytes(), 5);
        assert_eq!(text, "hello");
        assert!(done);
    }

    #[test]
    fn test_non_data_lines_ignored() {
        let stream = format!("event: message\nid: 7\n{}data: [DONE]\n", delta_line("ok"));
        let (text, ..) = run(stream.as_bytes(), 9);
        assert_eq!(text, "ok");
    }

    #[test]
    fn test_multibyte_utf8_split_across_chunks() {
        let stream = delta_line("héllo wörld \u{1F600}") + "data: [DONE]\n";
        let bytes = stream.as_bytes();
        for size in 1..8 {
            let (text, ..) = run(bytes, size);
            assert_eq!(text, "héllo wörld \u{1F600}", "chunk size {size}");
        }
    }

    #[test]
    fn test_partial_json_rejoined_across_newline() {
        // The producer emitted a newline inside the JSON payload, so the
        // first "line" is unparseable on its own.
        let whole = "data: {\"choices\":[{\"delta\":{\"content\":\"AB\"}}]}";
        let (first, second) = whole.split_at(20);
        let stream = format!("{first}\n{second}\ndata: [DONE]\n");
        let (text, done, _) = run(stream.as_bytes(), stream.len());
        assert_eq!(text, "AB");
        assert!(done);
    }

    #[test]
    fn test_trailing_delta_without_newline_flushed() {
        let line = delta_line("tail");
        let stream = line.trim_end(); // drop the terminating newline
        let mut acc = SseAccumulator::new();
        let mut updates = Vec::new();
        let mut sink = |t: &str| updates.push(t.to_string());
        acc.process_chunk(stream.as_bytes(), &mut sink);
        assert_eq!(acc.accumulated(), "");
        acc.finish(&mut sink);
        assert_eq!(acc.accumulated(), "tail");
        assert!(!acc.is_done());
    }

    #[test]
    fn test_chunks_after_done_ignored() {
        let stream = format!("{}data: [DONE]\n", delta_line("done"));
        let mut acc = SseAccumulator::new();
        let mut sink = |_: &str| {};
        acc.process_chunk(stream.as_bytes(), &mut sink);
        assert!(acc.is_done());
        acc.process_chunk(delta_line("late").as_bytes(), &mut sink);
        assert_eq!(acc.accumulated(), "done");
    }

    #[test]
    fn test_crlf_lines() {
        let stream = format!(
            "data: {}\r\ndata: [DONE]\r\n",
            "{\"choices\":[{\"delta\":{\"content\":\"crlf\"}}]}"
        );
        let (text, done, _) = run(stream.as_bytes(), 4);
        assert_eq!(text, "crlf");
        assert!(done);
    }

    #[test]
    fn test_empty_delta_does_not_invoke_sink() {
        let stream = format!("{}data: [DONE]\n", delta_line(""));
        let (text, _, updates) = run(stream.as_bytes(), stream.len());
        assert_eq!(text, "");
        assert!(updates.is_empty());
    }

    #[test]
    fn test_sink_sees_monotonic_accumulation() {
        let stream = format!(
            "{}{}{}data: [DONE]\n",
            delta_line("a"),
            delta_line("b"),
            delta_line("c")
        );
        let (_, _, updates) = run(stream.as_bytes(), stream.len());
        assert_eq!(updates, vec!["a", "ab", "abc"]);
    }
}

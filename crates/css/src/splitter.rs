//! Incremental splitting of a streamed style sheet into rule blocks.
//!
//! Bytes arrive in arbitrary chunks. Each complete top-level block,
//! selector included, is handed out as soon as its closing brace shows up;
//! nested blocks (`@media ... { .a { } }`) stay whole. Braces inside strings
//! or comments are not special-cased.

/// Streaming splitter over style sheet text.
#[derive(Debug, Default)]
pub struct RuleSplitter {
    /// Text not yet handed out. Starts at the beginning of the pending block.
    buf: String,
    /// Bytes of `buf` already scanned for braces.
    scanned: usize,
    depth: usize,
    /// Incomplete UTF-8 suffix of the last byte chunk.
    carry: Vec<u8>,
}

impl RuleSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a text chunk and return the blocks it completed, in order.
    pub fn push_str(&mut self, chunk: &str) -> Vec<String> {
        self.buf.push_str(chunk);
        self.drain_blocks()
    }

    /// Feed a byte chunk. UTF-8 sequences split across chunks are carried
    /// over; invalid bytes become U+FFFD.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut pending = std::mem::take(&mut self.carry);
        pending.extend_from_slice(bytes);
        let mut rest = pending.as_slice();
        while !rest.is_empty() {
            match std::str::from_utf8(rest) {
                Ok(s) => {
                    self.buf.push_str(s);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    self.buf
                        .push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match e.error_len() {
                        Some(len) => {
                            self.buf.push('\u{FFFD}');
                            rest = &after[len..];
                        }
                        None => {
                            self.carry.extend_from_slice(after);
                            break;
                        }
                    }
                }
            }
        }
        self.drain_blocks()
    }

    /// End of stream. Returns the trailing incomplete text, if any is left
    /// besides whitespace, and resets the splitter.
    pub fn finish(&mut self) -> Option<String> {
        if !self.carry.is_empty() {
            self.buf.push_str(&String::from_utf8_lossy(&self.carry));
        }
        let tail = std::mem::take(&mut self.buf);
        *self = Self::default();
        let tail = tail.trim();
        if tail.is_empty() {
            None
        } else {
            log::debug!(target: "css.splitter", "dropping incomplete tail: {tail:?}");
            Some(tail.to_string())
        }
    }

    fn drain_blocks(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        let mut consumed = 0;
        let mut depth = self.depth;
        let bytes = self.buf.as_bytes();
        for (i, &b) in bytes.iter().enumerate().skip(self.scanned) {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    // Stray closing braces at the top level are ignored.
                    if depth == 0 {
                        continue;
                    }
                    depth -= 1;
                    if depth == 0 {
                        let block = self.buf[consumed..=i].trim();
                        if !block.is_empty() {
                            out.push(block.to_string());
                        }
                        consumed = i + 1;
                    }
                }
                _ => {}
            }
        }
        self.depth = depth;
        self.buf.drain(..consumed);
        self.scanned = self.buf.len();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_complete_blocks_with_selectors() {
        let mut s = RuleSplitter::new();
        let blocks = s.push_str(".a{color:red} .b { color: blue }\n.c{");
        assert_eq!(blocks, vec![".a{color:red}", ".b { color: blue }"]);
        assert_eq!(s.push_str("color:green}"), vec![".c{color:green}"]);
        assert_eq!(s.finish(), None);
    }

    #[test]
    fn keeps_nested_blocks_whole() {
        let mut s = RuleSplitter::new();
        let blocks = s.push_str("@media (min-width: 1px){.a{color:red}.b{color:blue}}");
        assert_eq!(
            blocks,
            vec!["@media (min-width: 1px){.a{color:red}.b{color:blue}}"]
        );
    }

    #[test]
    fn block_split_across_many_chunks() {
        let mut s = RuleSplitter::new();
        let text = ".x { margin: 0 }";
        let mut out = Vec::new();
        for ch in text.chars() {
            out.extend(s.push_str(&ch.to_string()));
        }
        assert_eq!(out, vec![text]);
    }

    #[test]
    fn stray_closing_brace_is_ignored() {
        let mut s = RuleSplitter::new();
        assert_eq!(s.push_str("} .a{x:y}"), vec!["} .a{x:y}"]);
    }

    #[test]
    fn multibyte_split_across_byte_chunks() {
        let mut s = RuleSplitter::new();
        let text = ".a::after{content:\"\u{20AC}\"}".as_bytes();
        let euro = text.iter().position(|b| *b == 0xE2).unwrap();
        assert!(s.push_bytes(&text[..euro + 1]).is_empty());
        let blocks = s.push_bytes(&text[euro + 1..]);
        assert_eq!(blocks, vec![".a::after{content:\"\u{20AC}\"}"]);
    }

    #[test]
    fn invalid_bytes_make_progress() {
        let mut s = RuleSplitter::new();
        let blocks = s.push_bytes(&[b'.', b'a', 0xFF, b'{', b'}']);
        assert_eq!(blocks, vec![".a\u{FFFD}{}"]);
    }

    #[test]
    fn finish_returns_incomplete_tail() {
        let mut s = RuleSplitter::new();
        assert!(s.push_str(".a{color:").is_empty());
        assert_eq!(s.finish().as_deref(), Some(".a{color:"));
        assert_eq!(s.finish(), None);
        assert_eq!(s.push_str(".b{}"), vec![".b{}"]);
    }
}

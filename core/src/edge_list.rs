use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{GraphError, Result};
use crate::graph::NodeId;

enum Line {
    Edge(NodeId, NodeId),
    Comment,
    Malformed,
}

fn classify(line: &str) -> Line {
    if line.trim().is_empty() || line.starts_with('#') {
        return Line::Comment;
    }
    let mut tokens = line.split_whitespace();
    let from = tokens.next().and_then(|t| t.parse::<NodeId>().ok());
    let to = tokens.next().and_then(|t| t.parse::<NodeId>().ok());
    match (from, to) {
        (Some(from), Some(to)) => Line::Edge(from, to),
        _ => Line::Malformed,
    }
}

/// Classify a raw line. Bytes that are not UTF-8 cannot hold two integers,
/// so such a line is malformed unless it is a `#` comment.
fn classify_bytes(bytes: &[u8]) -> Line {
    if bytes.first() == Some(&b'#') {
        return Line::Comment;
    }
    std::str::from_utf8(bytes).map_or(Line::Malformed, classify)
}

/// Parse one "origin destination" line.
///
/// Returns `None` for blank lines, `#` comments, and anything whose first
/// two tokens are not both non-negative integers in `NodeId` range.
/// Tokens after the second are ignored.
pub fn parse_edge_line(line: &str) -> Option<(NodeId, NodeId)> {
    match classify(line) {
        Line::Edge(from, to) => Some((from, to)),
        Line::Comment | Line::Malformed => None,
    }
}

/// Iterator of edges over a line-oriented reader.
///
/// Comment and malformed lines (including ones that are not valid UTF-8)
/// are skipped and counted. An I/O error stops iteration; it is kept and
/// can be taken with [`EdgeListReader::take_error`].
pub struct EdgeListReader<R> {
    lines: io::Split<R>,
    lines_read: usize,
    comment_lines: usize,
    malformed_lines: usize,
    error: Option<io::Error>,
}

impl<R: BufRead> EdgeListReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            lines_read: 0,
            comment_lines: 0,
            malformed_lines: 0,
            error: None,
        }
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn comment_lines(&self) -> usize {
        self.comment_lines
    }

    pub fn malformed_lines(&self) -> usize {
        self.malformed_lines
    }

    /// The I/O error that ended iteration early, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: BufRead> Iterator for EdgeListReader<R> {
    type Item = (NodeId, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            };
            self.lines_read += 1;
            match classify_bytes(&line) {
                Line::Edge(from, to) => return Some((from, to)),
                Line::Comment => self.comment_lines += 1,
                Line::Malformed => self.malformed_lines += 1,
            }
        }
    }
}

/// Open an edge-list file for reading.
pub fn open_edge_list(path: &Path) -> Result<EdgeListReader<BufReader<File>>> {
    let file = File::open(path).map_err(|source| GraphError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(EdgeListReader::new(BufReader::new(file)))
}

//! In-memory response body.

use std::io::{self, BufRead, Cursor, Read};

/// Which mechanism produced a [`Response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The built-in libcurl client.
    Native,
    /// An external download program (e.g. `curl`, `wget`).
    External { program: String },
}

/// Complete payload of a retrieved URL, read sequentially via [`Read`].
#[derive(Debug)]
pub struct Response {
    body: Cursor<Vec<u8>>,
    source: Source,
}

impl Response {
    pub fn new(body: Vec<u8>, source: Source) -> Self {
        Self {
            body: Cursor::new(body),
            source,
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Whole payload, independent of how much has been read.
    pub fn as_bytes(&self) -> &[u8] {
        self.body.get_ref()
    }

    pub fn len(&self) -> usize {
        self.body.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.get_ref().is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body.into_inner()
    }
}

impl Read for Response {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf)
    }
}

impl BufRead for Response {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.body.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.body.consume(amt)
    }
}

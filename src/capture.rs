//! Per-invocation capture of a test procedure's diagnostic output.
//!
//! A [`Capture`] is created right before a procedure runs, lent to it as its
//! output stream, and consumed with [`Capture::into_string`] once the call has
//! returned or unwound. Ownership stays with the harness the whole time, so
//! the text is recovered on every path and never shared between two results.

use std::fmt::{self, Display};
use std::io;

#[derive(Debug, Default)]
pub struct Capture {
    buf: String,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` followed by a newline.
    pub fn line(&mut self, text: impl Display) {
        self.print(text);
        self.buf.push('\n');
    }

    /// Append `text` as-is.
    pub fn print(&mut self, text: impl Display) {
        use fmt::Write;
        // Writing into a String cannot fail.
        let _ = write!(self.buf, "{}", text);
    }

    /// Release the capture, yielding everything written to it.
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl fmt::Write for Capture {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

impl io::Write for Capture {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.push_str(&String::from_utf8_lossy(bytes));
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_appends_newline() {
        let mut out = Capture::new();
        out.line("ok");
        out.print(42);
        assert_eq!(out.into_string(), "ok\n42");
    }

    #[test]
    fn accepts_fmt_and_io_writes() {
        let mut out = Capture::new();
        fmt::Write::write_fmt(&mut out, format_args!("a={}\n", 1)).unwrap();
        io::Write::write_all(&mut out, b"bytes\n").unwrap();
        assert_eq!(out.into_string(), "a=1\nbytes\n");
    }
}

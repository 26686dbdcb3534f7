//! Core utilities and shared types
//!
//! Terminal plumbing shared by the workflow commands: a `Write` adapter for the
//! pager and the yes/no prompt.

use derive_new::new;
use minus::Pager;
use std::io::{self, BufRead, Write};

/// Wrapper that implements `Write` for the minus pager
///
/// `review --print` renders through this when stdout is a terminal, so the
/// command code can keep writing to a plain `dyn Write`.
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// writeln!(writer, "Some long output...")?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Asks a yes/no question and reads one line of answer.
///
/// An empty answer or end of input picks `default`; anything starting with
/// `y`/`n` (any case) decides explicitly, and other input is treated as the
/// default as well.
pub fn confirm(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    question: &str,
    default: bool,
) -> io::Result<bool> {
    let choices = if default { "[Y/n]" } else { "[y/N]" };
    write!(writer, "{question} {choices} ")?;
    writer.flush()?;

    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        writeln!(writer)?;
        return Ok(default);
    }

    Ok(match answer.trim().chars().next() {
        Some('y' | 'Y') => true,
        Some('n' | 'N') => false,
        _ => default,
    })
}

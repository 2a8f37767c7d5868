//! Line-oriented operator prompts.
//!
//! The reader and writer are injected so the interactive flows can be driven
//! from tests without touching real stdin/stdout.

use std::io::{self, BufRead, Write};

use anyhow::Result;

/// Asks questions on `writer` and reads answers from `reader`.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wraps an arbitrary reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Writes one line of output.
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.writer, "{}", line.as_ref())?;
        Ok(())
    }

    /// Prints `question` and returns the trimmed answer, or `None` once input is closed.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.writer, "{question}")?;
        self.writer.flush()?;

        let mut input = String::new();
        let bytes = self.reader.read_line(&mut input)?;
        if bytes == 0 {
            writeln!(self.writer)?;
            return Ok(None);
        }

        Ok(Some(input.trim().to_string()))
    }

    /// Asks a yes/no question. Only `y`/`yes` (any case) count as yes; closed input is no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} (y/n): "))?;
        Ok(matches!(
            answer.map(|a| a.to_lowercase()).as_deref(),
            Some("y" | "yes")
        ))
    }

    /// Consumes the prompter, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn ask_trims_answer() {
        let mut p = prompter("  cli  \n");
        assert_eq!(p.ask("Scope: ").unwrap().as_deref(), Some("cli"));
        let output = String::from_utf8(p.into_writer()).unwrap();
        assert_eq!(output, "Scope: ");
    }

    #[test]
    fn ask_returns_none_on_eof() {
        let mut p = prompter("");
        assert_eq!(p.ask("Scope: ").unwrap(), None);
    }

    #[test]
    fn confirm_accepts_y_and_yes() {
        let mut p = prompter("y\nYES\nn\n\nmaybe\n");
        assert!(p.confirm("Go?").unwrap());
        assert!(p.confirm("Go?").unwrap());
        assert!(!p.confirm("Go?").unwrap());
        assert!(!p.confirm("Go?").unwrap());
        assert!(!p.confirm("Go?").unwrap());
        assert!(!p.confirm("Go?").unwrap());
    }

    #[test]
    fn say_writes_line() {
        let mut p = prompter("");
        p.say("hello").unwrap();
        assert_eq!(String::from_utf8(p.into_writer()).unwrap(), "hello\n");
    }
}

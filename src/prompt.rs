//! Yes/no confirmation for interactive runs.
//!
//! The sync engine only sees the [`Confirm`] trait. The CLI builds a single
//! [`LinePrompt`] over stdin/stdout for the whole run and closes it once the
//! sync is finished; `close` takes the prompt by value, so it cannot be
//! closed twice or used afterwards.

use std::io::{self, BufRead, Write};

/// Asks the operator a yes/no question.
pub trait Confirm {
    /// Blocks until an answer is available. Only an explicit "y"/"yes"
    /// counts as consent.
    fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

/// Whether a line of operator input means "yes".
///
/// Case-insensitive `y` or `yes`, surrounding whitespace ignored. Everything
/// else, including an empty line, is "no".
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

/// Answers "no" without asking. Used for non-interactive runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Decline;

impl Confirm for Decline {
    fn confirm(&mut self, _message: &str) -> io::Result<bool> {
        Ok(false)
    }
}

/// Line-based prompt: writes `<message> (y/n): ` and reads one line.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Release the input channel, flushing any pending output.
    pub fn close(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        write!(self.writer, "{} (y/n): ", message)?;
        self.writer.flush()?;

        let mut answer = String::new();
        // EOF reads zero bytes and leaves `answer` empty, i.e. "no"
        self.reader.read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> LinePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("yes\n"));
        assert!(is_affirmative("  YeS  "));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn test_confirm_reads_one_line_per_question() {
        let mut prompt = prompt("y\nn\nYES\n");
        assert!(prompt.confirm("First?").unwrap());
        assert!(!prompt.confirm("Second?").unwrap());
        assert!(prompt.confirm("Third?").unwrap());
    }

    #[test]
    fn test_confirm_writes_prompt_text() {
        let mut prompt = prompt("n\n");
        prompt
            .confirm("File already exists: a.md. Overwrite?")
            .unwrap();
        let written = String::from_utf8(prompt.writer.clone()).unwrap();
        assert_eq!(written, "File already exists: a.md. Overwrite? (y/n): ");
    }

    #[test]
    fn test_confirm_eof_is_no() {
        let mut prompt = prompt("");
        assert!(!prompt.confirm("Anything?").unwrap());
        assert!(!prompt.confirm("Still?").unwrap());
    }

    #[test]
    fn test_decline_never_consents() {
        assert!(!Decline.confirm("Overwrite?").unwrap());
    }

    #[test]
    fn test_close() {
        let prompt = prompt("y\n");
        prompt.close().unwrap();
    }
}

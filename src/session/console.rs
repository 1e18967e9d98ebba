use std::io::{self, BufRead, Write};

/// Line-oriented user interaction.
pub trait Console {
    /// Print one line.
    fn say(&mut self, line: &str) -> io::Result<()>;

    /// Print `message` without a newline and read the answer. `None` once input is closed.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>>;

    /// Read a line without printing anything first.
    fn read(&mut self) -> io::Result<Option<String>> {
        self.prompt("")
    }
}

impl<C: Console + ?Sized> Console for &mut C {
    fn say(&mut self, line: &str) -> io::Result<()> {
        (**self).say(line)
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        (**self).prompt(message)
    }
}

/// A [`Console`] over any reader and writer: stdin/stdout for real sessions, byte
/// buffers in tests.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

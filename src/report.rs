use std::fs;
use std::io::Write;
use std::path::Path;

/// Lines describing one probe, in the order the steps ran.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProbeReport {
    lines: Vec<String>,
}

impl ProbeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::debug!("{}", line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every line followed by a newline, no header or footer.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Overwrites `path` with the report text.
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.text())
    }

    /// Writes the report text to `out` unchanged, so it matches the file.
    pub fn print_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(self.text().as_bytes())?;
        out.flush()
    }
}

use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::debug;
use std::io::{self, Write};

const PREVIEW_LENGTH: usize = 200;

/// Destination for a generated repo context besides the output file.
pub trait OutputWriter {
    fn write(&self, content: &str) -> anyhow::Result<()>;
}

pub struct ConsoleWriter;

impl OutputWriter for ConsoleWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        debug!("Writing repo context to console");
        let mut stdout = io::stdout();
        stdout.write_all(content.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(feature = "clipboard-support")]
pub struct ClipboardWriter;

#[cfg(feature = "clipboard-support")]
impl OutputWriter for ClipboardWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        use clipboard::{ClipboardContext, ClipboardProvider};
        use log::{info, warn};

        debug!("Writing repo context to clipboard");

        let mut ctx: ClipboardContext = match ClipboardProvider::new() {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
                return Err(anyhow::anyhow!("Failed to access clipboard: {}", e));
            }
        };

        match ctx.set_contents(content.to_owned()) {
            Ok(_) => {
                info!("Repo context copied to clipboard (size: {} bytes)", content.len());
                Ok(())
            }
            Err(e) => {
                warn!("Failed to copy to clipboard: {}", e);
                Err(anyhow::anyhow!("Failed to copy to clipboard: {}", e))
            }
        }
    }
}

pub fn create_writers(print: bool, clipboard_output: bool) -> anyhow::Result<Vec<Box<dyn OutputWriter>>> {
    let mut writers: Vec<Box<dyn OutputWriter>> = Vec::new();
    if print {
        writers.push(Box::new(ConsoleWriter));
    }
    if clipboard_output {
        #[cfg(feature = "clipboard-support")]
        writers.push(Box::new(ClipboardWriter));
        #[cfg(not(feature = "clipboard-support"))]
        anyhow::bail!("Clipboard output requires the `clipboard-support` feature");
    }
    Ok(writers)
}

/// Truncates `content` to `max_chars` characters, never splitting a UTF-8 sequence.
pub fn preview(content: &str, max_chars: usize) -> String {
    if content.chars().count() > max_chars {
        let safe_substring: String = content.chars().take(max_chars).collect();
        format!("{}...", safe_substring)
    } else {
        content.to_string()
    }
}

/// Sends `content` to every requested destination.
pub fn deliver_output(content: &str, print: bool, clipboard_output: bool) -> anyhow::Result<()> {
    for writer in create_writers(print, clipboard_output)? {
        writer.write(content)?;
    }

    if clipboard_output && !print {
        let mut stdout = io::stdout();
        stdout.execute(SetForegroundColor(Color::Green))?;
        writeln!(stdout, "\n📋 Repo context copied to clipboard!")?;
        stdout.execute(ResetColor)?;

        writeln!(stdout, "\nPreview of copied content:\n")?;
        writeln!(stdout, "{}", preview(content, PREVIEW_LENGTH))?;
    }

    Ok(())
}

/// Prints a green status line, as used for successful engine operations.
pub fn print_success(message: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Green))?;
    write!(stdout, "✓ ")?;
    stdout.execute(ResetColor)?;
    writeln!(stdout, "{}", message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_writers() {
        assert!(create_writers(false, false).unwrap().is_empty());
        assert_eq!(create_writers(true, false).unwrap().len(), 1);
    }

    #[cfg(feature = "clipboard-support")]
    #[test]
    fn test_create_writers_with_clipboard() {
        assert_eq!(create_writers(true, true).unwrap().len(), 2);
    }

    #[test]
    fn test_utf8_safe_preview() {
        let content =
            "اهلا مرحب عبدالله 🚀 This string has UTF-8 characters like: ├── ./src/file.rs";

        let shortened = preview(content, 20);
        assert_eq!(shortened.chars().count(), 23);
        assert!(shortened.ends_with("..."));

        assert_eq!(preview("short", 20), "short");
    }
}

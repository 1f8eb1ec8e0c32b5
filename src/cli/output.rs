//! Terminal output for the CLI commands.
//!
//! Every line has a colored form and a plain form (`--no-color`, or output
//! that is piped into another tool). Lines are rendered to strings first so
//! the plain forms can be checked in tests.

use owo_colors::OwoColorize;

/// Kind of status line, which picks the marker and the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Ok,
    Info,
    Warn,
    Error,
}

impl Status {
    fn plain_tag(self) -> &'static str {
        match self {
            Status::Ok => "[OK]",
            Status::Info => "[INFO]",
            Status::Warn => "[WARN]",
            Status::Error => "[ERROR]",
        }
    }
}

pub struct Output {
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    fn status_line(&self, status: Status, message: &str) -> String {
        if !self.colored {
            return format!("  {} {}", status.plain_tag(), message);
        }
        match status {
            Status::Ok => format!("  {} {}", "✓".green().bold(), message.green()),
            Status::Info => format!("  {} {}", "•".blue(), message),
            Status::Warn => format!("  {} {}", "⚠".yellow().bold(), message.yellow()),
            Status::Error => format!("  {} {}", "✗".red().bold(), message.red()),
        }
    }

    fn emit(&self, status: Status, message: &str) {
        let line = self.status_line(status, message);
        if status == Status::Error {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Name and version, shown before `init` output.
    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!("\n   {} {}\n", "authgate".bright_cyan().bold(), version.dimmed());
        } else {
            println!("\n   authgate {version}\n");
        }
    }

    pub fn success(&self, message: &str) {
        self.emit(Status::Ok, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(Status::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(Status::Warn, message);
    }

    /// Written to stderr.
    pub fn error(&self, message: &str) {
        self.emit(Status::Error, message);
    }

    fn created_line(&self, kind: &str, path: &str) -> String {
        if self.colored {
            format!("  {} {} {}", "✓".green().bold(), kind.dimmed(), path.bright_white())
        } else {
            format!("  [CREATED] {kind} {path}")
        }
    }

    /// A file or directory written by `init`.
    pub fn created(&self, kind: &str, path: &str) {
        println!("{}", self.created_line(kind, path));
    }

    /// A path `init` left alone, with the reason.
    pub fn skipped(&self, path: &str, reason: &str) {
        if self.colored {
            let reason = format!("({reason})");
            println!("  {} {} {}", "○".yellow(), path.dimmed(), reason.yellow());
        } else {
            println!("  [SKIPPED] {path} ({reason})");
        }
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {title} ===");
        }
    }

    fn kv_line(&self, key: &str, value: &str) -> String {
        if self.colored {
            format!("    {}: {}", key.dimmed(), value.bright_white())
        } else {
            format!("    {key}: {value}")
        }
    }

    /// One resolved setting in `authgate config`.
    pub fn kv(&self, key: &str, value: &str) {
        println!("{}", self.kv_line(key, value));
    }

    /// A shell command for the user to copy.
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("      {} {}", "$".dimmed(), cmd.bright_green());
        } else {
            println!("      $ {cmd}");
        }
    }

    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {}", message.dimmed().italic());
        } else {
            println!("\n  Hint: {message}");
        }
    }
}

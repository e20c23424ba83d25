// Console output - ANSI colored, indented log lines
//
// Used as the env_logger line format and for the final error message.

use std::fmt::Write as _;
use std::io::Write;

/// The 16 ANSI terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// SGR foreground code (30-37, 90-97)
    pub fn foreground(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::BrightBlack => 90,
            Self::BrightRed => 91,
            Self::BrightGreen => 92,
            Self::BrightYellow => 93,
            Self::BrightBlue => 94,
            Self::BrightMagenta => 95,
            Self::BrightCyan => 96,
            Self::BrightWhite => 97,
        }
    }

    /// SGR background code, always foreground + 10
    pub fn background(self) -> u8 {
        self.foreground() + 10
    }
}

const RESET: &str = "\x1b[0m";

/// `message` wrapped in color codes, prefixed with `indent` spaces
pub fn paint(message: &str, fg: Color, bg: Color, indent: u16) -> String {
    let mut line = String::with_capacity(message.len() + indent as usize + 16);
    let _ = write!(line, "\x1b[{};{}m", fg.foreground(), bg.background());
    line.extend(std::iter::repeat(' ').take(indent as usize));
    line.push_str(message);
    line.push_str(RESET);
    line
}

/// Print one painted line to stdout
pub fn log_message(message: &str, fg: Color, bg: Color, indent: u16) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{}", paint(message, fg, bg, indent));
}

/// Colors and indent used for each level
pub fn level_style(level: log::Level) -> (Color, Color, u16) {
    match level {
        log::Level::Error => (Color::BrightRed, Color::Black, 0),
        log::Level::Warn => (Color::Yellow, Color::Black, 0),
        log::Level::Info => (Color::White, Color::Black, 0),
        log::Level::Debug => (Color::BrightBlack, Color::Black, 4),
        log::Level::Trace => (Color::BrightBlack, Color::Black, 8),
    }
}

/// env_logger line format
pub fn format_record(buf: &mut env_logger::fmt::Formatter, record: &log::Record) -> std::io::Result<()> {
    let (fg, bg, indent) = level_style(record.level());
    let message = format!("[{:<5} {}] {}", record.level(), record.target(), record.args());
    writeln!(buf, "{}", paint(&message, fg, bg, indent))
}

//! Demo script parsing.
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! open 5 2        # gallery of 5 images opened at index 2 (open 1 = single)
//! right           # ArrowRight
//! key Escape      # any DOM key name
//! swipe -60 5     # touch-start at the center, touch-end displaced by (dx, dy)
//! click content   # backdrop | content | chrome
//! wait 300        # advance the virtual clock by 300ms
//! close
//! show            # print the scene
//! ```

use std::fmt;
use std::time::Duration;

use mframe::{ClickTarget, KeyCode};

/// One scripted host action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open { items: u64, start: usize },
    Key(KeyCode),
    Swipe { dx: f32, dy: f32 },
    Click(ClickTarget),
    Wait(Duration),
    Close,
    Show,
}

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

fn arg<T: std::str::FromStr>(word: Option<&str>, what: &str) -> Result<T, String> {
    let word = word.ok_or_else(|| format!("missing {what}"))?;
    word.parse().map_err(|_| format!("invalid {what}: {word:?}"))
}

fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb {
        "open" => {
            let items = words.next().map_or(Ok(5), |w| arg(Some(w), "item count"))?;
            let start = words.next().map_or(Ok(0), |w| arg(Some(w), "start index"))?;
            Command::Open { items, start }
        }
        "left" | "prev" => Command::Key(KeyCode::Left),
        "right" | "next" => Command::Key(KeyCode::Right),
        "key" => {
            let name = words.next().ok_or("missing key name")?;
            let code = KeyCode::from_key_name(name)
                .ok_or_else(|| format!("unknown key {name:?}"))?;
            Command::Key(code)
        }
        "swipe" => Command::Swipe {
            dx: arg(words.next(), "dx")?,
            dy: arg(words.next(), "dy")?,
        },
        "click" => {
            let target = match words.next().unwrap_or("backdrop") {
                "backdrop" => ClickTarget::Backdrop,
                "content" => ClickTarget::Content,
                "chrome" => ClickTarget::Chrome,
                other => return Err(format!("unknown click target {other:?}")),
            };
            Command::Click(target)
        }
        "wait" => Command::Wait(Duration::from_millis(arg(words.next(), "milliseconds")?)),
        "close" => Command::Close,
        "show" => Command::Show,
        other => return Err(format!("unknown command {other:?}")),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument {extra:?}"));
    }
    Ok(Some(command))
}

/// Parse a whole script.
pub fn parse(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (i, line) in source.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(message) => return Err(ScriptError { line: i + 1, message }),
        }
    }
    Ok(commands)
}

//! Line commands for the terminal driver.

use glam::Vec2;
use input::KeyCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShellError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument { command: &'static str, expected: &'static str },
    #[error("could not parse {value:?} as {expected}")]
    BadArgument { value: String, expected: &'static str },
}

/// Which marker a `click` names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerRef {
    /// 1-based number, as shown on the marker label.
    Number(usize),
    Id(String),
}

/// Screen the driver is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Map,
    Story,
    JobMatch,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Press and release a bound key for one frame.
    Key(KeyCode),
    /// Move the cursor to a window pixel and left-click.
    ClickPixel(Vec2),
    ClickMarker(MarkerRef),
    /// Right-drag by a pixel delta to orbit the map.
    Drag(Vec2),
    /// Scroll wheel lines; positive zooms in.
    Zoom(f32),
    /// Run this many fixed ticks.
    Tick(u32),
    Show(View),
    /// Attach a job description PDF.
    Pdf(PathBuf),
    /// Set the pasted job description text.
    JobText(String),
    Submit,
    Health,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  click <n|id>     focus a marker by number or id
  at <x> <y>       click at a window pixel
  drag <dx> <dy>   orbit the map by a mouse drag
  zoom in|out      zoom the map one step
  all | next | prev | back
                   view all, browse, close the popup
  tick [n]         advance n frames (default 60)
  map | story | match-view
                   switch screen
  space            advance the story
  pdf <path>       attach a job description PDF
  text <words..>   paste job description text
  match            analyze the job match
  health           check the job-match service
  help | quit";

fn parse_num<T: std::str::FromStr>(value: &str, expected: &'static str) -> Result<T, ShellError> {
    value.parse().map_err(|_| ShellError::BadArgument {
        value: value.to_string(),
        expected,
    })
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest = line[head.len()..].trim();
    let command = match head.to_ascii_lowercase().as_str() {
        "click" | "c" => {
            let target = words.next().ok_or(ShellError::MissingArgument {
                command: "click",
                expected: "a marker number or id",
            })?;
            match target.parse::<usize>() {
                Ok(n) => ShellCommand::ClickMarker(MarkerRef::Number(n)),
                Err(_) => ShellCommand::ClickMarker(MarkerRef::Id(target.to_string())),
            }
        }
        "at" => {
            let missing = ShellError::MissingArgument {
                command: "at",
                expected: "x and y pixels",
            };
            let x = words.next().ok_or(missing.clone())?;
            let y = words.next().ok_or(missing)?;
            ShellCommand::ClickPixel(Vec2::new(parse_num(x, "a pixel x")?, parse_num(y, "a pixel y")?))
        }
        "drag" => {
            let missing = ShellError::MissingArgument {
                command: "drag",
                expected: "dx and dy pixels",
            };
            let dx = words.next().ok_or(missing.clone())?;
            let dy = words.next().ok_or(missing)?;
            ShellCommand::Drag(Vec2::new(parse_num(dx, "a pixel dx")?, parse_num(dy, "a pixel dy")?))
        }
        "zoom" => match words.next().map(str::to_ascii_lowercase).as_deref() {
            Some("in" | "+") => ShellCommand::Zoom(1.0),
            Some("out" | "-") => ShellCommand::Zoom(-1.0),
            Some(other) => {
                return Err(ShellError::BadArgument {
                    value: other.to_string(),
                    expected: "`in` or `out`",
                })
            }
            None => {
                return Err(ShellError::MissingArgument {
                    command: "zoom",
                    expected: "`in` or `out`",
                })
            }
        },
        "all" | "v" => ShellCommand::Key(KeyCode::KeyV),
        "next" | "n" => ShellCommand::Key(KeyCode::ArrowRight),
        "prev" | "p" => ShellCommand::Key(KeyCode::ArrowLeft),
        "back" | "esc" => ShellCommand::Key(KeyCode::Escape),
        "space" | "advance" => ShellCommand::Key(KeyCode::Space),
        "tick" | "t" => match words.next() {
            Some(n) => ShellCommand::Tick(parse_num(n, "a frame count")?),
            None => ShellCommand::Tick(60),
        },
        "map" => ShellCommand::Show(View::Map),
        "story" => ShellCommand::Show(View::Story),
        "match-view" | "jobs" => ShellCommand::Show(View::JobMatch),
        "pdf" => {
            if rest.is_empty() {
                return Err(ShellError::MissingArgument {
                    command: "pdf",
                    expected: "a file path",
                });
            }
            ShellCommand::Pdf(PathBuf::from(rest))
        }
        "text" => ShellCommand::JobText(rest.to_string()),
        "match" => ShellCommand::Submit,
        "health" => ShellCommand::Health,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(ShellError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

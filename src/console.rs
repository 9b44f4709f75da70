// SPDX-License-Identifier: MPL-2.0
//! Line commands for the terminal front-end.
//!
//! Each line is parsed into a [`ConsoleCommand`]. Gestures expand into a
//! timed [`ScriptStep`] sequence so the deck sees real pointer timing.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::geometry::Point;
use crate::domain::source::LocalTrack;
use crate::gesture::{InputEvent, Key, PointerKind};
use crate::runtime::DeckCommand;

/// Default duration of a scripted drag.
pub const DEFAULT_DRAG_MS: u64 = 300;

/// Pause between the two taps of a scripted double tap.
pub const DOUBLE_TAP_GAP: Duration = Duration::from_millis(150);

/// Spacing of scripted pointer moves.
const DRAG_STEP: Duration = Duration::from_millis(16);

/// Largest angle covered by one scripted move, kept well inside the seam.
const MAX_STEP_DEG: f64 = 90.0;

pub const HELP: &str = "\
commands:
  play                 press the play button
  space                toggle play/pause
  left | right         seek by the keyboard step
  load PATH            load a local audio file
  yt URL               load a YouTube video or playlist
  drag DEGREES [MS]    drag the disc (negative rewinds)
  tap | double         tap or double-tap the disc
  cover PATH           use an image file as the custom cover
  reset-cover          forget the custom cover
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// Forwarded to the deck as is.
    Deck(DeckCommand),
    Drag { degrees: f64, over: Duration },
    Tap,
    DoubleTap,
    /// Cover image to read from disk.
    Cover(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    Unknown(String),
    MissingArgument(&'static str),
    BadNumber(String),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(word) => write!(f, "unknown command {word:?} (try \"help\")"),
            Self::MissingArgument(what) => write!(f, "missing {what}"),
            Self::BadNumber(raw) => write!(f, "not a number: {raw:?}"),
        }
    }
}

impl std::error::Error for ConsoleError {}

fn number(raw: &str) -> Result<f64, ConsoleError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConsoleError::BadNumber(raw.to_string()))
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`ConsoleError`] for unknown words or malformed arguments.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, ConsoleError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    if word.is_empty() {
        return Ok(None);
    }

    let key = |key| ConsoleCommand::Deck(DeckCommand::Input(InputEvent::Key(key)));
    let command = match word.to_ascii_lowercase().as_str() {
        "play" => ConsoleCommand::Deck(DeckCommand::Input(InputEvent::PlayButton)),
        "space" | "k" => key(Key::Space),
        "left" => key(Key::Left),
        "right" => key(Key::Right),
        "esc" | "escape" => key(Key::Escape),
        "load" if rest.is_empty() => return Err(ConsoleError::MissingArgument("file path")),
        "load" => ConsoleCommand::Deck(DeckCommand::LoadLocal(LocalTrack::from_path(
            PathBuf::from(rest).as_path(),
        ))),
        "yt" => ConsoleCommand::Deck(DeckCommand::LoadRemote(rest.to_string())),
        "seek" if rest.is_empty() => return Err(ConsoleError::MissingArgument("seconds")),
        "seek" => ConsoleCommand::Deck(DeckCommand::Seek(number(rest)?)),
        "drag" => {
            let mut args = rest.split_whitespace();
            let degrees = number(args.next().ok_or(ConsoleError::MissingArgument("degrees"))?)?;
            let ms = match args.next() {
                Some(raw) => number(raw)?.max(0.0),
                None => DEFAULT_DRAG_MS as f64,
            };
            ConsoleCommand::Drag {
                degrees,
                over: Duration::from_secs_f64(ms / 1000.0),
            }
        }
        "tap" => ConsoleCommand::Tap,
        "double" => ConsoleCommand::DoubleTap,
        "cover" if rest.is_empty() => return Err(ConsoleError::MissingArgument("image path")),
        "cover" => ConsoleCommand::Cover(PathBuf::from(rest)),
        "reset-cover" => ConsoleCommand::Deck(DeckCommand::ResetCover),
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        other => return Err(ConsoleError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// An input event to send after waiting `delay`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub delay: Duration,
    pub event: InputEvent,
}

impl ScriptStep {
    fn now(event: InputEvent) -> Self {
        Self {
            delay: Duration::ZERO,
            event,
        }
    }
}

/// Where scripted gestures touch the disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscGeometry {
    pub pivot: Point,
    pub radius: f64,
}

impl DiscGeometry {
    fn touch_at(self, degrees: f64) -> InputEvent {
        InputEvent::Down {
            point: self.pivot.on_circle(self.radius, degrees),
            kind: PointerKind::Touch,
        }
    }

    /// Presses at 0°, moves around the rim by `degrees` over `over`, releases.
    #[must_use]
    pub fn drag(self, degrees: f64, over: Duration) -> Vec<ScriptStep> {
        let by_time = (over.as_secs_f64() / DRAG_STEP.as_secs_f64()).ceil();
        let by_angle = (degrees.abs() / MAX_STEP_DEG).ceil();
        let steps = by_time.max(by_angle).max(1.0) as u32;
        let delay = over / steps;

        let mut script = vec![ScriptStep::now(self.touch_at(0.0))];
        script.extend((1..=steps).map(|i| ScriptStep {
            delay,
            event: InputEvent::Move {
                point: self
                    .pivot
                    .on_circle(self.radius, degrees * f64::from(i) / f64::from(steps)),
            },
        }));
        script.push(ScriptStep::now(InputEvent::Up));
        script
    }

    #[must_use]
    pub fn tap(self) -> Vec<ScriptStep> {
        vec![
            ScriptStep::now(self.touch_at(0.0)),
            ScriptStep::now(InputEvent::Up),
        ]
    }

    #[must_use]
    pub fn double_tap(self) -> Vec<ScriptStep> {
        let mut script = self.tap();
        script.push(ScriptStep {
            delay: DOUBLE_TAP_GAP,
            event: self.touch_at(0.0),
        });
        script.push(ScriptStep::now(InputEvent::Up));
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::{angle_of, normalize_delta};
    use crate::test_utils::assert_abs_diff_eq;

    fn parse(line: &str) -> ConsoleCommand {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn parses_simple_words() {
        assert_eq!(
            parse("play"),
            ConsoleCommand::Deck(DeckCommand::Input(InputEvent::PlayButton))
        );
        assert_eq!(
            parse("  LEFT "),
            ConsoleCommand::Deck(DeckCommand::Input(InputEvent::Key(Key::Left)))
        );
        assert_eq!(parse("reset-cover"), ConsoleCommand::Deck(DeckCommand::ResetCover));
        assert_eq!(parse("quit"), ConsoleCommand::Quit);
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(
            parse("load /music/Some Song.mp3"),
            ConsoleCommand::Deck(DeckCommand::LoadLocal(LocalTrack::new(
                "/music/Some Song.mp3",
                "Some Song"
            )))
        );
        assert_eq!(
            parse("yt https://youtu.be/dQw4w9WgXcQ"),
            ConsoleCommand::Deck(DeckCommand::LoadRemote(
                "https://youtu.be/dQw4w9WgXcQ".to_string()
            ))
        );
        assert_eq!(
            parse("drag -90 500"),
            ConsoleCommand::Drag {
                degrees: -90.0,
                over: Duration::from_millis(500)
            }
        );
        assert_eq!(
            parse("drag 45"),
            ConsoleCommand::Drag {
                degrees: 45.0,
                over: Duration::from_millis(DEFAULT_DRAG_MS)
            }
        );
    }

    #[test]
    fn empty_yt_is_left_to_the_deck() {
        assert_eq!(
            parse("yt"),
            ConsoleCommand::Deck(DeckCommand::LoadRemote(String::new()))
        );
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            parse_line("spin"),
            Err(ConsoleError::Unknown("spin".to_string()))
        );
        assert_eq!(
            parse_line("drag"),
            Err(ConsoleError::MissingArgument("degrees"))
        );
        assert_eq!(
            parse_line("drag fast"),
            Err(ConsoleError::BadNumber("fast".to_string()))
        );
        assert_eq!(parse_line("load"), Err(ConsoleError::MissingArgument("file path")));
    }

    #[test]
    fn drag_script_covers_the_angle_without_crossing_the_seam() {
        let disc = DiscGeometry {
            pivot: Point::new(200.0, 200.0),
            radius: 150.0,
        };
        let script = disc.drag(400.0, Duration::from_millis(32));

        assert!(matches!(script.first().map(|s| s.event), Some(InputEvent::Down { .. })));
        assert_eq!(script.last().map(|s| s.event), Some(InputEvent::Up));

        let mut last = 0.0;
        let mut total = 0.0;
        for step in &script[1..script.len() - 1] {
            let InputEvent::Move { point } = step.event else {
                panic!("expected move");
            };
            let angle = angle_of(disc.pivot, point);
            let delta = normalize_delta(last, angle);
            assert!(delta.abs() <= MAX_STEP_DEG + 1e-9);
            total += delta;
            last = angle;
        }
        assert_abs_diff_eq!(total, 400.0, epsilon = 1e-6);
    }

    #[test]
    fn double_tap_waits_between_taps() {
        let disc = DiscGeometry {
            pivot: Point::default(),
            radius: 10.0,
        };
        let script = disc.double_tap();
        let delays: Vec<_> = script.iter().map(|s| s.delay).collect();
        assert_eq!(
            delays,
            vec![Duration::ZERO, Duration::ZERO, DOUBLE_TAP_GAP, Duration::ZERO]
        );
    }
}

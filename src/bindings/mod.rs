//! User input bindings
//!
//! Maps keys and command lines onto controller operations.

use std::{ops::ControlFlow, str::FromStr};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::{state::Session, timer::TimerController};

/// An action requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle,
    Reset,
    Select(Session),
    Quit,
}

impl Command {
    /// Translate a key press; releases and unbound keys yield `None`
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Command::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('s') => Some(Command::Toggle),
            KeyCode::Char('r') => Some(Command::Reset),
            KeyCode::Char('f') | KeyCode::Char('1') => Some(Command::Select(Session::Focus)),
            KeyCode::Char('b') | KeyCode::Char('2') => Some(Command::Select(Session::Break)),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        }
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toggle" => Ok(Command::Toggle),
            "reset" => Ok(Command::Reset),
            "focus" => Ok(Command::Select(Session::Focus)),
            "break" => Ok(Command::Select(Session::Break)),
            "quit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Apply a command to the controller
///
/// Selecting the phase that is already active does nothing: no reset and
/// no restart.
pub fn dispatch(controller: &mut TimerController, command: Command) -> ControlFlow<()> {
    debug!("Dispatching command: {:?}", command);
    match command {
        Command::Toggle => controller.toggle(),
        Command::Reset => controller.reset(),
        Command::Select(target) => {
            if target == controller.state().session() {
                debug!("Session {:?} already active, ignoring selection", target);
            } else {
                controller.set_session(target, true);
            }
        }
        Command::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_keys() {
        assert_eq!(Command::from_key(press(KeyCode::Char(' '))), Some(Command::Toggle));
        assert_eq!(Command::from_key(press(KeyCode::Char('r'))), Some(Command::Reset));
        assert_eq!(
            Command::from_key(press(KeyCode::Char('b'))),
            Some(Command::Select(Session::Break))
        );
        assert_eq!(
            Command::from_key(press(KeyCode::Char('1'))),
            Some(Command::Select(Session::Focus))
        );
        assert_eq!(Command::from_key(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(Command::from_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key(key), Some(Command::Quit));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = press(KeyCode::Char(' '));
        key.kind = KeyEventKind::Release;
        assert_eq!(Command::from_key(key), None);
    }

    #[test]
    fn parses_command_lines() {
        assert_eq!(" Toggle \n".parse::<Command>(), Ok(Command::Toggle));
        assert_eq!("break".parse::<Command>(), Ok(Command::Select(Session::Break)));
        assert!("pause".parse::<Command>().is_err());
    }
}

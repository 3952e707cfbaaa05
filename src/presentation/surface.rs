//! Display surfaces that put a rendered view in front of the user

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, queue,
    style::{Color, PrintStyledContent, Stylize},
    terminal::{self, Clear, ClearType, SetTitle},
};
use tracing::debug;

use super::{Locale, View};
use crate::state::Session;

/// Something that can display a view
pub trait Surface: Send {
    fn present(&mut self, view: &View) -> io::Result<()>;
}

/// Interactive single-line terminal display
pub struct TerminalSurface<W: Write + Send = Stdout> {
    out: W,
    locale: Locale,
    raw_mode: bool,
}

impl TerminalSurface<Stdout> {
    /// Take over the controlling terminal: raw mode, hidden cursor
    pub fn stdout(locale: Locale) -> io::Result<Self> {
        let mut out = io::stdout();
        take_over(&mut out, terminal::enable_raw_mode, terminal::disable_raw_mode)?;
        debug!("Terminal surface initialized in raw mode");

        Ok(Self {
            out,
            locale,
            raw_mode: true,
        })
    }
}

/// Enter raw mode and hide the cursor, leaving raw mode again if the
/// cursor cannot be hidden
fn take_over<W: Write>(
    out: &mut W,
    enable: impl FnOnce() -> io::Result<()>,
    disable: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    enable()?;
    let hidden = queue!(out, cursor::Hide).and_then(|()| out.flush());
    if let Err(e) = hidden {
        let _ = disable();
        return Err(e);
    }
    Ok(())
}

impl<W: Write + Send> TerminalSurface<W> {
    /// Draw onto an arbitrary writer without touching terminal modes
    pub fn with_writer(out: W, locale: Locale) -> Self {
        Self {
            out,
            locale,
            raw_mode: false,
        }
    }

    pub fn into_inner(mut self) -> W
    where
        W: Default,
    {
        std::mem::take(&mut self.out)
    }

    fn selector(&self, session: Session, active: Session) -> String {
        let name = self.locale.session_name(session);
        if session == active {
            format!("[{name}]")
        } else {
            format!(" {name} ")
        }
    }
}

impl<W: Write + Send> Surface for TerminalSurface<W> {
    fn present(&mut self, view: &View) -> io::Result<()> {
        let accent = if view.break_mode { Color::Green } else { Color::Red };

        let selectors = format!(
            "{} {}",
            self.selector(Session::Focus, view.active_selector),
            self.selector(Session::Break, view.active_selector),
        );
        let hints = format!(
            "[space] {}  [r] {}  [f/b] {}/{}  [q]",
            view.toggle_label,
            self.locale.reset_label(),
            self.locale.session_name(Session::Focus),
            self.locale.session_name(Session::Break),
        );

        queue!(
            self.out,
            SetTitle(&view.title),
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            PrintStyledContent(view.time.clone().with(accent).bold()),
            PrintStyledContent(format!("  {}  ", view.phase_label).with(accent)),
            PrintStyledContent(selectors.reverse()),
            PrintStyledContent(format!("  {hints}").dim()),
        )?;
        self.out.flush()
    }
}

impl<W: Write + Send> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = queue!(self.out, cursor::Show);
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// Emits one JSON object per view on its own line
pub struct JsonSurface<W: Write + Send = Stdout> {
    out: W,
}

impl JsonSurface<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> JsonSurface<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write + Send> Surface for JsonSurface<W> {
    fn present(&mut self, view: &View) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, view)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

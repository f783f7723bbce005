use std::{io, ops::ControlFlow, time::Duration};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use dodger_training::{FrameObserver, FramePacer, FrameView};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Block,
};

use crate::ui::widgets::{HudDisplay, PlayfieldDisplay, style};

/// Draws every frame in the terminal and turns key presses into control
/// signals.
///
/// `Esc` ends the current generation, `q` ends it and stops the run. If the
/// terminal fails, the viewer stops drawing and lets the simulation finish
/// headless; the error is kept for the caller to report.
#[derive(Debug)]
pub struct Viewer<'t> {
    terminal: &'t mut DefaultTerminal,
    pacer: FramePacer,
    quit: bool,
    error: Option<io::Error>,
}

impl<'t> Viewer<'t> {
    pub fn new(terminal: &'t mut DefaultTerminal, fps: u32) -> Self {
        Self {
            terminal,
            pacer: FramePacer::new(fps),
            quit: false,
            error: None,
        }
    }

    pub fn into_error(self) -> Option<io::Error> {
        self.error
    }

    fn draw(&mut self, view: &FrameView<'_>) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame, view))?;
        Ok(())
    }

    fn poll_keys(&mut self) -> io::Result<ControlFlow<()>> {
        let mut flow = ControlFlow::Continue(());
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => flow = ControlFlow::Break(()),
                KeyCode::Char('q') => {
                    self.quit = true;
                    flow = ControlFlow::Break(());
                }
                _ => {}
            }
        }
        Ok(flow)
    }
}

impl FrameObserver for Viewer<'_> {
    fn on_frame(&mut self, view: &FrameView<'_>) -> ControlFlow<()> {
        if self.error.is_some() {
            return ControlFlow::Continue(());
        }
        let flow = self.draw(view).and_then(|()| self.poll_keys());
        match flow {
            Ok(flow) => {
                self.pacer.wait();
                flow
            }
            Err(err) => {
                self.error = Some(err);
                ControlFlow::Continue(())
            }
        }
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

fn render(frame: &mut Frame<'_>, view: &FrameView<'_>) {
    let [playfield_area, hud_area] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(32)]).areas(frame.area());

    frame.render_widget(
        PlayfieldDisplay::new(view).block(
            Block::bordered()
                .title(Line::from("DODGER").centered())
                .style(style::DEFAULT),
        ),
        playfield_area,
    );
    frame.render_widget(
        HudDisplay::new(&view.hud, view.frame).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .style(style::DEFAULT),
        ),
        hud_area,
    );
}

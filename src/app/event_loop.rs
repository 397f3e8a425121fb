use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, input, update};

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the terminal cannot be
    /// initialized, or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let initial = self.read_initial_content()?;
        let config = self.flags.textarea_config(initial);
        let mut model = Model::new(self.file_path.clone(), config);

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - markarea requires an interactive terminal")?;
        let paste_enabled = execute!(stdout(), EnableBracketedPaste).is_ok();

        let result = Self::event_loop(&mut terminal, &mut model);

        if paste_enabled {
            let _ = execute!(stdout(), DisableBracketedPaste);
        }
        ratatui::restore();
        result
    }

    pub(super) fn read_initial_content(&self) -> Result<String> {
        let Some(path) = &self.file_path else {
            return Ok(String::new());
        };
        if !path.exists() {
            tracing::info!(path = %path.display(), "starting new file");
            return Ok(String::new());
        }
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                Self::dispatch(&event::read()?, model);
                needs_render = true;

                // Coalesce key repeat bursts and pastes into a single render.
                while event::poll(Duration::from_millis(0))? {
                    Self::dispatch(&event::read()?, model);
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(event: &event::Event, model: &mut Model) {
        if let Some(msg) = input::handle_event(event) {
            tracing::trace!(?msg, "message");
            let side_msg = msg.clone();
            *model = update(std::mem::take(model), msg);
            Self::handle_message_side_effects(model, &side_msg);
        }
    }
}

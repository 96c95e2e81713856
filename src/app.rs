use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::controller::Game;
use crate::session::{ClickOutcome, Status};
use crate::ui::layout::AppLayout;

/// Upper bound on characters kept in the point input
const MAX_INPUT_LEN: usize = 12;

/// A clicked target still fading out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fade {
    pub id: u32,
    pub remaining: Duration,
}

/// Interactive state around the game: input box, notice, animations
pub struct App {
    pub game: Game,
    pub input: String,
    /// Blocking validation message, if one is showing
    pub notice: Option<String>,
    pub fades: Vec<Fade>,
    pub fade_duration: Duration,
    /// Last known terminal area, used to recompute the layout for mouse hits
    pub viewport: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(game: Game, fade_duration: Duration) -> Self {
        Self {
            game,
            input: String::new(),
            notice: None,
            fades: Vec::new(),
            fade_duration,
            viewport: Rect::default(),
            should_quit: false,
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::new(self.viewport)
    }

    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    /// Text for the status line
    pub fn status_label(&self) -> String {
        self.status()
            .unwrap_or(Status::Playing)
            .to_string()
    }

    pub fn status(&self) -> Option<Status> {
        self.game.session().map(|s| s.status())
    }

    /// Start a round from the current input; failures raise the notice
    pub fn play(&mut self) {
        let area = self.layout().play_area();
        match self.game.start(&self.input, area) {
            Ok(_) => self.fades.clear(),
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    pub fn click_target(&mut self, id: u32) -> ClickOutcome {
        let outcome = self.game.click(id);
        if matches!(outcome, ClickOutcome::Hit | ClickOutcome::Cleared) {
            self.fades.push(Fade {
                id,
                remaining: self.fade_duration,
            });
        }
        outcome
    }

    pub fn on_tick(&mut self, generation: u64) -> bool {
        self.game.on_tick(generation)
    }

    /// Advance fade animations. Returns true if anything is still animating.
    pub fn on_frame(&mut self, dt: Duration) -> bool {
        for fade in &mut self.fades {
            fade.remaining = fade.remaining.saturating_sub(dt);
        }
        self.fades.retain(|f| !f.remaining.is_zero());
        !self.fades.is_empty()
    }

    pub fn fade_for(&self, id: u32) -> Option<&Fade> {
        self.fades.iter().find(|f| f.id == id)
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if self.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.notice = None;
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Enter => self.play(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                if self.input.chars().count() < MAX_INPUT_LEN {
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.notice.is_some() {
            self.notice = None;
            return;
        }

        let layout = self.layout();
        if layout.on_play_button(mouse.column, mouse.row) {
            self.play();
            return;
        }

        let hit = self
            .game
            .session()
            .and_then(|s| layout.target_at(s, mouse.column, mouse.row));
        if let Some(id) = hit {
            self.click_target(id);
        }
    }
}

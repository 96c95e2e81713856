use std::num::NonZeroU32;

use unicode_width::UnicodeWidthStr;

use crate::positions::{Position, PositionGenerator};

/// Milliseconds added to the clock per timer firing
pub const TICK_MS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Status {
    #[strum(to_string = "LET'S PLAY")]
    Playing,
    #[strum(to_string = "ALL CLEARED")]
    Cleared,
    #[strum(to_string = "GAME OVER")]
    Over,
}

/// Result of feeding one click into a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Session was not playing, nothing changed
    Ignored,
    /// Correct target, more remain
    Hit,
    /// Correct target and it was the last one
    Cleared,
    /// Wrong target, the round is over
    Missed { expected: u32 },
}

/// Visible region targets are placed in, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayArea {
    pub width: u16,
    pub height: u16,
}

impl PlayArea {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub fn target_label(id: u32) -> String {
    format!("({id})")
}

/// Cell footprint shared by every target of a round, sized for the widest label
pub fn target_size(count: u32) -> (u16, u16) {
    (target_label(count).width() as u16, 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: u32,
    pub position: Position,
    /// Higher renders on top; target 1 has the highest value
    pub z_index: u32,
    pub clicked: bool,
}

/// One round of the game. A fresh value is built for every start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    targets: Vec<Target>,
    area: PlayArea,
    target_size: (u16, u16),
    next_expected: u32,
    status: Status,
    elapsed_ms: u64,
}

impl Session {
    pub fn new(count: NonZeroU32, area: PlayArea, positions: &mut dyn PositionGenerator) -> Self {
        let count = count.get();
        let target_size = target_size(count);
        let max_x = area.width.saturating_sub(target_size.0);
        let max_y = area.height.saturating_sub(target_size.1);

        let targets = (1..=count)
            .map(|id| Target {
                id,
                position: positions.place(max_x, max_y),
                z_index: count - id + 1,
                clicked: false,
            })
            .collect();

        Self {
            targets,
            area,
            target_size,
            next_expected: 1,
            status: Status::Playing,
            elapsed_ms: 0,
        }
    }

    pub fn click(&mut self, id: u32) -> ClickOutcome {
        if self.status != Status::Playing {
            return ClickOutcome::Ignored;
        }

        if id != self.next_expected {
            self.status = Status::Over;
            return ClickOutcome::Missed {
                expected: self.next_expected,
            };
        }

        // next_expected never exceeds count while playing
        self.targets[(id - 1) as usize].clicked = true;
        self.next_expected += 1;

        if self.next_expected > self.count() {
            self.status = Status::Cleared;
            ClickOutcome::Cleared
        } else {
            ClickOutcome::Hit
        }
    }

    /// Add `ms` to the clock. Returns false once the round has ended.
    pub fn advance(&mut self, ms: u64) -> bool {
        if self.status != Status::Playing {
            return false;
        }
        self.elapsed_ms += ms;
        true
    }

    pub fn count(&self) -> u32 {
        self.targets.len() as u32
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn target(&self, id: u32) -> Option<&Target> {
        id.checked_sub(1)
            .and_then(|idx| self.targets.get(idx as usize))
    }

    /// Targets still on the board
    pub fn visible_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| !t.clicked)
    }

    pub fn area(&self) -> PlayArea {
        self.area
    }

    pub fn target_size(&self) -> (u16, u16) {
        self.target_size
    }

    pub fn next_expected(&self) -> u32 {
        self.next_expected
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_finished(&self) -> bool {
        self.status != Status::Playing
    }
}

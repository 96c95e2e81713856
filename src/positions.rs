use rand::{rngs::StdRng, Rng, SeedableRng};

/// Cell offset of a target inside the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl From<(u16, u16)> for Position {
    fn from(v: (u16, u16)) -> Self {
        Position { x: v.0, y: v.1 }
    }
}

/// Source of target positions. Bounds are inclusive.
pub trait PositionGenerator: Send {
    fn place(&mut self, max_x: u16, max_y: u16) -> Position;
}

/// Uniform random placement, reproducible when seeded
#[derive(Debug, Clone)]
pub struct RandomPositions {
    rng: StdRng,
}

impl RandomPositions {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Default for RandomPositions {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PositionGenerator for RandomPositions {
    fn place(&mut self, max_x: u16, max_y: u16) -> Position {
        Position {
            x: self.rng.gen_range(0..=max_x),
            y: self.rng.gen_range(0..=max_y),
        }
    }
}

/// Replays a fixed list of positions, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedPositions {
    script: Vec<Position>,
    next: usize,
}

impl ScriptedPositions {
    pub fn new(script: Vec<Position>) -> Self {
        Self { script, next: 0 }
    }
}

impl PositionGenerator for ScriptedPositions {
    fn place(&mut self, max_x: u16, max_y: u16) -> Position {
        if self.script.is_empty() {
            return Position::default();
        }
        let p = self.script[self.next % self.script.len()];
        self.next += 1;
        Position {
            x: p.x.min(max_x),
            y: p.y.min(max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_positions_stay_in_bounds() {
        let mut gen = RandomPositions::new(Some(7));
        for _ in 0..500 {
            let p = gen.place(30, 10);
            assert!(p.x <= 30);
            assert!(p.y <= 10);
        }
    }

    #[test]
    fn random_positions_zero_bounds() {
        let mut gen = RandomPositions::new(Some(1));
        assert_eq!(gen.place(0, 0), Position::new(0, 0));
    }

    #[test]
    fn seeded_positions_are_reproducible() {
        let mut a = RandomPositions::new(Some(42));
        let mut b = RandomPositions::new(Some(42));
        let xs: Vec<Position> = (0..20).map(|_| a.place(100, 40)).collect();
        let ys: Vec<Position> = (0..20).map(|_| b.place(100, 40)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn scripted_positions_cycle_and_clamp() {
        let mut gen = ScriptedPositions::new(vec![(1, 2).into(), (50, 50).into()]);
        assert_eq!(gen.place(10, 10), Position::new(1, 2));
        assert_eq!(gen.place(10, 10), Position::new(10, 10));
        assert_eq!(gen.place(10, 10), Position::new(1, 2));
    }

    #[test]
    fn scripted_positions_empty_script() {
        let mut gen = ScriptedPositions::new(vec![]);
        assert_eq!(gen.place(5, 5), Position::default());
    }
}

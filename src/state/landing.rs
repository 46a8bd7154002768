// Decorative landing board: random tiles, burst reveals and hint bubbles.
use std::collections::HashSet;

pub const LANDING_ROWS: usize = 30;
pub const LANDING_COLS: usize = 40;
const INITIAL_REVEALED: usize = 15;

pub const HINTS: [&str; 5] = [
    "Watch out for bombs!",
    "Diamonds are hidden deep!",
    "Click tiles to reveal.",
    "Go deeper for more rewards!",
    "Gridy is full of surprises!",
];

/// (row, col) cells spelling the title across the middle of the board.
const TITLE_CELLS: [(usize, usize); 57] = [
    // G
    (10, 10), (10, 11), (10, 12), (10, 13), (11, 10), (12, 10), (13, 10), (14, 10),
    (15, 10), (15, 11), (15, 12), (15, 13), (14, 13), (13, 13), (13, 12),
    // R
    (10, 15), (11, 15), (12, 15), (13, 15), (14, 15), (15, 15), (14, 16), (15, 17),
    (10, 16), (11, 17), (12, 17), (13, 16),
    // I
    (10, 19), (11, 19), (12, 19), (13, 19), (14, 19), (15, 19),
    // D
    (10, 21), (11, 21), (12, 21), (13, 21), (14, 21), (15, 21), (10, 22), (10, 23),
    (11, 24), (12, 24), (13, 24), (14, 24), (15, 23), (15, 22),
    // Y
    (13, 28), (14, 27), (15, 26), (12, 28), (11, 28), (10, 28), (10, 26), (11, 26),
    (12, 26), (12, 27),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LandingTile {
    Bomb,
    Diamond,
    Empty,
}

impl LandingTile {
    fn roll(r: f64) -> Self {
        if r < 0.1 {
            LandingTile::Bomb
        } else if r < 0.25 {
            LandingTile::Diamond
        } else {
            LandingTile::Empty
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            LandingTile::Bomb => "bomb",
            LandingTile::Diamond => "diamond",
            LandingTile::Empty => "empty",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LandingBoard {
    pub tiles: Vec<LandingTile>,
    pub revealed: HashSet<usize>,
}

impl LandingBoard {
    /// Rolls every tile and pre-reveals a handful of random ones.
    pub fn new(rng: &mut impl FnMut() -> f64) -> Self {
        let n = LANDING_ROWS * LANDING_COLS;
        let tiles = (0..n).map(|_| LandingTile::roll(rng())).collect();
        let mut revealed = HashSet::with_capacity(INITIAL_REVEALED);
        while revealed.len() < INITIAL_REVEALED {
            revealed.insert(pick(rng(), n));
        }
        Self { tiles, revealed }
    }

    pub fn is_revealed(&self, idx: usize) -> bool {
        self.revealed.contains(&idx)
    }

    /// Reveals `idx` and a random burst around it. Returns the newly revealed cells.
    pub fn reveal_burst(&mut self, idx: usize, rng: &mut impl FnMut() -> f64) -> Vec<usize> {
        if idx >= self.tiles.len() {
            return Vec::new();
        }
        let row = (idx / LANDING_COLS) as i64;
        let col = (idx % LANDING_COLS) as i64;
        let radius: i64 = if rng() < 0.4 {
            1
        } else if rng() < 0.5 {
            2
        } else {
            3
        };
        let mut hit = vec![idx];
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if rng() < 0.7 {
                    let (r, c) = (row + dr, col + dc);
                    if in_bounds(r, c) {
                        hit.push(r as usize * LANDING_COLS + c as usize);
                    }
                }
            }
        }
        hit.into_iter().filter(|&i| self.revealed.insert(i)).collect()
    }
}

pub fn random_hint(r: f64) -> &'static str {
    HINTS[pick(r, HINTS.len())]
}

pub fn is_title_cell(row: usize, col: usize) -> bool {
    TITLE_CELLS.contains(&(row, col))
}

fn in_bounds(r: i64, c: i64) -> bool {
    r >= 0 && c >= 0 && (r as usize) < LANDING_ROWS && (c as usize) < LANDING_COLS
}

fn pick(r: f64, n: usize) -> usize {
    ((r * n as f64).floor() as usize).min(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic sequence in [0, 1).
    fn lcg(seed: u64) -> impl FnMut() -> f64 {
        let mut s = seed;
        move || {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (s >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    #[test]
    fn board_has_full_grid_and_initial_reveals() {
        let board = LandingBoard::new(&mut lcg(7));
        assert_eq!(board.tiles.len(), LANDING_ROWS * LANDING_COLS);
        assert_eq!(board.revealed.len(), INITIAL_REVEALED);
        assert!(board.revealed.iter().all(|&i| i < board.tiles.len()));
    }

    #[test]
    fn tile_roll_thresholds() {
        assert_eq!(LandingTile::roll(0.05), LandingTile::Bomb);
        assert_eq!(LandingTile::roll(0.2), LandingTile::Diamond);
        assert_eq!(LandingTile::roll(0.25), LandingTile::Empty);
    }

    #[test]
    fn burst_in_a_corner_stays_on_the_board() {
        let mut board = LandingBoard::new(&mut lcg(1));
        board.revealed.clear();
        // Always radius 1, every neighbour taken.
        let mut zeros = || 0.0;
        let mut got = board.reveal_burst(0, &mut zeros);
        got.sort();
        assert_eq!(got, vec![0, 1, LANDING_COLS, LANDING_COLS + 1]);
    }

    #[test]
    fn burst_always_reveals_the_clicked_tile() {
        let mut board = LandingBoard::new(&mut lcg(3));
        let target = LANDING_ROWS * LANDING_COLS - 1;
        board.revealed.remove(&target);
        let mut ones = || 0.99;
        let got = board.reveal_burst(target, &mut ones);
        assert_eq!(got, vec![target]);
        assert!(board.is_revealed(target));
    }

    #[test]
    fn hints_and_title() {
        assert_eq!(random_hint(0.0), HINTS[0]);
        assert_eq!(random_hint(0.999), HINTS[4]);
        assert!(is_title_cell(10, 10));
        assert!(!is_title_cell(0, 0));
    }
}

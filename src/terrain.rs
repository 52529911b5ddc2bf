use crate::model::{PLAY_HEIGHT, PLAY_WIDTH};
use crate::rng::SessionRng;

pub(crate) const BASELINE_TOP: i32 = 2;
pub(crate) const BASELINE_BOTTOM: i32 = PLAY_HEIGHT as i32 - 2;

/// Narrowest passable gap (in rows) any emitted column may have.
pub(crate) const MIN_GAP: i32 = 5;

// Drift is only allowed while the rightmost value stays inside (3, H-3).
const DRIFT_LOW: i32 = 3;
const DRIFT_HIGH: i32 = PLAY_HEIGHT as i32 - 3;

/// The two random draws taken for one scroll step. The treasure spawn
/// reuses them so it lands inside the freshly emitted gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Draws {
    pub(crate) c1: f32,
    pub(crate) c2: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Drift {
    /// Toward the top of the screen (row value decreases).
    Up,
    /// Toward the bottom of the screen (row value increases).
    Down,
    Flat,
}

impl Drift {
    fn delta(self) -> i32 {
        match self {
            Drift::Up => -1,
            Drift::Down => 1,
            Drift::Flat => 0,
        }
    }

    fn pick(choice: f32, down_below: f32, last: i32) -> Self {
        if choice < down_below && last < DRIFT_HIGH {
            Drift::Down
        } else if choice > 0.6 && last > DRIFT_LOW {
            Drift::Up
        } else {
            Drift::Flat
        }
    }
}

/// Sliding window over an endless corridor. Index 0 is the oldest column,
/// about to scroll off; the last index is the newest.
///
/// Column `c` is passable on rows `top[c] < row <= bottom[c]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Terrain {
    top: [i32; PLAY_WIDTH],
    bottom: [i32; PLAY_WIDTH],
}

impl Terrain {
    pub(crate) fn flat() -> Self {
        Self {
            top: [BASELINE_TOP; PLAY_WIDTH],
            bottom: [BASELINE_BOTTOM; PLAY_WIDTH],
        }
    }

    pub(crate) fn top(&self) -> &[i32; PLAY_WIDTH] {
        &self.top
    }

    pub(crate) fn bottom(&self) -> &[i32; PLAY_WIDTH] {
        &self.bottom
    }

    pub(crate) fn top_last(&self) -> i32 {
        self.top[PLAY_WIDTH - 1]
    }

    pub(crate) fn bottom_last(&self) -> i32 {
        self.bottom[PLAY_WIDTH - 1]
    }

    /// True when `row` is inside rock for column `col`.
    pub(crate) fn is_solid(&self, col: usize, row: i32) -> bool {
        row <= self.top[col] || row > self.bottom[col]
    }

    /// Scrolls one column and emits a new rightmost column.
    pub(crate) fn advance(&mut self, rng: &mut SessionRng) -> Draws {
        let draws = Draws {
            c1: rng.next_f32(),
            c2: rng.next_f32(),
        };
        let (top_drift, bottom_drift) = self.drifts(draws);
        shift_append(&mut self.top, top_drift);
        shift_append(&mut self.bottom, bottom_drift);
        draws
    }

    fn drifts(&self, draws: Draws) -> (Drift, Drift) {
        let top = self.top_last();
        let bottom = self.bottom_last();

        // The bottom edge climbs less readily than the top edge sinks.
        let top_drift = Drift::pick(draws.c1, 0.4, top);
        let bottom_drift = Drift::pick(draws.c2, 0.3, bottom);

        let next_gap = (bottom + bottom_drift.delta()) - (top + top_drift.delta());
        if top + MIN_GAP >= bottom || next_gap < MIN_GAP {
            return (Drift::Up, Drift::Down);
        }
        (top_drift, bottom_drift)
    }

    #[cfg(test)]
    pub(crate) fn from_edges(top: [i32; PLAY_WIDTH], bottom: [i32; PLAY_WIDTH]) -> Self {
        Self { top, bottom }
    }
}

fn shift_append(edge: &mut [i32; PLAY_WIDTH], drift: Drift) {
    let last = edge[PLAY_WIDTH - 1];
    edge.copy_within(1.., 0);
    edge[PLAY_WIDTH - 1] = last + drift.delta();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_terrain_is_baseline() {
        let t = Terrain::flat();
        assert!(t.top().iter().all(|&v| v == BASELINE_TOP));
        assert!(t.bottom().iter().all(|&v| v == BASELINE_BOTTOM));
    }

    #[test]
    fn advance_scrolls_left_and_appends_one_column() {
        let mut top = [BASELINE_TOP; PLAY_WIDTH];
        let mut bottom = [BASELINE_BOTTOM; PLAY_WIDTH];
        for c in 0..PLAY_WIDTH {
            top[c] = 2 + (c as i32 % 3);
            bottom[c] = 20 + (c as i32 % 2);
        }
        let mut t = Terrain::from_edges(top, bottom);
        let mut rng = SessionRng::new(3);
        t.advance(&mut rng);

        assert_eq!(&t.top()[..PLAY_WIDTH - 1], &top[1..]);
        assert_eq!(&t.bottom()[..PLAY_WIDTH - 1], &bottom[1..]);
        assert!((t.top_last() - top[PLAY_WIDTH - 1]).abs() <= 1);
        assert!((t.bottom_last() - bottom[PLAY_WIDTH - 1]).abs() <= 1);
    }

    #[test]
    fn drift_thresholds_follow_draws() {
        let t = Terrain::flat();
        // top at 2 cannot rise further; bottom at 23 cannot sink further
        assert_eq!(t.drifts(Draws { c1: 0.1, c2: 0.9 }), (Drift::Down, Drift::Up));
        assert_eq!(t.drifts(Draws { c1: 0.9, c2: 0.1 }), (Drift::Flat, Drift::Flat));
        assert_eq!(t.drifts(Draws { c1: 0.5, c2: 0.5 }), (Drift::Flat, Drift::Flat));

        // asymmetric: 0.35 sinks the top edge but leaves the bottom edge alone
        let mid = Terrain::from_edges([8; PLAY_WIDTH], [18; PLAY_WIDTH]);
        assert_eq!(
            mid.drifts(Draws { c1: 0.35, c2: 0.35 }),
            (Drift::Down, Drift::Flat)
        );
        assert_eq!(
            mid.drifts(Draws { c1: 0.7, c2: 0.25 }),
            (Drift::Up, Drift::Down)
        );
    }

    #[test]
    fn overlap_guard_forces_widening() {
        let tight = Terrain::from_edges([10; PLAY_WIDTH], [15; PLAY_WIDTH]);
        for &(c1, c2) in &[(0.1, 0.9), (0.5, 0.5), (0.9, 0.1)] {
            assert_eq!(tight.drifts(Draws { c1, c2 }), (Drift::Up, Drift::Down));
        }
    }

    #[test]
    fn guard_catches_double_narrowing_at_gap_six() {
        let t = Terrain::from_edges([10; PLAY_WIDTH], [16; PLAY_WIDTH]);
        assert_eq!(t.drifts(Draws { c1: 0.1, c2: 0.9 }), (Drift::Up, Drift::Down));
        // a single narrowing step still leaves five rows
        assert_eq!(t.drifts(Draws { c1: 0.1, c2: 0.5 }), (Drift::Down, Drift::Flat));
    }

    #[test]
    fn long_run_keeps_length_and_gap() {
        let mut t = Terrain::flat();
        let mut rng = SessionRng::new(0xC0FFEE);
        for _ in 0..20_000 {
            t.advance(&mut rng);
            assert_eq!(t.top().len(), PLAY_WIDTH);
            assert_eq!(t.bottom().len(), PLAY_WIDTH);
            assert!(t.bottom_last() - t.top_last() >= MIN_GAP);
        }
        for c in 0..PLAY_WIDTH {
            assert!(t.bottom()[c] - t.top()[c] >= MIN_GAP);
        }
    }

    #[test]
    fn solid_cells_match_edges() {
        let t = Terrain::flat();
        assert!(t.is_solid(5, 0));
        assert!(t.is_solid(5, 2));
        assert!(!t.is_solid(5, 3));
        assert!(!t.is_solid(5, 23));
        assert!(t.is_solid(5, 24));
    }
}

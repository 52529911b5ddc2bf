use crate::model::{Position, Treasure, PLAY_WIDTH};
use crate::terrain::{Draws, Terrain};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TreasureStep {
    Spawned,
    Scrolled,
    Missed,
    Idle,
}

impl Treasure {
    /// One tick of the treasure slot, run right after the terrain scrolled.
    /// `countdown` is reset to `spawn_period` when a new treasure appears.
    pub(crate) fn advance(
        &mut self,
        terrain: &Terrain,
        draws: Draws,
        countdown: &mut i32,
        spawn_period: i32,
    ) -> TreasureStep {
        if *countdown <= 0 {
            self.pos = Position::new(PLAY_WIDTH as i32 - 1, spawn_row(terrain, draws));
            self.visible = true;
            *countdown = spawn_period;
            return TreasureStep::Spawned;
        }
        if !self.visible {
            return TreasureStep::Idle;
        }
        if self.pos.col == 0 {
            self.visible = false;
            TreasureStep::Missed
        } else {
            self.pos.col -= 1;
            TreasureStep::Scrolled
        }
    }

    /// Collects the treasure if it sits on `at`.
    pub(crate) fn take_at(&mut self, at: Position) -> bool {
        if self.visible && self.pos == at {
            self.visible = false;
            return true;
        }
        false
    }
}

/// A row inside the newest column's gap, biased by the same draws that
/// shaped that column.
fn spawn_row(terrain: &Terrain, draws: Draws) -> i32 {
    let top = terrain.top_last();
    let bottom = terrain.bottom_last();
    let t = (draws.c1 + draws.c2) / 2.0;
    let offset = (t * (bottom - top) as f32).round() as i32;
    (top + 1 + offset).min(bottom)
}

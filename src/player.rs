use crate::model::{Player, PLAY_HEIGHT, PLAY_WIDTH};
use crate::terrain::Terrain;

impl Player {
    /// Applies this tick's net movement, clamps to the play area and tests
    /// the resulting cell against the terrain. Returns whether the player
    /// is still alive.
    pub(crate) fn clamp_and_collide(&mut self, dx: i32, dy: i32, terrain: &Terrain) -> bool {
        self.pos.col = (self.pos.col + dx).clamp(0, PLAY_WIDTH as i32 - 1);
        self.pos.row = (self.pos.row + dy).clamp(0, PLAY_HEIGHT as i32 - 1);

        if terrain.is_solid(self.pos.col as usize, self.pos.row) {
            self.alive = false;
        }
        self.alive
    }
}

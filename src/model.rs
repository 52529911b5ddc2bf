pub(crate) const PLAY_WIDTH: usize = 60;
pub(crate) const PLAY_HEIGHT: usize = 25;

pub(crate) const SPAWN_CELL: Position = Position {
    col: 10,
    row: PLAY_HEIGHT as i32 / 2,
};

/// Cell in play-area coordinates. Row 0 is the top of the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Position {
    pub(crate) col: i32,
    pub(crate) row: i32,
}

impl Position {
    pub(crate) fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Player {
    pub(crate) pos: Position,
    pub(crate) alive: bool,
}

impl Player {
    pub(crate) fn spawn() -> Self {
        Self {
            pos: SPAWN_CELL,
            alive: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Treasure {
    pub(crate) pos: Position,
    pub(crate) visible: bool,
}

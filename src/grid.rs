use thiserror::Error;

/// One cell of the maze matrix.
///
/// `Player` and `Exit` appear in the matrix for rendering, but the
/// authoritative player/exit locations are the coordinates stored on
/// [`Grid`]: the exit cell keeps its marker even while the player stands
/// on it, so arrival is detected by coordinate equality.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Wall,
    Open,
    Player,
    Exit,
    /// Trail left behind the player. Never present in source layouts.
    Visited,
}

impl Cell {
    fn from_symbol(ch: char) -> Option<Cell> {
        match ch {
            '#' => Some(Cell::Wall),
            ' ' => Some(Cell::Open),
            'P' => Some(Cell::Player),
            'E' => Some(Cell::Exit),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Open => ' ',
            Cell::Player => 'P',
            Cell::Exit => 'E',
            Cell::Visited => '.',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Fixed expansion order; hint ties resolve in this order.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }

    pub fn from_delta(dr: isize, dc: isize) -> Option<Dir> {
        match (dr, dc) {
            (-1, 0) => Some(Dir::Up),
            (1, 0) => Some(Dir::Down),
            (0, -1) => Some(Dir::Left),
            (0, 1) => Some(Dir::Right),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dir::Up => "Up",
            Dir::Down => "Down",
            Dir::Left => "Left",
            Dir::Right => "Right",
        }
    }
}

/// Fatal load-time configuration errors. Rejected moves and missing hint
/// paths are normal outcomes, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("level catalog is empty")]
    EmptyCatalog,
    #[error("layout has no player start marker")]
    MissingPlayer,
    #[error("layout has more than one player start marker")]
    DuplicatePlayer,
    #[error("layout has no exit marker")]
    MissingExit,
    #[error("layout has more than one exit marker")]
    DuplicateExit,
    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
}

/// The maze for one level: a rectangular cell matrix plus the player and
/// exit coordinates, both in (row, column) order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    rows: usize,
    cols: usize,
    player: (usize, usize),
    exit: (usize, usize),
}

impl Grid {
    /// Builds a grid from text rows. Rows may differ in length; short rows
    /// are right-padded with walls. Exactly one `P` and one `E` marker are
    /// required.
    pub fn load<S: AsRef<str>>(layout: &[S]) -> Result<Grid, LevelError> {
        let rows = layout.len();
        let cols = layout
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        let mut cells = Vec::with_capacity(rows);
        let mut player = None;
        let mut exit = None;

        for (r, row) in layout.iter().enumerate() {
            let mut line = Vec::with_capacity(cols);
            for (c, ch) in row.as_ref().chars().enumerate() {
                let cell = Cell::from_symbol(ch)
                    .ok_or(LevelError::UnknownSymbol { row: r, col: c, symbol: ch })?;
                match cell {
                    Cell::Player => {
                        if player.replace((r, c)).is_some() {
                            return Err(LevelError::DuplicatePlayer);
                        }
                    }
                    Cell::Exit => {
                        if exit.replace((r, c)).is_some() {
                            return Err(LevelError::DuplicateExit);
                        }
                    }
                    _ => {}
                }
                line.push(cell);
            }
            line.resize(cols, Cell::Wall);
            cells.push(line);
        }

        Ok(Grid {
            cells,
            rows,
            cols,
            player: player.ok_or(LevelError::MissingPlayer)?,
            exit: exit.ok_or(LevelError::MissingExit)?,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn player(&self) -> (usize, usize) {
        self.player
    }

    pub fn exit(&self) -> (usize, usize) {
        self.exit
    }

    pub fn cell(&self, r: usize, c: usize) -> Cell {
        self.cells[r][c]
    }

    /// True iff `(r, c)` is in bounds and not a wall. Out of bounds is a
    /// normal false result.
    pub fn is_walkable(&self, r: isize, c: isize) -> bool {
        if r < 0 || c < 0 {
            return false;
        }
        let (r, c) = (r as usize, c as usize);
        if r >= self.rows || c >= self.cols {
            return false;
        }
        self.cells[r][c] != Cell::Wall
    }

    /// Attempts a one-cell move. Returns false and leaves everything
    /// untouched when the target is blocked or out of bounds. On success
    /// the vacated cell becomes `Visited` and the target becomes `Player`
    /// unless it is the exit, whose marker is preserved.
    pub fn move_player(&mut self, dir: Dir) -> bool {
        let (dr, dc) = dir.delta();
        let (r, c) = self.player;
        let nr = r as isize + dr;
        let nc = c as isize + dc;
        if !self.is_walkable(nr, nc) {
            return false;
        }
        let (nr, nc) = (nr as usize, nc as usize);

        if self.cells[r][c] == Cell::Player {
            self.cells[r][c] = Cell::Visited;
        }
        if self.cells[nr][nc] != Cell::Exit {
            self.cells[nr][nc] = Cell::Player;
        }
        self.player = (nr, nc);
        true
    }

    pub fn at_exit(&self) -> bool {
        self.player == self.exit
    }
}

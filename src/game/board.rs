//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::StateKey;

/// Number of rows on the MiniChess board
pub const BOARD_ROWS: usize = 4;
/// Number of columns on the MiniChess board
pub const BOARD_COLS: usize = 4;
/// Total number of cells, the length of a serialized state
pub const BOARD_CELLS: usize = BOARD_ROWS * BOARD_COLS;

/// One of the two opposing sides.
///
/// White owns the positive piece codes and starts on rows 0-1, Black owns the
/// negative codes and starts on rows 2-3. White moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Get the opposing side
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Sign carried by this side's piece codes
    pub fn sign(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Row direction this side's pawns advance in
    pub fn forward(self) -> isize {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// The three piece types of the variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    King,
}

impl PieceKind {
    /// Unsigned piece code (pawn = 1, rook = 5, king = 6)
    pub fn code(self) -> i8 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Rook => 5,
            PieceKind::King => 6,
        }
    }

    fn from_code(code: i8) -> Option<PieceKind> {
        match code {
            1 => Some(PieceKind::Pawn),
            5 => Some(PieceKind::Rook),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::King => 'K',
        }
    }
}

/// A piece owned by a side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }

    /// Signed piece code; the sign encodes the owning side.
    pub fn code(self) -> i8 {
        self.kind.code() * self.side.sign()
    }

    /// Decode a signed piece code. Zero and unknown codes yield `None`.
    pub fn from_code(code: i8) -> Option<Piece> {
        let side = if code > 0 { Side::White } else { Side::Black };
        PieceKind::from_code(code.checked_abs()?).map(|kind| Piece { kind, side })
    }

    /// Upper-case for White, lower-case for Black
    pub fn to_char(self) -> char {
        match self.side {
            Side::White => self.kind.symbol(),
            Side::Black => self.kind.symbol().to_ascii_lowercase(),
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'R' => PieceKind::Rook,
            'K' => PieceKind::King,
            _ => return None,
        };
        Some(Piece { kind, side })
    }
}

/// A cell coordinate, always on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    row: usize,
    col: usize,
}

impl Square {
    /// Create a square, returning `None` when it falls off the board.
    pub fn new(row: usize, col: usize) -> Option<Square> {
        (row < BOARD_ROWS && col < BOARD_COLS).then_some(Square { row, col })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major index (0-15)
    pub fn index(self) -> usize {
        self.row * BOARD_COLS + self.col
    }

    /// Step by a signed offset, staying on the board.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Square> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Square::new(row, col)
    }

    /// All squares in row-major order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLS).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A move from an origin square to a destination square.
///
/// Whether a move is legal depends on the board and the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// The 4x4 grid of pieces.
///
/// `Board` is `Copy` so move simulation works on an independent value and
/// never touches the live game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_COLS]; BOARD_ROWS],
}

impl Board {
    /// A board with no pieces
    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_COLS]; BOARD_ROWS],
        }
    }

    /// The fixed starting layout.
    ///
    /// ```text
    /// row 0: R K . .
    /// row 1: P . . .
    /// row 2: . . . p
    /// row 3: . . k r
    /// ```
    pub fn initial() -> Self {
        let mut board = Board::empty();
        board.cells[0][0] = Some(Piece::new(PieceKind::Rook, Side::White));
        board.cells[0][1] = Some(Piece::new(PieceKind::King, Side::White));
        board.cells[1][0] = Some(Piece::new(PieceKind::Pawn, Side::White));
        board.cells[2][3] = Some(Piece::new(PieceKind::Pawn, Side::Black));
        board.cells[3][2] = Some(Piece::new(PieceKind::King, Side::Black));
        board.cells[3][3] = Some(Piece::new(PieceKind::Rook, Side::Black));
        board
    }

    /// Build a board from signed piece codes, row-major.
    ///
    /// Returns `None` if any code is not 0, ±1, ±5 or ±6.
    pub fn from_codes(codes: [[i8; BOARD_COLS]; BOARD_ROWS]) -> Option<Self> {
        let mut board = Board::empty();
        for square in Square::all() {
            let code = codes[square.row][square.col];
            if code != 0 {
                board.set(square, Some(Piece::from_code(code)?));
            }
        }
        Some(board)
    }

    /// Signed piece codes, row-major (0 for empty)
    pub fn codes(&self) -> [[i8; BOARD_COLS]; BOARD_ROWS] {
        let mut codes = [[0; BOARD_COLS]; BOARD_ROWS];
        for (square, piece) in self.pieces() {
            codes[square.row][square.col] = piece.code();
        }
        codes
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row][square.col]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row][square.col] = piece;
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.get(square).map(|piece| (square, piece)))
    }

    /// Whether `side` still has its king on the board
    pub fn has_king(&self, side: Side) -> bool {
        self.pieces()
            .any(|(_, piece)| piece == Piece::new(PieceKind::King, side))
    }

    /// Relocate the moving piece, overwriting whatever sat on the destination.
    ///
    /// Returns the captured piece, if any. No legality check is made here.
    pub fn apply_move(&mut self, mv: Move) -> Option<Piece> {
        let moving = self.get(mv.from);
        let captured = self.get(mv.to);
        self.set(mv.to, moving);
        self.set(mv.from, None);
        captured
    }

    /// The board that results from `mv`, leaving `self` unchanged.
    #[must_use = "with_move returns a new board; the original is unchanged"]
    pub fn with_move(&self, mv: Move) -> Board {
        let mut next = *self;
        next.apply_move(mv);
        next
    }

    /// Serialized form used as the value-table key
    pub fn state_key(&self) -> StateKey {
        StateKey::from(self)
    }

    /// Rebuild the board a state key was serialized from.
    pub fn from_state_key(key: &StateKey) -> Self {
        let mut board = Board::empty();
        for (square, c) in Square::all().zip(key.as_str().chars()) {
            board.set(square, Piece::from_char(c));
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = format!("  {}", "-".repeat(4 * BOARD_COLS + 1));
        writeln!(f, "{}", "=".repeat(4 * BOARD_COLS + 3))?;
        for row in 0..BOARD_ROWS {
            writeln!(f, "{rule}")?;
            write!(f, "{row} |")?;
            for col in 0..BOARD_COLS {
                let symbol = self.cells[row][col].map_or(' ', Piece::to_char);
                write!(f, " {symbol} |")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{rule}")?;
        write!(f, "   ")?;
        for col in 0..BOARD_COLS {
            write!(f, " {col}  ")?;
        }
        writeln!(f)?;
        write!(f, "{}", "=".repeat(4 * BOARD_COLS + 3))
    }
}

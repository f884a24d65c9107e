use chess::{
    Board as ChessBoard, BoardStatus, ChessMove, Color, File, MoveGen, Piece, Rank, Square,
    ALL_COLORS, ALL_PIECES,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;
use std::str::FromStr;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Side a participant plays. Serialized as `"w"` / `"b"` on the wire.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerColor {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl PlayerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerColor::White => "w",
            PlayerColor::Black => "b",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerColor::White => "White",
            PlayerColor::Black => "Black",
        }
    }
}

impl Not for PlayerColor {
    type Output = PlayerColor;

    fn not(self) -> PlayerColor {
        match self {
            PlayerColor::White => PlayerColor::Black,
            PlayerColor::Black => PlayerColor::White,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Color> for PlayerColor {
    fn from(color: Color) -> Self {
        match color {
            Color::White => PlayerColor::White,
            Color::Black => PlayerColor::Black,
        }
    }
}

impl From<PlayerColor> for Color {
    fn from(color: PlayerColor) -> Self {
        match color {
            PlayerColor::White => Color::White,
            PlayerColor::Black => Color::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameOutcome::Checkmate | GameOutcome::Stalemate)
    }
}

/// Thin wrapper over the `chess` crate board. All rule knowledge lives there.
#[derive(Clone, Copy, Debug)]
pub struct Board {
    inner: ChessBoard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            inner: ChessBoard::default(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, String> {
        ChessBoard::from_str(fen.trim())
            .map(|board| Self { inner: board })
            .map_err(|e| e.to_string())
    }

    pub fn to_fen(&self) -> String {
        self.inner.to_string()
    }

    pub fn side_to_move(&self) -> PlayerColor {
        self.inner.side_to_move().into()
    }

    pub fn make_move(&self, mv: ChessMove) -> Self {
        Self {
            inner: self.inner.make_move_new(mv),
        }
    }

    /// Applies `from -> to` for the side to move, promoting pawns to a queen.
    /// Returns `None` when the move is illegal.
    pub fn apply_auto_queen(&self, from: Square, to: Square) -> Option<Self> {
        let promotion = match (self.inner.piece_on(from), to.get_rank()) {
            (Some(Piece::Pawn), Rank::Eighth) | (Some(Piece::Pawn), Rank::First) => {
                Some(Piece::Queen)
            }
            _ => None,
        };
        let mv = ChessMove::new(from, to, promotion);
        if self.inner.legal(mv) {
            Some(self.make_move(mv))
        } else {
            None
        }
    }

    /// Finds the legal move leading from this position to `next`, if one exists.
    pub fn move_reaching(&self, next: &Board) -> Option<ChessMove> {
        MoveGen::new_legal(&self.inner).find(|mv| self.make_move(*mv).same_position(next))
    }

    /// Placement, side to move and castling rights. En passant squares and move
    /// counters are ignored because FEN writers disagree on them.
    pub fn same_position(&self, other: &Board) -> bool {
        let (a, b) = (&self.inner, &other.inner);
        a.side_to_move() == b.side_to_move()
            && a.combined() == b.combined()
            && ALL_COLORS.iter().all(|c| {
                a.color_combined(*c) == b.color_combined(*c)
                    && a.castle_rights(*c) == b.castle_rights(*c)
            })
            && ALL_PIECES.iter().all(|p| a.pieces(*p) == b.pieces(*p))
    }

    pub fn is_check(&self) -> bool {
        self.inner.checkers().popcnt() > 0
    }

    pub fn is_mate(&self) -> bool {
        self.inner.status() == BoardStatus::Checkmate
    }

    pub fn is_game_over(&self) -> bool {
        self.inner.status() != BoardStatus::Ongoing
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.inner.status() {
            BoardStatus::Ongoing if self.is_check() => GameOutcome::Check,
            BoardStatus::Ongoing => GameOutcome::Ongoing,
            BoardStatus::Checkmate => GameOutcome::Checkmate,
            BoardStatus::Stalemate => GameOutcome::Stalemate,
        }
    }

    /// Unicode diagram with `perspective`'s pieces at the bottom.
    pub fn render(&self, perspective: PlayerColor) -> String {
        let ranks: Vec<usize> = match perspective {
            PlayerColor::White => (0..8).rev().collect(),
            PlayerColor::Black => (0..8).collect(),
        };
        let files: Vec<usize> = match perspective {
            PlayerColor::White => (0..8).collect(),
            PlayerColor::Black => (0..8).rev().collect(),
        };

        let mut out = String::new();
        for &rank in &ranks {
            out.push_str(&format!("{} ", rank + 1));
            for &file in &files {
                let square = Square::make_square(Rank::from_index(rank), File::from_index(file));
                let glyph = match (self.inner.piece_on(square), self.inner.color_on(square)) {
                    (Some(piece), Some(color)) => piece_glyph(piece, color),
                    _ if (rank + file) % 2 == 1 => '·',
                    _ => ' ',
                };
                out.push(glyph);
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  ");
        for &file in &files {
            out.push((b'a' + file as u8) as char);
            out.push(' ');
        }
        out.push('\n');
        out
    }

    pub fn as_chess_board(&self) -> &ChessBoard {
        &self.inner
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

fn piece_glyph(piece: Piece, color: Color) -> char {
    match (color, piece) {
        (Color::White, Piece::Pawn) => '♙',
        (Color::White, Piece::Rook) => '♖',
        (Color::White, Piece::Knight) => '♘',
        (Color::White, Piece::Bishop) => '♗',
        (Color::White, Piece::Queen) => '♕',
        (Color::White, Piece::King) => '♔',
        (Color::Black, Piece::Pawn) => '♟',
        (Color::Black, Piece::Rook) => '♜',
        (Color::Black, Piece::Knight) => '♞',
        (Color::Black, Piece::Bishop) => '♝',
        (Color::Black, Piece::Queen) => '♛',
        (Color::Black, Piece::King) => '♚',
    }
}

/// Parses coordinate input such as `e2e4`. A fifth promotion character is
/// accepted and ignored since promotion is always to a queen.
pub fn parse_squares(move_str: &str) -> Result<(Square, Square), String> {
    let move_str = move_str.trim();
    if move_str.is_empty() {
        return Err("Empty move string".to_string());
    }

    if move_str.len() < 4 || move_str.len() > 5 {
        return Err(format!(
            "Invalid move length: {} (expected 4-5 characters)",
            move_str.len()
        ));
    }

    if !move_str.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Invalid characters in move string".to_string());
    }

    let from_str = move_str[0..2].to_ascii_lowercase();
    let to_str = move_str[2..4].to_ascii_lowercase();

    let from = Square::from_str(&from_str)
        .map_err(|_| format!("Invalid 'from' square: {}", from_str))?;
    let to = Square::from_str(&to_str).map_err(|_| format!("Invalid 'to' square: {}", to_str))?;

    Ok((from, to))
}

/// Glyphs: what a single grid cell renders as.
/// Glyph semantics (lethal, pickup, border) are centralized here
/// so the renderer and the movement rules agree on them.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Glyph {
    Empty,
    Corner,
    HLine,
    VLine,
    Wall,
    Gold,
    Player,
}

impl Glyph {
    pub fn as_char(self) -> char {
        match self {
            Glyph::Empty => ' ',
            Glyph::Corner => '+',
            Glyph::HLine => '-',
            Glyph::VLine => '|',
            Glyph::Wall => '=',
            Glyph::Gold => '$',
            Glyph::Player => '0',
        }
    }

    /// Is this part of the fixed border frame?
    pub fn is_border(self) -> bool {
        matches!(self, Glyph::Corner | Glyph::HLine | Glyph::VLine)
    }

    /// Does stepping onto this glyph end the game?
    pub fn is_lethal(self) -> bool {
        matches!(self, Glyph::Wall)
    }

    /// Is this a gold pickup?
    pub fn is_pickup(self) -> bool {
        matches!(self, Glyph::Gold)
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Glyph::Empty
    }
}

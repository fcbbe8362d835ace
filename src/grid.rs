use std::fmt;
use std::str::FromStr;

use itertools::iproduct;

/// A fixed position in the card grid.
///
/// The DOM form of a slot id is `card_<index>`, where `index = row * columns + col`.
/// Grid coordinates are never recovered by parsing this string: ask the [`GridLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct SlotId(u32);

impl SlotId {
    pub const DOM_PREFIX: &'static str = "card_";

    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::DOM_PREFIX, self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSlotIdError {
    pub input: String,
}

impl fmt::Display for ParseSlotIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid slot id {:?} (expected `{}<index>`)",
            self.input,
            SlotId::DOM_PREFIX
        )
    }
}

impl std::error::Error for ParseSlotIdError {}

impl FromStr for SlotId {
    type Err = ParseSlotIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::DOM_PREFIX)
            .and_then(|index| index.parse::<u32>().ok())
            .map(Self)
            .ok_or_else(|| ParseSlotIdError {
                input: s.to_owned(),
            })
    }
}

impl From<SlotId> for String {
    fn from(slot: SlotId) -> Self {
        slot.to_string()
    }
}

impl TryFrom<String> for SlotId {
    type Error = ParseSlotIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Row/column coordinates of a slot. Serialized as `[row, col]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(into = "[u16; 2]", from = "[u16; 2]"))]
pub struct GridPos {
    pub row: u16,
    pub col: u16,
}

impl GridPos {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

impl From<GridPos> for [u16; 2] {
    fn from(pos: GridPos) -> Self {
        [pos.row, pos.col]
    }
}

impl From<[u16; 2]> for GridPos {
    fn from([row, col]: [u16; 2]) -> Self {
        Self { row, col }
    }
}

/// Opaque identifier of a card face, or of a blank.
///
/// A token is blank when its first `:`-separated segment is [`Self::BLANK`]. Several distinct
/// blanks (`Blank:S`, `Blank:H`, ...) may be on the grid at the same time, so the full string is
/// kept and forwarded as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CardToken(String);

impl CardToken {
    pub const BLANK: &'static str = "Blank";

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The plain blank sentinel.
    pub fn blank() -> Self {
        Self(Self::BLANK.to_owned())
    }

    pub fn is_blank(&self) -> bool {
        self.0.split(':').next() == Some(Self::BLANK)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CardToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The fixed grid shape plus a `SlotId → GridPos` lookup table, built once.
#[derive(Clone, Debug)]
pub struct GridLayout {
    rows: u16,
    columns: u16,
    positions: ahash::HashMap<SlotId, GridPos>,
    slots: Vec<SlotId>,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROWS, Self::DEFAULT_COLUMNS)
    }
}

impl GridLayout {
    /// A shuffled 52-card deck is dealt as four rows of thirteen.
    pub const DEFAULT_ROWS: u16 = 4;
    pub const DEFAULT_COLUMNS: u16 = 13;

    pub fn new(rows: u16, columns: u16) -> Self {
        let mut positions = ahash::HashMap::default();
        let mut slots = Vec::with_capacity(usize::from(rows) * usize::from(columns));

        for (row, col) in iproduct!(0..rows, 0..columns) {
            let slot = SlotId::from_index(u32::from(row) * u32::from(columns) + u32::from(col));
            positions.insert(slot, GridPos::new(row, col));
            slots.push(slot);
        }

        Self {
            rows,
            columns,
            positions,
            slots,
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, slot: SlotId) -> bool {
        self.positions.contains_key(&slot)
    }

    pub fn position(&self, slot: SlotId) -> Option<GridPos> {
        self.positions.get(&slot).copied()
    }

    pub fn slot_at(&self, pos: GridPos) -> Option<SlotId> {
        if pos.row >= self.rows || pos.col >= self.columns {
            return None;
        }
        let index = usize::from(pos.row) * usize::from(self.columns) + usize::from(pos.col);
        self.slots.get(index).copied()
    }

    /// All slots in row-major order.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.iter().copied()
    }
}

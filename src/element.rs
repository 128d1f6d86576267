//! Board and inventory element vocabulary

use serde::{Deserialize, Serialize};

/// Total number of element types (also the observation channel count)
pub const NUM_ELEMENTS: usize = 27;

/// First element code in the primitive band
pub const PRIMITIVE_START: u8 = 8;

/// First element code in the craftable band
pub const CRAFTABLE_START: u8 = 15;

/// Number of directly collectible primitive types (iron included)
pub const NUM_PRIMITIVES: usize = 7;

/// Number of craftable item types
pub const NUM_CRAFTABLES: usize = 11;

/// Everything that can occupy a board cell or an inventory slot.
///
/// The discriminant doubles as the observation channel and sprite index,
/// so the ordering here is part of the wire contract. The codes are split
/// into three bands: environment/structure (0-7), primitives (8-14), and
/// craftable items (15-25), with `Empty` as the trailing sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Element {
    Agent = 0,
    Wall = 1,
    Workshop1 = 2,
    Workshop2 = 3,
    Workshop3 = 4,
    Furnace = 5,
    Water = 6,
    Stone = 7,
    Iron = 8,
    Tin = 9,
    Copper = 10,
    Wood = 11,
    Grass = 12,
    Gold = 13,
    Gem = 14,
    BronzeBar = 15,
    Stick = 16,
    Plank = 17,
    Rope = 18,
    Nails = 19,
    BronzeHammer = 20,
    BronzePick = 21,
    Bridge = 22,
    IronPick = 23,
    GoldBar = 24,
    GemRing = 25,
    Empty = 26,
}

impl Element {
    /// Integer code used in board descriptions and snapshots
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Observation/sprite channel index
    pub fn channel(self) -> usize {
        self as usize
    }

    /// Decode an element code, if valid
    pub fn from_code(code: u8) -> Option<Element> {
        match code {
            0 => Some(Element::Agent),
            1 => Some(Element::Wall),
            2 => Some(Element::Workshop1),
            3 => Some(Element::Workshop2),
            4 => Some(Element::Workshop3),
            5 => Some(Element::Furnace),
            6 => Some(Element::Water),
            7 => Some(Element::Stone),
            8 => Some(Element::Iron),
            9 => Some(Element::Tin),
            10 => Some(Element::Copper),
            11 => Some(Element::Wood),
            12 => Some(Element::Grass),
            13 => Some(Element::Gold),
            14 => Some(Element::Gem),
            15 => Some(Element::BronzeBar),
            16 => Some(Element::Stick),
            17 => Some(Element::Plank),
            18 => Some(Element::Rope),
            19 => Some(Element::Nails),
            20 => Some(Element::BronzeHammer),
            21 => Some(Element::BronzePick),
            22 => Some(Element::Bridge),
            23 => Some(Element::IronPick),
            24 => Some(Element::GoldBar),
            25 => Some(Element::GemRing),
            26 => Some(Element::Empty),
            _ => None,
        }
    }

    /// All elements in code order
    pub fn all() -> [Element; NUM_ELEMENTS] {
        [
            Element::Agent,
            Element::Wall,
            Element::Workshop1,
            Element::Workshop2,
            Element::Workshop3,
            Element::Furnace,
            Element::Water,
            Element::Stone,
            Element::Iron,
            Element::Tin,
            Element::Copper,
            Element::Wood,
            Element::Grass,
            Element::Gold,
            Element::Gem,
            Element::BronzeBar,
            Element::Stick,
            Element::Plank,
            Element::Rope,
            Element::Nails,
            Element::BronzeHammer,
            Element::BronzePick,
            Element::Bridge,
            Element::IronPick,
            Element::GoldBar,
            Element::GemRing,
            Element::Empty,
        ]
    }

    /// Directly collectible raw resources.
    ///
    /// Iron is not in this set: it needs a bronze pick and is gated
    /// separately by the interaction rules.
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            Element::Grass
                | Element::Wood
                | Element::Gold
                | Element::Gem
                | Element::Copper
                | Element::Tin
        )
    }

    /// Board cells at which crafting can happen
    pub fn is_workshop(self) -> bool {
        matches!(
            self,
            Element::Workshop1 | Element::Workshop2 | Element::Workshop3 | Element::Furnace
        )
    }

    /// Whether this element may serve as a goal (primitive or craftable band)
    pub fn is_goal(self) -> bool {
        let code = self.code();
        (PRIMITIVE_START..CRAFTABLE_START + NUM_CRAFTABLES as u8).contains(&code)
    }

    /// Single-character board symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Element::Agent => "@",
            Element::Wall => "#",
            Element::Workshop1 => "1",
            Element::Workshop2 => "2",
            Element::Workshop3 => "3",
            Element::Furnace => "F",
            Element::Water => "~",
            Element::Stone => "o",
            Element::Iron => "i",
            Element::Tin => "T",
            Element::Copper => "c",
            Element::Wood => "w",
            Element::Grass => "g",
            Element::Gold => ".",
            Element::Gem => "*",
            Element::BronzeBar => "b",
            Element::Stick => "s",
            Element::Plank => "p",
            Element::Rope => "r",
            Element::Nails => "n",
            Element::BronzeHammer => "h",
            Element::BronzePick => "P",
            Element::Bridge => "=",
            Element::IronPick => "I",
            Element::GoldBar => "G",
            Element::GemRing => "R",
            Element::Empty => " ",
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Element::Agent => "Agent",
            Element::Wall => "Wall",
            Element::Workshop1 => "Workshop1",
            Element::Workshop2 => "Workshop2",
            Element::Workshop3 => "Workshop3",
            Element::Furnace => "Furnace",
            Element::Water => "Water",
            Element::Stone => "Stone",
            Element::Iron => "Iron",
            Element::Tin => "Tin",
            Element::Copper => "Copper",
            Element::Wood => "Wood",
            Element::Grass => "Grass",
            Element::Gold => "Gold",
            Element::Gem => "Gem",
            Element::BronzeBar => "BronzeBar",
            Element::Stick => "Stick",
            Element::Plank => "Plank",
            Element::Rope => "Rope",
            Element::Nails => "Nails",
            Element::BronzeHammer => "BronzeHammer",
            Element::BronzePick => "BronzePick",
            Element::Bridge => "Bridge",
            Element::IronPick => "IronPick",
            Element::GoldBar => "GoldBar",
            Element::GemRing => "GemRing",
            Element::Empty => "Empty",
        }
    }
}

impl From<Element> for u8 {
    fn from(element: Element) -> u8 {
        element as u8
    }
}

impl TryFrom<u8> for Element {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Element::from_code(value).ok_or(())
    }
}

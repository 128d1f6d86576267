//! Reward-event bitmask vocabulary
//!
//! Every named game event owns one bit of a 64-bit mask. The mask is a
//! single-step event log: it is cleared at the start of each applied action
//! and populated only by that action's effects.

use serde::{Deserialize, Serialize};

/// Number of distinct reward events
pub const NUM_REWARD_EVENTS: usize = 24;

/// Events an action can trigger, one bit each
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u64)]
pub enum RewardEvent {
    CraftBronzeBar = 1 << 0,
    CraftStick = 1 << 1,
    CraftPlank = 1 << 2,
    CraftRope = 1 << 3,
    CraftNails = 1 << 4,
    CraftBronzeHammer = 1 << 5,
    CraftBronzePick = 1 << 6,
    CraftIronPick = 1 << 7,
    CraftBridge = 1 << 8,
    CraftGoldBar = 1 << 9,
    CraftGemRing = 1 << 10,
    UseAxe = 1 << 11,
    UseBridge = 1 << 12,
    CollectTin = 1 << 13,
    CollectCopper = 1 << 14,
    CollectWood = 1 << 15,
    CollectGrass = 1 << 16,
    CollectIron = 1 << 17,
    CollectGold = 1 << 18,
    CollectGem = 1 << 19,
    UseWorkshop1 = 1 << 20,
    UseWorkshop2 = 1 << 21,
    UseWorkshop3 = 1 << 22,
    UseFurnace = 1 << 23,
}

impl RewardEvent {
    /// The event's bit in a reward mask
    pub fn bit(self) -> u64 {
        self as u64
    }

    /// Whether this event is set in `mask`
    pub fn is_set(self, mask: u64) -> bool {
        mask & self.bit() != 0
    }

    /// All events in bit order
    pub fn all() -> [RewardEvent; NUM_REWARD_EVENTS] {
        [
            RewardEvent::CraftBronzeBar,
            RewardEvent::CraftStick,
            RewardEvent::CraftPlank,
            RewardEvent::CraftRope,
            RewardEvent::CraftNails,
            RewardEvent::CraftBronzeHammer,
            RewardEvent::CraftBronzePick,
            RewardEvent::CraftIronPick,
            RewardEvent::CraftBridge,
            RewardEvent::CraftGoldBar,
            RewardEvent::CraftGemRing,
            RewardEvent::UseAxe,
            RewardEvent::UseBridge,
            RewardEvent::CollectTin,
            RewardEvent::CollectCopper,
            RewardEvent::CollectWood,
            RewardEvent::CollectGrass,
            RewardEvent::CollectIron,
            RewardEvent::CollectGold,
            RewardEvent::CollectGem,
            RewardEvent::UseWorkshop1,
            RewardEvent::UseWorkshop2,
            RewardEvent::UseWorkshop3,
            RewardEvent::UseFurnace,
        ]
    }

    /// Event name in snake_case
    pub fn name(self) -> &'static str {
        match self {
            RewardEvent::CraftBronzeBar => "craft_bronze_bar",
            RewardEvent::CraftStick => "craft_stick",
            RewardEvent::CraftPlank => "craft_plank",
            RewardEvent::CraftRope => "craft_rope",
            RewardEvent::CraftNails => "craft_nails",
            RewardEvent::CraftBronzeHammer => "craft_bronze_hammer",
            RewardEvent::CraftBronzePick => "craft_bronze_pick",
            RewardEvent::CraftIronPick => "craft_iron_pick",
            RewardEvent::CraftBridge => "craft_bridge",
            RewardEvent::CraftGoldBar => "craft_gold_bar",
            RewardEvent::CraftGemRing => "craft_gem_ring",
            RewardEvent::UseAxe => "use_axe",
            RewardEvent::UseBridge => "use_bridge",
            RewardEvent::CollectTin => "collect_tin",
            RewardEvent::CollectCopper => "collect_copper",
            RewardEvent::CollectWood => "collect_wood",
            RewardEvent::CollectGrass => "collect_grass",
            RewardEvent::CollectIron => "collect_iron",
            RewardEvent::CollectGold => "collect_gold",
            RewardEvent::CollectGem => "collect_gem",
            RewardEvent::UseWorkshop1 => "use_workshop_1",
            RewardEvent::UseWorkshop2 => "use_workshop_2",
            RewardEvent::UseWorkshop3 => "use_workshop_3",
            RewardEvent::UseFurnace => "use_furnace",
        }
    }

    /// Names of all events set in `mask`, in bit order
    pub fn decode(mask: u64) -> Vec<&'static str> {
        RewardEvent::all()
            .iter()
            .filter(|event| event.is_set(mask))
            .map(|event| event.name())
            .collect()
    }
}

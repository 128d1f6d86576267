//! Crafting recipe and reward registry
//!
//! Immutable, process-wide tables. Recipes and the event lookups are dense
//! constants rather than runtime maps: lookups are total and never allocate.

use crate::element::Element;
use crate::reward::RewardEvent;

/// Number of crafting recipes
pub const NUM_RECIPES: usize = 11;

/// One ingredient requirement of a recipe
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecipeInput {
    pub element: Element,
    pub count: u32,
}

/// A fixed crafting rule: consume `inputs` at `location`, produce one `output`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recipe {
    pub inputs: &'static [RecipeInput],
    pub location: Element,
    pub output: Element,
    pub reward: RewardEvent,
}

/// All recipes, in resolution order.
///
/// Crafting tries these first to last and stops at the first recipe whose
/// location matches the workshop and whose inputs are all held. The bronze
/// pick entry raises the hammer craft bit; the signal layout is frozen.
pub static RECIPES: [Recipe; NUM_RECIPES] = [
    Recipe {
        inputs: &[
            RecipeInput {
                element: Element::Copper,
                count: 1,
            },
            RecipeInput {
                element: Element::Tin,
                count: 1,
            },
        ],
        location: Element::Furnace,
        output: Element::BronzeBar,
        reward: RewardEvent::CraftBronzeBar,
    },
    Recipe {
        inputs: &[RecipeInput {
            element: Element::Wood,
            count: 1,
        }],
        location: Element::Workshop1,
        output: Element::Stick,
        reward: RewardEvent::CraftStick,
    },
    Recipe {
        inputs: &[RecipeInput {
            element: Element::Wood,
            count: 1,
        }],
        location: Element::Workshop3,
        output: Element::Plank,
        reward: RewardEvent::CraftPlank,
    },
    Recipe {
        inputs: &[RecipeInput {
            element: Element::Grass,
            count: 1,
        }],
        location: Element::Workshop2,
        output: Element::Rope,
        reward: RewardEvent::CraftRope,
    },
    Recipe {
        inputs: &[RecipeInput {
            element: Element::BronzeBar,
            count: 1,
        }],
        location: Element::Workshop1,
        output: Element::Nails,
        reward: RewardEvent::CraftNails,
    },
    Recipe {
        inputs: &[
            RecipeInput {
                element: Element::BronzeBar,
                count: 1,
            },
            RecipeInput {
                element: Element::Stick,
                count: 1,
            },
        ],
        location: Element::Workshop2,
        output: Element::BronzeHammer,
        reward: RewardEvent::CraftBronzeHammer,
    },
    Recipe {
        inputs: &[
            RecipeInput {
                element: Element::BronzeBar,
                count: 1,
            },
            RecipeInput {
                element: Element::Stick,
                count: 1,
            },
        ],
        location: Element::Workshop3,
        output: Element::BronzePick,
        reward: RewardEvent::CraftBronzeHammer,
    },
    Recipe {
        inputs: &[
            RecipeInput {
                element: Element::Plank,
                count: 1,
            },
            RecipeInput {
                element: Element::Nails,
                count: 1,
            },
            RecipeInput {
                element: Element::BronzeHammer,
                count: 1,
            },
        ],
        location: Element::Workshop1,
        output: Element::Bridge,
        reward: RewardEvent::CraftBridge,
    },
    Recipe {
        inputs: &[
            RecipeInput {
                element: Element::Iron,
                count: 1,
            },
            RecipeInput {
                element: Element::Stick,
                count: 1,
            },
        ],
        location: Element::Workshop3,
        output: Element::IronPick,
        reward: RewardEvent::CraftIronPick,
    },
    Recipe {
        inputs: &[RecipeInput {
            element: Element::Gold,
            count: 1,
        }],
        location: Element::Workshop1,
        output: Element::GoldBar,
        reward: RewardEvent::CraftGoldBar,
    },
    Recipe {
        inputs: &[RecipeInput {
            element: Element::Gem,
            count: 1,
        }],
        location: Element::Workshop2,
        output: Element::GemRing,
        reward: RewardEvent::CraftGemRing,
    },
];

/// Recipes performable at `location`, in resolution order
pub fn recipes_at(location: Element) -> impl Iterator<Item = &'static Recipe> {
    RECIPES.iter().filter(move |recipe| recipe.location == location)
}

/// Collect-event bit for a gatherable element, if it has one
pub fn collect_reward(element: Element) -> Option<RewardEvent> {
    match element {
        Element::Tin => Some(RewardEvent::CollectTin),
        Element::Copper => Some(RewardEvent::CollectCopper),
        Element::Wood => Some(RewardEvent::CollectWood),
        Element::Grass => Some(RewardEvent::CollectGrass),
        Element::Iron => Some(RewardEvent::CollectIron),
        Element::Gold => Some(RewardEvent::CollectGold),
        Element::Gem => Some(RewardEvent::CollectGem),
        _ => None,
    }
}

/// Use-event bit for a workstation element, if it is one
pub fn workstation_reward(element: Element) -> Option<RewardEvent> {
    match element {
        Element::Workshop1 => Some(RewardEvent::UseWorkshop1),
        Element::Workshop2 => Some(RewardEvent::UseWorkshop2),
        Element::Workshop3 => Some(RewardEvent::UseWorkshop3),
        Element::Furnace => Some(RewardEvent::UseFurnace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_shape() {
        assert_eq!(RECIPES.len(), NUM_RECIPES);
        for recipe in &RECIPES {
            assert!(
                recipe.location.is_workshop(),
                "recipe for {:?} at non-workshop {:?}",
                recipe.output,
                recipe.location
            );
            assert!(!recipe.inputs.is_empty());
            assert!(
                recipe.output.code() >= crate::element::CRAFTABLE_START,
                "output {:?} outside craftable band",
                recipe.output
            );
        }
    }

    #[test]
    fn test_outputs_are_unique() {
        for (i, a) in RECIPES.iter().enumerate() {
            for b in RECIPES.iter().skip(i + 1) {
                assert_ne!(a.output, b.output);
            }
        }
    }

    #[test]
    fn test_resolution_order_is_stable() {
        let outputs: Vec<Element> = RECIPES.iter().map(|r| r.output).collect();
        assert_eq!(
            outputs,
            vec![
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
            ]
        );
    }

    #[test]
    fn test_recipes_at() {
        let at_furnace: Vec<Element> = recipes_at(Element::Furnace).map(|r| r.output).collect();
        assert_eq!(at_furnace, vec![Element::BronzeBar]);

        let at_w1: Vec<Element> = recipes_at(Element::Workshop1).map(|r| r.output).collect();
        assert_eq!(
            at_w1,
            vec![
                Element::Stick,
                Element::Nails,
                Element::Bridge,
                Element::GoldBar
            ]
        );

        assert_eq!(recipes_at(Element::Wall).count(), 0);
    }

    #[test]
    fn test_collect_rewards_cover_gatherables() {
        for element in [
            Element::Tin,
            Element::Copper,
            Element::Wood,
            Element::Grass,
            Element::Iron,
            Element::Gold,
            Element::Gem,
        ] {
            assert!(collect_reward(element).is_some());
        }
        assert!(collect_reward(Element::Stone).is_none());
        assert!(collect_reward(Element::Stick).is_none());
    }

    #[test]
    fn test_workstation_rewards() {
        assert_eq!(
            workstation_reward(Element::Furnace),
            Some(RewardEvent::UseFurnace)
        );
        assert!(workstation_reward(Element::Water).is_none());
    }
}

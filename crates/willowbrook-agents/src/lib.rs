//! The living inhabitants of Willowbrook: villagers and pets.
//!
//! Villagers follow seasonal schedules, meet each other by chance, keep
//! friendships and memories, and react to gifts. Pets bond with the player,
//! forage for treasure, and greet villagers they find near their favourite
//! haunts. Like the world crate, nothing here owns randomness; every daily
//! advance takes the caller's generator.
//!
//! # Modules
//!
//! - [`villager`] -- A single villager: moods, friendships, gifts, memories.
//! - [`roster`] -- The founding villagers and their schedule table.
//! - [`social`] -- Interaction rules keyed by personality pair.
//! - [`directory`] -- The [`VillagerDirectory`] that runs a villager day.
//! - [`pet`] -- Species profiles, forage tables, and the [`Pet`] itself.
//! - [`registry`] -- The [`PetRegistry`]: adoption, care, and the pet day.
//! - [`error`] -- Error types for villager and pet operations.

pub mod directory;
pub mod error;
pub mod pet;
pub mod registry;
pub mod roster;
pub mod social;
pub mod villager;

// Re-export primary types at crate root.
pub use directory::{VillagerDirectory, VillagerSighting, VillagerSummary, VillagerTuning};
pub use error::AgentError;
pub use pet::{FoundItem, ForageCategory, Pet, SpeciesProfile, species_profile};
pub use registry::{Adoptable, Discovery, PetDay, PetGreeting, PetRegistry, PetTuning};
pub use roster::founding_villagers;
pub use social::{InteractionRule, Outcome, interaction_rule};
pub use villager::{Friendship, Gift, GiftReaction, Memory, Villager};

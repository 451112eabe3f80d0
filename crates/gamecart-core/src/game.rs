//! Catalog records. Owned by the catalog subsystem; read-only here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! catalog_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[allow(missing_docs)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Returns the variant name as stored in the catalog.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            /// Parses a stored variant name.
            #[must_use]
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $(stringify!($variant) => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

catalog_enum! {
    /// Game genre as listed in the catalog.
    GameGenre {
        Action,
        Shooter,
        Fighting,
        Platformer,
        Adventure,
        RPG,
        MMORPG,
        Strategy,
        RTS,
        TurnBasedStrategy,
        Simulation,
        Sports,
        Racing,
        Puzzle,
        Horror,
        Survival,
        Sandbox,
        CardGame,
    }
}

catalog_enum! {
    /// Descriptive tag attached to a game.
    GameTag {
        Singleplayer,
        Multiplayer,
        Cooperative,
        PvP,
        PvE,
        SciFi,
        Fantasy,
        Medieval,
        Cyberpunk,
        PostApocalyptic,
        Space,
        Zombies,
        PixelArt,
        Stylized,
        Realistic,
        FirstPerson,
        ThirdPerson,
        TopDown,
        TwoD,
        ThreeD,
        OpenWorld,
        StoryRich,
        Crafting,
        ProceduralGeneration,
        Difficult,
        Relaxing,
        Indie,
    }
}

/// A game listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Game identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// The publisher account that listed the game.
    pub publisher_id: Uuid,
    /// Store page description.
    pub description: String,
    /// Non-negative list price.
    pub price: f64,
    /// Release timestamp.
    pub release_date: DateTime<Utc>,
    /// Genres, in catalog order.
    pub genres: Vec<GameGenre>,
    /// Tags, in catalog order.
    pub tags: Vec<GameTag>,
}

/// Sums the list prices of `games`.
#[must_use]
pub fn total_price(games: &[Game]) -> f64 {
    games.iter().map(|g| g.price).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_names_match_serde_representation() {
        let json = serde_json::to_value(GameGenre::TurnBasedStrategy).unwrap();
        assert_eq!(json, GameGenre::TurnBasedStrategy.as_str());
        assert_eq!(GameGenre::parse("RPG"), Some(GameGenre::RPG));
        assert_eq!(GameGenre::parse("rpg"), None);
    }

    #[test]
    fn test_tag_parse_rejects_unknown() {
        assert_eq!(GameTag::parse("PvE"), Some(GameTag::PvE));
        assert_eq!(GameTag::parse("VR"), None);
    }

    #[test]
    fn test_total_price_of_empty_slice_is_zero() {
        assert!(total_price(&[]).abs() < f64::EPSILON);
    }
}

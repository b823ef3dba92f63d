use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Shown when a hero id is missing from the catalog
pub const UNKNOWN_HERO_NAME: &str = "Hero name not found";

/// Hero entry from the /heroes endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub id: i64,

    /// Display name (e.g., "Anti-Mage")
    pub localized_name: Option<String>,

    /// Icon path or URL, when the endpoint provides one
    #[serde(default)]
    pub icon: Option<String>,
}

/// Display data for one hero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroInfo {
    pub display_name: String,
    pub icon: Option<String>,
}

/// Hero id -> display data, rebuilt for every enrichment batch
#[derive(Debug, Clone, Default)]
pub struct HeroLookup {
    heroes: HashMap<i64, HeroInfo>,
}

impl HeroLookup {
    /// Build the lookup; the first entry seen for an id wins
    pub fn from_heroes(heroes: Vec<Hero>) -> Self {
        let mut lookup = HashMap::with_capacity(heroes.len());

        for hero in heroes {
            lookup.entry(hero.id).or_insert_with(|| HeroInfo {
                display_name: hero
                    .localized_name
                    .unwrap_or_else(|| UNKNOWN_HERO_NAME.to_string()),
                icon: hero.icon,
            });
        }

        Self { heroes: lookup }
    }

    pub fn name(&self, hero_id: i64) -> &str {
        self.heroes
            .get(&hero_id)
            .map(|h| h.display_name.as_str())
            .unwrap_or(UNKNOWN_HERO_NAME)
    }

    pub fn icon(&self, hero_id: i64) -> Option<&str> {
        self.heroes.get(&hero_id).and_then(|h| h.icon.as_deref())
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}

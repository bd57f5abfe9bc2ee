//! Card catalog loader.

use std::path::Path;

use battle_core::CardDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Card catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardDefinition>,
}

/// Loader for the card catalog from RON files.
pub struct CardLoader;

impl CardLoader {
    /// Load card definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<CardDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse card definitions from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<CardDefinition>> {
        let catalog: CardCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;

        Ok(catalog.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::CardCategory;

    #[test]
    fn omitted_effects_default_to_zero() {
        let cards = CardLoader::parse(
            r#"(
                cards: [
                    (name: "Slash", category: Attack, cost: 1, damage: 6, is_starter_card: true),
                    (name: "Surge", category: Skill, cost: 0, overcharge: 2,
                     description_template: "Gain {overcharge} energy."),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].category, CardCategory::Attack);
        assert_eq!(cards[0].block, 0);
        assert!(cards[0].is_starter_card);
        assert_eq!(cards[1].describe(), "Gain 2 energy.");
    }

    #[test]
    fn malformed_catalog_is_reported() {
        let error = CardLoader::parse("(cards: [(name: \"Slash\")])").unwrap_err();
        assert!(error.to_string().contains("card catalog"));
    }
}

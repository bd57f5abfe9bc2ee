//! Encounter plan loader.

use std::path::Path;

use battle_core::EncounterPlan;

use crate::loaders::{LoadResult, read_file};

/// Loader for encounter plans from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load an encounter plan from a RON file.
    pub fn load(path: &Path) -> LoadResult<EncounterPlan> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse an encounter plan from RON text. Empty rosters are rejected.
    pub fn parse(content: &str) -> LoadResult<EncounterPlan> {
        let plan: EncounterPlan = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter plan RON: {}", e))?;

        if let Some(index) = plan.encounters.iter().position(Vec::is_empty) {
            anyhow::bail!("Encounter {} has no opponents", index);
        }
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rosters_in_order() {
        let plan = EncounterLoader::parse(r#"(encounters: [["Slime"], ["Goblin", "Slime"]])"#)
            .unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.roster(1).unwrap(), ["Goblin", "Slime"]);
    }

    #[test]
    fn rejects_empty_roster() {
        let error = EncounterLoader::parse(r#"(encounters: [["Slime"], []])"#).unwrap_err();
        assert_eq!(error.to_string(), "Encounter 1 has no opponents");
    }
}

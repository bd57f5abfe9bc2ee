//! Simulator configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one simulated run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Content directory. `None` uses the embedded content set.
    pub data_dir: Option<PathBuf>,
    /// Overrides the seed from the content's battle config.
    pub seed: Option<u64>,
    /// Player turns allowed across the whole run before giving up.
    pub max_turns: u32,
}

impl SimConfig {
    pub const DEFAULT_MAX_TURNS: u32 = 200;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - Directory with cards/enemies/encounters/config files (default: embedded)
    /// - `BATTLE_SEED` - RNG seed for a reproducible run (default: config or entropy)
    /// - `BATTLE_MAX_TURNS` - Turn limit for the run (default: 200)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.data_dir = lookup("BATTLE_DATA_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        config.seed = parse(lookup("BATTLE_SEED"));
        if let Some(turns) = parse::<u32>(lookup("BATTLE_MAX_TURNS")) {
            config.max_turns = turns.max(1);
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: None,
            max_turns: Self::DEFAULT_MAX_TURNS,
        }
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> SimConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        SimConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), SimConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("BATTLE_DATA_DIR", "/srv/content"),
            ("BATTLE_SEED", "42"),
            ("BATTLE_MAX_TURNS", "0"),
        ]);
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/content")));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_turns, 1);
    }

    #[test]
    fn unparsable_values_are_ignored() {
        let config = config_from(&[("BATTLE_SEED", "soon"), ("BATTLE_DATA_DIR", "")]);
        assert_eq!(config.seed, None);
        assert_eq!(config.data_dir, None);
    }
}

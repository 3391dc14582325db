//! # Key Registry and Cleaning

use super::entities::{MultisigPermissions, SecurityLevel};
use serde::{Deserialize, Serialize};
use shared_types::strip_0x;
use std::collections::BTreeMap;

/// Comparison form of a key: trimmed, `0x` dropped, lowercase.
pub fn normalize_key(key: &str) -> String {
    strip_0x(key.trim()).to_ascii_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegisteredKey {
    original: String,
    level: SecurityLevel,
}

/// Live authorized keys with their security levels.
///
/// Serialized as `{"<key>": <level>}`; lookups are by normalized key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, SecurityLevel>",
    into = "BTreeMap<String, SecurityLevel>"
)]
pub struct KeyRegistry {
    keys: BTreeMap<String, RegisteredKey>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-level) a key.
    pub fn insert(&mut self, key: &str, level: SecurityLevel) {
        self.keys.insert(
            normalize_key(key),
            RegisteredKey {
                original: key.to_string(),
                level,
            },
        );
    }

    pub fn level_of(&self, key: &str) -> Option<SecurityLevel> {
        self.keys.get(&normalize_key(key)).map(|k| k.level)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `(normalized key, level)` in key order.
    pub fn levels(&self) -> impl Iterator<Item = (&str, SecurityLevel)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v.level))
    }
}

impl From<BTreeMap<String, SecurityLevel>> for KeyRegistry {
    fn from(map: BTreeMap<String, SecurityLevel>) -> Self {
        let mut registry = Self::new();
        for (key, level) in map {
            registry.insert(&key, level);
        }
        registry
    }
}

impl From<KeyRegistry> for BTreeMap<String, SecurityLevel> {
    fn from(registry: KeyRegistry) -> Self {
        registry
            .keys
            .into_values()
            .map(|k| (k.original, k.level))
            .collect()
    }
}

impl FromIterator<(String, SecurityLevel)> for KeyRegistry {
    fn from_iter<I: IntoIterator<Item = (String, SecurityLevel)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (key, level) in iter {
            registry.insert(&key, level);
        }
        registry
    }
}

/// Keep only candidates present in the registry, in their original order and
/// original text.
pub fn clean_keys(candidates: &[String], registry: &KeyRegistry) -> Vec<String> {
    candidates
        .iter()
        .filter(|key| registry.contains(key))
        .cloned()
        .collect()
}

/// [`clean_keys`] applied to every operation.
pub fn clean_permissions(
    permissions: &MultisigPermissions,
    registry: &KeyRegistry,
) -> MultisigPermissions {
    let mut cleaned = MultisigPermissions::new();
    for (operation, keys) in permissions.iter() {
        cleaned.set(*operation, clean_keys(keys, registry));
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MultisigOperation;

    #[test]
    fn test_normalize_equivalent_forms() {
        assert_eq!(normalize_key("0xABC"), "abc");
        assert_eq!(normalize_key("abc"), "abc");
        assert_eq!(normalize_key(" 0xabc "), "abc");
        assert_eq!(normalize_key("0XAbC"), "abc");
    }

    #[test]
    fn test_clean_keeps_original_text_and_order() {
        let registry: KeyRegistry = [
            ("abc".to_string(), SecurityLevel::High),
            ("0xDEF".to_string(), SecurityLevel::Low),
        ]
        .into_iter()
        .collect();
        let candidates = vec![
            " 0xDEF ".to_string(),
            "0x999".to_string(),
            "0xABC".to_string(),
        ];
        assert_eq!(
            clean_keys(&candidates, &registry),
            vec![" 0xDEF ".to_string(), "0xABC".to_string()]
        );
    }

    #[test]
    fn test_clean_is_idempotent() {
        let registry: KeyRegistry = [("abc".to_string(), SecurityLevel::High)]
            .into_iter()
            .collect();
        let candidates = vec!["0xABC".to_string(), "nope".to_string(), " abc".to_string()];
        let once = clean_keys(&candidates, &registry);
        assert_eq!(clean_keys(&once, &registry), once);

        let mut perms = MultisigPermissions::new();
        perms.set(MultisigOperation::ChangeConfig, candidates);
        let cleaned = clean_permissions(&perms, &registry);
        assert_eq!(clean_permissions(&cleaned, &registry), cleaned);
    }

    #[test]
    fn test_registry_json_round_trip_keeps_original_keys() {
        let registry: KeyRegistry =
            serde_json::from_str(r#"{"0xAbC": 3, "def": 1}"#).unwrap();
        assert_eq!(registry.level_of("abc"), Some(SecurityLevel::High));
        assert_eq!(registry.level_of("0xDEF"), Some(SecurityLevel::Low));
        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["0xAbC"], 3);
    }
}

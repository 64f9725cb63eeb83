use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use triad_types::{ArchetypeId, InstanceRole, ReferenceData};

/// Readings for one archetype, one per role perspective.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterpretationRecord {
    pub archetype_id: ArchetypeId,
    pub name: String,
    pub theme: String,
    pub core_reading: String,
    pub social_reading: String,
    pub defensive_reading: String,
}

impl InterpretationRecord {
    pub fn reading(&self, role: InstanceRole) -> &str {
        match role {
            InstanceRole::Core => &self.core_reading,
            InstanceRole::Derived1 => &self.social_reading,
            InstanceRole::Derived2 => &self.defensive_reading,
        }
    }
}

/// Keyed lookup of archetype readings.
#[derive(Clone, Debug, Default)]
pub struct InterpretationRegistry {
    records: HashMap<ArchetypeId, InterpretationRecord>,
}

impl InterpretationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose readings for every catalog entry from its facet pair.
    pub fn from_reference(reference: &ReferenceData) -> Self {
        let mut registry = Self::new();
        for record in reference.catalog.iter() {
            let name = &record.name;
            let theme = &record.theme;
            let (core_reading, social_reading, defensive_reading) =
                match reference.combination.pair_for(record.id) {
                    Some((upper, lower)) => (
                        format!(
                            "{}: {}. Drive comes from {} grounded in {}.",
                            name,
                            theme,
                            upper.character(),
                            lower.character()
                        ),
                        format!(
                            "With others, {} shows as {} tempered by {}.",
                            name,
                            upper.character(),
                            lower.character()
                        ),
                        format!(
                            "Under pressure, {} falls back on {} and {}.",
                            name,
                            upper.defensive_character(),
                            lower.defensive_character()
                        ),
                    ),
                    None => (
                        format!("{}: {}.", name, theme),
                        format!("With others, {} shows as {}.", name, theme),
                        format!("Under pressure, {} holds to {}.", name, theme),
                    ),
                };
            registry.insert(InterpretationRecord {
                archetype_id: record.id,
                name: name.clone(),
                theme: theme.clone(),
                core_reading,
                social_reading,
                defensive_reading,
            });
        }
        registry
    }

    /// Add or replace a record, returning the previous one.
    pub fn insert(&mut self, record: InterpretationRecord) -> Option<InterpretationRecord> {
        self.records.insert(record.archetype_id, record)
    }

    pub fn get(&self, id: ArchetypeId) -> Option<&InterpretationRecord> {
        self.records.get(&id)
    }

    pub fn reading(&self, role: InstanceRole, id: ArchetypeId) -> Option<&str> {
        self.get(id).map(|r| r.reading(role))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// BLAKE3 over every record in id order, hex encoded. Strings are
    /// length-prefixed so adjacent fields cannot run together.
    pub fn digest(&self) -> String {
        let mut ids: Vec<_> = self.records.keys().copied().collect();
        ids.sort();
        let mut hasher = blake3::Hasher::new();
        for id in ids {
            let record = &self.records[&id];
            hasher.update(&[id.get()]);
            for text in [
                &record.name,
                &record.theme,
                &record.core_reading,
                &record.social_reading,
                &record.defensive_reading,
            ] {
                hasher.update(&(text.len() as u64).to_le_bytes());
                hasher.update(text.as_bytes());
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_catalog() {
        let registry = InterpretationRegistry::from_reference(&ReferenceData::standard());
        assert_eq!(registry.len(), 64);
        let creative = registry.get(ArchetypeId::new(1).unwrap()).unwrap();
        assert_eq!(creative.name, "The Creative");
        assert!(creative.core_reading.contains("creative drive"));
        assert!(creative.defensive_reading.contains("forceful resistance"));
    }

    #[test]
    fn reading_selects_role_perspective() {
        let registry = InterpretationRegistry::from_reference(&ReferenceData::standard());
        let id = ArchetypeId::new(29).unwrap();
        let social = registry.reading(InstanceRole::Derived1, id).unwrap();
        assert!(social.starts_with("With others"));
        let defensive = registry.reading(InstanceRole::Derived2, id).unwrap();
        assert!(defensive.contains("persistent endurance"));
    }

    #[test]
    fn digest_tracks_content() {
        let standard = InterpretationRegistry::from_reference(&ReferenceData::standard());
        let same = InterpretationRegistry::from_reference(&ReferenceData::standard());
        assert_eq!(standard.digest(), same.digest());
        assert_ne!(standard.digest(), InterpretationRegistry::new().digest());

        let mut edited = same;
        let id = ArchetypeId::new(30).unwrap();
        let mut record = edited.get(id).unwrap().clone();
        record.social_reading.push('!');
        edited.insert(record);
        assert_ne!(standard.digest(), edited.digest());
    }

    #[test]
    fn insert_overrides() {
        let mut registry = InterpretationRegistry::from_reference(&ReferenceData::standard());
        let id = ArchetypeId::new(11).unwrap();
        let mut record = registry.get(id).unwrap().clone();
        record.core_reading = "custom".into();
        assert!(registry.insert(record).is_some());
        assert_eq!(registry.reading(InstanceRole::Core, id), Some("custom"));
    }
}

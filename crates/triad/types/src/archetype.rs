use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::TriadError;

/// Identifier of one of the 64 archetypes. Always in `1..=64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ArchetypeId(u8);

impl ArchetypeId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 64;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every id in ascending order.
    pub fn all() -> impl Iterator<Item = ArchetypeId> {
        (Self::MIN..=Self::MAX).map(ArchetypeId)
    }

    /// Absolute distance between two ids, used by the consistency score.
    pub fn distance(self, other: ArchetypeId) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl TryFrom<u8> for ArchetypeId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ArchetypeId::new(value).ok_or_else(|| format!("archetype id {} outside 1..=64", value))
    }
}

impl From<ArchetypeId> for u8 {
    fn from(id: ArchetypeId) -> u8 {
        id.0
    }
}

impl fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display metadata for one archetype.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeRecord {
    pub id: ArchetypeId,
    pub name: String,
    pub theme: String,
}

/// The 64-entry archetype metadata table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ArchetypeRecord>", into = "Vec<ArchetypeRecord>")]
pub struct ArchetypeCatalog {
    records: BTreeMap<ArchetypeId, ArchetypeRecord>,
}

impl ArchetypeCatalog {
    /// Build a catalog; every id 1..=64 must appear exactly once.
    pub fn new(records: Vec<ArchetypeRecord>) -> Result<Self, TriadError> {
        let mut map = BTreeMap::new();
        for record in records {
            let id = record.id;
            if map.insert(id, record).is_some() {
                return Err(TriadError::InvalidReference(format!(
                    "archetype {} listed twice",
                    id
                )));
            }
        }
        if let Some(missing) = ArchetypeId::all().find(|id| !map.contains_key(id)) {
            return Err(TriadError::InvalidReference(format!(
                "archetype {} missing from catalog",
                missing
            )));
        }
        Ok(Self { records: map })
    }

    pub fn get(&self, id: ArchetypeId) -> &ArchetypeRecord {
        // construction guarantees totality
        &self.records[&id]
    }

    pub fn name(&self, id: ArchetypeId) -> &str {
        &self.get(id).name
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchetypeRecord> {
        self.records.values()
    }

    /// The standard catalog of King Wen names.
    pub fn standard() -> Self {
        let records = STANDARD_ARCHETYPES
            .iter()
            .enumerate()
            .map(|(i, (name, theme))| {
                let id = ArchetypeId(i as u8 + 1);
                let record = ArchetypeRecord {
                    id,
                    name: (*name).to_string(),
                    theme: (*theme).to_string(),
                };
                (id, record)
            })
            .collect();
        Self { records }
    }
}

impl TryFrom<Vec<ArchetypeRecord>> for ArchetypeCatalog {
    type Error = TriadError;

    fn try_from(records: Vec<ArchetypeRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<ArchetypeCatalog> for Vec<ArchetypeRecord> {
    fn from(catalog: ArchetypeCatalog) -> Self {
        catalog.records.into_values().collect()
    }
}

const STANDARD_ARCHETYPES: [(&str, &str); 64] = [
    ("The Creative", "sustained initiative and self-directed strength"),
    ("The Receptive", "devotion, patience and enabling others"),
    ("Difficulty at the Beginning", "ordering chaos at the start of growth"),
    ("Youthful Folly", "learning through open inexperience"),
    ("Waiting", "confident patience before action"),
    ("Conflict", "holding a position under opposition"),
    ("The Army", "disciplined collective effort"),
    ("Holding Together", "loyal union around a centre"),
    ("Small Taming", "gentle restraint of great force"),
    ("Treading", "careful conduct among the powerful"),
    ("Peace", "harmony between above and below"),
    ("Standstill", "integrity while exchange is blocked"),
    ("Fellowship", "open community with shared purpose"),
    ("Great Possession", "abundance held with clarity"),
    ("Modesty", "strength that stays level"),
    ("Enthusiasm", "rousing others into motion"),
    ("Following", "adapting to lead by following"),
    ("Work on the Decayed", "repairing what was spoiled"),
    ("Approach", "drawing near with goodwill"),
    ("Contemplation", "observing before influencing"),
    ("Biting Through", "decisive removal of obstacles"),
    ("Grace", "form and beauty in measure"),
    ("Splitting Apart", "endurance while structures erode"),
    ("Return", "renewal after a turning point"),
    ("Innocence", "acting without ulterior motive"),
    ("Great Taming", "accumulating and containing power"),
    ("Nourishment", "care for what sustains"),
    ("Great Exceeding", "bearing an exceptional load"),
    ("The Abysmal", "steadfastness in repeated danger"),
    ("The Clinging", "clarity that depends on its source"),
    ("Influence", "mutual attraction and receptivity"),
    ("Duration", "constancy through change"),
    ("Retreat", "timely withdrawal to preserve strength"),
    ("Great Power", "force guided by what is right"),
    ("Progress", "rising recognition and clarity"),
    ("Darkening of the Light", "inner light kept under adversity"),
    ("The Family", "roles that hold a household"),
    ("Opposition", "finding common ground in difference"),
    ("Obstruction", "turning inward when blocked"),
    ("Deliverance", "release after tension"),
    ("Decrease", "simplifying to strengthen"),
    ("Increase", "growth shared outward"),
    ("Breakthrough", "resolute open declaration"),
    ("Coming to Meet", "meeting an unexpected influence"),
    ("Gathering Together", "assembling around shared values"),
    ("Pushing Upward", "steady effortful ascent"),
    ("Oppression", "staying true under exhaustion"),
    ("The Well", "an inexhaustible common resource"),
    ("Revolution", "timely transformation"),
    ("The Cauldron", "refining and nourishing culture"),
    ("The Arousing", "shock that awakens"),
    ("Keeping Still", "stillness and right boundaries"),
    ("Development", "gradual progress"),
    ("The Marrying Maiden", "acting within a subordinate role"),
    ("Abundance", "fullness at its peak"),
    ("The Wanderer", "moving lightly among strangers"),
    ("The Gentle", "penetrating persistence"),
    ("The Joyous", "shared joy and encouragement"),
    ("Dispersion", "dissolving rigidity"),
    ("Limitation", "chosen limits that free"),
    ("Inner Truth", "sincerity that moves others"),
    ("Small Exceeding", "care in small matters"),
    ("After Completion", "vigilance once things are in order"),
    ("Before Completion", "the careful last crossing"),
];

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the eight fixed dimensions of the feature space.
///
/// The declaration order is the canonical order: it decides every tie-break
/// in the classifier (lower index wins).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Facet {
    /// ☰ creative drive.
    Heaven,
    /// ☱ joyful exchange.
    Lake,
    /// ☲ expressive clarity.
    Fire,
    /// ☳ decisive action.
    Thunder,
    /// ☴ adaptive influence.
    Wind,
    /// ☵ probing depth.
    Water,
    /// ☶ steady restraint.
    Mountain,
    /// ☷ receptive support.
    Earth,
}

impl Facet {
    pub const COUNT: usize = 8;

    /// All facets in canonical order.
    pub const ALL: [Facet; 8] = [
        Facet::Heaven,
        Facet::Lake,
        Facet::Fire,
        Facet::Thunder,
        Facet::Wind,
        Facet::Water,
        Facet::Mountain,
        Facet::Earth,
    ];

    /// Position in the canonical order (0..8).
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Facet> {
        Self::ALL.get(index).copied()
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Heaven => '☰',
            Self::Lake => '☱',
            Self::Fire => '☲',
            Self::Thunder => '☳',
            Self::Wind => '☴',
            Self::Water => '☵',
            Self::Mountain => '☶',
            Self::Earth => '☷',
        }
    }

    /// Short trait label used when composing readings.
    pub fn character(self) -> &'static str {
        match self {
            Self::Heaven => "creative drive",
            Self::Lake => "joyful exchange",
            Self::Fire => "expressive clarity",
            Self::Thunder => "decisive action",
            Self::Wind => "adaptive influence",
            Self::Water => "probing depth",
            Self::Mountain => "steady restraint",
            Self::Earth => "receptive support",
        }
    }

    /// How the facet shows up under pressure.
    pub fn defensive_character(self) -> &'static str {
        match self {
            Self::Heaven => "forceful resistance",
            Self::Lake => "conciliatory resolution",
            Self::Fire => "situational insight",
            Self::Thunder => "rapid response",
            Self::Wind => "flexible adaptation",
            Self::Water => "persistent endurance",
            Self::Mountain => "firm boundaries",
            Self::Earth => "accommodating acceptance",
        }
    }

    /// The facet across the polar axis (Heaven/Earth, Lake/Mountain,
    /// Fire/Water, Thunder/Wind).
    pub fn polar_opposite(self) -> Facet {
        match self {
            Self::Heaven => Self::Earth,
            Self::Earth => Self::Heaven,
            Self::Lake => Self::Mountain,
            Self::Mountain => Self::Lake,
            Self::Fire => Self::Water,
            Self::Water => Self::Fire,
            Self::Thunder => Self::Wind,
            Self::Wind => Self::Thunder,
        }
    }

    /// Conceptual level used by the integration score.
    pub fn level(self) -> Level {
        match self {
            Self::Heaven | Self::Thunder => Level::Celestial,
            Self::Lake | Self::Fire | Self::Wind => Level::Human,
            Self::Water | Self::Mountain | Self::Earth => Level::Terrestrial,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Heaven => "Heaven",
            Self::Lake => "Lake",
            Self::Fire => "Fire",
            Self::Thunder => "Thunder",
            Self::Wind => "Wind",
            Self::Water => "Water",
            Self::Mountain => "Mountain",
            Self::Earth => "Earth",
        };
        write!(f, "{}", name)
    }
}

/// The three conceptual levels, one per instance role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Celestial,
    Human,
    Terrestrial,
}

/// A value for every facet, stored densely in canonical order.
///
/// Serializes as a JSON object keyed by facet name; missing keys
/// deserialize to `T::default()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacetMap<T>([T; 8]);

impl<T> FacetMap<T> {
    pub fn from_array(values: [T; 8]) -> Self {
        Self(values)
    }

    pub fn as_array(&self) -> &[T; 8] {
        &self.0
    }

    /// Iterate `(facet, &value)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Facet, &T)> {
        Facet::ALL.iter().copied().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(Facet, &T) -> U) -> FacetMap<U> {
        FacetMap(std::array::from_fn(|i| f(Facet::ALL[i], &self.0[i])))
    }
}

impl<T: Copy> FacetMap<T> {
    pub fn splat(value: T) -> Self {
        Self([value; 8])
    }

    pub fn from_fn(mut f: impl FnMut(Facet) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Facet::ALL[i])))
    }
}

impl FacetMap<f64> {
    pub fn zeros() -> Self {
        Self([0.0; 8])
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn max_value(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min_value(&self) -> f64 {
        self.0.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn mean(&self) -> f64 {
        self.sum() / Facet::COUNT as f64
    }

    pub fn all_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Highest-valued facet; ties go to the canonical order.
    pub fn peak(&self) -> Facet {
        let mut best = Facet::Heaven;
        for facet in Facet::ALL.iter().copied().skip(1) {
            if self[facet] > self[best] {
                best = facet;
            }
        }
        best
    }

    /// Lowest-valued facet; ties go to the canonical order.
    pub fn trough(&self) -> Facet {
        let mut worst = Facet::Heaven;
        for facet in Facet::ALL.iter().copied().skip(1) {
            if self[facet] < self[worst] {
                worst = facet;
            }
        }
        worst
    }

    /// Facets sorted by value descending, canonical order on ties.
    pub fn ranked(&self) -> [Facet; 8] {
        let mut order = Facet::ALL;
        // stable sort keeps canonical order for equal values
        order.sort_by(|a, b| self[*b].total_cmp(&self[*a]));
        order
    }
}

impl<T: Default + Copy> Default for FacetMap<T> {
    fn default() -> Self {
        Self([T::default(); 8])
    }
}

impl<T> Index<Facet> for FacetMap<T> {
    type Output = T;

    fn index(&self, facet: Facet) -> &T {
        &self.0[facet.index()]
    }
}

impl<T> IndexMut<Facet> for FacetMap<T> {
    fn index_mut(&mut self, facet: Facet) -> &mut T {
        &mut self.0[facet.index()]
    }
}

impl<T: Serialize> Serialize for FacetMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Facet::COUNT))?;
        for (facet, value) in self.iter() {
            map.serialize_entry(&facet, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de> + Default + Copy> Deserialize<'de> for FacetMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FacetMapVisitor<T>(std::marker::PhantomData<T>);

        impl<'de, T: Deserialize<'de> + Default + Copy> Visitor<'de> for FacetMapVisitor<T> {
            type Value = FacetMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a map keyed by facet name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = FacetMap::<T>::default();
                while let Some((facet, value)) = access.next_entry::<Facet, T>()? {
                    out[facet] = value;
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(FacetMapVisitor(std::marker::PhantomData))
    }
}

//! Injected, read-only reference data.
//!
//! Every table is validated on construction so the algorithms can treat
//! it as total. [`CombinationTable::lookup`] still re-checks each cell it
//! reads and reports a [`TriadError::LookupIntegrity`] on corruption.

use serde::{Deserialize, Serialize};

use crate::archetype::{ArchetypeCatalog, ArchetypeId, ArchetypeRecord};
use crate::error::TriadError;
use crate::facet::{Facet, FacetMap};

/// The fixed 8x8 `T[upper][lower] -> ArchetypeId` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[[u8; 8]; 8]", into = "[[u8; 8]; 8]")]
pub struct CombinationTable {
    cells: [[u8; 8]; 8],
}

impl CombinationTable {
    /// Build a table, rejecting any cell outside `1..=64`.
    pub fn new(cells: [[u8; 8]; 8]) -> Result<Self, TriadError> {
        let table = Self { cells };
        table.verify()?;
        Ok(table)
    }

    /// Re-check every cell; the first bad one in canonical order is reported.
    pub fn verify(&self) -> Result<(), TriadError> {
        for upper in Facet::ALL {
            for lower in Facet::ALL {
                self.lookup(upper, lower)?;
            }
        }
        Ok(())
    }

    /// The King Wen arrangement in canonical facet order.
    pub fn king_wen() -> Self {
        Self {
            cells: KING_WEN,
        }
    }

    pub fn lookup(&self, upper: Facet, lower: Facet) -> Result<ArchetypeId, TriadError> {
        let value = self.cells[upper.index()][lower.index()];
        ArchetypeId::new(value).ok_or(TriadError::LookupIntegrity {
            upper,
            lower,
            value,
        })
    }

    /// First pair in canonical order that maps to `id`, if any.
    pub fn pair_for(&self, id: ArchetypeId) -> Option<(Facet, Facet)> {
        self.pairs().find(|(_, _, value)| *value == id.get()).map(|(u, l, _)| (u, l))
    }

    /// All 64 ordered pairs with their raw cell value, upper-major.
    pub fn pairs(&self) -> impl Iterator<Item = (Facet, Facet, u8)> + '_ {
        Facet::ALL.into_iter().flat_map(move |upper| {
            Facet::ALL
                .into_iter()
                .map(move |lower| (upper, lower, self.cells[upper.index()][lower.index()]))
        })
    }

    /// Number of distinct ids the table reaches.
    pub fn distinct_ids(&self) -> usize {
        let mut seen = [false; 64];
        for id in self.pairs().filter_map(|(_, _, value)| ArchetypeId::new(value)) {
            seen[usize::from(id.get() - 1)] = true;
        }
        seen.iter().filter(|s| **s).count()
    }

    /// Raw cells, including any corruption introduced after construction.
    pub fn cells(&self) -> &[[u8; 8]; 8] {
        &self.cells
    }

    #[doc(hidden)]
    pub fn from_cells_unchecked(cells: [[u8; 8]; 8]) -> Self {
        Self { cells }
    }
}

impl TryFrom<[[u8; 8]; 8]> for CombinationTable {
    type Error = TriadError;

    fn try_from(cells: [[u8; 8]; 8]) -> Result<Self, Self::Error> {
        Self::new(cells)
    }
}

impl From<CombinationTable> for [[u8; 8]; 8] {
    fn from(table: CombinationTable) -> Self {
        table.cells
    }
}

/// Symmetric-by-convention 8x8 facet compatibility, values in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 8]; 8]", into = "[[f64; 8]; 8]")]
pub struct CompatibilityMatrix {
    cells: [[f64; 8]; 8],
}

impl CompatibilityMatrix {
    pub fn new(cells: [[f64; 8]; 8]) -> Result<Self, TriadError> {
        for (i, row) in cells.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                if !value.is_finite() || !(0.0..=1.0).contains(value) {
                    return Err(TriadError::InvalidReference(format!(
                        "compatibility[{}][{}] = {} outside [0, 1]",
                        i, j, value
                    )));
                }
            }
        }
        Ok(Self { cells })
    }

    pub fn standard() -> Self {
        Self {
            cells: STANDARD_COMPATIBILITY,
        }
    }

    pub fn get(&self, a: Facet, b: Facet) -> f64 {
        self.cells[a.index()][b.index()]
    }
}

impl TryFrom<[[f64; 8]; 8]> for CompatibilityMatrix {
    type Error = TriadError;

    fn try_from(cells: [[f64; 8]; 8]) -> Result<Self, Self::Error> {
        Self::new(cells)
    }
}

impl From<CompatibilityMatrix> for [[f64; 8]; 8] {
    fn from(matrix: CompatibilityMatrix) -> Self {
        matrix.cells
    }
}

/// Per-facet stability weights in `[0, 100]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FacetMap<f64>", into = "FacetMap<f64>")]
pub struct StabilityWeights(FacetMap<f64>);

impl StabilityWeights {
    pub fn new(weights: FacetMap<f64>) -> Result<Self, TriadError> {
        if let Some((facet, value)) = weights
            .iter()
            .find(|(_, v)| !v.is_finite() || !(0.0..=100.0).contains(*v))
        {
            return Err(TriadError::InvalidReference(format!(
                "stability weight for {} = {} outside [0, 100]",
                facet, value
            )));
        }
        Ok(Self(weights))
    }

    pub fn standard() -> Self {
        Self(FacetMap::from_array([
            85.0, 75.0, 70.0, 65.0, 72.0, 68.0, 90.0, 95.0,
        ]))
    }

    pub fn get(&self, facet: Facet) -> f64 {
        self.0[facet]
    }
}

impl TryFrom<FacetMap<f64>> for StabilityWeights {
    type Error = TriadError;

    fn try_from(weights: FacetMap<f64>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<StabilityWeights> for FacetMap<f64> {
    fn from(weights: StabilityWeights) -> Self {
        weights.0
    }
}

/// Which side of the expressive/reserved partition a facet sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetGroup {
    Expressive,
    Reserved,
}

/// Serialized form of a [`FacetPartition`]: the expressive members only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartitionSpec {
    pub expressive: Vec<Facet>,
}

/// Fixed split of the eight facets into two disjoint groups of four.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PartitionSpec", into = "PartitionSpec")]
pub struct FacetPartition {
    groups: FacetMap<FacetGroup>,
}

impl FacetPartition {
    pub fn new(expressive: &[Facet]) -> Result<Self, TriadError> {
        let mut groups = FacetMap::splat(FacetGroup::Reserved);
        for facet in expressive {
            if groups[*facet] == FacetGroup::Expressive {
                return Err(TriadError::InvalidReference(format!(
                    "facet {} listed twice in expressive group",
                    facet
                )));
            }
            groups[*facet] = FacetGroup::Expressive;
        }
        if expressive.len() != Facet::COUNT / 2 {
            return Err(TriadError::InvalidReference(format!(
                "expressive group must hold 4 facets, got {}",
                expressive.len()
            )));
        }
        Ok(Self { groups })
    }

    pub fn standard() -> Self {
        let mut groups = FacetMap::splat(FacetGroup::Reserved);
        for facet in [Facet::Heaven, Facet::Lake, Facet::Fire, Facet::Thunder] {
            groups[facet] = FacetGroup::Expressive;
        }
        Self { groups }
    }

    pub fn group(&self, facet: Facet) -> FacetGroup {
        self.groups[facet]
    }

    pub fn is_expressive(&self, facet: Facet) -> bool {
        self.group(facet) == FacetGroup::Expressive
    }

    pub fn members(&self, group: FacetGroup) -> impl Iterator<Item = Facet> + '_ {
        self.groups
            .iter()
            .filter(move |(_, g)| **g == group)
            .map(|(facet, _)| facet)
    }
}

impl TryFrom<PartitionSpec> for FacetPartition {
    type Error = TriadError;

    fn try_from(spec: PartitionSpec) -> Result<Self, Self::Error> {
        Self::new(&spec.expressive)
    }
}

impl From<FacetPartition> for PartitionSpec {
    fn from(partition: FacetPartition) -> Self {
        PartitionSpec {
            expressive: partition.members(FacetGroup::Expressive).collect(),
        }
    }
}

/// Raw on-disk shape; converted field by field so integrity errors keep
/// their variant instead of collapsing into a serde message.
#[derive(Deserialize)]
struct ReferenceFile {
    combination: [[u8; 8]; 8],
    compatibility: [[f64; 8]; 8],
    stability: FacetMap<f64>,
    partition: PartitionSpec,
    #[serde(default)]
    catalog: Option<Vec<ArchetypeRecord>>,
}

/// Everything the classifier reads but never writes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReferenceData {
    pub combination: CombinationTable,
    pub compatibility: CompatibilityMatrix,
    pub stability: StabilityWeights,
    pub partition: FacetPartition,
    pub catalog: ArchetypeCatalog,
}

impl ReferenceData {
    pub fn standard() -> Self {
        Self {
            combination: CombinationTable::king_wen(),
            compatibility: CompatibilityMatrix::standard(),
            stability: StabilityWeights::standard(),
            partition: FacetPartition::standard(),
            catalog: ArchetypeCatalog::standard(),
        }
    }

    /// Load from JSON. A missing `catalog` falls back to the standard one.
    pub fn from_json_str(json: &str) -> Result<Self, TriadError> {
        let file: ReferenceFile = serde_json::from_str(json)
            .map_err(|e| TriadError::InvalidReference(e.to_string()))?;
        let catalog = match file.catalog {
            Some(records) => ArchetypeCatalog::new(records)?,
            None => ArchetypeCatalog::standard(),
        };
        Ok(Self {
            combination: CombinationTable::new(file.combination)?,
            compatibility: CompatibilityMatrix::new(file.compatibility)?,
            stability: StabilityWeights::new(file.stability)?,
            partition: FacetPartition::new(&file.partition.expressive)?,
            catalog,
        })
    }

    pub fn to_json_string(&self) -> Result<String, TriadError> {
        serde_json::to_string(self).map_err(|e| TriadError::InvalidReference(e.to_string()))
    }

    /// BLAKE3 over the canonical JSON form, hex encoded.
    pub fn digest(&self) -> Result<String, TriadError> {
        let bytes =
            serde_json::to_vec(self).map_err(|e| TriadError::InvalidReference(e.to_string()))?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::standard()
    }
}

const KING_WEN: [[u8; 8]; 8] = [
    [1, 10, 13, 25, 44, 6, 33, 12],
    [43, 58, 49, 17, 28, 47, 31, 45],
    [14, 38, 30, 21, 50, 64, 56, 35],
    [34, 54, 55, 51, 32, 40, 62, 16],
    [9, 61, 37, 42, 57, 59, 53, 20],
    [5, 60, 63, 3, 48, 29, 39, 8],
    [26, 41, 22, 27, 18, 4, 52, 23],
    [11, 19, 36, 24, 46, 7, 15, 2],
];

const STANDARD_COMPATIBILITY: [[f64; 8]; 8] = [
    [1.0, 0.8, 0.9, 0.7, 0.4, 0.5, 0.6, 0.2],
    [0.8, 1.0, 0.7, 0.6, 0.8, 0.4, 0.3, 0.7],
    [0.9, 0.7, 1.0, 0.5, 0.6, 0.2, 0.4, 0.8],
    [0.7, 0.6, 0.5, 1.0, 0.3, 0.8, 0.2, 0.4],
    [0.4, 0.8, 0.6, 0.3, 1.0, 0.7, 0.8, 0.9],
    [0.5, 0.4, 0.2, 0.8, 0.7, 1.0, 0.9, 0.6],
    [0.6, 0.3, 0.4, 0.2, 0.8, 0.9, 1.0, 0.7],
    [0.2, 0.7, 0.8, 0.4, 0.9, 0.6, 0.7, 1.0],
];

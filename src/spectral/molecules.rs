//! Molecular absorption window table
//!
//! Each molecule maps to an ordered list of `[min, max]` wavelength windows
//! (nm) where it has prominent absorption bands. The table is built once when
//! an analyzer is constructed and never mutated afterwards.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Molecules searched for in transmission spectra
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Molecule {
    /// Water
    H2O,
    /// Carbon dioxide
    CO2,
    /// Methane
    CH4,
    /// Molecular oxygen
    O2,
    /// Molecular nitrogen
    N2,
    /// Sulfur dioxide
    SO2,
    /// Ammonia
    NH3,
    /// Sodium
    Na,
    /// Potassium
    K,
    /// Ozone
    O3,
}

impl Molecule {
    /// All molecules in table order
    pub const ALL: [Molecule; 10] = [
        Molecule::H2O,
        Molecule::CO2,
        Molecule::CH4,
        Molecule::O2,
        Molecule::N2,
        Molecule::SO2,
        Molecule::NH3,
        Molecule::Na,
        Molecule::K,
        Molecule::O3,
    ];

    /// Chemical formula
    pub fn name(&self) -> &'static str {
        match self {
            Molecule::H2O => "H2O",
            Molecule::CO2 => "CO2",
            Molecule::CH4 => "CH4",
            Molecule::O2 => "O2",
            Molecule::N2 => "N2",
            Molecule::SO2 => "SO2",
            Molecule::NH3 => "NH3",
            Molecule::Na => "Na",
            Molecule::K => "K",
            Molecule::O3 => "O3",
        }
    }
}

/// Wavelength window in nm, `min < max`
pub type Window = (f64, f64);

/// Absorption windows for one molecule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeWindows {
    /// Molecule
    pub molecule: Molecule,
    /// Ordered windows
    pub windows: Vec<Window>,
}

/// Immutable molecule → windows table
///
/// Serializes as a list of entries; deserialization validates like
/// [`MoleculeWindowTable::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MoleculeWindows>", into = "Vec<MoleculeWindows>")]
pub struct MoleculeWindowTable {
    entries: Vec<MoleculeWindows>,
}

impl MoleculeWindowTable {
    /// Standard table covering visible to mid-infrared bands
    pub fn standard() -> Self {
        let entries = vec![
            (
                Molecule::H2O,
                vec![(1100.0, 1200.0), (1350.0, 1450.0), (1800.0, 1950.0), (2600.0, 2800.0)],
            ),
            (
                Molecule::CO2,
                vec![(1960.0, 2080.0), (4200.0, 4400.0), (14500.0, 15500.0)],
            ),
            (
                Molecule::CH4,
                vec![(1630.0, 1750.0), (2200.0, 2400.0), (3200.0, 3450.0)],
            ),
            (Molecule::O2, vec![(755.0, 775.0), (1260.0, 1280.0)]),
            (Molecule::N2, vec![(4100.0, 4180.0)]),
            (Molecule::SO2, vec![(4000.0, 4090.0), (7200.0, 7500.0)]),
            (Molecule::NH3, vec![(1500.0, 1550.0), (10300.0, 10700.0)]),
            (Molecule::Na, vec![(588.0, 590.0)]),
            (Molecule::K, vec![(766.0, 770.0)]),
            (Molecule::O3, vec![(550.0, 650.0), (9500.0, 9700.0)]),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|(molecule, windows)| MoleculeWindows { molecule, windows })
                .collect(),
        }
    }

    /// Build a custom table
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if a molecule appears twice or a
    /// window is not a finite `min < max` pair.
    pub fn new(entries: Vec<MoleculeWindows>) -> Result<Self, AnalysisError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.molecule == entry.molecule) {
                return Err(AnalysisError::InvalidConfig(format!(
                    "duplicate molecule {} in window table",
                    entry.molecule.name()
                )));
            }
            for &(min, max) in &entry.windows {
                if !min.is_finite() || !max.is_finite() || min >= max {
                    return Err(AnalysisError::InvalidConfig(format!(
                        "invalid window [{}, {}] for {}",
                        min,
                        max,
                        entry.molecule.name()
                    )));
                }
            }
        }
        Ok(Self { entries })
    }

    /// Entries in table order
    pub fn entries(&self) -> &[MoleculeWindows] {
        &self.entries
    }

    /// Windows for a molecule (empty if absent)
    pub fn windows(&self, molecule: Molecule) -> &[Window] {
        self.entries
            .iter()
            .find(|e| e.molecule == molecule)
            .map(|e| e.windows.as_slice())
            .unwrap_or(&[])
    }
}

impl TryFrom<Vec<MoleculeWindows>> for MoleculeWindowTable {
    type Error = AnalysisError;

    fn try_from(entries: Vec<MoleculeWindows>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<MoleculeWindowTable> for Vec<MoleculeWindows> {
    fn from(table: MoleculeWindowTable) -> Self {
        table.entries
    }
}

impl Default for MoleculeWindowTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_standard_table_covers_all_molecules() {
        let table = MoleculeWindowTable::standard();
        assert_eq!(table.entries().len(), Molecule::ALL.len());
        for (entry, molecule) in table.entries().iter().zip(Molecule::ALL) {
            assert_eq!(entry.molecule, molecule);
            assert!(!entry.windows.is_empty());
            assert!(entry.windows.iter().all(|(lo, hi)| lo < hi));
        }
    }

    #[test]
    fn test_windows_lookup() {
        let table = MoleculeWindowTable::standard();
        assert_eq!(table.windows(Molecule::Na), &[(588.0, 590.0)]);
        assert_eq!(table.windows(Molecule::O2).len(), 2);
    }

    #[test]
    fn test_custom_table_validation() {
        let bad = MoleculeWindowTable::new(vec![MoleculeWindows {
            molecule: Molecule::H2O,
            windows: vec![(1200.0, 1100.0)],
        }]);
        assert!(bad.is_err());

        let dup = MoleculeWindowTable::new(vec![
            MoleculeWindows {
                molecule: Molecule::K,
                windows: vec![(766.0, 770.0)],
            },
            MoleculeWindows {
                molecule: Molecule::K,
                windows: vec![(1000.0, 1010.0)],
            },
        ]);
        assert!(dup.is_err());

        let ok = MoleculeWindowTable::new(vec![MoleculeWindows {
            molecule: Molecule::CH4,
            windows: vec![(3200.0, 3450.0)],
        }])
        .unwrap();
        assert!(ok.windows(Molecule::H2O).is_empty());
    }

    #[test]
    fn test_deserialize_validates_entries() {
        let table: MoleculeWindowTable = serde_json::from_value(json!([
            { "molecule": "H2O", "windows": [[1350.0, 1450.0]] },
            { "molecule": "CO2", "windows": [[1960.0, 2080.0]] },
        ]))
        .unwrap();
        assert_eq!(table.windows(Molecule::CO2), &[(1960.0, 2080.0)]);

        let duplicate = serde_json::from_value::<MoleculeWindowTable>(json!([
            { "molecule": "H2O", "windows": [[1350.0, 1450.0]] },
            { "molecule": "H2O", "windows": [[1800.0, 1950.0]] },
        ]));
        assert!(duplicate.is_err());

        let inverted = serde_json::from_value::<MoleculeWindowTable>(json!([
            { "molecule": "O2", "windows": [[775.0, 755.0]] },
        ]));
        assert!(inverted.is_err());
    }

    #[test]
    fn test_serializes_as_entry_list() {
        let table = MoleculeWindowTable::standard();
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(Molecule::ALL.len()));
        let back: MoleculeWindowTable = serde_json::from_value(value).unwrap();
        assert_eq!(back, table);
    }
}

//! Biosignature assessment and follow-up recommendations
//!
//! Rules are evaluated in precedence order; the first match wins:
//!
//! | # | Condition                                   | Level  |
//! |---|---------------------------------------------|--------|
//! | 1 | O2 and CH4 both present                     | High   |
//! | 2 | H2O present with CO2 or N2                  | Medium |
//! | 3 | ≥ 3 molecules detected and mean SNR > 12    | Medium |
//! | 4 | mean SNR below the detection minimum        | Low    |
//! | 5 | otherwise                                   | Low    |
//!
//! A molecule is "present" when it is detected with confidence above the
//! presence threshold (0.25 by default).

use super::molecules::Molecule;
use super::result::{BiosignatureAssessment, BiosignatureLevel, MoleculeDetection};
use crate::config::SpectralConfig;

/// Mean SNR required by the multi-species rule
const MULTI_SPECIES_MIN_SNR: f64 = 12.0;

/// SNR below which longer exposures are recommended
const LOW_SNR_RECOMMENDATION: f64 = 10.0;

/// Distance in parsecs beyond which space-based instruments are recommended
const SPACE_BASED_DISTANCE_PC: f64 = 500.0;

/// Evaluate the biosignature rules
pub fn assess_biosignature(
    molecules: &[MoleculeDetection],
    average_snr: f64,
    config: &SpectralConfig,
) -> BiosignatureAssessment {
    let present = |molecule: Molecule| {
        molecules.iter().any(|m| {
            m.molecule == molecule && m.detected && m.confidence > config.presence_confidence
        })
    };
    let detected_count = molecules.iter().filter(|m| m.detected).count();

    let (level, reason) = if present(Molecule::O2) && present(Molecule::CH4) {
        (
            BiosignatureLevel::High,
            "O2 and CH4 together: possible chemical disequilibrium",
        )
    } else if present(Molecule::H2O) && (present(Molecule::CO2) || present(Molecule::N2)) {
        (
            BiosignatureLevel::Medium,
            "Water with a background gas (CO2 or N2)",
        )
    } else if detected_count >= 3 && average_snr > MULTI_SPECIES_MIN_SNR {
        (
            BiosignatureLevel::Medium,
            "Multiple species detected at good SNR",
        )
    } else if average_snr < config.min_snr_for_detection {
        (BiosignatureLevel::Low, "Low average SNR")
    } else {
        (BiosignatureLevel::Low, "No clear biosignature pattern")
    };

    log::debug!(
        "Biosignature assessment: {} ({}), {} molecules detected, mean SNR {:.1}",
        level.as_str(),
        reason,
        detected_count,
        average_snr
    );

    BiosignatureAssessment {
        level,
        reason: reason.to_string(),
    }
}

/// Follow-up observation recommendations
///
/// The telluric reference-star recommendation is always included.
pub fn recommendations(
    average_snr: f64,
    level: BiosignatureLevel,
    distance_pc: f64,
) -> Vec<String> {
    let mut out = Vec::new();

    if average_snr < LOW_SNR_RECOMMENDATION {
        out.push(format!(
            "Increase exposure time or stack more transits (mean SNR {:.1} < {:.0})",
            average_snr, LOW_SNR_RECOMMENDATION
        ));
    }
    if level == BiosignatureLevel::High {
        out.push(
            "Schedule immediate multi-epoch follow-up to confirm the disequilibrium signal"
                .to_string(),
        );
    }
    out.push("Observe a reference star for telluric correction".to_string());
    if distance_pc > SPACE_BASED_DISTANCE_PC {
        out.push(format!(
            "Target is {:.0} pc away: use space-based instruments",
            distance_pc
        ));
    }

    out
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crime indicator taxonomy for the departmental statistics dataset.
//!
//! The French Ministry of the Interior publishes recorded offenses per
//! department under a fixed list of indicator labels (`indicateur`). This
//! crate maps those labels onto a typed [`Indicator`] enum and groups them
//! into broad [`CrimeCategory`] families. Labels are matched exactly as
//! published, accents and apostrophes included.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Broad grouping of indicators, used to organize selectors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CrimeCategory {
    /// Offenses against persons
    Violent,
    /// Theft, burglary and damage to property
    Property,
    /// Drug trafficking and use
    DrugNarcotics,
    /// Fraud and payment-method offenses
    FraudFinancial,
}

impl CrimeCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Violent,
            Self::Property,
            Self::DrugNarcotics,
            Self::FraudFinancial,
        ]
    }
}

/// An indicator label as published in the departmental crime dataset.
///
/// Serializes to (and parses from) the exact French label.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
pub enum Indicator {
    // ── Violent ──────────────────────────────────────────
    #[serde(rename = "Homicides")]
    #[strum(serialize = "Homicides")]
    Homicides,
    #[serde(rename = "Tentatives d'homicide")]
    #[strum(serialize = "Tentatives d'homicide")]
    AttemptedHomicides,
    #[serde(rename = "Coups et blessures volontaires")]
    #[strum(serialize = "Coups et blessures volontaires")]
    IntentionalAssault,
    #[serde(rename = "Coups et blessures volontaires intrafamiliaux")]
    #[strum(serialize = "Coups et blessures volontaires intrafamiliaux")]
    DomesticAssault,
    #[serde(rename = "Autres coups et blessures volontaires")]
    #[strum(serialize = "Autres coups et blessures volontaires")]
    OtherAssault,
    #[serde(rename = "Violences sexuelles")]
    #[strum(serialize = "Violences sexuelles")]
    SexualViolence,
    #[serde(rename = "Vols avec armes")]
    #[strum(serialize = "Vols avec armes")]
    ArmedRobbery,
    #[serde(rename = "Vols violents sans arme")]
    #[strum(serialize = "Vols violents sans arme")]
    UnarmedViolentRobbery,

    // ── Property ────────────────────────────────────────
    #[serde(rename = "Vols sans violence contre des personnes")]
    #[strum(serialize = "Vols sans violence contre des personnes")]
    NonViolentTheft,
    #[serde(rename = "Cambriolages de logement")]
    #[strum(serialize = "Cambriolages de logement")]
    HomeBurglary,
    #[serde(rename = "Vols de véhicules")]
    #[strum(serialize = "Vols de véhicules")]
    VehicleTheft,
    #[serde(rename = "Vols dans les véhicules")]
    #[strum(serialize = "Vols dans les véhicules")]
    TheftFromVehicles,
    #[serde(rename = "Vols d'accessoires sur véhicules")]
    #[strum(serialize = "Vols d'accessoires sur véhicules")]
    VehicleAccessoryTheft,
    #[serde(rename = "Destructions et dégradations volontaires")]
    #[strum(serialize = "Destructions et dégradations volontaires")]
    Vandalism,

    // ── Drug/Narcotics ──────────────────────────────────
    #[serde(rename = "Trafic de stupéfiants")]
    #[strum(serialize = "Trafic de stupéfiants")]
    DrugTrafficking,
    #[serde(rename = "Usage de stupéfiants")]
    #[strum(serialize = "Usage de stupéfiants")]
    DrugUse,

    // ── Fraud/Financial ─────────────────────────────────
    #[serde(rename = "Escroqueries")]
    #[strum(serialize = "Escroqueries")]
    Fraud,
}

impl Indicator {
    /// The five indicators the dashboard tracks by default, in display order.
    pub const TRACKED: [Self; 5] = [
        Self::Homicides,
        Self::DrugTrafficking,
        Self::Vandalism,
        Self::VehicleAccessoryTheft,
        Self::TheftFromVehicles,
    ];

    /// Returns the parent [`CrimeCategory`] for this indicator.
    #[must_use]
    pub const fn category(self) -> CrimeCategory {
        match self {
            Self::Homicides
            | Self::AttemptedHomicides
            | Self::IntentionalAssault
            | Self::DomesticAssault
            | Self::OtherAssault
            | Self::SexualViolence
            | Self::ArmedRobbery
            | Self::UnarmedViolentRobbery => CrimeCategory::Violent,

            Self::NonViolentTheft
            | Self::HomeBurglary
            | Self::VehicleTheft
            | Self::TheftFromVehicles
            | Self::VehicleAccessoryTheft
            | Self::Vandalism => CrimeCategory::Property,

            Self::DrugTrafficking | Self::DrugUse => CrimeCategory::DrugNarcotics,

            Self::Fraud => CrimeCategory::FraudFinancial,
        }
    }

    /// Returns the published label (same as [`Display`](std::fmt::Display)).
    #[must_use]
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Returns all indicators belonging to the given category.
    #[must_use]
    pub fn for_category(category: CrimeCategory) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|indicator| indicator.category() == category)
            .collect()
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Homicides,
            Self::AttemptedHomicides,
            Self::IntentionalAssault,
            Self::DomesticAssault,
            Self::OtherAssault,
            Self::SexualViolence,
            Self::ArmedRobbery,
            Self::UnarmedViolentRobbery,
            Self::NonViolentTheft,
            Self::HomeBurglary,
            Self::VehicleTheft,
            Self::TheftFromVehicles,
            Self::VehicleAccessoryTheft,
            Self::Vandalism,
            Self::DrugTrafficking,
            Self::DrugUse,
            Self::Fraud,
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn indicator_category_consistency() {
        for indicator in Indicator::all() {
            let parent = indicator.category();
            assert!(
                Indicator::for_category(parent).contains(indicator),
                "{indicator:?} claims parent {parent:?} but isn't in for_category result"
            );
        }
    }

    #[test]
    fn parses_published_labels() {
        assert_eq!(
            Indicator::from_str("Vols d'accessoires sur véhicules").unwrap(),
            Indicator::VehicleAccessoryTheft
        );
        assert_eq!(
            Indicator::from_str("Trafic de stupéfiants").unwrap(),
            Indicator::DrugTrafficking
        );
        assert!(Indicator::from_str("homicides").is_err());
    }

    #[test]
    fn display_matches_label() {
        for indicator in Indicator::all() {
            assert_eq!(indicator.to_string(), indicator.label());
            assert_eq!(Indicator::from_str(indicator.label()).unwrap(), *indicator);
        }
    }

    #[test]
    fn serde_uses_published_label() {
        let json = serde_json::to_string(&Indicator::Vandalism).unwrap();
        assert_eq!(json, "\"Destructions et dégradations volontaires\"");
    }

    #[test]
    fn tracked_indicators_are_distinct() {
        let mut seen = std::collections::BTreeSet::new();
        for indicator in Indicator::TRACKED {
            assert!(seen.insert(indicator), "duplicate tracked {indicator:?}");
        }
    }
}

// Copyright (c) 2024 Mike Tsao

use crate::types::SequenceSpec;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Traditional rhythms that turn out to be Euclidean. From Godfried
/// Toussaint, "The Euclidean Algorithm Generates Traditional Musical
/// Rhythms" (2005). The rotation is whatever [generate()](super::generate())
/// produces with zero offset, which won't always match the tradition's
/// downbeat.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EuclideanPreset {
    /// E(2,5), a Persian rhythm.
    KhafifERamal,
    /// E(3,4), the cumbia.
    Cumbia,
    /// E(3,7), a Bulgarian folk rhythm.
    Ruchenitza,
    /// E(3,8), the Cuban tresillo.
    Tresillo,
    /// E(4,9), a Turkish aksak rhythm.
    Aksak,
    /// E(5,6), the York-Samai pattern.
    YorkSamai,
    /// E(5,8), the Cuban cinquillo.
    Cinquillo,
    /// E(5,9), the Arab agsag-samai.
    AgsagSamai,
    /// E(5,12), a South African Venda clapping rhythm.
    Venda,
    /// E(5,16), the bossa nova.
    BossaNova,
    /// E(7,12), the West African bell pattern.
    Bembe,
    /// E(7,16), a Brazilian samba necklace.
    Samba,
}
impl EuclideanPreset {
    /// Returns (pulses, steps).
    pub const fn pulses_and_steps(&self) -> (i64, usize) {
        match self {
            EuclideanPreset::KhafifERamal => (2, 5),
            EuclideanPreset::Cumbia => (3, 4),
            EuclideanPreset::Ruchenitza => (3, 7),
            EuclideanPreset::Tresillo => (3, 8),
            EuclideanPreset::Aksak => (4, 9),
            EuclideanPreset::YorkSamai => (5, 6),
            EuclideanPreset::Cinquillo => (5, 8),
            EuclideanPreset::AgsagSamai => (5, 9),
            EuclideanPreset::Venda => (5, 12),
            EuclideanPreset::BossaNova => (5, 16),
            EuclideanPreset::Bembe => (7, 12),
            EuclideanPreset::Samba => (7, 16),
        }
    }

    /// The [SequenceSpec] for this rhythm, unrotated.
    pub const fn spec(&self) -> SequenceSpec {
        let (pulses, steps) = self.pulses_and_steps();
        SequenceSpec::new_with(steps, pulses, 0)
    }
}
impl From<EuclideanPreset> for SequenceSpec {
    fn from(value: EuclideanPreset) -> Self {
        value.spec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn every_preset_generates() {
        assert_eq!(EuclideanPreset::iter().count(), EuclideanPreset::COUNT);
        for preset in EuclideanPreset::iter() {
            let (pulses, steps) = preset.pulses_and_steps();
            let sequence = preset.spec().generate().unwrap();
            assert_eq!(sequence.len(), steps, "{preset}");
            assert_eq!(sequence.pulse_count(), pulses as usize, "{preset}");
        }
    }

    #[test]
    fn names() {
        assert_eq!(EuclideanPreset::BossaNova.to_string(), "bossa-nova");
        let name: &'static str = EuclideanPreset::KhafifERamal.into();
        assert_eq!(name, "khafif-e-ramal");
        assert_eq!(
            EuclideanPreset::from_str("tresillo").unwrap(),
            EuclideanPreset::Tresillo
        );
        assert!(EuclideanPreset::from_str("polka").is_err());
        assert_eq!(
            SequenceSpec::from(EuclideanPreset::Tresillo)
                .generate()
                .unwrap()
                .to_string(),
            "x..x..x."
        );
    }
}

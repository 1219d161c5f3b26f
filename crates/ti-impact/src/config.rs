//! Service configuration.

use ti_core::{GeoPoint, Weight};

use crate::{ImpactError, ImpactResult};

/// Knobs for [`ImpactService`][crate::ImpactService].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ServiceConfig {
    /// Weight used when a request does not name one.
    pub default_weight: Weight,
    /// Number of pairs in a generated default sample.  1..=10_000.
    pub default_pair_count: usize,
    /// Seed for the default sample; `None` draws from OS entropy.
    pub default_pair_seed: Option<u64>,
    /// Restrict sampled nodes to this radius around `sample_center`.
    /// 0.1..=50.0 when set.
    pub sample_radius_km: Option<f64>,
    /// Centre for radius sampling; `None` uses the network's bounding box.
    pub sample_center: Option<GeoPoint>,
    /// Compute baseline routes as soon as default pairs change.
    pub prewarm_cache: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_weight:     Weight::TravelTime,
            default_pair_count: 100,
            default_pair_seed:  None,
            sample_radius_km:   Some(2.0),
            sample_center:      None,
            prewarm_cache:      true,
        }
    }
}

impl ServiceConfig {
    pub const MAX_PAIR_COUNT: usize = 10_000;
    pub const RADIUS_RANGE_KM: std::ops::RangeInclusive<f64> = 0.1..=50.0;

    pub fn validate(&self) -> ImpactResult<()> {
        validate_pair_count(self.default_pair_count)?;
        validate_radius(self.sample_radius_km)
    }
}

pub(crate) fn validate_pair_count(count: usize) -> ImpactResult<()> {
    if count == 0 || count > ServiceConfig::MAX_PAIR_COUNT {
        return Err(ImpactError::Config(format!(
            "pair count {count} outside 1..={}",
            ServiceConfig::MAX_PAIR_COUNT
        )));
    }
    Ok(())
}

pub(crate) fn validate_radius(radius_km: Option<f64>) -> ImpactResult<()> {
    match radius_km {
        Some(r) if !ServiceConfig::RADIUS_RANGE_KM.contains(&r) => Err(ImpactError::Config(format!(
            "sample radius {r} km outside {:?}",
            ServiceConfig::RADIUS_RANGE_KM
        ))),
        _ => Ok(()),
    }
}

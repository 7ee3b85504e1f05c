//! Companies and the tracks they own.

use serde::{Deserialize, Serialize};

use crate::domain::{DevId, Developer};

/// How often a company rotates its ops/interrupt pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpsRotation {
    #[default]
    Daily,
    Weekly,
}

/// A company with developers on the roster.
///
/// Company identity is its case-insensitive name; the company owns one
/// ops/interrupt track derived from that name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    name: String,

    /// Whether the company takes part in the ops/interrupt rotation.
    #[serde(default)]
    devops: bool,

    /// Rotation cadence for the company ops pair.
    #[serde(default)]
    ops_rotation: OpsRotation,
}

impl Company {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            devops: false,
            ops_rotation: OpsRotation::Daily,
        }
    }

    /// Enable ops rotation with the given cadence.
    pub fn with_devops(mut self, ops_rotation: OpsRotation) -> Self {
        self.devops = true;
        self.ops_rotation = ops_rotation;
        self
    }

    /// Canonical (lowercase) company name.
    pub fn name(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn original_name(&self) -> &str {
        &self.name
    }

    pub fn is_devops(&self) -> bool {
        self.devops
    }

    pub fn ops_rotation(&self) -> OpsRotation {
        self.ops_rotation
    }

    /// The interrupt/ops track owned by this company.
    pub fn ops_track(&self) -> String {
        format!("{}-ops/interrupt", self.name.to_uppercase())
    }

    /// The company-owned track among today's tracks, if selected.
    pub fn company_track<'a>(&self, tracks: &'a [String]) -> Option<&'a String> {
        tracks.iter().find(|track| self.is_company_track(track))
    }

    /// A track is company-owned when its name starts with `<company>-`.
    pub fn is_company_track(&self, track: &str) -> bool {
        track
            .split('-')
            .next()
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(&self.name()))
    }

    /// Whether a developer belongs to this company.
    pub fn has_member(&self, dev: &Developer) -> bool {
        dev.company.to_lowercase() == self.name()
    }

    /// Ids of today's developers belonging to this company.
    pub fn members(&self, devs: &[Developer]) -> Vec<DevId> {
        devs.iter()
            .filter(|dev| self.has_member(dev))
            .map(|dev| dev.id.clone())
            .collect()
    }

    /// Ids of today's experienced (non-onboarding) company developers.
    pub fn experienced_members(&self, devs: &[Developer]) -> Vec<DevId> {
        devs.iter()
            .filter(|dev| !dev.is_new)
            .filter(|dev| self.has_member(dev))
            .map(|dev| dev.id.clone())
            .collect()
    }
}

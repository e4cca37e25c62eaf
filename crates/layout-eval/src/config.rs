use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-supplied evaluation settings. Read-only once handed to an [`crate::Evaluator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutConfig {
    /// Minimum clear gap between any two nodes.
    pub node_separation: f64,
    /// Canvas width; only consulted by the `withinBounds` requirement.
    pub width: f64,
    /// Canvas height; only consulted by the `withinBounds` requirement.
    pub height: f64,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Calibration constants for balance, confidence and compliance.
///
/// The defaults are empirical and kept stable so that scores stay comparable across releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ScoringConfig {
    pub base_confidence: f64,
    pub zero_overlap_bonus: f64,
    /// Subtracted once per overlapping pair.
    pub overlap_penalty: f64,
    pub fast_threshold_ms: f64,
    pub fast_bonus: f64,
    pub slow_threshold_ms: f64,
    pub slow_penalty: f64,
    /// Added when the layout has at least one node and one edge.
    pub structure_bonus: f64,
    pub compliance_time_budget_ms: f64,
    /// Fraction of requirements that must hold for a layout to be compliant.
    pub min_compliance_score: f64,
    /// Divisor applied to the center variance before it is turned into a balance score.
    pub balance_variance_scale: f64,
    /// Cross products smaller than this in magnitude count as collinear.
    pub collinear_tolerance: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_confidence: 0.8,
            zero_overlap_bonus: 0.15,
            overlap_penalty: 0.10,
            fast_threshold_ms: 2000.0,
            fast_bonus: 0.05,
            slow_threshold_ms: 5000.0,
            slow_penalty: 0.10,
            structure_bonus: 0.05,
            compliance_time_budget_ms: 5000.0,
            min_compliance_score: 0.75,
            balance_variance_scale: 100_000.0,
            collinear_tolerance: 1e-4,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("scoring.zeroOverlapBonus", self.zero_overlap_bonus),
            ("scoring.overlapPenalty", self.overlap_penalty),
            ("scoring.fastThresholdMs", self.fast_threshold_ms),
            ("scoring.fastBonus", self.fast_bonus),
            ("scoring.slowThresholdMs", self.slow_threshold_ms),
            ("scoring.slowPenalty", self.slow_penalty),
            ("scoring.structureBonus", self.structure_bonus),
            ("scoring.complianceTimeBudgetMs", self.compliance_time_budget_ms),
            ("scoring.collinearTolerance", self.collinear_tolerance),
        ];
        for (field, value) in non_negative {
            ensure(field, value, value >= 0.0)?;
        }
        let unit = [
            ("scoring.baseConfidence", self.base_confidence),
            ("scoring.minComplianceScore", self.min_compliance_score),
        ];
        for (field, value) in unit {
            ensure(field, value, (0.0..=1.0).contains(&value))?;
        }
        ensure(
            "scoring.balanceVarianceScale",
            self.balance_variance_scale,
            self.balance_variance_scale > 0.0,
        )?;
        // A time can earn the fast bonus or the slow penalty, never both.
        ensure(
            "scoring.fastThresholdMs",
            self.fast_threshold_ms,
            self.fast_threshold_ms <= self.slow_threshold_ms,
        )
    }
}

impl LayoutConfig {
    pub fn new(node_separation: f64, width: f64, height: f64) -> Self {
        Self {
            node_separation,
            width,
            height,
            scoring: ScoringConfig::default(),
        }
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Deep-merges `overrides` onto this config and validates the result.
    ///
    /// Objects are merged key by key; any other JSON value replaces what was there.
    pub fn with_overrides(&self, overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(self)?;
        deep_merge_value(&mut base, overrides);
        let merged: Self = serde_json::from_value(base)?;
        merged.validate()?;
        Ok(merged)
    }

    pub fn validate(&self) -> Result<()> {
        ensure(
            "nodeSeparation",
            self.node_separation,
            self.node_separation >= 0.0,
        )?;
        ensure("width", self.width, self.width > 0.0)?;
        ensure("height", self.height, self.height > 0.0)?;
        self.scoring.validate()
    }
}

fn ensure(field: &'static str, value: f64, ok: bool) -> Result<()> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(Error::InvalidConfig { field, value })
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pyramid configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! scheme = "adjunction"
//! dtype = "i32"
//! order = 3
//! max_levels = 8
//! scratch_budget = "64M"
//! ```

use crate::PyramidError;
use array_core::DType;
use reduction_schemes::SchemeKind;
use scratch_pool::{ScratchBudget, ScratchPool};
use std::path::Path;

/// Configuration for pyramid construction.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PyramidConfig {
    /// Scheme name: `"adjunction"`, `"sun-maragos"`, or `"binomial"`.
    pub scheme: String,
    /// Element type name (e.g. `"i32"`, `"f32"`).
    pub dtype: String,
    /// Binomial order (ignored by the morphological schemes).
    #[serde(default = "default_order")]
    pub order: usize,
    /// Optional cap on the number of reductions.
    pub max_levels: Option<usize>,
    /// Optional scratch budget (human-readable, e.g. `"64M"`).
    pub scratch_budget: Option<String>,
}

fn default_order() -> usize {
    3
}

impl PyramidConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, PyramidError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PyramidError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, PyramidError> {
        toml::from_str(toml_str)
            .map_err(|e| PyramidError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, PyramidError> {
        toml::to_string_pretty(self)
            .map_err(|e| PyramidError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Resolves the scheme name against the closed scheme set.
    pub fn scheme_kind(&self) -> Result<SchemeKind, PyramidError> {
        SchemeKind::parse(&self.scheme).map_err(PyramidError::Scheme)
    }

    /// Resolves the element type name.
    pub fn dtype(&self) -> Result<DType, PyramidError> {
        DType::parse(&self.dtype).map_err(PyramidError::Array)
    }

    /// Parses the scratch budget, if one is configured.
    pub fn parse_budget(&self) -> Result<Option<ScratchBudget>, PyramidError> {
        self.scratch_budget
            .as_deref()
            .map(ScratchBudget::parse)
            .transpose()
            .map_err(PyramidError::Pool)
    }

    /// Creates a scratch pool honoring the configured budget.
    pub fn create_pool(&self) -> Result<ScratchPool, PyramidError> {
        Ok(match self.parse_budget()? {
            Some(budget) => ScratchPool::with_budget(budget),
            None => ScratchPool::new(),
        })
    }
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            scheme: "adjunction".to_string(),
            dtype: "f32".to_string(),
            order: 3,
            max_levels: None,
            scratch_budget: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = PyramidConfig::default();
        assert_eq!(c.scheme_kind().unwrap(), SchemeKind::Adjunction);
        assert_eq!(c.dtype().unwrap(), DType::F32);
        assert_eq!(c.order, 3);
        assert!(c.parse_budget().unwrap().is_none());
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
scheme = "binomial"
dtype = "f64"
order = 5
max_levels = 4
scratch_budget = "16M"
"#;
        let c = PyramidConfig::from_toml(toml).unwrap();
        assert_eq!(c.scheme_kind().unwrap(), SchemeKind::Binomial);
        assert_eq!(c.dtype().unwrap(), DType::F64);
        assert_eq!(c.order, 5);
        assert_eq!(c.max_levels, Some(4));
        assert_eq!(c.parse_budget().unwrap().unwrap().as_mb(), 16);
    }

    #[test]
    fn test_order_defaults_when_absent() {
        let c = PyramidConfig::from_toml("scheme = \"adjunction\"\ndtype = \"u8\"").unwrap();
        assert_eq!(c.order, 3);
        assert_eq!(c.max_levels, None);
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = PyramidConfig::default();
        let toml = c.to_toml().unwrap();
        let back = PyramidConfig::from_toml(&toml).unwrap();
        assert_eq!(back.scheme, c.scheme);
        assert_eq!(back.dtype, c.dtype);
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let c = PyramidConfig {
            scheme: "gaussian".into(),
            ..Default::default()
        };
        assert!(c.scheme_kind().is_err());
    }

    #[test]
    fn test_unknown_dtype_rejected() {
        let c = PyramidConfig {
            dtype: "f16".into(),
            ..Default::default()
        };
        assert!(c.dtype().is_err());
    }

    #[test]
    fn test_create_pool_with_budget() {
        let c = PyramidConfig {
            scratch_budget: Some("1M".into()),
            ..Default::default()
        };
        let pool = c.create_pool().unwrap();
        assert_eq!(pool.budget().unwrap().as_mb(), 1);
    }
}

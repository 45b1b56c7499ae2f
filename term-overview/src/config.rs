//! Report configuration.

use serde::{Deserialize, Serialize};

use crate::error::{OverviewError, Result};
use crate::metrics::Axis;

/// Default cap on the number of groups a grouped report may produce.
pub const DEFAULT_MAX_GROUPS: usize = 10_000;

/// Configuration of an overview report.
///
/// # Example
///
/// ```rust
/// use term_overview::config::ReportConfig;
/// use term_overview::metrics::Axis;
///
/// let config = ReportConfig::from_json(r#"{"group_by": "region", "axis": {"component": 0}}"#)
///     .unwrap();
/// assert_eq!(config.group_by.as_deref(), Some("region"));
/// assert_eq!(config.axis, Axis::Component(0));
/// assert_eq!(config.max_groups, Some(10_000));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Column whose distinct values partition rows before metrics are computed.
    pub group_by: Option<String>,

    /// Orientation forwarded to the numeric metrics.
    pub axis: Axis,

    /// Maximum number of groups; `None` disables the limit.
    pub max_groups: Option<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            group_by: None,
            axis: Axis::default(),
            max_groups: Some(DEFAULT_MAX_GROUPS),
        }
    }
}

impl ReportConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the grouping column.
    pub fn with_group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by = Some(column.into());
        self
    }

    /// Sets the axis for numeric metrics.
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Sets the maximum number of groups.
    pub fn with_max_groups(mut self, max: usize) -> Self {
        self.max_groups = Some(max);
        self
    }

    /// Removes the group limit.
    pub fn without_group_limit(mut self) -> Self {
        self.max_groups = None;
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks settings that cannot be expressed in the types.
    pub fn validate(&self) -> Result<()> {
        if self.max_groups == Some(0) {
            return Err(OverviewError::invalid_config("max_groups must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.group_by, None);
        assert_eq!(config.axis, Axis::Flatten);
        assert_eq!(config.max_groups, Some(DEFAULT_MAX_GROUPS));
    }

    #[test]
    fn test_builder() {
        let config = ReportConfig::new()
            .with_group_by("g")
            .with_axis(Axis::Component(2))
            .without_group_limit();
        assert_eq!(config.group_by.as_deref(), Some("g"));
        assert_eq!(config.axis, Axis::Component(2));
        assert_eq!(config.max_groups, None);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(ReportConfig::from_json("{}").unwrap(), ReportConfig::default());
        let config = ReportConfig::from_json(r#"{"max_groups": null}"#).unwrap();
        assert_eq!(config.max_groups, None);
    }

    #[test]
    fn test_empty_group_key_is_left_to_lookup() {
        let config = ReportConfig::from_json(r#"{"group_by": ""}"#).unwrap();
        assert_eq!(config.group_by.as_deref(), Some(""));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ReportConfig::from_json(r#"{"max_groups": 0}"#),
            Err(OverviewError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            ReportConfig::from_json("{not json"),
            Err(OverviewError::Serialization(_))
        ));
    }
}

use fuel_core::{FuelError, Result, StatisticKind};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `fuelstats.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatsConfig {
    /// What the statistics pages show and how values are labelled.
    pub display: DisplayConfig,
    /// Chart colours.
    pub theme: ThemeConfig,
}

impl StatsConfig {
    /// Reject values the controllers cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.display.months == 0 {
            return Err(FuelError::Config("display.months must be at least 1".into()));
        }
        if self.display.chart_width == 0 || self.display.chart_height == 0 {
            return Err(FuelError::Config(format!(
                "chart size {}x{} has no area",
                self.display.chart_width, self.display.chart_height
            )));
        }
        Ok(())
    }
}

/// Statistics display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of recent months shown when the host has not picked a range.
    pub months: u32,
    /// Page shown first.
    pub page: StatisticKind,
    /// Initial state of the smoothing checkbox.
    pub smoothing: bool,
    /// Rendered chart width in pixels.
    pub chart_width: u32,
    /// Rendered chart height in pixels.
    pub chart_height: u32,
    /// `strftime` format for interval dates in the labels.
    pub date_format: String,
    /// `strftime` format for the time-axis markers.
    pub month_format: String,
    /// Prefix used for money values, e.g. `"€"`.
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            months: 6,
            page: StatisticKind::AverageConsumption,
            smoothing: false,
            chart_width: 320,
            chart_height: 180,
            date_format: "%d.%m.%Y".to_string(),
            month_format: "%b %y".to_string(),
            currency_symbol: "€".to_string(),
        }
    }
}

/// Chart colours (hex, e.g. `"#151515"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: String,
    pub grid: String,
    pub curve: String,
    pub average: String,
    /// Curve stroke width in pixels.
    pub line_width: u32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#151515".to_string(),
            grid:       "#737373".to_string(),
            curve:      "#ffc900".to_string(),
            average:    "#ff5a36".to_string(),
            line_width: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: StatsConfig = toml::from_str("[display]\nmonths = 12\n").unwrap();
        assert_eq!(cfg.display.months, 12);
        assert_eq!(cfg.display.chart_width, 320);
        assert_eq!(cfg.theme, ThemeConfig::default());
    }

    #[test]
    fn page_uses_snake_case() {
        let cfg: StatsConfig = toml::from_str("[display]\npage = \"price_distance\"\n").unwrap();
        assert_eq!(cfg.display.page, StatisticKind::PriceDistance);
    }

    #[test]
    fn zero_months_is_rejected() {
        let mut cfg = StatsConfig::default();
        cfg.display.months = 0;
        assert!(matches!(cfg.validate(), Err(FuelError::Config(_))));
    }
}

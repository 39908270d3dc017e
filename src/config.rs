//! Stage configuration and preset options.
//!
//! Values arriving from the outside (config files, preset documents, form
//! fields) are read leniently: numbers may be floats or numeric strings,
//! non-numeric values fall back to the default and anything out of range is
//! clamped. Each repair is logged.

use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ConfigError;

pub const CELLS_RANGE: RangeInclusive<i64> = 1..=200;
pub const CELL_PIXELS_RANGE: RangeInclusive<i64> = 1..=50;
pub const GUIDE_WIDTH_RANGE: RangeInclusive<i64> = 1..=10;
pub const SPEED_RANGE: RangeInclusive<i64> = 1..=10;

/// Milliseconds per speed unit
const SPEED_STEP_MS: u64 = 100;

/// Board and presentation settings. Replaced wholesale, never edited in place
/// by the stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageConfig {
    pub n_x_cells: usize,
    pub n_y_cells: usize,
    pub cell_w: u32,
    pub cell_h: u32,
    /// Reserved; guide lines are always one pixel wide.
    pub guide_width: u32,
    pub enable_guides: bool,
    /// 1 (fast) to 10 (slow)
    pub speed: u32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            n_x_cells: 5,
            n_y_cells: 5,
            cell_w: 15,
            cell_h: 15,
            guide_width: 1,
            enable_guides: true,
            speed: 6,
        }
    }
}

impl StageConfig {
    /// Delay between two generations
    pub fn period(&self) -> Duration {
        Duration::from_millis(u64::from(self.speed) * SPEED_STEP_MS)
    }

    /// Surface size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.n_x_cells as u32 * self.cell_w,
            self.n_y_cells as u32 * self.cell_h,
        )
    }

    /// Copy with every numeric field pulled into its accepted range
    pub fn sanitized(self) -> Self {
        Self {
            n_x_cells: clamp_field("nXCells", self.n_x_cells as i64, CELLS_RANGE) as usize,
            n_y_cells: clamp_field("nYCells", self.n_y_cells as i64, CELLS_RANGE) as usize,
            cell_w: clamp_field("cellW", i64::from(self.cell_w), CELL_PIXELS_RANGE) as u32,
            cell_h: clamp_field("cellH", i64::from(self.cell_h), CELL_PIXELS_RANGE) as u32,
            guide_width: clamp_field("guideWidth", i64::from(self.guide_width), GUIDE_WIDTH_RANGE)
                as u32,
            enable_guides: self.enable_guides,
            speed: clamp_field("speed", i64::from(self.speed), SPEED_RANGE) as u32,
        }
    }

    /// Read a config object over the defaults
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let options = PresetOptions::from_value(value).ok_or(ConfigError::NotAnObject)?;
        Ok(options.merge_into(Self::default()))
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        Self::from_value(&value)
    }
}

/// Partial configuration with an optional seed pattern.
///
/// Fields left as `None` keep the value of the configuration they are merged
/// into.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresetOptions {
    pub n_x_cells: Option<usize>,
    pub n_y_cells: Option<usize>,
    pub cell_w: Option<u32>,
    pub cell_h: Option<u32>,
    pub guide_width: Option<u32>,
    pub enable_guides: Option<bool>,
    pub speed: Option<u32>,
    /// Row-major seed, `true` = alive
    pub pattern: Option<Vec<Vec<bool>>>,
}

impl PresetOptions {
    /// Options that set every field of `config`
    pub fn from_config(config: StageConfig) -> Self {
        Self {
            n_x_cells: Some(config.n_x_cells),
            n_y_cells: Some(config.n_y_cells),
            cell_w: Some(config.cell_w),
            cell_h: Some(config.cell_h),
            guide_width: Some(config.guide_width),
            enable_guides: Some(config.enable_guides),
            speed: Some(config.speed),
            pattern: None,
        }
    }

    pub fn with_pattern(mut self, pattern: Vec<Vec<bool>>) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Read options from a JSON value. Returns `None` unless it is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let defaults = StageConfig::default();

        Some(Self {
            n_x_cells: read_numeric(object, "nXCells", CELLS_RANGE, defaults.n_x_cells as i64)
                .map(|v| v as usize),
            n_y_cells: read_numeric(object, "nYCells", CELLS_RANGE, defaults.n_y_cells as i64)
                .map(|v| v as usize),
            cell_w: read_numeric(object, "cellW", CELL_PIXELS_RANGE, defaults.cell_w.into())
                .map(|v| v as u32),
            cell_h: read_numeric(object, "cellH", CELL_PIXELS_RANGE, defaults.cell_h.into())
                .map(|v| v as u32),
            guide_width: read_numeric(
                object,
                "guideWidth",
                GUIDE_WIDTH_RANGE,
                defaults.guide_width.into(),
            )
            .map(|v| v as u32),
            enable_guides: present(object, "enableGuides").map(truthy),
            speed: read_numeric(object, "speed", SPEED_RANGE, defaults.speed.into())
                .map(|v| v as u32),
            pattern: read_pattern(object),
        })
    }

    /// Overlay these options on `base`. The seed pattern is not part of the result.
    pub fn merge_into(&self, base: StageConfig) -> StageConfig {
        StageConfig {
            n_x_cells: self.n_x_cells.unwrap_or(base.n_x_cells),
            n_y_cells: self.n_y_cells.unwrap_or(base.n_y_cells),
            cell_w: self.cell_w.unwrap_or(base.cell_w),
            cell_h: self.cell_h.unwrap_or(base.cell_h),
            guide_width: self.guide_width.unwrap_or(base.guide_width),
            enable_guides: self.enable_guides.unwrap_or(base.enable_guides),
            speed: self.speed.unwrap_or(base.speed),
        }
        .sanitized()
    }
}

fn clamp_field(field: &'static str, value: i64, range: RangeInclusive<i64>) -> i64 {
    if range.contains(&value) {
        return value;
    }
    let clamped = value.clamp(*range.start(), *range.end());
    let err = ConfigError::OutOfRange {
        field,
        value,
        min: *range.start(),
        max: *range.end(),
    };
    warn!(%err, clamped, "clamping configuration value");
    clamped
}

/// `null` counts as absent
fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|value| !value.is_null())
}

fn numeric(field: &'static str, value: &Value) -> Result<i64, ConfigError> {
    let floor = |f: f64| f.is_finite().then(|| f.floor() as i64);
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(floor)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(floor))
        }
        _ => None,
    }
    .ok_or(ConfigError::NotNumeric { field })
}

fn read_numeric(
    object: &Map<String, Value>,
    field: &'static str,
    range: RangeInclusive<i64>,
    default: i64,
) -> Option<i64> {
    let raw = present(object, field)?;
    let value = numeric(field, raw).unwrap_or_else(|err| {
        warn!(%err, default, "using default configuration value");
        default
    });
    Some(clamp_field(field, value, range))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn read_pattern(object: &Map<String, Value>) -> Option<Vec<Vec<bool>>> {
    match present(object, "pattern")? {
        Value::Array(rows) => Some(
            rows.iter()
                .map(|row| match row {
                    Value::Array(cells) => cells.iter().map(truthy).collect(),
                    _ => Vec::new(),
                })
                .collect(),
        ),
        Value::Bool(false) => None,
        _ => {
            warn!("ignoring pattern that is not a list of rows");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_documented_defaults() {
        let config = StageConfig::default();
        assert_eq!((config.n_x_cells, config.n_y_cells), (5, 5));
        assert_eq!((config.cell_w, config.cell_h), (15, 15));
        assert_eq!(config.guide_width, 1);
        assert!(config.enable_guides);
        assert_eq!(config.speed, 6);
        assert_eq!(config.period(), Duration::from_millis(600));
        assert_eq!(config.pixel_size(), (75, 75));
    }

    #[test]
    fn test_speed_bounds_map_to_period_bounds() {
        let fast = StageConfig { speed: 1, ..StageConfig::default() };
        let slow = StageConfig { speed: 10, ..StageConfig::default() };
        assert_eq!(fast.period(), Duration::from_millis(100));
        assert_eq!(slow.period(), Duration::from_millis(1000));
    }

    #[test]
    fn test_sanitized_clamps() {
        let wild = StageConfig {
            n_x_cells: 0,
            n_y_cells: 5000,
            cell_w: 0,
            cell_h: 99,
            guide_width: 0,
            enable_guides: false,
            speed: 42,
        };
        let config = wild.sanitized();
        assert_eq!(config.n_x_cells, 1);
        assert_eq!(config.n_y_cells, 200);
        assert_eq!(config.cell_w, 1);
        assert_eq!(config.cell_h, 50);
        assert_eq!(config.guide_width, 1);
        assert_eq!(config.speed, 10);
        assert!(!config.enable_guides);
    }

    #[test]
    fn test_non_object_is_ignored() {
        assert!(PresetOptions::from_value(&json!(7)).is_none());
        assert!(PresetOptions::from_value(&json!([1, 2])).is_none());
        assert!(PresetOptions::from_value(&Value::Null).is_none());
        assert!(matches!(
            StageConfig::from_value(&json!("nope")),
            Err(ConfigError::NotAnObject)
        ));
    }

    #[test]
    fn test_lenient_numbers() {
        let options = PresetOptions::from_value(&json!({
            "nXCells": "12",
            "nYCells": 8.9,
            "cellW": "wide",
            "speed": -3,
        }))
        .unwrap();
        assert_eq!(options.n_x_cells, Some(12));
        assert_eq!(options.n_y_cells, Some(8));
        assert_eq!(options.cell_w, Some(15));
        assert_eq!(options.speed, Some(1));
        assert_eq!(options.cell_h, None);
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let base = StageConfig { cell_w: 20, speed: 3, ..StageConfig::default() };
        let options = PresetOptions::from_value(&json!({ "nXCells": 10, "enableGuides": false }))
            .unwrap();
        let merged = options.merge_into(base);
        assert_eq!(merged.n_x_cells, 10);
        assert_eq!(merged.n_y_cells, 5);
        assert_eq!(merged.cell_w, 20);
        assert_eq!(merged.speed, 3);
        assert!(!merged.enable_guides);
    }

    #[test]
    fn test_pattern_extraction() {
        let options = PresetOptions::from_value(&json!({
            "pattern": [[true, false], [0, 1], "junk"],
        }))
        .unwrap();
        assert_eq!(
            options.pattern,
            Some(vec![vec![true, false], vec![false, true], vec![]])
        );

        let options = PresetOptions::from_value(&json!({ "pattern": 5 })).unwrap();
        assert_eq!(options.pattern, None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(StageConfig::default()).unwrap();
        assert_eq!(value["nXCells"], json!(5));
        assert_eq!(value["cellW"], json!(15));
        assert_eq!(value["enableGuides"], json!(true));
        assert_eq!(value["guideWidth"], json!(1));
    }

    #[test]
    fn test_config_value_round_trip() {
        let config = StageConfig { n_x_cells: 30, speed: 2, ..StageConfig::default() };
        let value = serde_json::to_value(config).unwrap();
        assert_eq!(StageConfig::from_value(&value).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = StageConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

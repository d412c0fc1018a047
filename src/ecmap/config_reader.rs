use std::fs;

use apportionment::layout::{BoundingBox, LayoutPolicy, Point};
use apportionment::{ApportionmentMethod, ApportionmentRules, TieBreakMode};
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::ecmap::*;

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    pub layout: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSettings {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "invalidLabel")]
    pub invalid_label: Option<String>,
    #[serde(rename = "independentLabel")]
    pub independent_label: Option<String>,
}

impl SourceSettings {
    pub fn input_type(&self) -> EcmapResult<InputType> {
        match self.provider.as_deref() {
            None | Some("csv") => Ok(InputType::Csv),
            Some("json") => Ok(InputType::Json),
            Some(x) => whatever!("Provider not implemented {:?}", x),
        }
    }

    pub fn invalid_label(&self) -> &str {
        self.invalid_label.as_deref().unwrap_or("Invalid")
    }

    pub fn independent_label(&self) -> &str {
        self.independent_label.as_deref().unwrap_or("Independent")
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesSettings {
    pub method: Option<String>,
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: Option<String>,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<String>,
    #[serde(rename = "defaultElectors")]
    pub default_electors: Option<u32>,
}

impl RulesSettings {
    pub fn apportionment_rules(&self) -> EcmapResult<ApportionmentRules> {
        let method = match self.method.as_deref() {
            None | Some("largestRemainder") => ApportionmentMethod::LargestRemainder,
            Some("hagenbachBischoff") => ApportionmentMethod::HagenbachBischoff,
            Some(x) => whatever!("Cannot use apportionment method {:?}: not implemented", x),
        };
        let tiebreak_mode = match self.tiebreak_mode.as_deref() {
            None | Some("useInputOrder") => TieBreakMode::UseInputOrder,
            Some("random") => {
                let seed = match self.random_seed.as_deref().map(|s| s.parse::<u32>()) {
                    Some(Ok(x)) => x,
                    x => {
                        whatever!("Cannot use tiebreak mode random with seed {:?}", x)
                    }
                };
                TieBreakMode::Random(seed)
            }
            Some(x) => whatever!("Cannot use tiebreak mode {:?}: not implemented", x),
        };
        Ok(ApportionmentRules {
            method,
            tiebreak_mode,
        })
    }

    pub fn default_electors(&self) -> u32 {
        self.default_electors.unwrap_or(10)
    }
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(rename = "markerRadius")]
    pub marker_radius: Option<f64>,
    /// x, y, width, height
    #[serde(rename = "boundingBox")]
    pub bounding_box: Option<[f64; 4]>,
    #[serde(rename = "hemicycleCenter")]
    pub hemicycle_center: Option<[f64; 2]>,
    #[serde(rename = "hemicycleRadius")]
    pub hemicycle_radius: Option<f64>,
    #[serde(rename = "smallCount")]
    pub small_count: Option<usize>,
    #[serde(rename = "pairLimit")]
    pub pair_limit: Option<usize>,
    #[serde(rename = "wideCap")]
    pub wide_cap: Option<f64>,
}

impl LayoutSettings {
    pub fn marker_radius(&self) -> f64 {
        self.marker_radius.unwrap_or(10.0)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let [x, y, width, height] = self.bounding_box.unwrap_or([0.0, 0.0, 900.0, 400.0]);
        BoundingBox::new(x, y, width, height)
    }

    pub fn hemicycle_center(&self) -> Point {
        let [x, y] = self.hemicycle_center.unwrap_or([450.0, 375.0]);
        Point::new(x, y)
    }

    pub fn hemicycle_radius(&self) -> f64 {
        self.hemicycle_radius.unwrap_or(350.0)
    }

    pub fn policy(&self) -> LayoutPolicy {
        let default = LayoutPolicy::DEFAULT_POLICY;
        LayoutPolicy {
            small_count: self.small_count.unwrap_or(default.small_count),
            pair_limit: self.pair_limit.unwrap_or(default.pair_limit),
            wide_cap: self.wide_cap.unwrap_or(default.wide_cap),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct EcmapConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub rules: RulesSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
}

impl EcmapConfig {
    pub fn layout_mode(&self) -> EcmapResult<LayoutMode> {
        match self.output_settings.layout.as_deref() {
            None | Some("none") => Ok(LayoutMode::NoMarkers),
            Some("grid") => Ok(LayoutMode::Grid),
            Some("hemicycle") => Ok(LayoutMode::Hemicycle),
            Some(x) => whatever!("Unknown layout {:?}: expected none, grid or hemicycle", x),
        }
    }
}

pub fn read_config(path: &str) -> EcmapResult<EcmapConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: EcmapConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    Ok(config)
}

pub fn read_summary(path: &str) -> EcmapResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

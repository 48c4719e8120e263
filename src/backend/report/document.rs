use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ReportError;


/// JSON document exchanged with the web version of the lab.
///
/// Every section is optional so that partial files still load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiment_settings: Option<ExperimentSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router_specs: Option<RouterSpecs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadband_specs: Option<BroadbandSpecs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<Vec<ChartPoint>>,
}

impl ExperimentDocument {
    /// # Errors
    ///
    /// Will return `Err` if `json` is not a valid experiment document.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Will return `Err` if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// # Errors
    ///
    /// Will return `Err` if serialization fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}


/// Setting value as written by either a form (text) or a script (number).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    #[must_use]
    pub fn text(value: impl ToString) -> Self {
        Self::Text(value.to_string())
    }

    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Number(number) => Some(number.to_string()),
            Self::Text(text)     => Some(text.trim().to_string()),
            Self::Other(_)       => None,
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Other(value) => value.is_null(),
            Self::Number(_) => false,
        }
    }

    #[must_use]
    pub fn parse<T: FromStr>(&self) -> Option<T> {
        self.as_text()?.parse().ok()
    }
}


pub type Field = Option<FieldValue>;


#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentSettings {
    pub frequency: Field,
    pub distance: Field,
    pub walls: Field,
    pub interference: Field,
    pub channel: Field,
    pub power: Field,
    pub weather: Field,
    pub time: Field,
}

/// Human-readable results, written for reference and never imported.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResultSummary {
    pub rssi: Field,
    pub download_speed: Field,
    pub upload_speed: Field,
    pub quality: Field,
    pub interference: Field,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSpecs {
    pub power24: Field,
    pub channel24: Field,
    pub bandwidth24: Field,
    pub power5: Field,
    pub channel5: Field,
    pub bandwidth5: Field,
    pub antenna: Field,
    pub height: Field,
    pub location: Field,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BroadbandSpecs {
    pub max_download_speed: Field,
    pub download_speed_unit: Field,
    pub download_speed_stability: Field,
    pub max_upload_speed: Field,
    pub upload_speed_unit: Field,
    pub upload_speed_stability: Field,
    pub internet_type: Field,
    pub network_congestion: Field,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default)]
    pub rssi: Option<f64>,
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn fields_accept_text_and_numbers() {
        let json = r#"{
            "experimentSettings": { "distance": 7.5, "walls": "2", "channel": "auto" },
            "chartData": [ { "time": 1, "rssi": -61.5 }, { "rssi": -70 }, {} ]
        }"#;

        let document = ExperimentDocument::from_json(json)
            .unwrap_or_else(|error| panic!("{}", error));
        let Some(settings) = document.experiment_settings else {
            panic!("Settings are missing");
        };

        assert_eq!(
            settings.distance.and_then(|field| field.parse::<f64>()),
            Some(7.5)
        );
        assert_eq!(settings.walls.and_then(|field| field.parse::<u32>()), Some(2));
        assert_eq!(settings.frequency, None);
        assert_eq!(document.chart_data.map(|points| points.len()), Some(3));
        assert_eq!(document.router_specs, None);
    }

    #[test]
    fn integral_numbers_read_as_integers() {
        assert_eq!(FieldValue::Number(3.0).as_text().as_deref(), Some("3"));
        assert_eq!(FieldValue::Number(2.4).parse::<f64>(), Some(2.4));
        assert_eq!(FieldValue::Number(36.0).parse::<u16>(), Some(36));
    }

    #[test]
    fn unexpected_values_do_not_parse() {
        let field: FieldValue = serde_json::from_str("true")
            .unwrap_or_else(|error| panic!("{}", error));

        assert!(matches!(field, FieldValue::Other(_)));
        assert_eq!(field.parse::<u32>(), None);
        assert!(FieldValue::text("  ").is_blank());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            ExperimentDocument::from_json("{ \"chartData\": [ "),
            Err(ReportError::Json(_))
        ));
    }
}

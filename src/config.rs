use serde::{Deserialize, Serialize};

/// Converter settings, loadable from JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Lines whose first character is one of these are skipped (comments and section headers). default: `["#", "["]`
    pub ignore_markers: Vec<char>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            ignore_markers: vec!['#', '['],
        }
    }
}

#[test]
fn default_config_json() {
    let string = serde_json::to_string(&ConvertConfig::default()).unwrap();
    assert_eq!(string, r##"{"ignore_markers":["#","["]}"##);
}

#[test]
fn missing_fields_use_defaults() {
    let config: ConvertConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ConvertConfig::default());
    let config: ConvertConfig = serde_json::from_str(r#"{"ignore_markers":[";"]}"#).unwrap();
    assert_eq!(config.ignore_markers, vec![';']);
}

//! JSON configuration for division pipelines
//!
//! ```json
//! {
//!   "callbacks": [
//!     {"kind": "split_by_durations", "durations": [[1, 4]], "remainder": "left"},
//!     {"kind": "flatten", "depth": null}
//!   ]
//! }
//! ```
//!
//! Omitted fields take the callback defaults (`cyclic: true`,
//! `remainder: "right"`, unbounded flatten).

use super::callback::DivisionCallback;
use super::errors::Result;
use super::maker::DivisionMaker;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DivisionMakerConfig {
    pub callbacks: Vec<DivisionCallback>,
}

impl DivisionMakerConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl DivisionMaker {
    /// Build a pipeline from config, validating each callback in order
    pub fn from_config(config: DivisionMakerConfig) -> Result<Self> {
        config
            .callbacks
            .into_iter()
            .try_fold(DivisionMaker::new(), |maker, callback| {
                maker.append_callback(callback)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divisions::errors::DivisionError;

    #[test]
    fn test_from_json() {
        let config = DivisionMakerConfig::from_json(
            r#"{"callbacks": [
                {"kind": "fuse_by_counts", "counts": [2]},
                {"kind": "split_by_durations", "durations": [[1, 4]]},
                {"kind": "flatten"}
            ]}"#,
        )
        .unwrap();
        let maker = DivisionMaker::from_config(config).unwrap();
        let names: Vec<&str> = maker.callbacks().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["fuse_by_counts", "split_by_durations", "flatten"]);
    }

    #[test]
    fn test_empty_config() {
        let config = DivisionMakerConfig::from_json("{}").unwrap();
        assert!(DivisionMaker::from_config(config).unwrap().callbacks().is_empty());
    }

    #[test]
    fn test_invalid_callback_fails() {
        let config = DivisionMakerConfig::from_json(
            r#"{"callbacks": [{"kind": "partition_by_counts", "counts": [3, -1]}]}"#,
        )
        .unwrap();
        assert_eq!(
            DivisionMaker::from_config(config),
            Err(DivisionError::InvalidCount(-1))
        );
    }
}

//! Left/right direction used by remainder and partition policies

use serde::{Deserialize, Serialize};

/// End of a sequence that receives a remainder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    #[default]
    Right,
}

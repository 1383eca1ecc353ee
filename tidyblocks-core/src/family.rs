//! Node families

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four persistable node families, leaves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Expression,
    Stage,
    Pipeline,
    Program,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Expression => "expression",
            Family::Stage => "stage",
            Family::Pipeline => "pipeline",
            Family::Program => "program",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

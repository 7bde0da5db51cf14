use serde::{Deserialize, Serialize};

/// Product category tag, seeded from configuration at startup
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

use crate::store::CacheEntity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub id: u32,
    pub page: u32,
    pub name: String,
    pub profile_path: Option<String>,
    pub popularity: f64,
    pub known_for_department: Option<String>,
}

impl Person {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }
}

impl CacheEntity for Person {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

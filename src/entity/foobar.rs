use super::Entity;
use crate::validation::{ModelState, Validate, check_length, require_text};
use serde::{Deserialize, Serialize};

const NAME_MAX_LEN: usize = 100;
const DESCRIPTION_MAX_LEN: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooBar {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FooBar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Entity for FooBar {
    type Key = i32;

    const NAME: &'static str = "FooBar";

    fn key(&self) -> i32 {
        self.id
    }

    fn set_key(&mut self, key: i32) {
        self.id = key;
    }
}

impl Validate for FooBar {
    fn validate(&self, state: &mut ModelState) {
        require_text(state, "name", &self.name, NAME_MAX_LEN);
        if let Some(description) = &self.description {
            check_length(state, "description", description, DESCRIPTION_MAX_LEN);
        }
    }
}

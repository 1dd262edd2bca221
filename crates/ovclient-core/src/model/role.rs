use serde::Serialize;
use serde_json::Value;

use super::{fields, opt_str, parse_collection, ParseError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl Role {
    pub fn parse(id: Option<&str>, data: &Value) -> Result<Self, ParseError> {
        let (id, obj) = fields("role", id, data)?;
        Ok(Self {
            name: opt_str(obj, "name").unwrap_or_else(|| id.clone()),
            project: opt_str(obj, "project"),
            id,
        })
    }
}

pub fn parse_roles(data: &Value) -> Result<Vec<Role>, ParseError> {
    parse_collection("role", data, Role::parse)
}

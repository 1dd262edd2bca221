use serde::Serialize;
use serde_json::Value;

use super::{fields, opt_str, parse_collection, ParseError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Owning domain id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl Project {
    pub fn parse(id: Option<&str>, data: &Value) -> Result<Self, ParseError> {
        let (id, obj) = fields("project", id, data)?;
        Ok(Self {
            name: opt_str(obj, "name").unwrap_or_else(|| id.clone()),
            domain: opt_str(obj, "domain"),
            id,
        })
    }
}

pub fn parse_projects(data: &Value) -> Result<Vec<Project>, ParseError> {
    parse_collection("project", data, Project::parse)
}

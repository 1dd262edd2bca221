use serde::Serialize;
use serde_json::Value;

use super::{fields, opt_str, parse_collection, ParseError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Domain {
    pub fn parse(id: Option<&str>, data: &Value) -> Result<Self, ParseError> {
        let (id, obj) = fields("domain", id, data)?;
        Ok(Self {
            name: opt_str(obj, "name").unwrap_or_else(|| id.clone()),
            logo: opt_str(obj, "logo"),
            id,
        })
    }
}

pub fn parse_domains(data: &Value) -> Result<Vec<Domain>, ParseError> {
    parse_collection("domain", data, Domain::parse)
}

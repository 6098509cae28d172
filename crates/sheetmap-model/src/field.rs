use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Value types a target field or source column can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Date,
    Boolean,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Date => "date",
            DataType::Boolean => "boolean",
        }
    }

    /// Compatibility table used when scoring a source column against a
    /// target field: string targets accept any source type, every other
    /// target accepts its own type or string (string cells are converted
    /// at export time).
    pub fn accepts(&self, source: DataType) -> bool {
        if *self == source {
            return true;
        }
        match self {
            DataType::String => true,
            DataType::Number | DataType::Date | DataType::Boolean => source == DataType::String,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" => Ok(DataType::String),
            "number" => Ok(DataType::Number),
            "date" => Ok(DataType::Date),
            "boolean" | "bool" => Ok(DataType::Boolean),
            _ => Err(format!("Unknown data type: {s}")),
        }
    }
}

/// One field of the target schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetField {
    /// Unique key, stable across the schema.
    pub name: String,
    /// Human-readable label shown in diagnostics.
    pub display_name: String,
    pub data_type: DataType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The fixed, ordered list of fields the output must conform to.
///
/// Treated as read-only configuration: it is supplied once (typically from a
/// JSON file) and cloned into each session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TargetField>", into = "Vec<TargetField>")]
pub struct TargetSchema {
    fields: Vec<TargetField>,
}

impl TargetSchema {
    /// Build a schema from an ordered field list.
    ///
    /// Field names must be unique; duplicates are a configuration error.
    pub fn new(fields: Vec<TargetField>) -> Result<Self> {
        for (index, field) in fields.iter().enumerate() {
            if fields[..index].iter().any(|f| f.name == field.name) {
                return Err(ModelError::Message(format!(
                    "duplicate target field name: {}",
                    field.name
                )));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[TargetField] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&TargetField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let fields: Vec<TargetField> = serde_json::from_str(json)?;
        Self::new(fields)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

impl TryFrom<Vec<TargetField>> for TargetSchema {
    type Error = String;

    fn try_from(fields: Vec<TargetField>) -> std::result::Result<Self, Self::Error> {
        Self::new(fields).map_err(|e| e.to_string())
    }
}

impl From<TargetSchema> for Vec<TargetField> {
    fn from(schema: TargetSchema) -> Self {
        schema.fields
    }
}

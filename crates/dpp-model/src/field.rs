use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::path::parent_path;

/// Primitive or structural type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(FieldType::String),
            "number" => Ok(FieldType::Number),
            "integer" => Ok(FieldType::Integer),
            "boolean" => Ok(FieldType::Boolean),
            "array" => Ok(FieldType::Array),
            "object" => Ok(FieldType::Object),
            _ => Err(ModelError::UnknownFieldType(s.to_string())),
        }
    }
}

/// String subtype declared by a field or detected in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StringFormat {
    #[serde(rename = "date-time")]
    DateTime,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "uri")]
    Uri,
    #[serde(rename = "uri-reference")]
    UriReference,
}

impl StringFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StringFormat::DateTime => "date-time",
            StringFormat::Date => "date",
            StringFormat::Email => "email",
            StringFormat::Uri => "uri",
            StringFormat::UriReference => "uri-reference",
        }
    }
}

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StringFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "date-time" => Ok(StringFormat::DateTime),
            "date" => Ok(StringFormat::Date),
            "email" => Ok(StringFormat::Email),
            "uri" => Ok(StringFormat::Uri),
            "uri-reference" => Ok(StringFormat::UriReference),
            _ => Err(ModelError::UnknownFormat(s.to_string())),
        }
    }
}

/// Membership of a field in a mutual-exclusion set.
///
/// `group_id` has the form `<owner>#<name>`; the owner is the object path the
/// constraint is evaluated in (empty for the record root).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneOfTag {
    pub group_id: String,
    pub index: u32,
}

impl OneOfTag {
    /// Object path that owns this group (the part of `group_id` before `#`).
    pub fn owner(&self) -> &str {
        match self.group_id.split_once('#') {
            Some((owner, _)) => owner,
            None => &self.group_id,
        }
    }
}

/// Ontology annotations attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ontology {
    /// Range URI (e.g. `xsd:double`), refines the primitive type.
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, rename = "enum")]
    pub enum_values: Option<Vec<String>>,
}

impl Ontology {
    /// Local name of the range, without namespace prefix.
    ///
    /// `http://www.w3.org/2001/XMLSchema#dateTime` and `xsd:dateTime` both
    /// yield `dateTime`.
    pub fn range_local_name(&self) -> Option<&str> {
        let range = self.range.as_deref()?.trim();
        if range.is_empty() {
            return None;
        }
        let start = range.rfind(['#', '/', ':']).map_or(0, |idx| idx + 1);
        Some(&range[start..])
    }
}

/// One entry of a flattened target schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    /// Dotted path, unique within a schema.
    pub path: String,
    /// Primary type; the first non-null member when the schema declares a union.
    #[serde(
        default,
        rename = "type",
        deserialize_with = "deserialize_primary_type"
    )]
    pub field_type: Option<FieldType>,
    #[serde(default, deserialize_with = "deserialize_lenient_format")]
    pub format: Option<StringFormat>,
    #[serde(default, rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    /// Required within the immediate parent object.
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub min_items: Option<u32>,
    #[serde(default)]
    pub one_of: Vec<OneOfTag>,
    #[serde(default)]
    pub ontology: Option<Ontology>,
}

impl SchemaField {
    pub fn new(path: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            path: path.into(),
            field_type: Some(field_type),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: StringFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    #[must_use]
    pub fn with_min_items(mut self, min_items: u32) -> Self {
        self.min_items = Some(min_items);
        self
    }

    #[must_use]
    pub fn with_one_of(mut self, group_id: impl Into<String>, index: u32) -> Self {
        self.one_of.push(OneOfTag {
            group_id: group_id.into(),
            index,
        });
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.ontology.get_or_insert_with(Ontology::default).range = Some(range.into());
        self
    }

    /// True when the field lives in (or is) a repeated structure.
    pub fn is_array_field(&self) -> bool {
        self.is_array || self.field_type == Some(FieldType::Array)
    }

    /// The path that receives `[n]` when the field is populated per array item.
    ///
    /// An `Array`-typed field is its own root, so `manufacturer.certifications`
    /// indexes as `manufacturer.certifications[0]`. An `is_array` leaf such as
    /// `documents.title` roots at its parent `documents`. Returns `None` for
    /// non-array fields.
    pub fn array_root(&self) -> Option<&str> {
        if self.field_type == Some(FieldType::Array) {
            return Some(&self.path);
        }
        if !self.is_array {
            return None;
        }
        match parent_path(&self.path) {
            "" => Some(&self.path),
            parent => Some(parent),
        }
    }

    /// The field path with an item index applied to its array root.
    ///
    /// Non-array fields return their path unchanged.
    pub fn indexed_path(&self, index: usize) -> String {
        match self.array_root() {
            Some(root) => {
                let rest = &self.path[root.len()..];
                format!("{root}[{index}]{rest}")
            }
            None => self.path.clone(),
        }
    }

    /// True when the field is an array that may legally stay empty.
    pub fn allows_empty_array(&self) -> bool {
        self.field_type == Some(FieldType::Array) && self.min_items.unwrap_or(0) == 0
    }
}

/// Builds a lookup table from field path to descriptor.
pub fn field_map(fields: &[SchemaField]) -> BTreeMap<String, SchemaField> {
    fields
        .iter()
        .map(|field| (field.path.clone(), field.clone()))
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeSpec {
    Single(String),
    Union(Vec<Option<String>>),
}

fn deserialize_primary_type<'de, D>(deserializer: D) -> Result<Option<FieldType>, D::Error>
where
    D: Deserializer<'de>,
{
    let spec = Option::<TypeSpec>::deserialize(deserializer)?;
    let primary = match spec {
        None => None,
        Some(TypeSpec::Single(name)) => name.parse().ok(),
        Some(TypeSpec::Union(names)) => names
            .into_iter()
            .flatten()
            .filter(|name| name != "null")
            .find_map(|name| name.parse().ok()),
    };
    Ok(primary)
}

fn deserialize_lenient_format<'de, D>(deserializer: D) -> Result<Option<StringFormat>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

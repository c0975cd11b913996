use crate::error::json_kind;
use crate::{lenient, reconcile_blocks, Block, Fields, ModelError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Page entity owning an ordered block list and page-level design fields.
///
/// Like [`Block`], the raw field map is authoritative and [`BioDesign`] is a
/// decoded view of it. Blocks are shared as `Arc<Block>`; replacing the list
/// through [`Bio::set_field`] keeps the `Arc` of every unchanged block.
#[derive(Debug, Clone, PartialEq)]
pub struct Bio {
    id: String,
    blocks: Vec<Arc<Block>>,
    design: BioDesign,
    fields: Fields,
}

/// Page-level design fields renderers fall back to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BioDesign {
    #[serde(deserialize_with = "lenient::string")]
    pub sufix: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub custom_domain: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub username_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub font: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub bg_type: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub bg_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub bg_secondary_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub bg_image: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub image_style: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub button_style: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub button_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub button_text_color: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub button_radius: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub button_shadow: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub parallax_intensity: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub blur_intensity: Option<f64>,
}

impl Bio {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            blocks: Vec::new(),
            design: BioDesign::default(),
            fields: Fields::new(),
        }
    }

    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        let Value::Object(mut map) = value else {
            return Err(ModelError::BioNotAnObject);
        };

        let id = match map.remove("id") {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Null) | None => return Err(ModelError::MissingField("id")),
            Some(other) => {
                return Err(ModelError::InvalidField {
                    field: "id",
                    found: json_kind(&other),
                })
            }
        };

        let blocks = match map.remove("blocks") {
            Some(value) => decode_blocks(value)?,
            None => Vec::new(),
        };

        let mut bio = Self {
            id,
            blocks: blocks.into_iter().map(Arc::new).collect(),
            design: BioDesign::default(),
            fields: map,
        };
        bio.refresh_design();
        Ok(bio)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn blocks(&self) -> &[Arc<Block>] {
        &self.blocks
    }

    pub fn block(&self, id: &str) -> Option<&Arc<Block>> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    pub fn design(&self) -> &BioDesign {
        &self.design
    }

    /// Page fields other than `id` and `blocks`.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Current value of a top-level field by its wire name.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.clone())),
            "blocks" => Some(self.blocks_value()),
            _ => self.fields.get(name).cloned(),
        }
    }

    /// Set one top-level field by its wire name.
    ///
    /// `blocks` is decoded and reconciled against the current list. Every
    /// other field is stored verbatim; no validation happens here.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        match name {
            "id" => match value {
                Value::String(s) => self.id = s,
                other => {
                    return Err(ModelError::InvalidField {
                        field: "id",
                        found: json_kind(&other),
                    })
                }
            },
            "blocks" => {
                let next = decode_blocks(value)?;
                self.blocks = reconcile_blocks(&self.blocks, next);
            }
            _ => {
                self.fields.insert(name.to_string(), value);
                self.refresh_design();
            }
        }
        Ok(())
    }

    /// Apply every field of `patch`. Stops at the first field that cannot be
    /// applied; earlier fields stay applied.
    pub fn apply_fields(&mut self, patch: &Fields) -> Result<(), ModelError> {
        for (name, value) in patch {
            self.set_field(name, value.clone())?;
        }
        Ok(())
    }

    /// Replace the block list with already-built blocks.
    pub fn set_blocks(&mut self, blocks: Vec<Arc<Block>>) {
        self.blocks = blocks;
    }

    pub fn blocks_value(&self) -> Value {
        Value::Array(self.blocks.iter().map(|b| b.to_value()).collect())
    }

    /// Full wire map, including `id` and `blocks`.
    pub fn to_fields(&self) -> Fields {
        let mut map = Fields::new();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        map.insert("blocks".to_string(), self.blocks_value());
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.clone());
        }
        map
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.to_fields())
    }

    fn refresh_design(&mut self) {
        self.design = serde_json::from_value(Value::Object(self.fields.clone())).unwrap_or_default();
    }
}

fn decode_blocks(value: Value) -> Result<Vec<Block>, ModelError> {
    let Value::Array(entries) = value else {
        return Err(ModelError::BlocksNotArray);
    };

    let mut seen = HashSet::new();
    let mut blocks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let block = Block::from_value(entry).map_err(|source| ModelError::InvalidBlock {
            index,
            source: Box::new(source),
        })?;
        if !seen.insert(block.id().to_string()) {
            return Err(ModelError::DuplicateId(block.id().to_string()));
        }
        blocks.push(block);
    }
    Ok(blocks)
}

impl Serialize for Bio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_fields().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Bio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Bio::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Profile owning a bio, passed through to the serializer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

use crate::defaults::default_fields;
use crate::error::json_kind;
use crate::{BlockKind, BlockStyle, BlockType, Fields, ModelError};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// One typed, positioned content unit on a bio page.
///
/// The raw field map is the source of truth; `kind` and `style` are decoded
/// once at construction. A block is immutable: edits produce a new block via
/// [`Block::with_fields`].
#[derive(Debug, Clone)]
pub struct Block {
    id: String,
    type_name: String,
    kind: BlockKind,
    style: BlockStyle,
    fields: Fields,
}

impl Block {
    /// New block of `ty` with a fresh id and the type's starting fields.
    pub fn new(ty: BlockType) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), ty)
    }

    pub fn with_id(id: impl Into<String>, ty: BlockType) -> Self {
        Self::assemble(id.into(), ty.as_str().to_string(), default_fields(ty))
    }

    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(map) => Self::from_fields(map),
            other => Err(ModelError::NotAnObject(json_kind(&other))),
        }
    }

    /// Build a block from its wire map. `id` and `type` are required; every
    /// other field is optional and kept verbatim.
    pub fn from_fields(mut map: Fields) -> Result<Self, ModelError> {
        let id = match map.remove("id") {
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(_)) | Some(Value::Null) | None => {
                return Err(ModelError::MissingField("id"))
            }
            Some(other) => {
                return Err(ModelError::InvalidField {
                    field: "id",
                    found: json_kind(&other),
                })
            }
        };

        let type_name = match map.remove("type") {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => return Err(ModelError::MissingField("type")),
            Some(other) => {
                return Err(ModelError::InvalidField {
                    field: "type",
                    found: json_kind(&other),
                })
            }
        };

        Ok(Self::assemble(id, type_name, map))
    }

    fn assemble(id: String, type_name: String, fields: Fields) -> Self {
        let kind = BlockKind::decode(&type_name, &fields);
        let style = serde_json::from_value(Value::Object(fields.clone())).unwrap_or_default();
        Self {
            id,
            type_name,
            kind,
            style,
            fields,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Discriminator exactly as it appears on the wire.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn block_type(&self) -> Option<BlockType> {
        self.kind.block_type()
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn style(&self) -> &BlockStyle {
        &self.style
    }

    /// Every field other than `id` and `type`.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Copy of this block with `patch` merged over its fields. `id` in the
    /// patch is ignored; a string `type` changes the discriminator.
    pub fn with_fields(&self, patch: &Fields) -> Self {
        let mut fields = self.fields.clone();
        let mut type_name = self.type_name.clone();

        for (key, value) in patch {
            match key.as_str() {
                "id" => {}
                "type" => {
                    if let Value::String(s) = value {
                        type_name = s.clone();
                    }
                }
                _ => {
                    fields.insert(key.clone(), value.clone());
                }
            }
        }

        Self::assemble(self.id.clone(), type_name, fields)
    }

    pub fn to_value(&self) -> Value {
        let mut map = Fields::new();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        map.insert("type".to_string(), Value::String(self.type_name.clone()));
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.type_name == other.type_name && self.fields == other.fields
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("type", &self.type_name)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Block::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Pair a freshly decoded block list with the previous one, reusing the
/// previous `Arc` for every block whose content is unchanged.
pub fn reconcile_blocks(previous: &[Arc<Block>], next: Vec<Block>) -> Vec<Arc<Block>> {
    let by_id: HashMap<&str, &Arc<Block>> = previous.iter().map(|b| (b.id(), b)).collect();

    next.into_iter()
        .map(|block| match by_id.get(block.id()) {
            Some(existing) if ***existing == block => Arc::clone(existing),
            _ => Arc::new(block),
        })
        .collect()
}

//! Bio persistence backed by the JSON file the bio was read from.

use async_trait::async_trait;
use portyo_editor::{PersistError, Persistence};
use portyo_model::{Bio, Fields};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Persistence for JsonFileStore {
    async fn persist(&self, bio_id: &str, fields: Fields) -> Result<Option<Bio>, PersistError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let Value::Object(mut stored) = serde_json::from_str::<Value>(&content)? else {
            return Err(PersistError::Rejected(format!(
                "{} does not hold a bio object",
                self.path.display()
            )));
        };

        match stored.get("id") {
            Some(Value::String(id)) if id == bio_id => {}
            other => {
                return Err(PersistError::Rejected(format!(
                    "bio id mismatch: file has {:?}, commit is for {}",
                    other, bio_id
                )))
            }
        }

        let count = fields.len();
        for (name, value) in fields {
            stored.insert(name, value);
        }
        stored.insert(
            "updatedAt".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );

        let serialized = serde_json::to_string_pretty(&stored)?;
        tokio::fs::write(&self.path, serialized).await?;
        info!(path = %self.path.display(), fields = count, "bio written");

        // The snapshot is an artifact, not a bio field.
        stored.remove("html");
        Ok(Some(Bio::from_value(Value::Object(stored))?))
    }
}

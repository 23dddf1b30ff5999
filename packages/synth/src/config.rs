use crate::value_class::{value_class, ValueClassOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use typecraft_common::CommonResult;
use typecraft_model::{KnownTypes, TypeDescriptor};

pub const DEFAULT_CONFIG_NAME: &str = "typecraft.config.json";

/// Field entry of a value class: `{ "name": "age", "type": "int" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Declarative value class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueClassConfig {
    #[serde(default)]
    pub package: String,

    pub name: String,

    /// Kept in document order; that order becomes field declaration order
    #[serde(default)]
    pub fields: Vec<FieldConfig>,

    #[serde(default)]
    pub builder: bool,

    #[serde(default)]
    pub getters: bool,

    #[serde(default)]
    pub setters: bool,
}

impl ValueClassConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_options(&self, known: &KnownTypes) -> CommonResult<ValueClassOptions> {
        let fields = self.fields.iter().map(|f| (f.name.as_str(), f.ty.as_str()));
        let mut options = ValueClassOptions::from_bare_names(&self.package, &self.name, fields, known)?;
        options.builder = self.builder;
        options.getters = self.getters;
        options.setters = self.setters;
        Ok(options)
    }
}

/// Generation config file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Extra classes to resolve bare names against, keyed by namespace
    #[serde(default)]
    pub known_types: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub value_classes: Vec<ValueClassConfig>,
}

impl GenerationConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            // Nothing to generate without a config
            Ok(Self::default())
        }
    }

    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Default table plus every configured class
    pub fn known_types(&self) -> KnownTypes {
        let mut known = KnownTypes::new();
        for (namespace, names) in &self.known_types {
            for name in names {
                known.register(namespace.clone(), name.clone());
            }
        }
        known
    }

    /// Build every configured value class, in document order
    pub fn synthesize_all(&self) -> CommonResult<Vec<TypeDescriptor>> {
        let known = self.known_types();
        self.value_classes
            .iter()
            .map(|config| value_class(&config.to_options(&known)?))
            .collect()
    }
}

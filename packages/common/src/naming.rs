use crate::error::{CommonError, CommonResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Substitution placeholder inside a naming convention template
pub const NAME_PLACEHOLDER: &str = "$N";

/// Template governing a derived identifier, e.g. `get$N` or `$NImpl`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamingConvention(String);

impl NamingConvention {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// `$N`: the identifier unchanged
    pub fn identity() -> Self {
        Self::new(NAME_PLACEHOLDER)
    }

    pub fn getter() -> Self {
        Self::new("get$N")
    }

    pub fn setter() -> Self {
        Self::new("set$N")
    }

    pub fn template(&self) -> &str {
        &self.0
    }

    pub fn resolve(&self, identifier: &str) -> CommonResult<String> {
        resolve_name(&self.0, identifier)
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NamingConvention {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

/// Substitute `identifier` into `convention`.
///
/// When the placeholder is preceded by a prefix the identifier is
/// camel-cased first (`get$N` + `name` -> `getName`); a leading placeholder
/// keeps it verbatim (`$Nbuilder` + `name` -> `namebuilder`).
pub fn resolve_name(convention: &str, identifier: &str) -> CommonResult<String> {
    if identifier.is_empty() {
        return Err(CommonError::EmptyIdentifier);
    }

    match convention.find(NAME_PLACEHOLDER) {
        Some(index) if index > 0 => Ok(convention.replace(NAME_PLACEHOLDER, &to_camel_case(identifier))),
        _ => Ok(convention.replace(NAME_PLACEHOLDER, identifier)),
    }
}

/// Upper-case the first character, leave the rest untouched
pub fn to_camel_case(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

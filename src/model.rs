//! Data model for extracted typedef documentation — format-agnostic.

use serde::Serialize;

/// Category names written to `type.types`.
pub const CATEGORY_INTERFACE: &str = "interface";
pub const CATEGORY_TYPE: &str = "type";
pub const CATEGORY_FALLBACK: &str = "Object";

/// One documented interface or type alias.
///
/// Identity fields (`longname`, `memberof`, `__docId__`) are deliberately
/// absent; see [`crate::collect::StampedRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentationRecord {
    pub name: String,
    pub kind: &'static str,
    pub access: Option<String>,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub properties: Vec<PropertyDescriptor>,
    /// Verbatim declaration source, rendered as the "Declare:" block.
    pub examples: Vec<String>,
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DocumentationRecord {
    pub fn new(name: String, category: &'static str, source: String) -> Self {
        Self {
            type_info: TypeInfo {
                name: name.clone(),
                optional: false,
                types: vec![category.to_string()],
            },
            name,
            kind: "typedef",
            access: None,
            is_static: true,
            properties: Vec::new(),
            examples: vec![source],
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeInfo {
    pub name: String,
    pub optional: bool,
    pub types: Vec<String>,
}

/// A single `@property` entry of a typedef tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub description: String,
    pub optional: bool,
    pub spread: bool,
    pub types: Vec<String>,
}

/// Parsed `/** ... */` block attached to a declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocBlock {
    pub tags: Vec<DocTag>,
}

/// A tag inside a documentation block, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum DocTag {
    /// Tag without a dedicated shape (`@desc`, `@example`, custom tags).
    Generic { name: String, comment: Option<String> },
    /// `@typedef` with the `@property` tags that follow it.
    Typedef { properties: Vec<PropertyTag> },
    /// Tag with a dedicated shape this crate does not use (`@param`, `@returns`, ...).
    Other { name: String },
}

/// Raw `@property {Type} [name] comment` as written in the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyTag {
    pub name: Option<String>,
    pub bracketed: bool,
    /// Type expression including its braces, e.g. `{string|number}`.
    pub type_expression: Option<String>,
    pub comment: Option<String>,
}

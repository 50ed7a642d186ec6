//! Typedef extraction — turns documented interfaces and type aliases into
//! [`DocumentationRecord`]s.
//!
//! The extractor is generic over [`SyntaxNode`], so it does not care which
//! parser produced the tree. See [`crate::parser::typescript`] for the
//! tree-sitter implementation.

use crate::model::*;

/// Declaration kinds the extractor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Interface,
    TypeAlias,
    Other,
}

/// Minimal view of a syntax tree node.
pub trait SyntaxNode: Sized {
    fn kind(&self) -> DeclarationKind;
    /// Declared identifier, if the node has one.
    fn name(&self) -> Option<String>;
    /// Documentation blocks attached to the node, in source order.
    fn doc_blocks(&self) -> Vec<DocBlock>;
    fn children(&self) -> Vec<Self>;
    /// Exact source text of the node.
    fn source_text(&self) -> String;
}

/// Extract one record per documented interface / type alias, in traversal order.
pub fn extract<N: SyntaxNode>(root: &N) -> Vec<DocumentationRecord> {
    let mut records = Vec::new();
    walk(root, &mut records);
    records
}

fn walk<N: SyntaxNode>(node: &N, records: &mut Vec<DocumentationRecord>) {
    if matches!(
        node.kind(),
        DeclarationKind::Interface | DeclarationKind::TypeAlias
    ) {
        if let Some(block) = node.doc_blocks().first() {
            records.push(transform_declaration(node, block));
        }
    }

    for child in node.children() {
        walk(&child, records);
    }
}

/// Build the record for one declaration from its first documentation block.
pub fn transform_declaration<N: SyntaxNode>(node: &N, block: &DocBlock) -> DocumentationRecord {
    let name = node.name().unwrap_or_default();
    let mut record = DocumentationRecord::new(name, category(node.kind()), node.source_text());

    for tag in &block.tags {
        match tag {
            // Last generic tag wins.
            DocTag::Generic { comment, .. } => {
                record.description = Some(comment.clone().unwrap_or_default());
            }
            DocTag::Typedef { properties } => {
                record.properties = properties.iter().map(property_descriptor).collect();
            }
            DocTag::Other { .. } => {}
        }
    }

    record
}

fn category(kind: DeclarationKind) -> &'static str {
    match kind {
        DeclarationKind::Interface => CATEGORY_INTERFACE,
        DeclarationKind::TypeAlias => CATEGORY_TYPE,
        DeclarationKind::Other => CATEGORY_FALLBACK,
    }
}

fn property_descriptor(tag: &PropertyTag) -> PropertyDescriptor {
    let expression = tag
        .type_expression
        .as_deref()
        .map(strip_braces)
        .unwrap_or("")
        .trim();

    let types = if expression.is_empty() {
        Vec::new()
    } else {
        expression.split('|').map(|t| t.trim().to_string()).collect()
    };

    let description = tag
        .comment
        .as_deref()
        .unwrap_or("")
        .trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == '|')
        .trim_end()
        .to_string();

    PropertyDescriptor {
        name: tag.name.clone().unwrap_or_default(),
        description,
        optional: tag.bracketed,
        spread: false,
        types,
    }
}

/// Remove one leading `{` and one trailing `}`, if present.
fn strip_braces(expression: &str) -> &str {
    let s = expression.trim_start();
    let s = s.strip_prefix('{').unwrap_or(s).trim_end();
    s.strip_suffix('}').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct FakeNode {
        kind: Option<DeclarationKind>,
        name: Option<&'static str>,
        blocks: Vec<DocBlock>,
        children: Vec<FakeNode>,
        text: &'static str,
    }

    impl SyntaxNode for FakeNode {
        fn kind(&self) -> DeclarationKind {
            self.kind.unwrap_or(DeclarationKind::Other)
        }
        fn name(&self) -> Option<String> {
            self.name.map(str::to_string)
        }
        fn doc_blocks(&self) -> Vec<DocBlock> {
            self.blocks.clone()
        }
        fn children(&self) -> Vec<Self> {
            self.children.clone()
        }
        fn source_text(&self) -> String {
            self.text.to_string()
        }
    }

    fn decl(kind: DeclarationKind, name: &'static str, tags: Vec<DocTag>) -> FakeNode {
        FakeNode {
            kind: Some(kind),
            name: Some(name),
            blocks: vec![DocBlock { tags }],
            text: "declaration text",
            ..Default::default()
        }
    }

    fn root(children: Vec<FakeNode>) -> FakeNode {
        FakeNode {
            children,
            ..Default::default()
        }
    }

    fn desc(text: &str) -> DocTag {
        DocTag::Generic {
            name: "desc".into(),
            comment: Some(text.into()),
        }
    }

    fn prop(name: &str, ty: Option<&str>, bracketed: bool, comment: &str) -> PropertyTag {
        PropertyTag {
            name: Some(name.into()),
            bracketed,
            type_expression: ty.map(str::to_string),
            comment: Some(comment.into()),
        }
    }

    #[test]
    fn interface_with_properties() {
        let tree = root(vec![decl(
            DeclarationKind::Interface,
            "IMessageProps",
            vec![
                desc("Button props."),
                DocTag::Typedef {
                    properties: vec![
                        prop("type", Some("{MessageType}"), true, "display kind"),
                        prop("text", Some("{ string | number }"), false, "- label"),
                        prop("onClick", Some("{function}"), true, "click handler"),
                    ],
                },
            ],
        )]);

        let records = extract(&tree);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "IMessageProps");
        assert_eq!(record.kind, "typedef");
        assert_eq!(record.access, None);
        assert!(record.is_static);
        assert_eq!(record.description.as_deref(), Some("Button props."));
        assert_eq!(record.type_info.name, "IMessageProps");
        assert!(!record.type_info.optional);
        assert_eq!(record.type_info.types, vec!["interface"]);
        assert_eq!(record.examples, vec!["declaration text"]);

        let names: Vec<_> = record.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["type", "text", "onClick"]);
        assert!(record.properties[0].optional);
        assert!(!record.properties[1].optional);
        assert_eq!(record.properties[1].types, vec!["string", "number"]);
        assert_eq!(record.properties[1].description, "label");
        assert!(record.properties.iter().all(|p| !p.spread));
    }

    #[test]
    fn type_alias_category() {
        let tree = root(vec![decl(DeclarationKind::TypeAlias, "Kind", vec![desc("kinds")])]);
        let records = extract(&tree);
        assert_eq!(records[0].type_info.types, vec!["type"]);
        assert!(records[0].properties.is_empty());
    }

    #[test]
    fn fallback_category() {
        let node = decl(DeclarationKind::Other, "Odd", vec![]);
        let record = transform_declaration(&node, &DocBlock::default());
        assert_eq!(record.type_info.types, vec!["Object"]);
    }

    #[test]
    fn undocumented_declarations_are_skipped() {
        let mut bare = decl(DeclarationKind::Interface, "Bare", vec![]);
        bare.blocks.clear();
        let records = extract(&root(vec![bare]));
        assert!(records.is_empty());
    }

    #[test]
    fn other_nodes_are_skipped_even_when_documented() {
        let mut func = decl(DeclarationKind::Other, "fn", vec![desc("x")]);
        func.kind = None;
        assert!(extract(&root(vec![func])).is_empty());
    }

    #[test]
    fn block_without_tags_still_yields_record() {
        let records = extract(&root(vec![decl(DeclarationKind::Interface, "Empty", vec![])]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, None);
        assert!(records[0].properties.is_empty());
    }

    #[test]
    fn nested_declarations_in_traversal_order() {
        let mut outer = FakeNode {
            children: vec![decl(DeclarationKind::Interface, "Inner", vec![])],
            ..Default::default()
        };
        outer.text = "namespace";
        let tree = root(vec![
            decl(DeclarationKind::TypeAlias, "First", vec![]),
            outer,
            decl(DeclarationKind::Interface, "Last", vec![]),
        ]);
        let names: Vec<_> = extract(&tree).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["First", "Inner", "Last"]);
    }

    #[test]
    fn anonymous_declaration_has_empty_name() {
        let mut node = decl(DeclarationKind::Interface, "", vec![]);
        node.name = None;
        let records = extract(&root(vec![node]));
        assert_eq!(records[0].name, "");
        assert_eq!(records[0].type_info.name, "");
    }

    #[test]
    fn last_generic_tag_wins() {
        let tags = vec![
            desc("first"),
            DocTag::Other { name: "see".into() },
            DocTag::Generic {
                name: "example".into(),
                comment: None,
            },
        ];
        let records = extract(&root(vec![decl(DeclarationKind::TypeAlias, "T", tags)]));
        assert_eq!(records[0].description.as_deref(), Some(""));
    }

    #[test]
    fn only_first_block_is_used() {
        let mut node = decl(DeclarationKind::TypeAlias, "T", vec![desc("first block")]);
        node.blocks.push(DocBlock {
            tags: vec![desc("second block")],
        });
        let records = extract(&root(vec![node]));
        assert_eq!(records[0].description.as_deref(), Some("first block"));
    }

    #[test]
    fn type_expression_edge_cases() {
        let cases = [
            (Some("{string|number}"), vec!["string", "number"]),
            (Some("{}"), vec![]),
            (Some("boolean"), vec!["boolean"]),
            (Some("{ 'a' | 'b' }"), vec!["'a'", "'b'"]),
            (None, vec![]),
        ];
        for (expr, expected) in cases {
            let descriptor = property_descriptor(&prop("p", expr, false, ""));
            assert_eq!(descriptor.types, expected, "expression {:?}", expr);
        }
    }

    #[test]
    fn property_without_name_or_comment() {
        let descriptor = property_descriptor(&PropertyTag::default());
        assert_eq!(descriptor.name, "");
        assert_eq!(descriptor.description, "");
        assert!(descriptor.types.is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        let tree = root(vec![
            decl(DeclarationKind::Interface, "A", vec![desc("a")]),
            decl(DeclarationKind::TypeAlias, "B", vec![desc("b")]),
        ]);
        assert_eq!(extract(&tree), extract(&tree));
    }
}

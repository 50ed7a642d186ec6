//! TypeScript front end — tree-sitter parse tree exposed as [`SyntaxNode`].
//!
//! tree-sitter keeps comments as ordinary sibling nodes, so the documentation
//! attached to a declaration is found by walking backwards over the comment
//! siblings that precede it (or its enclosing `declare`/`export` statement).

use crate::error::{Error, Result};
use crate::extract::{DeclarationKind, SyntaxNode};
use crate::model::DocBlock;
use crate::parser::jsdoc;
use tree_sitter::{Node, Parser, Tree};

/// A parsed TypeScript source file.
pub struct SourceFile {
    tree: Tree,
    source: String,
}

impl SourceFile {
    /// Parse `source`; `file_name` selects the TSX grammar for `.tsx` files.
    pub fn parse(file_name: &str, source: &str) -> Result<Self> {
        let language = if file_name.ends_with(".tsx") {
            tree_sitter_typescript::language_tsx()
        } else {
            tree_sitter_typescript::language_typescript()
        };

        let mut parser = Parser::new();
        parser.set_language(&language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse(file_name.to_string()))?;

        Ok(Self {
            tree,
            source: source.to_string(),
        })
    }

    pub fn root(&self) -> TsNode<'_> {
        TsNode {
            node: self.tree.root_node(),
            source: &self.source,
        }
    }
}

#[derive(Clone, Copy)]
pub struct TsNode<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> TsNode<'a> {
    fn text_of(&self, node: Node<'a>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// The outermost statement this declaration is the body of: the node
    /// itself, or its `declare` and/or `export` wrappers.
    fn outer(&self) -> Node<'a> {
        let mut node = self.node;
        while let Some(parent) = node.parent() {
            let wraps = match parent.kind() {
                "ambient_declaration" => parent.named_child(0) == Some(node),
                "export_statement" => parent.child_by_field_name("declaration") == Some(node),
                _ => false,
            };
            if !wraps {
                break;
            }
            node = parent;
        }
        node
    }
}

impl SyntaxNode for TsNode<'_> {
    fn kind(&self) -> DeclarationKind {
        match self.node.kind() {
            "interface_declaration" => DeclarationKind::Interface,
            "type_alias_declaration" => DeclarationKind::TypeAlias,
            _ => DeclarationKind::Other,
        }
    }

    fn name(&self) -> Option<String> {
        self.node
            .child_by_field_name("name")
            .map(|n| self.text_of(n).to_string())
            .filter(|n| !n.is_empty())
    }

    fn doc_blocks(&self) -> Vec<DocBlock> {
        let mut blocks = Vec::new();
        let mut sibling = self.outer().prev_sibling();
        while let Some(node) = sibling.filter(|n| n.kind() == "comment") {
            let text = self.text_of(node);
            if jsdoc::is_doc_comment(text) {
                blocks.push(jsdoc::parse_block(text));
            }
            sibling = node.prev_sibling();
        }
        blocks.reverse();
        blocks
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        let children = self
            .node
            .named_children(&mut cursor)
            .map(|node| TsNode {
                node,
                source: self.source,
            })
            .collect();
        children
    }

    fn source_text(&self) -> String {
        self.text_of(self.outer()).to_string()
    }
}

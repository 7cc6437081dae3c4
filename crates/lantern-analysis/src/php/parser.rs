//! Thin wrapper around a tree-sitter parser loaded with the PHP grammar.

use std::path::Path;

use lantern_core::errors::ParseError;
use tree_sitter::{Parser, Tree};

/// PHP parser. Not `Sync`; create one per worker thread.
pub struct PhpParser {
    parser: Parser,
}

impl PhpParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
            .map_err(|e| ParseError::GrammarUnavailable {
                message: e.to_string(),
            })?;
        Ok(Self { parser })
    }

    /// Parse source bytes. Syntax errors do not fail the parse; tree-sitter
    /// recovers and marks error nodes, which the extractors skip over.
    pub fn parse(&mut self, source: &[u8], path: &Path) -> Result<Tree, ParseError> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| ParseError::ParseFailed {
                path: path.to_path_buf(),
            })
    }
}

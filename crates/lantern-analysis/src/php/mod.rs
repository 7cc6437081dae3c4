//! PHP parsing on top of tree-sitter: static evaluation of config files and
//! call-site / method-chain extraction for the source scanners.

pub mod calls;
pub mod chains;
pub mod evaluator;
pub mod literal;
pub mod parser;
pub mod properties;
pub mod value;

pub use calls::{extract_calls, CallKind, CallSite};
pub use chains::{extract_chains, CallChain, ChainRoot, ChainSegment};
pub use evaluator::ConfigEvaluator;
pub use parser::PhpParser;
pub use properties::{find_property, PropertyDecl};
pub use value::{PhpArray, PhpKey, PhpValue};

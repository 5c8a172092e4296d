//! Conversion orchestration: external rewrite, diffing, re-validation.

pub mod engine;
pub mod rewriter;
pub mod syntax;

pub use engine::{
    ConversionEngine, ConversionOutcome, ConversionStatus, ValidationReport, ValidationStatus,
};
pub use rewriter::{convert_print_statements, External2to3, SyntaxRewriter};
pub use syntax::{check_syntax, SyntaxCheck, SyntaxIssue};

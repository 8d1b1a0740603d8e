//! # hospogate-cs
//!
//! Tree-sitter powered C# frontend for hospogate.
//!
//! - [`CSharpFrontend`] turns C# source into the declaration tree the naming
//!   rules run over
//! - [`CSharpDocument`] serves that tree to the fix provider

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod csharp;
pub mod document;

pub use csharp::CSharpFrontend;
pub use document::CSharpDocument;

//! PDF Markdown MCP Server Library
//!
//! This crate provides MCP tools for turning PDFs into clean Markdown:
//! - `convert_pdf`: Convert a PDF to Markdown via an external engine
//! - `reformat_markdown`: Clean up noisy Markdown, realigning tables
//! - `list_documents`: List PDF and Markdown files in a directory
//! - `categorize_content`: Score content against a keyword taxonomy
//! - `generate_doc_template`: Generate a Markdown documentation skeleton

pub mod catalog;
pub mod categorize;
pub mod convert;
pub mod error;
pub mod reformat;
pub mod server;
pub mod template;

pub use catalog::{DocumentInfo, DocumentKind};
pub use convert::ConvertEngine;
pub use error::{Error, Result};
pub use reformat::reformat;
pub use server::{
    run_server, run_server_with_config, run_server_with_dirs, DocServer, ServerConfig,
};

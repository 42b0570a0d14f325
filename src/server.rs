//! MCP Server implementation using rmcp

use crate::catalog::{scan_directory, DocumentInfo, DocumentKind};
use crate::categorize::{categorize, categorize_default, CategoryScore};
use crate::convert::{convert_to_markdown, ConvertEngine};
use crate::reformat::{reformat, repair_split_urls, segment, RegionKind};
use crate::template::{generate as generate_template, TemplateKind};
use anyhow::Result;
use rmcp::{
    handler::server::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    schemars::JsonSchema, service::RequestContext, tool, tool_handler, tool_router, RoleServer,
    ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Security and resource configuration for the PDF Markdown MCP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directories to expose as document resources
    pub resource_dirs: Vec<String>,
    /// Engine used when a convert_pdf call does not name one (default: auto)
    pub default_engine: ConvertEngine,
    /// Maximum wall-clock time for one conversion subprocess (default: 120s)
    pub conversion_timeout_secs: u64,
    /// Maximum size of an input document in bytes (default: 50MB)
    pub max_input_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            resource_dirs: Vec::new(),
            default_engine: ConvertEngine::Auto,
            conversion_timeout_secs: 120,
            max_input_bytes: 50 * 1024 * 1024, // 50MB
        }
    }
}

/// PDF Markdown MCP server
#[derive(Clone)]
pub struct DocServer {
    tool_router: ToolRouter<Self>,
    /// Server configuration
    config: Arc<ServerConfig>,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Request/Response types for convert_pdf
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ConvertPdfParams {
    /// Path to the PDF file
    pub path: String,
    /// Conversion engine: "auto", "markitdown", or "pdftotext".
    /// Defaults to the server's configured engine.
    #[serde(default)]
    pub engine: Option<ConvertEngine>,
    /// Run the table-aware Markdown cleanup on the converted output (default: true)
    #[serde(default = "default_true")]
    pub auto_clean: bool,
    /// Output file path (optional). If provided, saves the Markdown to this path.
    #[serde(default)]
    pub output_path: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ConvertPdfResult {
    /// Source identifier
    pub source: String,
    /// Engine that produced the output
    pub engine: String,
    /// Converted (and possibly cleaned) Markdown
    pub markdown: String,
    /// Whether auto-clean ran on the output
    pub cleaned: bool,
    /// Human-readable processing note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Path where Markdown was saved (if output_path was specified)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for reformat_markdown
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReformatMarkdownParams {
    /// Markdown text to reformat (exactly one of text/path)
    #[serde(default)]
    pub text: Option<String>,
    /// Path to a Markdown file to reformat (exactly one of text/path)
    #[serde(default)]
    pub path: Option<String>,
    /// Write the reformatted Markdown to this path (optional)
    #[serde(default)]
    pub output_path: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ReformatMarkdownResult {
    /// Source identifier
    pub source: String,
    /// Reformatted Markdown
    pub markdown: String,
    /// Line count of the input, after split-line repair
    pub input_lines: usize,
    /// Line count of the output
    pub output_lines: usize,
    /// Number of table regions detected in the input
    pub table_regions: usize,
    /// Path where Markdown was saved (if output_path was specified)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for list_documents
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListDocumentsParams {
    /// Directory to search for PDF and Markdown files
    pub directory: String,
    /// Search subdirectories recursively (default: false)
    #[serde(default)]
    pub recursive: bool,
    /// Filename pattern to filter (e.g., "report*.pdf"). Supports glob patterns.
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ListDocumentsResult {
    /// Directory that was searched
    pub directory: String,
    /// Documents found
    pub files: Vec<DocumentInfo>,
    /// Total number of files found
    pub total_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for categorize_content
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CustomCategory {
    /// Category name
    pub name: String,
    /// Keywords counted toward this category
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CategorizeContentParams {
    /// Text to categorize (exactly one of text/path)
    #[serde(default)]
    pub text: Option<String>,
    /// Path to a Markdown file to categorize (exactly one of text/path)
    #[serde(default)]
    pub path: Option<String>,
    /// Custom categories; replaces the built-in taxonomy when provided
    #[serde(default)]
    pub categories: Option<Vec<CustomCategory>>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct CategorizeContentResult {
    /// Source identifier
    pub source: String,
    /// Scored categories, highest first
    pub categories: Vec<CategoryScore>,
    /// Best-scoring category, if any keyword matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for generate_doc_template
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateDocTemplateParams {
    /// Document title
    pub title: String,
    /// Template kind: "readme" (default), "api", "guide", or "changelog"
    #[serde(default)]
    pub kind: TemplateKind,
    /// Custom section headings; replace the kind's defaults when provided
    #[serde(default)]
    pub sections: Option<Vec<String>>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct GenerateDocTemplateResult {
    /// Document title
    pub title: String,
    /// Generated Markdown skeleton
    pub markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Tool implementations
// ============================================================================

#[tool_router]
impl DocServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a new DocServer with specified resource directories
    pub fn with_resource_dirs(dirs: Vec<String>) -> Self {
        Self::with_config(ServerConfig {
            resource_dirs: dirs,
            ..ServerConfig::default()
        })
    }

    /// Create a new DocServer with full configuration
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config: Arc::new(config),
        }
    }

    /// Convert a PDF to Markdown via an external engine
    #[tool(
        description = "Convert a PDF file to Markdown using an external conversion engine.

Engines:
- \"auto\" (default): markitdown if installed, otherwise pdftotext
- \"markitdown\": Markdown output with table markup
- \"pdftotext\": layout-preserving plain text

By default the output is run through the table-aware Markdown cleanup, which realigns tables and normalizes prose; set auto_clean=false to get raw converter output."
    )]
    async fn convert_pdf(&self, Parameters(params): Parameters<ConvertPdfParams>) -> String {
        let result = self.process_convert_pdf(&params).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "convert_pdf failed");
            ConvertPdfResult {
                source: params.path.clone(),
                engine: params
                    .engine
                    .unwrap_or(self.config.default_engine)
                    .name()
                    .to_string(),
                markdown: String::new(),
                cleaned: false,
                note: None,
                output_path: None,
                error: Some(e.client_message()),
            }
        });

        let response = serde_json::json!({ "results": [result] });
        serde_json::to_string_pretty(&response).unwrap_or_default()
    }

    /// Reformat noisy Markdown, realigning tables
    #[tool(
        description = "Clean up noisy Markdown (typically raw PDF-converter output): tables are re-parsed and re-rendered with uniform column widths, prose is stripped of stray inline markup, and whole-document spacing is normalized.

Provide exactly one of:
- text: the Markdown content inline
- path: a Markdown file to read"
    )]
    async fn reformat_markdown(
        &self,
        Parameters(params): Parameters<ReformatMarkdownParams>,
    ) -> String {
        let result = self
            .process_reformat_markdown(&params)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "reformat_markdown failed");
                ReformatMarkdownResult {
                    source: params.path.clone().unwrap_or_else(|| "<text>".to_string()),
                    markdown: String::new(),
                    input_lines: 0,
                    output_lines: 0,
                    table_regions: 0,
                    output_path: None,
                    error: Some(e.client_message()),
                }
            });

        let response = serde_json::json!({ "results": [result] });
        serde_json::to_string_pretty(&response).unwrap_or_default()
    }

    /// List PDF and Markdown files in a directory
    #[tool(
        description = "List PDF and Markdown files in a directory. Useful for discovering documents before converting or cleaning them.

Returns for each file:
- Full path (can be used directly with other tools)
- Filename and kind (pdf or markdown)
- File size in bytes
- Last modified time

Supports recursive search and glob pattern filtering."
    )]
    async fn list_documents(&self, Parameters(params): Parameters<ListDocumentsParams>) -> String {
        let result = self.process_list_documents(&params).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "list_documents failed");
            ListDocumentsResult {
                directory: params.directory.clone(),
                files: vec![],
                total_count: 0,
                error: Some(e.client_message()),
            }
        });

        let response = serde_json::json!({ "results": [result] });
        serde_json::to_string_pretty(&response).unwrap_or_default()
    }

    /// Categorize Markdown content by keyword frequency
    #[tool(
        description = "Categorize document content by keyword frequency against a small built-in taxonomy (api, guide, reference, tutorial, architecture, data), or against caller-supplied categories.

Provide exactly one of:
- text: the content inline
- path: a Markdown file to read

Returns scored categories (highest first) with the keywords that matched."
    )]
    async fn categorize_content(
        &self,
        Parameters(params): Parameters<CategorizeContentParams>,
    ) -> String {
        let result = self
            .process_categorize_content(&params)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "categorize_content failed");
                CategorizeContentResult {
                    source: params.path.clone().unwrap_or_else(|| "<text>".to_string()),
                    categories: vec![],
                    top_category: None,
                    error: Some(e.client_message()),
                }
            });

        let response = serde_json::json!({ "results": [result] });
        serde_json::to_string_pretty(&response).unwrap_or_default()
    }

    /// Generate a Markdown documentation skeleton
    #[tool(
        description = "Generate a Markdown documentation template.

Kinds and their default sections:
- \"readme\": Overview, Installation, Usage, License
- \"api\": Authentication, Endpoints, Request Format, Responses, Errors
- \"guide\": Introduction, Prerequisites, Steps, Troubleshooting
- \"changelog\": Unreleased, Added, Changed, Fixed

Custom section headings can be supplied to replace the defaults."
    )]
    async fn generate_doc_template(
        &self,
        Parameters(params): Parameters<GenerateDocTemplateParams>,
    ) -> String {
        let result = self
            .process_generate_doc_template(&params)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "generate_doc_template failed");
                GenerateDocTemplateResult {
                    title: params.title.clone(),
                    markdown: String::new(),
                    error: Some(e.client_message()),
                }
            });

        let response = serde_json::json!({ "results": [result] });
        serde_json::to_string_pretty(&response).unwrap_or_default()
    }
}

impl DocServer {
    /// Validate that a path is within allowed resource directories.
    /// If no resource_dirs are configured, all paths are allowed.
    fn validate_path_access(&self, path: &str) -> crate::error::Result<PathBuf> {
        if self.config.resource_dirs.is_empty() {
            return Ok(PathBuf::from(path));
        }

        let canonical =
            std::fs::canonicalize(path).map_err(|_| crate::error::Error::PathAccessDenied {
                path: path.to_string(),
            })?;

        for dir in &self.config.resource_dirs {
            if let Ok(canonical_dir) = std::fs::canonicalize(dir) {
                if canonical.starts_with(&canonical_dir) {
                    return Ok(canonical);
                }
            }
        }

        Err(crate::error::Error::PathAccessDenied {
            path: path.to_string(),
        })
    }

    /// Validate that an output path is within allowed resource directories.
    /// Canonicalizes the parent directory since the output file may not exist yet.
    fn validate_output_path_access(&self, path: &str) -> crate::error::Result<PathBuf> {
        if self.config.resource_dirs.is_empty() {
            return Ok(PathBuf::from(path));
        }

        let path_obj = Path::new(path);
        let parent = path_obj.parent().unwrap_or(Path::new("."));

        let canonical_parent = std::fs::canonicalize(parent).map_err(|_| {
            crate::error::Error::PathAccessDenied {
                path: path.to_string(),
            }
        })?;

        let canonical_target =
            canonical_parent.join(path_obj.file_name().unwrap_or(std::ffi::OsStr::new("")));

        for dir in &self.config.resource_dirs {
            if let Ok(canonical_dir) = std::fs::canonicalize(dir) {
                if canonical_target.starts_with(&canonical_dir) {
                    return Ok(canonical_target);
                }
            }
        }

        Err(crate::error::Error::PathAccessDenied {
            path: path.to_string(),
        })
    }

    /// Write Markdown output to a file path, with sandbox validation.
    fn write_output(
        &self,
        output_path: &Option<String>,
        markdown: &str,
    ) -> crate::error::Result<Option<String>> {
        if let Some(path_str) = output_path {
            self.validate_output_path_access(path_str)?;

            let path = Path::new(path_str);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            std::fs::write(path, markdown)?;
            Ok(Some(path_str.clone()))
        } else {
            Ok(None)
        }
    }

    /// Resolve an input document path: sandbox check, existence, size limit.
    fn resolve_document(&self, path: &str) -> crate::error::Result<PathBuf> {
        let resolved = self.validate_path_access(path)?;

        if !resolved.exists() {
            return Err(crate::error::Error::DocumentNotFound {
                path: path.to_string(),
            });
        }
        if !resolved.is_file() {
            return Err(crate::error::Error::NotAFile {
                path: path.to_string(),
            });
        }

        let size = std::fs::metadata(&resolved)?.len();
        if size > self.config.max_input_bytes {
            return Err(crate::error::Error::InputTooLarge {
                size,
                max_size: self.config.max_input_bytes,
            });
        }

        Ok(resolved)
    }

    /// Resolve the text/path pair used by the text-accepting tools.
    fn resolve_text_source(
        &self,
        text: &Option<String>,
        path: &Option<String>,
    ) -> crate::error::Result<(String, String)> {
        match (text, path) {
            (Some(text), None) => Ok(("<text>".to_string(), text.clone())),
            (None, Some(path)) => {
                let resolved = self.resolve_document(path)?;
                let content = std::fs::read_to_string(&resolved)?;
                Ok((path.clone(), content))
            }
            _ => Err(crate::error::Error::InvalidParams {
                reason: "provide exactly one of \"text\" or \"path\"".to_string(),
            }),
        }
    }

    pub async fn process_convert_pdf(
        &self,
        params: &ConvertPdfParams,
    ) -> crate::error::Result<ConvertPdfResult> {
        let resolved = self.resolve_document(&params.path)?;
        let engine = params.engine.unwrap_or(self.config.default_engine);
        let timeout = Duration::from_secs(self.config.conversion_timeout_secs);

        let raw = convert_to_markdown(&resolved, engine, timeout).await?;

        // Reformatting is CPU-bound string work; keep it off the async
        // runtime for large documents.
        let (markdown, cleaned, note) = if params.auto_clean {
            let cleaned_text = tokio::task::spawn_blocking(move || reformat(&raw))
                .await
                .map_err(|e| crate::error::Error::InvalidParams {
                    reason: format!("Task join error: {}", e),
                })?;
            (
                cleaned_text,
                true,
                Some(
                    "Output was auto-cleaned: tables realigned and prose normalized.".to_string(),
                ),
            )
        } else {
            (raw, false, None)
        };

        let output_path = self.write_output(&params.output_path, &markdown)?;

        Ok(ConvertPdfResult {
            source: params.path.clone(),
            engine: engine.name().to_string(),
            markdown,
            cleaned,
            note,
            output_path,
            error: None,
        })
    }

    pub async fn process_reformat_markdown(
        &self,
        params: &ReformatMarkdownParams,
    ) -> crate::error::Result<ReformatMarkdownResult> {
        let (source, content) = self.resolve_text_source(&params.text, &params.path)?;

        let (markdown, input_lines, table_regions) = tokio::task::spawn_blocking(move || {
            // Count against the repaired text so the stats match the regions
            // the pipeline actually reformats (the repair pass can merge
            // lines split across a break marker).
            let repaired = repair_split_urls(&content);
            let lines: Vec<&str> = repaired.lines().collect();
            let table_regions = segment(&lines)
                .iter()
                .filter(|r| r.kind == RegionKind::Table)
                .count();
            let input_lines = lines.len();
            drop(lines);
            (reformat(&repaired), input_lines, table_regions)
        })
        .await
        .map_err(|e| crate::error::Error::InvalidParams {
            reason: format!("Task join error: {}", e),
        })?;

        let output_lines = markdown.lines().count();
        let output_path = self.write_output(&params.output_path, &markdown)?;

        Ok(ReformatMarkdownResult {
            source,
            markdown,
            input_lines,
            output_lines,
            table_regions,
            output_path,
            error: None,
        })
    }

    pub fn process_list_documents(
        &self,
        params: &ListDocumentsParams,
    ) -> crate::error::Result<ListDocumentsResult> {
        // Sandbox check: if resource_dirs are configured, the directory must
        // be within them
        if !self.config.resource_dirs.is_empty() {
            let canonical = std::fs::canonicalize(&params.directory).map_err(|_| {
                crate::error::Error::PathAccessDenied {
                    path: params.directory.clone(),
                }
            })?;
            let allowed = self.config.resource_dirs.iter().any(|dir| {
                std::fs::canonicalize(dir)
                    .map(|cd| canonical.starts_with(&cd))
                    .unwrap_or(false)
            });
            if !allowed {
                return Err(crate::error::Error::PathAccessDenied {
                    path: params.directory.clone(),
                });
            }
        }

        let pattern = params
            .pattern
            .as_ref()
            .and_then(|p| glob::Pattern::new(p).ok());

        let files = scan_directory(
            Path::new(&params.directory),
            params.recursive,
            pattern.as_ref(),
        )?;
        let total_count = files.len() as u32;

        Ok(ListDocumentsResult {
            directory: params.directory.clone(),
            files,
            total_count,
            error: None,
        })
    }

    pub async fn process_categorize_content(
        &self,
        params: &CategorizeContentParams,
    ) -> crate::error::Result<CategorizeContentResult> {
        let (source, content) = self.resolve_text_source(&params.text, &params.path)?;

        let categories = match &params.categories {
            Some(custom) => {
                if custom.is_empty() {
                    return Err(crate::error::Error::InvalidParams {
                        reason: "custom categories must not be empty".to_string(),
                    });
                }
                let taxonomy: Vec<(String, Vec<String>)> = custom
                    .iter()
                    .map(|c| (c.name.clone(), c.keywords.clone()))
                    .collect();
                categorize(&content, &taxonomy)
            }
            None => categorize_default(&content),
        };

        let top_category = categories.first().map(|c| c.category.clone());

        Ok(CategorizeContentResult {
            source,
            categories,
            top_category,
            error: None,
        })
    }

    pub fn process_generate_doc_template(
        &self,
        params: &GenerateDocTemplateParams,
    ) -> crate::error::Result<GenerateDocTemplateResult> {
        let markdown = generate_template(&params.title, params.kind, params.sections.as_deref())?;

        Ok(GenerateDocTemplateResult {
            title: params.title.clone(),
            markdown,
            error: None,
        })
    }
}

impl Default for DocServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for DocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "PDF Markdown MCP server converts PDFs to Markdown via external engines and \
                 cleans up the result with a table-aware reformatter. Markdown files in \
                 configured directories are also exposed as resources."
                    .into(),
            ),
        }
    }

    /// List Markdown resources from configured directories
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let mut resources = Vec::new();

        for dir in self.config.resource_dirs.iter() {
            let params = ListDocumentsParams {
                directory: dir.clone(),
                recursive: true,
                pattern: None,
            };

            if let Ok(list_result) = self.process_list_documents(&params) {
                for file in list_result.files {
                    if file.kind != DocumentKind::Markdown {
                        continue;
                    }
                    let uri = format!("file://{}", file.path);
                    let mut resource = RawResource::new(uri.clone(), file.name.clone());
                    resource.mime_type = Some("text/markdown".to_string());
                    resource.description = Some(format!(
                        "Markdown file ({} bytes){}",
                        file.size,
                        file.modified
                            .as_ref()
                            .map(|m| format!(", modified: {}", m))
                            .unwrap_or_default()
                    ));
                    resource.size = Some(file.size as u32);

                    resources.push(Annotated {
                        raw: resource,
                        annotations: None,
                    });
                }
            }
        }

        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: Default::default(),
        })
    }

    /// Read a Markdown resource
    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let uri = &request.uri;

        let path = if uri.starts_with("file://") {
            uri.strip_prefix("file://").unwrap_or(uri)
        } else {
            return Err(ErrorData::invalid_params(
                "Only file:// URIs are supported",
                None,
            ));
        };

        match self
            .resolve_document(path)
            .and_then(|resolved| std::fs::read_to_string(resolved).map_err(Into::into))
        {
            Ok(text) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::TextResourceContents {
                    uri: uri.clone(),
                    mime_type: Some("text/markdown".to_string()),
                    text,
                    meta: Default::default(),
                }],
            }),
            Err(e) => {
                tracing::warn!(error = %e, "read_resource failed");
                Err(ErrorData::internal_error(e.client_message(), None))
            }
        }
    }
}

/// Run the MCP server without resource directories
pub async fn run_server() -> Result<()> {
    run_server_with_config(ServerConfig::default()).await
}

/// Run the MCP server with specified resource directories
pub async fn run_server_with_dirs(resource_dirs: Vec<String>) -> Result<()> {
    run_server_with_config(ServerConfig {
        resource_dirs,
        ..ServerConfig::default()
    })
    .await
}

/// Run the MCP server with full configuration
pub async fn run_server_with_config(config: ServerConfig) -> Result<()> {
    let server = DocServer::with_config(config);

    tracing::info!("PDF Markdown MCP server ready, waiting for connections...");

    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    Ok(())
}

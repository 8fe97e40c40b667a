pub mod catalog;
pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod server;

pub use catalog::Catalog;
pub use io::{
    parse_catalog_file, parse_catalog_json, render_human_readable, write_human_readable,
    write_report,
};
pub use llm::{AnthropicClient, AnthropicConfig, LlmRewriter, Rewriter};
pub use models::{MappingReport, Policy, Regulation, ReportMetadata, RewriteResult};
pub use pipeline::{build_report, run_pipeline};
pub use server::{AppState, serve};

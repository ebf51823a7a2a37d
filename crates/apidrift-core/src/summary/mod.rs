//! Canonical report model, its builder and its narrative renderers.

pub mod builder;
pub mod markdown;
pub mod model;
pub mod render;

pub use builder::build;
pub use markdown::MarkdownRenderer;
pub use model::{
    ChangeAction, EndpointSummary, ModifiedOperation, ParameterSummary, ParametersSummary,
    PropertiesSummary, Report, RequestBodySummary, RequestBodySummaryDetail, ResponseDetailKind,
    ResponseSummaryDetail, ResponsesSummary, ResponsesSummaryDetail, SecuritySummary,
    SecuritySummaryDetail,
};
pub use render::NarrativeRenderer;

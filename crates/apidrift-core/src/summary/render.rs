//! Per-node narrative rendering contract.

use crate::summary::model::{
    EndpointSummary, ModifiedOperation, ParameterSummary, ParametersSummary, PropertiesSummary,
    Report, RequestBodySummary, RequestBodySummaryDetail, ResponseSummaryDetail,
    ResponsesSummary, ResponsesSummaryDetail, SecuritySummary, SecuritySummaryDetail,
};

/// Turns one summary node into a text fragment.
///
/// Every method sees only its node; composite nodes read the `message` of
/// their already-rendered children and concatenate. Implementations must be
/// pure and total: the same node always yields the same string, and empty
/// collections or unknown actions yield a valid (possibly empty) fragment.
pub trait NarrativeRenderer {
    fn render_report(&self, report: &Report) -> String;

    fn render_endpoint(&self, endpoint: &EndpointSummary) -> String;

    fn render_modified_operation(&self, operation: &ModifiedOperation) -> String;

    fn render_parameters(&self, parameters: &ParametersSummary) -> String;

    fn render_parameter(&self, parameter: &ParameterSummary) -> String;

    fn render_request_body(&self, body: &RequestBodySummary) -> String;

    fn render_request_body_detail(&self, detail: &RequestBodySummaryDetail) -> String;

    fn render_responses(&self, responses: &ResponsesSummary) -> String;

    fn render_responses_detail(&self, detail: &ResponsesSummaryDetail) -> String;

    fn render_response_detail(&self, detail: &ResponseSummaryDetail) -> String;

    /// `indent` is supplied by the caller; the node's own depth is not enough
    /// because request and response property lists start at different levels.
    fn render_property(&self, property: &PropertiesSummary, indent: usize) -> String;

    fn render_security(&self, security: &SecuritySummary) -> String;

    fn render_security_detail(&self, detail: &SecuritySummaryDetail) -> String;
}

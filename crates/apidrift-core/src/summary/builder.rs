//! Builds a [`Report`] from the raw diff tree.
//!
//! The walk is strictly bottom-up: every node is assembled from its raw
//! counterpart and its finished children, then handed to the renderer for its
//! `message`, then moved into the parent. Nothing is revisited.
//!
//! Breaking flags of composite nodes (operation, parameters, request body,
//! responses, security, and modified leaves) are copied from the raw diff's
//! `incompatible` verdict at the matching node. Added and deleted leaves carry
//! no verdict of their own upstream and are reported as non-breaking; the
//! composite above them holds the engine's judgement.

use crate::document::ApiDocument;
use crate::errors::{DocumentSide, Result};
use crate::raw::{
    RawChangedApiResponses, RawChangedContent, RawChangedHeaders, RawChangedOperation,
    RawChangedParameters, RawChangedRequestBody, RawChangedSchema,
    RawChangedSecurityRequirements, RawDiff, RawEndpoint, RawParameter, RawSchema,
    RawSecurityRequirement,
};
use crate::summary::model::{
    ChangeAction, EndpointSummary, ModifiedOperation, ParameterSummary, ParametersSummary,
    PropertiesSummary, Report, RequestBodySummary, RequestBodySummaryDetail, ResponseDetailKind,
    ResponseSummaryDetail, ResponsesSummary, ResponsesSummaryDetail, SecuritySummary,
    SecuritySummaryDetail,
};
use crate::summary::render::NarrativeRenderer;

/// Property lists directly under a request body media type start here.
pub const REQUEST_PROPERTY_INDENT: usize = 0;
/// Property lists under a response media type start one level deeper: the
/// content-type bullet inside the status code already consumed a level.
pub const RESPONSE_PROPERTY_INDENT: usize = 1;

/// Build the report for `raw`, rendering every node with `renderer`.
///
/// # Errors
///
/// `OperationNotFound` when a changed operation's `(method, path)` is missing
/// from `old_doc` or `new_doc`. The build stops at the first such operation.
pub fn build<R>(
    raw: &RawDiff,
    old_doc: &ApiDocument,
    new_doc: &ApiDocument,
    renderer: &R,
) -> Result<Report>
where
    R: NarrativeRenderer + ?Sized,
{
    let builder = SummaryBuilder {
        renderer,
        old_doc,
        new_doc,
    };
    builder.report(raw)
}

struct SummaryBuilder<'a, R: ?Sized> {
    renderer: &'a R,
    old_doc: &'a ApiDocument,
    new_doc: &'a ApiDocument,
}

impl<R> SummaryBuilder<'_, R>
where
    R: NarrativeRenderer + ?Sized,
{
    fn report(&self, raw: &RawDiff) -> Result<Report> {
        let modified = raw
            .changed_operations
            .iter()
            .map(|op| self.modified_operation(op))
            .collect::<Result<Vec<_>>>()?;

        let mut report = Report {
            added: self.endpoints(&raw.new_endpoints),
            deleted: self.endpoints(&raw.missing_endpoints),
            deprecated: self.endpoints(&raw.deprecated_endpoints),
            breaking: modified.iter().any(|op| op.breaking),
            modified,
            message: String::new(),
        };
        report.message = self.renderer.render_report(&report);
        Ok(report)
    }

    fn endpoints(&self, raw: &[RawEndpoint]) -> Vec<EndpointSummary> {
        raw.iter()
            .map(|endpoint| {
                let mut summary = EndpointSummary {
                    path: endpoint.url().to_string(),
                    method: endpoint.method.to_ascii_uppercase(),
                    description: endpoint.summary.clone().unwrap_or_default(),
                    message: String::new(),
                };
                summary.message = self.renderer.render_endpoint(&summary);
                summary
            })
            .collect()
    }

    fn modified_operation(&self, raw: &RawChangedOperation) -> Result<ModifiedOperation> {
        let method = raw.http_method.to_ascii_uppercase();
        let path = raw.path_url.as_str();

        let old_op = self
            .old_doc
            .require_operation(&method, path, DocumentSide::Old)?;
        let new_op = self
            .new_doc
            .require_operation(&method, path, DocumentSide::New)?;

        tracing::debug!(
            method = %method,
            path = %path,
            breaking = raw.incompatible,
            "summarizing changed operation"
        );

        let summary = new_op
            .summary
            .clone()
            .or_else(|| old_op.summary.clone())
            .or_else(|| raw.summary.clone())
            .unwrap_or_default();
        let description = new_op
            .description
            .clone()
            .or_else(|| old_op.description.clone())
            .unwrap_or_default();

        let mut operation = ModifiedOperation {
            path: path.to_string(),
            method,
            summary,
            description,
            breaking: raw.incompatible,
            message: String::new(),
            parameters: raw.parameters.as_ref().map(|p| self.parameters(p)),
            request_body: raw.request_body.as_ref().map(|b| self.request_body(b)),
            responses: raw.api_responses.as_ref().map(|r| self.responses(r)),
            security: raw
                .security_requirements
                .as_ref()
                .map(|s| self.security(s)),
        };
        operation.message = self.renderer.render_modified_operation(&operation);
        Ok(operation)
    }

    // ----- parameters -----

    fn parameters(&self, raw: &RawChangedParameters) -> ParametersSummary {
        let leaf = |param: &RawParameter, action| ParameterSummary {
            name: param.name.clone(),
            location: param.location.clone(),
            description: param.description.clone().unwrap_or_default(),
            action,
            breaking: false,
            message: String::new(),
        };

        let mut parameters = Vec::new();
        parameters.extend(raw.increased.iter().map(|p| leaf(p, ChangeAction::Added)));
        parameters.extend(raw.missing.iter().map(|p| leaf(p, ChangeAction::Deleted)));
        parameters.extend(raw.changed.iter().map(|changed| ParameterSummary {
            name: changed.name.clone(),
            location: changed.location.clone(),
            description: changed.description().unwrap_or_default().to_string(),
            action: ChangeAction::Modified,
            breaking: changed.incompatible,
            message: String::new(),
        }));
        for parameter in &mut parameters {
            parameter.message = self.renderer.render_parameter(parameter);
        }

        let mut summary = ParametersSummary {
            breaking: raw.incompatible,
            parameters,
            message: String::new(),
        };
        summary.message = self.renderer.render_parameters(&summary);
        summary
    }

    // ----- request body -----

    fn request_body(&self, raw: &RawChangedRequestBody) -> RequestBodySummary {
        let details = raw
            .content
            .as_ref()
            .map(|content| self.request_body_details(content))
            .unwrap_or_default();

        let mut summary = RequestBodySummary {
            breaking: raw.incompatible,
            details,
            message: String::new(),
        };
        summary.message = self.renderer.render_request_body(&summary);
        summary
    }

    fn request_body_details(&self, content: &RawChangedContent) -> Vec<RequestBodySummaryDetail> {
        let whole = |name: &String, action| RequestBodySummaryDetail {
            name: name.clone(),
            action,
            breaking: false,
            properties: Vec::new(),
            message: String::new(),
        };

        let mut details = Vec::new();
        details.extend(content.increased.keys().map(|n| whole(n, ChangeAction::Added)));
        details.extend(content.missing.keys().map(|n| whole(n, ChangeAction::Deleted)));
        details.extend(
            content
                .changed
                .iter()
                .map(|(name, media)| RequestBodySummaryDetail {
                    name: name.clone(),
                    action: ChangeAction::Modified,
                    breaking: media.incompatible,
                    properties: self.schema_properties(
                        media.schema.as_ref(),
                        REQUEST_PROPERTY_INDENT,
                    ),
                    message: String::new(),
                }),
        );
        for detail in &mut details {
            detail.message = self.renderer.render_request_body_detail(detail);
        }
        details
    }

    // ----- responses -----

    fn responses(&self, raw: &RawChangedApiResponses) -> ResponsesSummary {
        let whole = |code: &String, description: Option<&str>, action| ResponsesSummaryDetail {
            code: code.clone(),
            description: description.unwrap_or_default().to_string(),
            action,
            breaking: false,
            details: Vec::new(),
            message: String::new(),
        };

        let mut details = Vec::new();
        details.extend(raw.increased.iter().map(|(code, response)| {
            whole(code, response.description.as_deref(), ChangeAction::Added)
        }));
        details.extend(raw.missing.iter().map(|(code, response)| {
            whole(code, response.description.as_deref(), ChangeAction::Deleted)
        }));
        details.extend(
            raw.changed
                .iter()
                .map(|(code, changed)| ResponsesSummaryDetail {
                    code: code.clone(),
                    description: changed.description().unwrap_or_default().to_string(),
                    action: ChangeAction::Modified,
                    breaking: changed.incompatible,
                    details: self.response_sub_details(
                        changed.headers.as_ref(),
                        changed.content.as_ref(),
                    ),
                    message: String::new(),
                }),
        );
        for detail in &mut details {
            detail.message = self.renderer.render_responses_detail(detail);
        }

        let mut summary = ResponsesSummary {
            breaking: raw.incompatible,
            details,
            message: String::new(),
        };
        summary.message = self.renderer.render_responses(&summary);
        summary
    }

    /// Header changes first, then content changes; each in bucket order.
    fn response_sub_details(
        &self,
        headers: Option<&RawChangedHeaders>,
        content: Option<&RawChangedContent>,
    ) -> Vec<ResponseSummaryDetail> {
        let whole = |kind, name: &String, action| ResponseSummaryDetail {
            kind,
            name: name.clone(),
            action,
            breaking: false,
            properties: Vec::new(),
            message: String::new(),
        };

        let mut details = Vec::new();
        if let Some(headers) = headers {
            let kind = ResponseDetailKind::Header;
            details.extend(
                headers
                    .increased
                    .keys()
                    .map(|n| whole(kind, n, ChangeAction::Added)),
            );
            details.extend(
                headers
                    .missing
                    .keys()
                    .map(|n| whole(kind, n, ChangeAction::Deleted)),
            );
            details.extend(headers.changed.iter().map(|(name, changed)| {
                ResponseSummaryDetail {
                    breaking: changed.incompatible,
                    ..whole(kind, name, ChangeAction::Modified)
                }
            }));
        }
        if let Some(content) = content {
            let kind = ResponseDetailKind::Content;
            details.extend(
                content
                    .increased
                    .keys()
                    .map(|n| whole(kind, n, ChangeAction::Added)),
            );
            details.extend(
                content
                    .missing
                    .keys()
                    .map(|n| whole(kind, n, ChangeAction::Deleted)),
            );
            details.extend(content.changed.iter().map(|(name, media)| {
                ResponseSummaryDetail {
                    breaking: media.incompatible,
                    properties: self
                        .schema_properties(media.schema.as_ref(), RESPONSE_PROPERTY_INDENT),
                    ..whole(kind, name, ChangeAction::Modified)
                }
            }));
        }
        for detail in &mut details {
            detail.message = self.renderer.render_response_detail(detail);
        }
        details
    }

    // ----- schemas -----

    fn schema_properties(
        &self,
        schema: Option<&RawChangedSchema>,
        indent: usize,
    ) -> Vec<PropertiesSummary> {
        schema
            .map(|schema| self.properties(schema, indent))
            .unwrap_or_default()
    }

    /// Flatten one changed schema into its property list at `indent`.
    ///
    /// Added, then deleted, then modified properties (each recursing one level
    /// deeper), then the synthetic `items` node for array schemas.
    fn properties(&self, schema: &RawChangedSchema, indent: usize) -> Vec<PropertiesSummary> {
        let mut properties = Vec::new();

        for (name, added) in &schema.increased_properties {
            properties.push(self.leaf_property(name, added, ChangeAction::Added, indent));
        }
        for (name, missing) in &schema.missing_properties {
            properties.push(self.leaf_property(name, missing, ChangeAction::Deleted, indent));
        }
        for (name, changed) in &schema.changed_properties {
            let mut node = PropertiesSummary {
                name: name.clone(),
                property_type: changed.type_label(),
                description: changed.description().unwrap_or_default().to_string(),
                action: ChangeAction::Modified,
                breaking: changed.incompatible,
                group: None,
                nested: self.properties(changed, indent + 1),
                message: String::new(),
            };
            node.message = self.renderer.render_property(&node, indent);
            properties.push(node);
        }

        if schema.is_array() {
            if let Some(items) = schema.items.as_deref() {
                let mut node = PropertiesSummary {
                    name: PropertiesSummary::ITEMS_GROUP.to_string(),
                    property_type: items.type_label(),
                    description: String::new(),
                    action: ChangeAction::Modified,
                    breaking: false,
                    group: Some(PropertiesSummary::ITEMS_GROUP.to_string()),
                    nested: self.properties(items, indent + 1),
                    message: String::new(),
                };
                node.message = self.renderer.render_property(&node, indent);
                properties.push(node);
            }
        }

        properties
    }

    fn leaf_property(
        &self,
        name: &str,
        schema: &RawSchema,
        action: ChangeAction,
        indent: usize,
    ) -> PropertiesSummary {
        let mut node = PropertiesSummary {
            name: name.to_string(),
            property_type: schema.type_label(),
            description: schema.description.clone().unwrap_or_default(),
            action,
            breaking: false,
            group: None,
            nested: Vec::new(),
            message: String::new(),
        };
        node.message = self.renderer.render_property(&node, indent);
        node
    }

    // ----- security -----

    fn security(&self, raw: &RawChangedSecurityRequirements) -> SecuritySummary {
        let scheme_details = |requirement: &RawSecurityRequirement, action| {
            requirement
                .keys()
                .map(|scheme| SecuritySummaryDetail {
                    name: scheme.clone(),
                    action,
                    breaking: false,
                    message: String::new(),
                })
                .collect::<Vec<_>>()
        };

        let mut details = Vec::new();
        for requirement in &raw.increased {
            details.extend(scheme_details(requirement, ChangeAction::Added));
        }
        for requirement in &raw.missing {
            details.extend(scheme_details(requirement, ChangeAction::Deleted));
        }
        details.extend(raw.changed.iter().map(|changed| SecuritySummaryDetail {
            name: changed.name(),
            action: ChangeAction::Modified,
            breaking: changed.incompatible,
            message: String::new(),
        }));
        for detail in &mut details {
            detail.message = self.renderer.render_security_detail(detail);
        }

        let mut summary = SecuritySummary {
            breaking: raw.incompatible,
            details,
            message: String::new(),
        };
        summary.message = self.renderer.render_security(&summary);
        summary
    }
}

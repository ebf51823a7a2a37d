//! Markdown narrative renderer.

use crate::summary::model::{
    ChangeAction, EndpointSummary, ModifiedOperation, ParameterSummary, ParametersSummary,
    PropertiesSummary, Report, RequestBodySummary, RequestBodySummaryDetail, ResponseDetailKind,
    ResponseSummaryDetail, ResponsesSummary, ResponsesSummaryDetail, SecuritySummary,
    SecuritySummaryDetail,
};
use crate::summary::render::NarrativeRenderer;

/// Two spaces per nesting level of a property list.
const INDENT_UNIT: &str = "  ";

/// The canonical renderer: GitHub-flavoured Markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

/// Verb for an action; `None` for actions this renderer has no phrasing for.
fn verb(action: ChangeAction) -> Option<&'static str> {
    match action {
        ChangeAction::Added => Some("Added"),
        ChangeAction::Deleted => Some("Deleted"),
        ChangeAction::Modified => Some("Modified"),
        ChangeAction::Unknown => None,
    }
}

/// Quote `text` line by line; empty text quotes to nothing.
fn blockquote(text: &str) -> String {
    let text = text.trim_end();
    if text.is_empty() {
        return String::new();
    }
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">\n".to_string()
            } else {
                format!("> {}\n", line)
            }
        })
        .collect()
}

fn indent(level: usize) -> String {
    INDENT_UNIT.repeat(level)
}

fn type_suffix(property_type: &str) -> String {
    if property_type.is_empty() {
        String::new()
    } else {
        format!(" ({})", property_type)
    }
}

/// Standard reason phrase for a numeric status code; empty for `default`,
/// `4XX` and unregistered codes.
pub fn reason_phrase(code: &str) -> &'static str {
    code.parse::<u16>()
        .ok()
        .and_then(|n| http::StatusCode::from_u16(n).ok())
        .and_then(|status| status.canonical_reason())
        .unwrap_or("")
}

fn status_label(code: &str) -> String {
    match reason_phrase(code) {
        "" => code.to_string(),
        reason => format!("{} {}", code, reason),
    }
}

fn operation_heading(method: &str, path: &str) -> String {
    format!("##### `{}` {}\n\n", method, path)
}

fn concat<'a>(messages: impl IntoIterator<Item = &'a str>) -> String {
    messages.into_iter().collect()
}

impl NarrativeRenderer for MarkdownRenderer {
    fn render_report(&self, report: &Report) -> String {
        if !report.has_changes() {
            return "No differences. Specifications are equivalent.\n".to_string();
        }

        let mut out = String::new();
        let endpoint_buckets = [
            ("What's New", &report.added),
            ("What's Deleted", &report.deleted),
            ("What's Deprecated", &report.deprecated),
        ];
        for (title, endpoints) in endpoint_buckets {
            if endpoints.is_empty() {
                continue;
            }
            out.push_str(&format!("#### {}\n\n", title));
            out.push_str(&concat(endpoints.iter().map(|e| e.message.as_str())));
        }
        if !report.modified.is_empty() {
            out.push_str("#### What's Changed\n\n");
            out.push_str(&concat(report.modified.iter().map(|op| op.message.as_str())));
        }
        out
    }

    fn render_endpoint(&self, endpoint: &EndpointSummary) -> String {
        let mut out = operation_heading(&endpoint.method, &endpoint.path);
        let quote = blockquote(&endpoint.description);
        if !quote.is_empty() {
            out.push_str(&quote);
            out.push('\n');
        }
        out
    }

    fn render_modified_operation(&self, operation: &ModifiedOperation) -> String {
        let mut out = operation_heading(&operation.method, &operation.path);

        let headline = if operation.summary.is_empty() {
            &operation.description
        } else {
            &operation.summary
        };
        let quote = blockquote(headline);
        if !quote.is_empty() {
            out.push_str(&quote);
            out.push('\n');
        }

        if let Some(parameters) = &operation.parameters {
            out.push_str(&parameters.message);
        }
        if let Some(body) = &operation.request_body {
            out.push_str(&body.message);
        }
        if let Some(responses) = &operation.responses {
            out.push_str(&responses.message);
        }
        if let Some(security) = &operation.security {
            out.push_str(&security.message);
        }
        out
    }

    fn render_parameters(&self, parameters: &ParametersSummary) -> String {
        let mut out = "###### Parameters\n\n".to_string();
        out.push_str(&concat(
            parameters.parameters.iter().map(|p| p.message.as_str()),
        ));
        out
    }

    fn render_parameter(&self, parameter: &ParameterSummary) -> String {
        let Some(verb) = verb(parameter.action) else {
            return String::new();
        };
        format!(
            "{}: `{}` in `{}`\n{}\n",
            verb,
            parameter.name,
            parameter.location,
            blockquote(&parameter.description)
        )
    }

    fn render_request_body(&self, body: &RequestBodySummary) -> String {
        let mut out = "###### Request\n\n".to_string();
        out.push_str(&concat(body.details.iter().map(|d| d.message.as_str())));
        out
    }

    fn render_request_body_detail(&self, detail: &RequestBodySummaryDetail) -> String {
        let Some(verb) = verb(detail.action) else {
            return String::new();
        };
        let mut out = format!("{} content type: `{}`\n\n", verb, detail.name);
        if detail.action == ChangeAction::Modified && !detail.properties.is_empty() {
            out.push_str(&concat(detail.properties.iter().map(|p| p.message.as_str())));
            out.push('\n');
        }
        out
    }

    fn render_responses(&self, responses: &ResponsesSummary) -> String {
        let mut out = "###### Response\n\n".to_string();
        for detail in &responses.details {
            out.push_str(&detail.message);
            out.push('\n');
        }
        out
    }

    fn render_responses_detail(&self, detail: &ResponsesSummaryDetail) -> String {
        let Some(verb) = verb(detail.action) else {
            return String::new();
        };
        let mut out = format!(
            "{} response: **{}**\n{}",
            verb,
            status_label(&detail.code),
            blockquote(&detail.description)
        );
        if detail.action == ChangeAction::Modified && !detail.details.is_empty() {
            out.push('\n');
            out.push_str(&concat(detail.details.iter().map(|d| d.message.as_str())));
        }
        out
    }

    fn render_response_detail(&self, detail: &ResponseSummaryDetail) -> String {
        let Some(verb) = verb(detail.action) else {
            return String::new();
        };
        match detail.kind {
            ResponseDetailKind::Header => format!("* {} header: `{}`\n", verb, detail.name),
            ResponseDetailKind::Content => {
                let mut out = format!("* {} content type: `{}`\n", verb, detail.name);
                if detail.action == ChangeAction::Modified {
                    out.push_str(&concat(detail.properties.iter().map(|p| p.message.as_str())));
                }
                out
            }
        }
    }

    fn render_property(&self, property: &PropertiesSummary, indent_level: usize) -> String {
        let Some(verb) = verb(property.action) else {
            return String::new();
        };
        let pad = indent(indent_level);
        let suffix = type_suffix(&property.property_type);

        let mut out = if property.is_items_group() {
            format!("{}* {} items{}\n", pad, verb, suffix)
        } else {
            format!("{}* {} property `{}`{}\n", pad, verb, property.name, suffix)
        };
        if property.action == ChangeAction::Modified {
            out.push_str(&concat(property.nested.iter().map(|p| p.message.as_str())));
        }
        out
    }

    fn render_security(&self, security: &SecuritySummary) -> String {
        let mut out = "###### Security\n\n".to_string();
        if !security.details.is_empty() {
            out.push_str(&concat(security.details.iter().map(|d| d.message.as_str())));
            out.push('\n');
        }
        out
    }

    fn render_security_detail(&self, detail: &SecuritySummaryDetail) -> String {
        match verb(detail.action) {
            Some(verb) => format!("* {} security requirement: `{}`\n", verb, detail.name),
            None => String::new(),
        }
    }
}

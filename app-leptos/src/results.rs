//! Shared result-rendering components.
//!
//! Used by both the per-file cards on the folder surfaces and the security
//! view of the snippet panel, so the two paths cannot drift apart in how
//! they render vulnerabilities and recommendations.

use astlens_core::types::Vulnerability;
use leptos::prelude::*;

/// Severity badge color, mirroring the report palette.
fn severity_color(severity: &str) -> &'static str {
    match severity.to_lowercase().as_str() {
        "low" => "#3498db",
        "medium" => "#e67e22",
        _ => "#e74c3c",
    }
}

/// Vulnerability section: one entry per finding, or the all-clear notice.
///
/// Every field is rendered through the defaulting accessors, so partially
/// populated findings degrade to placeholders instead of breaking the card.
#[component]
pub fn VulnerabilityList(vulnerabilities: Vec<Vulnerability>) -> impl IntoView {
    if vulnerabilities.is_empty() {
        return view! {
            <div class="all-clear">"No security vulnerabilities found"</div>
        }
        .into_any();
    }

    view! {
        <div class="vulnerability-section">
            <h4 class="section-heading">"Security Vulnerabilities"</h4>
            <ul class="vulnerability-list">
                {vulnerabilities.into_iter().map(|vuln| {
                    let color = severity_color(vuln.severity_label());
                    let footer = vuln
                        .line
                        .map(|line| format!("Line {} | {}", line, vuln.rule_label()));
                    view! {
                        <li class="vulnerability-item">
                            <div class="vulnerability-head">
                                <span class="severity-badge" style=format!("background:{}", color)>
                                    {vuln.severity_label().to_string()}
                                </span>
                                <strong class="vulnerability-kind" style=format!("color:{}", color)>
                                    {vuln.kind_label().to_string()}
                                </strong>
                            </div>
                            <p class="vulnerability-description">{vuln.description().to_string()}</p>
                            {footer.map(|text| view! { <div class="vulnerability-footer">{text}</div> })}
                        </li>
                    }
                }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
    .into_any()
}

/// Recommendation section, with its own empty notice.
#[component]
pub fn RecommendationList(recommendations: Vec<String>) -> impl IntoView {
    if recommendations.is_empty() {
        return view! {
            <div class="no-recommendations">"No specific recommendations available"</div>
        }
        .into_any();
    }

    view! {
        <div class="recommendation-section">
            <h4 class="section-heading">"Recommendations"</h4>
            <ul class="recommendation-list">
                {recommendations.into_iter().map(|recommendation| {
                    view! { <li class="recommendation-item">{recommendation}</li> }
                }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
    .into_any()
}

/// Pretty-printed JSON in a scrollable block.
#[component]
pub fn JsonBlock(text: String) -> impl IntoView {
    view! { <pre class="json-block">{text}</pre> }
}

/// Centered placeholder for the distinguishable empty conditions. Children
/// carry an optional affordance such as a "clear search" button.
#[component]
pub fn EmptyNotice(
    title: &'static str,
    #[prop(into)] body: String,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="empty-notice">
            <h3>{title}</h3>
            <p>{body}</p>
            {children.map(|children| children())}
        </div>
    }
}

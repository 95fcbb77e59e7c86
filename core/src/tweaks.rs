use serde_json::{json, Map, Value};

use crate::config::FlowConfig;

/// Per-component settings keyed by component id. Values are free-form JSON.
pub type Tweaks = Map<String, Value>;

pub const PROMPT_COMPONENT: &str = "Prompt-IeW7V";
pub const SEARCH_COMPONENT: &str = "TavilySearchComponent-xDlkf";

const RESEARCH_TEMPLATE: &str = "\n\nRESEARCH PLAN: {previous_response}\n\nUse Tavily Search to investigate the queries and analyze the findings.\nFocus on academic and reliable sources.\n\nSteps:\n1. Search using provided queries\n2. Analyze search results\n3. Verify source credibility\n4. Extract key findings\n\nFormat findings as:\n\nSEARCH RESULTS:\n[Key findings from searches]\n\nSOURCE ANALYSIS:\n[Credibility assessment]\n\nMAIN INSIGHTS:\n[Critical discoveries]\n\nEVIDENCE QUALITY:\n[Evaluation of findings]";

/// Baseline settings for the research flow's prompt and search components.
pub fn default_tweaks(config: &FlowConfig) -> Tweaks {
    let mut tweaks = Tweaks::new();
    tweaks.insert(
        PROMPT_COMPONENT.to_string(),
        json!({
            "previous_response": "",
            "template": RESEARCH_TEMPLATE,
            "tool_placeholder": ""
        }),
    );
    tweaks.insert(
        SEARCH_COMPONENT.to_string(),
        json!({
            "api_key": config.tavily_api_key,
            "include_answer": true,
            "include_images": true,
            "max_results": 5,
            "search_depth": "advanced",
            "topic": "general"
        }),
    );
    tweaks
}

/// Applies `overrides` on top of `defaults`, one level deep.
///
/// A component present in `overrides` replaces the default entry wholesale;
/// its nested settings are not merged.
pub fn merge(defaults: &Tweaks, overrides: Option<&Tweaks>) -> Tweaks {
    let mut effective = defaults.clone();
    if let Some(overrides) = overrides {
        for (component, settings) in overrides {
            effective.insert(component.clone(), settings.clone());
        }
    }
    effective
}

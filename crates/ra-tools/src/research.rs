//! Tool wrappers exposing the knowledge lookups to the hosting runtime.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use ra_core::{Error, PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters};

use crate::knowledge::{analyze_trends, research_topic, DEFAULT_FOCUS_AREA};

fn default_focus_area() -> String {
    DEFAULT_FOCUS_AREA.to_string()
}

// =============================================================================
// Research Topic Tool
// =============================================================================

#[derive(Debug, Default)]
pub struct ResearchTopicTool;

#[derive(Deserialize)]
struct ResearchTopicArgs {
    topic: String,
    #[serde(default = "default_focus_area")]
    focus_area: String,
}

#[async_trait]
impl Tool for ResearchTopicTool {
    fn name(&self) -> &str {
        "research_topic"
    }

    fn description(&self) -> &str {
        "Provide research insights and analysis on a topic based on existing knowledge"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new()
                .add_property(
                    "topic",
                    PropertySchema::string(
                        "The topic to research (e.g., 'artificial intelligence', \
                         'climate change', 'blockchain')",
                    ),
                    true,
                )
                .add_property(
                    "focus_area",
                    PropertySchema::enum_string(
                        "The area of focus for the research",
                        vec![
                            "general".to_string(),
                            "technical".to_string(),
                            "business".to_string(),
                            "social".to_string(),
                        ],
                    )
                    .with_default(json!(DEFAULT_FOCUS_AREA)),
                    false,
                ),
        )
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolOutput, Error> {
        let args: ResearchTopicArgs = serde_json::from_value(arguments)
            .map_err(|e| Error::tool("research_topic", format!("Invalid arguments: {}", e)))?;

        let outcome = research_topic(&args.topic, &args.focus_area);
        let is_error = outcome.is_error();
        let content = serde_json::to_value(&outcome)
            .map_err(|e| Error::tool("research_topic", e.to_string()))?;

        Ok(if is_error {
            ToolOutput::error(content)
        } else {
            ToolOutput::success(content)
        })
    }
}

// =============================================================================
// Analyze Trends Tool
// =============================================================================

#[derive(Debug, Default)]
pub struct AnalyzeTrendsTool;

#[derive(Deserialize)]
struct AnalyzeTrendsArgs {
    domain: String,
}

#[async_trait]
impl Tool for AnalyzeTrendsTool {
    fn name(&self) -> &str {
        "analyze_trends"
    }

    fn description(&self) -> &str {
        "Analyze current trends and developments in a specific domain"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new().add_property(
                "domain",
                PropertySchema::enum_string(
                    "The domain to analyze trends for",
                    vec![
                        "technology".to_string(),
                        "business".to_string(),
                        "science".to_string(),
                    ],
                ),
                true,
            ),
        )
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolOutput, Error> {
        let args: AnalyzeTrendsArgs = serde_json::from_value(arguments)
            .map_err(|e| Error::tool("analyze_trends", format!("Invalid arguments: {}", e)))?;

        let outcome = analyze_trends(&args.domain);
        let is_error = outcome.is_error();
        let content = serde_json::to_value(&outcome)
            .map_err(|e| Error::tool("analyze_trends", e.to_string()))?;

        Ok(if is_error {
            ToolOutput::error(content)
        } else {
            ToolOutput::success(content)
        })
    }
}

/// Create the full set of knowledge tools for registration.
pub fn create_knowledge_tools() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(ResearchTopicTool),
        Box::new(AnalyzeTrendsTool),
    ]
}

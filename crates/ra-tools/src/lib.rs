//! ra-tools: Knowledge-lookup tools for the researcher agent
//!
//! This crate provides the tools the hosting runtime exposes to the agent:
//! - Research: canned insights on a topic, filtered by focus area
//! - Trends: canned trend analysis for a domain
//!
//! Both are pure lookups against compiled-in tables; they never touch the
//! network or mutate any state.

pub mod knowledge;
pub mod research;

pub use knowledge::{
    analyze_trends, research_topic, ResearchOutcome, ResearchReport, TrendReport, TrendsOutcome,
    DEFAULT_FOCUS_AREA,
};
pub use research::{create_knowledge_tools, AnalyzeTrendsTool, ResearchTopicTool};

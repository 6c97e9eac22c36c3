//! Compiled-in knowledge tables and the pure lookup functions over them.
//!
//! The tables are fixed for the process lifetime and compared against
//! case-folded, trimmed keys. Unknown topics and domains come back as tagged
//! failure records rather than errors; an unknown focus area under a known
//! topic degrades to that topic's `general` entry.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Focus area used when the caller does not specify one.
pub const DEFAULT_FOCUS_AREA: &str = "general";

const METHODOLOGY: &str = "Analysis based on existing knowledge base";
const LAST_UPDATED: &str = "Knowledge current as of training data";
const ANALYSIS_DATE: &str = "Based on current knowledge patterns";
const FOCUS_FALLBACK: &str = "Limited information available for this focus area.";

static KNOWLEDGE_BASE: LazyLock<HashMap<&'static str, HashMap<&'static str, &'static str>>> =
    LazyLock::new(|| {
        HashMap::from([
            (
                "artificial intelligence",
                HashMap::from([
                    ("general", "AI is a rapidly evolving field focused on creating machines that can perform tasks typically requiring human intelligence. Key areas include machine learning, natural language processing, computer vision, and robotics. Current trends show significant advancement in large language models, generative AI, and autonomous systems."),
                    ("technical", "AI encompasses various approaches including supervised/unsupervised learning, neural networks, deep learning architectures (CNNs, RNNs, Transformers), reinforcement learning, and symbolic AI. Modern architectures like attention mechanisms and transformer models have revolutionized NLP and multimodal applications."),
                    ("business", "AI is transforming industries through automation, predictive analytics, personalized experiences, and decision support systems. Companies are investing heavily in AI infrastructure, talent acquisition, and ethical AI practices. Key challenges include ROI measurement, data quality, and integration complexity."),
                    ("social", "AI raises important questions about job displacement, privacy, bias in algorithms, and the future of human-machine collaboration. Discussions focus on AI governance, ethical frameworks, transparency, and ensuring AI benefits society broadly."),
                ]),
            ),
            (
                "climate change",
                HashMap::from([
                    ("general", "Climate change refers to long-term shifts in global temperatures and weather patterns, primarily driven by human activities since the Industrial Revolution. Key indicators include rising global temperatures, melting ice caps, sea level rise, and extreme weather events."),
                    ("technical", "Climate science involves understanding greenhouse gas emissions (CO2, CH4, N2O), feedback loops, climate modeling, and mitigation technologies. Solutions include renewable energy systems, carbon capture, energy efficiency, and sustainable transportation technologies."),
                    ("business", "Climate change presents both risks and opportunities for businesses. Companies are adopting sustainability practices, ESG reporting, carbon accounting, and climate risk assessments. Green finance and sustainable business models are becoming competitive advantages."),
                    ("social", "Climate change disproportionately affects vulnerable populations and raises questions of climate justice, adaptation strategies, and international cooperation. Social movements and policy advocacy play crucial roles in driving climate action."),
                ]),
            ),
            (
                "blockchain",
                HashMap::from([
                    ("general", "Blockchain is a distributed ledger technology that maintains a continuously growing list of records, linked and secured using cryptography. It enables decentralized, transparent, and immutable record-keeping without requiring a central authority."),
                    ("technical", "Blockchain systems use cryptographic hashing, consensus mechanisms (Proof of Work, Proof of Stake), smart contracts, and distributed networks. Key technical challenges include scalability, energy consumption, and interoperability between different blockchain networks."),
                    ("business", "Blockchain applications span cryptocurrency, supply chain management, digital identity, decentralized finance (DeFi), and non-fungible tokens (NFTs). Businesses are exploring blockchain for transparency, reducing intermediaries, and creating new business models."),
                    ("social", "Blockchain raises questions about financial inclusion, regulatory frameworks, energy consumption, and the decentralization of traditional institutions. It has potential to increase transparency and reduce corruption in various sectors."),
                ]),
            ),
        ])
    });

static TREND_ANALYSIS: LazyLock<HashMap<&'static str, TrendReport>> = LazyLock::new(|| {
    HashMap::from([
        (
            "technology",
            TrendReport {
                key_trends: vec![
                    "Generative AI and Large Language Models".to_string(),
                    "Edge Computing and IoT Integration".to_string(),
                    "Quantum Computing Development".to_string(),
                    "Sustainable Technology Solutions".to_string(),
                    "Extended Reality (AR/VR/MR)".to_string(),
                ],
                emerging_patterns: "Technology is moving toward more distributed, intelligent, and sustainable solutions. AI integration is becoming ubiquitous across all tech sectors.".to_string(),
                future_outlook: "Continued convergence of AI, cloud computing, and sustainable practices will shape the next decade of technological development.".to_string(),
            },
        ),
        (
            "business",
            TrendReport {
                key_trends: vec![
                    "Digital Transformation Acceleration".to_string(),
                    "Remote and Hybrid Work Models".to_string(),
                    "ESG and Sustainability Focus".to_string(),
                    "Customer Experience Personalization".to_string(),
                    "Data-Driven Decision Making".to_string(),
                ],
                emerging_patterns: "Businesses are prioritizing agility, sustainability, and customer-centricity while leveraging technology for competitive advantage.".to_string(),
                future_outlook: "Organizations that successfully balance human-centered approaches with technological innovation will lead market transformations.".to_string(),
            },
        ),
        (
            "science",
            TrendReport {
                key_trends: vec![
                    "Interdisciplinary Research Collaboration".to_string(),
                    "AI-Assisted Scientific Discovery".to_string(),
                    "Open Science and Data Sharing".to_string(),
                    "Climate Science and Environmental Research".to_string(),
                    "Precision Medicine and Biotechnology".to_string(),
                ],
                emerging_patterns: "Scientific research is becoming more collaborative, data-intensive, and focused on addressing global challenges.".to_string(),
                future_outlook: "Integration of AI tools with traditional scientific methods will accelerate discovery and innovation across all fields.".to_string(),
            },
        ),
    ])
});

/// Trend structure for one domain: five ordered trend labels plus two
/// free-text summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub key_trends: Vec<String>,
    pub emerging_patterns: String,
    pub future_outlook: String,
}

/// Research insights for one (topic, focus area) pair. `topic` and
/// `focus_area` echo the caller's original, un-normalized strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub topic: String,
    pub focus_area: String,
    pub insights: String,
    pub methodology: String,
    pub last_updated: String,
}

/// Tagged result of a topic lookup; serializes to
/// `{"status":"success","research":{..}}` or
/// `{"status":"error","error_message":".."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResearchOutcome {
    Success { research: ResearchReport },
    Error { error_message: String },
}

/// Tagged result of a trend lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TrendsOutcome {
    Success {
        analysis: TrendReport,
        domain: String,
        analysis_date: String,
    },
    Error {
        error_message: String,
    },
}

impl ResearchOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, ResearchOutcome::Error { .. })
    }
}

impl TrendsOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, TrendsOutcome::Error { .. })
    }
}

/// Look up research insights for a topic, filtered by focus area.
///
/// Both inputs are case-folded and trimmed before the lookup. A known topic
/// with an unknown focus area falls back to the topic's `general` entry.
pub fn research_topic(topic: &str, focus_area: &str) -> ResearchOutcome {
    tracing::info!(topic, focus_area, "research_topic tool called");

    let topic_key = topic.trim().to_lowercase();
    let focus_key = focus_area.trim().to_lowercase();

    let Some(entries) = KNOWLEDGE_BASE.get(topic_key.as_str()) else {
        return ResearchOutcome::Error {
            error_message: format!(
                "Sorry, I don't have comprehensive research data for '{topic}'. \
                 Available topics include: artificial intelligence, climate change, blockchain."
            ),
        };
    };

    let insights = entries
        .get(focus_key.as_str())
        .or_else(|| entries.get(DEFAULT_FOCUS_AREA))
        .copied()
        .unwrap_or(FOCUS_FALLBACK);

    ResearchOutcome::Success {
        research: ResearchReport {
            topic: topic.to_string(),
            focus_area: focus_area.to_string(),
            insights: insights.to_string(),
            methodology: METHODOLOGY.to_string(),
            last_updated: LAST_UPDATED.to_string(),
        },
    }
}

/// Look up the trend analysis for a domain (technology, business, science).
pub fn analyze_trends(domain: &str) -> TrendsOutcome {
    tracing::info!(domain, "analyze_trends tool called");

    let domain_key = domain.trim().to_lowercase();

    match TREND_ANALYSIS.get(domain_key.as_str()) {
        Some(report) => TrendsOutcome::Success {
            analysis: report.clone(),
            domain: domain.to_string(),
            analysis_date: ANALYSIS_DATE.to_string(),
        },
        None => TrendsOutcome::Error {
            error_message: format!(
                "Sorry, trend analysis not available for '{domain}'. \
                 Available domains: technology, business, science."
            ),
        },
    }
}

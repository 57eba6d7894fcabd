use screener_core::{FilterPreset, Keyword, ScreenerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable registry of topic presets plus the global sentiment lexicon.
/// Built once at startup and shared read-only; preset keys are internal
/// identifiers and matched exactly, with no normalization.
#[derive(Debug)]
pub struct PresetCatalog {
    presets: BTreeMap<String, FilterPreset>,
    positive_lexicon: Vec<String>,
    negative_lexicon: Vec<String>,
}

/// Discovery shape for the preset listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetSummary {
    pub name: String,
    pub description: String,
    pub keyword_count: usize,
}

impl PresetCatalog {
    pub fn from_presets(presets: Vec<FilterPreset>) -> Self {
        let mut positive_lexicon: Vec<String> = Vec::new();
        let mut negative_lexicon: Vec<String> = Vec::new();
        for preset in &presets {
            for term in &preset.positive_indicators {
                if !positive_lexicon.iter().any(|t| t == term) {
                    positive_lexicon.push(term.clone());
                }
            }
            for term in &preset.negative_indicators {
                if !negative_lexicon.iter().any(|t| t == term) {
                    negative_lexicon.push(term.clone());
                }
            }
        }

        let presets = presets
            .into_iter()
            .map(|preset| (preset.key.clone(), preset))
            .collect();

        Self {
            presets,
            positive_lexicon,
            negative_lexicon,
        }
    }

    /// Load presets from an operator-supplied TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ScreenerError> {
        let file: PresetFile =
            toml::from_str(input).map_err(screener_core::ConfigError::Parse)?;

        let presets = file
            .presets
            .into_iter()
            .map(|(key, def)| def.into_preset(key))
            .collect();

        Ok(Self::from_presets(presets))
    }

    pub fn get(&self, key: &str) -> Result<&FilterPreset, ScreenerError> {
        self.presets
            .get(key)
            .ok_or_else(|| ScreenerError::PresetNotFound {
                key: key.to_string(),
            })
    }

    pub fn list(&self) -> &BTreeMap<String, FilterPreset> {
        &self.presets
    }

    pub fn summaries(&self) -> BTreeMap<String, PresetSummary> {
        self.presets
            .iter()
            .map(|(key, preset)| {
                (
                    key.clone(),
                    PresetSummary {
                        name: preset.name.clone(),
                        description: preset.description.clone(),
                        keyword_count: preset.keyword_count(),
                    },
                )
            })
            .collect()
    }

    /// The global positive/negative indicator sets used by the
    /// preset-independent sentiment classifier.
    pub fn sentiment_lexicon(&self) -> (&[String], &[String]) {
        (&self.positive_lexicon, &self.negative_lexicon)
    }

    /// The built-in Haryana news taxonomy.
    pub fn builtin() -> Self {
        Self::from_presets(builtin_presets())
    }
}

#[derive(Debug, Deserialize)]
struct PresetFile {
    presets: BTreeMap<String, PresetDef>,
}

#[derive(Debug, Deserialize)]
struct PresetDef {
    name: String,
    #[serde(default)]
    description: String,
    keywords: Vec<KeywordDef>,
    #[serde(default)]
    positive_indicators: Vec<String>,
    #[serde(default)]
    negative_indicators: Vec<String>,
}

/// A keyword entry in a preset file: either a bare term (weight 1) or a
/// `{ term, weight }` table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeywordDef {
    Term(String),
    Weighted {
        term: String,
        #[serde(default = "default_weight")]
        weight: u32,
    },
}

fn default_weight() -> u32 {
    1
}

impl PresetDef {
    fn into_preset(self, key: String) -> FilterPreset {
        FilterPreset {
            key,
            name: self.name,
            description: self.description,
            keywords: self
                .keywords
                .into_iter()
                .map(|def| match def {
                    KeywordDef::Term(term) => Keyword::new(term, 1),
                    KeywordDef::Weighted { term, weight } => Keyword::new(term, weight),
                })
                .collect(),
            positive_indicators: self.positive_indicators,
            negative_indicators: self.negative_indicators,
        }
    }
}

fn keywords(anchor: (&str, u32), terms: &[&str]) -> Vec<Keyword> {
    let mut keywords = vec![Keyword::new(anchor.0, anchor.1)];
    keywords.extend(terms.iter().map(|term| Keyword::new(*term, 1)));
    keywords
}

fn strings(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|term| term.to_string()).collect()
}

fn builtin_presets() -> Vec<FilterPreset> {
    vec![
        FilterPreset {
            key: "tourism".to_string(),
            name: "Tourism & Heritage".to_string(),
            description: "News about tourism development, heritage sites, cultural events"
                .to_string(),
            keywords: keywords(
                ("tourism", 10),
                &[
                    "tourist", "heritage", "monument", "temple", "fort", "cultural", "festival",
                    "museum", "archaeological", "surajkund", "kurukshetra", "pilgrimage", "resort",
                    "visitor",
                ],
            ),
            positive_indicators: strings(&[
                "inaugurate", "launch", "development", "promote", "boost", "attract", "improve",
                "enhance", "popular", "increase",
            ]),
            negative_indicators: strings(&[
                "close", "shutdown", "decline", "decrease", "protest", "damage",
            ]),
        },
        FilterPreset {
            key: "infrastructure".to_string(),
            name: "Infrastructure Development".to_string(),
            description: "News about infrastructure projects, development works".to_string(),
            keywords: keywords(
                ("infrastructure", 10),
                &[
                    "construction", "road", "highway", "metro", "railway", "airport", "bridge",
                    "flyover", "expressway", "smart city", "water supply", "electricity",
                    "public transport", "connectivity", "modernization",
                ],
            ),
            positive_indicators: strings(&[
                "complete", "inaugurate", "approve", "sanction", "fund", "upgrade", "modernize",
                "expand", "state-of-the-art",
            ]),
            negative_indicators: strings(&[
                "delay", "stall", "halt", "cancel", "poor", "deteriorate", "damage",
            ]),
        },
        FilterPreset {
            key: "economy".to_string(),
            name: "Economic Development".to_string(),
            description: "Business, industry, investment, and economic growth news".to_string(),
            keywords: keywords(
                ("investment", 10),
                &[
                    "economy", "economic", "business", "industry", "startup", "manufacturing",
                    "factory", "enterprise", "trade", "export", "employment", "industrial",
                    "innovation", "entrepreneur",
                ],
            ),
            positive_indicators: strings(&[
                "growth", "increase", "boost", "expand", "invest", "create", "attract", "rise",
                "surge", "record", "milestone", "success", "profitable",
            ]),
            negative_indicators: strings(&[
                "decline", "decrease", "loss", "shutdown", "layoff", "crisis",
            ]),
        },
        FilterPreset {
            key: "education".to_string(),
            name: "Education & Skill Development".to_string(),
            description: "News about education, schools, universities, skill development"
                .to_string(),
            keywords: keywords(
                ("education", 10),
                &[
                    "school", "college", "university", "institute", "skill", "training", "student",
                    "teacher", "research", "scholarship", "admission", "campus", "vocational",
                    "polytechnic",
                ],
            ),
            positive_indicators: strings(&[
                "inaugurate", "establish", "rank", "award", "excellence", "upgrade", "digital",
                "achieve", "recognition", "accreditation",
            ]),
            negative_indicators: strings(&[
                "close", "shutdown", "protest", "strike", "decline", "poor",
            ]),
        },
        FilterPreset {
            key: "agriculture".to_string(),
            name: "Agriculture & Rural Development".to_string(),
            description: "Farming, agriculture technology, rural development news".to_string(),
            keywords: keywords(
                ("agriculture", 10),
                &[
                    "farming", "farmer", "crop", "wheat", "harvest", "irrigation", "rural",
                    "village", "panchayat", "horticulture", "dairy", "organic", "fertilizer",
                    "mandi", "yield",
                ],
            ),
            positive_indicators: strings(&[
                "increase", "improve", "boost", "support", "subsidy", "scheme", "benefit",
                "record", "bumper", "profitable",
            ]),
            negative_indicators: strings(&[
                "decline", "loss", "damage", "protest", "crisis", "drought",
            ]),
        },
        FilterPreset {
            key: "sports".to_string(),
            name: "Sports & Recreation".to_string(),
            description: "Sports facilities, achievements, events".to_string(),
            keywords: keywords(
                ("sports", 10),
                &[
                    "athlete", "medal", "olympic", "championship", "stadium", "tournament",
                    "cricket", "hockey", "wrestling", "boxing", "kabaddi", "badminton", "coach",
                    "academy",
                ],
            ),
            positive_indicators: strings(&[
                "win", "medal", "gold", "victory", "champion", "world-class", "achieve", "record",
                "milestone", "excellence",
            ]),
            negative_indicators: strings(&[
                "lose", "defeat", "controversy", "scandal", "close", "poor",
            ]),
        },
        FilterPreset {
            key: "environment".to_string(),
            name: "Environment & Sustainability".to_string(),
            description: "Environmental initiatives, green projects, sustainability".to_string(),
            keywords: keywords(
                ("environment", 10),
                &[
                    "green", "pollution", "air quality", "forest", "plantation", "conservation",
                    "wildlife", "solar", "renewable", "sustainable", "biodiversity", "climate",
                    "recycling", "eco-friendly",
                ],
            ),
            positive_indicators: strings(&[
                "improve", "clean", "reduce", "plant", "protect", "conserve", "initiative",
                "renewable", "award", "better",
            ]),
            negative_indicators: strings(&[
                "pollute", "worsen", "deteriorate", "damage", "destroy", "illegal",
            ]),
        },
        FilterPreset {
            key: "governance".to_string(),
            name: "Governance & Public Services".to_string(),
            description: "Government initiatives, public services, policy announcements"
                .to_string(),
            keywords: keywords(
                ("governance", 10),
                &[
                    "government", "policy", "scheme", "initiative", "administration", "welfare",
                    "portal", "e-governance", "minister", "reform", "transparency", "citizen",
                ],
            ),
            positive_indicators: strings(&[
                "launch", "introduce", "benefit", "efficient", "transparent", "digital",
                "accessible", "innovative", "award",
            ]),
            negative_indicators: strings(&[
                "corrupt", "scandal", "controversy", "delay", "inefficient", "poor",
            ]),
        },
    ]
}

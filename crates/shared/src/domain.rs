use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

macro_rules! slug_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

slug_newtype!(AppId);
slug_newtype!(ArticleSlug);

/// Ordinal quality rating assigned to a catalog app.
///
/// Variants are declared weakest first so the derived `Ord` reads
/// `Pending < Bronze < Silver < Gold < Platinum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationTier {
    Pending,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl CertificationTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

/// Publication state of a catalog app. Statuses this build does not know are
/// kept verbatim in `Other` so they still round-trip and filter exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppStatus {
    Live,
    ComingSoon,
    SeekingBuilder,
    Other(String),
}

impl AppStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Live => "live",
            Self::ComingSoon => "coming-soon",
            Self::SeekingBuilder => "seeking-builder",
            Self::Other(raw) => raw,
        }
    }

    /// Listing priority; lower sorts first.
    pub fn sort_priority(&self) -> u8 {
        match self {
            Self::Live => 0,
            Self::ComingSoon => 1,
            Self::SeekingBuilder => 2,
            Self::Other(_) => 3,
        }
    }
}

impl From<String> for AppStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "live" => Self::Live,
            "coming-soon" => Self::ComingSoon,
            "seeking-builder" => Self::SeekingBuilder,
            _ => Self::Other(raw),
        }
    }
}

impl From<AppStatus> for String {
    fn from(status: AppStatus) -> Self {
        match status {
            AppStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: AppId,
    pub name: String,
    pub builder: String,
    pub description: String,
    pub category: String,
    pub certification_tier: CertificationTier,
    #[serde(default)]
    pub models: Vec<String>,
    pub hardware: String,
    pub status: AppStatus,
    #[serde(default)]
    pub accuracy: BTreeMap<String, f64>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutTone {
    Info,
    Warning,
    Insight,
}

/// One unit of article body content.
///
/// Unrecognized `type` tags deserialize into [`ContentBlock::Unknown`] so a seed
/// written for a newer renderer still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Paragraph {
        text: String,
    },
    Heading {
        text: String,
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    Callout {
        tone: CalloutTone,
        text: String,
    },
    Formula {
        expression: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    List {
        items: Vec<String>,
        #[serde(default)]
        ordered: bool,
    },
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        code: String,
    },
    #[serde(other)]
    Unknown,
}

fn default_heading_level() -> u8 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub slug: ArticleSlug,
    pub order: u32,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display};

/// Names of the catalog properties the picker reads and filters on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNames {
    pub title: String,
    pub language: String,
    pub content_type: String,
    pub genres: String,
    pub release: String,
    pub poster: String,
    pub link: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            title: "Name".to_string(),
            language: "Language".to_string(),
            content_type: "Type".to_string(),
            genres: "Genre(s)".to_string(),
            release: "Release Date".to_string(),
            poster: "Poster".to_string(),
            link: "Link".to_string(),
        }
    }
}

/// Tags the user accepts for each filterable field
///
/// An empty list means "no constraint" for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSelection {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl FilterSelection {
    pub fn new(languages: Vec<String>, types: Vec<String>, genres: Vec<String>) -> Self {
        Self {
            languages: dedup_tags(languages),
            types: dedup_tags(types),
            genres: dedup_tags(genres),
        }
    }

    /// Builds a selection from three comma-separated lines of free text
    pub fn from_lines(languages: &str, types: &str, genres: &str) -> Self {
        Self::new(
            parse_tag_list(languages),
            parse_tag_list(types),
            parse_tag_list(genres),
        )
    }

    /// True when no field is constrained
    pub fn is_unconstrained(&self) -> bool {
        self.languages.is_empty() && self.types.is_empty() && self.genres.is_empty()
    }
}

/// Splits on commas, trims each piece and drops blanks
pub fn parse_tag_list(input: &str) -> Vec<String> {
    dedup_tags(
        input
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

/// Valid filter values as currently configured in the catalog schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub languages: Vec<String>,
    pub types: Vec<String>,
    pub genres: Vec<String>,
}

/// Release info of an entry; the catalog may store it as a date, number or tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Release {
    Date(String),
    Number(String),
    Tag(String),
    Unknown,
}

impl Display for Release {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Release::Date(value) | Release::Number(value) | Release::Tag(value) => {
                write!(f, "{}", value)
            }
            Release::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Display-ready projection of one catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub content_type: String,
    /// Language tags joined with ", "
    pub language: String,
    pub genres: Vec<String>,
    pub release: Release,
    /// Link to the entry inside the catalog itself
    pub page_url: Option<String>,
    pub poster_url: Option<String>,
    /// External "watch here" link
    pub link: Option<String>,
}

impl Recommendation {
    /// Genres joined with ", ", or "—" when there are none
    pub fn genres_display(&self) -> String {
        if self.genres.is_empty() {
            "—".to_string()
        } else {
            self.genres.join(", ")
        }
    }
}

/// Result of one pick: either a recommendation or an empty match set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PickOutcome {
    Found { recommendation: Recommendation },
    NoMatch,
}

// ============================================================================
// Notion API Types
// ============================================================================

/// Response from GET /v1/databases/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSchema {
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

/// Property definition inside a database schema
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaProperty {
    MultiSelect { multi_select: SchemaOptions },
    Select { select: SchemaOptions },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaOptions {
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

/// Response from POST /v1/databases/{id}/query
///
/// Entries are kept raw so one malformed property never fails the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub has_more: bool,
}

/// Value of one property on a page
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Option<Vec<RichText>>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Option<Vec<SelectOption>>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
    Number {
        #[serde(default)]
        number: Option<serde_json::Number>,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
}

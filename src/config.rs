use serde::Deserialize;

use crate::models::PropertyNames;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Notion integration secret
    pub notion_api_key: String,

    /// Id of the Notion database holding the catalog
    pub notion_database_id: String,

    /// Notion API base URL
    #[serde(default = "default_notion_api_url")]
    pub notion_api_url: String,

    /// Value of the `Notion-Version` header sent on every call
    #[serde(default = "default_notion_version")]
    pub notion_version: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_title_property")]
    pub title_property: String,
    #[serde(default = "default_language_property")]
    pub language_property: String,
    #[serde(default = "default_type_property")]
    pub type_property: String,
    #[serde(default = "default_genre_property")]
    pub genre_property: String,
    #[serde(default = "default_release_property")]
    pub release_property: String,
    #[serde(default = "default_poster_property")]
    pub poster_property: String,
    #[serde(default = "default_link_property")]
    pub link_property: String,
}

fn default_notion_api_url() -> String {
    "https://api.notion.com".to_string()
}

fn default_notion_version() -> String {
    "2022-06-28".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_title_property() -> String {
    "Name".to_string()
}

fn default_language_property() -> String {
    "Language".to_string()
}

fn default_type_property() -> String {
    "Type".to_string()
}

fn default_genre_property() -> String {
    "Genre(s)".to_string()
}

fn default_release_property() -> String {
    "Release Date".to_string()
}

fn default_poster_property() -> String {
    "Poster".to_string()
}

fn default_link_property() -> String {
    "Link".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Catalog property names to read and filter on
    pub fn property_names(&self) -> PropertyNames {
        PropertyNames {
            title: self.title_property.clone(),
            language: self.language_property.clone(),
            content_type: self.type_property.clone(),
            genres: self.genre_property.clone(),
            release: self.release_property.clone(),
            poster: self.poster_property.clone(),
            link: self.link_property.clone(),
        }
    }

    /// Address the web front end binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

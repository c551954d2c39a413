use crate::{
    error::{AppError, AppResult},
    models::{DatabaseSchema, FilterOptions, PropertyNames, SchemaProperty},
    services::catalog::CatalogClient,
};

/// Loads the valid language, type and genre tags from the catalog schema
pub async fn load_filter_options(
    client: &dyn CatalogClient,
    names: &PropertyNames,
) -> AppResult<FilterOptions> {
    let schema = client.fetch_schema().await?;
    let options = extract_filter_options(&schema, names)?;

    tracing::info!(
        languages = options.languages.len(),
        types = options.types.len(),
        genres = options.genres.len(),
        provider = client.name(),
        "Filter options loaded"
    );

    Ok(options)
}

/// Pulls the three option lists out of a schema, sorted and deduplicated
pub fn extract_filter_options(
    schema: &DatabaseSchema,
    names: &PropertyNames,
) -> AppResult<FilterOptions> {
    Ok(FilterOptions {
        languages: tag_options(schema, &names.language, PropertyKind::MultiSelect)?,
        types: tag_options(schema, &names.content_type, PropertyKind::Select)?,
        genres: tag_options(schema, &names.genres, PropertyKind::MultiSelect)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PropertyKind {
    MultiSelect,
    Select,
}

impl PropertyKind {
    fn label(self) -> &'static str {
        match self {
            PropertyKind::MultiSelect => "multi_select",
            PropertyKind::Select => "select",
        }
    }
}

fn tag_options(
    schema: &DatabaseSchema,
    property: &str,
    expected: PropertyKind,
) -> AppResult<Vec<String>> {
    let missing = |reason: String| AppError::RemoteSchema {
        status: None,
        message: reason,
    };

    let raw = schema
        .properties
        .get(property)
        .ok_or_else(|| missing(format!("property '{}' not found", property)))?;

    let parsed = serde_json::from_value::<SchemaProperty>(raw.clone())
        .map_err(|e| missing(format!("property '{}' is malformed: {}", property, e)))?;

    let options = match (expected, parsed) {
        (PropertyKind::MultiSelect, SchemaProperty::MultiSelect { multi_select }) => {
            multi_select.options
        }
        (PropertyKind::Select, SchemaProperty::Select { select }) => select.options,
        _ => {
            return Err(missing(format!(
                "property '{}' is not a {} property",
                property,
                expected.label()
            )))
        }
    };

    let mut tags: Vec<String> = options.into_iter().map(|opt| opt.name).collect();
    tags.sort();
    tags.dedup();
    Ok(tags)
}

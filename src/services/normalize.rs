/// Record normalizer
///
/// Flattens a raw Notion page into a display-ready `Recommendation`. Every field has
/// a fallback, so a missing or oddly-typed property never fails the pick; only an
/// entry that is not a JSON object at all is rejected.
use serde_json::{Map, Value};

use crate::{
    error::{AppError, AppResult},
    models::{PropertyNames, PropertyValue, Recommendation, Release},
};

const UNTITLED: &str = "Untitled";
const UNKNOWN: &str = "Unknown";

pub fn normalize_entry(entry: &Value, names: &PropertyNames) -> AppResult<Recommendation> {
    let page = entry.as_object().ok_or_else(|| {
        AppError::MalformedEntry(format!("expected a page object, got {}", kind_of(entry)))
    })?;

    let title = match property(page, &names.title) {
        Some(PropertyValue::Title { title: Some(parts) }) => {
            parts.into_iter().next().and_then(|part| part.plain_text)
        }
        _ => None,
    }
    .unwrap_or_else(|| UNTITLED.to_string());

    let languages = tag_names(property(page, &names.language));
    let language = if languages.is_empty() {
        UNKNOWN.to_string()
    } else {
        languages.join(", ")
    };

    let content_type = match property(page, &names.content_type) {
        Some(PropertyValue::Select { select: Some(tag) }) => tag.name,
        _ => UNKNOWN.to_string(),
    };

    let genres = tag_names(property(page, &names.genres));

    let release = match property(page, &names.release) {
        Some(PropertyValue::Date { date: Some(date) }) => {
            date.start.map(Release::Date).unwrap_or(Release::Unknown)
        }
        Some(PropertyValue::Number {
            number: Some(number),
        }) => Release::Number(number.to_string()),
        Some(PropertyValue::Select { select: Some(tag) }) => Release::Tag(tag.name),
        _ => Release::Unknown,
    };

    let poster_url = match property(page, &names.poster) {
        Some(PropertyValue::Url { url }) => non_blank(url),
        _ => None,
    };

    let link = match property(page, &names.link) {
        Some(PropertyValue::Url { url }) => non_blank(url),
        _ => None,
    };

    let page_url = non_blank(page.get("url").and_then(Value::as_str).map(str::to_string));

    Ok(Recommendation {
        title,
        content_type,
        language,
        genres,
        release,
        page_url,
        poster_url,
        link,
    })
}

/// Typed value of one property; `None` when absent or not parseable
fn property(page: &Map<String, Value>, name: &str) -> Option<PropertyValue> {
    page.get("properties")
        .and_then(|props| props.get(name))
        .and_then(|raw| serde_json::from_value(raw.clone()).ok())
}

fn tag_names(value: Option<PropertyValue>) -> Vec<String> {
    match value {
        Some(PropertyValue::MultiSelect {
            multi_select: Some(tags),
        }) => tags.into_iter().map(|tag| tag.name).collect(),
        _ => Vec::new(),
    }
}

fn non_blank(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names() -> PropertyNames {
        PropertyNames::default()
    }

    fn full_page() -> Value {
        json!({
            "object": "page",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "url": "https://www.notion.so/Signal-59833787",
            "properties": {
                "Name": { "type": "title", "title": [
                    { "type": "text", "plain_text": "Signal" },
                    { "type": "text", "plain_text": " (2016)" }
                ] },
                "Language": { "type": "multi_select", "multi_select": [
                    { "name": "Korean" }, { "name": "English" }
                ] },
                "Type": { "type": "select", "select": { "name": "TV Show" } },
                "Genre(s)": { "type": "multi_select", "multi_select": [
                    { "name": "Thriller" }, { "name": "Drama" }
                ] },
                "Release Date": { "type": "date", "date": { "start": "2016-01-22", "end": null } },
                "Poster": { "type": "url", "url": "  https://img.example/signal.jpg " },
                "Link": { "type": "url", "url": "https://www.netflix.com/title/80987077" }
            }
        })
    }

    #[test]
    fn test_normalize_full_page() {
        let rec = normalize_entry(&full_page(), &names()).unwrap();
        assert_eq!(rec.title, "Signal");
        assert_eq!(rec.language, "Korean, English");
        assert_eq!(rec.content_type, "TV Show");
        assert_eq!(rec.genres, vec!["Thriller", "Drama"]);
        assert_eq!(rec.genres_display(), "Thriller, Drama");
        assert_eq!(rec.release, Release::Date("2016-01-22".to_string()));
        assert_eq!(
            rec.poster_url,
            Some("https://img.example/signal.jpg".to_string())
        );
        assert_eq!(
            rec.link,
            Some("https://www.netflix.com/title/80987077".to_string())
        );
        assert_eq!(
            rec.page_url,
            Some("https://www.notion.so/Signal-59833787".to_string())
        );
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let rec = normalize_entry(&json!({ "properties": {} }), &names()).unwrap();
        assert_eq!(rec.title, "Untitled");
        assert_eq!(rec.language, "Unknown");
        assert_eq!(rec.content_type, "Unknown");
        assert_eq!(rec.release, Release::Unknown);
        assert_eq!(rec.release.to_string(), "Unknown");
        assert!(rec.genres.is_empty());
        assert_eq!(rec.poster_url, None);
        assert_eq!(rec.link, None);
        assert_eq!(rec.page_url, None);
    }

    #[test]
    fn test_page_without_properties_key_falls_back() {
        let rec = normalize_entry(&json!({ "object": "page" }), &names()).unwrap();
        assert_eq!(rec.title, "Untitled");
    }

    #[test]
    fn test_null_and_empty_values_fall_back() {
        let page = json!({
            "properties": {
                "Name": { "type": "title", "title": [] },
                "Language": { "type": "multi_select", "multi_select": [] },
                "Type": { "type": "select", "select": null },
                "Genre(s)": { "type": "multi_select", "multi_select": null },
                "Release Date": { "type": "date", "date": null },
                "Poster": { "type": "url", "url": "   " },
                "Link": { "type": "url", "url": null }
            }
        });
        let rec = normalize_entry(&page, &names()).unwrap();
        assert_eq!(rec.title, "Untitled");
        assert_eq!(rec.language, "Unknown");
        assert_eq!(rec.content_type, "Unknown");
        assert!(rec.genres.is_empty());
        assert_eq!(rec.release, Release::Unknown);
        assert_eq!(rec.poster_url, None);
        assert_eq!(rec.link, None);
    }

    #[test]
    fn test_release_number_and_tag() {
        let numeric = json!({
            "properties": { "Release Date": { "type": "number", "number": 2010 } }
        });
        assert_eq!(
            normalize_entry(&numeric, &names()).unwrap().release,
            Release::Number("2010".to_string())
        );

        let tagged = json!({
            "properties": { "Release Date": { "type": "select", "select": { "name": "2019" } } }
        });
        assert_eq!(
            normalize_entry(&tagged, &names()).unwrap().release,
            Release::Tag("2019".to_string())
        );
    }

    #[test]
    fn test_release_of_other_shape_is_unknown() {
        let page = json!({
            "properties": { "Release Date": { "type": "rich_text", "rich_text": [] } }
        });
        assert_eq!(
            normalize_entry(&page, &names()).unwrap().release,
            Release::Unknown
        );
    }

    #[test]
    fn test_url_fields_must_be_url_typed() {
        let page = json!({
            "properties": {
                "Poster": { "type": "files", "files": [{ "name": "poster.jpg" }] },
                "Link": "https://not-a-property-object"
            }
        });
        let rec = normalize_entry(&page, &names()).unwrap();
        assert_eq!(rec.poster_url, None);
        assert_eq!(rec.link, None);
    }

    #[test]
    fn test_malformed_property_does_not_fail() {
        let page = json!({
            "properties": {
                "Type": { "type": "select", "select": { "color": "red" } },
                "Language": { "type": "multi_select", "multi_select": "Korean" }
            }
        });
        let rec = normalize_entry(&page, &names()).unwrap();
        assert_eq!(rec.content_type, "Unknown");
        assert_eq!(rec.language, "Unknown");
    }

    #[test]
    fn test_non_object_entry_is_error() {
        let err = normalize_entry(&Value::Null, &names()).unwrap_err();
        assert!(matches!(err, AppError::MalformedEntry(_)));
    }
}

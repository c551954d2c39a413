/// Query builder
///
/// Translates a filter selection into the compound filter accepted by the Notion
/// database query endpoint: an AND over one OR-clause per constrained field.
use serde::Serialize;
use serde_json::Value;

use crate::models::{FilterSelection, PropertyNames, PropertyValue};

/// Predicate sent to the catalog query endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Filter {
    And { and: Vec<Filter> },
    Or { or: Vec<Filter> },
    Property(PropertyFilter),
}

/// Condition on a single property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyFilter {
    pub property: String,
    #[serde(flatten)]
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Multi-select property holds the tag
    MultiSelect { contains: String },
    /// Select property is exactly the tag
    Select { equals: String },
}

/// Body of POST /v1/databases/{id}/query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl QueryBody {
    pub fn from_selection(selection: &FilterSelection, names: &PropertyNames) -> Self {
        Self {
            filter: build_filter(selection, names),
        }
    }
}

/// Builds the compound filter for a selection
///
/// Returns `None` when nothing is constrained; empty fields never produce a clause.
/// Tags are passed through verbatim.
pub fn build_filter(selection: &FilterSelection, names: &PropertyNames) -> Option<Filter> {
    let mut clauses = Vec::new();

    if let Some(clause) = any_of(&names.language, &selection.languages, |tag| {
        Condition::MultiSelect { contains: tag }
    }) {
        clauses.push(clause);
    }

    if let Some(clause) = any_of(&names.content_type, &selection.types, |tag| {
        Condition::Select { equals: tag }
    }) {
        clauses.push(clause);
    }

    if let Some(clause) = any_of(&names.genres, &selection.genres, |tag| {
        Condition::MultiSelect { contains: tag }
    }) {
        clauses.push(clause);
    }

    if clauses.is_empty() {
        None
    } else {
        Some(Filter::And { and: clauses })
    }
}

fn any_of<F>(property: &str, tags: &[String], condition: F) -> Option<Filter>
where
    F: Fn(String) -> Condition,
{
    if tags.is_empty() {
        return None;
    }

    let or = tags
        .iter()
        .map(|tag| {
            Filter::Property(PropertyFilter {
                property: property.to_string(),
                condition: condition(tag.clone()),
            })
        })
        .collect();

    Some(Filter::Or { or })
}

impl Filter {
    /// Evaluates the filter against a raw catalog entry the way the catalog does
    pub fn matches(&self, entry: &Value) -> bool {
        match self {
            Filter::And { and } => and.iter().all(|f| f.matches(entry)),
            Filter::Or { or } => or.iter().any(|f| f.matches(entry)),
            Filter::Property(filter) => filter.matches(entry),
        }
    }
}

impl PropertyFilter {
    fn matches(&self, entry: &Value) -> bool {
        let value = entry
            .get("properties")
            .and_then(|props| props.get(&self.property))
            .and_then(|raw| serde_json::from_value::<PropertyValue>(raw.clone()).ok());

        match (&self.condition, value) {
            (
                Condition::MultiSelect { contains },
                Some(PropertyValue::MultiSelect {
                    multi_select: Some(tags),
                }),
            ) => tags.iter().any(|tag| &tag.name == contains),
            (
                Condition::Select { equals },
                Some(PropertyValue::Select {
                    select: Some(tag),
                }),
            ) => &tag.name == equals,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn selection(languages: &[&str], types: &[&str], genres: &[&str]) -> FilterSelection {
        let owned = |tags: &[&str]| tags.iter().map(|t| t.to_string()).collect();
        FilterSelection::new(owned(languages), owned(types), owned(genres))
    }

    fn entry(languages: &[&str], content_type: Option<&str>, genres: &[&str]) -> Value {
        let tags = |names: &[&str]| {
            names
                .iter()
                .map(|n| json!({ "name": n }))
                .collect::<Vec<_>>()
        };
        json!({
            "object": "page",
            "properties": {
                "Language": { "type": "multi_select", "multi_select": tags(languages) },
                "Type": { "type": "select", "select": content_type.map(|t| json!({ "name": t })) },
                "Genre(s)": { "type": "multi_select", "multi_select": tags(genres) }
            }
        })
    }

    #[test]
    fn test_unconstrained_selection_has_no_filter() {
        let names = PropertyNames::default();
        assert_eq!(build_filter(&FilterSelection::default(), &names), None);

        let body = QueryBody::from_selection(&FilterSelection::default(), &names);
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({}));
    }

    #[test]
    fn test_filter_wire_format() {
        let names = PropertyNames::default();
        let body = QueryBody::from_selection(
            &selection(&["Chinese", "Korean"], &["Movie"], &["Thriller"]),
            &names,
        );

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "filter": {
                    "and": [
                        { "or": [
                            { "property": "Language", "multi_select": { "contains": "Chinese" } },
                            { "property": "Language", "multi_select": { "contains": "Korean" } }
                        ] },
                        { "or": [
                            { "property": "Type", "select": { "equals": "Movie" } }
                        ] },
                        { "or": [
                            { "property": "Genre(s)", "multi_select": { "contains": "Thriller" } }
                        ] }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_empty_field_omits_clause() {
        let names = PropertyNames::default();
        let filter = build_filter(&selection(&[], &["TV Show"], &[]), &names).unwrap();

        match filter {
            Filter::And { and } => {
                assert_eq!(and.len(), 1);
                assert_eq!(
                    serde_json::to_value(&and[0]).unwrap(),
                    json!({ "or": [{ "property": "Type", "select": { "equals": "TV Show" } }] })
                );
            }
            other => panic!("expected AND at top level, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_property_names() {
        let names = PropertyNames {
            genres: "Genres".to_string(),
            ..PropertyNames::default()
        };
        let body = QueryBody::from_selection(&selection(&[], &[], &["Drama"]), &names);
        assert_eq!(
            serde_json::to_value(&body).unwrap()["filter"]["and"][0]["or"][0]["property"],
            "Genres"
        );
    }

    #[test]
    fn test_tags_are_not_normalized() {
        let names = PropertyNames::default();
        let filter = build_filter(&selection(&[" korean "], &[], &[]), &names).unwrap();
        assert!(!filter.matches(&entry(&["Korean"], None, &[])));
        assert!(filter.matches(&entry(&[" korean "], None, &[])));
    }

    #[test]
    fn test_korean_thriller_matches() {
        let names = PropertyNames::default();
        let filter = build_filter(&selection(&["Korean"], &[], &["Thriller"]), &names).unwrap();
        let candidate = entry(&["Korean", "English"], Some("TV Show"), &["Thriller", "Drama"]);
        assert!(filter.matches(&candidate));
    }

    #[test]
    fn test_filter_soundness() {
        let names = PropertyNames::default();
        let catalog = vec![
            entry(&["Korean", "English"], Some("TV Show"), &["Thriller", "Drama"]),
            entry(&["Japanese"], Some("Anime (Show)"), &["Romance"]),
            entry(&["Chinese"], Some("Movie"), &["Thriller"]),
            entry(&[], None, &[]),
            entry(&["Korean"], Some("Movie"), &["Comedy"]),
        ];
        let chosen = selection(&["Korean", "Chinese"], &["Movie", "TV Show"], &["Thriller"]);
        let filter = build_filter(&chosen, &names).unwrap();

        let accepted: Vec<&Value> = catalog.iter().filter(|e| filter.matches(e)).collect();
        assert_eq!(accepted.len(), 2);

        for e in accepted {
            let props = &e["properties"];
            let has = |prop: &str, wanted: &[String]| {
                props[prop]["multi_select"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .any(|t| wanted.iter().any(|w| t["name"] == w.as_str()))
            };
            assert!(has("Language", &chosen.languages));
            assert!(has("Genre(s)", &chosen.genres));
            let content_type = props["Type"]["select"]["name"].as_str().unwrap();
            assert!(chosen.types.iter().any(|t| t == content_type));
        }
    }

    #[test]
    fn test_unconstrained_matches_everything() {
        let names = PropertyNames::default();
        let body = QueryBody::from_selection(&FilterSelection::default(), &names);
        let anything = entry(&[], None, &[]);
        assert!(body.filter.as_ref().map_or(true, |f| f.matches(&anything)));
    }

    #[test]
    fn test_wrong_property_type_does_not_match() {
        let names = PropertyNames::default();
        let filter = build_filter(&selection(&[], &["Movie"], &[]), &names).unwrap();
        let odd = json!({
            "properties": { "Type": { "type": "multi_select", "multi_select": [{ "name": "Movie" }] } }
        });
        assert!(!filter.matches(&odd));
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Inline text content written to a title or rich_text property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

/// A single rich-text fragment as the API reads and writes it.
///
/// Writes carry `text.content`; reads additionally carry `plain_text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextFragment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
}

impl RichTextFragment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            text: Some(TextContent {
                content: content.into(),
            }),
            plain_text: None,
        }
    }

    /// Visible text of the fragment, preferring the read-side field.
    pub fn text_value(&self) -> &str {
        if let Some(plain) = &self.plain_text {
            plain
        } else if let Some(text) = &self.text {
            &text.content
        } else {
            ""
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectValue {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRef {
    pub id: String,
}

/// A typed Notion property value.
///
/// Exactly one of the fields is set; serialization skips the rest, which
/// matches the single-key objects the pages API expects on writes. Reads
/// also carry `type`/`id` keys, which serde ignores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<RichTextFragment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_text: Option<Vec<RichTextFragment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkbox: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<SelectValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SelectValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<Vec<RelationRef>>,
}

impl Property {
    pub fn title(content: impl Into<String>) -> Self {
        Self {
            title: Some(vec![RichTextFragment::new(content)]),
            ..Default::default()
        }
    }

    pub fn rich_text(content: impl Into<String>) -> Self {
        Self {
            rich_text: Some(vec![RichTextFragment::new(content)]),
            ..Default::default()
        }
    }

    pub fn number(value: f64) -> Self {
        Self {
            number: Some(value),
            ..Default::default()
        }
    }

    pub fn checkbox(value: bool) -> Self {
        Self {
            checkbox: Some(value),
            ..Default::default()
        }
    }

    pub fn date(start: impl Into<String>) -> Self {
        Self {
            date: Some(DateValue {
                start: start.into(),
            }),
            ..Default::default()
        }
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self {
            select: Some(SelectValue { name: name.into() }),
            ..Default::default()
        }
    }

    pub fn status(name: impl Into<String>) -> Self {
        Self {
            status: Some(SelectValue { name: name.into() }),
            ..Default::default()
        }
    }

    pub fn relation(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            relation: Some(ids.into_iter().map(|id| RelationRef { id }).collect()),
            ..Default::default()
        }
    }

    /// First fragment of a title property, empty string when absent.
    pub fn title_text(&self) -> &str {
        self.title
            .as_deref()
            .and_then(|fragments| fragments.first())
            .map(RichTextFragment::text_value)
            .unwrap_or("")
    }

    pub fn rich_text_value(&self) -> &str {
        self.rich_text
            .as_deref()
            .and_then(|fragments| fragments.first())
            .map(RichTextFragment::text_value)
            .unwrap_or("")
    }

    pub fn date_start(&self) -> Option<&str> {
        self.date.as_ref().map(|d| d.start.as_str())
    }

    pub fn select_name(&self) -> Option<&str> {
        self.select.as_ref().map(|s| s.name.as_str())
    }

    pub fn status_name(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.name.as_str())
    }

    pub fn relation_ids(&self) -> Vec<String> {
        self.relation
            .as_deref()
            .map(|refs| refs.iter().map(|r| r.id.clone()).collect())
            .unwrap_or_default()
    }
}

/// A Notion page as returned by the pages and query endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub in_trash: bool,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub last_edited_time: String,
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

impl Page {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }
}

/// Filter for a database query; only the shapes this service uses.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyFilter {
    pub property: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TextEquals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkbox: Option<BoolEquals>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextEquals {
    pub equals: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoolEquals {
    pub equals: bool,
}

impl PropertyFilter {
    pub fn title_equals(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            title: Some(TextEquals {
                equals: value.into(),
            }),
            checkbox: None,
        }
    }

    pub fn checkbox_equals(property: impl Into<String>, value: bool) -> Self {
        Self {
            property: property.into(),
            title: None,
            checkbox: Some(BoolEquals { equals: value }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QueryDatabaseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<PropertyFilter>,
}

#[derive(Debug, Deserialize)]
pub struct QueryDatabaseResponse {
    pub results: Vec<Page>,
}

#[derive(Debug, Serialize)]
pub struct PageParent {
    pub database_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePageRequest {
    pub parent: PageParent,
    pub properties: HashMap<String, Property>,
}

impl CreatePageRequest {
    pub fn new(database_id: impl Into<String>, properties: HashMap<String, Property>) -> Self {
        Self {
            parent: PageParent {
                database_id: database_id.into(),
            },
            properties,
        }
    }
}

/// Partial page update; `archived: true, in_trash: true` moves the page to
/// the trash, which is the soft-delete used for every entity.
#[derive(Debug, Default, Serialize)]
pub struct UpdatePageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_trash: Option<bool>,
}

impl UpdatePageRequest {
    pub fn properties(properties: HashMap<String, Property>) -> Self {
        Self {
            properties: Some(properties),
            ..Default::default()
        }
    }

    pub fn trash() -> Self {
        Self {
            archived: Some(true),
            in_trash: Some(true),
            ..Default::default()
        }
    }
}

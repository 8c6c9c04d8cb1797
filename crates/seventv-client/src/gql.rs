//! GraphQL documents and request payloads.

use serde::Serialize;

use crate::settings::{Category, Settings, SortField, SortOrder};

/// Text search with the full filter set.
pub const SEARCH_EMOTES: &str = r#"query SearchEmotes($query: String!, $page: Int, $limit: Int, $sort: Sort, $filter: EmoteSearchFilter) {
  emotes(query: $query, page: $page, limit: $limit, sort: $sort, filter: $filter) {
    count
    items { id name animated flags host { url files { name format width height } } owner { id username display_name } }
  }
}"#;

/// Category browse: no text, only the category filter.
pub const BROWSE_EMOTES: &str = r#"query BrowseEmotes($page: Int, $limit: Int, $sort: Sort, $category: EmoteSearchCategory) {
  emotes(query: "", page: $page, limit: $limit, sort: $sort, filter: { category: $category }) {
    count
    items { id name animated flags host { url files { name format width height } } owner { id username display_name } }
  }
}"#;

pub const USER_COSMETICS: &str = r#"query UserCosmetics($id: ObjectID!) {
  user(id: $id) {
    style { badge { id kind name host { url files { name format width height } } } }
  }
}"#;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GqlRequest {
    pub query: &'static str,
    pub variables: Variables,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Variables {
    Search(SearchVariables),
    Cosmetics { id: String },
}

/// Variables for both catalog documents. Text searches carry `query` and
/// `filter`; category browses carry `category` only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub page: u32,
    pub limit: u32,
    pub sort: Sort,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sort {
    pub value: SortField,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchFilter {
    pub category: Category,
    pub exact_match: bool,
    pub case_sensitive: bool,
    pub ignore_tags: bool,
    pub zero_width: bool,
    pub animated: bool,
}

impl GqlRequest {
    /// Catalog query for `text` at `page`. Empty text browses the configured
    /// category; anything else applies the text filters too.
    pub fn search(text: &str, page: u32, settings: &Settings) -> Self {
        let text = text.trim();
        let sort = Sort {
            value: settings.sort_field,
            order: settings.sort_order,
        };
        let page = page.max(1);
        let limit = settings.page_limit();

        if text.is_empty() {
            return Self {
                query: BROWSE_EMOTES,
                variables: Variables::Search(SearchVariables {
                    query: None,
                    page,
                    limit,
                    sort,
                    filter: None,
                    category: Some(settings.category),
                }),
            };
        }

        Self {
            query: SEARCH_EMOTES,
            variables: Variables::Search(SearchVariables {
                query: Some(text.to_string()),
                page,
                limit,
                sort,
                filter: Some(SearchFilter {
                    category: settings.category,
                    exact_match: settings.exact_match,
                    case_sensitive: settings.case_sensitive,
                    ignore_tags: settings.ignore_tags,
                    zero_width: settings.zero_width,
                    animated: settings.animated_only,
                }),
                category: None,
            }),
        }
    }

    pub fn cosmetics(user_id: &str) -> Self {
        Self {
            query: USER_COSMETICS,
            variables: Variables::Cosmetics {
                id: user_id.to_string(),
            },
        }
    }
}

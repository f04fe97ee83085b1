//! Query Parser: assembles the `filter`/`attributes`/`excludedAttributes`/`sortBy`/
//! `sortOrder`/`startIndex`/`count` query parameters a `search` request carries
//! (RFC 7644 Sections 3.4.2 and 3.4.3) into one `Query`, with pagination clamped to
//! `DispatchConfig`'s limits.

use crate::config::DispatchConfig;
use crate::error::{ScimError, ScimResult};
use crate::filter::{self, Filter};
use crate::projector::Projection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_str(s: &str) -> SortOrder {
        match s.to_lowercase().as_str() {
            "descending" | "desc" => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SortSpec {
    pub attribute: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn from_params(sort_by: Option<&str>, sort_order: Option<&str>) -> Option<SortSpec> {
        sort_by.map(|attr| SortSpec {
            attribute: attr.to_string(),
            order: sort_order.map(SortOrder::from_str).unwrap_or(SortOrder::Ascending),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Query {
    pub filter: Filter,
    pub projection: Projection,
    pub sort: Option<SortSpec>,
    pub start_index: usize,
    pub count: usize,
}

pub struct QueryParams<'a> {
    pub filter: Option<&'a str>,
    pub attributes: Option<&'a str>,
    pub excluded_attributes: Option<&'a str>,
    pub sort_by: Option<&'a str>,
    pub sort_order: Option<&'a str>,
    pub start_index: Option<&'a str>,
    pub count: Option<&'a str>,
}

impl Query {
    pub fn from_params(params: QueryParams, config: &DispatchConfig) -> ScimResult<Query> {
        let filter = match params.filter {
            Some(raw) => filter::parse(raw)?,
            None => Filter::Empty,
        };

        let start_index = match params.start_index {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| ScimError::InvalidSyntax(format!("invalid startIndex: '{}'", raw)))?
                .max(1) as usize,
            None => 1,
        };

        let count = match params.count {
            Some(raw) => {
                let requested = raw
                    .parse::<i64>()
                    .map_err(|_| ScimError::InvalidSyntax(format!("invalid count: '{}'", raw)))?;
                requested.clamp(0, config.max_results as i64) as usize
            }
            None => config.default_page_size.min(config.max_results),
        };

        Ok(Query {
            filter,
            projection: Projection::from_params(params.attributes, params.excluded_attributes)
                .with_compatibility(config.compatibility.show_empty_multi_valued),
            sort: SortSpec::from_params(params.sort_by, params.sort_order),
            start_index,
            count,
        })
    }
}

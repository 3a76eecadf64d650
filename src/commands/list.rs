use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::context::AppContext;
use crate::error::{BackofficeError, Result};
use crate::query::{DateFilter, DateRange, QuerySpec, parse_date};
use crate::resources::{self, Resource};
use crate::table::PaginationMeta;
use crate::table::text::render_text;

/// Query overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub filter: Option<DateFilter>,
    pub range: Option<(String, String)>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
    pub params: Vec<(String, String)>,
}

/// Build the query for a resource, validating each override against what
/// the resource supports. The page is applied last since the other setters
/// reset it.
pub fn build_query(
    resource: &Resource,
    options: &ListOptions,
    default_page_size: u32,
) -> Result<QuerySpec> {
    let mut query = resource.initial_query(default_page_size);

    if let Some(per_page) = options.per_page {
        query.set_page_size(per_page);
    }

    let filter = match (&options.filter, &options.range) {
        (Some(filter), _) => Some(*filter),
        (None, Some((from, to))) => Some(DateFilter::Custom(DateRange::new(
            parse_date(from)?,
            parse_date(to)?,
        )?)),
        (None, None) => None,
    };
    if let Some(filter) = filter {
        resource.check_filter(&filter)?;
        query.set_filter(Some(filter));
    }

    if let Some(search) = options.search.as_deref().filter(|s| !s.trim().is_empty()) {
        resource.check_search()?;
        query.set_search(search);
    }

    if let Some(status) = &options.status {
        resource.check_status(status)?;
        query.set_param("status", status.as_str());
    }

    for (key, value) in &options.params {
        if matches!(
            key.as_str(),
            "page" | "per_page" | "filter" | "search" | "start_date" | "end_date"
        ) {
            return Err(BackofficeError::InvalidInput(format!(
                "'{key}' is set by its own option, not --param"
            )));
        }
        query.set_param(key.as_str(), value.as_str());
    }

    if let Some(page) = options.page {
        if !resource.paginated && page > 1 {
            return Err(BackofficeError::InvalidInput(format!(
                "{} is not paginated",
                resource.name
            )));
        }
        query.set_page(page);
    }

    Ok(query)
}

fn header(resource: &Resource, query: &QuerySpec) -> String {
    let mut parts = vec![resource.title.bold().to_string()];
    if let Some(filter) = query.filter() {
        parts.push(format!("[{}]", filter.label()).cyan().to_string());
    }
    if !query.search().is_empty() {
        parts.push(format!("search: {}", query.search()).dimmed().to_string());
    }
    for (key, value) in query.params() {
        parts.push(format!("{key}: {value}").dimmed().to_string());
    }
    parts.join("  ")
}

/// Fetch and print one page of a resource
pub async fn cmd_list(
    ctx: &AppContext,
    resource_name: &str,
    options: ListOptions,
    output: OutputOptions,
) -> Result<()> {
    let resource = resources::find(resource_name)?;
    let query = build_query(resource, &options, ctx.config.page_size())?;

    let page = ctx.fetch_list(resource, &query).await?;
    let meta = PaginationMeta::from(&page);

    let json_output = json!({
        "resource": resource.name,
        "page": page.page,
        "total_pages": page.total_pages,
        "total": page.total_count,
        "query": query
            .to_query_pairs()
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect::<serde_json::Map<_, _>>(),
        "data": page.items,
    });

    let model = resource.view().render(&page.items, Some(meta), false);
    let text = format!("{}\n{}", header(resource, &query), render_text(&model));

    CommandOutput::new(json_output).with_text(text).print(output)
}

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::resources::{FilterSupport, RESOURCES, Resource};

/// A row in the resource table
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Filter")]
    filter: String,
    #[tabled(rename = "Search")]
    search: String,
    #[tabled(rename = "Operations")]
    operations: String,
}

fn filter_label(filter: FilterSupport) -> &'static str {
    match filter {
        FilterSupport::None => "-",
        FilterSupport::Full => "presets, range",
        FilterSupport::CustomRange => "range",
    }
}

fn operations(resource: &Resource) -> Vec<String> {
    let mut ops = vec!["list".to_string()];
    if resource.has_detail {
        ops.push("show".to_string());
    }
    if resource.crud {
        ops.extend(["create", "update", "delete"].map(String::from));
    }
    if resource.toggle.is_some() {
        ops.push("toggle".to_string());
    }
    ops.extend(resource.actions.iter().map(|a| format!("action {}", a.name)));
    ops
}

/// List the resource catalogue
pub fn cmd_resources(output: OutputOptions) -> Result<()> {
    let json_output = json!(
        RESOURCES
            .iter()
            .map(|r| json!({
                "name": r.name,
                "aliases": r.aliases,
                "title": r.title,
                "endpoint": r.endpoint,
                "paginated": r.paginated,
                "filter": filter_label(r.filter),
                "searchable": r.searchable,
                "statuses": r.statuses,
                "operations": operations(r),
            }))
            .collect::<Vec<_>>()
    );

    let rows: Vec<ResourceRow> = RESOURCES
        .iter()
        .map(|r| ResourceRow {
            name: r.name.to_string(),
            endpoint: r.endpoint.to_string(),
            filter: filter_label(r.filter).to_string(),
            search: if r.searchable { "yes" } else { "-" }.to_string(),
            operations: operations(r).join(", "),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    CommandOutput::new(json_output)
        .with_text(table.to_string())
        .print(output)
}

use owo_colors::OwoColorize;
use serde_json::Value;

use super::CommandOutput;
use crate::api::ApiRequest;
use crate::cli::OutputOptions;
use crate::context::AppContext;
use crate::display::format_record;
use crate::error::Result;
use crate::resources;

/// Detail endpoints answer with the bare record; some wrap it in `data`.
fn unwrap_record(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.len() == 1 && map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Display a single record
pub async fn cmd_show(
    ctx: &AppContext,
    resource_name: &str,
    id: &str,
    output: OutputOptions,
) -> Result<()> {
    let resource = resources::find(resource_name)?;
    let path = resource.detail_path(id)?;

    tracing::debug!(resource = resource.name, %path, "fetching record");
    let record = unwrap_record(ctx.transport().send(ApiRequest::get(path)).await?);

    let text = format!(
        "{} {}\n\n{}",
        capitalize_first(resource.noun).bold(),
        id.cyan(),
        format_record(&record)
    );

    CommandOutput::new(record).with_text(text).print(output)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_record() {
        assert_eq!(
            unwrap_record(json!({"data": {"id": 1}})),
            json!({"id": 1})
        );
        assert_eq!(
            unwrap_record(json!({"id": 1, "data": {"x": 2}})),
            json!({"id": 1, "data": {"x": 2}})
        );
        assert_eq!(unwrap_record(json!({"data": [1]})), json!({"data": [1]}));
    }
}

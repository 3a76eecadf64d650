use serde_json::Value;

use super::format::{
    active_flag, date_only, humanize, join_list, join_truncated, nested, or_placeholder, person,
    truncate,
};
use super::{ActionSpec, FilterSupport, Resource};
use crate::api::Method;
use crate::query::DateFilter;
use crate::table::{Column, PLACEHOLDER};

const ISSUE_STATUSES: &[&str] = &["open", "resolved", "closed", "dismissed"];

const REMIND_DRAFT: ActionSpec = ActionSpec {
    name: "remind",
    description: "Send a reminder for a draft contract",
    method: Method::Post,
    suffix: "remind-draft",
    value_key: None,
    success: "Reminder sent",
};

const REMIND_OVERDUE: ActionSpec = ActionSpec {
    name: "remind",
    description: "Send a reminder for an overdue project",
    method: Method::Post,
    suffix: "remind-overdue",
    value_key: None,
    success: "Reminder sent",
};

const SET_STATUS: ActionSpec = ActionSpec {
    name: "set-status",
    description: "Change the status of an issue report",
    method: Method::Patch,
    suffix: "status",
    value_key: Some("status"),
    success: "Status updated",
};

type Row = Value;

fn user_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID"),
        Column::new("fullname", "Name"),
        Column::new("email", "Email"),
        Column::new("phone_number", "Phone"),
        Column::new("status_label", "Status"),
        Column::new("last_login", "Last Login"),
    ]
}

fn admin_user_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID"),
        Column::new("fullname", "Name"),
        Column::new("email", "Email"),
        Column::new("phone_number", "Phone"),
        Column::new("userType", "Role").with_format(|v, _| nested(v, "name")),
        Column::new("status", "Status").with_format(|_, row: &Row| {
            let archived = row.get("archived").and_then(Value::as_bool) == Some(true);
            let label = if archived { "Inactive" } else { "Active" };
            label.to_string()
        }),
    ]
}

fn contract_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("contract_id", "ID"),
        Column::new("client", "Client").with_format(|v, _| person(v)),
        Column::new("status", "Status"),
        Column::new("last_action", "Last Action"),
        Column::new("created_at", "Created").with_format(|v, _| date_only(v)),
    ]
}

fn project_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID"),
        Column::new("project_name", "Project"),
        Column::new("creator", "Creator").with_format(|v, _| person(v)),
        Column::new("due_date", "Due Date"),
        Column::new("status_text", "Status").with_format(|v, row: &Row| {
            if row.get("is_overdue").and_then(Value::as_bool) == Some(true) {
                "Overdue".to_string()
            } else {
                or_placeholder(v)
            }
        }),
        Column::new("members", "Members").with_format(|v, _| join_list(v)),
    ]
}

fn subscription_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("user", "User").with_format(|v, _| person(v)),
        Column::new("plan", "Plan").with_format(|v, _| nested(v, "name")),
        Column::new("stripe_status", "Status"),
        Column::new("stripe_id", "Stripe ID"),
        Column::new("trial_ends_at", "Trial Ends").with_format(|v, _| date_only(v)),
        Column::new("ends_at", "Ends At").with_format(|v, _| date_only(v)),
        Column::new("created_at", "Created").with_format(|v, _| date_only(v)),
    ]
}

fn blog_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID"),
        Column::new("title", "Title"),
        Column::new("slug", "Slug"),
        Column::new("author", "Author").with_format(|v, _| person(v)),
        Column::new("status", "Status"),
        Column::new("video_url", "Media").with_format(|v, row: &Row| {
            let has_image = row
                .get("featured_image")
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty());
            let has_video = v.as_str().is_some_and(|s| !s.is_empty());
            match (has_image, has_video) {
                (true, true) => "Image, Video".to_string(),
                (true, false) => "Image".to_string(),
                (false, true) => "Video".to_string(),
                (false, false) => "Text only".to_string(),
            }
        }),
        Column::new("published_at", "Published").with_format(|v, _| {
            if v.is_null() {
                "Not published".to_string()
            } else {
                date_only(v)
            }
        }),
    ]
}

fn integration_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("user", "User").with_format(|v, _| person(v)),
        Column::new("service", "Platform").with_format(|v, _| humanize(v)),
        Column::new("is_active", "Status").with_format(|v, _| active_flag(v)),
        Column::new("created_at", "Connected").with_format(|v, _| date_only(v)),
    ]
}

fn export_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("user", "User").with_format(|v, _| person(v)),
        Column::new("platform", "Platform").with_format(|v, _| humanize(v)),
        Column::new("export_type", "Type").with_format(|v, _| humanize(v)),
        Column::new("status", "Status"),
        Column::new("items_exported", "Items"),
        Column::new("created_at", "Date").with_format(|v, _| date_only(v)),
    ]
}

fn contract_issue_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID"),
        Column::new("user", "User").with_format(|v, _| person(v)),
        Column::new("contract", "Contract").with_format(|v, _| nested(v, "title")),
        Column::new("details", "Issue").with_format(|v, _| truncate(v, 48)),
        Column::new("status", "Status"),
        Column::new("created_at", "Reported").with_format(|v, _| date_only(v)),
    ]
}

fn analysis_issue_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID"),
        Column::new("user", "User").with_format(|v, _| person(v)),
        Column::new("contract_analysis", "Analysis").with_format(|v, _| {
            ["original_name", "filename"]
                .iter()
                .find_map(|k| v.get(*k).and_then(Value::as_str).filter(|s| !s.is_empty()))
                .map(str::to_string)
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        }),
        Column::new("details", "Issue").with_format(|v, _| truncate(v, 48)),
        Column::new("status", "Status"),
        Column::new("created_at", "Reported").with_format(|v, _| date_only(v)),
    ]
}

fn risk_analysis_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("contract_title", "Title / File").with_format(|v, row: &Row| {
            first_text(&[v, &row["original_filename"]])
        }),
        Column::new("user", "User").with_format(|v, _| person(v)),
        Column::new("is_contract", "Type").with_format(|v, _| {
            let label = if v.as_bool() == Some(true) { "Contract" } else { "Document" };
            label.to_string()
        }),
        Column::new("processing_time", "Processing").with_format(|v, _| match v {
            Value::Number(n) if n.as_f64().is_some_and(|n| n != 0.0) => format!("{n}s"),
            _ => PLACEHOLDER.to_string(),
        }),
        Column::new("azure_file_url", "File").with_format(|v, _| truncate(v, 40)),
        Column::new("created_at", "Date").with_format(|v, _| date_only(v)),
    ]
}

fn negotiation_analysis_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("original_name", "File Name")
            .with_format(|v, row: &Row| first_text(&[v, &row["filename"]])),
        Column::new("user", "User").with_format(|v, _| person(v)),
        Column::new("status", "Status"),
        Column::new("file_path", "File").with_format(|v, _| truncate(v, 40)),
        Column::new("created_at", "Date").with_format(|v, _| date_only(v)),
    ]
}

/// First non-blank string among `values`.
fn first_text(values: &[&Value]) -> String {
    values
        .iter()
        .find_map(|v| v.as_str().filter(|s| !s.trim().is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn permission_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID"),
        Column::new("name", "Name"),
        Column::new("slug", "Slug"),
        Column::new("description", "Description").with_format(|v, _| or_placeholder(v)),
    ]
}

fn role_columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID"),
        Column::new("name", "Name"),
        Column::new("description", "Description").with_format(|v, _| or_placeholder(v)),
        Column::new("permissions", "Permissions").with_format(|v, _| join_truncated(v, 3)),
    ]
}

const BASE: Resource = Resource {
    name: "",
    aliases: &[],
    title: "",
    noun: "",
    endpoint: "",
    item_base: None,
    paginated: true,
    page_size: None,
    filter: FilterSupport::None,
    default_filter: None,
    searchable: true,
    statuses: &[],
    id_field: "id",
    has_detail: false,
    crud: false,
    toggle: None,
    actions: &[],
    columns: user_columns,
};

pub static RESOURCES: &[Resource] = &[
    Resource {
        name: "users",
        aliases: &["user"],
        title: "Users",
        noun: "user",
        endpoint: "/admin/users",
        page_size: Some(20),
        has_detail: true,
        toggle: Some("toggle-archive"),
        columns: user_columns,
        ..BASE
    },
    Resource {
        name: "admin-users",
        aliases: &["admins"],
        title: "Admin Users",
        noun: "admin user",
        endpoint: "/admin/admin-users",
        filter: FilterSupport::Full,
        default_filter: Some(DateFilter::ThisMonth),
        crud: true,
        toggle: Some("toggle-activate"),
        columns: admin_user_columns,
        ..BASE
    },
    Resource {
        name: "contracts",
        aliases: &["contract"],
        title: "Contracts",
        noun: "contract",
        endpoint: "/admin/contracts/list",
        item_base: Some("/admin/contracts"),
        filter: FilterSupport::Full,
        default_filter: Some(DateFilter::ThisMonth),
        id_field: "contract_auth",
        has_detail: true,
        actions: &[REMIND_DRAFT],
        columns: contract_columns,
        ..BASE
    },
    Resource {
        name: "projects",
        aliases: &["project"],
        title: "Projects",
        noun: "project",
        endpoint: "/admin/projects/list",
        item_base: Some("/admin/projects"),
        filter: FilterSupport::Full,
        default_filter: Some(DateFilter::ThisMonth),
        statuses: &["active", "ongoing", "upcoming", "completed", "overdue"],
        actions: &[REMIND_OVERDUE],
        columns: project_columns,
        ..BASE
    },
    Resource {
        name: "subscriptions",
        aliases: &["subs"],
        title: "Subscriptions",
        noun: "subscription",
        endpoint: "/admin/subscriptions/list",
        item_base: Some("/admin/subscriptions"),
        statuses: &["active", "canceled", "trialing", "past_due", "incomplete"],
        columns: subscription_columns,
        ..BASE
    },
    Resource {
        name: "blog",
        aliases: &["posts"],
        title: "Blog Posts",
        noun: "blog post",
        endpoint: "/admin/blog",
        page_size: Some(15),
        statuses: &["draft", "published"],
        crud: true,
        toggle: Some("toggle-publish"),
        columns: blog_columns,
        ..BASE
    },
    Resource {
        name: "integrations",
        aliases: &["connections"],
        title: "Integrations",
        noun: "integration",
        endpoint: "/admin/integrations/list",
        item_base: Some("/admin/integrations"),
        page_size: Some(15),
        filter: FilterSupport::CustomRange,
        columns: integration_columns,
        ..BASE
    },
    Resource {
        name: "exports",
        aliases: &["export-history"],
        title: "Export History",
        noun: "export",
        endpoint: "/admin/integrations/exports/list",
        item_base: Some("/admin/integrations/exports"),
        page_size: Some(15),
        searchable: false,
        columns: export_columns,
        ..BASE
    },
    Resource {
        name: "contract-issues",
        aliases: &["contract-reports"],
        title: "Contract Issues",
        noun: "contract issue",
        endpoint: "/admin/reports/contract-issues",
        page_size: Some(15),
        filter: FilterSupport::Full,
        default_filter: Some(DateFilter::ThisYear),
        statuses: ISSUE_STATUSES,
        has_detail: true,
        actions: &[SET_STATUS],
        columns: contract_issue_columns,
        ..BASE
    },
    Resource {
        name: "analysis-issues",
        aliases: &["analysis-reports"],
        title: "Analysis Issues",
        noun: "analysis issue",
        endpoint: "/admin/reports/analysis-issues",
        page_size: Some(15),
        filter: FilterSupport::Full,
        default_filter: Some(DateFilter::ThisYear),
        statuses: ISSUE_STATUSES,
        has_detail: true,
        actions: &[SET_STATUS],
        columns: analysis_issue_columns,
        ..BASE
    },
    Resource {
        name: "risk-analyses",
        aliases: &["workflow-analyses", "risk"],
        title: "Workflow Analysis",
        noun: "risk analysis",
        endpoint: "/admin/analysis/risk/list",
        item_base: Some("/admin/analysis/risk"),
        filter: FilterSupport::Full,
        default_filter: Some(DateFilter::ThisMonth),
        has_detail: true,
        columns: risk_analysis_columns,
        ..BASE
    },
    Resource {
        name: "negotiation-analyses",
        aliases: &["negotiations", "negotiation"],
        title: "Risk Negotiation",
        noun: "negotiation analysis",
        endpoint: "/admin/analysis/negotiation/list",
        item_base: Some("/admin/analysis/negotiation"),
        filter: FilterSupport::Full,
        default_filter: Some(DateFilter::ThisMonth),
        statuses: &["completed", "pending", "processing", "failed"],
        has_detail: true,
        columns: negotiation_analysis_columns,
        ..BASE
    },
    Resource {
        name: "permissions",
        aliases: &["perms"],
        title: "Permissions",
        noun: "permission",
        endpoint: "/admin/permissions",
        paginated: false,
        searchable: false,
        crud: true,
        columns: permission_columns,
        ..BASE
    },
    Resource {
        name: "roles",
        aliases: &["user-types"],
        title: "User Types",
        noun: "user type",
        endpoint: "/admin/user-types",
        paginated: false,
        searchable: false,
        crud: true,
        columns: role_columns,
        ..BASE
    },
];

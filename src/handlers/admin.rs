//! Generic admin-console handlers: index, change list, detail with inlines.
//!
//! Everything here is driven by the [`crate::admin::AdminSite`] registry;
//! the per-model match arms only select which service fetches rows. Columns,
//! filters, field groups, and inlines all come from the registration.

use crate::admin::FieldGroup;
use crate::error::AppError;
use crate::models::LoanStatus;
use crate::response::{success_many, success_one};
use crate::service::instances::InstanceFilter;
use crate::service::{AuthorService, BookService, GenreService, InstanceService};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Serialize)]
struct GroupBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'static str>,
    fields: Map<String, Value>,
}

#[derive(Serialize)]
struct InlineBody {
    model: &'static str,
    rows: Vec<Value>,
}

#[derive(Serialize)]
struct AdminDetail {
    display: String,
    groups: Vec<GroupBody>,
    inlines: Vec<InlineBody>,
}

/// GET /admin — the registered models.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    success_many(state.admin.models().to_vec())
}

/// GET /admin/{model} — change list projected to the configured columns.
/// Query params other than limit/offset must be configured filters.
pub async fn change_list(
    State(state): State<AppState>,
    Path(model): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let admin = state
        .admin
        .model_by_path(&model)
        .ok_or_else(|| AppError::NotFound(model.clone()))?;

    let mut limit: Option<u32> = None;
    let mut offset: Option<u32> = None;
    let mut filters: HashMap<&str, &str> = HashMap::new();
    for (key, value) in &params {
        match key.as_str() {
            "limit" => limit = value.parse().ok(),
            "offset" => offset = value.parse().ok(),
            other => {
                if !admin.list_filter.contains(&other) {
                    return Err(AppError::BadRequest(format!(
                        "{} cannot be filtered by '{}'",
                        admin.name, other
                    )));
                }
                filters.insert(other, value.as_str());
            }
        }
    }

    let rows = match admin.path_segment {
        "authors" => to_rows(AuthorService::list(&state.pool, None, limit, offset).await?),
        "books" => to_rows(BookService::change_list(&state.pool, limit, offset).await?),
        "genres" => to_rows(GenreService::list(&state.pool, None, limit, offset).await?),
        "bookinstances" => {
            let filter = instance_filter(&filters)?;
            to_rows(InstanceService::list(&state.pool, filter, limit, offset).await?)
        }
        other => return Err(AppError::NotFound(other.to_string())),
    };

    let projected: Vec<Value> = rows.iter().map(|r| project(r, admin.list_display)).collect();
    Ok(success_many(projected))
}

/// GET /admin/{model}/{id} — grouped fields plus inline rows of related
/// models.
pub async fn detail(
    State(state): State<AppState>,
    Path((model, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let admin = state
        .admin
        .model_by_path(&model)
        .ok_or_else(|| AppError::NotFound(model.clone()))?;

    // Inline rows hang off integer-keyed parents only.
    let (display, object, parent_id): (String, Value, Option<i64>) = match admin.path_segment {
        "authors" => {
            let id = parse_i64(&id)?;
            let author = AuthorService::get(&state.pool, id)
                .await?
                .ok_or_else(|| AppError::NotFound(id.to_string()))?;
            (author.to_string(), to_value(&author), Some(id))
        }
        "books" => {
            let id = parse_i64(&id)?;
            let detail = BookService::detail(&state.pool, id)
                .await?
                .ok_or_else(|| AppError::NotFound(id.to_string()))?;
            (detail.book.to_string(), to_value(&detail), Some(id))
        }
        "genres" => {
            let id = parse_i64(&id)?;
            let genre = GenreService::get(&state.pool, id)
                .await?
                .ok_or_else(|| AppError::NotFound(id.to_string()))?;
            (genre.to_string(), to_value(&genre), Some(id))
        }
        "bookinstances" => {
            let id = parse_uuid(&id)?;
            let copy = InstanceService::get(&state.pool, id)
                .await?
                .ok_or_else(|| AppError::NotFound(id.to_string()))?;
            (copy.to_string(), to_value(&copy), None)
        }
        other => return Err(AppError::NotFound(other.to_string())),
    };

    let mut inlines = Vec::with_capacity(admin.inlines.len());
    for inline in admin.inlines {
        let rows = match (admin.path_segment, inline.model, parent_id) {
            ("authors", "books", Some(id)) => {
                to_rows(BookService::list_by_author(&state.pool, id).await?)
            }
            ("books", "bookinstances", Some(id)) => {
                to_rows(InstanceService::list_by_book(&state.pool, id).await?)
            }
            _ => Vec::new(),
        };
        inlines.push(InlineBody {
            model: inline.model,
            rows,
        });
    }

    Ok(success_one(AdminDetail {
        display,
        groups: grouped_fields(&object, admin.field_groups),
        inlines,
    }))
}

fn parse_i64(id: &str) -> Result<i64, AppError> {
    id.parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

fn parse_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest("invalid uuid".into()))
}

fn instance_filter(filters: &HashMap<&str, &str>) -> Result<InstanceFilter, AppError> {
    let status = match filters.get("status") {
        Some(code) => Some(
            LoanStatus::from_code(code)
                .ok_or_else(|| AppError::BadRequest(format!("unknown status code '{}'", code)))?,
        ),
        None => None,
    };
    let due_back = match filters.get("due_back") {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest(format!("invalid date '{}'", raw)))?,
        ),
        None => None,
    };
    Ok(InstanceFilter {
        status,
        due_back,
        book_id: None,
    })
}

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn to_rows<T: Serialize>(rows: Vec<T>) -> Vec<Value> {
    rows.iter().map(to_value).collect()
}

/// Keep only the configured columns, in configuration order. An empty column
/// list means the full row.
fn project(row: &Value, columns: &[&str]) -> Value {
    if columns.is_empty() {
        return row.clone();
    }
    let mut out = Map::new();
    if let Value::Object(obj) = row {
        for col in columns {
            out.insert((*col).to_string(), obj.get(*col).cloned().unwrap_or(Value::Null));
        }
    }
    Value::Object(out)
}

/// Fields grouped per configuration; no configuration means one unnamed
/// group holding the whole object.
fn grouped_fields(object: &Value, groups: &[FieldGroup]) -> Vec<GroupBody> {
    let obj = match object {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    if groups.is_empty() {
        return vec![GroupBody {
            title: None,
            fields: obj,
        }];
    }
    groups
        .iter()
        .map(|group| GroupBody {
            title: group.title,
            fields: group
                .fields
                .iter()
                .map(|field| {
                    (
                        (*field).to_string(),
                        obj.get(*field).cloned().unwrap_or(Value::Null),
                    )
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projection_keeps_exactly_the_configured_columns() {
        let row = json!({
            "id": 1,
            "title": "Dune",
            "author": "Herbert, Frank",
            "genre_summary": "Science Fiction",
            "summary": "long text"
        });
        let projected = project(&row, &["title", "author", "genre_summary"]);
        let obj = projected.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["title"], "Dune");
        assert!(!obj.contains_key("summary"));
    }

    #[test]
    fn empty_projection_keeps_the_whole_row() {
        let row = json!({"id": 1, "name": "Poetry"});
        assert_eq!(project(&row, &[]), row);
    }

    #[test]
    fn missing_columns_project_as_null() {
        let row = json!({"id": 1});
        let projected = project(&row, &["id", "author"]);
        assert_eq!(projected.as_object().unwrap()["author"], Value::Null);
    }

    #[test]
    fn fields_are_grouped_per_configuration() {
        let object = json!({
            "id": "abc",
            "book_id": 2,
            "imprint": "Ace, 1990",
            "status": "m",
            "due_back": null
        });
        let groups = [
            FieldGroup {
                title: None,
                fields: &["book_id", "imprint", "id"],
            },
            FieldGroup {
                title: Some("Availability"),
                fields: &["status", "due_back"],
            },
        ];
        let bodies = grouped_fields(&object, &groups);
        assert_eq!(bodies.len(), 2);
        assert!(bodies[0].title.is_none());
        assert_eq!(bodies[0].fields.len(), 3);
        assert_eq!(bodies[1].title, Some("Availability"));
        assert_eq!(bodies[1].fields["status"], "m");
    }
}

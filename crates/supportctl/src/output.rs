//! Rendering of command results as JSON, YAML or tables, with optional
//! JMESPath filtering

use anyhow::{Context, Result};
use comfy_table::Table;
use jpx_core::Runtime;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

/// Global JMESPath runtime with extended functions
static JMESPATH_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the JMESPath runtime with extended functions
pub fn get_jmespath_runtime() -> &'static Runtime {
    JMESPATH_RUNTIME.get_or_init(|| Runtime::builder().with_all_extensions().build())
}

/// Normalize backtick literals in JMESPath expressions.
///
/// JMESPath allows "elided quotes" in backtick literals, so `` `low` `` means
/// `` `"low"` ``. The runtime requires valid JSON inside backticks, so bare
/// words are quoted before compilation.
///
/// Examples:
/// - `` `urgent` `` -> `` `"urgent"` ``
/// - `` `true` `` -> `` `true` `` (unchanged, valid JSON boolean)
/// - `` `123` `` -> `` `123` `` (unchanged, valid JSON number)
/// - `` `"resolved"` `` -> `` `"resolved"` `` (unchanged)
fn normalize_backtick_literals(query: &str) -> String {
    static BACKTICK_RE: OnceLock<Option<Regex>> = OnceLock::new();
    // Backtick-delimited content, allowing escaped backticks
    let Some(re) = BACKTICK_RE
        .get_or_init(|| Regex::new(r"`([^`\\]*(?:\\.[^`\\]*)*)`").ok())
        .as_ref()
    else {
        return query.to_string();
    };

    re.replace_all(query, |caps: &regex::Captures| {
        let content = &caps[1];
        let trimmed = content.trim();

        if serde_json::from_str::<Value>(trimmed).is_ok() {
            format!("`{}`", content)
        } else {
            let escaped = trimmed.replace('\\', "\\\\").replace('"', "\\\"");
            format!("`\"{}\"`", escaped)
        }
    })
    .into_owned()
}

/// Compile a JMESPath expression using the extended runtime.
pub fn compile_jmespath(
    query: &str,
) -> Result<jpx_core::Expression<'static>, jpx_core::JmespathError> {
    let normalized = normalize_backtick_literals(query);
    get_jmespath_runtime().compile(&normalized)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

pub fn print_output<T: Serialize>(
    data: T,
    format: OutputFormat,
    query: Option<&str>,
) -> Result<()> {
    let rendered = render_output(data, format, query)?;
    println!("{}", rendered);
    Ok(())
}

/// Render `data` the way [`print_output`] prints it
pub fn render_output<T: Serialize>(
    data: T,
    format: OutputFormat,
    query: Option<&str>,
) -> Result<String> {
    let mut json_value = serde_json::to_value(data)?;

    if let Some(query_str) = query {
        let expr = compile_jmespath(query_str)
            .with_context(|| format!("Invalid JMESPath expression: {}", query_str))?;
        json_value = expr.search(&json_value).context("JMESPath query failed")?;
    }

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json_value)?,
        OutputFormat::Yaml => serde_yaml::to_string(&json_value)?,
        OutputFormat::Table => render_table(&json_value),
    };
    Ok(rendered)
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(arr) if !arr.is_empty() => {
            let mut table = Table::new();

            if let Value::Object(first) = &arr[0] {
                let headers: Vec<String> = first.keys().cloned().collect();
                table.set_header(&headers);

                for item in arr {
                    if let Value::Object(obj) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| format_value(obj.get(h).unwrap_or(&Value::Null)))
                            .collect();
                        table.add_row(row);
                    }
                }
            } else {
                table.set_header(vec!["Value"]);
                for item in arr {
                    table.add_row(vec![format_value(item)]);
                }
            }

            table.to_string()
        }
        Value::Object(obj) => {
            // A single list member, e.g. {"cases": [...]}, renders as that list
            if obj.len() == 1
                && let Some(inner @ Value::Array(_)) = obj.values().next()
            {
                return render_table(inner);
            }

            let mut table = Table::new();
            table.set_header(vec!["Key", "Value"]);

            for (key, val) in obj {
                table.add_row(vec![key.clone(), format_value(val)]);
            }

            table.to_string()
        }
        _ => format_value(value),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_backtick_unquoted_string() {
        assert_eq!(
            normalize_backtick_literals(r#"cases[?status==`opened`]"#),
            r#"cases[?status==`"opened"`]"#
        );
    }

    #[test]
    fn test_normalize_backtick_already_quoted() {
        assert_eq!(
            normalize_backtick_literals(r#"cases[?status==`"opened"`]"#),
            r#"cases[?status==`"opened"`]"#
        );
    }

    #[test]
    fn test_normalize_backtick_json_literals_unchanged() {
        for query in [
            r#"[?count==`123`]"#,
            r#"[?isSuppressed==`true`]"#,
            r#"[?value==`null`]"#,
            r#"`[1, 2, 3]`"#,
            r#"`{"key": "value"}`"#,
        ] {
            assert_eq!(normalize_backtick_literals(query), query);
        }
    }

    #[test]
    fn test_normalize_multiple_backticks() {
        assert_eq!(
            normalize_backtick_literals(r#"[?severityCode==`high` && status==`opened`]"#),
            r#"[?severityCode==`"high"` && status==`"opened"`]"#
        );
    }

    #[test]
    fn test_jmespath_backtick_literal_compiles() {
        let query = r#"cases[?severityCode==`urgent`].caseId | [0]"#;
        let result = compile_jmespath(query);
        assert!(
            result.is_ok(),
            "Backtick literals should be supported: {:?}",
            result
        );
    }

    #[test]
    fn test_query_filters_cases() {
        let data = json!({
            "cases": [
                {"caseId": "case-1", "status": "opened"},
                {"caseId": "case-2", "status": "resolved"}
            ]
        });
        let rendered = render_output(
            &data,
            OutputFormat::Json,
            Some("cases[?status==`resolved`].caseId"),
        )
        .unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value, json!(["case-2"]));
    }

    #[test]
    fn test_invalid_query_is_an_error() {
        let err = render_output(json!({}), OutputFormat::Json, Some("cases[?")).unwrap_err();
        assert!(err.to_string().contains("Invalid JMESPath expression"));
    }

    #[test]
    fn test_yaml_output() {
        let rendered =
            render_output(json!({"caseId": "case-1"}), OutputFormat::Yaml, None).unwrap();
        assert_eq!(rendered.trim(), "caseId: case-1");
    }

    #[test]
    fn test_table_unwraps_single_list_member() {
        let rendered = render_output(
            json!({"severityLevels": [{"code": "low", "name": "Low"}]}),
            OutputFormat::Table,
            None,
        )
        .unwrap();
        assert!(rendered.contains("code"));
        assert!(rendered.contains("Low"));
        assert!(!rendered.contains("severityLevels"));
    }

    #[test]
    fn test_table_summarizes_nested_values() {
        let rendered = render_output(
            json!({"caseId": "case-1", "ccEmailAddresses": ["a@example.com"], "recentCommunications": {"communications": []}}),
            OutputFormat::Table,
            None,
        )
        .unwrap();
        assert!(rendered.contains("[1 items]"));
        assert!(rendered.contains("{1 fields}"));
    }
}

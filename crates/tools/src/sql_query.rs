//! SQL lookup tool — natural language to SQL to synthesized answer.
//!
//! Pipeline: describe the SQLite schema → ask the generation provider for
//! a query → strip markdown/prefix noise from the reply → execute it →
//! ask the provider to phrase the result as a natural-language answer.
//!
//! Every failure in the pipeline is returned as descriptive text, never
//! as an error: the loop reads it as an Observation.

use async_trait::async_trait;
use motormind_core::error::{Error, ToolError};
use motormind_core::prompts::{sql_answer_prompt, sql_query_prompt};
use motormind_core::provider::{GenerationOptions, Provider};
use motormind_core::tool::Tool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, SqlitePool, TypeInfo};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

const USAGE: &str = "<SQL prompt or question> \
Use this tool if the query involves requests for data retrieval from the database \
(e.g., oldest, newest, or cheapest car), specific price-related questions or comparisons, \
inquiries explicitly mentioning car models or requiring database lookup, or detailed \
questions about a specific car requiring structured data processing.";

/// The `handle_sql_mode` tool.
pub struct SqlQueryTool {
    pool: SqlitePool,
    provider: Arc<dyn Provider>,
}

impl SqlQueryTool {
    pub fn new(pool: SqlitePool, provider: Arc<dyn Provider>) -> Self {
        Self { pool, provider }
    }

    /// Open a read-only pool on the given SQLite file.
    pub async fn connect(path: &str, provider: Arc<dyn Provider>) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| Error::Config {
                message: format!("Invalid SQLite path: {e}"),
            })?
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| Error::Config {
                message: format!("Failed to open SQLite: {e}"),
            })?;

        Ok(Self::new(pool, provider))
    }

    /// Collect `CREATE TABLE` statements for every user table.
    async fn describe_schema(&self) -> Result<String, Error> {
        let rows = sqlx::query(
            "SELECT sql FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND sql IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Internal(format!("schema introspection failed: {e}")))?;

        let schema: Vec<String> = rows
            .iter()
            .map(|r| r.get::<String, _>("sql"))
            .collect();

        if schema.is_empty() {
            return Err(Error::Internal("database has no tables".into()));
        }

        Ok(schema.join("\n"))
    }

    /// Full pipeline; errors here become observation text in `invoke`.
    async fn answer(&self, question: &str) -> Result<String, Error> {
        let options = GenerationOptions::default();

        let schema = self.describe_schema().await?;
        let query_prompt = sql_query_prompt("SQLite", &schema, question);

        let raw_query = self.provider.generate(&query_prompt, &[], &options).await?;
        let query = strip_markdown(&raw_query);
        debug!(%query, "generated SQL");

        // Lookup tool, not a write path.
        let lowered = query.to_lowercase();
        if !(lowered.starts_with("select") || lowered.starts_with("with")) {
            return Err(Error::Internal(format!(
                "refusing to execute non-SELECT statement: {query}"
            )));
        }

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Internal(format!("query execution failed: {e}")))?;

        let result = format_rows(&rows);

        let answer_prompt = sql_answer_prompt(question, &query, &result);
        let answer = self.provider.generate(&answer_prompt, &[], &options).await?;
        Ok(answer.trim().to_string())
    }
}

#[async_trait]
impl Tool for SqlQueryTool {
    fn name(&self) -> &str {
        "handle_sql_mode"
    }

    fn usage(&self) -> &str {
        USAGE
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        match self.answer(input).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                warn!("SQL pipeline failed: {e}");
                Ok(format!("Error generating SQL response: {e}"))
            }
        }
    }
}

/// Remove model formatting noise from a generated query.
///
/// Models routinely wrap SQL in ``` fences or prefix it with `SQLQuery:`
/// despite instructions not to.
fn strip_markdown(sql: &str) -> String {
    let mut text = sql.to_string();
    for noise in ["SQLQuery:", "```sql", "```"] {
        text = text.replace(noise, "");
    }
    text.trim().to_string()
}

/// Render result rows as `(a, b, c)` tuples, one per line.
fn format_rows(rows: &[SqliteRow]) -> String {
    if rows.is_empty() {
        return "(no rows)".into();
    }

    rows.iter()
        .map(|row| {
            let cells: Vec<String> = (0..row.columns().len())
                .map(|i| format_cell(row, i))
                .collect();
            format!("({})", cells.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// SQLite is dynamically typed; decode by declared type with fallbacks.
fn format_cell(row: &SqliteRow, idx: usize) -> String {
    let column = &row.columns()[idx];
    match column.type_info().name() {
        "INTEGER" => row
            .try_get::<i64, _>(idx)
            .map(|v| v.to_string())
            .unwrap_or_else(|_| "NULL".into()),
        "REAL" => row
            .try_get::<f64, _>(idx)
            .map(|v| v.to_string())
            .unwrap_or_else(|_| "NULL".into()),
        _ => row
            .try_get::<String, _>(idx)
            .map(|v| format!("'{v}'"))
            .or_else(|_| row.try_get::<i64, _>(idx).map(|v| v.to_string()))
            .or_else(|_| row.try_get::<f64, _>(idx).map(|v| v.to_string()))
            .unwrap_or_else(|_| "NULL".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motormind_core::error::ProviderError;
    use motormind_core::message::Message;
    use std::sync::Mutex;

    /// Scripted provider: first call returns the SQL, second the answer.
    struct ScriptedProvider {
        replies: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().rev().map(|s| s.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }
        async fn generate(
            &self,
            _prompt: &str,
            _history: &[Message],
            _options: &GenerationOptions,
        ) -> Result<String, ProviderError> {
            self.replies
                .lock()
                .unwrap()
                .pop()
                .ok_or(ProviderError::EmptyResponse)
        }
    }

    async fn seeded_pool() -> SqlitePool {
        // One connection: each pooled :memory: connection is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE cars (id INTEGER PRIMARY KEY, make TEXT, model TEXT, price REAL)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO cars (make, model, price) VALUES \
             ('BMW', '320i', 18500.0), ('BMW', 'X5', 42000.0), ('Toyota', 'Camry', 21000.0)",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    #[test]
    fn strip_markdown_removes_fences_and_prefix() {
        let raw = "SQLQuery: ```sql\nSELECT * FROM cars\n```";
        assert_eq!(strip_markdown(raw), "SELECT * FROM cars");
    }

    #[test]
    fn strip_markdown_leaves_plain_sql() {
        assert_eq!(strip_markdown("SELECT 1"), "SELECT 1");
    }

    #[tokio::test]
    async fn pipeline_executes_generated_query() {
        let pool = seeded_pool().await;
        let provider = Arc::new(ScriptedProvider::new(&[
            "```sql\nSELECT make, model, price FROM cars WHERE make = 'BMW' \
             ORDER BY price LIMIT 1\n```",
            "The cheapest BMW is the 320i at $18,500.",
        ]));
        let tool = SqlQueryTool::new(pool, provider);

        let out = tool.invoke("find cheapest BMW").await.unwrap();
        assert_eq!(out, "The cheapest BMW is the 320i at $18,500.");
    }

    #[tokio::test]
    async fn non_select_statements_are_refused() {
        let pool = seeded_pool().await;
        let provider = Arc::new(ScriptedProvider::new(&["DROP TABLE cars"]));
        let tool = SqlQueryTool::new(pool.clone(), provider);

        let out = tool.invoke("drop everything").await.unwrap();
        assert!(out.starts_with("Error generating SQL response:"));

        // The table is still there.
        let rows = sqlx::query("SELECT COUNT(*) AS n FROM cars")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows.get::<i64, _>("n"), 3);
    }

    #[tokio::test]
    async fn provider_failure_becomes_observation_text() {
        let pool = seeded_pool().await;
        let provider = Arc::new(ScriptedProvider::new(&[])); // fails immediately
        let tool = SqlQueryTool::new(pool, provider);

        let out = tool.invoke("anything").await.unwrap();
        assert!(out.starts_with("Error generating SQL response:"));
    }

    #[tokio::test]
    async fn broken_sql_becomes_observation_text() {
        let pool = seeded_pool().await;
        let provider = Arc::new(ScriptedProvider::new(&["SELECT nope FROM nowhere"]));
        let tool = SqlQueryTool::new(pool, provider);

        let out = tool.invoke("bad query").await.unwrap();
        assert!(out.starts_with("Error generating SQL response:"));
    }

    #[tokio::test]
    async fn row_formatting_renders_tuples() {
        let pool = seeded_pool().await;
        let rows = sqlx::query("SELECT make, price FROM cars ORDER BY price")
            .fetch_all(&pool)
            .await
            .unwrap();
        let formatted = format_rows(&rows);
        assert!(formatted.contains("('BMW', 18500)"));
        assert!(formatted.lines().count() == 3);
    }
}

//! MySQL executor and schema reflection over a sqlx pool.

use crate::{error::DbError, sql::row::DbRow};
use async_trait::async_trait;
use model::core::{data_type::DataType, value::Value};
use model::records::row::RowData;
use paginator::{executor::Executor, schema::SchemaReflect};
use query::{
    ast::select::Select,
    dialect,
    render::{Render, Renderer},
};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlArguments;
use sqlx::query::Query;
use std::collections::HashMap;
use tracing::debug;

/// Executor over a MySQL connection pool.
#[derive(Clone)]
pub struct MySqlExecutor {
    pool: MySqlPool,
}

impl MySqlExecutor {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlExecutor { pool }
    }

    pub async fn connect(url: &str) -> Result<Self, DbError> {
        Ok(MySqlExecutor {
            pool: MySqlPool::connect(url).await?,
        })
    }

    fn render(query: &Select) -> (String, Vec<Value>) {
        let dialect = dialect::MySql;
        let mut renderer = Renderer::new(&dialect);
        query.render(&mut renderer);
        renderer.finish()
    }
}

fn bind_params<'q>(
    mut query: Query<'q, sqlx::MySql, MySqlArguments>,
    params: &[Value],
) -> Query<'q, sqlx::MySql, MySqlArguments> {
    for value in params {
        query = match value {
            Value::Int(v) => query.bind(*v),
            Value::Uint(v) => query.bind(*v),
            Value::Float(v) => query.bind(*v),
            Value::Decimal(v) => query.bind(v.clone()),
            Value::String(v) => query.bind(v.clone()),
            Value::Boolean(v) => query.bind(*v),
            // MySQL stores UUIDs as text or BINARY(16); bind the canonical
            // text form.
            Value::Uuid(v) => query.bind(v.to_string()),
            Value::Bytes(v) => query.bind(v.clone()),
            Value::Date(v) => query.bind(*v),
            Value::Timestamp(v) => query.bind(*v),
            Value::TimestampNaive(v) => query.bind(*v),
            Value::Null => query.bind(Option::<i64>::None),
        };
    }
    query
}

#[async_trait]
impl Executor for MySqlExecutor {
    type Error = DbError;

    async fn fetch_rows(&self, query: &Select) -> Result<Vec<RowData>, DbError> {
        let entity = query.root_entity().unwrap_or_default().to_string();
        let (sql, params) = Self::render(query);
        debug!(%sql, params = params.len(), "fetching rows");

        let rows = bind_params(sqlx::query(&sql), &params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .map(|row| DbRow::MySql(row).to_row_data(&entity))
            .collect())
    }

    async fn fetch_scalar(&self, query: &Select) -> Result<i64, DbError> {
        let (sql, params) = Self::render(query);
        debug!(%sql, "fetching scalar");

        let row = bind_params(sqlx::query(&sql), &params)
            .fetch_one(&self.pool)
            .await?;
        use sqlx::Row as _;
        Ok(row.try_get::<i64, _>(0)?)
    }
}

/// `SchemaReflect` backed by `information_schema.columns` of the connected
/// database, loaded eagerly so lookups stay synchronous.
#[derive(Clone)]
pub struct MySqlSchema {
    columns: HashMap<String, HashMap<String, DataType>>,
    associations: HashMap<String, HashMap<String, String>>,
}

impl MySqlSchema {
    pub async fn load(pool: &MySqlPool, tables: &[&str]) -> Result<Self, DbError> {
        let mut columns = HashMap::new();
        for table in tables {
            let rows: Vec<(String, String)> = sqlx::query_as(
                r#"
                SELECT column_name, data_type
                  FROM information_schema.columns
                 WHERE table_schema = DATABASE()
                   AND table_name = ?
                "#,
            )
            .bind(table)
            .fetch_all(pool)
            .await?;

            let table_columns = rows
                .into_iter()
                .map(|(name, type_name)| {
                    let data_type =
                        DataType::from_mysql_type(&type_name).unwrap_or(DataType::String);
                    (name, data_type)
                })
                .collect();
            columns.insert((*table).to_string(), table_columns);
        }

        Ok(MySqlSchema {
            columns,
            associations: HashMap::new(),
        })
    }

    /// Registers a binding on `entity` pointing at `target`.
    pub fn with_association(mut self, entity: &str, binding: &str, target: &str) -> Self {
        self.associations
            .entry(entity.to_string())
            .or_default()
            .insert(binding.to_string(), target.to_string());
        self
    }
}

impl SchemaReflect for MySqlSchema {
    fn column_type(&self, entity: &str, column: &str) -> Option<DataType> {
        self.columns.get(entity)?.get(column).copied()
    }

    fn association(&self, entity: &str, binding: &str) -> Option<&str> {
        self.associations
            .get(entity)?
            .get(binding)
            .map(String::as_str)
    }
}

// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL flag store.
//!
//! # Generated SQL
//!
//! ```sql
//! -- load
//! SELECT flags::BIGINT FROM accounts WHERE id = $1
//!
//! -- compare_and_swap
//! UPDATE accounts SET flags = $1 WHERE id = $2 AND flags::BIGINT = $3
//!
//! -- find_ids
//! SELECT id FROM accounts
//! WHERE (flags::BIGINT & $1) = $1 AND (flags::BIGINT & $2) = 0
//! ORDER BY id ASC
//! LIMIT $3 OFFSET $4
//! ```
//!
//! The column is read as `BIGINT` whatever its declared width, so one store
//! serves `SMALLINT`, `INTEGER` and `BIGINT` columns. Table and column names
//! are written into the SQL as given and must come from trusted code.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::FlagStore;
use crate::{FlagPredicate, Pagination};

/// Flag column of a PostgreSQL table keyed by a UUID primary key.
#[derive(Debug, Clone)]
pub struct PgFlagStore {
    pool:       PgPool,
    statements: Statements
}

impl PgFlagStore {
    /// Store over `table.column`, keyed by `id`.
    pub fn new(pool: PgPool, table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            pool,
            statements: Statements::new(table, column)
        }
    }

    /// Use a primary key column other than `id`.
    #[must_use]
    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.statements.id_column = id_column.into();
        self
    }

    /// Underlying pool.
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// SQL text for one table and column.
#[derive(Debug, Clone)]
struct Statements {
    table:     String,
    id_column: String,
    column:    String
}

impl Statements {
    fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table:     table.into(),
            id_column: "id".to_string(),
            column:    column.into()
        }
    }

    fn packed(&self) -> String {
        format!("{}::BIGINT", self.column)
    }

    fn load(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = $1",
            self.packed(),
            self.table,
            self.id_column
        )
    }

    fn swap(&self) -> String {
        format!(
            "UPDATE {} SET {} = $1 WHERE {} = $2 AND {} = $3",
            self.table,
            self.column,
            self.id_column,
            self.packed()
        )
    }

    /// SQL and mask binds; limit and offset follow the masks.
    fn find(&self, predicate: &FlagPredicate, page: Pagination) -> (String, Vec<i64>) {
        let mut param_idx: usize = 1;
        let (condition, binds) = predicate.to_sql(&self.packed(), &mut param_idx);

        let limit_idx = param_idx;
        param_idx += 1;
        let offset_idx = param_idx;

        let sql = format!(
            "SELECT {id} FROM {} WHERE {} ORDER BY {id} {} LIMIT ${} OFFSET ${}",
            self.table,
            condition,
            page.direction.as_sql(),
            limit_idx,
            offset_idx,
            id = self.id_column
        );
        (sql, binds)
    }
}

#[async_trait]
impl FlagStore for PgFlagStore {
    type Id = Uuid;
    type Error = sqlx::Error;

    async fn load(&self, id: &Uuid) -> Result<Option<i64>, sqlx::Error> {
        let sql = self.statements.load();
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn compare_and_swap(
        &self,
        id: &Uuid,
        expected: i64,
        new: i64
    ) -> Result<bool, sqlx::Error> {
        let sql = self.statements.swap();
        let result = sqlx::query(&sql)
            .bind(new)
            .bind(id)
            .bind(expected)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn find_ids(
        &self,
        predicate: &FlagPredicate,
        page: Pagination
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let (sql, binds) = self.statements.find(predicate, page);
        let mut q = sqlx::query_scalar::<_, Uuid>(&sql);
        for mask in binds {
            q = q.bind(mask);
        }
        q = q.bind(page.limit).bind(page.offset);
        q.fetch_all(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SortDirection;

    fn accounts() -> Statements {
        Statements::new("accounts", "flags")
    }

    #[test]
    fn load_and_swap_sql() {
        let sql = accounts();
        assert_eq!(sql.load(), "SELECT flags::BIGINT FROM accounts WHERE id = $1");
        assert_eq!(
            sql.swap(),
            "UPDATE accounts SET flags = $1 WHERE id = $2 AND flags::BIGINT = $3"
        );
    }

    #[test]
    fn find_numbers_params_after_masks() {
        let predicate = FlagPredicate::from_masks(3, 4).unwrap();
        let (sql, binds) = accounts().find(&predicate, Pagination::default());
        assert_eq!(
            sql,
            "SELECT id FROM accounts WHERE (flags::BIGINT & $1) = $1 AND (flags::BIGINT & $2) = 0 \
             ORDER BY id ASC LIMIT $3 OFFSET $4"
        );
        assert_eq!(binds, [3, 4]);
    }

    #[test]
    fn find_with_empty_predicate() {
        let mut sql = accounts();
        sql.id_column = "account_id".to_string();
        let page = Pagination::page(1, 10).ordered(SortDirection::Desc);
        let (text, binds) = sql.find(&FlagPredicate::default(), page);
        assert_eq!(
            text,
            "SELECT account_id FROM accounts WHERE TRUE ORDER BY account_id DESC LIMIT $1 OFFSET $2"
        );
        assert!(binds.is_empty());
    }
}

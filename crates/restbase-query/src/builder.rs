use restbase_core::RestbaseClient;

/// Direction for [`QueryBuilder::order`] clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderDirection {
    fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// One accumulated WHERE condition, compiled as `column=operator.value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub operator: String,
    pub value: String,
}

/// Fluent per-table query builder created by
/// [`from`](crate::RestbaseClientQueryExt::from).
///
/// Chained calls mutate the builder in place and hand it back; a terminal
/// call (`execute`, `insert`, `update`, `delete`) consumes it, so a builder
/// targets exactly one table and describes exactly one operation. Do not
/// share a builder across concurrent logical operations.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    pub(crate) client: RestbaseClient,
    pub(crate) table: String,
    select: Option<String>,
    filters: Vec<Filter>,
    order: Vec<(String, OrderDirection)>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl QueryBuilder {
    pub(crate) fn new(client: RestbaseClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            select: None,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Table this builder is bound to for its whole lifetime.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Columns to return; `"*"` for all.
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    /// Append a filter with an arbitrary PostgREST operator name.
    ///
    /// The typed methods below cover the common operators; anything else
    /// (`in`, `cs`, `ov`, `fts`, ...) goes through here. Filters compile in
    /// call order.
    pub fn filter(mut self, column: &str, operator: &str, value: impl ToString) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            operator: operator.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Filter: column = value
    pub fn eq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "eq", value)
    }

    /// Filter: column != value
    pub fn neq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "neq", value)
    }

    /// Filter: column > value
    pub fn gt(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "gt", value)
    }

    /// Filter: column >= value
    pub fn gte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "gte", value)
    }

    /// Filter: column < value
    pub fn lt(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "lt", value)
    }

    /// Filter: column <= value
    pub fn lte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "lte", value)
    }

    /// Filter: column LIKE pattern
    pub fn like(self, column: &str, pattern: impl ToString) -> Self {
        self.filter(column, "like", pattern)
    }

    /// Filter: column ILIKE pattern (case-insensitive)
    pub fn ilike(self, column: &str, pattern: impl ToString) -> Self {
        self.filter(column, "ilike", pattern)
    }

    /// Append an ordering clause; clauses compile comma-joined in call
    /// order.
    pub fn order(mut self, column: &str, direction: OrderDirection) -> Self {
        self.order.push((column.to_string(), direction));
        self
    }

    /// Cap the number of rows returned.
    pub fn limit(mut self, count: i64) -> Self {
        self.limit = Some(count);
        self
    }

    /// Select the inclusive row window `[from, to]`: sets `offset = from`
    /// and derives `limit = to - from + 1`.
    pub fn range(mut self, from: i64, to: i64) -> Self {
        self.offset = Some(from);
        self.limit = Some(to - from + 1);
        self
    }

    /// Expect at most one row: forces `limit = 1` and switches the read to a
    /// scalar result instead of an array.
    pub fn single(mut self) -> SingleQuery {
        self.limit = Some(1);
        SingleQuery { inner: self }
    }

    /// Compile the accumulated state into a query string: select list,
    /// filters in call order, ordering, then pagination. Parameters that
    /// were never set are omitted.
    pub fn build_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(ref columns) = self.select {
            params.push(format!("select={columns}"));
        }
        for filter in &self.filters {
            params.push(format!(
                "{}={}.{}",
                filter.column, filter.operator, filter.value
            ));
        }
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(column, direction)| format!("{}.{}", column, direction.as_str()))
                .collect::<Vec<_>>()
                .join(",");
            params.push(format!("order={order}"));
        }
        if let Some(offset) = self.offset {
            params.push(format!("offset={offset}"));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={limit}"));
        }
        params.join("&")
    }
}

/// A query whose read unwraps the first row, created by
/// [`QueryBuilder::single`]. An empty result reads as `data: None`, not an
/// error.
#[derive(Debug, Clone)]
pub struct SingleQuery {
    pub(crate) inner: QueryBuilder,
}

impl SingleQuery {
    /// Compiled query string of the underlying builder (always carries
    /// `limit=1`).
    pub fn build_query(&self) -> String {
        self.inner.build_query()
    }
}

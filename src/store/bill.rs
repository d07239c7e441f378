use async_trait::async_trait;
use bill_list::{BillsResource, RawBill, StoreError};
use sea_query::{Expr, Iden, Order, Query, SqliteQueryBuilder};
use sea_query_binder::SqlxBinder;
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Decode, Row, Type};
use tracing::{debug, warn};

use super::{Result, SqliteStore};

#[derive(Iden)]
enum Bills {
    Table,
    Id,
    Email,
    Type,
    Name,
    Date,
    Amount,
    Vat,
    Pct,
    Commentary,
    Status,
    FileUrl,
    FileName,
    CommentAdmin,
}

const COLUMNS: [Bills; 13] = [
    Bills::Id,
    Bills::Email,
    Bills::Type,
    Bills::Name,
    Bills::Date,
    Bills::Amount,
    Bills::Vat,
    Bills::Pct,
    Bills::Commentary,
    Bills::Status,
    Bills::FileUrl,
    Bills::FileName,
    Bills::CommentAdmin,
];

pub struct Store<'a>(&'a SqliteStore);

impl<'a> Store<'a> {
    pub fn new(store: &'a SqliteStore) -> Self {
        Self(store)
    }

    pub async fn select(&self) -> Result<Vec<RawBill>> {
        let mut select = Query::select();
        select
            .columns(COLUMNS)
            .from(Bills::Table)
            .order_by(Bills::Id, Order::Asc);
        if let Some(owner) = &self.0.owner {
            select.and_where(Expr::col(Bills::Email).eq(owner.as_str()));
        }
        let (query, values) = select.build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_with(&query, values)
            .fetch_all(&mut self.0.conn.acquire().await?)
            .await?;
        debug!("selected {} bill rows", rows.len());

        Ok(rows.iter().map(from_row).collect())
    }
}

#[async_trait]
impl<'a> BillsResource for Store<'a> {
    async fn list(&self) -> ::std::result::Result<Vec<RawBill>, StoreError> {
        Ok(self.select().await?)
    }
}

/// SQLite does not enforce column types, so a value stored with the wrong
/// type reads as absent instead of failing the whole listing.
fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Option<T>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    match row.try_get::<Option<T>, _>(name) {
        Ok(value) => value,
        Err(e) => {
            warn!(column = name, error = %e, "dropping undecodable value");
            None
        }
    }
}

fn from_row(row: &SqliteRow) -> RawBill {
    RawBill {
        id: column(row, "id").unwrap_or_default(),
        email: column(row, "email"),
        bill_type: column(row, "type"),
        name: column(row, "name"),
        date: column(row, "date"),
        amount: column(row, "amount"),
        vat: column(row, "vat"),
        pct: column(row, "pct"),
        commentary: column(row, "commentary"),
        status: column(row, "status"),
        file_url: column(row, "file_url"),
        file_name: column(row, "file_name"),
        comment_admin: column(row, "comment_admin"),
    }
}

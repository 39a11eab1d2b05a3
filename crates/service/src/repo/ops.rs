//! Entity-agnostic store operations shared by the per-entity modules.
//!
//! These return raw [`DbErr`] so that classification happens in the entity
//! method, which is what the classifier reports as the caller.

use std::str::FromStr;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, Iterable, Order,
    PaginatorTrait, PrimaryKeyTrait, QueryOrder, QuerySelect, Select, Statement,
};
use tracing::warn;
use uuid::Uuid;

use models::query::{Page, PageMeta, PageQuery};

use super::{classify, RepoError, Repository};
use crate::context::Ctx;
use crate::pagination::{self, DEFAULT_SORT};

impl<C: ConnectionTrait> Repository<C> {
    pub(crate) async fn fetch_one<E>(&self, ctx: &Ctx, id: Uuid) -> Result<E::Model, DbErr>
    where
        E: EntityTrait,
        Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        let (scoped, _release) = self.scope(ctx);
        scoped
            .run(E::find_by_id(id).one(scoped.conn()))
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("{} {}", E::default().table_name(), id)))
    }

    /// Delete by primary key; zero affected rows is a missing record.
    pub(crate) async fn delete_one<E>(&self, ctx: &Ctx, id: Uuid) -> Result<(), DbErr>
    where
        E: EntityTrait,
        Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        let (scoped, _release) = self.scope(ctx);
        let res = scoped.run(E::delete_by_id(id).exec(scoped.conn())).await?;
        if res.rows_affected == 0 {
            return Err(DbErr::RecordNotFound(format!("{} {}", E::default().table_name(), id)));
        }
        Ok(())
    }

    /// Count, then fetch one sorted page of `select`.
    pub(crate) async fn fetch_page<E>(&self, ctx: &Ctx, select: Select<E>, query: &PageQuery) -> Result<Page<E::Model>, DbErr>
    where
        E: EntityTrait,
        E::Model: Send + Sync + 'static,
        E::Column: FromStr,
    {
        let (page, page_size, sort) = self.config.pagination.normalize(query.page, query.page_size, query.sort.as_deref());
        let (scoped, _release) = self.scope(ctx);

        let total_rows = scoped.run(select.clone().count(scoped.conn())).await?;
        let data = scoped
            .run(
                apply_sort(select, &sort)
                    .limit(page_size)
                    .offset(pagination::offset(page, page_size))
                    .all(scoped.conn()),
            )
            .await?;

        Ok(Page { data, meta: pagination::page_meta(page, page_size, total_rows) })
    }

    /// Page metadata for an already-counted list. A caller-supplied count
    /// statement (selecting a `count` column) replaces `total_rows`.
    pub async fn pagination_info(
        &self,
        ctx: &Ctx,
        count_stmt: Option<Statement>,
        total_rows: u64,
        page: u64,
        page_size: u64,
    ) -> Result<PageMeta, RepoError> {
        let total_rows = match count_stmt {
            None => total_rows,
            Some(stmt) => {
                let (scoped, _release) = self.scope(ctx);
                let row = scoped
                    .run(scoped.conn().query_one(stmt))
                    .await
                    .map_err(|e| classify("Pagination.Count", e, "page", &page))?;
                match row {
                    Some(row) => row
                        .try_get::<i64>("", "count")
                        .map(|n| n.max(0) as u64)
                        .map_err(|e| classify("Pagination.Count", e, "page", &page))?,
                    None => 0,
                }
            }
        };
        Ok(pagination::page_meta(page, page_size, total_rows))
    }
}

/// Promote every loaded value to `Set` so insert/update write the whole row.
pub(crate) fn mark_all_set<A: ActiveModelTrait>(mut am: A) -> A {
    for col in <A::Entity as EntityTrait>::Column::iter() {
        if let ActiveValue::Unchanged(v) = am.get(col) {
            am.set(col, v);
        }
    }
    am
}

/// Resolve `"col [asc|desc], ..."` against the entity's columns.
/// Unknown columns or directions are skipped; nothing resolved means `created_at desc`.
pub(crate) fn apply_sort<E>(mut select: Select<E>, sort: &str) -> Select<E>
where
    E: EntityTrait,
    E::Column: FromStr,
{
    let mut applied = false;
    for term in sort.split(',') {
        let mut parts = term.split_whitespace();
        let Some(name) = parts.next() else { continue };
        let order = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => Order::Asc,
            Some("desc") => Order::Desc,
            Some(other) => {
                warn!(term, direction = other, "ignoring sort term with unknown direction");
                continue;
            }
        };
        if parts.next().is_some() {
            warn!(term, "ignoring malformed sort term");
            continue;
        }
        match E::Column::from_str(name) {
            Ok(col) => {
                select = select.order_by(col, order);
                applied = true;
            }
            Err(_) => warn!(column = name, table = E::default().table_name(), "ignoring sort on unknown column"),
        }
    }
    if !applied {
        if let Some((col, dir)) = DEFAULT_SORT.split_once(' ') {
            if let Ok(col) = E::Column::from_str(col) {
                let order = if dir == "desc" { Order::Desc } else { Order::Asc };
                select = select.order_by(col, order);
            }
        }
    }
    select
}

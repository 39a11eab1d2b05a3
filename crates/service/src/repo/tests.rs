use std::time::Duration;

use anyhow::Result;
use sea_orm::{DbBackend, EntityTrait, PaginatorTrait, Statement};
use uuid::Uuid;

use models::parking_lot::{self, ListParkingLotReq};
use models::{block, parking_slot};

use super::{ErrorKind, RepoConfig, RepoError};
use crate::context::{Ctx, CANCELED, DEADLINE_EXCEEDED};
use crate::pagination::PaginationConfig;
use crate::test_support::{block_for, insert_user, lot_at, memory_db, memory_repo, memory_repo_with};

#[tokio::test]
async fn list_returns_requested_page_newest_first() -> Result<()> {
    let repo = memory_repo().await?;
    let ctx = Ctx::background();
    for i in 0..45 {
        repo.create_parking_lot(&ctx, lot_at(&format!("lot-{i:02}"), i)).await?;
    }

    let req = ListParkingLotReq { page: 3, page_size: 20, ..Default::default() };
    let page = repo.get_list_parking_lot(&ctx, &req).await?;

    assert_eq!(page.data.len(), 5);
    assert_eq!((page.meta.page, page.meta.page_size, page.meta.total_pages, page.meta.total_rows), (3, 20, 3, 45));
    // newest first: page 3 holds the five oldest rows
    let names: Vec<_> = page.data.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["lot-04", "lot-03", "lot-02", "lot-01", "lot-00"]);
    Ok(())
}

#[tokio::test]
async fn list_defaults_to_first_page_of_thirty() -> Result<()> {
    let repo = memory_repo().await?;
    let ctx = Ctx::background();
    for i in 0..45 {
        repo.create_parking_lot(&ctx, lot_at(&format!("lot-{i:02}"), i)).await?;
    }

    let req = ListParkingLotReq { page: 0, page_size: 0, ..Default::default() };
    let page = repo.get_list_parking_lot(&ctx, &req).await?;

    assert_eq!((page.meta.page, page.meta.page_size, page.meta.total_pages, page.meta.total_rows), (1, 30, 2, 45));
    assert_eq!(page.data.len(), 30);
    assert_eq!(page.data[0].name, "lot-44");
    assert_eq!(page.data[29].name, "lot-15");
    Ok(())
}

#[tokio::test]
async fn list_normalizes_inputs_and_honours_sort() -> Result<()> {
    let repo = memory_repo_with(RepoConfig {
        pagination: PaginationConfig { default_page_size: 2, max_page_size: 3 },
        ..RepoConfig::default()
    })
    .await?;
    let ctx = Ctx::background();
    for (i, name) in ["b", "d", "a", "c"].iter().enumerate() {
        repo.create_parking_lot(&ctx, lot_at(name, i as i64)).await?;
    }

    let req = ListParkingLotReq { page: 0, page_size: 0, sort: Some("name asc".into()), ..Default::default() };
    let page = repo.get_list_parking_lot(&ctx, &req).await?;
    assert_eq!(page.meta.page, 1);
    assert_eq!(page.meta.page_size, 2);
    assert_eq!(page.meta.total_pages, 2);
    assert_eq!(page.data.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(), ["a", "b"]);

    let req = ListParkingLotReq { page: 1, page_size: 50, sort: Some("bogus desc".into()), ..Default::default() };
    let page = repo.get_list_parking_lot(&ctx, &req).await?;
    assert_eq!(page.meta.page_size, 3);
    assert_eq!(page.data.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(), ["c", "a", "d"]);
    Ok(())
}

#[tokio::test]
async fn list_filters_by_search_and_flags() -> Result<()> {
    let repo = memory_repo().await?;
    let ctx = Ctx::background();
    let mut closed = lot_at("Riverside Closed", 1);
    closed.is_active = false;
    repo.create_parking_lot(&ctx, closed).await?;
    repo.create_parking_lot(&ctx, lot_at("Riverside Open", 2)).await?;
    repo.create_parking_lot(&ctx, lot_at("Airport", 3)).await?;

    let req = ListParkingLotReq { search: Some("Riverside".into()), is_active: Some(true), ..Default::default() };
    let page = repo.get_list_parking_lot(&ctx, &req).await?;
    assert_eq!(page.meta.total_rows, 1);
    assert_eq!(page.data[0].name, "Riverside Open");
    Ok(())
}

#[tokio::test]
async fn empty_list_has_zero_pages() -> Result<()> {
    let repo = memory_repo().await?;
    let page = repo.get_list_parking_lot(&Ctx::background(), &ListParkingLotReq::default()).await?;
    assert!(page.data.is_empty());
    assert_eq!((page.meta.page, page.meta.page_size, page.meta.total_pages, page.meta.total_rows), (1, 30, 0, 0));
    Ok(())
}

#[tokio::test]
async fn missing_row_is_not_found() -> Result<()> {
    let repo = memory_repo().await?;
    let ctx = Ctx::background();
    let id = Uuid::new_v4();

    let err = repo.get_one_parking_lot(&ctx, id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "record not found");
    assert_eq!(err.context.value, id.to_string());
    assert!(err.context.caller.contains("parking_lot.rs"), "{}", err.context.caller);

    let err = repo.delete_block(&ctx, id).await.unwrap_err();
    assert!(err.is_not_found());

    let err = repo.update_parking_lot(&ctx, lot_at("ghost", 0)).await.unwrap_err();
    assert!(err.is_not_found());

    let err = repo.get_one_user_by_phone(&ctx, "+84 900 000 000").await.unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn user_lookup_normalizes_phone() -> Result<()> {
    let db = memory_db().await?;
    let user = insert_user(&db, "+84900111222").await?;
    let repo = super::Repo::new(db, RepoConfig::default());
    let found = repo.get_one_user_by_phone(&Ctx::background(), " +84 900-111-222 ").await?;
    assert_eq!(found.id, user.id);
    Ok(())
}

#[tokio::test]
async fn unit_of_work_commits_on_success() -> Result<()> {
    let repo = memory_repo().await?;
    let ctx = Ctx::background();
    let lot = lot_at("Committed", 0);
    let id = lot.id;

    let created = repo
        .transaction(&ctx, move |tx, ctx| {
            Box::pin(async move {
                assert!(tx.in_transaction());
                let lot = tx.create_parking_lot(ctx, lot).await?;
                tx.create_block(ctx, block_for(lot.id, "A")).await?;
                Ok(lot)
            })
        })
        .await?;

    assert_eq!(created.id, id);
    assert_eq!(repo.get_one_parking_lot(&ctx, id).await?.name, "Committed");
    assert_eq!(block::Entity::find().count(repo.conn()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn unit_of_work_error_rolls_back_and_propagates() -> Result<()> {
    let repo = memory_repo().await?;
    let ctx = Ctx::background();
    let lot = lot_at("Doomed", 0);
    let id = lot.id;

    let err = repo
        .transaction(&ctx, move |tx, ctx| {
            Box::pin(async move {
                tx.create_parking_lot(ctx, lot).await?;
                Err::<(), _>(RepoError::internal("step two failed"))
            })
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Internal);
    assert_eq!(err.message, "step two failed");
    assert!(repo.get_one_parking_lot(&ctx, id).await.unwrap_err().is_not_found());
    Ok(())
}

#[tokio::test]
async fn failing_second_step_leaves_first_step_unapplied() -> Result<()> {
    let repo = memory_repo().await?;
    let ctx = Ctx::background();
    let lot = repo.create_parking_lot(&ctx, lot_at("Original", 0)).await?;
    let lot_id = lot.id;

    let err = repo
        .transaction(&ctx, move |tx, ctx| {
            Box::pin(async move {
                let mut renamed = lot;
                renamed.name = "Renamed".into();
                tx.update_parking_lot(ctx, renamed).await?;
                // no such block
                tx.update_block(ctx, block_for(lot_id, "Z")).await?;
                Ok(())
            })
        })
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(repo.get_one_parking_lot(&ctx, lot_id).await?.name, "Original");
    Ok(())
}

#[tokio::test]
async fn panic_in_unit_of_work_is_contained() -> Result<()> {
    let repo = memory_repo().await?;
    let ctx = Ctx::background();
    let lot = lot_at("Half-written", 0);
    let blow_up = true;

    let err = repo
        .transaction(&ctx, move |tx, ctx| {
            Box::pin(async move {
                tx.create_parking_lot(ctx, lot).await?;
                if blow_up {
                    panic!("slot allocator invariant broken");
                }
                Ok(())
            })
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Internal);
    assert!(err.message.contains("slot allocator invariant broken"), "{}", err.message);
    assert_eq!(parking_lot::Entity::find().count(repo.conn()).await?, 0);

    // the pool is still usable afterwards
    let again = repo.create_parking_lot(&ctx, lot_at("After", 1)).await?;
    assert_eq!(repo.get_one_parking_lot(&ctx, again.id).await?.name, "After");
    Ok(())
}

#[tokio::test]
async fn cancelled_context_surfaces_internal_error() -> Result<()> {
    let repo = memory_repo().await?;
    let ctx = Ctx::background();
    ctx.cancel();

    let err = repo.get_one_parking_lot(&ctx, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Internal);
    assert_eq!(err.message, CANCELED);

    let err = repo
        .transaction(&ctx, |_tx, _ctx| Box::pin(async { Ok(()) }))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Internal);
    Ok(())
}

#[tokio::test]
async fn cancellation_inside_transaction_rolls_back() -> Result<()> {
    let repo = memory_repo().await?;
    let (ctx, _guard) = Ctx::background().with_cancel();
    let lot = lot_at("Interrupted", 0);
    let id = lot.id;

    let err = repo
        .transaction(&ctx, move |tx, ctx| {
            Box::pin(async move {
                tx.create_parking_lot(ctx, lot).await?;
                ctx.cancel();
                tx.create_block(ctx, block_for(id, "A")).await?;
                Ok(())
            })
        })
        .await
        .unwrap_err();

    assert_eq!(err.message, CANCELED);
    let fresh = Ctx::background();
    assert!(repo.get_one_parking_lot(&fresh, id).await.unwrap_err().is_not_found());
    Ok(())
}

#[tokio::test]
async fn expired_deadline_surfaces_internal_error() -> Result<()> {
    let repo = memory_repo_with(RepoConfig { query_timeout: Duration::ZERO, ..RepoConfig::default() }).await?;
    let err = repo.get_one_parking_lot(&Ctx::background(), Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Internal);
    assert_eq!(err.message, DEADLINE_EXCEEDED);
    Ok(())
}

#[tokio::test]
async fn scoped_connection_derives_from_parent() -> Result<()> {
    let repo = memory_repo().await?;
    let parent = Ctx::background();
    let (scoped, release) = repo.with_timeout(&parent);
    assert!(scoped.ctx().deadline().is_some());
    let (extended, _release2) = repo.with_extended_timeout(&parent);
    assert!(extended.ctx().deadline() > scoped.ctx().deadline());

    parent.cancel();
    assert!(scoped.ctx().is_cancelled());
    let res = scoped.run(parking_lot::Entity::find().count(scoped.conn())).await;
    assert!(res.is_err());
    drop(release);
    Ok(())
}

#[tokio::test]
async fn raw_count_overrides_derived_total() -> Result<()> {
    let repo = memory_repo().await?;
    let ctx = Ctx::background();
    for i in 0..3 {
        repo.create_parking_lot(&ctx, lot_at(&format!("p{i}"), i)).await?;
    }

    let meta = repo.pagination_info(&ctx, None, 7, 1, 5).await?;
    assert_eq!((meta.total_rows, meta.total_pages), (7, 2));

    let stmt = Statement::from_string(DbBackend::Sqlite, r#"SELECT COUNT(*) AS count FROM parking_lot"#);
    let meta = repo.pagination_info(&ctx, Some(stmt), 7, 1, 2).await?;
    assert_eq!((meta.total_rows, meta.total_pages), (3, 2));
    Ok(())
}

#[tokio::test]
async fn cascade_helpers_remove_children() -> Result<()> {
    let repo = memory_repo().await?;
    let ctx = Ctx::background();
    let lot = repo.create_parking_lot(&ctx, lot_at("Cascade", 0)).await?;
    let a = repo.create_block(&ctx, block_for(lot.id, "A")).await?;
    let b = repo.create_block(&ctx, block_for(lot.id, "B")).await?;

    let ids = repo.list_block_ids_by_parking_lot(&ctx, lot.id).await?;
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&a.id) && ids.contains(&b.id));

    assert_eq!(repo.delete_parking_slots_by_blocks(&ctx, &[]).await?, 0);
    assert_eq!(repo.delete_blocks_by_parking_lot(&ctx, lot.id).await?, 2);
    assert_eq!(parking_slot::Entity::find().count(repo.conn()).await?, 0);
    assert!(repo.list_block_ids_by_parking_lot(&ctx, lot.id).await?.is_empty());
    Ok(())
}

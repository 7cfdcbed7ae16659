//! Integration tests for the inventory state manager

mod common;

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use tokio::sync::mpsc::UnboundedReceiver;

use common::{Failures, InMemoryRecordStore};
use kitchen_command_backend::error::AppError;
use kitchen_command_backend::services::{InventoryService, Outbox, SnapshotCache, SyncOperation};
use shared::{seed_catalog, Lifecycle, Product, ProductDraft, Sale};

fn temp_snapshot() -> SnapshotCache {
    let path = std::env::temp_dir().join(format!("kc-inventory-{}.json", uuid::Uuid::new_v4()));
    SnapshotCache::new(path)
}

fn service(
    store: Arc<InMemoryRecordStore>,
) -> (InventoryService, UnboundedReceiver<SyncOperation>) {
    let (outbox, rx) = Outbox::channel();
    (
        InventoryService::new(store, temp_snapshot(), outbox),
        rx,
    )
}

async fn ready_service(
    store: Arc<InMemoryRecordStore>,
) -> (InventoryService, UnboundedReceiver<SyncOperation>) {
    let (mut inventory, rx) = service(store);
    inventory.initialize().await;
    (inventory, rx)
}

fn knife() -> Product {
    Product {
        id: "prod_001".to_string(),
        name: "Chef's Knife".to_string(),
        description: "High-carbon stainless steel 8-inch blade.".to_string(),
        price: Decimal::new(7999, 2),
        stock: 50,
    }
}

fn draft() -> ProductDraft {
    ProductDraft {
        name: "Paring Knife".to_string(),
        description: "3.5-inch blade.".to_string(),
        price: Decimal::new(1299, 2),
        stock: 10,
    }
}

#[tokio::test]
async fn test_initialize_prefers_record_store() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    let (inventory, _rx) = ready_service(store).await;

    assert_eq!(inventory.lifecycle(), Lifecycle::Ready);
    assert_eq!(inventory.products(), &[knife()]);
    assert!(inventory.sales().is_empty());
}

#[tokio::test]
async fn test_initialize_falls_back_to_snapshot() {
    let snapshot = temp_snapshot();
    snapshot.save(&[knife()]).await;

    let store = Arc::new(InMemoryRecordStore::new());
    store.set_failures(Failures {
        fetch_products: true,
        ..Failures::default()
    });

    let (outbox, _rx) = Outbox::channel();
    let mut inventory = InventoryService::new(store, snapshot, outbox);
    inventory.initialize().await;

    assert_eq!(inventory.lifecycle(), Lifecycle::Ready);
    assert_eq!(inventory.products(), &[knife()]);
}

#[tokio::test]
async fn test_initialize_seeds_catalog_without_store_or_snapshot() {
    let store = Arc::new(InMemoryRecordStore::new());
    store.set_failures(Failures {
        fetch_products: true,
        fetch_sales: true,
        ..Failures::default()
    });

    let (inventory, _rx) = ready_service(store).await;

    assert_eq!(inventory.lifecycle(), Lifecycle::Ready);
    assert_eq!(inventory.products(), &seed_catalog()[..]);
    assert!(inventory.sales().is_empty());
}

#[tokio::test]
async fn test_initialize_sorts_sales_most_recent_first() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    {
        let product = knife();
        let mut sales = store.sales.lock().unwrap();
        let mut older = Sale::record(&product, 1);
        older.date -= chrono::Duration::hours(2);
        let newer = Sale::record(&product, 2);
        sales.push(older);
        sales.push(newer);
    }

    let (inventory, _rx) = ready_service(store).await;

    assert_eq!(inventory.sales().len(), 2);
    assert!(inventory.sales()[0].date >= inventory.sales()[1].date);
    assert_eq!(inventory.sales()[0].quantity, 2);
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    let (mut inventory, _rx) = ready_service(store.clone()).await;

    // A later change in the store must not leak in through a second call.
    store.products.lock().unwrap().clear();
    inventory.initialize().await;

    assert_eq!(inventory.lifecycle(), Lifecycle::Ready);
    assert_eq!(inventory.products(), &[knife()]);
}

#[tokio::test]
async fn test_record_sale_decrements_stock_and_prepends_sale() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    let (mut inventory, mut rx) = ready_service(store).await;

    let first = inventory.record_sale("prod_001", 3).await.unwrap();
    let second = inventory.record_sale("prod_001", 1).await.unwrap();

    assert_eq!(inventory.products()[0].stock, 46);
    // Most recent first
    assert_eq!(inventory.sales()[0].id, second.id);
    assert_eq!(inventory.sales()[1].id, first.id);
    assert_eq!(first.product_name, "Chef's Knife");
    assert_eq!(first.total_amount, Decimal::new(23997, 2));

    // Stock push precedes the sale persist for each recorded sale
    match rx.try_recv().unwrap() {
        SyncOperation::PushStock { product_id, stock } => {
            assert_eq!(product_id, "prod_001");
            assert_eq!(stock, 47);
        }
        other => panic!("unexpected operation: {:?}", other),
    }
    match rx.try_recv().unwrap() {
        SyncOperation::PersistSale(sale) => assert_eq!(sale.id, first.id),
        other => panic!("unexpected operation: {:?}", other),
    }
}

#[tokio::test]
async fn test_record_sale_insufficient_stock_leaves_state_untouched() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    let (mut inventory, mut rx) = ready_service(store).await;

    let err = inventory.record_sale("prod_001", 51).await.unwrap_err();
    match err {
        AppError::InsufficientStock {
            product_name,
            requested,
            available,
        } => {
            assert_eq!(product_name, "Chef's Knife");
            assert_eq!(requested, 51);
            assert_eq!(available, 50);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    assert_eq!(inventory.products()[0].stock, 50);
    assert!(inventory.sales().is_empty());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_record_sale_unknown_product() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    let (mut inventory, mut rx) = ready_service(store).await;

    let err = inventory.record_sale("prod_999", 1).await.unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound(id) if id == "prod_999"));
    assert!(inventory.sales().is_empty());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_record_sale_rejects_non_positive_quantity() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    let (mut inventory, _rx) = ready_service(store).await;

    assert!(matches!(
        inventory.record_sale("prod_001", 0).await.unwrap_err(),
        AppError::Validation { .. }
    ));
    assert!(matches!(
        inventory.record_sale("prod_001", -2).await.unwrap_err(),
        AppError::Validation { .. }
    ));
    assert_eq!(inventory.products()[0].stock, 50);
}

#[tokio::test]
async fn test_update_stock_clamps_to_zero() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    let (mut inventory, mut rx) = ready_service(store).await;

    let updated = inventory.update_product_stock("prod_001", -5).await.unwrap();

    assert_eq!(updated.stock, 0);
    assert_eq!(inventory.products()[0].stock, 0);
    match rx.try_recv().unwrap() {
        SyncOperation::PushStock { stock, .. } => assert_eq!(stock, 0),
        other => panic!("unexpected operation: {:?}", other),
    }
}

#[tokio::test]
async fn test_update_stock_unknown_product() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    let (mut inventory, _rx) = ready_service(store).await;

    let err = inventory.update_product_stock("prod_999", 5).await.unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound(_)));
}

#[tokio::test]
async fn test_add_product_adopts_confirmed_id() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    let (mut inventory, _rx) = ready_service(store).await;

    let created = inventory.add_product(draft()).await.unwrap();

    assert!(!created.has_temporary_id());
    assert_eq!(inventory.products().len(), 2);
    assert!(inventory.products().iter().all(|p| !p.has_temporary_id()));
    assert!(inventory.products().iter().any(|p| p.id == created.id));
}

#[tokio::test]
async fn test_add_product_rolls_back_on_store_rejection() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    store.set_failures(Failures {
        create_product: true,
        ..Failures::default()
    });
    let (mut inventory, _rx) = ready_service(store).await;

    let err = inventory.add_product(draft()).await.unwrap_err();

    assert!(matches!(err, AppError::Store(_)));
    assert_eq!(inventory.products(), &[knife()]);
}

#[tokio::test]
async fn test_add_product_rejects_invalid_draft() {
    let store = Arc::new(InMemoryRecordStore::new());
    let (mut inventory, _rx) = ready_service(store.clone()).await;

    let mut invalid = draft();
    invalid.name = "   ".to_string();

    let err = inventory.add_product(invalid).await.unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert!(inventory.products().is_empty());
    // Validation failures never reach the store
    assert_eq!(store.request_count(), 2);
}

#[tokio::test]
async fn test_delete_sale_requires_remote_confirmation() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    let (mut inventory, _rx) = ready_service(store.clone()).await;
    let sale = inventory.record_sale("prod_001", 1).await.unwrap();

    store.set_failures(Failures {
        delete_sale: true,
        ..Failures::default()
    });
    assert!(!inventory.delete_sale(&sale.id).await);
    assert_eq!(inventory.sales().len(), 1);

    store.set_failures(Failures::default());
    assert!(inventory.delete_sale(&sale.id).await);
    assert!(inventory.sales().is_empty());
}

#[tokio::test]
async fn test_remove_product_cascades_to_sales() {
    let products = vec![knife(), seed_catalog()[1].clone()];
    let store = Arc::new(InMemoryRecordStore::with_products(products));
    let (mut inventory, _rx) = ready_service(store.clone()).await;

    inventory.record_sale("prod_001", 2).await.unwrap();
    inventory.record_sale("prod_002", 1).await.unwrap();

    assert!(inventory.remove_product("prod_001").await);

    assert!(inventory.products().iter().all(|p| p.id != "prod_001"));
    assert!(inventory.sales().iter().all(|s| s.product_id != "prod_001"));
    assert_eq!(inventory.sales().len(), 1);
    assert!(store
        .products
        .lock()
        .unwrap()
        .iter()
        .all(|p| p.id != "prod_001"));
}

#[tokio::test]
async fn test_remove_product_reports_partial_remote_failure() {
    let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
    store.set_failures(Failures {
        delete_product: true,
        ..Failures::default()
    });
    let (mut inventory, _rx) = ready_service(store).await;

    // Memory is still cleaned up optimistically
    assert!(!inventory.remove_product("prod_001").await);
    assert!(inventory.products().is_empty());
}

proptest! {
    // Stock never goes negative no matter how stock updates and sales
    // interleave.
    #[test]
    fn prop_stock_never_negative(ops in prop::collection::vec((any::<bool>(), -20i64..20), 1..40)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let store = Arc::new(InMemoryRecordStore::with_products(vec![knife()]));
            let (mut inventory, _rx) = ready_service(store).await;

            for (is_sale, value) in ops {
                if is_sale {
                    let _ = inventory.record_sale("prod_001", value).await;
                } else {
                    let _ = inventory.update_product_stock("prod_001", value).await;
                }
                prop_assert!(inventory.products()[0].stock >= 0);
            }
            Ok(())
        })?;
    }
}

use chrono::Utc;
use rust_decimal::Decimal;

use ecommerce_common::adapter::repository::DocId;
use storefront::api::web::dto::{OrderCreateReqDto, OrderLineReqDto, PageQueryDto};
use storefront::constant::{OrderStatus, UNKNOWN_PRODUCT_NAME};
use storefront::error::AppErrorCode;
use storefront::model::{OrderLineModel, OrderModel, ProductModel};
use storefront::usecase::{
    CreateOrderUsKsErr, CreateOrderUseCase, ListUserOrdersUsKsErr, ListUserOrdersUseCase,
};

use super::{ut_log_context, MockOrderRepo, MockProductRepo};

fn ut_product(name: &str, price: Decimal) -> ProductModel {
    ProductModel {
        id: DocId::generate(),
        name: name.to_string(),
        description: None,
        price,
        sizes: Vec::new(),
        created_at: Utc::now(),
    }
}

fn ut_line_req(product_id: DocId, qty: i64) -> OrderLineReqDto {
    OrderLineReqDto {
        product_id: product_id.to_string(),
        qty,
    }
}

#[tokio::test]
async fn create_order_ok() {
    let products = vec![
        ut_product("product A", Decimal::new(1000, 2)),
        ut_product("product B", Decimal::new(750, 2)),
    ];
    let (id_a, id_b) = (products[0].id, products[1].id);
    let repo_product = MockProductRepo {
        items: products,
        ..Default::default()
    };
    let num_batch_fetch = repo_product.num_batch_fetch.clone();
    let repo_order = MockOrderRepo::default();
    let saved = repo_order.saved.clone();
    let uc = CreateOrderUseCase {
        repo_order: Box::new(repo_order),
        repo_product: Box::new(repo_product),
        logctx: ut_log_context(),
    };
    let req = OrderCreateReqDto {
        user_id: "user-123".to_string(),
        items: vec![ut_line_req(id_a, 2), ut_line_req(id_b, 1), ut_line_req(id_a, 1)],
        order_status: None,
    };
    let result = uc.execute(req).await;
    let created = result.unwrap();
    // all the products are loaded in one batch
    assert_eq!(*num_batch_fetch.lock().unwrap(), 1);
    let guard = saved.lock().unwrap();
    assert_eq!(guard.len(), 1);
    let order = &guard[0];
    assert_eq!(order.id.to_string(), created.id);
    assert_eq!(order.owner.as_str(), "user-123");
    assert_eq!(order.status, OrderStatus::Placed);
    assert_eq!(order.total, Decimal::new(3750, 2));
    assert_eq!(order.lines.len(), 3);
    assert_eq!(order.lines[1].product_id, id_b);
}

#[tokio::test]
async fn create_order_product_not_found() {
    let products = vec![ut_product("product A", Decimal::new(1000, 2))];
    let id_a = products[0].id;
    let id_missing = DocId::generate();
    let repo_product = MockProductRepo {
        items: products,
        ..Default::default()
    };
    let repo_order = MockOrderRepo::default();
    let saved = repo_order.saved.clone();
    let uc = CreateOrderUseCase {
        repo_order: Box::new(repo_order),
        repo_product: Box::new(repo_product),
        logctx: ut_log_context(),
    };
    let req = OrderCreateReqDto {
        user_id: "user-123".to_string(),
        items: vec![ut_line_req(id_a, 1), ut_line_req(id_missing, 1)],
        order_status: Some(OrderStatus::Confirmed),
    };
    let result = uc.execute(req).await;
    if let Err(CreateOrderUsKsErr::ReqContent(e)) = result {
        let expect = format!("Product {} not found", id_missing);
        assert_eq!(e.detail, Some(expect));
        assert!(e.items.is_none());
    } else {
        assert!(false);
    }
    // rejected order is never saved
    assert!(saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_order_invalid_req() {
    let repo_product = MockProductRepo::default();
    let num_batch_fetch = repo_product.num_batch_fetch.clone();
    let uc = CreateOrderUseCase {
        repo_order: Box::new(MockOrderRepo::default()),
        repo_product: Box::new(repo_product),
        logctx: ut_log_context(),
    };
    let req = OrderCreateReqDto {
        user_id: "user-123".to_string(),
        items: Vec::new(),
        order_status: None,
    };
    let result = uc.execute(req).await;
    if let Err(CreateOrderUsKsErr::ReqContent(e)) = result {
        assert!(e.quota_items.is_some());
        assert!(e.detail.is_none());
    } else {
        assert!(false);
    }
    assert_eq!(*num_batch_fetch.lock().unwrap(), 0);
}

#[tokio::test]
async fn create_order_repo_error() {
    let products = vec![ut_product("product A", Decimal::new(1000, 2))];
    let id_a = products[0].id;
    let repo_product = MockProductRepo {
        items: products,
        ..Default::default()
    };
    let repo_order = MockOrderRepo {
        error: true,
        ..Default::default()
    };
    let uc = CreateOrderUseCase {
        repo_order: Box::new(repo_order),
        repo_product: Box::new(repo_product),
        logctx: ut_log_context(),
    };
    let req = OrderCreateReqDto {
        user_id: "user-123".to_string(),
        items: vec![ut_line_req(id_a, 1)],
        order_status: None,
    };
    let result = uc.execute(req).await;
    if let Err(CreateOrderUsKsErr::Server(e)) = result {
        assert_eq!(e.code, AppErrorCode::RemoteDbServerFailure);
    } else {
        assert!(false);
    }
}

#[tokio::test]
async fn list_user_orders_ok() {
    let products = vec![
        ut_product("product A", Decimal::new(1000, 2)),
        ut_product("product B", Decimal::new(750, 2)),
    ];
    let (id_a, id_b) = (products[0].id, products[1].id);
    let id_deleted = DocId::generate();
    let repo_order = MockOrderRepo::default();
    {
        let mut guard = repo_order.saved.lock().unwrap();
        let line = |product_id, qty| OrderLineModel { product_id, qty };
        guard.push(OrderModel::new(
            "user-5".to_string(),
            vec![line(id_a, 2), line(id_b, 1)],
            OrderStatus::Placed,
            Decimal::new(2750, 2),
        ));
        guard.push(OrderModel::new(
            "user-5".to_string(),
            vec![line(id_deleted, 4)],
            OrderStatus::Shipped,
            Decimal::new(400, 2),
        ));
        guard.push(OrderModel::new(
            "user-6".to_string(),
            vec![line(id_b, 1)],
            OrderStatus::Placed,
            Decimal::new(750, 2),
        ));
    }
    let repo_product = MockProductRepo {
        items: products,
        ..Default::default()
    };
    let uc = ListUserOrdersUseCase {
        repo_order: Box::new(repo_order),
        repo_product: Box::new(repo_product),
    };
    let query = PageQueryDto {
        limit: Some(1),
        offset: Some(0),
    };
    let result = uc.execute("user-5".to_string(), query).await;
    let actual = result.unwrap();
    assert_eq!(actual.data.len(), 1);
    // newest order comes first, its product no longer exists
    let order = &actual.data[0];
    assert_eq!(order.total, Decimal::new(400, 2));
    assert_eq!(order.items[0].qty, 4);
    assert_eq!(order.items[0].product_details.id, id_deleted.to_string());
    assert_eq!(order.items[0].product_details.name.as_str(), UNKNOWN_PRODUCT_NAME);
    assert_eq!(actual.page.next.as_deref(), Some("1"));
    assert_eq!(actual.page.limit, 1);
    assert_eq!(actual.page.previous, None);
} // end of fn list_user_orders_ok

#[tokio::test]
async fn list_user_orders_second_page() {
    let product = ut_product("product A", Decimal::new(1000, 2));
    let id_a = product.id;
    let repo_order = MockOrderRepo::default();
    {
        let mut guard = repo_order.saved.lock().unwrap();
        for qty in 1..=3u32 {
            let line = OrderLineModel {
                product_id: id_a,
                qty,
            };
            let total = Decimal::new(1000 * qty as i64, 2);
            let o = OrderModel::new("user-7".to_string(), vec![line], OrderStatus::Placed, total);
            guard.push(o);
        }
    }
    let uc = ListUserOrdersUseCase {
        repo_order: Box::new(repo_order),
        repo_product: Box::new(MockProductRepo {
            items: vec![product],
            ..Default::default()
        }),
    };
    let query = PageQueryDto {
        limit: Some(2),
        offset: Some(2),
    };
    let actual = uc.execute("user-7".to_string(), query).await.unwrap();
    assert_eq!(actual.data.len(), 1);
    assert_eq!(actual.data[0].items[0].qty, 1);
    assert_eq!(actual.data[0].items[0].product_details.name.as_str(), "product A");
    assert_eq!(actual.page.next, None);
    assert_eq!(actual.page.previous, Some(0));
}

#[tokio::test]
async fn list_user_orders_empty() {
    let repo_product = MockProductRepo::default();
    let num_batch_fetch = repo_product.num_batch_fetch.clone();
    let uc = ListUserOrdersUseCase {
        repo_order: Box::new(MockOrderRepo::default()),
        repo_product: Box::new(repo_product),
    };
    let query = PageQueryDto {
        limit: Some(5),
        offset: Some(10),
    };
    let actual = uc.execute("nobody".to_string(), query).await.unwrap();
    assert!(actual.data.is_empty());
    assert_eq!(actual.page.next, None);
    assert_eq!(actual.page.limit, 0);
    assert_eq!(actual.page.previous, None);
    assert_eq!(*num_batch_fetch.lock().unwrap(), 0);
}

#[tokio::test]
async fn list_user_orders_invalid_window() {
    let uc = ListUserOrdersUseCase {
        repo_order: Box::new(MockOrderRepo::default()),
        repo_product: Box::new(MockProductRepo::default()),
    };
    let query = PageQueryDto {
        limit: Some(0),
        offset: Some(-3),
    };
    let result = uc.execute("user-5".to_string(), query).await;
    if let Err(ListUserOrdersUsKsErr::ReqContent(e)) = result {
        assert_eq!(e.limit.unwrap().given, 0);
        assert_eq!(e.offset.unwrap().given, -3);
    } else {
        assert!(false);
    }
}

use std::boxed::Box;
use std::collections::{HashMap, HashSet};
use std::result::Result as DefaultResult;
use std::sync::Arc;

use rust_decimal::Decimal;

use ecommerce_common::adapter::repository::DocId;

use crate::api::web::dto::{
    OrderCreateReqDto, OrderCreateRespErrorDto, OrderLineDetailDto, OrderProductDetailDto,
    OrderSummaryDto, PageQueryDto, PageQueryErrorDto, PaginatedDto, ResourceCreatedDto,
};
use crate::constant::UNKNOWN_PRODUCT_NAME;
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{OrderLineModel, OrderModel, PageMarkerModel, PageWindow};
use crate::repository::{AbsOrderRepo, AbsProductRepo};

#[derive(Debug)]
pub enum CreateOrderUsKsErr {
    ReqContent(OrderCreateRespErrorDto),
    Server(AppError),
}

#[derive(Debug)]
pub enum ListUserOrdersUsKsErr {
    ReqContent(PageQueryErrorDto),
    Server(AppError),
}

pub struct CreateOrderUseCase {
    pub repo_order: Box<dyn AbsOrderRepo>,
    pub repo_product: Box<dyn AbsProductRepo>,
    pub logctx: Arc<AppLogContext>,
}

pub struct ListUserOrdersUseCase {
    pub repo_order: Box<dyn AbsOrderRepo>,
    pub repo_product: Box<dyn AbsProductRepo>,
}

impl CreateOrderUseCase {
    pub async fn execute(
        self,
        req: OrderCreateReqDto,
    ) -> DefaultResult<ResourceCreatedDto, CreateOrderUsKsErr> {
        let (owner, status) = (req.user_id, req.order_status.unwrap_or_default());
        let lines = OrderModel::validate_request(owner.as_str(), req.items)
            .map_err(CreateOrderUsKsErr::ReqContent)?;
        let total = self.validate_price(&lines).await?;
        // all validation above precedes the only write
        let order = OrderModel::new(owner, lines, status, total);
        let oid = order.id;
        let logctx_p = &self.logctx;
        match self.repo_order.create(order).await {
            Ok(()) => {
                app_log_event!(logctx_p, AppLogLevel::INFO, "order-created: {oid}, total:{total}");
                Ok(ResourceCreatedDto {
                    id: oid.to_string(),
                })
            }
            Err(e) => {
                app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-fail-save: {e}");
                Err(CreateOrderUsKsErr::Server(e))
            }
        }
    } // end of fn execute

    /// load all the referenced products in one batch, then compute the total amount
    async fn validate_price(
        &self,
        lines: &[OrderLineModel],
    ) -> DefaultResult<Decimal, CreateOrderUsKsErr> {
        let ids = lines
            .iter()
            .map(|l| l.product_id)
            .collect::<HashSet<DocId>>()
            .into_iter()
            .collect::<Vec<_>>();
        let products = match self.repo_product.fetch_many(ids).await {
            Ok(v) => v,
            Err(e) => {
                let logctx_p = &self.logctx;
                app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-fail-fetch: {e}");
                return Err(CreateOrderUsKsErr::Server(e));
            }
        };
        let prices = products
            .into_iter()
            .map(|p| (p.id, p.price))
            .collect::<HashMap<DocId, Decimal>>();
        OrderModel::calculate_total(lines, &prices).map_err(|e| {
            let detail = Some(e.to_string());
            CreateOrderUsKsErr::ReqContent(OrderCreateRespErrorDto {
                detail,
                ..Default::default()
            })
        })
    }
} // end of impl CreateOrderUseCase

impl ListUserOrdersUseCase {
    pub async fn execute(
        self,
        owner: String,
        query: PageQueryDto,
    ) -> DefaultResult<PaginatedDto<OrderSummaryDto>, ListUserOrdersUsKsErr> {
        let window = PageWindow::try_new(query.limit, query.offset)
            .map_err(ListUserOrdersUsKsErr::ReqContent)?;
        let orders = self
            .repo_order
            .fetch_by_owner(owner.as_str(), window)
            .await
            .map_err(ListUserOrdersUsKsErr::Server)?;
        if orders.is_empty() {
            return Ok(PaginatedDto {
                data: Vec::new(),
                page: PageMarkerModel::empty_envelope(),
            });
        }
        let names = self
            .load_product_names(&orders)
            .await
            .map_err(ListUserOrdersUsKsErr::Server)?;
        let data = orders
            .into_iter()
            .map(|o| Self::to_summary(o, &names))
            .collect::<Vec<_>>();
        let total = self
            .repo_order
            .count_by_owner(owner.as_str())
            .await
            .map_err(ListUserOrdersUsKsErr::Server)?;
        let page = PageMarkerModel::estimate(total, &window).into_envelope(data.len());
        Ok(PaginatedDto { data, page })
    } // end of fn execute

    async fn load_product_names(
        &self,
        orders: &[OrderModel],
    ) -> DefaultResult<HashMap<DocId, String>, AppError> {
        let ids = orders
            .iter()
            .flat_map(|o| o.lines.iter().map(|l| l.product_id))
            .collect::<HashSet<DocId>>()
            .into_iter()
            .collect::<Vec<_>>();
        let products = self.repo_product.fetch_many(ids).await?;
        let out = products.into_iter().map(|p| (p.id, p.name)).collect();
        Ok(out)
    }

    fn to_summary(order: OrderModel, names: &HashMap<DocId, String>) -> OrderSummaryDto {
        let items = order
            .lines
            .into_iter()
            .map(|l| {
                let name = names
                    .get(&l.product_id)
                    .map(String::as_str)
                    .unwrap_or(UNKNOWN_PRODUCT_NAME);
                OrderLineDetailDto {
                    product_details: OrderProductDetailDto {
                        id: l.product_id.to_string(),
                        name: name.to_string(),
                    },
                    qty: l.qty,
                }
            })
            .collect();
        OrderSummaryDto {
            id: order.id.to_string(),
            items,
            total: order.total,
        }
    }
} // end of impl ListUserOrdersUseCase

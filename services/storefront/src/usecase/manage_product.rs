use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use ecommerce_common::adapter::repository::DocId;

use crate::api::web::dto::{
    PageQueryErrorDto, PaginatedDto, ProductCreateErrorDto, ProductCreateReqDto,
    ProductDetailDto, ProductListQueryDto, ProductSummaryDto, ResourceCreatedDto,
};
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{PageMarkerModel, PageWindow, ProductFilterModel, ProductModel};
use crate::repository::AbsProductRepo;

#[derive(Debug)]
pub enum CreateProductUsKsErr {
    ReqContent(ProductCreateErrorDto),
    Server(AppError),
}

#[derive(Debug)]
pub enum ListProductsUsKsErr {
    ReqContent(PageQueryErrorDto),
    Server(AppError),
}

#[derive(Debug)]
pub enum GetProductUsKsErr {
    InvalidId(String),
    NotFound,
    Server(AppError),
}

pub struct CreateProductUseCase {
    pub repo: Box<dyn AbsProductRepo>,
    pub logctx: Arc<AppLogContext>,
}

pub struct ListProductsUseCase {
    pub repo: Box<dyn AbsProductRepo>,
}

pub struct GetProductUseCase {
    pub repo: Box<dyn AbsProductRepo>,
}

impl CreateProductUseCase {
    pub async fn execute(
        self,
        req: ProductCreateReqDto,
    ) -> DefaultResult<ResourceCreatedDto, CreateProductUsKsErr> {
        let item = ProductModel::try_from(req).map_err(CreateProductUsKsErr::ReqContent)?;
        let id = item.id;
        let logctx_p = &self.logctx;
        match self.repo.create(item).await {
            Ok(()) => {
                app_log_event!(logctx_p, AppLogLevel::INFO, "product-created: {id}");
                Ok(ResourceCreatedDto { id: id.to_string() })
            }
            Err(e) => {
                app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-fail-save: {e}");
                Err(CreateProductUsKsErr::Server(e))
            }
        }
    }
}

impl ListProductsUseCase {
    pub async fn execute(
        self,
        query: ProductListQueryDto,
    ) -> DefaultResult<PaginatedDto<ProductSummaryDto>, ListProductsUsKsErr> {
        let window = PageWindow::try_new(query.limit, query.offset)
            .map_err(ListProductsUsKsErr::ReqContent)?;
        let criteria = ProductFilterModel::new(query.name, query.size);
        let total = self
            .repo
            .count(&criteria)
            .await
            .map_err(ListProductsUsKsErr::Server)?;
        let items = self
            .repo
            .filter(&criteria, window)
            .await
            .map_err(ListProductsUsKsErr::Server)?;
        let data = items
            .into_iter()
            .map(ProductSummaryDto::from)
            .collect::<Vec<_>>();
        let page = PageMarkerModel::estimate(total, &window).into_envelope(data.len());
        Ok(PaginatedDto { data, page })
    }
}

impl GetProductUseCase {
    pub async fn execute(self, id: String) -> DefaultResult<ProductDetailDto, GetProductUsKsErr> {
        let id = DocId::try_from(id.as_str())
            .map_err(|(_code, detail)| GetProductUsKsErr::InvalidId(detail))?;
        match self.repo.fetch(id).await {
            Ok(Some(item)) => Ok(ProductDetailDto::from(item)),
            Ok(None) => Err(GetProductUsKsErr::NotFound),
            Err(e) => Err(GetProductUsKsErr::Server(e)),
        }
    }
}

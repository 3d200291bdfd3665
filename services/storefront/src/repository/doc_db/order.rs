use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use mongodb::options::FindOptions;
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use ecommerce_common::adapter::repository::DocId;

use super::super::AbsOrderRepo;
use super::{from_bson_time, from_db_amount, to_bson_time, to_db_amount};
use crate::constant::{collection, OrderStatus};
use crate::datastore::{map_driver_error, AppMongoDbStore};
use crate::error::AppError;
use crate::model::{OrderLineModel, OrderModel, PageWindow};

#[derive(Serialize, Deserialize)]
struct OrderLineDocument {
    #[serde(rename = "productId")]
    product_id: ObjectId,
    qty: u32,
}

#[derive(Serialize, Deserialize)]
struct OrderDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    user_id: String,
    items: Vec<OrderLineDocument>,
    order_status: OrderStatus,
    total_amount: f64,
    created_at: BsonDateTime,
}

impl TryFrom<OrderModel> for OrderDocument {
    type Error = AppError;
    fn try_from(value: OrderModel) -> DefaultResult<Self, Self::Error> {
        let items = value
            .lines
            .iter()
            .map(|l| OrderLineDocument {
                product_id: l.product_id.0,
                qty: l.qty,
            })
            .collect();
        Ok(Self {
            id: value.id.0,
            user_id: value.owner,
            items,
            order_status: value.status,
            total_amount: to_db_amount(&value.total)?,
            created_at: to_bson_time(&value.created_at),
        })
    }
}

impl TryFrom<OrderDocument> for OrderModel {
    type Error = AppError;
    fn try_from(value: OrderDocument) -> DefaultResult<Self, Self::Error> {
        let lines = value
            .items
            .iter()
            .map(|l| OrderLineModel {
                product_id: DocId(l.product_id),
                qty: l.qty,
            })
            .collect();
        Ok(Self {
            id: DocId(value.id),
            owner: value.user_id,
            lines,
            status: value.order_status,
            total: from_db_amount(value.total_amount)?,
            created_at: from_bson_time(&value.created_at)?,
        })
    }
}

pub struct OrderMongoDbRepo {
    coll: Collection<OrderDocument>,
}

#[async_trait]
impl AbsOrderRepo for OrderMongoDbRepo {
    async fn create(&self, item: OrderModel) -> DefaultResult<(), AppError> {
        let document = OrderDocument::try_from(item)?;
        let _result = self
            .coll
            .insert_one(document, None)
            .await
            .map_err(map_driver_error)?;
        Ok(())
    }

    async fn fetch_by_owner(
        &self,
        owner: &str,
        window: PageWindow,
    ) -> DefaultResult<Vec<OrderModel>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! {"_id": -1})
            .skip(window.offset)
            .limit(window.limit as i64)
            .build();
        let cursor = self
            .coll
            .find(doc! {"user_id": owner}, Some(options))
            .await
            .map_err(map_driver_error)?;
        let docs = cursor
            .try_collect::<Vec<OrderDocument>>()
            .await
            .map_err(map_driver_error)?;
        docs.into_iter().map(OrderModel::try_from).collect()
    }

    async fn count_by_owner(&self, owner: &str) -> DefaultResult<u64, AppError> {
        self.coll
            .count_documents(doc! {"user_id": owner}, None)
            .await
            .map_err(map_driver_error)
    }
} // end of impl OrderMongoDbRepo

impl OrderMongoDbRepo {
    pub(crate) fn new(db: Arc<AppMongoDbStore>) -> Self {
        Self {
            coll: db.collection::<OrderDocument>(collection::ORDER),
        }
    }
}

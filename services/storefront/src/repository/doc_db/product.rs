use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};
use mongodb::options::FindOptions;
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use ecommerce_common::adapter::repository::DocId;
use ecommerce_common::util::escape_search_keyword;

use super::super::AbsProductRepo;
use super::{from_bson_time, from_db_amount, to_bson_time, to_db_amount};
use crate::constant::collection;
use crate::datastore::{map_driver_error, AppMongoDbStore};
use crate::error::AppError;
use crate::model::{PageWindow, ProductFilterModel, ProductModel, ProductSizeModel};

#[derive(Serialize, Deserialize)]
struct SizeDocument {
    size: String,
    quantity: u32,
}

#[derive(Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    price: f64,
    #[serde(default)]
    sizes: Vec<SizeDocument>,
    created_at: BsonDateTime,
}

impl TryFrom<ProductModel> for ProductDocument {
    type Error = AppError;
    fn try_from(value: ProductModel) -> DefaultResult<Self, Self::Error> {
        let sizes = value
            .sizes
            .into_iter()
            .map(|s| SizeDocument {
                size: s.label,
                quantity: s.quantity,
            })
            .collect();
        Ok(Self {
            id: value.id.0,
            price: to_db_amount(&value.price)?,
            created_at: to_bson_time(&value.created_at),
            name: value.name,
            description: value.description,
            sizes,
        })
    }
}

impl TryFrom<ProductDocument> for ProductModel {
    type Error = AppError;
    fn try_from(value: ProductDocument) -> DefaultResult<Self, Self::Error> {
        let sizes = value
            .sizes
            .into_iter()
            .map(|s| ProductSizeModel {
                label: s.size,
                quantity: s.quantity,
            })
            .collect();
        Ok(Self {
            id: DocId(value.id),
            price: from_db_amount(value.price)?,
            created_at: from_bson_time(&value.created_at)?,
            name: value.name,
            description: value.description,
            sizes,
        })
    }
}

pub struct ProductMongoDbRepo {
    coll: Collection<ProductDocument>,
}

#[async_trait]
impl AbsProductRepo for ProductMongoDbRepo {
    async fn create(&self, item: ProductModel) -> DefaultResult<(), AppError> {
        let document = ProductDocument::try_from(item)?;
        let _result = self
            .coll
            .insert_one(document, None)
            .await
            .map_err(map_driver_error)?;
        Ok(())
    }

    async fn fetch(&self, id: DocId) -> DefaultResult<Option<ProductModel>, AppError> {
        let filter = doc! {"_id": id.0};
        let found = self
            .coll
            .find_one(filter, None)
            .await
            .map_err(map_driver_error)?;
        found.map(ProductModel::try_from).transpose()
    }

    async fn fetch_many(&self, ids: Vec<DocId>) -> DefaultResult<Vec<ProductModel>, AppError> {
        let oids = ids.iter().map(|d| d.0).collect::<Vec<_>>();
        let filter = doc! {"_id": {"$in": oids}};
        self._find(filter, None).await
    }

    async fn filter(
        &self,
        criteria: &ProductFilterModel,
        window: PageWindow,
    ) -> DefaultResult<Vec<ProductModel>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! {"_id": 1})
            .skip(window.offset)
            .limit(window.limit as i64)
            .build();
        self._find(Self::build_filter(criteria), Some(options)).await
    }

    async fn count(&self, criteria: &ProductFilterModel) -> DefaultResult<u64, AppError> {
        self.coll
            .count_documents(Self::build_filter(criteria), None)
            .await
            .map_err(map_driver_error)
    }
} // end of impl ProductMongoDbRepo

impl ProductMongoDbRepo {
    pub(crate) fn new(db: Arc<AppMongoDbStore>) -> Self {
        Self {
            coll: db.collection::<ProductDocument>(collection::PRODUCT),
        }
    }

    fn build_filter(criteria: &ProductFilterModel) -> Document {
        let mut filter = Document::new();
        if let Some(kw) = criteria.name.as_deref() {
            let patt = escape_search_keyword(kw);
            filter.insert("name", doc! {"$regex": patt, "$options": "i"});
        }
        if let Some(s) = criteria.size.as_deref() {
            filter.insert("sizes.size", s);
        }
        filter
    }

    async fn _find(
        &self,
        filter: Document,
        options: Option<FindOptions>,
    ) -> DefaultResult<Vec<ProductModel>, AppError> {
        let cursor = self
            .coll
            .find(filter, options)
            .await
            .map_err(map_driver_error)?;
        let docs = cursor
            .try_collect::<Vec<ProductDocument>>()
            .await
            .map_err(map_driver_error)?;
        docs.into_iter().map(ProductModel::try_from).collect()
    }
} // end of impl ProductMongoDbRepo

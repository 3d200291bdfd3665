use std::boxed::Box;
use std::collections::HashMap;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use rust_decimal::Decimal;

use ecommerce_common::adapter::repository::DocId;

use super::super::AbsProductRepo;
use super::{parse_column, parse_json_column, parse_time_column, to_json_column};
use crate::datastore::{AbsDStoreFilterKeyOp, AbstInMemoryDStore, AppInMemFetchedSingleRow};
use crate::error::{AppError, AppErrorCode};
use crate::model::{PageWindow, ProductFilterModel, ProductModel, ProductSizeModel};

const TABLE_LABEL: &str = "product";

enum InMemColIdx {
    Name,
    Description,
    Price,
    Sizes,
    CreatedAt,
    TotNumColumns,
}

impl From<InMemColIdx> for usize {
    fn from(value: InMemColIdx) -> usize {
        match value {
            InMemColIdx::Name => 0,
            InMemColIdx::Price => 1,
            InMemColIdx::Sizes => 2,
            InMemColIdx::CreatedAt => 3,
            InMemColIdx::Description => 4,
            InMemColIdx::TotNumColumns => 5,
        }
    }
}

// sizes are kept as JSON array of (label, quantity) pairs in one column
type InMemSizeRow = (String, u32);

struct InnerDStoreFilterKeyOp<'a> {
    criteria: &'a ProductFilterModel,
    name_patt: Option<Regex>,
}

impl<'a> AbsDStoreFilterKeyOp for InnerDStoreFilterKeyOp<'a> {
    fn filter(&self, k: &str, row: &[String]) -> DefaultResult<bool, AppError> {
        let name = row
            .get::<usize>(InMemColIdx::Name.into())
            .map(String::as_str)
            .unwrap_or("");
        let sizes =
            parse_json_column::<Vec<InMemSizeRow>>(row, InMemColIdx::Sizes.into(), "sizes")
                .map_err(|mut e| {
                    e.detail = e.detail.map(|d| format!("key:{k}, {d}"));
                    e
                })?;
        let labels = sizes.iter().map(|(label, _qty)| label.as_str());
        let found = self
            .criteria
            .is_match(self.name_patt.as_ref(), name, labels);
        Ok(found)
    }
}

impl<'a> InnerDStoreFilterKeyOp<'a> {
    fn try_new(criteria: &'a ProductFilterModel) -> DefaultResult<Self, AppError> {
        let name_patt = criteria.name_matcher()?;
        Ok(Self {
            criteria,
            name_patt,
        })
    }
}

pub struct ProductInMemRepo {
    datastore: Arc<Box<dyn AbstInMemoryDStore>>,
}

#[async_trait]
impl AbsProductRepo for ProductInMemRepo {
    async fn create(&self, item: ProductModel) -> DefaultResult<(), AppError> {
        let (pkey, row) = Self::to_row(item)?;
        let rows = HashMap::from([(pkey, row)]);
        let data = HashMap::from([(TABLE_LABEL.to_string(), rows)]);
        let _num = self.datastore.save(data).await?;
        Ok(())
    }

    async fn fetch(&self, id: DocId) -> DefaultResult<Option<ProductModel>, AppError> {
        let mut items = self.fetch_many(vec![id]).await?;
        Ok(items.pop())
    }

    async fn fetch_many(&self, ids: Vec<DocId>) -> DefaultResult<Vec<ProductModel>, AppError> {
        let keys = ids.iter().map(DocId::to_string).collect::<Vec<_>>();
        self._fetch(keys).await
    }

    async fn filter(
        &self,
        criteria: &ProductFilterModel,
        window: PageWindow,
    ) -> DefaultResult<Vec<ProductModel>, AppError> {
        let mut keys = self.filter_keys(criteria).await?;
        // hex string of the identifiers keeps the same order as the raw octets
        keys.sort();
        let keys = keys
            .into_iter()
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(window.limit as usize)
            .collect::<Vec<_>>();
        let mut items = self._fetch(keys).await?;
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn count(&self, criteria: &ProductFilterModel) -> DefaultResult<u64, AppError> {
        let keys = self.filter_keys(criteria).await?;
        Ok(keys.len() as u64)
    }
} // end of impl ProductInMemRepo

impl ProductInMemRepo {
    pub async fn new(m: Arc<Box<dyn AbstInMemoryDStore>>) -> DefaultResult<Self, AppError> {
        m.create_table(TABLE_LABEL).await?;
        Ok(Self { datastore: m })
    }

    async fn filter_keys(
        &self,
        criteria: &ProductFilterModel,
    ) -> DefaultResult<Vec<String>, AppError> {
        let op = InnerDStoreFilterKeyOp::try_new(criteria)?;
        self.datastore
            .filter_keys(TABLE_LABEL.to_string(), &op)
            .await
    }

    async fn _fetch(&self, keys: Vec<String>) -> DefaultResult<Vec<ProductModel>, AppError> {
        let info = HashMap::from([(TABLE_LABEL.to_string(), keys)]);
        let mut result_raw = self.datastore.fetch(info).await?;
        let table = result_raw.remove(TABLE_LABEL).unwrap_or_default();
        table
            .into_iter()
            .map(|(k, row)| Self::from_row(k.as_str(), row))
            .collect()
    }

    fn to_row(item: ProductModel) -> DefaultResult<(String, AppInMemFetchedSingleRow), AppError> {
        let sizes = item
            .sizes
            .into_iter()
            .map(|s| (s.label, s.quantity))
            .collect::<Vec<InMemSizeRow>>();
        let num_cols: usize = InMemColIdx::TotNumColumns.into();
        let mut row = vec![String::new(); num_cols];
        let pairs = [
            (InMemColIdx::Name, item.name),
            (InMemColIdx::Price, item.price.to_string()),
            (InMemColIdx::Sizes, to_json_column(&sizes)?),
            (InMemColIdx::CreatedAt, item.created_at.to_rfc3339()),
            (
                InMemColIdx::Description,
                to_json_column(&item.description)?,
            ),
        ];
        for (idx, val) in pairs {
            let idx: usize = idx.into();
            row[idx] = val;
        } // the order of columns can be arbitrary
        Ok((item.id.to_string(), row))
    }

    fn from_row(key: &str, row: AppInMemFetchedSingleRow) -> DefaultResult<ProductModel, AppError> {
        let id = DocId::try_from(key).map_err(|(_code, detail)| AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some(detail),
        })?;
        let price = parse_column::<Decimal, _>(&row, InMemColIdx::Price.into(), "price")?;
        let sizes =
            parse_json_column::<Vec<InMemSizeRow>>(&row, InMemColIdx::Sizes.into(), "sizes")?
                .into_iter()
                .map(|(label, quantity)| ProductSizeModel { label, quantity })
                .collect();
        let description = parse_json_column::<Option<String>>(
            &row,
            InMemColIdx::Description.into(),
            "description",
        )?;
        let created_at = parse_time_column(&row, InMemColIdx::CreatedAt.into())?;
        let name = row
            .into_iter()
            .nth(InMemColIdx::Name.into())
            .unwrap_or_default();
        Ok(ProductModel {
            id,
            name,
            description,
            price,
            sizes,
            created_at,
        })
    }
} // end of impl ProductInMemRepo

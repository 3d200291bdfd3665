use std::boxed::Box;
use std::collections::HashMap;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use ecommerce_common::adapter::repository::DocId;

use super::super::AbsOrderRepo;
use super::{parse_column, parse_json_column, parse_time_column, to_json_column};
use crate::constant::OrderStatus;
use crate::datastore::{AbsDStoreFilterKeyOp, AbstInMemoryDStore, AppInMemFetchedSingleRow};
use crate::error::{AppError, AppErrorCode};
use crate::model::{OrderLineModel, OrderModel, PageWindow};

const TABLE_LABEL: &str = "order";

enum InMemColIdx {
    Owner,
    Status,
    Total,
    Lines,
    CreatedAt,
    TotNumColumns,
}

impl From<InMemColIdx> for usize {
    fn from(value: InMemColIdx) -> usize {
        match value {
            InMemColIdx::Owner => 0,
            InMemColIdx::Lines => 1,
            InMemColIdx::Total => 2,
            InMemColIdx::Status => 3,
            InMemColIdx::CreatedAt => 4,
            InMemColIdx::TotNumColumns => 5,
        }
    }
}

// order lines saved as JSON array of (product ID in hex, quantity)
type InMemLineRow = (String, u32);

struct InnerDStoreFilterKeyOp<'a> {
    owner: &'a str,
}

impl<'a> AbsDStoreFilterKeyOp for InnerDStoreFilterKeyOp<'a> {
    fn filter(&self, _k: &str, row: &[String]) -> DefaultResult<bool, AppError> {
        let found = row
            .get::<usize>(InMemColIdx::Owner.into())
            .map_or(false, |v| v.as_str() == self.owner);
        Ok(found)
    }
}

pub struct OrderInMemRepo {
    datastore: Arc<Box<dyn AbstInMemoryDStore>>,
}

#[async_trait]
impl AbsOrderRepo for OrderInMemRepo {
    async fn create(&self, item: OrderModel) -> DefaultResult<(), AppError> {
        let (pkey, row) = Self::to_row(item)?;
        let rows = HashMap::from([(pkey, row)]);
        let data = HashMap::from([(TABLE_LABEL.to_string(), rows)]);
        let _num = self.datastore.save(data).await?;
        Ok(())
    }

    async fn fetch_by_owner(
        &self,
        owner: &str,
        window: PageWindow,
    ) -> DefaultResult<Vec<OrderModel>, AppError> {
        let mut keys = self.filter_keys(owner).await?;
        keys.sort_by(|a, b| b.cmp(a));
        let keys = keys
            .into_iter()
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(window.limit as usize)
            .collect::<Vec<_>>();
        let info = HashMap::from([(TABLE_LABEL.to_string(), keys)]);
        let mut result_raw = self.datastore.fetch(info).await?;
        let table = result_raw.remove(TABLE_LABEL).unwrap_or_default();
        let mut items = table
            .into_iter()
            .map(|(k, row)| Self::from_row(k.as_str(), row))
            .collect::<DefaultResult<Vec<_>, AppError>>()?;
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(items)
    }

    async fn count_by_owner(&self, owner: &str) -> DefaultResult<u64, AppError> {
        let keys = self.filter_keys(owner).await?;
        Ok(keys.len() as u64)
    }
} // end of impl OrderInMemRepo

impl OrderInMemRepo {
    pub async fn new(m: Arc<Box<dyn AbstInMemoryDStore>>) -> DefaultResult<Self, AppError> {
        m.create_table(TABLE_LABEL).await?;
        Ok(Self { datastore: m })
    }

    async fn filter_keys(&self, owner: &str) -> DefaultResult<Vec<String>, AppError> {
        let op = InnerDStoreFilterKeyOp { owner };
        self.datastore
            .filter_keys(TABLE_LABEL.to_string(), &op)
            .await
    }

    fn to_row(item: OrderModel) -> DefaultResult<(String, AppInMemFetchedSingleRow), AppError> {
        let lines = item
            .lines
            .iter()
            .map(|l| (l.product_id.to_string(), l.qty))
            .collect::<Vec<InMemLineRow>>();
        let num_cols: usize = InMemColIdx::TotNumColumns.into();
        let mut row = vec![String::new(); num_cols];
        let pairs = [
            (InMemColIdx::Owner, item.owner),
            (InMemColIdx::Lines, to_json_column(&lines)?),
            (InMemColIdx::Total, item.total.to_string()),
            (InMemColIdx::Status, item.status.to_string()),
            (InMemColIdx::CreatedAt, item.created_at.to_rfc3339()),
        ];
        for (idx, val) in pairs {
            let idx: usize = idx.into();
            row[idx] = val;
        }
        Ok((item.id.to_string(), row))
    }

    fn from_row(key: &str, row: AppInMemFetchedSingleRow) -> DefaultResult<OrderModel, AppError> {
        let corrupted = |(_code, detail): (AppErrorCode, String)| AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some(detail),
        };
        let id = DocId::try_from(key).map_err(corrupted)?;
        let lines =
            parse_json_column::<Vec<InMemLineRow>>(&row, InMemColIdx::Lines.into(), "lines")?
                .into_iter()
                .map(|(prod_id, qty)| {
                    DocId::try_from(prod_id.as_str())
                        .map(|product_id| OrderLineModel { product_id, qty })
                        .map_err(corrupted)
                })
                .collect::<DefaultResult<Vec<_>, AppError>>()?;
        let total = parse_column::<Decimal, _>(&row, InMemColIdx::Total.into(), "total")?;
        let status = parse_column::<OrderStatus, _>(&row, InMemColIdx::Status.into(), "status")?;
        let created_at = parse_time_column(&row, InMemColIdx::CreatedAt.into())?;
        let owner = row
            .into_iter()
            .nth(InMemColIdx::Owner.into())
            .unwrap_or_default();
        Ok(OrderModel {
            id,
            owner,
            lines,
            status,
            total,
            created_at,
        })
    }
} // end of impl OrderInMemRepo

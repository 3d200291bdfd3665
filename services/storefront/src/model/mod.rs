mod order;
mod pagination;
mod product;

pub use order::{OrderLineModel, OrderModel, OrderPricingError};
pub use pagination::{PageMarkerModel, PageWindow};
pub use product::{ProductFilterModel, ProductModel, ProductSizeModel};

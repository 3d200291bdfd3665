mod manage_order;
mod manage_product;

pub use manage_order::{
    CreateOrderUsKsErr, CreateOrderUseCase, ListUserOrdersUsKsErr, ListUserOrdersUseCase,
};
pub use manage_product::{
    CreateProductUsKsErr, CreateProductUseCase, GetProductUsKsErr, GetProductUseCase,
    ListProductsUsKsErr, ListProductsUseCase,
};

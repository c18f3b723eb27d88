//! Persistent data models

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderItem, OrderStatus, PaymentInfo, ShippingInfo};
pub use product::{Category, Product, ProductImage, Review};
pub use user::{AvatarImage, Role, User, UserView};

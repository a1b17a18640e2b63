//! Catalog domain module.
//!
//! Products (`Produto`), their optional composition as a kit of other products
//! (`ItemKit`) and the rules that keep both consistent. Pure, synchronous
//! domain logic: no IO, no HTTP, no storage.

pub mod item_kit;
pub mod kit;
pub mod policy;
pub mod produto;
pub mod value_objects;

pub use item_kit::{ItemKit, NovoItemKit};
pub use kit::{
    link_product, link_product_with_policy, price_totals, relink, validate_kit,
    validate_kit_with_policy, validate_price_list, validate_price_list_with_policy,
    validate_product_list,
};
pub use policy::{KitPricingPolicy, MIN_KIT_DISCOUNT_PRICE, MIN_KIT_LIST_PRICE};
pub use produto::{NovoProduto, Produto, MIN_FIELD_LEN};
pub use value_objects::{Estoque, ItemKitDetalhe, Preco};

//! User-facing notification messages.
//!
//! The storefront is Brazilian; messages are shown verbatim to shoppers.

/// Requested quantity is not in stock.
pub const STOCK_EXCEEDED: &str = "Quantidade solicitada fora de estoque";

/// Adding a product failed for any reason other than stock.
pub const ADD_FAILED: &str = "Erro na adição do produto";

/// Removing a product failed.
pub const REMOVE_FAILED: &str = "Erro na remoção do produto";

/// Changing a product's quantity failed for any reason other than stock.
pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";

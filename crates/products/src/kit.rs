//! Whole-list kit rules.
//!
//! These checks run over every line of one kit at once, on top of the per-item
//! rules enforced by [`ItemKit`] itself. A missing kit is modelled as an empty
//! slice; an empty kit has no minimum and always passes.

use catalogo_core::{DomainError, DomainResult, Entity};

use crate::item_kit::ItemKit;
use crate::policy::KitPricingPolicy;

/// Reject any line whose kit parent is its own constituent product.
///
/// Stops at the first offending line.
pub fn validate_product_list(lista: &[ItemKit]) -> DomainResult<()> {
    for item in lista {
        if item.kit_id() == Some(item.produto_id()) {
            return Err(DomainError::invalid_item_kit_list(format!(
                "product {} cannot be an item of its own kit",
                item.produto_id()
            )));
        }
    }
    Ok(())
}

/// Check the kit's summed prices against the default minimums.
pub fn validate_price_list(lista: &[ItemKit]) -> DomainResult<()> {
    validate_price_list_with_policy(lista, &KitPricingPolicy::default())
}

/// Check the kit's summed prices against `policy`.
///
/// Both totals are accumulated before either is compared; the list-price
/// minimum is reported ahead of the discount minimum.
pub fn validate_price_list_with_policy(
    lista: &[ItemKit],
    policy: &KitPricingPolicy,
) -> DomainResult<()> {
    if lista.is_empty() {
        return Ok(());
    }

    let (total_lista, total_desconto) = price_totals(lista);

    if total_lista < policy.min_list_price {
        return Err(DomainError::invalid_item_kit_list(format!(
            "total list price of the kit must be at least {} (got {total_lista})",
            policy.min_list_price
        )));
    }
    if total_desconto < policy.min_discount_price {
        return Err(DomainError::invalid_item_kit_list(format!(
            "total discount price of the kit must be at least {} (got {total_desconto})",
            policy.min_discount_price
        )));
    }
    Ok(())
}

/// Sum of list prices and sum of discount prices across all lines.
pub fn price_totals(lista: &[ItemKit]) -> (f64, f64) {
    lista.iter().fold((0.0, 0.0), |(lista_acc, desconto_acc), item| {
        (
            lista_acc + item.preco().preco_lista(),
            desconto_acc + item.preco().preco_desconto(),
        )
    })
}

/// Full kit check with the default minimums: self-reference first, then prices.
pub fn validate_kit(lista: &[ItemKit]) -> DomainResult<()> {
    validate_kit_with_policy(lista, &KitPricingPolicy::default())
}

pub fn validate_kit_with_policy(lista: &[ItemKit], policy: &KitPricingPolicy) -> DomainResult<()> {
    validate_product_list(lista)?;
    validate_price_list_with_policy(lista, policy)
}

/// Entry point used when attaching a kit to a product.
pub fn link_product(lista: &[ItemKit]) -> DomainResult<()> {
    link_product_with_policy(lista, &KitPricingPolicy::default())
}

pub fn link_product_with_policy(lista: &[ItemKit], policy: &KitPricingPolicy) -> DomainResult<()> {
    if lista.is_empty() {
        return Ok(());
    }
    match validate_kit_with_policy(lista, policy) {
        Ok(()) => {
            tracing::debug!(items = lista.len(), "kit list accepted");
            Ok(())
        }
        Err(err) => {
            tracing::warn!(items = lista.len(), error = %err, "kit list rejected");
            Err(err)
        }
    }
}

/// Build the list that results from re-linking `item` into `lista`.
///
/// The first line whose id equals `item`'s id is removed and `item` is
/// appended at the tail. Ids compare as options, so an unsaved item matches
/// the first unsaved line. Returns `None` (and builds nothing) when no line
/// matches. The input is never mutated.
pub fn relink(lista: &[ItemKit], item: &ItemKit) -> Option<Vec<ItemKit>> {
    let pos = lista.iter().position(|candidate| candidate.id() == item.id())?;
    let mut relinked = Vec::with_capacity(lista.len());
    relinked.extend_from_slice(&lista[..pos]);
    relinked.extend_from_slice(&lista[pos + 1..]);
    relinked.push(item.clone());
    Some(relinked)
}

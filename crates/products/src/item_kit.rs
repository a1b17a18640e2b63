//! Kit item: one line of a kit, binding a constituent product to its kit parent.

use serde::{Deserialize, Serialize};

use catalogo_core::{DomainError, DomainResult, Entity, ItemKitId, ProdutoId};

use crate::kit;
use crate::policy::KitPricingPolicy;
use crate::value_objects::{ItemKitDetalhe, Preco};

/// Input for [`ItemKit::new`].
///
/// `produto_id` is optional here so a request that omits it is rejected by the
/// domain rule instead of by deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoItemKit {
    #[serde(default)]
    pub id: Option<ItemKitId>,
    #[serde(default)]
    pub versao: Option<u64>,
    #[serde(default)]
    pub kit_id: Option<ProdutoId>,
    #[serde(default)]
    pub produto_id: Option<ProdutoId>,
    pub qtd: u32,
    pub preco: Preco,
}

/// Entity: ItemKit.
///
/// `preco` is a point-in-time copy for this line and may differ from the
/// constituent product's current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NovoItemKit")]
pub struct ItemKit {
    id: Option<ItemKitId>,
    versao: Option<u64>,
    kit_id: Option<ProdutoId>,
    produto_id: ProdutoId,
    qtd: u32,
    preco: Preco,
}

impl TryFrom<NovoItemKit> for ItemKit {
    type Error = DomainError;

    fn try_from(novo: NovoItemKit) -> Result<Self, Self::Error> {
        ItemKit::new(novo)
    }
}

impl ItemKit {
    /// Checked construction: product reference first, then self-reference.
    pub fn new(novo: NovoItemKit) -> DomainResult<Self> {
        let produto_id = novo.produto_id.ok_or_else(|| {
            DomainError::invalid_item_kit("a product cannot be a kit item without a product")
        })?;
        ensure_not_own_kit(produto_id, novo.kit_id)?;

        Ok(Self {
            id: novo.id,
            versao: novo.versao,
            kit_id: novo.kit_id,
            produto_id,
            qtd: novo.qtd,
            preco: novo.preco,
        })
    }

    pub fn id_typed(&self) -> Option<ItemKitId> {
        self.id
    }

    pub fn versao(&self) -> Option<u64> {
        self.versao
    }

    pub fn kit_id(&self) -> Option<ProdutoId> {
        self.kit_id
    }

    pub fn produto_id(&self) -> ProdutoId {
        self.produto_id
    }

    pub fn qtd(&self) -> u32 {
        self.qtd
    }

    pub fn preco(&self) -> &Preco {
        &self.preco
    }

    /// Attach the kit parent. Rejected, leaving the item untouched, when the
    /// parent is the item's own product.
    pub fn set_kit_id(&mut self, kit_id: ProdutoId) -> DomainResult<()> {
        ensure_not_own_kit(self.produto_id, Some(kit_id))?;
        self.kit_id = Some(kit_id);
        Ok(())
    }

    /// Hook for the persistence collaborator.
    pub fn assign_identity(&mut self, id: ItemKitId, versao: u64) {
        self.id = Some(id);
        self.versao = Some(versao);
    }

    /// Validate a whole kit list before it is attached to a product.
    pub fn vincular_produto(lista: &[ItemKit]) -> DomainResult<()> {
        kit::link_product(lista)
    }

    /// Update quantity and price, re-linking this item inside `lista`.
    ///
    /// See [`ItemKit::atualizar_with_policy`].
    pub fn atualizar(
        &mut self,
        detalhe: ItemKitDetalhe,
        lista: &mut Vec<ItemKit>,
    ) -> DomainResult<()> {
        self.atualizar_with_policy(detalhe, lista, &KitPricingPolicy::default())
    }

    /// Update quantity and price, re-linking this item inside `lista`.
    ///
    /// When `lista` holds a line with this item's id, that line is removed and
    /// the updated item appended at the tail, and the resulting kit is
    /// re-validated. Nothing is committed (neither `self` nor `lista`) unless
    /// that validation passes. Without a matching line only `self` changes and
    /// no kit rule is evaluated.
    pub fn atualizar_with_policy(
        &mut self,
        detalhe: ItemKitDetalhe,
        lista: &mut Vec<ItemKit>,
        policy: &KitPricingPolicy,
    ) -> DomainResult<()> {
        let mut atualizado = self.clone();
        atualizado.qtd = detalhe.qtd;
        atualizado.preco = detalhe.preco;

        if let Some(candidata) = kit::relink(lista, &atualizado) {
            if let Err(err) = kit::validate_kit_with_policy(&candidata, policy) {
                tracing::warn!(item_id = ?self.id, error = %err, "kit item update rejected");
                return Err(err);
            }
            tracing::debug!(item_id = ?self.id, items = candidata.len(), "kit item relinked");
            *lista = candidata;
        }

        *self = atualizado;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn force_kit_id(&mut self, kit_id: ProdutoId) {
        self.kit_id = Some(kit_id);
    }

    #[cfg(test)]
    pub(crate) fn clear_id(&mut self) {
        self.id = None;
    }
}

impl Entity for ItemKit {
    type Id = ItemKitId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }
}

fn ensure_not_own_kit(produto_id: ProdutoId, kit_id: Option<ProdutoId>) -> DomainResult<()> {
    if kit_id == Some(produto_id) {
        return Err(DomainError::invalid_item_kit(
            "a product cannot be an item of its own kit",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preco(lista: f64, desconto: f64) -> Preco {
        Preco::new(lista, desconto).unwrap()
    }

    fn novo(id: i64, produto_id: i64, lista: f64, desconto: f64) -> NovoItemKit {
        NovoItemKit {
            id: Some(ItemKitId::new(id)),
            versao: Some(1),
            kit_id: Some(ProdutoId::new(100)),
            produto_id: Some(ProdutoId::new(produto_id)),
            qtd: 1,
            preco: preco(lista, desconto),
        }
    }

    fn item(id: i64, produto_id: i64, lista: f64, desconto: f64) -> ItemKit {
        ItemKit::new(novo(id, produto_id, lista, desconto)).unwrap()
    }

    fn ids(lista: &[ItemKit]) -> Vec<i64> {
        lista
            .iter()
            .filter_map(|i| i.id_typed().map(ItemKitId::get))
            .collect()
    }

    #[test]
    fn new_item_keeps_all_fields() {
        let item = item(1, 7, 10.0, 8.0);
        assert_eq!(item.id_typed(), Some(ItemKitId::new(1)));
        assert_eq!(item.versao(), Some(1));
        assert_eq!(item.kit_id(), Some(ProdutoId::new(100)));
        assert_eq!(item.produto_id(), ProdutoId::new(7));
        assert_eq!(item.qtd(), 1);
        assert_eq!(item.preco(), &preco(10.0, 8.0));
    }

    #[test]
    fn new_item_requires_a_product() {
        let mut input = novo(1, 7, 10.0, 8.0);
        input.produto_id = None;
        let err = ItemKit::new(input).unwrap_err();
        match err {
            DomainError::InvalidItemKit(msg) => assert!(msg.contains("without a product")),
            other => panic!("Expected InvalidItemKit, got {other:?}"),
        }
    }

    #[test]
    fn new_item_rejects_own_kit() {
        let mut input = novo(1, 7, 10.0, 8.0);
        input.kit_id = Some(ProdutoId::new(7));
        let err = ItemKit::new(input).unwrap_err();
        match err {
            DomainError::InvalidItemKit(msg) => assert!(msg.contains("own kit")),
            other => panic!("Expected InvalidItemKit, got {other:?}"),
        }
    }

    #[test]
    fn new_item_without_kit_is_valid() {
        let mut input = novo(1, 7, 10.0, 8.0);
        input.kit_id = None;
        let item = ItemKit::new(input).unwrap();
        assert_eq!(item.kit_id(), None);
    }

    #[test]
    fn set_kit_id_rejects_self_reference_and_keeps_state() {
        let mut item = item(1, 7, 10.0, 8.0);
        let err = item.set_kit_id(ProdutoId::new(7)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidItemKit(_)));
        assert_eq!(item.kit_id(), Some(ProdutoId::new(100)));

        item.set_kit_id(ProdutoId::new(200)).unwrap();
        assert_eq!(item.kit_id(), Some(ProdutoId::new(200)));
    }

    #[test]
    fn atualizar_moves_updated_item_to_tail() {
        let mut lista = vec![item(1, 1, 10.0, 6.0), item(2, 2, 10.0, 6.0), item(3, 3, 10.0, 6.0)];
        let mut alvo = lista[0].clone();

        alvo.atualizar(ItemKitDetalhe::new(5, preco(12.0, 9.0)), &mut lista)
            .unwrap();

        assert_eq!(alvo.qtd(), 5);
        assert_eq!(alvo.preco(), &preco(12.0, 9.0));
        assert_eq!(ids(&lista), vec![2, 3, 1]);
        assert_eq!(lista[2], alvo);
    }

    #[test]
    fn atualizar_only_relinks_first_match() {
        let mut lista = vec![item(1, 1, 10.0, 6.0), item(1, 2, 10.0, 6.0), item(3, 3, 10.0, 6.0)];
        let mut alvo = lista[0].clone();

        alvo.atualizar(ItemKitDetalhe::new(2, preco(10.0, 6.0)), &mut lista)
            .unwrap();

        assert_eq!(lista.len(), 3);
        assert_eq!(ids(&lista), vec![1, 3, 1]);
        assert_eq!(lista[0].produto_id(), ProdutoId::new(2));
        assert_eq!(lista[2].produto_id(), ProdutoId::new(1));
    }

    #[test]
    fn atualizar_rejected_update_leaves_item_and_list_untouched() {
        let mut lista = vec![item(1, 1, 8.0, 5.0), item(2, 2, 8.0, 5.0)];
        let before = lista.clone();
        let mut alvo = lista[0].clone();
        let alvo_before = alvo.clone();

        // 8.0 + 8.0 still meets the list minimum; 5.0 + 1.0 breaks the discount one.
        let err = alvo
            .atualizar(ItemKitDetalhe::new(3, preco(8.0, 1.0)), &mut lista)
            .unwrap_err();

        match err {
            DomainError::InvalidItemKitList(msg) => assert!(msg.contains("total discount price")),
            other => panic!("Expected InvalidItemKitList, got {other:?}"),
        }
        assert_eq!(lista, before);
        assert_eq!(alvo, alvo_before);
    }

    #[test]
    fn atualizar_without_match_skips_kit_rules() {
        // This list already breaks the price minimums; with no matching line
        // the update must not evaluate them.
        let mut lista = vec![item(2, 2, 1.0, 1.0)];
        let before = lista.clone();
        let mut alvo = item(9, 9, 1.0, 1.0);

        alvo.atualizar(ItemKitDetalhe::new(4, preco(2.0, 1.0)), &mut lista)
            .unwrap();

        assert_eq!(lista, before);
        assert_eq!(alvo.qtd(), 4);
    }

    #[test]
    fn atualizar_with_empty_list_only_updates_item() {
        let mut lista = Vec::new();
        let mut alvo = item(1, 1, 10.0, 6.0);
        alvo.atualizar(ItemKitDetalhe::new(3, preco(11.0, 7.0)), &mut lista)
            .unwrap();
        assert!(lista.is_empty());
        assert_eq!(alvo.qtd(), 3);
    }

    fn unsaved(produto_id: i64, lista: f64, desconto: f64) -> ItemKit {
        let mut input = novo(0, produto_id, lista, desconto);
        input.id = None;
        ItemKit::new(input).unwrap()
    }

    fn produtos(lista: &[ItemKit]) -> Vec<i64> {
        lista.iter().map(|i| i.produto_id().get()).collect()
    }

    #[test]
    fn unsaved_item_relinks_first_unsaved_line() {
        let mut lista = vec![unsaved(1, 10.0, 6.0), unsaved(2, 10.0, 6.0)];
        let mut alvo = lista[0].clone();

        alvo.atualizar(ItemKitDetalhe::new(3, preco(9.0, 5.0)), &mut lista)
            .unwrap();

        // Both ids are absent, so the first line matches and moves to the tail.
        assert_eq!(produtos(&lista), vec![2, 1]);
        assert_eq!(lista[1], alvo);
        assert_eq!(alvo.qtd(), 3);
    }

    #[test]
    fn unsaved_item_update_is_revalidated() {
        let mut lista = vec![unsaved(1, 10.0, 6.0), unsaved(2, 10.0, 6.0)];
        let before = lista.clone();
        let mut alvo = lista[0].clone();

        // 10.0 + 1.0 is below the list-price minimum.
        let err = alvo
            .atualizar(ItemKitDetalhe::new(1, preco(1.0, 1.0)), &mut lista)
            .unwrap_err();

        match err {
            DomainError::InvalidItemKitList(msg) => assert!(msg.contains("total list price")),
            other => panic!("Expected InvalidItemKitList, got {other:?}"),
        }
        assert_eq!(lista, before);
    }

    #[test]
    fn serializes_every_field_with_wire_names() {
        let mut input = novo(1, 7, 10.0, 8.0);
        input.versao = None;
        let json = serde_json::to_value(ItemKit::new(input).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "versao": null,
                "kitId": 100,
                "produtoId": 7,
                "qtd": 1,
                "preco": { "precoLista": 10.0, "precoDesconto": 8.0 }
            })
        );
    }

    #[test]
    fn deserialization_runs_the_same_rules() {
        let err = serde_json::from_str::<ItemKit>(
            r#"{"kitId": 5, "produtoId": 5, "qtd": 1,
                "preco": {"precoLista": 1.0, "precoDesconto": 1.0}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("own kit"));

        let err = serde_json::from_str::<ItemKit>(
            r#"{"qtd": 1, "preco": {"precoLista": 1.0, "precoDesconto": 1.0}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("without a product"));
    }

    #[test]
    fn assign_identity_sets_id_and_version() {
        let mut input = novo(1, 7, 10.0, 8.0);
        input.id = None;
        input.versao = None;
        let mut item = ItemKit::new(input).unwrap();
        assert!(item.id().is_none());

        item.assign_identity(ItemKitId::new(42), 3);
        assert_eq!(item.id(), Some(&ItemKitId::new(42)));
        assert_eq!(item.versao(), Some(3));
    }
}

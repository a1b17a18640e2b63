use serde::{Deserialize, Serialize};

use catalogo_core::{AggregateRoot, DomainError, DomainResult, Entity, ItemKitId, ProdutoId};

use crate::item_kit::ItemKit;
use crate::value_objects::{Estoque, ItemKitDetalhe, Preco};

/// Minimum length (in characters) of SKU, name and description.
pub const MIN_FIELD_LEN: usize = 3;

/// Input for [`Produto::new`].
///
/// The required text fields are optional here so that a missing value is
/// reported with the domain error kind rather than as a deserialization error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoProduto {
    #[serde(default)]
    pub id: Option<ProdutoId>,
    #[serde(default)]
    pub versao: Option<u64>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub descr: Option<String>,
    #[serde(default)]
    pub url_imagem: Option<String>,
    #[serde(default)]
    pub preco: Option<Preco>,
    #[serde(default)]
    pub estoque: Option<Estoque>,
    #[serde(default)]
    pub kit: Vec<ItemKit>,
}

/// Aggregate root: Produto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NovoProduto")]
pub struct Produto {
    id: Option<ProdutoId>,
    versao: Option<u64>,
    sku: String,
    nome: String,
    descr: String,
    url_imagem: String,
    preco: Option<Preco>,
    estoque: Option<Estoque>,
    kit: Vec<ItemKit>,
}

impl TryFrom<NovoProduto> for Produto {
    type Error = DomainError;

    fn try_from(novo: NovoProduto) -> Result<Self, Self::Error> {
        Produto::new(novo)
    }
}

impl Produto {
    /// Checked construction.
    ///
    /// Rules run in order sku, nome, descr, urlImagem; the first failure is
    /// returned and no product is built. The kit passed in is taken as-is,
    /// use [`Produto::vincular_lista_item_kit`] to attach a validated kit.
    pub fn new(novo: NovoProduto) -> DomainResult<Self> {
        let sku = Self::validar_sku(novo.sku)?;
        let nome = Self::validar_nome(novo.nome)?;
        let descr = Self::validar_descr(novo.descr)?;
        let url_imagem = Self::validar_url_imagem(novo.url_imagem)?;

        Ok(Self {
            id: novo.id,
            versao: novo.versao,
            sku,
            nome,
            descr,
            url_imagem,
            preco: novo.preco,
            estoque: novo.estoque,
            kit: novo.kit,
        })
    }

    pub fn validar_sku(sku: Option<String>) -> DomainResult<String> {
        let sku = sku
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DomainError::invalid_sku("SKU is required"))?;
        if sku.chars().count() < MIN_FIELD_LEN {
            return Err(DomainError::invalid_sku(format!(
                "SKU must have at least {MIN_FIELD_LEN} characters"
            )));
        }
        Ok(sku)
    }

    pub fn validar_nome(nome: Option<String>) -> DomainResult<String> {
        required_text("nome", nome)
    }

    pub fn validar_descr(descr: Option<String>) -> DomainResult<String> {
        required_text("descr", descr)
    }

    /// The URL must start with `http://` or `https://` (case-sensitive).
    pub fn validar_url_imagem(url_imagem: Option<String>) -> DomainResult<String> {
        let url = url_imagem.ok_or_else(|| DomainError::invalid_product("image URL is required"))?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(DomainError::invalid_product(format!("invalid image URL: {url}")));
        }
        Ok(url)
    }

    pub fn id_typed(&self) -> Option<ProdutoId> {
        self.id
    }

    pub fn versao(&self) -> Option<u64> {
        self.versao
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn descr(&self) -> &str {
        &self.descr
    }

    pub fn url_imagem(&self) -> &str {
        &self.url_imagem
    }

    pub fn preco(&self) -> Option<&Preco> {
        self.preco.as_ref()
    }

    pub fn estoque(&self) -> Option<&Estoque> {
        self.estoque.as_ref()
    }

    pub fn kit(&self) -> &[ItemKit] {
        &self.kit
    }

    /// A product is a kit when it is composed of at least one item.
    pub fn is_kit(&self) -> bool {
        !self.kit.is_empty()
    }

    /// Replace the kit without running the kit rules.
    pub fn set_kit(&mut self, kit: Vec<ItemKit>) {
        self.kit = kit;
    }

    /// Validate `lista` as a whole kit and, only if it passes, make it this
    /// product's kit.
    pub fn vincular_lista_item_kit(&mut self, lista: Vec<ItemKit>) -> DomainResult<()> {
        ItemKit::vincular_produto(&lista)?;
        self.kit = lista;
        Ok(())
    }

    /// Update one line of this product's own kit (see [`ItemKit::atualizar`]).
    pub fn atualizar_item_kit(
        &mut self,
        item_id: ItemKitId,
        detalhe: ItemKitDetalhe,
    ) -> DomainResult<()> {
        let mut item = self
            .kit
            .iter()
            .find(|item| item.id() == Some(&item_id))
            .cloned()
            .ok_or_else(|| {
                DomainError::invalid_item_kit(format!("kit item {item_id} is not part of this kit"))
            })?;
        item.atualizar(detalhe, &mut self.kit)
    }

    /// Hook for the persistence collaborator.
    pub fn assign_identity(&mut self, id: ProdutoId, versao: u64) {
        self.id = Some(id);
        self.versao = Some(versao);
    }

    /// Plain key-value projection of every field, `null` where absent.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl AggregateRoot for Produto {
    type Id = ProdutoId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }

    fn version(&self) -> Option<u64> {
        self.versao
    }
}

fn required_text(campo: &str, valor: Option<String>) -> DomainResult<String> {
    let valor = valor
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::invalid_product(format!("field {campo} is required")))?;
    if valor.chars().count() < MIN_FIELD_LEN {
        return Err(DomainError::invalid_product(format!(
            "field {campo} must have at least {MIN_FIELD_LEN} characters"
        )));
    }
    Ok(valor)
}

//! Value objects consumed by the catalog entities.

use serde::{Deserialize, Serialize};

use catalogo_core::{DomainError, DomainResult, ValueObject};

/// List and discount price of a product or of one kit line.
///
/// Always internally consistent: both prices are finite, non-negative, and the
/// discount price never exceeds the list price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PrecoRaw")]
pub struct Preco {
    preco_lista: f64,
    preco_desconto: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrecoRaw {
    preco_lista: f64,
    preco_desconto: f64,
}

impl TryFrom<PrecoRaw> for Preco {
    type Error = DomainError;

    fn try_from(raw: PrecoRaw) -> Result<Self, Self::Error> {
        Preco::new(raw.preco_lista, raw.preco_desconto)
    }
}

impl Preco {
    pub fn new(preco_lista: f64, preco_desconto: f64) -> DomainResult<Self> {
        if !preco_lista.is_finite() || !preco_desconto.is_finite() {
            return Err(DomainError::invalid_price("prices must be finite numbers"));
        }
        if preco_lista < 0.0 || preco_desconto < 0.0 {
            return Err(DomainError::invalid_price("prices cannot be negative"));
        }
        if preco_desconto > preco_lista {
            return Err(DomainError::invalid_price(
                "discount price cannot be greater than list price",
            ));
        }
        Ok(Self {
            preco_lista,
            preco_desconto,
        })
    }

    pub fn preco_lista(&self) -> f64 {
        self.preco_lista
    }

    pub fn preco_desconto(&self) -> f64 {
        self.preco_desconto
    }
}

impl ValueObject for Preco {}

/// Stock counters. Opaque to the kit rules; carried for the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estoque {
    em_estoque: u64,
    reservado: u64,
}

impl Estoque {
    pub fn new(em_estoque: u64, reservado: u64) -> Self {
        Self {
            em_estoque,
            reservado,
        }
    }

    pub fn em_estoque(&self) -> u64 {
        self.em_estoque
    }

    pub fn reservado(&self) -> u64 {
        self.reservado
    }

    /// Units not yet reserved (never below zero).
    pub fn disponivel(&self) -> u64 {
        self.em_estoque.saturating_sub(self.reservado)
    }
}

impl ValueObject for Estoque {}

/// New quantity and price for an existing kit line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemKitDetalhe {
    pub qtd: u32,
    pub preco: Preco,
}

impl ItemKitDetalhe {
    pub fn new(qtd: u32, preco: Preco) -> Self {
        Self { qtd, preco }
    }
}

impl ValueObject for ItemKitDetalhe {}

//! Kit pricing policy (minimum aggregate prices of a kit).

/// Minimum sum of list prices across a kit's lines.
pub const MIN_KIT_LIST_PRICE: f64 = 15.0;

/// Minimum sum of discount prices across a kit's lines.
pub const MIN_KIT_DISCOUNT_PRICE: f64 = 10.0;

/// Environment variable overriding [`MIN_KIT_LIST_PRICE`].
pub const ENV_MIN_LIST_PRICE: &str = "CATALOGO_KIT_MIN_LIST_PRICE";

/// Environment variable overriding [`MIN_KIT_DISCOUNT_PRICE`].
pub const ENV_MIN_DISCOUNT_PRICE: &str = "CATALOGO_KIT_MIN_DISCOUNT_PRICE";

/// Thresholds a kit's summed line prices must meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KitPricingPolicy {
    pub min_list_price: f64,
    pub min_discount_price: f64,
}

impl Default for KitPricingPolicy {
    fn default() -> Self {
        Self {
            min_list_price: MIN_KIT_LIST_PRICE,
            min_discount_price: MIN_KIT_DISCOUNT_PRICE,
        }
    }
}

impl KitPricingPolicy {
    /// Read overrides from the process environment.
    ///
    /// Unset variables keep the default; unparsable ones keep it too, with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`KitPricingPolicy::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            min_list_price: read_threshold(&lookup, ENV_MIN_LIST_PRICE, defaults.min_list_price),
            min_discount_price: read_threshold(
                &lookup,
                ENV_MIN_DISCOUNT_PRICE,
                defaults.min_discount_price,
            ),
        }
    }
}

fn read_threshold(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            tracing::warn!(
                key,
                value = %raw,
                default,
                "invalid kit price threshold; using default"
            );
            default
        }
    }
}

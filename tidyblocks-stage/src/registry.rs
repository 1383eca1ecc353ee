//! Built-in stage variants

use crate::{kinds, plot, stats, transform, Stage};
use std::sync::OnceLock;
use tidyblocks_core::Family;
use tidyblocks_registry::{RegistryError, VariantRegistry};

static REGISTRY: OnceLock<VariantRegistry<Stage>> = OnceLock::new();

/// Process-wide stage registry, built on first use
pub fn registry() -> &'static VariantRegistry<Stage> {
    REGISTRY.get_or_init(|| {
        let registry = standard_registry().expect("built-in stage variants are unique");
        tracing::debug!(variants = registry.len(), "stage registry initialised");
        registry
    })
}

/// Registry holding every transform, plot and statistical test
pub fn standard_registry() -> Result<VariantRegistry<Stage>, RegistryError> {
    let mut registry = VariantRegistry::new(Family::Stage, &kinds::ALL);
    transform::register(&mut registry)?;
    plot::register(&mut registry)?;
    stats::register(&mut registry)?;
    Ok(registry)
}

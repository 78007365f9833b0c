use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    assets::decode,
    config::model::{DeviceVariant, EngineConfig},
    foundation::{
        core::Canvas,
        error::{DevframeError, DevframeResult},
    },
    raster::premul::PremulImage,
};

#[derive(Clone, Debug)]
/// Decoded bezel artwork for one device variant.
pub struct FrameAsset {
    /// Variant the artwork belongs to.
    pub variant: DeviceVariant,
    /// File the artwork was read from.
    pub path: PathBuf,
    /// Native pixel dimensions.
    pub size: Canvas,
    /// Premultiplied pixels.
    pub image: PremulImage,
}

#[derive(Default)]
struct Slots {
    assets: HashMap<DeviceVariant, Arc<FrameAsset>>,
    decodes: HashMap<DeviceVariant, u64>,
}

/// Read-many/write-once cache of decoded frame assets.
///
/// Assets load lazily on first use (or eagerly via [`FrameAssetCache::preload_all`]) and are
/// immutable afterwards. Decoding happens outside the lock; when two callers race on the same
/// variant the first inserted asset wins and both observe it.
pub struct FrameAssetCache {
    config: Arc<EngineConfig>,
    slots: RwLock<Slots>,
}

impl FrameAssetCache {
    /// Empty cache resolving frame paths through `config`.
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            config,
            slots: RwLock::new(Slots::default()),
        }
    }

    /// Frame asset for `variant`, loading it on first use.
    #[tracing::instrument(skip(self))]
    pub fn get(&self, variant: DeviceVariant) -> DevframeResult<Arc<FrameAsset>> {
        if let Some(asset) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .assets
            .get(&variant)
        {
            return Ok(Arc::clone(asset));
        }

        let loaded = Arc::new(self.load(variant)?);

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        *slots.decodes.entry(variant).or_default() += 1;
        Ok(Arc::clone(slots.assets.entry(variant).or_insert(loaded)))
    }

    /// Load every configured variant now, failing on the first unusable asset.
    pub fn preload_all(&self) -> DevframeResult<Vec<Arc<FrameAsset>>> {
        self.config
            .devices
            .keys()
            .map(|&variant| self.get(variant))
            .collect()
    }

    /// How many times the asset for `variant` has been decoded from disk.
    pub fn decode_count(&self, variant: DeviceVariant) -> u64 {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .decodes
            .get(&variant)
            .copied()
            .unwrap_or(0)
    }

    fn load(&self, variant: DeviceVariant) -> DevframeResult<FrameAsset> {
        let path = self.config.frame_path(variant)?;
        let bytes = std::fs::read(&path)
            .map_err(|e| DevframeError::asset_missing(&path, e.to_string()))?;
        let size = decode::probe_dimensions(&bytes).map_err(|e| {
            DevframeError::asset_missing(&path, format!("not a readable image: {e}"))
        })?;
        let image = decode::decode_premul(&bytes).map_err(|e| {
            DevframeError::asset_missing(&path, format!("not a readable image: {e}"))
        })?;

        tracing::debug!(
            %variant,
            path = %path.display(),
            width = size.width,
            height = size.height,
            "loaded frame asset"
        );
        Ok(FrameAsset {
            variant,
            path,
            size,
            image,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;

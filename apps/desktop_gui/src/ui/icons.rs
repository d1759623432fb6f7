//! Per-coin logo textures, keyed by coin id.

use std::collections::HashMap;

use eframe::egui;
use shared::domain::CoinId;

use crate::backend_bridge::icons::IconImage;

pub enum IconSlot {
    Requested,
    /// Decoded on the backend, waiting for a frame to upload it.
    Decoded(IconImage),
    Ready(egui::TextureHandle),
    Failed,
}

#[derive(Default)]
pub struct IconCache {
    slots: HashMap<CoinId, IconSlot>,
}

impl IconCache {
    /// True until a download has been queued for `id`.
    pub fn wants(&self, id: &str) -> bool {
        !self.slots.contains_key(id)
    }

    pub fn mark_requested(&mut self, id: CoinId) {
        self.slots.insert(id, IconSlot::Requested);
    }

    pub fn store(&mut self, id: CoinId, result: Result<IconImage, String>) {
        let slot = match result {
            Ok(image) => IconSlot::Decoded(image),
            Err(_) => IconSlot::Failed,
        };
        self.slots.insert(id, slot);
    }

    pub fn slot(&self, id: &str) -> Option<&IconSlot> {
        self.slots.get(id)
    }

    /// Turns every decoded logo into a texture.
    pub fn upload(&mut self, ctx: &egui::Context) {
        for (id, slot) in self.slots.iter_mut() {
            if let IconSlot::Decoded(image) = slot {
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(image.size, &image.rgba);
                let texture = ctx.load_texture(
                    format!("coin-icon:{id}"),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                *slot = IconSlot::Ready(texture);
            }
        }
    }

    pub fn texture_id(&self, id: &str) -> Option<egui::TextureId> {
        match self.slots.get(id) {
            Some(IconSlot::Ready(texture)) => Some(texture.id()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_dot() -> IconImage {
        IconImage {
            size: [1, 1],
            rgba: vec![255, 0, 0, 255],
        }
    }

    #[test]
    fn requested_icons_are_not_wanted_again() {
        let mut cache = IconCache::default();
        assert!(cache.wants("bitcoin"));
        cache.mark_requested(CoinId::new("bitcoin"));
        assert!(!cache.wants("bitcoin"));
        assert!(cache.texture_id("bitcoin").is_none());
    }

    #[test]
    fn failed_icons_stay_failed() {
        let mut cache = IconCache::default();
        cache.mark_requested(CoinId::new("dogecoin"));
        cache.store(CoinId::new("dogecoin"), Err("404".into()));
        assert!(matches!(cache.slot("dogecoin"), Some(IconSlot::Failed)));
        assert!(!cache.wants("dogecoin"));
    }

    #[test]
    fn upload_turns_decoded_icons_into_textures() {
        let ctx = egui::Context::default();
        let mut cache = IconCache::default();
        cache.store(CoinId::new("bitcoin"), Ok(red_dot()));
        assert!(cache.texture_id("bitcoin").is_none());

        cache.upload(&ctx);
        assert!(matches!(cache.slot("bitcoin"), Some(IconSlot::Ready(_))));
        assert!(cache.texture_id("bitcoin").is_some());
    }
}

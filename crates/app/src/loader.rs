//! Static dataset loading.
//!
//! Each configured GeoJSON file gets a shared text slot; a background task
//! (thread pool on native, `fetch` on WASM) fills the slot and a poll system
//! drains it into the [`GeoDataStore`]. A failed or malformed source logs an
//! error and leaves its slot unloaded; the rest of the viewer keeps working
//! with whatever did load.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use geodata::{DataSources, FeatureCollection};
use rendering::GeoDataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Roads,
    Crossings,
    Band(usize),
}

/// Shared slot used to bridge async text loads -> ECS world.
type TextSlot = Arc<Mutex<Option<Result<String, String>>>>;

struct PendingLoad {
    kind: SourceKind,
    path: String,
    slot: TextSlot,
}

#[derive(Resource)]
pub struct LoadQueue {
    pending: Vec<PendingLoad>,
}

impl LoadQueue {
    /// One pending load per configured source file.
    pub fn for_sources(sources: &DataSources) -> Self {
        let mut pending = vec![
            PendingLoad {
                kind: SourceKind::Roads,
                path: sources.roads.clone(),
                slot: TextSlot::default(),
            },
            PendingLoad {
                kind: SourceKind::Crossings,
                path: sources.crossings.clone(),
                slot: TextSlot::default(),
            },
        ];
        for (index, band) in sources.bands.iter().enumerate() {
            pending.push(PendingLoad {
                kind: SourceKind::Band(index),
                path: band.path.clone(),
                slot: TextSlot::default(),
            });
        }
        Self { pending }
    }
}

/// Data files live under the asset root, next to the basemap tiles.
fn asset_url(path: &str) -> String {
    format!("assets/{}", path)
}

/// Startup system: kick off every source load.
pub fn begin_data_loads(queue: Res<LoadQueue>) {
    for entry in &queue.pending {
        let url = asset_url(&entry.path);
        let slot = entry.slot.clone();

        #[cfg(not(target_arch = "wasm32"))]
        bevy::tasks::IoTaskPool::get()
            .spawn(async move {
                let result = std::fs::read_to_string(&url)
                    .map_err(|e| format!("read {} failed: {}", url, e));
                if let Ok(mut guard) = slot.lock() {
                    *guard = Some(result);
                }
            })
            .detach();

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_text(&url).await;
            if let Ok(mut guard) = slot.lock() {
                *guard = Some(result);
            }
        });
    }
}

/// Parse one completed load and store the collection. A parse failure only
/// costs that one source.
fn apply_result(
    kind: SourceKind,
    path: &str,
    result: Result<String, String>,
    store: &mut GeoDataStore,
) {
    let contents = match result {
        Ok(contents) => contents,
        Err(e) => {
            error!("Failed to load '{}': {}", path, e);
            return;
        }
    };
    match FeatureCollection::from_json(&contents) {
        Ok(collection) => {
            info!("Loaded '{}': {} features", path, collection.len());
            match kind {
                SourceKind::Roads => store.set_roads(collection),
                SourceKind::Crossings => store.set_crossings(collection),
                SourceKind::Band(index) => store.set_band(index, collection),
            }
        }
        Err(e) => {
            error!("Failed to parse '{}': {}", path, e);
        }
    }
}

/// Poll the text slots and move finished loads into the store.
pub fn poll_data_loads(mut queue: ResMut<LoadQueue>, mut store: ResMut<GeoDataStore>) {
    queue.pending.retain(|entry| {
        let Ok(mut slot) = entry.slot.lock() else {
            return false;
        };
        let Some(result) = slot.take() else {
            return true;
        };
        apply_result(entry.kind, &entry.path, result, &mut store);
        false
    });
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch failed: {:?}", e))?;

    let response: web_sys::Response = response_value
        .dyn_into()
        .map_err(|_| "failed to cast fetch response".to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {} while fetching {}", response.status(), url));
    }

    let text_promise = response
        .text()
        .map_err(|e| format!("response.text() failed: {:?}", e))?;
    let text_value = JsFuture::from(text_promise)
        .await
        .map_err(|e| format!("await response text failed: {:?}", e))?;
    text_value
        .as_string()
        .ok_or_else(|| "response text was not a string".to_string())
}

//! Per-list thumbnail loading.
//!
//! Each list refresh starts a new epoch. Requests carry the epoch they were
//! issued in, and a completion only materializes an image handle when that
//! epoch is still current and the list is still mounted. Handles from a
//! previous item set are released on refresh, on unmount and on drop.

use futures::stream::{FuturesUnordered, StreamExt};
use rarebooks_catalog::{BookId, BookSummary};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::api::ImageData;
use crate::{ApiError, Epoch, SearchApi};

/// Turns fetched bytes into something an `<img>` can point at.
pub trait ImageFactory {
    type Handle: Clone;

    fn create(&self, image: &ImageData) -> Result<Self::Handle, String>;

    /// Give back resources held by a handle.
    fn release(&self, handle: Self::Handle);
}

/// One image to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    pub epoch: Epoch,
    pub book_id: BookId,
    pub image_name: String,
}

/// What a completion did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailUpdate {
    Loaded,
    /// Superseded or unmounted; nothing changed.
    Stale,
    /// The image could not be loaded. `first` is set for the first failure of
    /// the current item set, which is the one that should surface a notice.
    Failed { first: bool },
}

/// Image handles for the books of one mounted list, keyed by book id.
///
/// Results are accepted only for the current epoch; handles are released on
/// refresh, on unmount and on drop.
pub struct ThumbnailCache<F: ImageFactory> {
    factory: F,
    epoch: Epoch,
    mounted: bool,
    handles: HashMap<BookId, F::Handle>,
    pending: HashSet<BookId>,
    warned: bool,
}

impl<F: ImageFactory> ThumbnailCache<F> {
    /// An empty, mounted cache creating handles with `factory`.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            epoch: Epoch::default(),
            mounted: true,
            handles: HashMap::new(),
            pending: HashSet::new(),
            warned: false,
        }
    }

    /// Start over for a new item set and return the images to fetch.
    pub fn refresh(&mut self, items: &[BookSummary]) -> Vec<ThumbnailRequest> {
        let epoch = self.epoch.advance();
        self.release_all();
        self.pending.clear();
        self.warned = false;

        if !self.mounted {
            return Vec::new();
        }

        items
            .iter()
            .filter(|item| item.has_preview())
            .filter_map(|item| {
                let name = item.first_image_name.clone()?;
                self.pending.insert(item.id).then(|| ThumbnailRequest {
                    epoch,
                    book_id: item.id,
                    image_name: name,
                })
            })
            .collect()
    }

    /// Apply a finished fetch.
    pub fn complete(
        &mut self,
        request: &ThumbnailRequest,
        result: Result<ImageData, ApiError>,
    ) -> ThumbnailUpdate {
        if !self.mounted || request.epoch != self.epoch || !self.pending.remove(&request.book_id) {
            return ThumbnailUpdate::Stale;
        }

        let created = result
            .map_err(|e| e.to_string())
            .and_then(|image| self.factory.create(&image));

        match created {
            Ok(handle) => {
                if let Some(old) = self.handles.insert(request.book_id, handle) {
                    self.factory.release(old);
                }
                ThumbnailUpdate::Loaded
            }
            Err(reason) => {
                let first = !self.warned;
                self.warned = true;
                if first {
                    warn!(book_id = %request.book_id, image = %request.image_name, %reason, "preview unavailable");
                } else {
                    debug!(book_id = %request.book_id, image = %request.image_name, %reason, "preview unavailable");
                }
                ThumbnailUpdate::Failed { first }
            }
        }
    }

    /// Cancel outstanding fetches and release every handle.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.epoch.advance();
        self.pending.clear();
        self.release_all();
    }

    pub fn get(&self, book_id: BookId) -> Option<&F::Handle> {
        self.handles.get(&book_id)
    }

    pub fn is_pending(&self, book_id: BookId) -> bool {
        self.pending.contains(&book_id)
    }

    /// Some preview of the current item set failed.
    pub fn has_warning(&self) -> bool {
        self.warned
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    fn release_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            self.factory.release(handle);
        }
    }
}

impl<F: ImageFactory> Drop for ThumbnailCache<F> {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// Fetch all requested images concurrently, reporting each one as it
/// finishes. A failing image does not hold up the others.
pub async fn load_thumbnails(
    api: &dyn SearchApi,
    requests: Vec<ThumbnailRequest>,
    mut on_complete: impl FnMut(ThumbnailRequest, Result<ImageData, ApiError>),
) {
    let mut in_flight: FuturesUnordered<_> = requests
        .into_iter()
        .map(|request| async move {
            let result = api.book_image(request.book_id, &request.image_name).await;
            (request, result)
        })
        .collect();

    while let Some((request, result)) = in_flight.next().await {
        on_complete(request, result);
    }
}

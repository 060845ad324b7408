//! Optimistic gallery editing.
//!
//! Every mutation follows the same contract:
//!
//! 1. snapshot the displayed state and apply the change locally;
//! 2. send the mutation;
//! 3. on success, refetch the authoritative image list;
//! 4. on failure, restore the snapshot.
//!
//! A busy indicator is raised while a request is in flight. It is
//! informational only; concurrent gestures are not serialized.

use std::sync::{Arc, Mutex, MutexGuard};

use showroom_core::categorization::{partition, PartitionedImages, SortOrderUpdate};
use showroom_core::image_type::{GalleryBucket, ImageType};
use showroom_core::reorder::{locate, plan_drag, DragEnd, DragPlan, ImageLocation, NoOpReason};
use showroom_core::types::DbId;
use tokio::sync::watch;

use crate::api::GalleryApi;
use crate::error::ClientError;
use crate::model::GalleryImage;

/// What the busy indicator is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyKind {
    Reordering,
    Deleting,
}

/// What a drag gesture ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    NoOp(NoOpReason),
    Reordered {
        bucket: GalleryBucket,
        updates: Vec<SortOrderUpdate>,
    },
    Recategorized {
        image_id: DbId,
        to: ImageType,
    },
}

/// Raises the busy indicator for its lifetime.
struct BusyGuard<'a> {
    busy: &'a watch::Sender<Option<BusyKind>>,
}

impl<'a> BusyGuard<'a> {
    fn raise(busy: &'a watch::Sender<Option<BusyKind>>, kind: BusyKind) -> Self {
        busy.send_replace(Some(kind));
        Self { busy }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.send_replace(None);
    }
}

/// Local view of one vehicle's images plus the mutations a gallery editor
/// performs on it.
pub struct GalleryController {
    api: Arc<dyn GalleryApi>,
    vehicle_id: DbId,
    images: Mutex<PartitionedImages<GalleryImage>>,
    busy: watch::Sender<Option<BusyKind>>,
}

impl GalleryController {
    /// Create a controller with an empty local state. Call
    /// [`refresh`](Self::refresh) to load it.
    pub fn new(api: Arc<dyn GalleryApi>, vehicle_id: DbId) -> Self {
        Self::with_images(api, vehicle_id, Vec::new())
    }

    /// Create a controller seeded with already-fetched images.
    pub fn with_images(
        api: Arc<dyn GalleryApi>,
        vehicle_id: DbId,
        images: Vec<GalleryImage>,
    ) -> Self {
        let (busy, _) = watch::channel(None);
        Self {
            api,
            vehicle_id,
            images: Mutex::new(partition(images)),
            busy,
        }
    }

    pub fn vehicle_id(&self) -> DbId {
        self.vehicle_id
    }

    /// Current displayed state.
    pub fn images(&self) -> PartitionedImages<GalleryImage> {
        self.lock().clone()
    }

    pub fn busy(&self) -> Option<BusyKind> {
        *self.busy.borrow()
    }

    /// Watch the busy indicator.
    pub fn subscribe_busy(&self) -> watch::Receiver<Option<BusyKind>> {
        self.busy.subscribe()
    }

    /// Replace the local state with the server's image list.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let images = self.api.list_images(self.vehicle_id).await?;
        *self.lock() = partition(images);
        Ok(())
    }

    /// Handle the end of a drag gesture.
    ///
    /// Returns the error of the failed request after restoring the
    /// pre-drag state.
    pub async fn handle_drag_end(&self, drag: DragEnd) -> Result<DragOutcome, ClientError> {
        let (plan, snapshot) = {
            let mut images = self.lock();
            let plan = plan_drag(&*images, drag);
            let snapshot = images.clone();
            apply_plan(&mut images, &plan);
            (plan, snapshot)
        };

        match plan {
            DragPlan::NoOp(reason) => {
                tracing::trace!(source_id = drag.source_id, ?reason, "Drag ignored");
                Ok(DragOutcome::NoOp(reason))
            }
            DragPlan::Reorder {
                bucket, updates, ..
            } => {
                let _busy = BusyGuard::raise(&self.busy, BusyKind::Reordering);
                let result = self.api.reorder_images(self.vehicle_id, &updates).await;
                self.settle(result, snapshot, "reorder").await?;
                Ok(DragOutcome::Reordered { bucket, updates })
            }
            DragPlan::Recategorize { image_id, to } => {
                let _busy = BusyGuard::raise(&self.busy, BusyKind::Reordering);
                let result = self
                    .api
                    .update_image_type(self.vehicle_id, image_id, to)
                    .await;
                self.settle(result, snapshot, "recategorize").await?;
                Ok(DragOutcome::Recategorized { image_id, to })
            }
        }
    }

    /// Delete an image: remove it locally (closing the gap in its gallery
    /// bucket), then delete it on the server.
    pub async fn delete_image(&self, image_id: DbId) -> Result<(), ClientError> {
        let snapshot = {
            let mut images = self.lock();
            let snapshot = images.clone();
            remove_image(&mut images, image_id);
            snapshot
        };

        let _busy = BusyGuard::raise(&self.busy, BusyKind::Deleting);
        let result = self.api.delete_image(self.vehicle_id, image_id).await;
        self.settle(result, snapshot, "delete").await
    }

    /// Finish a mutation: refetch on success, restore `snapshot` on failure.
    async fn settle(
        &self,
        result: Result<(), ClientError>,
        snapshot: PartitionedImages<GalleryImage>,
        action: &'static str,
    ) -> Result<(), ClientError> {
        if let Err(e) = result {
            tracing::error!(
                vehicle_id = self.vehicle_id,
                action,
                error = %e,
                "Gallery update failed; restoring",
            );
            *self.lock() = snapshot;
            return Err(e);
        }
        // The mutation landed; a failed refetch keeps the optimistic state.
        if let Err(e) = self.refresh().await {
            tracing::warn!(
                vehicle_id = self.vehicle_id,
                action,
                error = %e,
                "Refetch after update failed",
            );
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, PartitionedImages<GalleryImage>> {
        self.images.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Apply a drag plan to the displayed state.
fn apply_plan(images: &mut PartitionedImages<GalleryImage>, plan: &DragPlan) {
    match plan {
        DragPlan::NoOp(_) => {}
        DragPlan::Reorder { bucket, updates, .. } => {
            let items = images.gallery.bucket_mut(*bucket);
            for image in items.iter_mut() {
                if let Some(update) = updates.iter().find(|u| u.id == image.id) {
                    image.sort_order = update.sort_order;
                }
            }
            items.sort_by_key(|image| image.sort_order);
        }
        DragPlan::Recategorize { image_id, to } => {
            if let Some(mut image) = remove_image(images, *image_id) {
                image.image_type = *to;
                match *to {
                    ImageType::Key(key) => {
                        image.sort_order = 0;
                        images.key_images.insert(key, image);
                    }
                    ImageType::Gallery(bucket) => {
                        let items = images.gallery.bucket_mut(bucket);
                        image.sort_order = items.len() as i32;
                        items.push(image);
                    }
                }
            }
        }
    }
}

/// Take `image_id` out of the state, renumbering its gallery bucket.
fn remove_image(
    images: &mut PartitionedImages<GalleryImage>,
    image_id: DbId,
) -> Option<GalleryImage> {
    match locate(&*images, image_id)? {
        ImageLocation::Key(key) => images.key_images.remove(key),
        ImageLocation::Gallery { bucket, index } => {
            let items = images.gallery.bucket_mut(bucket);
            let removed = items.remove(index);
            for (i, image) in items.iter_mut().enumerate() {
                image.sort_order = i as i32;
            }
            Some(removed)
        }
    }
}

//! Drag-and-drop planning for the gallery editor.
//!
//! Turns a finished drag gesture into one of three outcomes: nothing, a
//! reorder inside one gallery bucket, or a move of the dragged image to
//! another gallery bucket. Key images are fixed slots and never take part
//! in ordering.

use crate::categorization::{
    array_move, renumber, CategorizedImage, PartitionedImages, SortOrderUpdate,
};
use crate::image_type::{
    GalleryBucket, ImageType, KeyImageType, GALLERY_BUCKETS, KEY_IMAGE_SEQUENCE,
};
use crate::types::DbId;

/// What the pointer was over when the drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Image(DbId),
    /// A bucket container (for example an empty bucket), not an image.
    Bucket(GalleryBucket),
}

/// A finished drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub source_id: DbId,
    pub target: Option<DropTarget>,
}

/// Why a drag results in no change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    NoTarget,
    TargetNotImage,
    SameImage,
    UnknownImage,
    KeyImage,
}

/// Outcome of a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPlan {
    NoOp(NoOpReason),
    /// Array-move inside `bucket`; `updates` renumbers the whole bucket.
    Reorder {
        bucket: GalleryBucket,
        from: usize,
        to: usize,
        updates: Vec<SortOrderUpdate>,
    },
    /// Change the dragged image's type to the target's bucket.
    Recategorize { image_id: DbId, to: ImageType },
}

/// Where an image sits in a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLocation {
    Key(KeyImageType),
    Gallery { bucket: GalleryBucket, index: usize },
}

/// Find `id` among the key slots and gallery buckets.
pub fn locate<T: CategorizedImage>(
    images: &PartitionedImages<T>,
    id: DbId,
) -> Option<ImageLocation> {
    for key in KEY_IMAGE_SEQUENCE {
        if images.key_images.get(key).is_some_and(|i| i.image_id() == id) {
            return Some(ImageLocation::Key(key));
        }
    }
    for bucket in GALLERY_BUCKETS {
        if let Some(index) = images
            .gallery
            .bucket(bucket)
            .iter()
            .position(|i| i.image_id() == id)
        {
            return Some(ImageLocation::Gallery { bucket, index });
        }
    }
    None
}

/// Decide what a drag gesture does to the current (displayed) state.
pub fn plan_drag<T: CategorizedImage>(images: &PartitionedImages<T>, drag: DragEnd) -> DragPlan {
    let target_id = match drag.target {
        None => return DragPlan::NoOp(NoOpReason::NoTarget),
        Some(DropTarget::Bucket(_)) => return DragPlan::NoOp(NoOpReason::TargetNotImage),
        Some(DropTarget::Image(id)) => id,
    };
    if target_id == drag.source_id {
        return DragPlan::NoOp(NoOpReason::SameImage);
    }

    let (Some(source), Some(target)) = (
        locate(images, drag.source_id),
        locate(images, target_id),
    ) else {
        return DragPlan::NoOp(NoOpReason::UnknownImage);
    };

    match (source, target) {
        (
            ImageLocation::Gallery {
                bucket: source_bucket,
                index: from,
            },
            ImageLocation::Gallery {
                bucket: target_bucket,
                index: to,
            },
        ) => {
            if source_bucket == target_bucket {
                let mut order: Vec<&T> = images.gallery.bucket(source_bucket).iter().collect();
                if array_move(&mut order, from, to).is_err() {
                    return DragPlan::NoOp(NoOpReason::UnknownImage);
                }
                let updates = order
                    .iter()
                    .enumerate()
                    .map(|(i, image)| SortOrderUpdate {
                        id: image.image_id(),
                        sort_order: i as i32,
                    })
                    .collect();
                DragPlan::Reorder {
                    bucket: source_bucket,
                    from,
                    to,
                    updates,
                }
            } else {
                DragPlan::Recategorize {
                    image_id: drag.source_id,
                    to: ImageType::Gallery(target_bucket),
                }
            }
        }
        _ => DragPlan::NoOp(NoOpReason::KeyImage),
    }
}

/// Renumbered sort orders for `bucket` as currently displayed.
pub fn bucket_updates<T: CategorizedImage>(
    images: &PartitionedImages<T>,
    bucket: GalleryBucket,
) -> Vec<SortOrderUpdate> {
    renumber(images.gallery.bucket(bucket))
}

//! Key-slot / gallery partitioning and sort-order bookkeeping.
//!
//! A vehicle's photos split into six optional key slots and three ordered
//! gallery buckets. Gallery `sort_order` values are kept as a contiguous
//! 0-based sequence per bucket: every operation here that inserts, moves or
//! removes a gallery image returns the full set of order changes needed to
//! restore that invariant, and the repository layer applies them in a single
//! transaction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::image_type::{GalleryBucket, ImageType, KeyImageType, KEY_IMAGE_SEQUENCE};
use crate::types::DbId;

/// Anything that carries the fields the categorization rules look at.
pub trait CategorizedImage {
    fn image_id(&self) -> DbId;
    fn image_type(&self) -> ImageType;
    fn sort_order(&self) -> i32;
}

/// New sort order for one image. Wire shape of the reorder request items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOrderUpdate {
    pub id: DbId,
    pub sort_order: i32,
}

// ---------------------------------------------------------------------------
// Partition
// ---------------------------------------------------------------------------

/// One optional occupant per key type.
#[derive(Debug, Clone, Serialize)]
pub struct KeySlots<T> {
    pub front_quarter: Option<T>,
    pub front: Option<T>,
    pub back_quarter: Option<T>,
    pub back: Option<T>,
    pub driver_side: Option<T>,
    pub passenger_side: Option<T>,
}

impl<T> Default for KeySlots<T> {
    fn default() -> Self {
        Self {
            front_quarter: None,
            front: None,
            back_quarter: None,
            back: None,
            driver_side: None,
            passenger_side: None,
        }
    }
}

impl<T> KeySlots<T> {
    pub fn get(&self, key: KeyImageType) -> Option<&T> {
        match key {
            KeyImageType::FrontQuarter => self.front_quarter.as_ref(),
            KeyImageType::Front => self.front.as_ref(),
            KeyImageType::BackQuarter => self.back_quarter.as_ref(),
            KeyImageType::Back => self.back.as_ref(),
            KeyImageType::DriverSide => self.driver_side.as_ref(),
            KeyImageType::PassengerSide => self.passenger_side.as_ref(),
        }
    }

    fn slot_mut(&mut self, key: KeyImageType) -> &mut Option<T> {
        match key {
            KeyImageType::FrontQuarter => &mut self.front_quarter,
            KeyImageType::Front => &mut self.front,
            KeyImageType::BackQuarter => &mut self.back_quarter,
            KeyImageType::Back => &mut self.back,
            KeyImageType::DriverSide => &mut self.driver_side,
            KeyImageType::PassengerSide => &mut self.passenger_side,
        }
    }

    /// Put `image` in the slot, returning any previous occupant.
    pub fn insert(&mut self, key: KeyImageType, image: T) -> Option<T> {
        self.slot_mut(key).replace(image)
    }

    /// Empty the slot, returning its occupant.
    pub fn remove(&mut self, key: KeyImageType) -> Option<T> {
        self.slot_mut(key).take()
    }

    /// Occupied slots in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = (KeyImageType, &T)> + '_ {
        KEY_IMAGE_SEQUENCE
            .into_iter()
            .filter_map(move |key| self.get(key).map(|image| (key, image)))
    }

    /// Empty slots in sequence order.
    pub fn empty_slots(&self) -> Vec<KeyImageType> {
        KEY_IMAGE_SEQUENCE
            .into_iter()
            .filter(|key| self.get(*key).is_none())
            .collect()
    }
}

/// Gallery images split by bucket, each ordered by `sort_order`.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryBuckets<T> {
    pub exterior: Vec<T>,
    pub interior: Vec<T>,
    pub uncategorized: Vec<T>,
}

impl<T> Default for GalleryBuckets<T> {
    fn default() -> Self {
        Self {
            exterior: Vec::new(),
            interior: Vec::new(),
            uncategorized: Vec::new(),
        }
    }
}

impl<T> GalleryBuckets<T> {
    pub fn bucket(&self, bucket: GalleryBucket) -> &[T] {
        match bucket {
            GalleryBucket::Exterior => &self.exterior,
            GalleryBucket::Interior => &self.interior,
            GalleryBucket::Uncategorized => &self.uncategorized,
        }
    }

    pub fn bucket_mut(&mut self, bucket: GalleryBucket) -> &mut Vec<T> {
        match bucket {
            GalleryBucket::Exterior => &mut self.exterior,
            GalleryBucket::Interior => &mut self.interior,
            GalleryBucket::Uncategorized => &mut self.uncategorized,
        }
    }

    pub fn len(&self) -> usize {
        self.exterior.len() + self.interior.len() + self.uncategorized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A vehicle's images split into key slots and gallery buckets.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionedImages<T> {
    pub key_images: KeySlots<T>,
    pub gallery: GalleryBuckets<T>,
}

/// Split `images` into key slots and sorted gallery buckets.
///
/// Two images claiming the same key slot should not exist (the database
/// rejects it), but if they do the one that comes later in `images` wins.
/// Gallery buckets are stably sorted by `sort_order`.
pub fn partition<T: CategorizedImage>(images: Vec<T>) -> PartitionedImages<T> {
    let mut key_images = KeySlots::default();
    let mut gallery = GalleryBuckets::default();

    for image in images {
        match image.image_type() {
            ImageType::Key(key) => {
                key_images.insert(key, image);
            }
            ImageType::Gallery(bucket) => gallery.bucket_mut(bucket).push(image),
        }
    }

    for bucket in [
        &mut gallery.exterior,
        &mut gallery.interior,
        &mut gallery.uncategorized,
    ] {
        bucket.sort_by_key(|image| image.sort_order());
    }

    PartitionedImages {
        key_images,
        gallery,
    }
}

// ---------------------------------------------------------------------------
// Ordering primitives
// ---------------------------------------------------------------------------

/// Remove the item at `from` and reinsert it at `to`.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), CoreError> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(CoreError::Validation(format!(
            "Move {from} -> {to} is out of range for {len} items"
        )));
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

/// Assign `0..n-1` to `items` in their current order.
pub fn renumber<T: CategorizedImage>(items: &[T]) -> Vec<SortOrderUpdate> {
    items
        .iter()
        .enumerate()
        .map(|(i, image)| SortOrderUpdate {
            id: image.image_id(),
            sort_order: i as i32,
        })
        .collect()
}

/// Sort order for an image appended to a bucket of `bucket_len` items.
pub fn next_sort_order(bucket_len: usize) -> i32 {
    bucket_len as i32
}

/// Returns `true` if `orders` is exactly `{0, 1, ..., n-1}`.
pub fn is_contiguous(orders: &[i32]) -> bool {
    let mut sorted = orders.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(i, order)| *order == i as i32)
}

/// Move `from` to `to` within one ordered bucket and renumber it.
///
/// Returns the bucket in its new order together with the sort order of
/// every item in it.
pub fn reorder_bucket<T: CategorizedImage + Clone>(
    bucket: &[T],
    from: usize,
    to: usize,
) -> Result<(Vec<T>, Vec<SortOrderUpdate>), CoreError> {
    let mut reordered = bucket.to_vec();
    array_move(&mut reordered, from, to)?;
    let updates = renumber(&reordered);
    Ok((reordered, updates))
}

/// Check a client-submitted reorder of one gallery bucket.
///
/// The update list must name every image in the bucket exactly once and the
/// new orders must be exactly `0..n-1`.
pub fn validate_bucket_reorder(
    bucket_ids: &[DbId],
    updates: &[SortOrderUpdate],
) -> Result<(), CoreError> {
    if updates.is_empty() {
        return Err(CoreError::Validation(
            "Reorder request contains no image updates".into(),
        ));
    }

    let expected: HashSet<DbId> = bucket_ids.iter().copied().collect();
    let mut seen = HashSet::with_capacity(updates.len());
    for update in updates {
        if !seen.insert(update.id) {
            return Err(CoreError::Validation(format!(
                "Image {} appears more than once in the reorder request",
                update.id
            )));
        }
        if !expected.contains(&update.id) {
            return Err(CoreError::Validation(format!(
                "Image {} is not part of the gallery bucket being reordered",
                update.id
            )));
        }
    }
    if seen.len() != expected.len() {
        return Err(CoreError::Validation(format!(
            "Reorder request must include all {} images of the bucket, got {}",
            expected.len(),
            seen.len()
        )));
    }

    let orders: Vec<i32> = updates.iter().map(|u| u.sort_order).collect();
    if !is_contiguous(&orders) {
        return Err(CoreError::Validation(
            "Sort orders must be a contiguous sequence starting at 0".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Upload assignment
// ---------------------------------------------------------------------------

/// Type and position assigned to one uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadAssignment {
    pub image_type: ImageType,
    pub sort_order: i32,
}

/// Assign types to `count` uploads, in upload order.
///
/// Uploads fill the empty key slots in [`KEY_IMAGE_SEQUENCE`] order first;
/// the rest are appended to `gallery_bucket` after its current
/// `gallery_len` images. Key images always get sort order 0.
pub fn assign_upload_types(
    empty_slots: &[KeyImageType],
    gallery_bucket: GalleryBucket,
    gallery_len: usize,
    count: usize,
) -> Vec<UploadAssignment> {
    let mut slots: Vec<KeyImageType> = empty_slots.to_vec();
    slots.sort_by_key(|key| key.slot_index());
    slots.dedup();

    let mut next_gallery = gallery_len;
    (0..count)
        .map(|i| match slots.get(i) {
            Some(key) => UploadAssignment {
                image_type: ImageType::Key(*key),
                sort_order: 0,
            },
            None => {
                let sort_order = next_sort_order(next_gallery);
                next_gallery += 1;
                UploadAssignment {
                    image_type: ImageType::Gallery(gallery_bucket),
                    sort_order,
                }
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Recategorize / delete plans
// ---------------------------------------------------------------------------

/// Writes needed to move one image to a new type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecategorizePlan {
    pub image_id: DbId,
    pub from: ImageType,
    pub to: ImageType,
    /// Sort order of the image in its destination.
    pub sort_order: i32,
    /// Renumbering of the bucket the image left (only changed rows).
    pub sibling_updates: Vec<SortOrderUpdate>,
}

impl RecategorizePlan {
    /// `true` when the image already has the requested type.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Plan moving `image_id` to `to`.
///
/// Gallery destinations append the image to the end of the bucket. A key
/// destination must be empty; otherwise the move is a conflict. The source
/// bucket, if a gallery bucket, is renumbered to stay contiguous.
pub fn plan_recategorize<T: CategorizedImage>(
    images: &[T],
    image_id: DbId,
    to: ImageType,
) -> Result<RecategorizePlan, CoreError> {
    let image = find_image(images, image_id)?;
    let from = image.image_type();

    if from == to {
        return Ok(RecategorizePlan {
            image_id,
            from,
            to,
            sort_order: image.sort_order(),
            sibling_updates: Vec::new(),
        });
    }

    let sort_order = match to {
        ImageType::Key(key) => {
            if let Some(occupant) = images
                .iter()
                .find(|i| i.image_id() != image_id && i.image_type() == ImageType::Key(key))
            {
                return Err(CoreError::Conflict(format!(
                    "Key slot {key} is already occupied by image {}",
                    occupant.image_id()
                )));
            }
            0
        }
        ImageType::Gallery(bucket) => {
            let len = images
                .iter()
                .filter(|i| i.image_type() == ImageType::Gallery(bucket))
                .count();
            next_sort_order(len)
        }
    };

    Ok(RecategorizePlan {
        image_id,
        from,
        to,
        sort_order,
        sibling_updates: renumber_without(images, from, image_id),
    })
}

/// Writes needed after removing one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    pub image_id: DbId,
    pub image_type: ImageType,
    /// Renumbering of the image's gallery bucket (only changed rows).
    pub sibling_updates: Vec<SortOrderUpdate>,
}

/// Plan removing `image_id`. Key images leave an empty slot and need no
/// renumbering; gallery buckets close the gap.
pub fn plan_delete<T: CategorizedImage>(
    images: &[T],
    image_id: DbId,
) -> Result<DeletePlan, CoreError> {
    let image = find_image(images, image_id)?;
    let image_type = image.image_type();
    Ok(DeletePlan {
        image_id,
        image_type,
        sibling_updates: renumber_without(images, image_type, image_id),
    })
}

fn find_image<T: CategorizedImage>(images: &[T], image_id: DbId) -> Result<&T, CoreError> {
    images
        .iter()
        .find(|i| i.image_id() == image_id)
        .ok_or(CoreError::NotFound {
            entity: "VehicleImage",
            id: image_id,
        })
}

/// Renumber the gallery bucket of `image_type` as if `removed_id` were gone,
/// returning only the rows whose order changes.
fn renumber_without<T: CategorizedImage>(
    images: &[T],
    image_type: ImageType,
    removed_id: DbId,
) -> Vec<SortOrderUpdate> {
    if image_type.is_key() {
        return Vec::new();
    }
    let mut remaining: Vec<&T> = images
        .iter()
        .filter(|i| i.image_type() == image_type && i.image_id() != removed_id)
        .collect();
    remaining.sort_by_key(|i| i.sort_order());
    remaining
        .iter()
        .enumerate()
        .filter(|(i, image)| image.sort_order() != *i as i32)
        .map(|(i, image)| SortOrderUpdate {
            id: image.image_id(),
            sort_order: i as i32,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Img {
        id: DbId,
        ty: ImageType,
        order: i32,
    }

    impl CategorizedImage for Img {
        fn image_id(&self) -> DbId {
            self.id
        }
        fn image_type(&self) -> ImageType {
            self.ty
        }
        fn sort_order(&self) -> i32 {
            self.order
        }
    }

    fn img(id: DbId, ty: ImageType, order: i32) -> Img {
        Img { id, ty, order }
    }

    fn apply(images: &mut [Img], updates: &[SortOrderUpdate]) {
        for update in updates {
            if let Some(image) = images.iter_mut().find(|i| i.id == update.id) {
                image.order = update.sort_order;
            }
        }
    }

    fn orders_of(images: &[Img], ty: ImageType) -> Vec<i32> {
        let mut orders: Vec<i32> = images
            .iter()
            .filter(|i| i.ty == ty)
            .map(|i| i.order)
            .collect();
        orders.sort_unstable();
        orders
    }

    #[test]
    fn partition_splits_key_and_gallery() {
        let images = vec![
            img(1, ImageType::FRONT, 0),
            img(2, ImageType::GALLERY_EXTERIOR, 1),
            img(3, ImageType::GALLERY_EXTERIOR, 0),
            img(4, ImageType::GALLERY_INTERIOR, 0),
            img(5, ImageType::GALLERY, 0),
        ];
        let parts = partition(images);

        assert_eq!(parts.key_images.get(KeyImageType::Front).unwrap().id, 1);
        assert!(parts.key_images.get(KeyImageType::Back).is_none());
        let exterior: Vec<DbId> = parts.gallery.exterior.iter().map(|i| i.id).collect();
        assert_eq!(exterior, vec![3, 2]);
        assert_eq!(parts.gallery.interior.len(), 1);
        assert_eq!(parts.gallery.uncategorized.len(), 1);
        assert_eq!(parts.key_images.empty_slots().len(), 5);
    }

    #[test]
    fn partition_duplicate_key_type_last_wins() {
        let parts = partition(vec![img(1, ImageType::BACK, 0), img(2, ImageType::BACK, 0)]);
        assert_eq!(parts.key_images.get(KeyImageType::Back).unwrap().id, 2);
    }

    #[test]
    fn move_first_to_last_of_three() {
        let bucket = vec![
            img(10, ImageType::GALLERY_EXTERIOR, 0),
            img(11, ImageType::GALLERY_EXTERIOR, 1),
            img(12, ImageType::GALLERY_EXTERIOR, 2),
        ];
        let (reordered, updates) = reorder_bucket(&bucket, 0, 2).unwrap();

        let ids: Vec<DbId> = reordered.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
        assert_eq!(
            updates,
            vec![
                SortOrderUpdate { id: 11, sort_order: 0 },
                SortOrderUpdate { id: 12, sort_order: 1 },
                SortOrderUpdate { id: 10, sort_order: 2 },
            ]
        );
    }

    #[test]
    fn array_move_out_of_range_is_rejected() {
        let mut items = vec![1, 2, 3];
        assert_matches!(array_move(&mut items, 3, 0), Err(CoreError::Validation(_)));
        assert_matches!(array_move(&mut items, 0, 5), Err(CoreError::Validation(_)));
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn repeated_reorders_stay_contiguous() {
        let mut bucket: Vec<Img> = (0..7)
            .map(|i| img(100 + i, ImageType::GALLERY_INTERIOR, i as i32))
            .collect();

        // Deterministic pseudo-random walk of moves.
        let mut seed: u64 = 0x2545_f491;
        for _ in 0..200 {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let from = (seed >> 33) as usize % bucket.len();
            let to = (seed >> 13) as usize % bucket.len();
            let (reordered, updates) = reorder_bucket(&bucket, from, to).unwrap();
            bucket = reordered;
            apply(&mut bucket, &updates);

            let orders: Vec<i32> = bucket.iter().map(|i| i.order).collect();
            assert_eq!(orders, (0..7).collect::<Vec<i32>>());
        }
    }

    #[test]
    fn validate_reorder_accepts_permutation() {
        let updates = [
            SortOrderUpdate { id: 2, sort_order: 0 },
            SortOrderUpdate { id: 3, sort_order: 1 },
            SortOrderUpdate { id: 1, sort_order: 2 },
        ];
        assert!(validate_bucket_reorder(&[1, 2, 3], &updates).is_ok());
    }

    #[test]
    fn validate_reorder_rejects_gaps_and_foreign_ids() {
        let gap = [
            SortOrderUpdate { id: 1, sort_order: 0 },
            SortOrderUpdate { id: 2, sort_order: 2 },
        ];
        assert!(validate_bucket_reorder(&[1, 2], &gap).is_err());

        let foreign = [
            SortOrderUpdate { id: 1, sort_order: 0 },
            SortOrderUpdate { id: 9, sort_order: 1 },
        ];
        assert!(validate_bucket_reorder(&[1, 2], &foreign).is_err());

        let partial = [SortOrderUpdate { id: 1, sort_order: 0 }];
        assert!(validate_bucket_reorder(&[1, 2], &partial).is_err());

        let duplicate = [
            SortOrderUpdate { id: 1, sort_order: 0 },
            SortOrderUpdate { id: 1, sort_order: 1 },
        ];
        assert!(validate_bucket_reorder(&[1, 2], &duplicate).is_err());

        assert!(validate_bucket_reorder(&[1], &[]).is_err());
    }

    #[test]
    fn uploads_to_empty_vehicle_fill_key_sequence_then_gallery() {
        for n in 0..=10 {
            let assigned =
                assign_upload_types(&KEY_IMAGE_SEQUENCE, GalleryBucket::Exterior, 0, n);
            assert_eq!(assigned.len(), n);
            for (i, slot) in assigned.iter().enumerate() {
                if i < 6 {
                    assert_eq!(slot.image_type, ImageType::Key(KEY_IMAGE_SEQUENCE[i]));
                } else {
                    assert_eq!(slot.image_type, ImageType::GALLERY_EXTERIOR);
                    assert_eq!(slot.sort_order, (i - 6) as i32);
                }
            }
        }
    }

    #[test]
    fn uploads_fill_remaining_slots_and_append_to_gallery() {
        let empty = [KeyImageType::Back, KeyImageType::Front];
        let assigned = assign_upload_types(&empty, GalleryBucket::Interior, 4, 4);
        let types: Vec<ImageType> = assigned.iter().map(|a| a.image_type).collect();
        assert_eq!(
            types,
            vec![
                ImageType::FRONT,
                ImageType::BACK,
                ImageType::GALLERY_INTERIOR,
                ImageType::GALLERY_INTERIOR,
            ]
        );
        assert_eq!(assigned[2].sort_order, 4);
        assert_eq!(assigned[3].sort_order, 5);
    }

    #[test]
    fn delete_middle_of_three_leaves_zero_and_one() {
        let mut images = vec![
            img(1, ImageType::GALLERY_EXTERIOR, 0),
            img(2, ImageType::GALLERY_EXTERIOR, 1),
            img(3, ImageType::GALLERY_EXTERIOR, 2),
        ];
        let plan = plan_delete(&images, 2).unwrap();
        assert_eq!(plan.sibling_updates, vec![SortOrderUpdate { id: 3, sort_order: 1 }]);

        images.retain(|i| i.id != 2);
        apply(&mut images, &plan.sibling_updates);
        assert_eq!(orders_of(&images, ImageType::GALLERY_EXTERIOR), vec![0, 1]);
    }

    #[test]
    fn delete_key_image_needs_no_renumbering() {
        let images = vec![img(1, ImageType::FRONT, 0), img(2, ImageType::GALLERY, 0)];
        let plan = plan_delete(&images, 1).unwrap();
        assert!(plan.sibling_updates.is_empty());
        assert_eq!(plan.image_type, ImageType::FRONT);
    }

    #[test]
    fn delete_unknown_image_is_not_found() {
        let images = vec![img(1, ImageType::FRONT, 0)];
        assert_matches!(
            plan_delete(&images, 42),
            Err(CoreError::NotFound { entity: "VehicleImage", id: 42 })
        );
    }

    #[test]
    fn recategorize_appends_and_closes_gap() {
        let mut images = vec![
            img(1, ImageType::GALLERY_EXTERIOR, 0),
            img(2, ImageType::GALLERY_EXTERIOR, 1),
            img(3, ImageType::GALLERY_EXTERIOR, 2),
            img(4, ImageType::GALLERY_INTERIOR, 0),
        ];
        let plan = plan_recategorize(&images, 1, ImageType::GALLERY_INTERIOR).unwrap();
        assert_eq!(plan.sort_order, 1);
        assert!(!plan.is_noop());

        let moved = images.iter_mut().find(|i| i.id == 1).unwrap();
        moved.ty = plan.to;
        moved.order = plan.sort_order;
        apply(&mut images, &plan.sibling_updates);

        assert_eq!(orders_of(&images, ImageType::GALLERY_EXTERIOR), vec![0, 1]);
        assert_eq!(orders_of(&images, ImageType::GALLERY_INTERIOR), vec![0, 1]);
    }

    #[test]
    fn recategorize_into_occupied_key_slot_conflicts() {
        let images = vec![img(1, ImageType::FRONT, 0), img(2, ImageType::GALLERY, 0)];
        assert_matches!(
            plan_recategorize(&images, 2, ImageType::FRONT),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn recategorize_to_same_type_is_noop() {
        let images = vec![img(1, ImageType::GALLERY, 3)];
        let plan = plan_recategorize(&images, 1, ImageType::GALLERY).unwrap();
        assert!(plan.is_noop());
        assert_eq!(plan.sort_order, 3);
        assert!(plan.sibling_updates.is_empty());
    }

    #[test]
    fn contiguity_check() {
        assert!(is_contiguous(&[]));
        assert!(is_contiguous(&[2, 0, 1]));
        assert!(!is_contiguous(&[0, 0, 1]));
        assert!(!is_contiguous(&[1, 2]));
    }
}

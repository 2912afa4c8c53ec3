//! The COCO instance category table used by the detector side of the
//! pipeline.
//!
//! This is the 91-entry torchvision table, including the reserved
//! `__background__` entry at index 0 and the `N/A` holes left by categories
//! that were dropped from the released COCO annotations. Canonical class ids
//! are offset by one against this table to compensate for the background
//! entry.

use crate::types::ClassNameTable;

pub const COCO_INSTANCE_CATEGORY_NAMES: &[&str] = &[
    "__background__",
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "N/A",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "N/A",
    "backpack",
    "umbrella",
    "N/A",
    "N/A",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "N/A",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "N/A",
    "dining table",
    "N/A",
    "N/A",
    "toilet",
    "N/A",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "N/A",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
];

/// Build the default class-name table with the background offset of 1.
pub fn coco_table() -> ClassNameTable {
    ClassNameTable::new(
        COCO_INSTANCE_CATEGORY_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect(),
        1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_background_at_index_zero() {
        assert_eq!(COCO_INSTANCE_CATEGORY_NAMES.len(), 91);
        assert_eq!(COCO_INSTANCE_CATEGORY_NAMES[0], "__background__");
        assert_eq!(COCO_INSTANCE_CATEGORY_NAMES[1], "person");
    }

    #[test]
    fn person_maps_to_class_zero() {
        let table = coco_table();
        assert_eq!(table.class_id_for_label("person").unwrap(), 0);
        assert_eq!(table.label(0).unwrap(), "person");
    }
}

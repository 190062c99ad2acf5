//! Tests for BoundingBox validation and containment.

use snowline_common::BoundingBox;

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-5.0, -3.0, 56.0, 58.0);
    assert_eq!(bbox.min_lon, -5.0);
    assert_eq!(bbox.max_lon, -3.0);
    assert_eq!(bbox.min_lat, 56.0);
    assert_eq!(bbox.max_lat, 58.0);
}

#[test]
fn test_bbox_try_new_valid() {
    let bbox = BoundingBox::try_new(-180.0, 180.0, -90.0, 90.0).unwrap();
    assert_eq!(bbox.width(), 360.0);
    assert_eq!(bbox.height(), 180.0);
}

#[test]
fn test_bbox_center() {
    let bbox = BoundingBox::new(-5.0, -3.0, 56.0, 58.0);
    assert_eq!(bbox.center(), (-4.0, 57.0));
}

// ============================================================================
// Validation tests
// ============================================================================

#[test]
fn test_bbox_equal_lon_rejected() {
    let err = BoundingBox::try_new(-4.0, -4.0, 56.0, 58.0).unwrap_err();
    assert!(err.to_string().contains("must be less than max_lon"));
}

#[test]
fn test_bbox_longitude_domain() {
    let err = BoundingBox::try_new(-181.0, -3.0, 56.0, 58.0).unwrap_err();
    assert!(err.to_string().contains("min_lon (-181) must be in range [-180, 180]"));

    let err = BoundingBox::try_new(-5.0, 181.0, 56.0, 58.0).unwrap_err();
    assert!(err.to_string().contains("max_lon (181) must be in range [-180, 180]"));
}

#[test]
fn test_bbox_latitude_domain() {
    let err = BoundingBox::try_new(-5.0, -3.0, -91.0, 58.0).unwrap_err();
    assert!(err.to_string().contains("min_lat (-91) must be in range [-90, 90]"));

    let err = BoundingBox::try_new(-5.0, -3.0, 56.0, 90.5).unwrap_err();
    assert!(err.to_string().contains("max_lat (90.5) must be in range [-90, 90]"));
}

#[test]
fn test_bbox_nan_rejected() {
    assert!(BoundingBox::try_new(f64::NAN, -3.0, 56.0, 58.0).is_err());
}

// ============================================================================
// Containment tests
// ============================================================================

#[test]
fn test_bbox_contains_corners() {
    let bbox = BoundingBox::new(-5.0, -3.0, 56.0, 58.0);
    assert!(bbox.contains(-5.0, 56.0));
    assert!(bbox.contains(-5.0, 58.0));
    assert!(bbox.contains(-3.0, 56.0));
    assert!(bbox.contains(-3.0, 58.0));
}

#[test]
fn test_bbox_excludes_outside() {
    let bbox = BoundingBox::new(-5.0, -3.0, 56.0, 58.0);
    assert!(!bbox.contains(-6.0, 57.0));
    assert!(!bbox.contains(-4.0, 59.0));
    assert!(!bbox.contains(f64::NAN, 57.0));
}

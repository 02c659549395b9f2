//! Derived status rules, applied on every write that touches their inputs.

use entity::sea_orm_active_enums::{CampStatus, ResourceStatus};

/// Status of a camp given its manual closed flag and current headcount.
///
/// A closed camp stays closed regardless of occupancy.
pub fn derive_camp_status(closed: bool, capacity: i32, current_occupancy: i32) -> CampStatus {
    if closed {
        CampStatus::Closed
    } else if current_occupancy >= capacity {
        CampStatus::Full
    } else {
        CampStatus::Active
    }
}

/// Status of a resource stock given its quantity and low-stock threshold.
pub fn derive_resource_status(quantity: i32, low_threshold: i32) -> ResourceStatus {
    if quantity <= 0 {
        ResourceStatus::Unavailable
    } else if quantity <= low_threshold {
        ResourceStatus::Low
    } else {
        ResourceStatus::Available
    }
}

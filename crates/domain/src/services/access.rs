//! Centralized capability checks.
//!
//! Every operation composes one of these functions instead of re-implementing
//! role comparisons per handler. A check takes the caller and the resource
//! scope and answers allow/deny; inactive staff are always denied.

use uuid::Uuid;

use crate::models::{Staff, StaffRole};

/// May the caller edit (status, classification, delete) a schedule entry?
///
/// Trainers may edit their own entries; managers may edit any entry in their
/// gym; owners any entry in their company's gyms (gym match stands in for the
/// company-wide lookup, which the caller resolves before invoking this).
pub fn can_edit_schedule(staff: &Staff, entry_staff_id: Uuid, entry_gym_id: Uuid) -> bool {
    if !staff.is_active {
        return false;
    }
    match staff.role {
        StaffRole::Trainer => staff.id == entry_staff_id,
        StaffRole::Manager | StaffRole::Owner => staff.gym_id == entry_gym_id,
    }
}

/// May the caller submit a monthly report for the given trainer?
///
/// Submission is personal: a trainer submits only their own month. Managers
/// and owners may submit on a trainer's behalf within their gym.
pub fn can_submit_report(staff: &Staff, report_staff_id: Uuid, report_gym_id: Uuid) -> bool {
    if !staff.is_active {
        return false;
    }
    match staff.role {
        StaffRole::Trainer => staff.id == report_staff_id,
        StaffRole::Manager | StaffRole::Owner => staff.gym_id == report_gym_id,
    }
}

/// May the caller approve or reject a monthly report?
///
/// Managers review reports for their own gym; owners for any gym in their
/// company. Trainers never review.
pub fn can_review_report(staff: &Staff, report_gym_id: Uuid, report_company_id: Uuid) -> bool {
    if !staff.is_active {
        return false;
    }
    match staff.role {
        StaffRole::Trainer => false,
        StaffRole::Manager => staff.gym_id == report_gym_id,
        StaffRole::Owner => staff.company_id == report_company_id,
    }
}

/// May the caller mutate a membership (hold extension)?
pub fn can_manage_membership(staff: &Staff, membership_gym_id: Uuid) -> bool {
    if !staff.is_active {
        return false;
    }
    match staff.role {
        StaffRole::Trainer => false,
        StaffRole::Manager | StaffRole::Owner => staff.gym_id == membership_gym_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(role: StaffRole) -> Staff {
        Staff {
            id: Uuid::new_v4(),
            gym_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            display_name: "Test Staff".to_string(),
            role,
            is_active: true,
        }
    }

    #[test]
    fn test_trainer_edits_own_entries_only() {
        let trainer = staff(StaffRole::Trainer);
        assert!(can_edit_schedule(&trainer, trainer.id, trainer.gym_id));
        assert!(!can_edit_schedule(&trainer, Uuid::new_v4(), trainer.gym_id));
    }

    #[test]
    fn test_manager_edits_within_gym() {
        let manager = staff(StaffRole::Manager);
        assert!(can_edit_schedule(&manager, Uuid::new_v4(), manager.gym_id));
        assert!(!can_edit_schedule(&manager, Uuid::new_v4(), Uuid::new_v4()));
    }

    #[test]
    fn test_trainer_cannot_review() {
        let trainer = staff(StaffRole::Trainer);
        assert!(!can_review_report(&trainer, trainer.gym_id, trainer.company_id));
    }

    #[test]
    fn test_manager_reviews_own_gym_only() {
        let manager = staff(StaffRole::Manager);
        assert!(can_review_report(&manager, manager.gym_id, Uuid::new_v4()));
        assert!(!can_review_report(&manager, Uuid::new_v4(), manager.company_id));
    }

    #[test]
    fn test_owner_reviews_across_company() {
        let owner = staff(StaffRole::Owner);
        assert!(can_review_report(&owner, Uuid::new_v4(), owner.company_id));
        assert!(!can_review_report(&owner, Uuid::new_v4(), Uuid::new_v4()));
    }

    #[test]
    fn test_inactive_staff_denied_everywhere() {
        let mut owner = staff(StaffRole::Owner);
        owner.is_active = false;
        assert!(!can_edit_schedule(&owner, Uuid::new_v4(), owner.gym_id));
        assert!(!can_submit_report(&owner, owner.id, owner.gym_id));
        assert!(!can_review_report(&owner, owner.gym_id, owner.company_id));
        assert!(!can_manage_membership(&owner, owner.gym_id));
    }

    #[test]
    fn test_trainer_submits_own_month() {
        let trainer = staff(StaffRole::Trainer);
        assert!(can_submit_report(&trainer, trainer.id, trainer.gym_id));
        assert!(!can_submit_report(&trainer, Uuid::new_v4(), trainer.gym_id));
    }

    #[test]
    fn test_membership_management_requires_manager() {
        let trainer = staff(StaffRole::Trainer);
        let manager = staff(StaffRole::Manager);
        assert!(!can_manage_membership(&trainer, trainer.gym_id));
        assert!(can_manage_membership(&manager, manager.gym_id));
    }
}

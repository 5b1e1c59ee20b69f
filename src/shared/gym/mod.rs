//! Gym resource types
//!
//! Request and response bodies for every resource the API serves. All wire
//! names are camelCase. Responses never include password hashes.

pub mod members;
pub mod equipment;
pub mod maintenance;
pub mod schedule;

pub use members::{
    AssignTrainerRequest, CreateCustomerRequest, CreateStaffRequest, CustomerQuery,
    RenewMembershipRequest, SetStatusRequest, StaffQuery, UpdateCustomerRequest,
    UpdateProfileRequest, UpdateStaffRequest, UserProfile,
};
pub use equipment::{CreateEquipmentRequest, Equipment, EquipmentQuery, EquipmentStatus, UpdateEquipmentRequest};
pub use maintenance::{
    CreateMaintenanceRequest, MaintenanceQuery, MaintenanceRecord, MaintenanceStatus,
    UpcomingQuery, UpdateMaintenanceRequest,
};
pub use schedule::{ReplaceScheduleRequest, ScheduleItem, TrainerSchedule};

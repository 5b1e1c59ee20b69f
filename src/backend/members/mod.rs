//! Members Module
//!
//! Customer and trainer accounts under `/api/users`: the front desk's
//! member register, membership renewal, trainer assignment and the
//! trainer roster.
//!
//! - **`db`** - queries beyond the generic ones in `auth::users`
//! - **`handlers`** - HTTP handlers with their role checks

pub mod db;
pub mod handlers;

pub use handlers::{
    assign_trainer, check_expired, create_customer, create_trainer, delete_customer,
    delete_trainer, get_customer, get_trainer, list_customers, list_trainers, my_customers,
    renew_membership, set_customer_status, update_customer, update_trainer,
};

pub mod contract;
pub mod error;
pub mod events;
pub mod execute;
pub mod helpers;
pub mod interest;
pub mod query;
pub mod state;

pub mod account;
pub mod assessment;
pub mod dosha;
pub mod follow_up;
pub mod question;
pub mod schedule;

pub mod blocks;
pub mod home;
pub mod not_found;

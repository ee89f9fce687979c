pub mod guard;
pub mod lifecycle;
pub mod reads;
pub mod status;
pub mod validation;

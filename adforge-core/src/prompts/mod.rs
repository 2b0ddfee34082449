//! Generation prompt assembly from brief fields.

pub mod builder;

//! Data models for school timetabling

mod class_hour;
mod program;
mod school;
mod user;

pub use class_hour::*;
pub use program::*;
pub use school::*;
pub use user::*;

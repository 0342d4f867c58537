pub mod batch;
pub mod events;
pub mod run;
pub mod validate;

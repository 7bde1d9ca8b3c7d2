pub mod document;
pub mod events;
pub mod gui;
pub mod store;
pub mod sys;

mod macros;

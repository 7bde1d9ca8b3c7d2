pub mod app;
pub mod editor;
pub mod menu;
pub mod theme;
pub mod window;

pub mod app;
pub mod fetcher;
pub mod input;
pub mod render;
pub mod route;
pub mod theme;

pub use app::run;

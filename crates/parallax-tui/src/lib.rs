pub mod app;
pub mod event;
pub mod input;
pub mod page;
pub mod scroll;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::App;
pub use page::{Page, PageViewport};
pub use theme::Theme;

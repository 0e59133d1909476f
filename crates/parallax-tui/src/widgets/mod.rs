mod loading;
mod navbar;
mod page_view;
mod progress_ring;
mod scanner;
mod status_bar;

pub use loading::LoadingWidget;
pub use navbar::NavbarWidget;
pub use page_view::{row_shift, section_row, PageWidget, RowKind};
pub use progress_ring::ProgressRingWidget;
pub use scanner::ScannerWidget;
pub use status_bar::StatusBarWidget;

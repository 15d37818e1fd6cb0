pub mod admin_ui;
pub mod catalog_ui;
pub mod diagram_ui;
pub mod info_ui;
pub mod panel_trait;

pub use admin_ui::AdminPanel;
pub use catalog_ui::CatalogPanel;
pub use diagram_ui::DiagramPanel;
pub use info_ui::InfoPanel;
pub use panel_trait::{MapView, Panel, PanelState};

//! Class names the controllers toggle. These are part of the stylesheet
//! contract and are not configurable.

pub const ACTIVE: &str = "active";
pub const SCROLLED: &str = "scrolled";
pub const HIDDEN: &str = "hidden";
pub const NAV_OPEN: &str = "nav-open";
pub const MODAL_OPEN: &str = "modal-open";
pub const ERROR: &str = "error";
pub const ERROR_MESSAGE: &str = "error-message";
pub const SUCCESS_MESSAGE: &str = "success-message";
pub const VISIBLE: &str = "visible";
pub const ANIMATED: &str = "animated";
pub const LAZY: &str = "lazy";

//! The employee bill list: fetches bills from a [`Store`], formats their
//! dates and statuses for display, orders them most recent first, and
//! dispatches the page's interactions to injected navigation and modal
//! callbacks.

mod bills;
pub mod format;
mod model;
mod routes;
mod store;
pub mod views;

pub use bills::{BillList, Builder, ReceiptModal, ReceiptPreview, DEFAULT_MODAL_WIDTH, RECEIPT_CAPTION};
pub use format::DateFormat;
pub use model::{BillStatus, DisplayBill, RawBill, Session, UnknownStatus, UserType};
pub use routes::RoutePath;
pub use store::{BillsResource, Store, StoreError};
pub use views::BillsPage;

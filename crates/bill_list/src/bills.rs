use std::sync::Arc;

use tracing::{debug, info};

use crate::format::{self, DateFormat};
use crate::model::{DisplayBill, Session};
use crate::routes::RoutePath;
use crate::store::{Store, StoreError};
use crate::views::escape;

pub const RECEIPT_CAPTION: &str = "Justificatif";
pub const DEFAULT_MODAL_WIDTH: u32 = 800;

/// Content handed to the receipt modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptPreview {
    pub caption: String,
    pub body: String,
}

/// Surface that displays a receipt preview and makes itself visible.
pub trait ReceiptModal: Send + Sync {
    fn show(&self, preview: ReceiptPreview);
}

impl<F> ReceiptModal for F
where
    F: Fn(ReceiptPreview) + Send + Sync,
{
    fn show(&self, preview: ReceiptPreview) {
        self(preview)
    }
}

type Navigate = Box<dyn Fn(&str) + Send + Sync>;

/// The employee bill page: fetches, formats and orders bills, and reacts to
/// the page's two buttons.
pub struct BillList {
    store: Option<Arc<dyn Store>>,
    session: Session,
    on_navigate: Navigate,
    modal: Box<dyn ReceiptModal>,
    date_format: DateFormat,
    modal_width: u32,
}

impl BillList {
    pub fn builder(session: Session) -> Builder {
        Builder::new(session)
    }

    /// Fetches every bill, most recent first. Without a store there is
    /// nothing to fetch and the list is empty.
    #[tracing::instrument(skip(self), fields(email = ?self.session.email))]
    pub async fn get_bills(&self) -> Result<Vec<DisplayBill>, StoreError> {
        let store = match &self.store {
            Some(store) => store,
            None => {
                debug!("no store configured, nothing to fetch");
                return Ok(vec![]);
            }
        };

        let raw = store.bills().list().await?;
        info!("fetched {} bills", raw.len());

        let mut bills: Vec<DisplayBill> = raw
            .into_iter()
            .map(|bill| format::normalize(bill, self.date_format))
            .collect();
        format::sort_antichrono(&mut bills);

        Ok(bills)
    }

    pub fn navigate_to_new_bill(&self) {
        debug!("navigating to {}", RoutePath::NewBill);
        (self.on_navigate)(RoutePath::NewBill.as_str());
    }

    pub fn open_receipt_preview(&self, bill: &DisplayBill) {
        let preview = self.receipt_preview(bill.file_url.as_deref());
        debug!(bill = %bill.id, "showing receipt");
        self.modal.show(preview);
    }

    fn receipt_preview(&self, file_url: Option<&str>) -> ReceiptPreview {
        let inner = match file_url {
            Some(url) if !url.is_empty() => format!(
                "<img width={} src=\"{}\" alt=\"Bill\" />",
                self.modal_width / 2,
                escape(url)
            ),
            _ => "<p class=\"bill-proof-missing\">Aucun justificatif</p>".to_string(),
        };

        ReceiptPreview {
            caption: RECEIPT_CAPTION.to_string(),
            body: format!(
                "<div style='text-align: center;' class=\"bill-proof-container\">{}</div>",
                inner
            ),
        }
    }
}

pub struct Builder {
    store: Option<Arc<dyn Store>>,
    session: Session,
    on_navigate: Navigate,
    modal: Box<dyn ReceiptModal>,
    date_format: DateFormat,
    modal_width: u32,
}

impl Builder {
    pub fn new(session: Session) -> Self {
        Self {
            store: None,
            session,
            on_navigate: Box::new(|_: &str| {}),
            modal: Box::new(|_: ReceiptPreview| {}),
            date_format: DateFormat::default(),
            modal_width: DEFAULT_MODAL_WIDTH,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn on_navigate<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_navigate = Box::new(f);
        self
    }

    pub fn with_modal<M: ReceiptModal + 'static>(mut self, modal: M) -> Self {
        self.modal = Box::new(modal);
        self
    }

    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = format;
        self
    }

    pub fn with_modal_width(mut self, width: u32) -> Self {
        self.modal_width = width;
        self
    }

    pub fn build(self) -> BillList {
        BillList {
            store: self.store,
            session: self.session,
            on_navigate: self.on_navigate,
            modal: self.modal,
            date_format: self.date_format,
            modal_width: self.modal_width,
        }
    }
}

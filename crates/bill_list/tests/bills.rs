use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bill_list::views::bills_ui;
use bill_list::{
    BillList, BillsPage, BillsResource, RawBill, ReceiptPreview, RoutePath, Session, Store,
    StoreError,
};
use chrono::NaiveDate;

const FIXTURE: &str = r#"[
  {
    "id": "47qAXb6fIm2zOKkLzMro",
    "vat": "80",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…f-1.jpg?alt=media&token=c1640e12-a24b-4b11-ae52-529112e9602a",
    "status": "pending",
    "type": "Hôtel et logement",
    "commentary": "séminaire billed",
    "name": "encore",
    "fileName": "preview-facture-free-201801-pdf-1.jpg",
    "date": "2004-04-04",
    "amount": 400,
    "commentAdmin": "ok",
    "email": "a@a",
    "pct": 20
  },
  {
    "id": "BeKy5Mo4jkmdfPGYpTxZ",
    "vat": "",
    "amount": 100,
    "name": "test1",
    "fileName": "1592770761.jpeg",
    "commentary": "plop",
    "pct": 20,
    "type": "Transports",
    "email": "a@a",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…61.jpeg?alt=media&token=7685cd61-c112-42bc-9929-8a799bb82d8b",
    "date": "2001-01-01",
    "status": "refused",
    "commentAdmin": "en fait non"
  },
  {
    "id": "UIUZtnPQvnbFnB0ozvJh",
    "name": "test3",
    "email": "a@a",
    "type": "Services en ligne",
    "vat": "60",
    "pct": 20,
    "commentAdmin": "bon bah d'accord",
    "amount": 300,
    "status": "accepted",
    "date": "2003-03-03",
    "commentary": "",
    "fileName": "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…dur.png?alt=media&token=571d34cb-9c8f-430a-af52-66221cae1da3"
  },
  {
    "id": "qcCK3SzECmaZAGRrHjaC",
    "status": "refused",
    "pct": 20,
    "amount": 200,
    "email": "a@a",
    "name": "test2",
    "vat": "40",
    "fileName": "preview-facture-free-201801-pdf-1.jpg",
    "date": "2002-02-02",
    "commentAdmin": "pas la bonne facture",
    "commentary": "test2",
    "type": "Restaurants et bars",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…f-1.jpg?alt=media&token=4df6ed2c-12c8-42a2-b013-346c1346f732"
  }
]"#;

enum Reply {
    Bills(Vec<RawBill>),
    Status(u16),
}

struct MockStore {
    reply: Reply,
    calls: AtomicUsize,
}

impl MockStore {
    fn with_bills(bills: Vec<RawBill>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Bills(bills),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Status(status),
            calls: AtomicUsize::new(0),
        })
    }
}

struct MockBills<'a>(&'a MockStore);

impl Store for MockStore {
    fn bills(&self) -> Box<dyn BillsResource + '_> {
        Box::new(MockBills(self))
    }
}

#[async_trait]
impl<'a> BillsResource for MockBills<'a> {
    async fn list(&self) -> Result<Vec<RawBill>, StoreError> {
        self.0.calls.fetch_add(1, Ordering::SeqCst);
        match &self.0.reply {
            Reply::Bills(bills) => Ok(bills.clone()),
            Reply::Status(code) => Err(StoreError::Status(*code)),
        }
    }
}

fn fixture() -> Vec<RawBill> {
    serde_json::from_str(FIXTURE).unwrap()
}

fn session() -> Session {
    Session::employee("a@a")
}

fn date(s: &str) -> Option<NaiveDate> {
    Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
}

#[tokio::test]
async fn fetches_bills_most_recent_first() -> Result<(), Box<dyn std::error::Error>> {
    let store = MockStore::with_bills(fixture());
    let bills = BillList::builder(session())
        .with_store(store.clone())
        .build();

    let list = bills.get_bills().await?;

    let dates: Vec<_> = list.iter().map(|b| b.date).collect();
    assert_eq!(
        dates,
        vec![
            date("2004-04-04"),
            date("2003-03-03"),
            date("2002-02-02"),
            date("2001-01-01")
        ]
    );
    assert_eq!(list[0].display_date, "4 Avr. 04");
    assert_eq!(list[0].display_status, "En attente");
    assert_eq!(list[1].display_status, "Accepté");
    assert_eq!(list[3].display_status, "Refused");
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn bad_records_do_not_break_the_list() -> Result<(), Box<dyn std::error::Error>> {
    let mut raw = fixture();
    raw[1].date = Some("2001-99-99".to_string());
    raw[2].status = Some("lost".to_string());
    raw[3].date = None;
    let bills = BillList::builder(session())
        .with_store(MockStore::with_bills(raw))
        .build();

    let list = bills.get_bills().await?;

    assert_eq!(list.len(), 4);
    assert_eq!(list[0].id, "47qAXb6fIm2zOKkLzMro");
    assert_eq!(list[1].id, "UIUZtnPQvnbFnB0ozvJh");
    assert_eq!(list[1].display_status, "Inconnu");
    let bad = list
        .iter()
        .find(|b| b.id == "BeKy5Mo4jkmdfPGYpTxZ")
        .unwrap();
    assert_eq!(bad.display_date, "2001-99-99");
    for pair in list.windows(2) {
        assert!(pair[0].date >= pair[1].date);
    }

    Ok(())
}

#[tokio::test]
async fn without_a_store_there_are_no_bills() {
    let bills = BillList::builder(session()).build();

    assert_eq!(bills.get_bills().await, Ok(vec![]));
}

#[tokio::test]
async fn fetch_failures_render_the_upstream_message() {
    for (code, message) in [(404, "Erreur 404"), (500, "Erreur 500")] {
        let store = MockStore::failing(code);
        let bills = BillList::builder(session())
            .with_store(store.clone())
            .build();

        let result = bills.get_bills().await;
        assert_eq!(result, Err(StoreError::Status(code)));

        let markup = bills_ui(&BillsPage::from(result));
        assert!(markup.contains(message));
        assert!(!markup.contains("bill-row"));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn new_bill_navigates_every_time() {
    let visited = Arc::new(Mutex::new(vec![]));
    let log = visited.clone();
    let bills = BillList::builder(session())
        .on_navigate(move |path| log.lock().unwrap().push(path.to_string()))
        .build();

    bills.navigate_to_new_bill();
    bills.navigate_to_new_bill();

    assert_eq!(
        *visited.lock().unwrap(),
        vec![RoutePath::NewBill.to_string(), "#employee/bill/new".to_string()]
    );
}

#[tokio::test]
async fn receipt_preview_opens_the_modal() -> Result<(), Box<dyn std::error::Error>> {
    let shown: Arc<Mutex<Vec<ReceiptPreview>>> = Arc::new(Mutex::new(vec![]));
    let modal = shown.clone();
    let bills = BillList::builder(session())
        .with_store(MockStore::with_bills(fixture()))
        .with_modal(move |preview: ReceiptPreview| modal.lock().unwrap().push(preview))
        .with_modal_width(600)
        .build();

    let list = bills.get_bills().await?;
    bills.open_receipt_preview(&list[0]);

    let shown = shown.lock().unwrap();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].caption, "Justificatif");
    assert!(shown[0].body.contains("<img width=300 src=\"https://test.storage.tld/"));

    Ok(())
}

#[tokio::test]
async fn receipt_preview_without_receipt_still_shows() -> Result<(), Box<dyn std::error::Error>> {
    let mut raw = fixture();
    for bill in raw.iter_mut() {
        bill.file_url = None;
    }
    let shown = Arc::new(AtomicUsize::new(0));
    let count = shown.clone();
    let bills = BillList::builder(session())
        .with_store(MockStore::with_bills(raw))
        .with_modal(move |preview: ReceiptPreview| {
            assert!(!preview.body.contains("<img"));
            count.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    let list = bills.get_bills().await?;
    bills.open_receipt_preview(&list[2]);

    assert_eq!(shown.load(Ordering::SeqCst), 1);

    Ok(())
}

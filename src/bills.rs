use std::io::Write;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use bill_list::views::bills_ui;
use bill_list::{BillList, BillsPage, Builder, ReceiptPreview, Session, Store};
use clap::ArgMatches;
use tracing::info;

use crate::settings::{Backend, Settings};
use crate::store::{JsonStore, SqliteStore};

/// The email whose bills the session may see.
fn owner(session: &Session) -> Result<&str> {
    if !session.is_employee() {
        bail!("the bills page is only available to employees");
    }

    session
        .email
        .as_deref()
        .ok_or_else(|| anyhow!("the session has no email, log in again"))
}

async fn open_store(settings: &Settings, owner: &str) -> Result<Option<Arc<dyn Store>>> {
    let store: Option<Arc<dyn Store>> = match settings.store.backend {
        Backend::Disabled => None,
        Backend::Sqlite => {
            let path = std::path::Path::new(&settings.store.db_file);
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let uri = format!("sqlite://{}", settings.store.db_file);
            Some(Arc::new(SqliteStore::new(&uri).await?.for_owner(owner)))
        }
        Backend::Json => {
            let path = settings
                .store
                .json_file
                .as_ref()
                .ok_or_else(|| anyhow!("store.json_file must be set for the json backend"))?;
            Some(Arc::new(JsonStore::new(path).for_owner(owner)))
        }
    };

    Ok(store)
}

fn builder(settings: &Settings, session: Session, store: Option<Arc<dyn Store>>) -> Builder {
    let builder = BillList::builder(session)
        .with_date_format(settings.display.date_format)
        .with_modal_width(settings.display.modal_width);

    match store {
        Some(store) => builder.with_store(store),
        None => builder,
    }
}

#[tracing::instrument(skip(bills, out))]
async fn list<W: Write>(bills: BillList, html: bool, mut out: W) -> Result<()> {
    let result = bills.get_bills().await;

    if html {
        writeln!(out, "{}", bills_ui(&BillsPage::from(result)))?;
        return Ok(());
    }

    let list = result?;
    info!("listing {} bills", list.len());
    crate::display::print_bills(out, &list)
}

fn new_bill(bills: BillList) {
    bills.navigate_to_new_bill();
}

async fn receipt(bills: BillList, id: &str) -> Result<()> {
    let list = bills.get_bills().await?;
    let bill = list
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| anyhow!("no bill with id {}", id))?;

    bills.open_receipt_preview(bill);

    Ok(())
}

fn print_preview(preview: ReceiptPreview) {
    println!("{}\n{}", preview.caption, preview.body);
}

pub(crate) async fn run(matches: &ArgMatches, settings: Settings) -> Result<()> {
    let session = crate::session::read(&settings.session_file)?;
    let store = open_store(&settings, owner(&session)?).await?;
    let bills = builder(&settings, session, store)
        .on_navigate(|path| println!("{}", path))
        .with_modal(print_preview)
        .build();

    match matches.subcommand() {
        Some(("list", list_matches)) => {
            list(bills, list_matches.is_present("html"), std::io::stdout()).await
        },
        Some(("new", _)) => {
            new_bill(bills);
            Ok(())
        }
        Some(("receipt", receipt_matches)) => {
            let id = receipt_matches
                .value_of("id")
                .ok_or_else(|| anyhow!("bill id is required"))?;
            receipt(bills, id).await
        }
        None => unreachable!("subcommand is required"),
        _ => unreachable!(),
    }
}

//! Markup for the bills page. Everything here is a pure function of the
//! data it is given.

use crate::bills::RECEIPT_CAPTION;
use crate::model::DisplayBill;
use crate::store::StoreError;

/// What the bills page currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum BillsPage {
    Error(String),
    Data(Vec<DisplayBill>),
}

impl From<Result<Vec<DisplayBill>, StoreError>> for BillsPage {
    fn from(result: Result<Vec<DisplayBill>, StoreError>) -> Self {
        match result {
            Ok(bills) => BillsPage::Data(bills),
            Err(e) => BillsPage::Error(e.to_string()),
        }
    }
}

pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn opt(value: &Option<String>) -> String {
    value.as_deref().map(escape).unwrap_or_default()
}

fn row(bill: &DisplayBill) -> String {
    let amount = bill.amount.map(|a| format!("{} €", a)).unwrap_or_default();

    format!(
        r#"<tr data-testid="bill-row">
  <td>{}</td>
  <td>{}</td>
  <td data-testid="bill-date">{}</td>
  <td>{}</td>
  <td>{}</td>
  <td>
    <div class="icon-actions">
      <div id="eye" data-testid="icon-eye" data-bill-id="{}" data-bill-url="{}">&#128065;</div>
    </div>
  </td>
</tr>
"#,
        opt(&bill.bill_type),
        opt(&bill.name),
        escape(&bill.display_date),
        amount,
        escape(&bill.display_status),
        escape(&bill.id),
        opt(&bill.file_url),
    )
}

fn modal() -> String {
    format!(
        r#"<div class="modal fade" id="modaleFile" tabindex="-1" role="dialog" aria-hidden="true">
  <div class="modal-dialog modal-dialog-centered modal-lg" role="document">
    <div class="modal-content">
      <div class="modal-header">
        <h5 class="modal-title">{}</h5>
      </div>
      <div class="modal-body"></div>
    </div>
  </div>
</div>
"#,
        RECEIPT_CAPTION
    )
}

fn vertical_layout() -> &'static str {
    r#"<div class="vertical-navbar">
  <div class="layout-title">Billed</div>
  <div id="layout-icon1" data-testid="icon-window" class="active-icon">&#128462;</div>
  <div id="layout-icon2" data-testid="icon-mail">&#9993;</div>
</div>
"#
}

fn page(content: &str) -> String {
    format!(
        "<div class=\"layout\">\n{}<div class=\"content\">\n{}</div>\n</div>\n",
        vertical_layout(),
        content
    )
}

pub fn error_page(message: &str) -> String {
    page(&format!(
        "<div id=\"error\" data-testid=\"error-message\">\n  Erreur\n  <div>{}</div>\n</div>\n",
        escape(message)
    ))
}

pub fn bills_ui(content: &BillsPage) -> String {
    let bills = match content {
        BillsPage::Error(message) => return error_page(message),
        BillsPage::Data(bills) => bills,
    };

    let mut rows = String::new();
    for bill in bills {
        rows.push_str(&row(bill));
    }

    let content = format!(
        r#"<div class="content-header">
  <div class="content-title"> Mes notes de frais </div>
  <button type="button" data-testid="btn-new-bill" class="btn btn-primary">Nouvelle note de frais</button>
</div>
<div id="data-table">
<table id="example" class="table table-striped" style="width:100%">
<thead>
<tr>
  <th>Type</th>
  <th>Nom</th>
  <th>Date</th>
  <th>Montant</th>
  <th>Statut</th>
  <th>Actions</th>
</tr>
</thead>
<tbody data-testid="tbody">
{}</tbody>
</table>
</div>
{}"#,
        rows,
        modal()
    );

    page(&content)
}

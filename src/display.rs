use std::io::Write;

use anyhow::Result;
use bill_list::DisplayBill;
use tabwriter::TabWriter;

pub fn print_bills<T: std::io::Write>(wr: T, bills: &[DisplayBill]) -> Result<()> {
    let mut tw = TabWriter::new(wr);
    writeln!(tw, "ID\tType\tNom\tDate\tMontant\tStatut\tJustificatif")?;

    for bill in bills.iter() {
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            bill.id,
            bill.bill_type.as_deref().unwrap_or("-"),
            bill.name.as_deref().unwrap_or("-"),
            bill.display_date,
            bill.amount.map(|a| format!("{:.2} €", a)).unwrap_or_else(|| "-".into()),
            bill.display_status,
            if bill.file_url.is_some() { "oui" } else { "non" },
        )?;
    }

    tw.flush()?;

    Ok(())
}

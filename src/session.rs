use std::fs::OpenOptions;
use std::io::prelude::*;
use std::path::Path;

use anyhow::Result;
use bill_list::Session;

/// Reads the signed-in user left behind by the login flow.
pub(crate) fn read<P: AsRef<Path>>(path: P) -> Result<Session> {
    let p = path.as_ref();

    let mut fd = OpenOptions::new().read(true).open(p).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            let ctx = format!("no session found at {}, log in first", p.display());
            anyhow::Error::new(e).context(ctx)
        }
        _ => {
            let ctx = format!("failed to read session {}: {}", p.display(), e);
            anyhow::Error::new(e).context(ctx)
        }
    })?;
    let mut content = String::new();
    fd.read_to_string(&mut content)?;

    Ok(serde_json::from_str(&content)?)
}

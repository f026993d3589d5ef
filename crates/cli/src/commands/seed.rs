//! Seed the database from a YAML file.
//!
//! # File Format
//!
//! ```yaml
//! admins:
//!   - email: admin@system.com
//!     password: correct horse
//! pins:
//!   - code: "123456"
//!     description: VIP
//!   - code: "654321"
//! ```
//!
//! Codes must be quoted so YAML keeps leading zeros. Admins whose email
//! already exists and codes that are already active are skipped.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use pin_gate_core::{Email, StoredCredential};
use pin_gate_web::db::RepositoryError;
use pin_gate_web::services::{PinAdminError, PinAdministration};

use super::admin::insert_admin;
use super::{CommandError, connect};

/// Top-level seed document.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
    #[serde(default)]
    pub admins: Vec<SeedAdmin>,
    #[serde(default)]
    pub pins: Vec<SeedPin>,
}

/// One admin entry.
#[derive(Debug, Deserialize)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

/// One PIN entry.
#[derive(Debug, Deserialize)]
pub struct SeedPin {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Counts reported after seeding.
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub admins_created: usize,
    pub admins_skipped: usize,
    pub pins_created: usize,
    pub pins_skipped: usize,
}

/// Parse a seed document.
///
/// # Errors
///
/// Returns `CommandError::Yaml` if the document does not match [`SeedFile`].
pub fn parse(content: &str) -> Result<SeedFile, CommandError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Seed admins and PINs from `file_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, an entry is
/// invalid, or the database fails.
pub async fn from_file(file_path: &str) -> Result<(), CommandError> {
    let path = Path::new(file_path);
    info!(path = %file_path, "Loading seed file");

    // Read and validate before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let seed = parse(&content)?;
    info!(admins = seed.admins.len(), pins = seed.pins.len(), "Parsed seed file");

    let db = connect().await?;
    let mut summary = SeedSummary::default();

    for entry in &seed.admins {
        let email = Email::parse(&entry.email)?;
        let credential = StoredCredential::hash(&entry.password)?;
        match insert_admin(&db, &email, &credential).await {
            Ok(_) => summary.admins_created += 1,
            Err(CommandError::Repository(RepositoryError::Conflict(_))) => {
                warn!(%email, "Admin already exists, skipping");
                summary.admins_skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let pins = PinAdministration::new(&db);
    let mut loaded = pins.list_active().await?;
    for entry in &seed.pins {
        match pins
            .add_pin(&entry.code, entry.description.as_deref(), &loaded)
            .await
        {
            Ok(record) => {
                loaded.push(record);
                summary.pins_created += 1;
            }
            Err(PinAdminError::Duplicate) => {
                warn!(code = %entry.code, "PIN already active, skipping");
                summary.pins_skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!("Seeding complete!");
    info!(
        "  Admins created: {}, skipped: {}",
        summary.admins_created, summary.admins_skipped
    );
    info!(
        "  PINs created: {}, skipped: {}",
        summary.pins_created, summary.pins_skipped
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let seed = parse(
            r#"
admins:
  - email: admin@system.com
    password: admin1234
pins:
  - code: "000123"
    description: VIP
  - code: "654321"
"#,
        )
        .unwrap();

        assert_eq!(seed.admins.len(), 1);
        assert_eq!(seed.admins[0].email, "admin@system.com");
        assert_eq!(seed.pins.len(), 2);
        assert_eq!(seed.pins[0].code, "000123");
        assert_eq!(seed.pins[0].description.as_deref(), Some("VIP"));
        assert!(seed.pins[1].description.is_none());
    }

    #[test]
    fn test_sections_are_optional() {
        let seed = parse("pins: []\n").unwrap();
        assert!(seed.admins.is_empty());
        assert!(seed.pins.is_empty());
    }

    #[test]
    fn test_rejects_unknown_sections() {
        assert!(parse("users: []\n").is_err());
    }
}

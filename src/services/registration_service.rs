use std::sync::Arc;

use chrono::Utc;
use csv::WriterBuilder;
use tracing::info;

use crate::errors::{Result, ScangateError};
use crate::storage::{NewRegistration, RegistrationRow, Storage};

/// Fourth CSV column value for registrations without an issuing code.
pub const DIRECT_ACCESS_MARKER: &str = "direct";

/// Export header: name, phone, formatted timestamp, issuing code.
pub const CSV_HEADER: [&str; 4] = ["Name", "Phone", "Registered At", "Source"];

const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A submitted intake form, before validation.
#[derive(Debug, Clone)]
pub struct SubmitForm {
    /// Code token from the scanned URL, if any.
    pub code: Option<String>,
    pub name: String,
    pub phone: String,
}

/// Result of a stored submission: where to send the visitor next.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub destination_url: String,
    pub linked_code: Option<String>,
}

/// Stores intake submissions and reads the registry back out.
pub struct RegistrationService {
    storage: Arc<dyn Storage>,
    default_destination: String,
}

impl RegistrationService {
    pub fn new(storage: Arc<dyn Storage>, default_destination: String) -> Self {
        Self {
            storage,
            default_destination,
        }
    }

    /// Validate and store one submission.
    ///
    /// Name and phone must be non-empty after trimming; the trimmed values
    /// are what gets stored. An unknown or missing code is a soft condition:
    /// the row is stored without linkage and the visitor is sent to the
    /// default destination. Repeated submissions create repeated rows.
    pub async fn submit(
        &self,
        form: SubmitForm,
        ip_address: Option<String>,
    ) -> Result<SubmitOutcome> {
        let name = form.name.trim();
        let phone = form.phone.trim();

        if name.is_empty() || phone.is_empty() {
            return Err(ScangateError::validation("Name and phone are required"));
        }

        let linked = match form.code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => self.storage.find_active_code(code).await?,
            None => None,
        };

        self.storage
            .insert_registration(NewRegistration {
                qr_code_id: linked.as_ref().map(|c| c.id.clone()),
                name: name.to_string(),
                phone: phone.to_string(),
                ip_address,
            })
            .await?;

        let destination_url = linked
            .as_ref()
            .map(|c| c.destination_url.clone())
            .unwrap_or_else(|| self.default_destination.clone());

        info!(
            "Registration stored (code: {})",
            linked
                .as_ref()
                .map(|c| c.code.as_str())
                .unwrap_or(DIRECT_ACCESS_MARKER)
        );

        Ok(SubmitOutcome {
            destination_url,
            linked_code: linked.map(|c| c.code),
        })
    }

    /// All registrations, newest first. The caller replaces any previous
    /// snapshot wholesale.
    pub async fn list(&self) -> Result<Vec<RegistrationRow>> {
        self.storage.list_registrations().await
    }

    /// In-memory filter: case-insensitive substring on name, literal
    /// substring on phone. Never touches the backend.
    pub fn filter(rows: &[RegistrationRow], term: &str) -> Vec<RegistrationRow> {
        if term.is_empty() {
            return rows.to_vec();
        }
        let needle = term.to_lowercase();
        rows.iter()
            .filter(|row| row.name.to_lowercase().contains(&needle) || row.phone.contains(term))
            .cloned()
            .collect()
    }

    /// Serialize rows as CSV: header plus one quoted row per registration.
    pub fn export_csv(rows: &[RegistrationRow]) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(vec![]);

        writer.write_record(CSV_HEADER)?;
        for row in rows {
            writer.write_record([
                row.name.as_str(),
                row.phone.as_str(),
                &row.registered_at.format(CSV_TIMESTAMP_FORMAT).to_string(),
                row.code.as_deref().unwrap_or(DIRECT_ACCESS_MARKER),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| ScangateError::serialization(format!("Failed to finish CSV: {}", e)))
    }

    /// Export filename stamped with the current date.
    pub fn export_filename() -> String {
        format!("registrations_{}.csv", Utc::now().format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(name: &str, phone: &str, code: Option<&str>) -> RegistrationRow {
        RegistrationRow {
            id: format!("id-{}", name),
            name: name.to_string(),
            phone: phone.to_string(),
            registered_at: chrono::Utc.with_ymd_and_hms(2026, 5, 18, 12, 30, 0).unwrap(),
            code: code.map(String::from),
            destination_url: code.map(|_| "https://example.com/".to_string()),
        }
    }

    #[test]
    fn test_filter_name_case_insensitive() {
        let rows = vec![row("Ana Torres", "555", None), row("Benito", "777", None)];
        let hits = RegistrationService::filter(&rows, "ana");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ana Torres");
    }

    #[test]
    fn test_filter_phone_literal_substring() {
        let rows = vec![row("Ana", "502-555-0199", None), row("Benito", "777", None)];
        let hits = RegistrationService::filter(&rows, "555");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].phone, "502-555-0199");
    }

    #[test]
    fn test_filter_empty_term_returns_everything() {
        let rows = vec![row("Ana", "555", None), row("Benito", "777", None)];
        assert_eq!(RegistrationService::filter(&rows, "").len(), 2);
    }

    #[test]
    fn test_filter_no_match() {
        let rows = vec![row("Ana", "555", None)];
        assert!(RegistrationService::filter(&rows, "zzz").is_empty());
    }

    #[test]
    fn test_export_csv_shape() {
        let rows = vec![
            row("Ana", "555", Some("qr_1_abcdefg")),
            row("Benito", "777", None),
        ];
        let bytes = RegistrationService::export_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), rows.len() + 1);
        assert_eq!(lines[0], "\"Name\",\"Phone\",\"Registered At\",\"Source\"");
        assert_eq!(
            lines[1],
            "\"Ana\",\"555\",\"2026-05-18 12:30:00\",\"qr_1_abcdefg\""
        );
        assert_eq!(
            lines[2],
            "\"Benito\",\"777\",\"2026-05-18 12:30:00\",\"direct\""
        );
    }

    #[test]
    fn test_export_csv_empty_set_is_header_only() {
        let bytes = RegistrationService::export_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_export_filename_is_date_stamped() {
        let filename = RegistrationService::export_filename();
        assert!(filename.starts_with("registrations_"));
        assert!(filename.ends_with(".csv"));
    }
}

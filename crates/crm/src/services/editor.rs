//! Record editor: validates and appends a new lead.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use monster_wash_core::{CustomerName, CustomerNameError, CustomerRecord, LeadStatus, Session};

use crate::store::{RecordStore, StoreError};

/// Which form fields must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequiredFields {
    /// Only the customer name.
    #[default]
    NameOnly,
    /// Customer name and phone number.
    NameAndPhone,
}

/// A form field that can be required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Name,
    Phone,
}

impl std::fmt::Display for LeadField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Phone => write!(f, "phone"),
        }
    }
}

/// One or more required fields were left blank.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("missing required field(s): {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<LeadField>,
}

fn join_fields(fields: &[LeadField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur when submitting a lead.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Required fields are missing; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The name is present but unacceptable; nothing was written.
    #[error("invalid name: {0}")]
    InvalidName(CustomerNameError),

    /// The lead could not be persisted.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Lead entry form as submitted by staff.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub vehicle: String,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub notes: String,
}

/// Validates lead forms and appends them to a [`RecordStore`].
pub struct RecordEditor<'a> {
    store: &'a dyn RecordStore,
    required: RequiredFields,
}

impl<'a> RecordEditor<'a> {
    /// Create an editor writing to `store`.
    #[must_use]
    pub const fn new(store: &'a dyn RecordStore, required: RequiredFields) -> Self {
        Self { store, required }
    }

    /// Validate `form`, stamp it with today's date and `session`'s name, and store it.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Validation` if a required field is blank, or
    /// `SubmitError::Store` if the lead could not be saved.
    pub fn submit(&self, session: &Session, form: LeadForm) -> Result<CustomerRecord, SubmitError> {
        self.submit_on(session, form, chrono::Local::now().date_naive())
    }

    /// Like [`Self::submit`], stamping the lead with `today`.
    ///
    /// # Errors
    ///
    /// See [`Self::submit`].
    pub fn submit_on(
        &self,
        session: &Session,
        form: LeadForm,
        today: NaiveDate,
    ) -> Result<CustomerRecord, SubmitError> {
        let record = self.build(session, form, today)?;
        let total = self.store.append(record.clone())?;

        tracing::info!(
            name = %record.name,
            owner = %record.owner,
            status = %record.status,
            total,
            "Lead saved"
        );
        Ok(record)
    }

    fn build(
        &self,
        session: &Session,
        form: LeadForm,
        today: NaiveDate,
    ) -> Result<CustomerRecord, SubmitError> {
        let mut missing = Vec::new();

        let name = match CustomerName::parse(&form.name) {
            Ok(name) => Some(name),
            Err(CustomerNameError::Empty) => {
                missing.push(LeadField::Name);
                None
            }
            Err(e) => return Err(SubmitError::InvalidName(e)),
        };

        let phone = form.phone.trim();
        if self.required == RequiredFields::NameAndPhone && phone.is_empty() {
            missing.push(LeadField::Phone);
        }

        let Some(name) = name.filter(|_| missing.is_empty()) else {
            tracing::debug!(?missing, "Lead rejected");
            return Err(ValidationError { missing }.into());
        };

        Ok(CustomerRecord {
            name,
            phone: phone.to_owned(),
            vehicle: form.vehicle.trim().to_owned(),
            status: form.status,
            notes: form.notes.trim().to_owned(),
            owner: session.display_name.clone(),
            created_on: today,
        })
    }
}

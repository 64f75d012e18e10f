//! Generic contact forms (contact page, referral program).

use std::collections::BTreeMap;

use crate::error::LeadError;
use crate::prequalifier::FormStatus;
use crate::submit::{LeadRecord, LeadSubmitter};

/// Input kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
}

/// One field of a [`FormDefinition`]. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// Static description of a contact-style form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub button_label: &'static str,
    pub fields: Vec<FormField>,
}

impl FormDefinition {
    pub const SUCCESS_TITLE: &'static str = "¡Mensaje Enviado!";
    pub const SUCCESS_BODY: &'static str = "Un asesor se pondrá en contacto a la brevedad.";
    pub const SEND_ANOTHER_LABEL: &'static str = "Enviar otro";

    /// The "Hablemos" contact page form.
    pub fn contact() -> Self {
        Self {
            id: "contact",
            title: "Envíanos un mensaje",
            subtitle: None,
            button_label: "Solicitar Información",
            fields: vec![
                FormField::new("name", "Nombre Completo", FieldKind::Text),
                FormField::new("email", "Correo Electrónico", FieldKind::Email),
                FormField::new("phone", "Teléfono", FieldKind::Tel),
            ],
        }
    }

    /// The referral program registration form.
    pub fn referral() -> Self {
        Self {
            id: "referral",
            title: "Registro de Referido",
            subtitle: Some("Ingresa tus datos y los de tu recomendado."),
            button_label: "Registrar Referido",
            fields: vec![
                FormField::new("referrer_name", "Tu Nombre (Referente)", FieldKind::Text),
                FormField::new("referrer_phone", "Tu Teléfono", FieldKind::Tel),
                FormField::new("referee_name", "Nombre del Interesado", FieldKind::Text),
                FormField::new("referee_phone", "Teléfono del Interesado", FieldKind::Tel),
            ],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Minimal shape check: `local@domain.tld` without whitespace.
pub(crate) fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

/// A filled-in instance of a [`FormDefinition`].
#[derive(Debug, Clone)]
pub struct ContactForm {
    definition: FormDefinition,
    values: BTreeMap<String, String>,
    status: FormStatus,
}

impl ContactForm {
    pub fn new(definition: FormDefinition) -> Self {
        Self {
            definition,
            values: BTreeMap::new(),
            status: FormStatus::Idle,
        }
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Set a field value. Unknown field names are rejected.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), LeadError> {
        if self.definition.field(name).is_none() {
            return Err(LeadError::UnknownField(name.to_string()));
        }
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Names of required fields that are still blank, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.definition
            .fields
            .iter()
            .filter(|f| self.value(f.name).map_or(true, |v| v.trim().is_empty()))
            .map(|f| f.name)
            .collect()
    }

    fn validate(&self) -> Result<(), LeadError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(LeadError::MissingFields(missing.join(", ")));
        }
        let bad_email = self
            .definition
            .fields
            .iter()
            .filter(|f| f.kind == FieldKind::Email)
            .any(|f| !self.value(f.name).is_some_and(is_valid_email));
        if bad_email {
            return Err(LeadError::InvalidEmail);
        }
        Ok(())
    }

    /// Validate and hand the record to `submitter`.
    pub async fn submit(&mut self, submitter: &dyn LeadSubmitter) -> Result<(), LeadError> {
        if matches!(self.status, FormStatus::Submitting | FormStatus::Success) {
            return Err(LeadError::NotReady);
        }
        self.validate()?;

        self.status = FormStatus::Submitting;
        let record = LeadRecord::Contact {
            form_id: self.definition.id.to_string(),
            fields: self.values.clone(),
        };
        match submitter.submit(&record).await {
            Ok(()) => {
                self.status = FormStatus::Success;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(form = self.definition.id, error = %e, "Contact form submission failed");
                self.status = FormStatus::Error;
                Err(e)
            }
        }
    }

    /// "Enviar otro": clear the values and return to idle.
    pub fn send_another(&mut self) {
        self.values.clear();
        self.status = FormStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingSubmitter {
        records: Mutex<Vec<LeadRecord>>,
    }

    #[async_trait]
    impl LeadSubmitter for CapturingSubmitter {
        async fn submit(&self, record: &LeadRecord) -> Result<(), LeadError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct RejectingSubmitter;

    #[async_trait]
    impl LeadSubmitter for RejectingSubmitter {
        async fn submit(&self, _record: &LeadRecord) -> Result<(), LeadError> {
            Err(LeadError::Submission("503".to_string()))
        }
    }

    fn filled_contact() -> ContactForm {
        let mut form = ContactForm::new(FormDefinition::contact());
        form.set("name", "Luis Pérez").unwrap();
        form.set("email", "luis@example.mx").unwrap();
        form.set("phone", "3312345678").unwrap();
        form
    }

    #[test]
    fn test_definitions() {
        let contact = FormDefinition::contact();
        assert_eq!(contact.id, "contact");
        assert_eq!(contact.button_label, "Solicitar Información");
        assert_eq!(contact.field("email").unwrap().kind, FieldKind::Email);
        assert!(contact.subtitle.is_none());

        let referral = FormDefinition::referral();
        assert_eq!(referral.fields.len(), 4);
        assert_eq!(referral.title, "Registro de Referido");
        assert!(referral.subtitle.is_some());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email(" ana@sub.example.mx "));
        assert!(!is_valid_email("ana.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana@example."));
        assert!(!is_valid_email("ana@.com"));
        assert!(!is_valid_email("an a@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut form = ContactForm::new(FormDefinition::contact());
        assert_eq!(
            form.set("company", "ACME"),
            Err(LeadError::UnknownField("company".to_string()))
        );
    }

    #[test]
    fn test_missing_fields_in_order() {
        let mut form = ContactForm::new(FormDefinition::contact());
        assert_eq!(form.missing_fields(), vec!["name", "email", "phone"]);
        form.set("email", "x@y.com").unwrap();
        form.set("phone", "  ").unwrap();
        assert_eq!(form.missing_fields(), vec!["name", "phone"]);
    }

    #[tokio::test]
    async fn test_submit_incomplete_form() {
        let submitter = CapturingSubmitter::default();
        let mut form = ContactForm::new(FormDefinition::contact());
        form.set("name", "Luis").unwrap();
        let err = form.submit(&submitter).await.unwrap_err();
        assert_eq!(err, LeadError::MissingFields("email, phone".to_string()));
        assert_eq!(form.status(), FormStatus::Idle);
        assert!(submitter.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_email() {
        let submitter = CapturingSubmitter::default();
        let mut form = filled_contact();
        form.set("email", "luis").unwrap();
        assert_eq!(form.submit(&submitter).await, Err(LeadError::InvalidEmail));
    }

    #[tokio::test]
    async fn test_submit_then_send_another() {
        let submitter = CapturingSubmitter::default();
        let mut form = filled_contact();
        form.submit(&submitter).await.unwrap();
        assert_eq!(form.status(), FormStatus::Success);
        assert_eq!(form.submit(&submitter).await, Err(LeadError::NotReady));

        {
            let records = submitter.records.lock().unwrap();
            assert_eq!(records.len(), 1);
            match &records[0] {
                LeadRecord::Contact { form_id, fields } => {
                    assert_eq!(form_id, "contact");
                    assert_eq!(fields["name"], "Luis Pérez");
                }
                other => panic!("unexpected record: {other:?}"),
            }
        }

        form.send_another();
        assert_eq!(form.status(), FormStatus::Idle);
        assert!(form.value("name").is_none());
    }

    #[tokio::test]
    async fn test_failed_submit_sets_error_status() {
        let mut form = filled_contact();
        let err = form.submit(&RejectingSubmitter).await.unwrap_err();
        assert_eq!(err, LeadError::Submission("503".to_string()));
        assert_eq!(form.status(), FormStatus::Error);
        assert_eq!(form.value("phone"), Some("3312345678"));
    }

    #[tokio::test]
    async fn test_referral_without_email_field() {
        let submitter = CapturingSubmitter::default();
        let mut form = ContactForm::new(FormDefinition::referral());
        for (name, value) in [
            ("referrer_name", "Ana"),
            ("referrer_phone", "3300000000"),
            ("referee_name", "Beto"),
            ("referee_phone", "3311111111"),
        ] {
            form.set(name, value).unwrap();
        }
        form.submit(&submitter).await.unwrap();
        assert_eq!(form.status(), FormStatus::Success);
    }
}

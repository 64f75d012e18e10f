//! Three-step prequalification questionnaire.
//!
//! Step transitions:
//! - Intent -> Financial -> Contact via `next` (current step must be complete)
//! - back one step via `back` (never below Intent)
//! - `submit` from Contact only: Idle/Error -> Submitting -> Success/Error
//! - `restart` from anywhere: back to Intent, Idle (answers are kept)

use std::fmt;

use serde::Serialize;

use crate::contact::is_valid_email;
use crate::error::LeadError;
use crate::submit::{LeadRecord, LeadSubmitter};

const PURPOSE_OPTIONS: &[&str] = &[
    "Vivir de forma permanente",
    "Segunda residencia para mi familia",
    "Patrimonio para hijos/familia",
    "Solo estoy explorando opciones",
];
const TIMELINE_OPTIONS: &[&str] = &[
    "Dentro de 3 meses",
    "3 a 6 meses",
    "6 a 12 meses",
    "Más de 12 meses",
];
const DECISION_FACTOR_OPTIONS: &[&str] = &[
    "Plusvalía e Inversión",
    "Seguridad y Privacidad",
    "Ubicación y Conectividad",
    "Diseño y Espacios",
];
const BUDGET_OPTIONS: &[&str] = &[
    "Menos de $5 millones",
    "$5.0M – $5.8M",
    "$5.9M – $7.3M",
    "Más de $7.3M",
];
const FINANCING_OPTIONS: &[&str] = &[
    "Recursos propios (contado)",
    "Crédito ya preaprobado",
    "Crédito en revisión",
    "Sin financiamiento aún",
];
const PREVIOUS_EXPERIENCE_OPTIONS: &[&str] = &[
    "Sí, casa habitación",
    "Sí, terrenos o locales",
    "No, sería mi primera propiedad",
];
const DECISION_MAKER_OPTIONS: &[&str] = &["Yo únicamente", "Pareja y yo", "Toda la familia"];

// =============================================================================
// Steps and fields
// =============================================================================

/// Questionnaire step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Intent = 1,
    Financial = 2,
    Contact = 3,
}

impl Step {
    pub const COUNT: u8 = 3;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Intent => "Intención",
            Step::Financial => "Perfil Financiero",
            Step::Contact => "Contacto Final",
        }
    }

    /// Fields that must be answered before leaving this step.
    pub fn required_fields(self) -> &'static [Field] {
        match self {
            Step::Intent => &[Field::Purpose, Field::Timeline, Field::DecisionFactor],
            Step::Financial => &[
                Field::Budget,
                Field::Financing,
                Field::PreviousExperience,
            ],
            Step::Contact => &[
                Field::Name,
                Field::Email,
                Field::Phone,
                Field::LocationInterest,
                Field::DecisionMaker,
            ],
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::Intent => Some(Step::Financial),
            Step::Financial => Some(Step::Contact),
            Step::Contact => None,
        }
    }

    fn previous(self) -> Option<Step> {
        match self {
            Step::Intent => None,
            Step::Financial => Some(Step::Intent),
            Step::Contact => Some(Step::Financial),
        }
    }
}

/// A question of the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Purpose,
    Timeline,
    DecisionFactor,
    Budget,
    Financing,
    PreviousExperience,
    LocationInterest,
    DecisionMaker,
    Name,
    Email,
    Phone,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Purpose => "purpose",
            Field::Timeline => "timeline",
            Field::DecisionFactor => "decision_factor",
            Field::Budget => "budget",
            Field::Financing => "financing",
            Field::PreviousExperience => "previous_experience",
            Field::LocationInterest => "location_interest",
            Field::DecisionMaker => "decision_maker",
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    pub fn question(self) -> &'static str {
        match self {
            Field::Purpose => "¿Con qué propósito desea adquirir una casa?",
            Field::Timeline => "¿En qué rango de tiempo le gustaría concretar?",
            Field::DecisionFactor => "¿Qué factor es determinante para tu decisión?",
            Field::Budget => "¿Cuál es su rango de presupuesto?",
            Field::Financing => "¿Cómo planea financiar la compra?",
            Field::PreviousExperience => "¿Ha adquirido propiedades anteriormente?",
            Field::LocationInterest => "Ubicación actual y zona de interés",
            Field::DecisionMaker => "¿Quién decidirá la compra?",
            Field::Name => "Nombre Completo",
            Field::Email => "Correo Electrónico",
            Field::Phone => "Teléfono de Contacto",
        }
    }

    /// Fixed options for single-choice questions, `None` for free text.
    pub fn options(self) -> Option<&'static [&'static str]> {
        match self {
            Field::Purpose => Some(PURPOSE_OPTIONS),
            Field::Timeline => Some(TIMELINE_OPTIONS),
            Field::DecisionFactor => Some(DECISION_FACTOR_OPTIONS),
            Field::Budget => Some(BUDGET_OPTIONS),
            Field::Financing => Some(FINANCING_OPTIONS),
            Field::PreviousExperience => Some(PREVIOUS_EXPERIENCE_OPTIONS),
            Field::DecisionMaker => Some(DECISION_MAKER_OPTIONS),
            Field::LocationInterest | Field::Name | Field::Email | Field::Phone => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Data and status
// =============================================================================

/// Answers collected by the questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrequalifierData {
    pub purpose: String,
    pub timeline: String,
    pub decision_factor: String,
    pub budget: String,
    pub financing: String,
    pub previous_experience: String,
    pub location_interest: String,
    pub decision_maker: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl PrequalifierData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Purpose => &self.purpose,
            Field::Timeline => &self.timeline,
            Field::DecisionFactor => &self.decision_factor,
            Field::Budget => &self.budget,
            Field::Financing => &self.financing,
            Field::PreviousExperience => &self.previous_experience,
            Field::LocationInterest => &self.location_interest,
            Field::DecisionMaker => &self.decision_maker,
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Purpose => &mut self.purpose,
            Field::Timeline => &mut self.timeline,
            Field::DecisionFactor => &mut self.decision_factor,
            Field::Budget => &mut self.budget,
            Field::Financing => &mut self.financing,
            Field::PreviousExperience => &mut self.previous_experience,
            Field::LocationInterest => &mut self.location_interest,
            Field::DecisionMaker => &mut self.decision_maker,
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        }
    }
}

/// Submission status shared by the lead forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

// =============================================================================
// Form
// =============================================================================

/// State of one prequalification questionnaire.
#[derive(Debug, Clone)]
pub struct PrequalifierForm {
    step: Step,
    status: FormStatus,
    data: PrequalifierData,
}

impl Default for PrequalifierForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PrequalifierForm {
    pub fn new() -> Self {
        Self {
            step: Step::Intent,
            status: FormStatus::Idle,
            data: PrequalifierData::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn data(&self) -> &PrequalifierData {
        &self.data
    }

    /// Answer a single-choice question.
    pub fn select(&mut self, field: Field, option: &str) -> Result<(), LeadError> {
        let options = field
            .options()
            .ok_or_else(|| LeadError::WrongInputKind(field.to_string()))?;
        if !options.contains(&option) {
            return Err(LeadError::InvalidOption {
                field: field.to_string(),
                option: option.to_string(),
            });
        }
        *self.data.slot(field) = option.to_string();
        Ok(())
    }

    /// Fill a free-text field.
    pub fn set_text(&mut self, field: Field, value: &str) -> Result<(), LeadError> {
        if field.options().is_some() {
            return Err(LeadError::WrongInputKind(field.to_string()));
        }
        *self.data.slot(field) = value.to_string();
        Ok(())
    }

    /// Check that every required field of `step` is answered.
    pub fn validate(&self, step: Step) -> Result<(), LeadError> {
        let incomplete = step
            .required_fields()
            .iter()
            .any(|f| self.data.get(*f).trim().is_empty());
        if incomplete {
            return Err(LeadError::IncompleteStep(step.number()));
        }
        if step == Step::Contact && !is_valid_email(&self.data.email) {
            return Err(LeadError::InvalidEmail);
        }
        Ok(())
    }

    pub fn is_step_valid(&self) -> bool {
        self.validate(self.step).is_ok()
    }

    /// Advance to the next step. The current step must be complete.
    pub fn next(&mut self) -> Result<Step, LeadError> {
        self.validate(self.step)?;
        let next = self.step.next().ok_or(LeadError::NotReady)?;
        self.step = next;
        Ok(next)
    }

    /// Go back one step; stays on the first step.
    pub fn back(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Submit the questionnaire through `submitter`.
    ///
    /// Only allowed on the last step with a complete step, and not while a
    /// submission is running or after success.
    pub async fn submit(&mut self, submitter: &dyn LeadSubmitter) -> Result<(), LeadError> {
        if self.step != Step::Contact
            || matches!(self.status, FormStatus::Submitting | FormStatus::Success)
        {
            return Err(LeadError::NotReady);
        }
        self.validate(Step::Contact)?;

        self.status = FormStatus::Submitting;
        let record = LeadRecord::Prequalification(self.data.clone());
        match submitter.submit(&record).await {
            Ok(()) => {
                self.status = FormStatus::Success;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prequalification submission failed");
                self.status = FormStatus::Error;
                Err(e)
            }
        }
    }

    /// Start over from the first step.
    pub fn restart(&mut self) {
        self.step = Step::Intent;
        self.status = FormStatus::Idle;
    }

    /// Confirmation text shown after a successful submission.
    pub fn success_message(&self) -> Option<String> {
        (self.status == FormStatus::Success).then(|| {
            format!(
                "¡Pre-calificación Exitosa! Hemos recibido tus datos. Un asesor especializado en el perfil de {} se pondrá en contacto contigo a la brevedad.",
                self.data.budget
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSubmitter {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSubmitter {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl LeadSubmitter for CountingSubmitter {
        async fn submit(&self, record: &LeadRecord) -> Result<(), LeadError> {
            assert_eq!(record.kind(), "prequalification");
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(LeadError::Submission("endpoint down".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn fill_intent(form: &mut PrequalifierForm) {
        form.select(Field::Purpose, "Vivir de forma permanente").unwrap();
        form.select(Field::Timeline, "3 a 6 meses").unwrap();
        form.select(Field::DecisionFactor, "Seguridad y Privacidad").unwrap();
    }

    fn fill_financial(form: &mut PrequalifierForm) {
        form.select(Field::Budget, "$5.9M – $7.3M").unwrap();
        form.select(Field::Financing, "Crédito ya preaprobado").unwrap();
        form.select(Field::PreviousExperience, "Sí, casa habitación").unwrap();
    }

    fn fill_contact(form: &mut PrequalifierForm) {
        form.set_text(Field::Name, "Ana López").unwrap();
        form.set_text(Field::Email, "ana@example.com").unwrap();
        form.set_text(Field::Phone, "33 1234 5678").unwrap();
        form.set_text(Field::LocationInterest, "Zapopan, zona sur").unwrap();
        form.select(Field::DecisionMaker, "Pareja y yo").unwrap();
    }

    fn completed_form() -> PrequalifierForm {
        let mut form = PrequalifierForm::new();
        fill_intent(&mut form);
        form.next().unwrap();
        fill_financial(&mut form);
        form.next().unwrap();
        fill_contact(&mut form);
        form
    }

    #[test]
    fn test_starts_on_intent_step() {
        let form = PrequalifierForm::new();
        assert_eq!(form.step(), Step::Intent);
        assert_eq!(form.status(), FormStatus::Idle);
        assert!(!form.is_step_valid());
    }

    #[test]
    fn test_cannot_advance_incomplete_step() {
        let mut form = PrequalifierForm::new();
        form.select(Field::Purpose, "Vivir de forma permanente").unwrap();
        assert_eq!(form.next(), Err(LeadError::IncompleteStep(1)));
        assert_eq!(form.step(), Step::Intent);
    }

    #[test]
    fn test_full_walk_through_steps() {
        let mut form = PrequalifierForm::new();
        fill_intent(&mut form);
        assert_eq!(form.next(), Ok(Step::Financial));
        assert_eq!(form.next(), Err(LeadError::IncompleteStep(2)));
        fill_financial(&mut form);
        assert_eq!(form.next(), Ok(Step::Contact));
        fill_contact(&mut form);
        assert!(form.is_step_valid());
        assert_eq!(form.next(), Err(LeadError::NotReady));
    }

    #[test]
    fn test_back_never_below_first_step() {
        let mut form = completed_form();
        assert_eq!(form.back(), Step::Financial);
        assert_eq!(form.back(), Step::Intent);
        assert_eq!(form.back(), Step::Intent);
    }

    #[test]
    fn test_select_rejects_unknown_option() {
        let mut form = PrequalifierForm::new();
        let err = form.select(Field::Budget, "Un millón").unwrap_err();
        assert_eq!(
            err,
            LeadError::InvalidOption {
                field: "budget".to_string(),
                option: "Un millón".to_string(),
            }
        );
        assert_eq!(form.data().budget, "");
    }

    #[test]
    fn test_input_kind_is_enforced() {
        let mut form = PrequalifierForm::new();
        assert_eq!(
            form.set_text(Field::Budget, "lo que sea"),
            Err(LeadError::WrongInputKind("budget".to_string()))
        );
        assert_eq!(
            form.select(Field::Email, "ana@example.com"),
            Err(LeadError::WrongInputKind("email".to_string()))
        );
    }

    #[test]
    fn test_blank_text_counts_as_missing() {
        let mut form = completed_form();
        form.set_text(Field::Phone, "   ").unwrap();
        assert_eq!(form.validate(Step::Contact), Err(LeadError::IncompleteStep(3)));
    }

    #[test]
    fn test_contact_step_requires_valid_email() {
        let mut form = completed_form();
        form.set_text(Field::Email, "ana.example.com").unwrap();
        assert_eq!(form.validate(Step::Contact), Err(LeadError::InvalidEmail));
    }

    #[test]
    fn test_every_choice_field_has_options() {
        for step in [Step::Intent, Step::Financial, Step::Contact] {
            for field in step.required_fields() {
                if let Some(options) = field.options() {
                    assert!(!options.is_empty(), "{field}");
                }
                assert!(!field.question().is_empty());
            }
        }
        assert_eq!(Step::Contact.number(), Step::COUNT);
        assert_eq!(Step::Financial.label(), "Perfil Financiero");
    }

    #[tokio::test]
    async fn test_submit_before_last_step_rejected() {
        let submitter = CountingSubmitter::new(false);
        let mut form = PrequalifierForm::new();
        fill_intent(&mut form);
        assert_eq!(form.submit(&submitter).await, Err(LeadError::NotReady));
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_submit() {
        let submitter = CountingSubmitter::new(false);
        let mut form = completed_form();
        form.submit(&submitter).await.unwrap();
        assert_eq!(form.status(), FormStatus::Success);
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);

        let message = form.success_message().unwrap();
        assert!(message.contains("$5.9M – $7.3M"));

        // A second submit after success is refused.
        assert_eq!(form.submit(&submitter).await, Err(LeadError::NotReady));
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_submit_can_be_retried() {
        let failing = CountingSubmitter::new(true);
        let mut form = completed_form();
        let err = form.submit(&failing).await.unwrap_err();
        assert!(matches!(err, LeadError::Submission(_)));
        assert_eq!(form.status(), FormStatus::Error);
        assert!(form.success_message().is_none());

        let ok = CountingSubmitter::new(false);
        form.submit(&ok).await.unwrap();
        assert_eq!(form.status(), FormStatus::Success);
    }

    #[tokio::test]
    async fn test_restart_keeps_answers() {
        let submitter = CountingSubmitter::new(false);
        let mut form = completed_form();
        form.submit(&submitter).await.unwrap();
        form.restart();
        assert_eq!(form.step(), Step::Intent);
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.data().name, "Ana López");
        assert!(form.is_step_valid());
    }
}

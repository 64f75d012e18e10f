//! Lead capture for Bosques California.
//!
//! The three-step prequalification questionnaire and the generic contact
//! forms, as explicit state machines with client-side validation. Records
//! are handed to a [`LeadSubmitter`]; the bundled one only simulates the
//! external form endpoint.

pub mod contact;
pub mod error;
pub mod prequalifier;
pub mod submit;

pub use contact::{ContactForm, FieldKind, FormDefinition, FormField};
pub use error::LeadError;
pub use prequalifier::{Field, FormStatus, PrequalifierData, PrequalifierForm, Step};
pub use submit::{LeadRecord, LeadSubmitter, SimulatedSubmitter};

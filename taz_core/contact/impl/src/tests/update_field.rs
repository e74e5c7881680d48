use pretty_assertions::assert_eq;
use taz_core_contact_contracts::{ContactFeatureService, SubmissionState};
use taz_demo::contact::{INVALID_FORM, VALID_FORM};
use taz_models::contact::{ContactForm, ContactFormField, FieldError};

use crate::tests::Sut;

#[test]
fn set_value() {
    // Arrange
    let sut = Sut::default();

    // Act
    sut.update_field(ContactFormField::Name, "Maria".into());
    sut.update_field(ContactFormField::Phone, "(11) 98765-4321".into());

    // Assert
    assert_eq!(
        sut.form(),
        ContactForm {
            name: "Maria".into(),
            phone: "(11) 98765-4321".into(),
            ..Default::default()
        }
    );
    assert_eq!(sut.state(), SubmissionState::Idle);
}

#[test]
fn clears_only_the_edited_error() {
    // Arrange
    let sut = Sut::default().with_form(&INVALID_FORM);
    {
        let mut inner = sut.state.lock();
        inner.errors.insert(ContactFormField::Email, FieldError::InvalidEmail);
        inner
            .errors
            .insert(ContactFormField::Message, FieldError::TooShort { min: 10 });
    }

    // Act
    sut.update_field(ContactFormField::Email, VALID_FORM.email.clone());

    // Assert
    let errors = sut.errors();
    assert_eq!(errors.len(), 1);
    assert!(!errors.contains(ContactFormField::Email));
    assert!(errors.contains(ContactFormField::Message));
    assert_eq!(sut.form().email, VALID_FORM.email);
}

use anyhow::bail;
use clap::Args;
use taz_config::Config;
use taz_core_contact_contracts::{ContactFeatureService, SubmissionOutcome};
use taz_core_contact_impl::validate::format_phone;
use taz_di::Provide;
use taz_models::contact::ContactFormField;
use taz_shared_contracts::toast::ToastService;

use crate::environment::{
    types::{ContactFeature, Toast},
    Provider,
};

#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Your name
    #[arg(long)]
    pub name: String,
    /// The email address we should reply to
    #[arg(long)]
    pub email: String,
    /// A brazilian phone number, e.g. (11) 98765-4321
    #[arg(long)]
    pub phone: Option<String>,
    /// What can we do for you?
    #[arg(long)]
    pub message: String,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let mut provider = Provider::from_config(&config);
        let contact: ContactFeature = provider.provide();
        let toast: Toast = provider.provide();

        let sender = match self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(phone) => format!("{} <{}>, {}", self.name, self.email, format_phone(phone)),
            None => format!("{} <{}>", self.name, self.email),
        };

        contact.update_field(ContactFormField::Name, self.name);
        contact.update_field(ContactFormField::Email, self.email);
        contact.update_field(ContactFormField::Phone, self.phone.unwrap_or_default());
        contact.update_field(ContactFormField::Message, self.message);

        let mut submission = std::pin::pin!(contact.submit());
        let completed = tokio::select! {
            outcome = &mut submission => Some(outcome),
            _ = tokio::signal::ctrl_c() => None,
        };
        let outcome = match completed {
            Some(outcome) => outcome,
            None => {
                contact.cancel();
                submission.await
            }
        };

        if let Some(notice) = toast.current() {
            println!("[{}] {}", notice.severity.as_str(), notice.message);
        }

        match outcome {
            SubmissionOutcome::Succeeded => {
                println!("Sent as {sender}");
                Ok(())
            }
            SubmissionOutcome::Invalid(errors) => {
                for (field, message) in errors.messages() {
                    eprintln!("  {}: {message}", field.label());
                }
                bail!("The form contains {} invalid field(s)", errors.len())
            }
            SubmissionOutcome::Rejected(rejection) => bail!(rejection),
            SubmissionOutcome::Failed => bail!("The message could not be delivered"),
            SubmissionOutcome::Cancelled => bail!("Cancelled"),
            SubmissionOutcome::Ignored => bail!("Another submission is still in progress"),
        }
    }
}

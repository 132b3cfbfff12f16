pub mod email_sender;
pub mod sendgrid_email_sender;

pub use email_sender::{EmailAddress, EmailMessage, EmailSender};
pub use sendgrid_email_sender::SendGridEmailSender;

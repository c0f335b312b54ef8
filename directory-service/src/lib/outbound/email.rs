pub mod smtp;

pub use smtp::SmtpEmailNotifier;

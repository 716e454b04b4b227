//! Email service for booking notifications and password resets

use chrono::{DateTime, Utc};
use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
    models::{
        booking::Booking,
        location::{Game, Location},
        user::User,
    },
};

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

/// Format a game duration in minutes as "1 h 30 min"
fn format_duration(minutes: i32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 {
        format!("{} h {} min", hours, rest)
    } else {
        format!("{} min", rest)
    }
}

/// Format a slot instant for email bodies
fn format_slot(slot: DateTime<Utc>) -> String {
    slot.format("%A, %e %B %Y, %H:%M UTC").to_string()
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send a booking confirmation to the booker
    pub async fn send_booking_confirmation(
        &self,
        to: &str,
        location: &Location,
        game: &Game,
        booking: &Booking,
    ) -> AppResult<()> {
        let subject = format!("Booking confirmed: {}", game.name);
        let body = format!(
            r#"Your booking is confirmed!

Location: {location_name}, {city}
Address: {address}
Game: {game_name}
Date and time: {slot}
Duration: {duration}
Players: {players}
Language: {language}

Thank you for booking! See you at the venue."#,
            location_name = location.name,
            city = location.city,
            address = location.address,
            game_name = game.name,
            slot = format_slot(booking.slot),
            duration = format_duration(game.duration),
            players = booking.players,
            language = booking.language.label(),
        );

        self.send_email(to, &subject, &body).await
    }

    /// Notify the location's franchise about a new booking
    pub async fn send_franchise_notification(
        &self,
        location: &Location,
        game: &Game,
        booking: &Booking,
        user: Option<&User>,
    ) -> AppResult<()> {
        let subject = format!("New booking: {}", game.name);
        let booker = match user {
            Some(user) => format!("\nUser: {} ({})", user.name, user.email),
            None => String::new(),
        };
        let body = format!(
            r#"Booking details

Location: {location_name}
Game: {game_name}
Date and time: {slot}
Players: {players}
Language: {language}
Contact email: {contact}{booker}"#,
            location_name = location.name,
            game_name = game.name,
            slot = format_slot(booking.slot),
            players = booking.players,
            language = booking.language.label(),
            contact = booking.email,
        );

        self.send_email(&location.franchise_email, &subject, &body).await
    }

    /// Tell the booker their booking was cancelled
    pub async fn send_cancellation(&self, to: &str, location_name: &str) -> AppResult<()> {
        let body = format!(
            "Your booking at \"{}\" has been cancelled.",
            location_name
        );
        self.send_email(to, "Booking cancelled", &body).await
    }

    /// Tell the franchise a booking was cancelled
    pub async fn send_franchise_cancellation(
        &self,
        to: &str,
        location_name: &str,
        slot: DateTime<Utc>,
        user: &User,
    ) -> AppResult<()> {
        let body = format!(
            r#"A booking was cancelled:

Location: {location_name}
Date: {slot}
Client: {name} ({email})"#,
            location_name = location_name,
            slot = format_slot(slot),
            name = user.name,
            email = user.email,
        );
        self.send_email(to, "Booking cancellation", &body).await
    }

    /// Send a password-reset link
    pub async fn send_password_reset(&self, to: &str, reset_link: &str) -> AppResult<()> {
        let body = format!(
            r#"Click the link to reset your password: {}

This link will expire in 15 minutes. If you didn't request a reset, ignore this email."#,
            reset_link
        );
        self.send_email(to, "Password Reset", &body).await
    }

    /// Generic email sending function
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Questbook");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<html><body><pre>{}</pre></body></html>"#,
                                body.replace('\n', "<br>")
                            )),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            // STARTTLS on the submission port
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) = (
            &self.config.smtp_username,
            &self.config.smtp_password,
        ) {
            mailer_builder.credentials(Credentials::new(
                username.clone(),
                password.clone(),
            ))
        } else {
            mailer_builder
        };

        let mailer = mailer_builder.build();

        mailer
            .send(&email)
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        tracing::info!("Email sent to {}", to);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(45), "45 min");
        assert_eq!(format_duration(60), "1 h 0 min");
        assert_eq!(format_duration(90), "1 h 30 min");
        assert_eq!(format_duration(135), "2 h 15 min");
    }
}

//! Business logic services

pub mod bookings;
pub mod email;
pub mod locations;
pub mod slots;
pub mod stats;
pub mod users;

use std::sync::Arc;

use crate::{
    config::{AuthConfig, ClientConfig, EmailConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub locations: locations::LocationsService,
    pub bookings: bookings::BookingsService,
    pub slots: slots::SlotsService,
    pub stats: stats::StatsService,
    pub email: email::EmailService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        email_config: EmailConfig,
        client_config: ClientConfig,
    ) -> Self {
        let email = email::EmailService::new(email_config);
        let slots = slots::SlotsService::new(
            Arc::new(repository.locations.clone()),
            Arc::new(repository.bookings.clone()),
        );

        Self {
            users: users::UsersService::new(
                repository.clone(),
                auth_config,
                client_config,
                email.clone(),
            ),
            locations: locations::LocationsService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone(), email.clone()),
            slots,
            stats: stats::StatsService::new(repository),
            email,
        }
    }
}

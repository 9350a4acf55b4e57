//! The backend part of the backend: the database interface
//!
//! The primary entry point to this module is the function [get_store_from_env], which returns an
//! object implementing the [BookingStore] trait. This object can be shared between threads in a
//! global application state and be used to create [BookingStoreFacade] instances for interaction
//! with the database. These provide a CRUD-like interface, using the data models from the [models]
//! module.
//!
//! The primary implementation of [BookingStore] ([postgres::PgDataStore]) wraps a PostgreSQL
//! connection pool and its corresponding [BookingStoreFacade] objects
//! ([postgres::PgDataStoreFacade]) hold a reference to one pooled connection each, using the
//! Diesel query DSL for implementing the database interaction.
//!
//! There is also a mock implementation for unittests.

use crate::cli_error::CliError;
use crate::cli_error::CliError::UnexpectedStoreError;
use crate::setup;
use chrono::NaiveDateTime;

pub mod models;
mod postgres;
mod schema;
#[cfg(test)]
pub mod store_mock;

/// Get a [BookingStore] instance, according to the "DATABASE_URL" environment variable.
///
/// The DATABASE_URL must be a PostgreSQL connection url, following the schema
/// "postgres://{user}:{password}@{host}/{database}".
pub fn get_store_from_env() -> Result<impl BookingStore, CliError> {
    postgres::PgDataStore::new(&setup::get_database_url_from_env()?)
        .map_err(|err| UnexpectedStoreError(err.to_string()))
}

pub type VenueId = i32;
pub type ArtistId = i32;
pub type ShowId = i32;

pub trait BookingStoreFacade {
    /// Get all venues, ordered by (city, state, name)
    fn get_venues(&mut self) -> Result<Vec<models::Venue>, StoreError>;
    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::Venue, StoreError>;
    /// Case-insensitive substring search on the venue name.
    ///
    /// An empty search term matches every venue.
    fn search_venues_by_name(&mut self, term: &str) -> Result<Vec<models::Venue>, StoreError>;
    fn create_venue(&mut self, venue: models::NewVenue) -> Result<VenueId, StoreError>;
    /// Update the venue row identified by `venue_id` with the given data.
    ///
    /// Returns `Err(StoreError::NotExisting)` when no such row exists.
    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::NewVenue,
    ) -> Result<(), StoreError>;
    /// Delete the venue row identified by `venue_id`.
    ///
    /// Shows referencing the venue are deleted along with it (ON DELETE CASCADE).
    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError>;

    /// Get all artists, ordered by name
    fn get_artists(&mut self) -> Result<Vec<models::Artist>, StoreError>;
    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::Artist, StoreError>;
    /// Case-insensitive substring search on the artist name.
    ///
    /// An empty search term matches every artist.
    fn search_artists_by_name(&mut self, term: &str) -> Result<Vec<models::Artist>, StoreError>;
    fn create_artist(&mut self, artist: models::NewArtist) -> Result<ArtistId, StoreError>;
    /// Update the artist row identified by `artist_id` with the given data.
    ///
    /// Returns `Err(StoreError::NotExisting)` when no such row exists.
    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::NewArtist,
    ) -> Result<(), StoreError>;

    /// Get all shows, joined with their venue and artist, in chronological order
    fn get_show_listings(&mut self) -> Result<Vec<models::ShowListing>, StoreError>;
    fn create_show(&mut self, show: models::NewShow) -> Result<ShowId, StoreError>;
    /// Get the shows hosted at the given venue that match the filter, joined with the performing
    /// artist, in chronological order
    fn get_shows_at_venue(
        &mut self,
        venue_id: VenueId,
        filter: ShowTimeFilter,
    ) -> Result<Vec<models::ShowAtVenue>, StoreError>;
    /// Get the shows of the given artist that match the filter, joined with the hosting venue, in
    /// chronological order
    fn get_shows_by_artist(
        &mut self,
        artist_id: ArtistId,
        filter: ShowTimeFilter,
    ) -> Result<Vec<models::ShowByArtist>, StoreError>;

    /// Count the shows with a start time later than `now`, grouped by venue.
    ///
    /// Venues without any upcoming show are not included in the result; callers default their
    /// count to zero.
    fn count_upcoming_shows_per_venue(
        &mut self,
        now: NaiveDateTime,
    ) -> Result<Vec<(VenueId, i64)>, StoreError>;
    /// Count the shows with a start time later than `now`, grouped by artist.
    ///
    /// Artists without any upcoming show are not included in the result; callers default their
    /// count to zero.
    fn count_upcoming_shows_per_artist(
        &mut self,
        now: NaiveDateTime,
    ) -> Result<Vec<(ArtistId, i64)>, StoreError>;
}

/// Filter options for retrieving shows from the store by their start time
///
/// The bounds are exclusive, matching the past/upcoming classification of the detail pages: a show
/// starting exactly "now" is in neither partition.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShowTimeFilter {
    /// Filter for shows that start strictly after the given point in time
    pub starts_after: Option<NaiveDateTime>,
    /// Filter for shows that start strictly before the given point in time
    pub starts_before: Option<NaiveDateTime>,
}

impl ShowTimeFilter {
    /// Filter for the "upcoming" partition relative to the given clock value
    pub fn upcoming(now: NaiveDateTime) -> Self {
        Self {
            starts_after: Some(now),
            starts_before: None,
        }
    }

    /// Filter for the "past" partition relative to the given clock value
    pub fn past(now: NaiveDateTime) -> Self {
        Self {
            starts_after: None,
            starts_before: Some(now),
        }
    }

    /// Checks if a show with the given start time matches the filter
    ///
    /// Usually, filtering should be done by the database. This function can be used for separate
    /// checks of individual shows in software.
    pub fn matches(&self, start_time: NaiveDateTime) -> bool {
        if let Some(after) = self.starts_after {
            if start_time <= after {
                return false;
            }
        }
        if let Some(before) = self.starts_before {
            if start_time >= before {
                return false;
            }
        }
        true
    }
}

pub trait BookingStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn BookingStoreFacade + 'a>, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    /// Connecting to the database failed. See string description for details.
    ConnectionError(String),
    /// The query could not be executed because of some error not covered by the other members (see
    /// string description)
    QueryError(diesel::result::Error),
    /// Database transaction could not be committed due to a conflicting concurrent transaction
    TransactionConflict,
    /// The requested entity does not exist
    NotExisting,
    /// The entity could not be created because a conflicting entity already exists (e.g. an artist
    /// with the same name)
    ConflictEntityExists,
    /// The provided data is invalid, i.e. it does not match the expected ranges or violates a
    /// SQL constraint. See string description for details.
    InvalidInputData(String),
    /// Some data queried from the database could not be deserialized. See string description for
    /// details.
    InvalidDataInDatabase(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::NotFound => Self::NotExisting,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => Self::ConflictEntityExists,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::SerializationFailure,
                _,
            ) => Self::TransactionConflict,
            diesel::result::Error::DatabaseError(
                e @ diesel::result::DatabaseErrorKind::ForeignKeyViolation
                | e @ diesel::result::DatabaseErrorKind::CheckViolation,
                _,
            ) => Self::InvalidInputData(format!("{:?}", e)),
            diesel::result::Error::SerializationError(e) => Self::InvalidInputData(e.to_string()),
            diesel::result::Error::DeserializationError(e) => {
                Self::InvalidDataInDatabase(e.to_string())
            }
            _ => Self::QueryError(error),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(error: r2d2::Error) -> Self {
        Self::ConnectionError(error.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Error connecting to database: {}", e),
            Self::QueryError(e) => write!(f, "Error while executing database query: {}", e),
            Self::TransactionConflict => f.write_str(
                "Database transaction could not be committed due to a conflicting concurrent transaction",
            ),
            Self::NotExisting => f.write_str("Database record does not exist."),
            Self::ConflictEntityExists => f.write_str("Database record exists already."),
            Self::InvalidInputData(e) => {
                write!(f, "Data to be stored in database is not valid: {}", e)
            }
            StoreError::InvalidDataInDatabase(e) => {
                write!(f, "Data queried from database could not be deserialized: {}", e)
            }
        }
    }
}

impl std::error::Error for StoreError {}

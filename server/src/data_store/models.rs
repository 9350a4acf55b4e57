use crate::data_store::{ArtistId, ShowId, VenueId};
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// A venue profile, as stored in the `venues` table.
///
/// Text attributes that the user did not provide are stored as empty strings, not as NULL values,
/// so the model does not need `Option` fields.
#[derive(Clone, Debug, PartialEq, Queryable, Selectable)]
#[diesel(table_name=super::schema::venues)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub image_link: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

#[derive(Clone, Debug, Default, Insertable, AsChangeset)]
#[diesel(table_name=super::schema::venues)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub image_link: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// An artist profile, as stored in the `artists` table.
///
/// The artist name carries a UNIQUE constraint; violating inserts surface as
/// [StoreError::ConflictEntityExists](super::StoreError::ConflictEntityExists).
#[derive(Clone, Debug, PartialEq, Queryable, Selectable)]
#[diesel(table_name=super::schema::artists)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

#[derive(Clone, Debug, Default, Insertable, AsChangeset)]
#[diesel(table_name=super::schema::artists)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

/// A scheduled show, pairing one venue with one artist at a point in time.
///
/// `start_time` is a naive timestamp in UTC.
#[derive(Clone, Debug, PartialEq, Queryable, Selectable)]
#[diesel(table_name=super::schema::shows)]
pub struct Show {
    pub id: ShowId,
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
    pub start_time: NaiveDateTime,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name=super::schema::shows)]
pub struct NewShow {
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
    pub start_time: NaiveDateTime,
}

/// One row of the flattened overall show listing: a show joined with its venue's and artist's
/// display attributes.
#[derive(Clone, Debug, PartialEq, Queryable)]
pub struct ShowListing {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: NaiveDateTime,
}

/// A show at a specific venue, joined with the performing artist's display attributes.
#[derive(Clone, Debug, PartialEq, Queryable)]
pub struct ShowAtVenue {
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: NaiveDateTime,
}

/// A show of a specific artist, joined with the hosting venue's display attributes.
#[derive(Clone, Debug, PartialEq, Queryable)]
pub struct ShowByArtist {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: NaiveDateTime,
}

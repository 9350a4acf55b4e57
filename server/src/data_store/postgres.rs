use super::{
    models, schema, ArtistId, BookingStore, BookingStoreFacade, ShowId, ShowTimeFilter, StoreError,
    VenueId,
};
use chrono::NaiveDateTime;
use diesel::dsl::count_star;
use diesel::pg::PgConnection;
use diesel::prelude::*;

#[derive(Clone)]
pub struct PgDataStore {
    pool: diesel::r2d2::Pool<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStore {
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        let connection_manager = diesel::r2d2::ConnectionManager::<PgConnection>::new(database_url);
        Ok(Self {
            pool: diesel::r2d2::Pool::builder()
                .test_on_check_out(true)
                .min_idle(Some(2))
                .build(connection_manager)?,
        })
    }
}

impl BookingStore for PgDataStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn BookingStoreFacade + 'a>, StoreError> {
        Ok(Box::new(PgDataStoreFacade::with_pooled_connection(
            self.pool.get()?,
        )))
    }
}

pub struct PgDataStoreFacade {
    connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStoreFacade {
    pub fn with_pooled_connection(
        connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
    ) -> Self {
        Self { connection }
    }
}

impl BookingStoreFacade for PgDataStoreFacade {
    fn get_venues(&mut self) -> Result<Vec<models::Venue>, StoreError> {
        use schema::venues::dsl::*;

        Ok(venues
            .select(models::Venue::as_select())
            .order_by((city, state, name))
            .load::<models::Venue>(&mut self.connection)?)
    }

    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::Venue, StoreError> {
        use schema::venues::dsl::*;

        Ok(venues
            .filter(id.eq(venue_id))
            .select(models::Venue::as_select())
            .first::<models::Venue>(&mut self.connection)?)
    }

    fn search_venues_by_name(&mut self, term: &str) -> Result<Vec<models::Venue>, StoreError> {
        use schema::venues::dsl::*;

        Ok(venues
            .filter(name.ilike(format!("%{}%", term)))
            .select(models::Venue::as_select())
            .order_by(name)
            .load::<models::Venue>(&mut self.connection)?)
    }

    fn create_venue(&mut self, venue: models::NewVenue) -> Result<VenueId, StoreError> {
        use schema::venues::dsl::*;

        Ok(diesel::insert_into(venues)
            .values(&venue)
            .returning(id)
            .get_result::<VenueId>(&mut self.connection)?)
    }

    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::NewVenue,
    ) -> Result<(), StoreError> {
        use schema::venues::dsl::*;

        let result = diesel::update(venues)
            .filter(id.eq(venue_id))
            .set(&venue)
            .execute(&mut self.connection)?;
        if result == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError> {
        use schema::venues::dsl::*;

        // Shows referencing the venue are removed by the ON DELETE CASCADE clause of the
        // shows.venue_id foreign key.
        let count = diesel::delete(venues.filter(id.eq(venue_id))).execute(&mut self.connection)?;
        if count == 0 {
            return Err(StoreError::NotExisting);
        }
        Ok(())
    }

    fn get_artists(&mut self) -> Result<Vec<models::Artist>, StoreError> {
        use schema::artists::dsl::*;

        Ok(artists
            .select(models::Artist::as_select())
            .order_by(name)
            .load::<models::Artist>(&mut self.connection)?)
    }

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::Artist, StoreError> {
        use schema::artists::dsl::*;

        Ok(artists
            .filter(id.eq(artist_id))
            .select(models::Artist::as_select())
            .first::<models::Artist>(&mut self.connection)?)
    }

    fn search_artists_by_name(&mut self, term: &str) -> Result<Vec<models::Artist>, StoreError> {
        use schema::artists::dsl::*;

        Ok(artists
            .filter(name.ilike(format!("%{}%", term)))
            .select(models::Artist::as_select())
            .order_by(name)
            .load::<models::Artist>(&mut self.connection)?)
    }

    fn create_artist(&mut self, artist: models::NewArtist) -> Result<ArtistId, StoreError> {
        use schema::artists::dsl::*;

        Ok(diesel::insert_into(artists)
            .values(&artist)
            .returning(id)
            .get_result::<ArtistId>(&mut self.connection)?)
    }

    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::NewArtist,
    ) -> Result<(), StoreError> {
        use schema::artists::dsl::*;

        let result = diesel::update(artists)
            .filter(id.eq(artist_id))
            .set(&artist)
            .execute(&mut self.connection)?;
        if result == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn get_show_listings(&mut self) -> Result<Vec<models::ShowListing>, StoreError> {
        Ok(schema::shows::table
            .inner_join(schema::venues::table)
            .inner_join(schema::artists::table)
            .order_by(schema::shows::start_time.asc())
            .select((
                schema::shows::venue_id,
                schema::venues::name,
                schema::shows::artist_id,
                schema::artists::name,
                schema::artists::image_link,
                schema::shows::start_time,
            ))
            .load::<models::ShowListing>(&mut self.connection)?)
    }

    fn create_show(&mut self, show: models::NewShow) -> Result<ShowId, StoreError> {
        use schema::shows::dsl::*;

        Ok(diesel::insert_into(shows)
            .values(&show)
            .returning(id)
            .get_result::<ShowId>(&mut self.connection)?)
    }

    fn get_shows_at_venue(
        &mut self,
        venue_id: VenueId,
        filter: ShowTimeFilter,
    ) -> Result<Vec<models::ShowAtVenue>, StoreError> {
        let mut query = schema::shows::table
            .inner_join(schema::artists::table)
            .filter(schema::shows::venue_id.eq(venue_id))
            .order_by(schema::shows::start_time.asc())
            .select((
                schema::shows::artist_id,
                schema::artists::name,
                schema::artists::image_link,
                schema::shows::start_time,
            ))
            .into_boxed();
        if let Some(after) = filter.starts_after {
            query = query.filter(schema::shows::start_time.gt(after));
        }
        if let Some(before) = filter.starts_before {
            query = query.filter(schema::shows::start_time.lt(before));
        }

        Ok(query.load::<models::ShowAtVenue>(&mut self.connection)?)
    }

    fn get_shows_by_artist(
        &mut self,
        artist_id: ArtistId,
        filter: ShowTimeFilter,
    ) -> Result<Vec<models::ShowByArtist>, StoreError> {
        let mut query = schema::shows::table
            .inner_join(schema::venues::table)
            .filter(schema::shows::artist_id.eq(artist_id))
            .order_by(schema::shows::start_time.asc())
            .select((
                schema::shows::venue_id,
                schema::venues::name,
                schema::venues::image_link,
                schema::shows::start_time,
            ))
            .into_boxed();
        if let Some(after) = filter.starts_after {
            query = query.filter(schema::shows::start_time.gt(after));
        }
        if let Some(before) = filter.starts_before {
            query = query.filter(schema::shows::start_time.lt(before));
        }

        Ok(query.load::<models::ShowByArtist>(&mut self.connection)?)
    }

    fn count_upcoming_shows_per_venue(
        &mut self,
        now: NaiveDateTime,
    ) -> Result<Vec<(VenueId, i64)>, StoreError> {
        use schema::shows::dsl::*;

        Ok(shows
            .filter(start_time.gt(now))
            .group_by(venue_id)
            .select((venue_id, count_star()))
            .load::<(VenueId, i64)>(&mut self.connection)?)
    }

    fn count_upcoming_shows_per_artist(
        &mut self,
        now: NaiveDateTime,
    ) -> Result<Vec<(ArtistId, i64)>, StoreError> {
        use schema::shows::dsl::*;

        Ok(shows
            .filter(start_time.gt(now))
            .group_by(artist_id)
            .select((artist_id, count_star()))
            .load::<(ArtistId, i64)>(&mut self.connection)?)
    }
}

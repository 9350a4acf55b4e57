use crate::data_store::models::{
    Artist, NewArtist, NewShow, NewVenue, Show, ShowAtVenue, ShowByArtist, ShowListing, Venue,
};
use crate::data_store::{
    ArtistId, BookingStore, BookingStoreFacade, ShowId, ShowTimeFilter, StoreError, VenueId,
};
use chrono::NaiveDateTime;
use std::sync::Mutex;

/**
 * A mock [BookingStore] implementation for testing.
 *
 * The simulated database consists of the [StoreMockData] structure with vectors of entities. These
 * can be directly modified by the tests.
 *
 * Except from checking for entity existence and the artists' name uniqueness, the interface
 * functions of this mock don't do any error checking. Instead, the [StoreMockData::next_error]
 * attribute can be set to simulate a database error.
 */
#[derive(Default)]
pub struct StoreMock {
    pub data: Mutex<StoreMockData>,
}

impl BookingStore for StoreMock {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn BookingStoreFacade + 'a>, StoreError> {
        Ok(Box::new(StoreMockFacade { store: self }))
    }
}

#[derive(Default)]
pub struct StoreMockData {
    pub venues: Vec<Venue>,
    pub artists: Vec<Artist>,
    pub shows: Vec<Show>,
    /// If not none, the next call to a store facade method will return this error.
    pub next_error: Option<StoreError>,
}

impl StoreMockData {
    fn next_id<T>(rows: &[T], id_of: impl Fn(&T) -> i32) -> i32 {
        rows.iter().map(id_of).max().unwrap_or(0) + 1
    }
}

struct StoreMockFacade<'a> {
    store: &'a StoreMock,
}

impl BookingStoreFacade for StoreMockFacade<'_> {
    fn get_venues(&mut self) -> Result<Vec<Venue>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        let mut result = data.venues.clone();
        result.sort_by(|a, b| {
            (&a.city, &a.state, &a.name).cmp(&(&b.city, &b.state, &b.name))
        });
        Ok(result)
    }

    fn get_venue(&mut self, venue_id: VenueId) -> Result<Venue, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        data.venues
            .iter()
            .find(|v| v.id == venue_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn search_venues_by_name(&mut self, term: &str) -> Result<Vec<Venue>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        let term = term.to_lowercase();
        let mut result: Vec<Venue> = data
            .venues
            .iter()
            .filter(|v| v.name.to_lowercase().contains(&term))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn create_venue(&mut self, venue: NewVenue) -> Result<VenueId, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        let venue_id = StoreMockData::next_id(&data.venues, |v| v.id);
        data.venues.push(Venue {
            id: venue_id,
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            website: venue.website,
            image_link: venue.image_link,
            facebook_link: venue.facebook_link,
            genres: venue.genres,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
        });
        Ok(venue_id)
    }

    fn update_venue(&mut self, venue_id: VenueId, venue: NewVenue) -> Result<(), StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        let row = data
            .venues
            .iter_mut()
            .find(|v| v.id == venue_id)
            .ok_or(StoreError::NotExisting)?;
        *row = Venue {
            id: venue_id,
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            website: venue.website,
            image_link: venue.image_link,
            facebook_link: venue.facebook_link,
            genres: venue.genres,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
        };
        Ok(())
    }

    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        if !data.venues.iter().any(|v| v.id == venue_id) {
            return Err(StoreError::NotExisting);
        }
        data.venues.retain(|v| v.id != venue_id);
        // Simulates the ON DELETE CASCADE clause of shows.venue_id
        data.shows.retain(|s| s.venue_id != venue_id);
        Ok(())
    }

    fn get_artists(&mut self) -> Result<Vec<Artist>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        let mut result = data.artists.clone();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<Artist, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        data.artists
            .iter()
            .find(|a| a.id == artist_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn search_artists_by_name(&mut self, term: &str) -> Result<Vec<Artist>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        let term = term.to_lowercase();
        let mut result: Vec<Artist> = data
            .artists
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&term))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn create_artist(&mut self, artist: NewArtist) -> Result<ArtistId, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        if data.artists.iter().any(|a| a.name == artist.name) {
            return Err(StoreError::ConflictEntityExists);
        }
        let artist_id = StoreMockData::next_id(&data.artists, |a| a.id);
        data.artists.push(Artist {
            id: artist_id,
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            genres: artist.genres,
            image_link: artist.image_link,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
        });
        Ok(artist_id)
    }

    fn update_artist(&mut self, artist_id: ArtistId, artist: NewArtist) -> Result<(), StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        if data
            .artists
            .iter()
            .any(|a| a.id != artist_id && a.name == artist.name)
        {
            return Err(StoreError::ConflictEntityExists);
        }
        let row = data
            .artists
            .iter_mut()
            .find(|a| a.id == artist_id)
            .ok_or(StoreError::NotExisting)?;
        *row = Artist {
            id: artist_id,
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            genres: artist.genres,
            image_link: artist.image_link,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
        };
        Ok(())
    }

    fn get_show_listings(&mut self) -> Result<Vec<ShowListing>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        let mut result: Vec<ShowListing> = data
            .shows
            .iter()
            .filter_map(|show| {
                let venue = data.venues.iter().find(|v| v.id == show.venue_id)?;
                let artist = data.artists.iter().find(|a| a.id == show.artist_id)?;
                Some(ShowListing {
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect();
        result.sort_by_key(|s| s.start_time);
        Ok(result)
    }

    fn create_show(&mut self, show: NewShow) -> Result<ShowId, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        if !data.venues.iter().any(|v| v.id == show.venue_id)
            || !data.artists.iter().any(|a| a.id == show.artist_id)
        {
            // Simulates the foreign key constraint violations of the shows table
            return Err(StoreError::InvalidInputData(
                "show must reference an existing venue and artist".to_owned(),
            ));
        }
        let show_id = StoreMockData::next_id(&data.shows, |s| s.id);
        data.shows.push(Show {
            id: show_id,
            venue_id: show.venue_id,
            artist_id: show.artist_id,
            start_time: show.start_time,
        });
        Ok(show_id)
    }

    fn get_shows_at_venue(
        &mut self,
        venue_id: VenueId,
        filter: ShowTimeFilter,
    ) -> Result<Vec<ShowAtVenue>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        let mut result: Vec<ShowAtVenue> = data
            .shows
            .iter()
            .filter(|s| s.venue_id == venue_id && filter.matches(s.start_time))
            .filter_map(|show| {
                let artist = data.artists.iter().find(|a| a.id == show.artist_id)?;
                Some(ShowAtVenue {
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect();
        result.sort_by_key(|s| s.start_time);
        Ok(result)
    }

    fn get_shows_by_artist(
        &mut self,
        artist_id: ArtistId,
        filter: ShowTimeFilter,
    ) -> Result<Vec<ShowByArtist>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        let mut result: Vec<ShowByArtist> = data
            .shows
            .iter()
            .filter(|s| s.artist_id == artist_id && filter.matches(s.start_time))
            .filter_map(|show| {
                let venue = data.venues.iter().find(|v| v.id == show.venue_id)?;
                Some(ShowByArtist {
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    venue_image_link: venue.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect();
        result.sort_by_key(|s| s.start_time);
        Ok(result)
    }

    fn count_upcoming_shows_per_venue(
        &mut self,
        now: NaiveDateTime,
    ) -> Result<Vec<(VenueId, i64)>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        let filter = ShowTimeFilter::upcoming(now);
        let mut counts: Vec<(VenueId, i64)> = Vec::new();
        for show in data.shows.iter().filter(|s| filter.matches(s.start_time)) {
            match counts.iter_mut().find(|(venue_id, _)| *venue_id == show.venue_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((show.venue_id, 1)),
            }
        }
        Ok(counts)
    }

    fn count_upcoming_shows_per_artist(
        &mut self,
        now: NaiveDateTime,
    ) -> Result<Vec<(ArtistId, i64)>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        let filter = ShowTimeFilter::upcoming(now);
        let mut counts: Vec<(ArtistId, i64)> = Vec::new();
        for show in data.shows.iter().filter(|s| filter.matches(s.start_time)) {
            match counts.iter_mut().find(|(artist_id, _)| *artist_id == show.artist_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((show.artist_id, 1)),
            }
        }
        Ok(counts)
    }
}

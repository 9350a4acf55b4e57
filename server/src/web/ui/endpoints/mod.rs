pub mod artist_detail;
pub mod artists_list;
pub mod delete_venue;
pub mod edit_artist;
pub mod edit_venue;
pub mod index;
pub mod new_show;
pub mod search_artists;
pub mod search_venues;
pub mod shows_list;
pub mod venue_detail;
pub mod venues_list;

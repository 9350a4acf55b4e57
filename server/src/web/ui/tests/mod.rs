use crate::data_store::store_mock::StoreMock;
use crate::web::ui::configure_app;
use crate::web::AppState;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{http, test, web, App};
use std::sync::Arc;


/// Build the test application around the given mock store.
///
/// A macro instead of a function, to avoid naming the opaque service type returned by
/// [test::init_service].
macro_rules! init_test_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .configure(configure_app)
                .app_data(web::Data::new(AppState { store: $store })),
        )
    };
}

/// GET the given path, assert the response status and return the response body as a string
macro_rules! get_page_body {
    ($app:expr, $uri:expr, $expected_status:expr) => {
        async {
            let req = test::TestRequest::get().uri($uri).to_request();
            let res = test::call_service($app, req).await;
            assert_eq!(res.status(), $expected_status);
            read_body_string(res).await
        }
    };
}

async fn read_body_string<B: MessageBody>(res: ServiceResponse<B>) -> String {
    let body = test::read_body(res).await;
    String::from_utf8(body.to_vec()).unwrap()
}

#[actix_web::test]
async fn test_venues_list_grouped_with_counts() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store).await;

    let body = get_page_body!(&app, "/venues", http::StatusCode::OK).await;
    // One section per (city, state) pair
    assert!(body.contains("San Francisco, CA"));
    assert!(body.contains("New York, NY"));
    assert_eq!(body.matches("San Francisco, CA").count(), 1);
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("The Dueling Pianos Bar"));
    assert!(body.contains("Park Square Live Music &amp; Coffee"));
    // Park Square has three upcoming shows, the others none (their only shows are in the past)
    assert!(body.contains("3 upcoming shows"));
    assert_eq!(body.matches("0 upcoming shows").count(), 2);
}

#[actix_web::test]
async fn test_search_venues_is_case_insensitive_substring() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store).await;

    let req = test::TestRequest::post()
        .uri("/venues/search")
        .set_form([("search_term", "hop")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("1 result"));
    assert!(body.contains("The Musical Hop"));

    let req = test::TestRequest::post()
        .uri("/venues/search")
        .set_form([("search_term", "Music")])
        .to_request();
    let res = test::call_service(&app, req).await;
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("2 results"));
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("Park Square Live Music &amp; Coffee"));
}

#[actix_web::test]
async fn test_search_venues_empty_term_matches_all() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store).await;

    let req = test::TestRequest::post()
        .uri("/venues/search")
        .set_form([("search_term", "")])
        .to_request();
    let res = test::call_service(&app, req).await;
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("3 results"));
}

#[actix_web::test]
async fn test_search_artists() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store).await;

    let req = test::TestRequest::post()
        .uri("/artists/search")
        .set_form([("search_term", "band")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("1 result"));
    assert!(body.contains("The Wild Sax Band"));
    // The band has three upcoming shows at Park Square
    assert!(body.contains("3 upcoming shows"));
}

#[actix_web::test]
async fn test_venue_detail_partitions_shows_by_start_time() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store).await;

    let body = get_page_body!(&app, "/venues/3", http::StatusCode::OK).await;
    assert!(body.contains("Park Square Live Music &amp; Coffee"));
    assert!(body.contains("3 upcoming shows"));
    assert!(body.contains("1 past show"));
    assert!(body.contains("The Wild Sax Band"));
    assert!(body.contains("Matt Quevedo"));
}

#[actix_web::test]
async fn test_venue_detail_not_found_is_a_404() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store).await;

    get_page_body!(&app, "/venues/99", http::StatusCode::NOT_FOUND).await;
}

#[actix_web::test]
async fn test_artist_detail_partitions_shows_by_start_time() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store).await;

    let body = get_page_body!(&app, "/artists/3", http::StatusCode::OK).await;
    assert!(body.contains("The Wild Sax Band"));
    assert!(body.contains("3 upcoming shows"));
    assert!(body.contains("0 past shows"));

    let body = get_page_body!(&app, "/artists/1", http::StatusCode::OK).await;
    assert!(body.contains("Guns N Petals"));
    assert!(body.contains("0 upcoming shows"));
    assert!(body.contains("1 past show"));
}

#[actix_web::test]
async fn test_artist_detail_not_found_is_a_404() {
    let store = Arc::new(StoreMock::default());
    let app = init_test_app!(store).await;

    get_page_body!(&app, "/artists/1", http::StatusCode::NOT_FOUND).await;
}

#[actix_web::test]
async fn test_store_failure_is_a_500_error_page() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    store.data.lock().unwrap().next_error = Some(
        crate::data_store::StoreError::ConnectionError("connection refused".to_owned()),
    );
    let app = init_test_app!(store).await;

    let body = get_page_body!(&app, "/venues", http::StatusCode::INTERNAL_SERVER_ERROR).await;
    assert!(body.contains("Something went wrong"));
}

#[actix_web::test]
async fn test_unknown_route_is_a_404() {
    let store = Arc::new(StoreMock::default());
    let app = init_test_app!(store).await;

    get_page_body!(&app, "/concerts", http::StatusCode::NOT_FOUND).await;
}

fn venue_form(name: &str, seeking_talent: Option<&str>) -> Vec<(String, String)> {
    let mut form = vec![
        ("name".to_string(), name.to_string()),
        ("city".to_string(), "San Francisco".to_string()),
        ("state".to_string(), "CA".to_string()),
        ("address".to_string(), "10 Main Street".to_string()),
        ("phone".to_string(), "".to_string()),
        ("genres".to_string(), "Jazz,Classical".to_string()),
        ("website".to_string(), "".to_string()),
        ("image_link".to_string(), "".to_string()),
        ("facebook_link".to_string(), "".to_string()),
        ("seeking_description".to_string(), "".to_string()),
    ];
    if let Some(value) = seeking_talent {
        form.push(("seeking_talent".to_string(), value.to_string()));
    }
    form
}

#[actix_web::test]
async fn test_create_venue_with_seeking_talent_key_present() {
    let store = Arc::new(StoreMock::default());
    let app = init_test_app!(store.clone()).await;

    let req = test::TestRequest::post()
        .uri("/venues/create")
        // An empty value still means "seeking talent": only the presence of the key counts
        .set_form(venue_form("The Codependent Cowboys", Some("")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);

    let data = store.data.lock().unwrap();
    assert_eq!(data.venues.len(), 1);
    assert_eq!(data.venues[0].name, "The Codependent Cowboys");
    assert_eq!(data.venues[0].genres, vec!["Jazz", "Classical"]);
    assert!(data.venues[0].seeking_talent);
}

#[actix_web::test]
async fn test_create_venue_without_seeking_talent_key() {
    let store = Arc::new(StoreMock::default());
    let app = init_test_app!(store.clone()).await;

    let req = test::TestRequest::post()
        .uri("/venues/create")
        .set_form(venue_form("The Codependent Cowboys", None))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);

    let data = store.data.lock().unwrap();
    assert_eq!(data.venues.len(), 1);
    assert!(!data.venues[0].seeking_talent);
}

#[actix_web::test]
async fn test_create_venue_with_empty_name_is_rejected() {
    let store = Arc::new(StoreMock::default());
    let app = init_test_app!(store.clone()).await;

    let req = test::TestRequest::post()
        .uri("/venues/create")
        .set_form(venue_form("", None))
        .to_request();
    let res = test::call_service(&app, req).await;
    // The form is re-rendered with the validation error instead of redirecting
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("Must not be empty"));

    assert_eq!(store.data.lock().unwrap().venues.len(), 0);
}

#[actix_web::test]
async fn test_create_venue_with_unknown_genre_is_rejected() {
    let store = Arc::new(StoreMock::default());
    let app = init_test_app!(store.clone()).await;

    let mut form = venue_form("The Codependent Cowboys", None);
    form.iter_mut()
        .find(|(key, _)| key.as_str() == "genres")
        .unwrap()
        .1 = "Jazz,Vaporwave".to_string();
    let req = test::TestRequest::post()
        .uri("/venues/create")
        .set_form(form)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);

    assert_eq!(store.data.lock().unwrap().venues.len(), 0);
}

#[actix_web::test]
async fn test_edit_venue_updates_the_addressed_row() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store.clone()).await;

    let mut form = venue_form("The Musical Hop", None);
    form.iter_mut().find(|(key, _)| key.as_str() == "city").unwrap().1 = "Oakland".to_string();
    let req = test::TestRequest::post()
        .uri("/venues/1/edit")
        .set_form(form)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);

    let data = store.data.lock().unwrap();
    // The addressed row changed in place; no additional row appeared
    assert_eq!(data.venues.len(), 3);
    let venue = data.venues.iter().find(|v| v.id == 1).unwrap();
    assert_eq!(venue.city, "Oakland");
    assert!(!venue.seeking_talent);
}

#[actix_web::test]
async fn test_edit_venue_not_found_is_a_404() {
    let store = Arc::new(StoreMock::default());
    let app = init_test_app!(store).await;

    let req = test::TestRequest::post()
        .uri("/venues/99/edit")
        .set_form(venue_form("Ghost Hall", None))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_venue_cascades_its_shows() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store.clone()).await;

    let req = test::TestRequest::delete().uri("/venues/3").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NO_CONTENT);

    let data = store.data.lock().unwrap();
    assert_eq!(data.venues.len(), 2);
    assert!(data.shows.iter().all(|s| s.venue_id != 3));
    // The shows at the other venues are untouched
    assert_eq!(data.shows.len(), 1);
}

#[actix_web::test]
async fn test_delete_venue_not_found_is_a_404() {
    let store = Arc::new(StoreMock::default());
    let app = init_test_app!(store).await;

    let req = test::TestRequest::delete().uri("/venues/1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

fn artist_form(name: &str) -> Vec<(String, String)> {
    vec![
        ("name".to_string(), name.to_string()),
        ("city".to_string(), "New York".to_string()),
        ("state".to_string(), "NY".to_string()),
        ("phone".to_string(), "".to_string()),
        ("genres".to_string(), "Jazz".to_string()),
        ("image_link".to_string(), "".to_string()),
        ("website".to_string(), "".to_string()),
        ("facebook_link".to_string(), "".to_string()),
        ("seeking_description".to_string(), "".to_string()),
    ]
}

#[actix_web::test]
async fn test_create_artist() {
    let store = Arc::new(StoreMock::default());
    let app = init_test_app!(store.clone()).await;

    let req = test::TestRequest::post()
        .uri("/artists/create")
        .set_form(artist_form("Tall Paul Trio"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);

    let data = store.data.lock().unwrap();
    assert_eq!(data.artists.len(), 1);
    assert!(!data.artists[0].seeking_venue);
}

#[actix_web::test]
async fn test_create_artist_with_duplicate_name_is_rejected() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store.clone()).await;

    let req = test::TestRequest::post()
        .uri("/artists/create")
        .set_form(artist_form("Matt Quevedo"))
        .to_request();
    let res = test::call_service(&app, req).await;
    // The unique name violation is reported back on the form, not as an error page
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("could not be listed"));

    assert_eq!(store.data.lock().unwrap().artists.len(), 3);
}

#[actix_web::test]
async fn test_edit_artist_updates_the_addressed_row() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store.clone()).await;

    let mut form = artist_form("Matt Quevedo");
    form.iter_mut().find(|(key, _)| key.as_str() == "city").unwrap().1 = "Brooklyn".to_string();
    let req = test::TestRequest::post()
        .uri("/artists/2/edit")
        .set_form(form)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);

    let data = store.data.lock().unwrap();
    assert_eq!(data.artists.len(), 3);
    let artist = data.artists.iter().find(|a| a.id == 2).unwrap();
    assert_eq!(artist.city, "Brooklyn");
}

#[actix_web::test]
async fn test_shows_list_joins_venue_and_artist() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store).await;

    let body = get_page_body!(&app, "/shows", http::StatusCode::OK).await;
    assert!(body.contains("Guns N Petals"));
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("The Wild Sax Band"));
    assert!(body.contains("Park Square Live Music &amp; Coffee"));
    // The date formatting of the listing
    assert!(body.contains("Tue 05/21/19 09:30 PM"));
}

#[actix_web::test]
async fn test_create_show() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store.clone()).await;

    let req = test::TestRequest::post()
        .uri("/shows/create")
        .set_form([
            ("venue_id", "1"),
            ("artist_id", "2"),
            ("start_time", "2035-05-01T20:00"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);

    let data = store.data.lock().unwrap();
    assert_eq!(data.shows.len(), 6);
    let show = data.shows.last().unwrap();
    assert_eq!(show.venue_id, 1);
    assert_eq!(show.artist_id, 2);
}

#[actix_web::test]
async fn test_create_show_with_unknown_venue_is_rejected() {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(store.as_ref());
    let app = init_test_app!(store.clone()).await;

    let req = test::TestRequest::post()
        .uri("/shows/create")
        .set_form([
            ("venue_id", "99"),
            ("artist_id", "2"),
            ("start_time", "2035-05-01T20:00"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("Unknown id"));

    assert_eq!(store.data.lock().unwrap().shows.len(), 5);
}

#[actix_web::test]
async fn test_home_page() {
    let store = Arc::new(StoreMock::default());
    let app = init_test_app!(store).await;

    let body = get_page_body!(&app, "/", http::StatusCode::OK).await;
    assert!(body.contains("Showbill"));
}

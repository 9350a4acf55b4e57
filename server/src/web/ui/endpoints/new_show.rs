use crate::data_store::models::{Artist, NewShow, Venue};
use crate::data_store::StoreError;
use crate::web::ui::base_template::{BaseTemplateContext, MainNavButton};
use crate::web::ui::error::AppError;
use crate::web::ui::form_values::{FormValue, _FormValidSimpleValidate};
use crate::web::ui::sub_templates::form_inputs::{
    FormFieldTemplate, InputType, SelectEntry, SelectFieldTemplate,
};
use crate::web::ui::{util, validation};
use crate::web::AppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;
use std::borrow::Cow;

#[get("/shows/create")]
pub async fn new_show_form(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let (venues, artists) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((store.get_venues()?, store.get_artists()?))
    })
    .await??;

    let form_data = ShowFormData::default();

    let tmpl = NewShowFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new show",
            active_nav_button: Some(MainNavButton::Shows),
        },
        form_data: &form_data,
        venues: &venues,
        artists: &artists,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/shows/create")]
pub async fn new_show(
    state: web::Data<AppState>,
    data: Form<ShowFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let store = state.store.clone();
    let (venues, artists) = web::block(move || -> Result<_, AppError> {
        let mut store = store.get_facade()?;
        Ok((store.get_venues()?, store.get_artists()?))
    })
    .await??;

    let mut form_data = data.into_inner();
    let show = form_data.validate(
        &venues.iter().map(|v| v.id).collect(),
        &artists.iter().map(|a| a.id).collect(),
    );

    let result = if let Some(show) = show {
        util::classify_store_write(
            web::block(move || -> Result<_, StoreError> {
                let mut store = state.store.get_facade()?;
                store.create_show(show)?;
                Ok(())
            })
            .await?,
        )?
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = NewShowFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new show",
            active_nav_button: Some(MainNavButton::Shows),
        },
        form_data: &form_data,
        venues: &venues,
        artists: &artists,
    };

    util::form_submit_response(
        result,
        &tmpl,
        "Show was successfully listed!".to_owned(),
        "An error occurred. Show could not be listed.".to_owned(),
        req.url_for_static("index")?,
        &req,
    )
}

#[derive(Deserialize)]
pub(in crate::web::ui) struct ShowFormData {
    venue_id: FormValue<validation::Int32FromList>,
    artist_id: FormValue<validation::Int32FromList>,
    start_time: FormValue<validation::DateTimeLocal>,
}

// No derived Default: DateTimeLocal has no meaningful default value, so the empty form starts
// without a preselected start time.
impl Default for ShowFormData {
    fn default() -> Self {
        Self {
            venue_id: FormValue::empty(),
            artist_id: FormValue::empty(),
            start_time: FormValue::empty(),
        }
    }
}

impl ShowFormData {
    /// Validate the submitted form data against the known venue and artist ids.
    ///
    /// The referenced records may still disappear concurrently before the insert; the foreign key
    /// constraints catch that case and the store reports it as
    /// [StoreError::InvalidInputData](crate::data_store::StoreError::InvalidInputData).
    fn validate(&mut self, venue_ids: &Vec<i32>, artist_ids: &Vec<i32>) -> Option<NewShow> {
        let venue_id = self.venue_id.validate_with(venue_ids);
        let artist_id = self.artist_id.validate_with(artist_ids);
        let start_time = self.start_time.validate();

        Some(NewShow {
            venue_id: venue_id?.into_inner(),
            artist_id: artist_id?.into_inner(),
            start_time: start_time?.into_inner(),
        })
    }
}

#[derive(Template)]
#[template(path = "new_show_form.html")]
struct NewShowFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a ShowFormData,
    venues: &'a Vec<Venue>,
    artists: &'a Vec<Artist>,
}

impl NewShowFormTemplate<'_> {
    fn venue_field(&self) -> SelectFieldTemplate<'_, validation::Int32FromList> {
        SelectFieldTemplate {
            label: "Venue",
            name: "venue_id",
            value: &self.form_data.venue_id,
            entries: self
                .venues
                .iter()
                .map(|venue| SelectEntry {
                    value: Cow::Owned(venue.id.to_string()),
                    text: Cow::Borrowed(venue.name.as_str()),
                })
                .collect(),
        }
    }

    fn artist_field(&self) -> SelectFieldTemplate<'_, validation::Int32FromList> {
        SelectFieldTemplate {
            label: "Artist",
            name: "artist_id",
            value: &self.form_data.artist_id,
            entries: self
                .artists
                .iter()
                .map(|artist| SelectEntry {
                    value: Cow::Owned(artist.id.to_string()),
                    text: Cow::Borrowed(artist.name.as_str()),
                })
                .collect(),
        }
    }

    fn start_time_field(&self) -> FormFieldTemplate<'_, validation::DateTimeLocal> {
        FormFieldTemplate {
            label: "Start time",
            name: "start_time",
            value: &self.form_data.start_time,
            input_type: InputType::DateTimeLocal,
            placeholder: "",
        }
    }
}

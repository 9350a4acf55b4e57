use crate::data_store::models::{Artist, NewArtist};
use crate::data_store::{ArtistId, StoreError};
use crate::web::ui::base_template::{BaseTemplateContext, MainNavButton};
use crate::web::ui::endpoints::edit_venue::{maybe_empty, state_select_entries};
use crate::web::ui::error::AppError;
use crate::web::ui::form_values::{BoolFormValue, FormValue, _FormValidSimpleValidate};
use crate::web::ui::sub_templates::form_inputs::{
    CheckboxFieldTemplate, FormFieldTemplate, GenrePickerTemplate, InputType, SelectFieldTemplate,
    TextareaFieldTemplate,
};
use crate::web::ui::{util, validation};
use crate::web::AppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;

#[get("/artists/create")]
pub async fn new_artist_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = ArtistFormData::default();

    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new artist",
            active_nav_button: Some(MainNavButton::Artists),
        },
        form_data: &form_data,
        artist_id: None,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/create")]
pub async fn create_artist(
    state: web::Data<AppState>,
    data: Form<ArtistFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let artist = form_data.validate();
    let artist_name = form_data.name.string_value().to_owned();

    let result = if let Some(artist) = artist {
        util::classify_store_write(
            web::block(move || -> Result<_, StoreError> {
                let mut store = state.store.get_facade()?;
                store.create_artist(artist)?;
                Ok(())
            })
            .await?,
        )?
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new artist",
            active_nav_button: Some(MainNavButton::Artists),
        },
        form_data: &form_data,
        artist_id: None,
    };

    util::form_submit_response(
        result,
        &tmpl,
        format!("Artist {} was successfully listed!", artist_name),
        format!(
            "An error occurred. Artist {} could not be listed.",
            artist_name
        ),
        req.url_for_static("index")?,
        &req,
    )
}

#[get("/artists/{artist_id}/edit")]
pub async fn edit_artist_form(
    path: web::Path<ArtistId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    // A missing artist id surfaces as StoreError::NotExisting and thereby as a 404 page
    let artist = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_artist(artist_id)?)
    })
    .await??;
    let form_data: ArtistFormData = artist.into();

    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit artist",
            active_nav_button: Some(MainNavButton::Artists),
        },
        form_data: &form_data,
        artist_id: Some(artist_id),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/{artist_id}/edit")]
pub async fn edit_artist(
    path: web::Path<ArtistId>,
    state: web::Data<AppState>,
    data: Form<ArtistFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let mut form_data = data.into_inner();
    let artist = form_data.validate();
    let artist_name = form_data.name.string_value().to_owned();

    // This updates the artist row addressed by the id from the URL in place. (The application
    // this one replaces inserted a second, new row here, leaving the addressed row untouched.)
    let result = if let Some(artist) = artist {
        util::classify_store_write(
            web::block(move || -> Result<_, StoreError> {
                let mut store = state.store.get_facade()?;
                store.update_artist(artist_id, artist)?;
                Ok(())
            })
            .await?,
        )?
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit artist",
            active_nav_button: Some(MainNavButton::Artists),
        },
        form_data: &form_data,
        artist_id: Some(artist_id),
    };

    util::form_submit_response(
        result,
        &tmpl,
        format!("Artist {} was successfully updated!", artist_name),
        format!(
            "An error occurred. Artist {} could not be updated.",
            artist_name
        ),
        req.url_for("artist_detail", [artist_id.to_string()])?,
        &req,
    )
}

#[derive(Deserialize, Default)]
pub(in crate::web::ui) struct ArtistFormData {
    name: FormValue<validation::NonEmptyString>,
    city: FormValue<validation::NonEmptyString>,
    state: FormValue<validation::StateCode>,
    phone: FormValue<validation::MaybeEmpty<validation::PhoneNumber>>,
    genres: FormValue<validation::CommaSeparatedGenres>,
    image_link: FormValue<validation::MaybeEmpty<validation::HttpUrl>>,
    website: FormValue<validation::MaybeEmpty<validation::HttpUrl>>,
    facebook_link: FormValue<validation::MaybeEmpty<validation::HttpUrl>>,
    seeking_venue: BoolFormValue,
    seeking_description: FormValue<String>,
}

impl ArtistFormData {
    fn validate(&mut self) -> Option<NewArtist> {
        let name = self.name.validate();
        let city = self.city.validate();
        let state = self.state.validate();
        let phone = self.phone.validate();
        let genres = self.genres.validate_with(validation::GENRES);
        let image_link = self.image_link.validate();
        let website = self.website.validate();
        let facebook_link = self.facebook_link.validate();
        let seeking_description = self.seeking_description.validate();

        Some(NewArtist {
            name: name?.into_inner(),
            city: city?.into_inner(),
            state: state?.into_inner(),
            phone: phone?.0.map(validation::PhoneNumber::into_inner).unwrap_or_default(),
            genres: genres?.into_inner(),
            image_link: image_link?
                .0
                .map(validation::HttpUrl::into_inner)
                .unwrap_or_default(),
            website: website?.0.map(validation::HttpUrl::into_inner).unwrap_or_default(),
            facebook_link: facebook_link?
                .0
                .map(validation::HttpUrl::into_inner)
                .unwrap_or_default(),
            seeking_venue: self.seeking_venue.get_value(),
            seeking_description: seeking_description?,
        })
    }
}

impl From<Artist> for ArtistFormData {
    fn from(value: Artist) -> Self {
        Self {
            name: validation::NonEmptyString(value.name).into(),
            city: validation::NonEmptyString(value.city).into(),
            state: validation::StateCode(value.state).into(),
            phone: maybe_empty(value.phone, validation::PhoneNumber).into(),
            genres: validation::CommaSeparatedGenres(value.genres).into(),
            image_link: maybe_empty(value.image_link, validation::HttpUrl).into(),
            website: maybe_empty(value.website, validation::HttpUrl).into(),
            facebook_link: maybe_empty(value.facebook_link, validation::HttpUrl).into(),
            seeking_venue: value.seeking_venue.into(),
            seeking_description: value.seeking_description.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "edit_artist_form.html")]
struct EditArtistFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a ArtistFormData,
    /// None when the form creates a new artist
    artist_id: Option<ArtistId>,
}

impl EditArtistFormTemplate<'_> {
    fn post_url(&self) -> String {
        match self.artist_id {
            Some(artist_id) => format!("/artists/{}/edit", artist_id),
            None => "/artists/create".to_owned(),
        }
    }

    fn is_new_artist(&self) -> bool {
        self.artist_id.is_none()
    }

    fn name_field(&self) -> FormFieldTemplate<'_, validation::NonEmptyString> {
        FormFieldTemplate {
            label: "Name",
            name: "name",
            value: &self.form_data.name,
            input_type: InputType::Text,
            placeholder: "",
        }
    }

    fn city_field(&self) -> FormFieldTemplate<'_, validation::NonEmptyString> {
        FormFieldTemplate {
            label: "City",
            name: "city",
            value: &self.form_data.city,
            input_type: InputType::Text,
            placeholder: "",
        }
    }

    fn state_field(&self) -> SelectFieldTemplate<'_, validation::StateCode> {
        SelectFieldTemplate {
            label: "State",
            name: "state",
            value: &self.form_data.state,
            entries: state_select_entries(),
        }
    }

    fn phone_field(
        &self,
    ) -> FormFieldTemplate<'_, validation::MaybeEmpty<validation::PhoneNumber>> {
        FormFieldTemplate {
            label: "Phone",
            name: "phone",
            value: &self.form_data.phone,
            input_type: InputType::Tel,
            placeholder: "123-456-7890",
        }
    }

    fn genres_field(&self) -> GenrePickerTemplate<'_> {
        GenrePickerTemplate {
            label: "Genres",
            name: "genres",
            value: &self.form_data.genres,
            options: validation::GENRES,
        }
    }

    fn image_link_field(
        &self,
    ) -> FormFieldTemplate<'_, validation::MaybeEmpty<validation::HttpUrl>> {
        FormFieldTemplate {
            label: "Image link",
            name: "image_link",
            value: &self.form_data.image_link,
            input_type: InputType::Url,
            placeholder: "https://",
        }
    }

    fn website_field(&self) -> FormFieldTemplate<'_, validation::MaybeEmpty<validation::HttpUrl>> {
        FormFieldTemplate {
            label: "Website",
            name: "website",
            value: &self.form_data.website,
            input_type: InputType::Url,
            placeholder: "https://",
        }
    }

    fn facebook_link_field(
        &self,
    ) -> FormFieldTemplate<'_, validation::MaybeEmpty<validation::HttpUrl>> {
        FormFieldTemplate {
            label: "Facebook link",
            name: "facebook_link",
            value: &self.form_data.facebook_link,
            input_type: InputType::Url,
            placeholder: "https://",
        }
    }

    fn seeking_venue_field(&self) -> CheckboxFieldTemplate<'_> {
        CheckboxFieldTemplate {
            label: "Looking for venues to perform at",
            name: "seeking_venue",
            value: &self.form_data.seeking_venue,
        }
    }

    fn seeking_description_field(&self) -> TextareaFieldTemplate<'_, String> {
        TextareaFieldTemplate {
            label: "Seeking description",
            name: "seeking_description",
            value: &self.form_data.seeking_description,
        }
    }
}

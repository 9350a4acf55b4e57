use crate::data_store::models::{NewVenue, Venue};
use crate::data_store::{StoreError, VenueId};
use crate::web::ui::base_template::{BaseTemplateContext, MainNavButton};
use crate::web::ui::error::AppError;
use crate::web::ui::form_values::{BoolFormValue, FormValue, _FormValidSimpleValidate};
use crate::web::ui::sub_templates::form_inputs::{
    CheckboxFieldTemplate, FormFieldTemplate, GenrePickerTemplate, InputType, SelectEntry,
    SelectFieldTemplate, TextareaFieldTemplate,
};
use crate::web::ui::{util, validation};
use crate::web::AppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;
use std::borrow::Cow;

#[get("/venues/create")]
pub async fn new_venue_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = VenueFormData::default();

    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new venue",
            active_nav_button: Some(MainNavButton::Venues),
        },
        form_data: &form_data,
        venue_id: None,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/venues/create")]
pub async fn create_venue(
    state: web::Data<AppState>,
    data: Form<VenueFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let venue = form_data.validate();
    let venue_name = form_data.name.string_value().to_owned();

    let result = if let Some(venue) = venue {
        util::classify_store_write(
            web::block(move || -> Result<_, StoreError> {
                let mut store = state.store.get_facade()?;
                store.create_venue(venue)?;
                Ok(())
            })
            .await?,
        )?
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new venue",
            active_nav_button: Some(MainNavButton::Venues),
        },
        form_data: &form_data,
        venue_id: None,
    };

    util::form_submit_response(
        result,
        &tmpl,
        format!("Venue {} was successfully listed!", venue_name),
        format!("An error occurred. Venue {} could not be listed.", venue_name),
        req.url_for_static("index")?,
        &req,
    )
}

#[get("/venues/{venue_id}/edit")]
pub async fn edit_venue_form(
    path: web::Path<VenueId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    // A missing venue id surfaces as StoreError::NotExisting and thereby as a 404 page
    let venue = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_venue(venue_id)?)
    })
    .await??;
    let form_data: VenueFormData = venue.into();

    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit venue",
            active_nav_button: Some(MainNavButton::Venues),
        },
        form_data: &form_data,
        venue_id: Some(venue_id),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/venues/{venue_id}/edit")]
pub async fn edit_venue(
    path: web::Path<VenueId>,
    state: web::Data<AppState>,
    data: Form<VenueFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let mut form_data = data.into_inner();
    let venue = form_data.validate();
    let venue_name = form_data.name.string_value().to_owned();

    // This updates the venue row addressed by the id from the URL in place. (The application this
    // one replaces inserted a second, new row here, leaving the addressed row untouched.)
    let result = if let Some(venue) = venue {
        util::classify_store_write(
            web::block(move || -> Result<_, StoreError> {
                let mut store = state.store.get_facade()?;
                store.update_venue(venue_id, venue)?;
                Ok(())
            })
            .await?,
        )?
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit venue",
            active_nav_button: Some(MainNavButton::Venues),
        },
        form_data: &form_data,
        venue_id: Some(venue_id),
    };

    util::form_submit_response(
        result,
        &tmpl,
        format!("Venue {} was successfully updated!", venue_name),
        format!("An error occurred. Venue {} could not be updated.", venue_name),
        req.url_for("venue_detail", [venue_id.to_string()])?,
        &req,
    )
}

#[derive(Deserialize, Default)]
pub(in crate::web::ui) struct VenueFormData {
    name: FormValue<validation::NonEmptyString>,
    city: FormValue<validation::NonEmptyString>,
    state: FormValue<validation::StateCode>,
    address: FormValue<String>,
    phone: FormValue<validation::MaybeEmpty<validation::PhoneNumber>>,
    genres: FormValue<validation::CommaSeparatedGenres>,
    website: FormValue<validation::MaybeEmpty<validation::HttpUrl>>,
    image_link: FormValue<validation::MaybeEmpty<validation::HttpUrl>>,
    facebook_link: FormValue<validation::MaybeEmpty<validation::HttpUrl>>,
    seeking_talent: BoolFormValue,
    seeking_description: FormValue<String>,
}

impl VenueFormData {
    fn validate(&mut self) -> Option<NewVenue> {
        let name = self.name.validate();
        let city = self.city.validate();
        let state = self.state.validate();
        let address = self.address.validate();
        let phone = self.phone.validate();
        let genres = self.genres.validate_with(validation::GENRES);
        let website = self.website.validate();
        let image_link = self.image_link.validate();
        let facebook_link = self.facebook_link.validate();
        let seeking_description = self.seeking_description.validate();

        Some(NewVenue {
            name: name?.into_inner(),
            city: city?.into_inner(),
            state: state?.into_inner(),
            address: address?,
            phone: phone?.0.map(validation::PhoneNumber::into_inner).unwrap_or_default(),
            website: website?.0.map(validation::HttpUrl::into_inner).unwrap_or_default(),
            image_link: image_link?
                .0
                .map(validation::HttpUrl::into_inner)
                .unwrap_or_default(),
            facebook_link: facebook_link?
                .0
                .map(validation::HttpUrl::into_inner)
                .unwrap_or_default(),
            genres: genres?.into_inner(),
            seeking_talent: self.seeking_talent.get_value(),
            seeking_description: seeking_description?,
        })
    }
}

impl From<Venue> for VenueFormData {
    fn from(value: Venue) -> Self {
        Self {
            name: validation::NonEmptyString(value.name).into(),
            city: validation::NonEmptyString(value.city).into(),
            state: validation::StateCode(value.state).into(),
            address: value.address.into(),
            phone: maybe_empty(value.phone, validation::PhoneNumber).into(),
            genres: validation::CommaSeparatedGenres(value.genres).into(),
            website: maybe_empty(value.website, validation::HttpUrl).into(),
            image_link: maybe_empty(value.image_link, validation::HttpUrl).into(),
            facebook_link: maybe_empty(value.facebook_link, validation::HttpUrl).into(),
            seeking_talent: value.seeking_talent.into(),
            seeking_description: value.seeking_description.into(),
        }
    }
}

/// Wrap a stored string into a [validation::MaybeEmpty] form representation, mapping the empty
/// string back to "not provided"
pub(in crate::web::ui) fn maybe_empty<T>(
    value: String,
    wrap: impl FnOnce(String) -> T,
) -> validation::MaybeEmpty<T> {
    if value.is_empty() {
        validation::MaybeEmpty(None)
    } else {
        validation::MaybeEmpty(Some(wrap(value)))
    }
}

#[derive(Template)]
#[template(path = "edit_venue_form.html")]
struct EditVenueFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a VenueFormData,
    /// None when the form creates a new venue
    venue_id: Option<VenueId>,
}

impl EditVenueFormTemplate<'_> {
    fn post_url(&self) -> String {
        match self.venue_id {
            Some(venue_id) => format!("/venues/{}/edit", venue_id),
            None => "/venues/create".to_owned(),
        }
    }

    fn is_new_venue(&self) -> bool {
        self.venue_id.is_none()
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

    fn address_field(&self) -> FormFieldTemplate<'_, String> {
        FormFieldTemplate {
            label: "Address",
            name: "address",
            value: &self.form_data.address,
            input_type: InputType::Text,
            placeholder: "",
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

    fn website_field(&self) -> FormFieldTemplate<'_, validation::MaybeEmpty<validation::HttpUrl>> {
        FormFieldTemplate {
            label: "Website",
            name: "website",
            value: &self.form_data.website,
            input_type: InputType::Url,
            placeholder: "https://",
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

    fn seeking_talent_field(&self) -> CheckboxFieldTemplate<'_> {
        CheckboxFieldTemplate {
            label: "Looking for talent to book",
            name: "seeking_talent",
            value: &self.form_data.seeking_talent,
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

pub(in crate::web::ui) fn state_select_entries() -> Vec<SelectEntry<'static>> {
    validation::US_STATES
        .iter()
        .map(|state| SelectEntry {
            value: Cow::Borrowed(*state),
            text: Cow::Borrowed(*state),
        })
        .collect()
}

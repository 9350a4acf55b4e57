//! Askama sub-templates for the various kinds of form input fields
//!
//! Each struct renders one labelled input (including its inline validation errors) from a
//! [FormValue]/[BoolFormValue]. The endpoints' form templates construct these via helper methods
//! on their template structs and embed them with the `safe` filter.

use crate::web::ui::form_values::{BoolFormValue, FormValue, FormValueRepresentation};
use crate::web::ui::validation::CommaSeparatedGenres;
use askama::Template;
use std::borrow::Cow;

#[derive(Debug, PartialEq)]
pub enum InputType {
    Text,
    Url,
    Tel,
    DateTimeLocal,
}

impl InputType {
    fn as_html_type_attr(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Url => "url",
            InputType::Tel => "tel",
            InputType::DateTimeLocal => "datetime-local",
        }
    }
}

/// A single-line input of the given [InputType]
#[derive(Template)]
#[template(path = "sub/form_field.html")]
pub struct FormFieldTemplate<'a, T: FormValueRepresentation> {
    pub label: &'a str,
    pub name: &'a str,
    pub value: &'a FormValue<T>,
    pub input_type: InputType,
    pub placeholder: &'a str,
}

/// A multi-line text input
#[derive(Template)]
#[template(path = "sub/form_textarea.html")]
pub struct TextareaFieldTemplate<'a, T: FormValueRepresentation> {
    pub label: &'a str,
    pub name: &'a str,
    pub value: &'a FormValue<T>,
}

/// A checkbox representing a presence-based boolean form field
///
/// The submitted value does not matter; the field evaluates to `true` iff the key is present in
/// the submitted form data at all (see [BoolFormValue]).
#[derive(Template)]
#[template(path = "sub/form_checkbox.html")]
pub struct CheckboxFieldTemplate<'a> {
    pub label: &'a str,
    pub name: &'a str,
    pub value: &'a BoolFormValue,
}

pub struct SelectEntry<'a> {
    pub value: Cow<'a, str>,
    pub text: Cow<'a, str>,
}

/// A single-choice select box
#[derive(Template)]
#[template(path = "sub/form_select.html")]
pub struct SelectFieldTemplate<'a, T: FormValueRepresentation> {
    pub label: &'a str,
    pub name: &'a str,
    pub value: &'a FormValue<T>,
    pub entries: Vec<SelectEntry<'a>>,
}

impl<T: FormValueRepresentation> SelectFieldTemplate<'_, T> {
    fn is_selected(&self, entry_value: &str) -> bool {
        self.value.string_value() == entry_value
    }
}

/// The genre picker: a hidden comma-separated field plus one checkbox per catalog genre
///
/// The checkboxes are synchronized into the hidden field by `static/main.js`; the hidden field is
/// what actually gets submitted.
#[derive(Template)]
#[template(path = "sub/form_genre_picker.html")]
pub struct GenrePickerTemplate<'a> {
    pub label: &'a str,
    pub name: &'a str,
    pub value: &'a FormValue<CommaSeparatedGenres>,
    pub options: &'static [&'static str],
}

impl GenrePickerTemplate<'_> {
    fn is_checked(&self, genre: &str) -> bool {
        self.value.string_value().split(',').any(|g| g == genre)
    }
}

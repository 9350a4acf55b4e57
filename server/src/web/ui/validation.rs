use crate::web::ui::form_values::{
    FormValueRepresentation, ValidateFromFormInput, ValidationDataForFormValue,
};
use lazy_static::lazy_static;

/// The musical genre catalog offered by the venue and artist forms
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// US state and territory codes offered by the venue and artist forms
pub const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR",
    "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

#[derive(Default, Debug)]
pub struct NonEmptyString(pub String);

impl NonEmptyString {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for NonEmptyString {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for NonEmptyString {
    fn from_form_value(value: &str) -> Result<Self, String> {
        if value.is_empty() {
            Err("Must not be empty".to_owned())
        } else {
            Ok(NonEmptyString(value.to_owned()))
        }
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct StateCode(pub String);

impl StateCode {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for StateCode {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for StateCode {
    fn from_form_value(value: &str) -> Result<Self, String> {
        if US_STATES.contains(&value) {
            Ok(StateCode(value.to_owned()))
        } else {
            Err("Not a known state code".to_owned())
        }
    }
}

/// A phone number in the common NNN-NNN-NNNN form
#[derive(Default, Debug, PartialEq)]
pub struct PhoneNumber(pub String);

impl PhoneNumber {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for PhoneNumber {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for PhoneNumber {
    fn from_form_value(value: &str) -> Result<Self, String> {
        lazy_static! {
            static ref RE: regex::Regex = regex::Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap();
        }
        if RE.is_match(value) {
            Ok(PhoneNumber(value.to_owned()))
        } else {
            Err("Not a valid phone number (expected format: 123-456-7890)".to_owned())
        }
    }
}

/// An absolute http(s) URL, parsed with the `url` crate
#[derive(Debug, PartialEq)]
pub struct HttpUrl(pub String);

impl HttpUrl {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for HttpUrl {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for HttpUrl {
    fn from_form_value(value: &str) -> Result<Self, String> {
        let url = url::Url::parse(value).map_err(|e| e.to_string())?;
        match url.scheme() {
            "http" | "https" => Ok(HttpUrl(value.to_owned())),
            other => Err(format!("Not an http(s) link (scheme is '{}')", other)),
        }
    }
}

/// A list of genres, submitted as one comma-separated form field backing the genre checkbox picker
///
/// Validated against a catalog of known genre names via [FormValue::validate_with]
/// (crate::web::ui::form_values::FormValue::validate_with).
#[derive(Default, Debug, PartialEq)]
pub struct CommaSeparatedGenres(pub Vec<String>);

impl CommaSeparatedGenres {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl FormValueRepresentation for CommaSeparatedGenres {
    fn into_form_value_string(self) -> String {
        self.0.join(",")
    }
}

impl ValidationDataForFormValue<CommaSeparatedGenres> for &[&str] {
    fn validate_form_value(self, value: &'_ str) -> Result<CommaSeparatedGenres, String> {
        let genres = value
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|genre| {
                if self.contains(&genre) {
                    Ok(genre.to_owned())
                } else {
                    Err(format!("Unknown genre '{}'", genre))
                }
            })
            .collect::<Result<Vec<String>, String>>()?;
        Ok(CommaSeparatedGenres(genres))
    }
}

/// The value of an HTML `datetime-local` input
///
/// See https://developer.mozilla.org/en-US/docs/Web/HTML/Guides/Date_and_time_formats#time_strings
#[derive(Debug, PartialEq)]
pub struct DateTimeLocal(pub chrono::NaiveDateTime);

impl DateTimeLocal {
    pub fn into_inner(self) -> chrono::NaiveDateTime {
        self.0
    }
}

impl FormValueRepresentation for DateTimeLocal {
    fn into_form_value_string(self) -> String {
        self.0.format("%Y-%m-%dT%H:%M").to_string()
    }
}

impl ValidateFromFormInput for DateTimeLocal {
    fn from_form_value(value: &'_ str) -> Result<Self, String> {
        Ok(Self(
            chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
                .map_err(|e| format!("Could not parse as ISO-formatted datetime value: {e}"))?,
        ))
    }
}

#[derive(Debug, PartialEq)]
pub struct MaybeEmpty<T>(pub Option<T>);

impl<T> Default for MaybeEmpty<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T: FormValueRepresentation + PartialEq> FormValueRepresentation for MaybeEmpty<T> {
    fn into_form_value_string(self) -> String {
        match self.0 {
            None => "".to_owned(),
            Some(t) => t.into_form_value_string(),
        }
    }
}

impl<T: ValidateFromFormInput + PartialEq> ValidateFromFormInput for MaybeEmpty<T> {
    fn from_form_value(value: &'_ str) -> Result<Self, String> {
        if value.is_empty() {
            Ok(Self(None))
        } else {
            Ok(Self(Some(T::from_form_value(value)?)))
        }
    }
}

impl<T: FormValueRepresentation + PartialEq, D: ValidationDataForFormValue<T>>
    ValidationDataForFormValue<MaybeEmpty<T>> for D
{
    fn validate_form_value(self, value: &'_ str) -> Result<MaybeEmpty<T>, String> {
        if value.is_empty() {
            Ok(MaybeEmpty(None))
        } else {
            Ok(MaybeEmpty(Some(
                <D as ValidationDataForFormValue<T>>::validate_form_value(self, value)?,
            )))
        }
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct Int32FromList(pub i32);

impl Int32FromList {
    pub fn into_inner(self) -> i32 {
        self.0
    }
}

impl FormValueRepresentation for Int32FromList {
    fn into_form_value_string(self) -> String {
        self.0.to_string()
    }
}

impl ValidationDataForFormValue<Int32FromList> for &Vec<i32> {
    fn validate_form_value(self, value: &'_ str) -> Result<Int32FromList, String> {
        let id: i32 = value.parse().map_err(|e| format!("Not an id: {}", e))?;
        if self.contains(&id) {
            Ok(Int32FromList(id))
        } else {
            Err("Unknown id".to_owned())
        }
    }
}

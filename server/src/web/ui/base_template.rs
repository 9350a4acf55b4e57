use crate::web::ui;
use crate::web::ui::flash::FlashesInterface;
use crate::web::ui::Resources;
use actix_web::HttpRequest;
use std::fmt::Write;

/// Common template data for all ui templates extending the `base.html` template
///
/// This struct must be a part of the template data structure, as the field `base`.
/// The contained data and functions can be used by the individual template's code, as well.
#[derive(Debug)]
pub struct BaseTemplateContext<'a> {
    /// The HTTP request the template is used to respond to. Used for creating resource urls and
    /// extracting the flash messages
    pub request: &'a HttpRequest,
    /// HTML title
    pub page_title: &'a str,
    /// Entry of the main navigation bar to be highlighted as active
    pub active_nav_button: Option<MainNavButton>,
}

#[derive(Debug, PartialEq)]
pub enum MainNavButton {
    Venues,
    Artists,
    Shows,
}

impl BaseTemplateContext<'_> {
    pub fn url_for_static(&self, file: &str) -> String {
        let url = self.request.url_for("static_resources", [file]);
        match url {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair(
                    "hash",
                    &Resources::get(file)
                        .map(|f| bytes_to_hex(&f.metadata.sha256_hash()))
                        .unwrap_or("unknown".to_string()),
                );
                url.to_string()
            }
            // Fall back to the plain path when the request has no matching named resource (e.g.
            // in the generic error page of an unknown route)
            Err(_) => format!("/static/{}", file),
        }
    }

    pub fn get_flashes(&self) -> Vec<ui::flash::FlashMessage> {
        self.request.get_and_clear_flashes()
    }

    // Per-button helpers, so that the base template does not need the enum path in scope
    pub fn venues_nav_active(&self) -> bool {
        self.active_nav_button == Some(MainNavButton::Venues)
    }

    pub fn artists_nav_active(&self) -> bool {
        self.active_nav_button == Some(MainNavButton::Artists)
    }

    pub fn shows_nav_active(&self) -> bool {
        self.active_nav_button == Some(MainNavButton::Shows)
    }
}

fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::new(), |mut output, b| {
        let _ = write!(output, "{:02x}", b);
        output
    })
}

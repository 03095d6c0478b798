//! The pages, as askama templates under `templates/`.

use askama::Template;

use crate::flash::FlashMessage;
use crate::forms::artist::ArtistForm;
use crate::forms::show::ShowForm;
use crate::forms::venue::VenueForm;
use crate::models::area::Area;
use crate::models::artist::Artist;
use crate::models::show::{ShowListing, Timeline};
use crate::models::venue::Venue;
use crate::models::SearchResult;
use crate::validation::FormErrors;

#[derive(Template, Default)]
#[template(path = "pages/home.html")]
pub struct HomePage {
    pub flash: Option<FlashMessage>,
}

#[derive(Template)]
#[template(path = "pages/venues.html")]
pub struct VenuesPage {
    pub flash: Option<FlashMessage>,
    pub areas: Vec<Area>,
}

#[derive(Template)]
#[template(path = "pages/show_venue.html")]
pub struct VenuePage {
    pub flash: Option<FlashMessage>,
    pub venue: Venue,
    pub shows: Timeline<ShowListing>,
}

#[derive(Template)]
#[template(path = "pages/artists.html")]
pub struct ArtistsPage {
    pub flash: Option<FlashMessage>,
    pub artists: Vec<Artist>,
}

#[derive(Template)]
#[template(path = "pages/show_artist.html")]
pub struct ArtistPage {
    pub flash: Option<FlashMessage>,
    pub artist: Artist,
    pub shows: Timeline<ShowListing>,
}

#[derive(Template)]
#[template(path = "pages/shows.html")]
pub struct ShowsPage {
    pub flash: Option<FlashMessage>,
    pub shows: Timeline<ShowListing>,
}

/// Results of a venue or artist search; `kind` is the URL prefix of the results.
#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchPage {
    pub flash: Option<FlashMessage>,
    pub kind: &'static str,
    pub search_term: String,
    pub results: Vec<SearchResult>,
}

#[derive(Template)]
#[template(path = "pages/search_shows.html")]
pub struct SearchShowsPage {
    pub flash: Option<FlashMessage>,
    pub search_term: String,
    pub shows: Vec<ShowListing>,
}

/// The new and edit venue forms; `action` is where the form posts to.
#[derive(Template)]
#[template(path = "forms/venue.html")]
pub struct VenueFormPage {
    pub flash: Option<FlashMessage>,
    pub title: String,
    pub action: String,
    pub form: VenueForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "forms/artist.html")]
pub struct ArtistFormPage {
    pub flash: Option<FlashMessage>,
    pub title: String,
    pub action: String,
    pub form: ArtistForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "forms/show.html")]
pub struct ShowFormPage {
    pub flash: Option<FlashMessage>,
    pub title: String,
    pub action: String,
    pub form: ShowForm,
    pub errors: FormErrors,
}

#[derive(Template, Default)]
#[template(path = "errors/404.html")]
pub struct NotFoundPage {
    pub flash: Option<FlashMessage>,
}

#[derive(Template, Default)]
#[template(path = "errors/500.html")]
pub struct ServerErrorPage {
    pub flash: Option<FlashMessage>,
}

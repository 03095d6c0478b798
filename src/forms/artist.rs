use crate::forms::{select_options, FormFields, SelectOption, GENRES, STATES};
use crate::models::artist::{Artist, NewArtist};
use crate::validation::{self, FormErrors};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.get("name").to_owned(),
            city: fields.get("city").to_owned(),
            state: fields.get("state").to_owned(),
            phone: fields.get("phone").to_owned(),
            image_link: fields.get("image_link").to_owned(),
            facebook_link: fields.get("facebook_link").to_owned(),
            website: fields.get("website").to_owned(),
            genres: fields.get_all("genres"),
            seeking_venue: fields.checked("seeking_venue"),
            seeking_description: fields.get("seeking_description").to_owned(),
        }
    }

    pub fn from_artist(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website: artist.website.clone().unwrap_or_default(),
            genres: artist.genres.0.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<NewArtist, FormErrors> {
        let mut errors = FormErrors::default();

        let name = errors.check("name", validation::required(&self.name, 120));
        let city = errors.check("city", validation::required(&self.city, 120));
        let state = errors.check("state", validation::choice(&self.state, STATES));
        let phone = errors.check("phone", validation::phone(&self.phone));
        let image_link = errors.check("image_link", validation::optional_url(&self.image_link, 500));
        let facebook_link =
            errors.check("facebook_link", validation::optional_url(&self.facebook_link, 120));
        let website = errors.check("website", validation::optional_url(&self.website, 120));
        let genres = errors.check("genres", validation::choices(&self.genres, GENRES));
        let seeking_description = errors.check(
            "seeking_description",
            validation::optional_text(&self.seeking_description, 120),
        );

        match (
            name,
            city,
            state,
            phone,
            image_link,
            facebook_link,
            website,
            genres,
            seeking_description,
        ) {
            (
                Some(name),
                Some(city),
                Some(state),
                Some(phone),
                Some(image_link),
                Some(facebook_link),
                Some(website),
                Some(genres),
                Some(seeking_description),
            ) => Ok(NewArtist {
                name,
                city,
                state: state.to_owned(),
                phone,
                image_link,
                facebook_link,
                website,
                genres,
                seeking_venue: self.seeking_venue,
                seeking_description,
            }),
            _ => Err(errors),
        }
    }

    pub fn state_options(&self) -> Vec<SelectOption> {
        select_options(STATES, std::slice::from_ref(&self.state))
    }

    pub fn genre_options(&self) -> Vec<SelectOption> {
        select_options(GENRES, &self.genres)
    }
}

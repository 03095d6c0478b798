use crate::forms::{select_options, FormFields, SelectOption, GENRES, STATES};
use crate::models::venue::{NewVenue, Venue};
use crate::validation::{self, FormErrors};

/// The venue form exactly as typed, so it can be shown again with its errors.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.get("name").to_owned(),
            city: fields.get("city").to_owned(),
            state: fields.get("state").to_owned(),
            address: fields.get("address").to_owned(),
            phone: fields.get("phone").to_owned(),
            image_link: fields.get("image_link").to_owned(),
            facebook_link: fields.get("facebook_link").to_owned(),
            website: fields.get("website").to_owned(),
            genres: fields.get_all("genres"),
            seeking_talent: fields.checked("seeking_talent"),
            seeking_description: fields.get("seeking_description").to_owned(),
        }
    }

    /// Pre-fills the edit form from a stored venue.
    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website: venue.website.clone().unwrap_or_default(),
            genres: venue.genres.0.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<NewVenue, FormErrors> {
        let mut errors = FormErrors::default();

        let name = errors.check("name", validation::required(&self.name, 120));
        let city = errors.check("city", validation::required(&self.city, 120));
        let state = errors.check("state", validation::choice(&self.state, STATES));
        let address = errors.check("address", validation::required(&self.address, 120));
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
            address,
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
                Some(address),
                Some(phone),
                Some(image_link),
                Some(facebook_link),
                Some(website),
                Some(genres),
                Some(seeking_description),
            ) => Ok(NewVenue {
                name,
                city,
                state: state.to_owned(),
                address,
                phone,
                image_link,
                facebook_link,
                website,
                genres,
                seeking_talent: self.seeking_talent,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;

    fn musical_hop() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            address: "1015 Folsom Street".to_owned(),
            phone: "1231231234".to_owned(),
            image_link: "https://images.unsplash.com/photo-1543900694-133f37abaaa5".to_owned(),
            facebook_link: "https://www.facebook.com/TheMusicalHop".to_owned(),
            website: "https://www.themusicalhop.com".to_owned(),
            genres: vec!["Jazz".to_owned(), "Reggae".to_owned(), "Folk".to_owned()],
            seeking_talent: true,
            seeking_description: "We are on the lookout for a local artist.".to_owned(),
        }
    }

    #[test]
    fn a_complete_form_validates() {
        let venue = musical_hop().validate().unwrap();

        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.state, "CA");
        assert_eq!(venue.genres, ["Jazz", "Reggae", "Folk"]);
        assert!(venue.seeking_talent);
        assert_eq!(
            venue.website.as_deref(),
            Some("https://www.themusicalhop.com")
        );
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let form = VenueForm {
            image_link: String::new(),
            facebook_link: " ".to_owned(),
            website: String::new(),
            seeking_description: String::new(),
            ..musical_hop()
        };

        let venue = form.validate().unwrap();
        assert_eq!(venue.image_link, None);
        assert_eq!(venue.facebook_link, None);
        assert_eq!(venue.seeking_description, None);
    }

    #[test]
    fn every_bad_field_is_reported() {
        let form = VenueForm {
            name: String::new(),
            state: "Narnia".to_owned(),
            phone: "123-123-1234".to_owned(),
            website: "themusicalhop".to_owned(),
            genres: vec![],
            ..musical_hop()
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.for_field("name"), [FieldError::Required.to_string()]);
        assert_eq!(errors.for_field("state"), [FieldError::InvalidChoice.to_string()]);
        assert_eq!(errors.for_field("phone"), [FieldError::InvalidPhone.to_string()]);
        assert_eq!(errors.for_field("website"), [FieldError::InvalidUrl.to_string()]);
        assert_eq!(errors.for_field("genres"), [FieldError::Required.to_string()]);
        assert!(!errors.has("city"));
        assert!(!errors.has("address"));
    }

    #[test]
    fn edit_form_round_trips_a_stored_venue() {
        let new_venue = musical_hop().validate().unwrap();
        let stored = Venue {
            id: 1,
            name: new_venue.name.clone(),
            city: new_venue.city.clone(),
            state: new_venue.state.clone(),
            address: new_venue.address.clone(),
            phone: new_venue.phone.clone(),
            image_link: new_venue.image_link.clone(),
            facebook_link: new_venue.facebook_link.clone(),
            website: new_venue.website.clone(),
            genres: sqlx::types::Json(new_venue.genres.clone()),
            seeking_talent: new_venue.seeking_talent,
            seeking_description: new_venue.seeking_description.clone(),
        };

        assert_eq!(VenueForm::from_venue(&stored).validate(), Ok(new_venue));
    }

    #[test]
    fn options_reflect_the_current_values() {
        let form = musical_hop();

        let state: Vec<_> = form.state_options().into_iter().filter(|o| o.selected).collect();
        assert_eq!(state.len(), 1);
        assert_eq!(state[0].value, "CA");

        let genres = form.genre_options().into_iter().filter(|o| o.selected).count();
        assert_eq!(genres, 3);
    }
}
